/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use subforge::app_config::{Config, LogLevel};
use subforge::SubtitleFormat;
use crate::common;

/// Test that the default configuration passes validation
#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.conversion.default_target, SubtitleFormat::Srt);
    assert!(!config.conversion.overwrite);
    assert!(!config.translation.strict_json);
    assert_eq!(config.translation.output_suffix, "translated");
    assert!(config.validate().is_ok());
}

/// Test saving and reloading a configuration file
#[test]
fn test_config_saveAndLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("subforge.json");

    let mut config = Config::default();
    config.log_level = LogLevel::Debug;
    config.conversion.default_target = SubtitleFormat::Vtt;
    config.translation.bilingual = true;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

/// Test that missing config fields fall back to defaults
#[test]
fn test_config_fromEmptyObject_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "subforge.json", "{}")?;

    assert_eq!(Config::from_file(&path)?, Config::default());
    Ok(())
}

/// Test lowercase enum names in the config file
#[test]
fn test_config_withLowercaseEnums_shouldDeserialize() {
    let json = r#"{"log_level":"trace","conversion":{"default_target":"ass","overwrite":true}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.conversion.default_target, SubtitleFormat::Ass);
    assert!(config.conversion.overwrite);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Trace);
}

/// Test loading a config file that is not valid JSON
#[test]
fn test_config_fromMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(format!("{}", err).contains("Failed to parse config file"));
    Ok(())
}

/// Test rejection of an output suffix containing a path separator
#[test]
fn test_validate_withBackslashSuffix_shouldFail() {
    let mut config = Config::default();
    config.translation.output_suffix = r"fr\out".to_string();
    assert!(config.validate().is_err());
}
