/*!
 * Tests for pipeline configuration
 */

use std::time::Duration;
use subsplit::app_config::SplitConfig;

/// Test that defaults carry the documented values
#[test]
fn test_default_config_withNoOverrides_shouldUseDocumentedDefaults() {
    let config = SplitConfig::default();

    assert_eq!(config.long_sentence_threshold, 100);
    assert_eq!(config.long_cue_char_threshold, 20);
    assert_eq!(config.batch_size, 10);
    assert_eq!(config.max_concurrent_requests, 5);
    assert_eq!(config.min_duration_ms, 100);
    assert!(config.validate().is_ok());
}

/// Test that the timeout helper converts milliseconds
#[test]
fn test_task_timeout_withConfiguredMs_shouldConvertToDuration() {
    let config = SplitConfig { task_timeout_ms: 2_500, ..SplitConfig::default() };
    assert_eq!(config.task_timeout(), Duration::from_millis(2_500));
}

/// Test that zero values are rejected
#[test]
fn test_validate_withZeroValues_shouldFail() {
    let config = SplitConfig { batch_size: 0, ..SplitConfig::default() };
    assert!(config.validate().is_err());

    let config = SplitConfig { max_concurrent_requests: 0, ..SplitConfig::default() };
    assert!(config.validate().is_err());

    let config = SplitConfig { long_sentence_threshold: 0, ..SplitConfig::default() };
    assert!(config.validate().is_err());

    let config = SplitConfig { task_timeout_ms: 0, ..SplitConfig::default() };
    assert!(config.validate().is_err());
}

/// Test that a config round-trips through JSON with missing fields defaulted
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let config: SplitConfig = serde_json::from_str(r#"{"batch_size": 4}"#).unwrap();
    assert_eq!(config.batch_size, 4);
    assert_eq!(config.long_sentence_threshold, 100);
    assert_eq!(config.max_concurrent_requests, 5);
}
