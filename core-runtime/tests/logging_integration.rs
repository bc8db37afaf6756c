//! Integration tests for logging system

use bridge_traits::logging::{ConsoleLogger, LogLevel};
use core_runtime::logging::{
    coarsen_coordinate, init_logging, redact_url, LogFormat, LoggingConfig,
};
use std::sync::Arc;

#[test]
fn test_logging_initialization_once() {
    // A global subscriber can only be installed once per process
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(Arc::new(ConsoleLogger::default()));

    assert!(init_logging(config.clone()).is_ok());
    assert!(init_logging(config).is_err());
}

#[test]
fn test_config_debug_hides_sink() {
    let config = LoggingConfig::default().with_logger_sink(Arc::new(ConsoleLogger::default()));
    let rendered = format!("{config:?}");
    assert!(rendered.contains("LoggerSink { ... }"));
}

#[test]
fn test_signed_playback_url_redaction() {
    let signed = "https://media.example.com/stops/12.mp3?X-Amz-Signature=deadbeef&X-Amz-Credential=key";
    let redacted = redact_url(signed);

    assert_eq!(redacted, "https://media.example.com/stops/12.mp3");
    assert!(!redacted.contains("deadbeef"));
}

#[test]
fn test_coordinates_are_coarsened() {
    assert_eq!(coarsen_coordinate(40.0051), 40.005);
    assert_eq!(coarsen_coordinate(-73.0104), -73.01);
}
