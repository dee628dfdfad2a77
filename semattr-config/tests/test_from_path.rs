use std::error::Error;
use std::fs;

use semattr_config::{CaptureLists, Config, ConfigErrorKind};
use semattr_log::{Level, LogFormat};
use similar_asserts::assert_eq;

fn write_config(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yml"), contents).unwrap();
    dir
}

#[test]
fn test_load_full_config() {
    let dir = write_config(
        r###"
logging:
  level: debug
  format: json
metrics:
  statsd: 127.0.0.1:8125
  prefix: myapp
  default_tags:
    env: test
  buffer_size: 1024
http:
  client:
    request_headers: [X-Trace, User-Agent]
  server:
    response_headers: [x-cache]
"###,
    );

    let config = Config::from_path(dir.path()).unwrap();

    assert_eq!(config.path(), dir.path());
    assert_eq!(config.logging().level, Level::Debug);
    assert_eq!(config.logging().format, LogFormat::Json);
    assert_eq!(config.statsd_addr(), Some("127.0.0.1:8125"));
    assert_eq!(config.metrics_prefix(), "myapp");
    assert_eq!(config.metrics_default_tags()["env"], "test");
    assert_eq!(config.statsd_buffer_size(), Some(1024));
    assert_eq!(
        config.client_capture(),
        &CaptureLists {
            request_headers: vec!["X-Trace".to_owned(), "User-Agent".to_owned()],
            response_headers: vec![],
        }
    );
    assert_eq!(config.server_capture().response_headers, ["x-cache"]);
}

#[test]
fn test_empty_config_file() {
    let dir = write_config("---\n{}\n");
    let config = Config::from_path(dir.path()).unwrap();

    assert_eq!(config.statsd_addr(), None);
    assert_eq!(config.metrics_prefix(), "semattr");
    assert!(config.client_capture().request_headers.is_empty());
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!Config::config_exists(dir.path()));

    let err = Config::from_path(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::CouldNotOpenFile);
    assert_eq!(err.path(), Some(dir.path().join("config.yml").as_path()));
    assert!(err.to_string().starts_with("could not open config file (file "));
    assert!(err.source().is_some());
}

#[test]
fn test_bad_yaml() {
    let dir = write_config("http: [");
    assert!(Config::config_exists(dir.path()));

    let err = Config::from_path(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::BadYaml);
}

#[test]
fn test_invalid_buffer_size_names_file() {
    let dir = write_config("metrics:\n  buffer_size: 0\n");

    let err = Config::from_path(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::InvalidValue);
    assert_eq!(err.path(), Some(dir.path().join("config.yml").as_path()));
}
