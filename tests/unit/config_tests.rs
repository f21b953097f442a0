// Configuration loading from files

use std::io::Write;
use std::path::{Path, PathBuf};
use tifomaster::config::{Config, LogFormat};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_with_env_substitution() {
    std::env::set_var("TIFOMASTER_UNIT_KEY", "key-from-env");
    std::env::set_var("TIFOMASTER_UNIT_DIR", "/srv/tifos");

    let file = write_config(
        r#"
generator:
  api_key: "${TIFOMASTER_UNIT_KEY}"
output:
  dir: "${TIFOMASTER_UNIT_DIR}/out"
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.generator.api_key, "key-from-env");
    assert_eq!(config.output.dir, PathBuf::from("/srv/tifos/out"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_reported() {
    let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.starts_with("Failed to read config file"));
}

#[test]
fn test_malformed_yaml_is_reported() {
    let file = write_config("generator: [unclosed");
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_example_config_parses() {
    std::env::set_var("API_KEY", "example-key");

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.yaml");
    let config = Config::from_file(path).unwrap();

    assert_eq!(config.generator.api_key, "example-key");
    assert_eq!(config.generator.model, "gemini-2.5-flash-image");
    assert_eq!(config.watermark.font_path, None);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
}
