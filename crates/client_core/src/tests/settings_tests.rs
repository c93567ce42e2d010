use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("food_client_settings_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("client.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_to_local_backend() {
    let settings =
        load_settings_from(Path::new("definitely/missing/client.toml"), no_env).expect("load");
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.backend_url, "http://localhost:8000");
}

#[test]
fn file_then_env_override_in_order() {
    let path = temp_settings_file(
        "backend_url = \"http://file.example:9000/\"\nlog_filter = \"debug\"\n",
    );

    let settings = load_settings_from(&path, no_env).expect("load");
    assert_eq!(settings.backend_url, "http://file.example:9000");
    assert_eq!(settings.log_filter, "debug");

    let settings = load_settings_from(&path, |key| match key {
        "BACKEND_URL" => Some("http://env.example".to_string()),
        "APP__BACKEND_URL" => Some("https://app.example/api".to_string()),
        _ => None,
    })
    .expect("load");
    assert_eq!(settings.backend_url, "https://app.example/api");
    assert_eq!(settings.log_filter, "debug");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_is_ignored() {
    let path = temp_settings_file("backend_url = [not toml");

    let settings = load_settings_from(&path, no_env).expect("load");
    assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn normalizes_trailing_slashes_and_blank_values() {
    assert_eq!(
        normalize_backend_url(" http://api.local:8000// ").expect("valid"),
        "http://api.local:8000"
    );
    assert_eq!(normalize_backend_url("").expect("valid"), DEFAULT_BACKEND_URL);
}

#[test]
fn rejects_invalid_or_non_http_urls() {
    assert!(matches!(
        normalize_backend_url("localhost:8000"),
        Err(SettingsError::UnsupportedScheme { .. })
    ));
    assert!(matches!(
        normalize_backend_url("not a url"),
        Err(SettingsError::InvalidBackendUrl { .. })
    ));
    assert!(matches!(
        normalize_backend_url("ftp://files.example"),
        Err(SettingsError::UnsupportedScheme { .. })
    ));
}

#[test]
fn command_line_override_wins() {
    let settings = ClientSettings::default()
        .with_backend_url(Some("http://cli.example/"))
        .expect("override");
    assert_eq!(settings.backend_url, "http://cli.example");

    let unchanged = ClientSettings::default()
        .with_backend_url(None)
        .expect("no override");
    assert_eq!(unchanged.backend_url, DEFAULT_BACKEND_URL);
}
