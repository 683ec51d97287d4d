use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use gearcart_core::config::AppConfig;
use toml::Value;

pub fn run(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "api.base_url",
        &config.api.base_url,
        field_source(
            "api.base_url",
            "GEARCART_API_BASE_URL",
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "api.timeout_secs",
        &config.api.timeout_secs.to_string(),
        field_source(
            "api.timeout_secs",
            "GEARCART_API_TIMEOUT_SECS",
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "storage.path",
        &config.storage.path.display().to_string(),
        field_source(
            "storage.path",
            "GEARCART_STORAGE_PATH",
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            "GEARCART_LOG_LEVEL",
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source(
            "logging.format",
            "GEARCART_LOG_FORMAT",
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value}  ({source})")
}

fn field_source(
    dotted_key: &str,
    env_key: &str,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        return format!("env {env_key}");
    }
    if let (Some(doc), Some(path)) = (doc, path) {
        if doc_has_key(doc, dotted_key) {
            return format!("file {}", path.display());
        }
    }
    "default".to_string()
}

fn doc_has_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for part in dotted_key.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

fn detect_config_path() -> Option<PathBuf> {
    if let Ok(value) = env::var("GEARCART_CONFIG") {
        if !value.trim().is_empty() {
            let path = PathBuf::from(value);
            return path.exists().then_some(path);
        }
    }
    let default = PathBuf::from("gearcart.toml");
    default.exists().then_some(default)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}
