use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use toml::{map::Map, Value};

pub fn workspace_dir() -> PathBuf {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .unwrap()
        .stdout;
    let cargo_path = Path::new(std::str::from_utf8(&output).unwrap().trim());
    cargo_path.parent().unwrap().to_path_buf()
}

/// Read a TOML file at the workspace root into any deserializable shape,
/// so callers can bind their config to typed structs.
pub fn load_toml<T: DeserializeOwned>(file_name: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(workspace_dir().join(file_name))
        .with_context(|| format!("failed to read {}", file_name))?;

    toml::from_str(&raw)
        .with_context(|| format!("failed to parse {}", file_name))
}

/// Secrets stay free-form key/value pairs; callers pick out the keys
/// they need.
pub fn load_env() -> anyhow::Result<Map<String, Value>> {
    load_toml("Secrets.toml")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn loads_workspace_toml_by_name() {
        let config: Map<String, Value> = load_toml("Config.toml").unwrap();

        assert!(config["gemini"]["base_url"].as_str().is_some());
    }

    #[test]
    fn missing_file_is_an_error_naming_the_file() {
        let result: anyhow::Result<Map<String, Value>> =
            load_toml("NoSuch.toml");

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("NoSuch.toml"), "{message}");
    }
}
