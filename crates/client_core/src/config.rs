use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    pub api_base_url: String,
    pub user_agent: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.artic.edu/api/v1/artworks".into(),
            user_agent: concat!("artwork-catalog-viewer/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ViewerSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_api_base_url(&self.api_base_url)?;
        Ok(())
    }
}

/// Defaults, then `viewer.toml` in the working directory, then the environment.
pub fn load_settings() -> anyhow::Result<ViewerSettings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ViewerSettings> {
    let mut settings = ViewerSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
        if let Some(v) = file_cfg.get("api_base_url") {
            settings.api_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("user_agent") {
            settings.user_agent = v.clone();
        }
    }

    if let Some(v) = env("ARTIC_API_BASE") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__USER_AGENT") {
        settings.user_agent = v;
    }

    settings.validate()?;
    Ok(settings)
}

pub fn validate_api_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid artworks API base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "artworks API base url '{raw}' must use http or https, got '{}'",
            url.scheme()
        );
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_settings_file(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("artwork_viewer_config_test_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(SETTINGS_FILE);
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn missing_file_and_env_yield_defaults() {
        let settings =
            load_settings_from(Path::new("/nonexistent/viewer.toml"), |_| None).expect("load");
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn env_overrides_file() {
        let path = temp_settings_file(
            "api_base_url = \"http://localhost:9000/artworks\"\nuser_agent = \"from-file\"\n",
        );

        let settings = load_settings_from(&path, |_| None).expect("file only");
        assert_eq!(settings.api_base_url, "http://localhost:9000/artworks");
        assert_eq!(settings.user_agent, "from-file");

        let settings = load_settings_from(&path, |name| {
            (name == "APP__API_BASE_URL").then(|| "https://mirror.example/artworks".to_string())
        })
        .expect("env override");
        assert_eq!(settings.api_base_url, "https://mirror.example/artworks");
        assert_eq!(settings.user_agent, "from-file");

        fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(validate_api_base_url("ftp://api.artic.edu/artworks").is_err());
        assert!(validate_api_base_url("not a url").is_err());
        assert!(validate_api_base_url("https://api.artic.edu/api/v1/artworks").is_ok());
    }

    #[test]
    fn invalid_env_value_fails_loading() {
        let result = load_settings_from(Path::new("/nonexistent/viewer.toml"), |name| {
            (name == "ARTIC_API_BASE").then(|| "::".to_string())
        });
        assert!(result.is_err());
    }
}
