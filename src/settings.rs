use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

use crate::fetch::DEFAULT_USER_AGENT;

const CONFIG_FILE: &str = "chapter_sheets";
const ENV_PREFIX: &str = "SHEETS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output_dir: PathBuf,
    /// Base for image sources inside exercises.
    pub img_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Write logs here (truncated on each run) instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then `chapter_sheets.toml` if present, then `SHEETS_*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::layered(File::with_name(CONFIG_FILE).required(false))
    }

    pub(crate) fn layered<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("output_dir", "output")?
            .set_default("img_base_url", "https://openstax.org")?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", 30_i64)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(text: &str) -> Settings {
        Settings::layered(File::from_str(text, FileFormat::Toml)).unwrap()
    }

    #[test]
    fn defaults() {
        let s = from_toml("");
        assert_eq!(s.output_dir, PathBuf::from("output"));
        assert_eq!(s.img_base_url, "https://openstax.org");
        assert_eq!(s.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert!(s.log_file.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let s = from_toml(
            r#"
            output_dir = "sheets"
            timeout_secs = 5
            log_file = "app.log"
            "#,
        );
        assert_eq!(s.output_dir, PathBuf::from("sheets"));
        assert_eq!(s.timeout_secs, 5);
        assert_eq!(s.log_file, Some(PathBuf::from("app.log")));
        assert_eq!(s.img_base_url, "https://openstax.org");
    }
}
