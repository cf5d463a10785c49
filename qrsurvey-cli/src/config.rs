//! Configuration management for qrsurvey.
//!
//! Configuration is loaded with figment from defaults, an optional TOML
//! file and `QRSURVEY_` environment variables.

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use qrsurvey::QrStyle;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform config dir.
const CONFIG_DIR_NAME: &str = "qrsurvey";

/// Prefix for environment overrides, e.g. `QRSURVEY_QR__MARGIN=4`.
const ENV_PREFIX: &str = "QRSURVEY_";

/// Where survey links point unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://qrsurvey.app/take";

/// Widest quiet zone accepted, in modules.
const MAX_MARGIN: u32 = 16;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `QRSURVEY_`, sections split on `__`)
/// 2. TOML config file at `<config_dir>/qrsurvey/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Survey link configuration.
    pub survey: SurveyConfig,
    /// Look and size of rendered codes.
    pub qr: QrStyle,
    /// Output configuration.
    pub output: OutputConfig,
}

/// Survey link configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// The address respondents open; `t` and `q` are appended to it.
    pub base_url: String,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where `qr-code.png` is saved.
    /// Defaults to the current directory.
    pub download_dir: Option<PathBuf>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!(path = %config_file.display(), "loading configuration");

        let config: Config = Self::figment(config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.qr.preview_size == 0 {
            return Err(Error::config("qr.preview_size must be greater than 0"));
        }

        if self.qr.download_size == 0 {
            return Err(Error::config("qr.download_size must be greater than 0"));
        }

        if self.qr.preview_size > self.qr.download_size {
            return Err(Error::config(format!(
                "qr.preview_size ({}) cannot be greater than qr.download_size ({})",
                self.qr.preview_size, self.qr.download_size
            )));
        }

        if self.qr.margin > MAX_MARGIN {
            return Err(Error::config(format!(
                "qr.margin ({}) must be at most {MAX_MARGIN}",
                self.qr.margin
            )));
        }

        Ok(())
    }

    /// The parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `survey.base_url` is an absolute URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.survey.base_url).map_err(|err| {
            Error::config(format!(
                "survey.base_url '{}' is not a valid URL: {err}",
                self.survey.base_url
            ))
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "survey.base_url '{}' cannot carry query parameters",
                self.survey.base_url
            )));
        }
        Ok(url)
    }

    /// Get the download directory, resolving the default if not set.
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.output
            .download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use qrsurvey::qr::HexColor;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.survey.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.qr, QrStyle::default());
        assert!(config.output.download_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_relative_base_url() {
        let mut config = Config::default();
        config.survey.base_url = "/take".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("survey.base_url"));
    }

    #[test]
    fn test_validate_opaque_base_url() {
        let mut config = Config::default();
        config.survey.base_url = "mailto:someone@example.com".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cannot carry query parameters"));
    }

    #[test]
    fn test_validate_zero_sizes() {
        let mut config = Config::default();
        config.qr.preview_size = 0;
        assert!(config.validate().unwrap_err().to_string().contains("preview_size"));

        let mut config = Config::default();
        config.qr.download_size = 0;
        assert!(config.validate().unwrap_err().to_string().contains("download_size"));
    }

    #[test]
    fn test_validate_preview_larger_than_download() {
        let mut config = Config::default();
        config.qr.preview_size = 2048;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cannot be greater than"));
    }

    #[test]
    fn test_validate_margin() {
        let mut config = Config::default();
        config.qr.margin = MAX_MARGIN;
        assert!(config.validate().is_ok());

        config.qr.margin = MAX_MARGIN + 1;
        assert!(config.validate().unwrap_err().to_string().contains("margin"));
    }

    #[test]
    fn test_download_dir_default() {
        assert_eq!(Config::default().download_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_download_dir_custom() {
        let mut config = Config::default();
        config.output.download_dir = Some(PathBuf::from("/srv/codes"));
        assert_eq!(config.download_dir(), PathBuf::from("/srv/codes"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.ends_with("qrsurvey/config.toml"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        Jail::expect_with(|jail| {
            let config = Config::load_from(Some(jail.directory().join("absent.toml")))
                .map_err(|err| err.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r##"
                [survey]
                base_url = "https://forms.example.org/s"

                [qr]
                dark = "#112233"
                margin = 4

                [output]
                download_dir = "codes"
                "##,
            )?;

            let config = Config::load_from(Some(jail.directory().join("config.toml")))
                .map_err(|err| err.to_string())?;
            assert_eq!(config.survey.base_url, "https://forms.example.org/s");
            assert_eq!(config.qr.dark, HexColor::new(0x11, 0x22, 0x33));
            assert_eq!(config.qr.margin, 4);
            assert_eq!(config.qr.download_size, 1024);
            assert_eq!(config.download_dir(), PathBuf::from("codes"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[qr]\nmargin = 4\n")?;
            jail.set_env("QRSURVEY_QR__MARGIN", "8");
            jail.set_env("QRSURVEY_SURVEY__BASE_URL", "https://env.example.com/take");

            let config = Config::load_from(Some(jail.directory().join("config.toml")))
                .map_err(|err| err.to_string())?;
            assert_eq!(config.qr.margin, 8);
            assert_eq!(config.survey.base_url, "https://env.example.com/take");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_bad_color() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[qr]\ndark = \"black\"\n")?;

            let err = Config::load_from(Some(jail.directory().join("config.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigLoad(_)));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[qr]\nmargin = 40\n")?;

            let err = Config::load_from(Some(jail.directory().join("config.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { .. }));
            Ok(())
        });
    }
}
