//! Configuration management for the trackpack binary
use std::path::Path;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use trackpack::links::LinkConfig;
use tracing_subscriber::EnvFilter;

use crate::config::error::TrackpackConfigError;
use crate::logging::LogOutputFormat;
use crate::logging::DEFAULT_DIRECTIVES;

mod error;

/// Prefix of the environment variables read by [`Settings::new`].
pub const ENV_PREFIX: &str = "TRACKPACK";

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Logging output.
    pub logging: LoggingConfig,
    /// Where decoded tracks link to.
    pub links: LinkConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// How log lines are rendered.
    pub format: LogOutputFormat,
    /// `tracing` filter directives, used when `RUST_LOG` is unset.
    pub directives: String,
}

impl Validatable for LoggingConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        if let Err(error) = EnvFilter::try_new(&self.directives) {
            let err = TrackpackConfigError::InvalidLogDirectives {
                directives: self.directives.clone(),
                reason: error.to_string(),
            };
            return Err(ConfigError::Message(err.to_string()));
        }

        Ok(())
    }
}

impl Validatable for LinkConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        LinkConfig::validate(self)
            .map_err(|error| ConfigError::Message(TrackpackConfigError::from(error).to_string()))
    }
}

impl Settings {
    /// Initializing the global config first with default values and then with
    /// provided/overwritten environment variables. The explicit separator with
    /// double underscores is needed to correctly parse the nested config
    /// structure, so `links.apple_storefront` is set by
    /// `TRACKPACK_LINKS__APPLE_STOREFRONT`.
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        Self::with_env_prefix(config_path, ENV_PREFIX)
    }

    /// Like [`Settings::new`], reading environment variables that start
    /// with `prefix` instead.
    pub fn with_env_prefix(
        config_path: Option<impl AsRef<Path>>,
        prefix: &str,
    ) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(prefix)
            .separator("__")
            .prefix_separator("_");

        let links = LinkConfig::default();

        let mut cfg_builder = Config::builder();
        cfg_builder = cfg_builder.set_default("logging.format", "pretty")?;
        cfg_builder = cfg_builder.set_default("logging.directives", DEFAULT_DIRECTIVES)?;
        cfg_builder = cfg_builder.set_default("links.apple_storefront", links.apple_storefront)?;
        cfg_builder = cfg_builder.set_default("links.spotify_base", links.spotify_base.as_str())?;
        cfg_builder = cfg_builder.set_default("links.youtube_base", links.youtube_base.as_str())?;
        cfg_builder = cfg_builder.set_default("links.apple_base", links.apple_base.as_str())?;
        cfg_builder = cfg_builder.set_default("links.amazon_base", links.amazon_base.as_str())?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate(self)?;
        Validatable::validate(&self.links, self)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    /// Environment prefix no other test sets variables for.
    fn isolated_prefix(name: &str) -> String {
        format!("TRACKPACK_TEST_{}", name.to_uppercase())
    }

    #[test]
    fn defaults_load_without_file() {
        let settings =
            Settings::with_env_prefix(None::<&Path>, &isolated_prefix("defaults")).unwrap();

        assert_eq!(settings.logging.format, LogOutputFormat::Pretty);
        assert_eq!(settings.logging.directives, DEFAULT_DIRECTIVES);
        assert_eq!(settings.links, LinkConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = config_file(
            r#"
            [logging]
            format = "json"

            [links]
            apple_storefront = "gb"
            spotify_base = "https://spotify.example.com/t/"
            "#,
        );

        let settings =
            Settings::with_env_prefix(Some(file.path()), &isolated_prefix("file")).unwrap();

        assert_eq!(settings.logging.format, LogOutputFormat::Json);
        assert_eq!(settings.logging.directives, DEFAULT_DIRECTIVES);
        assert_eq!(settings.links.apple_storefront, "gb");
        assert_eq!(settings.links.spotify_base, "https://spotify.example.com/t/");
        assert_eq!(settings.links.amazon_base, LinkConfig::default().amazon_base);
    }

    #[test]
    fn environment_overrides_file() {
        let prefix = isolated_prefix("env");
        std::env::set_var(format!("{prefix}_LINKS__APPLE_STOREFRONT"), "jp");
        std::env::set_var(format!("{prefix}_LOGGING__DIRECTIVES"), "warn");

        let file = config_file("[links]\napple_storefront = \"gb\"\n");
        let settings = Settings::with_env_prefix(Some(file.path()), &prefix).unwrap();

        assert_eq!(settings.links.apple_storefront, "jp");
        assert_eq!(settings.logging.directives, "warn");
    }

    #[test]
    fn invalid_storefront_is_rejected() {
        let file = config_file("[links]\napple_storefront = \"united states\"\n");
        let result = Settings::with_env_prefix(Some(file.path()), &isolated_prefix("storefront"));

        assert_matches!(result, Err(ConfigError::Message(message)) if message.contains("storefront"));
    }

    #[test]
    fn non_web_base_is_rejected() {
        let file = config_file("[links]\nyoutube_base = \"ftp://music.youtube.com/watch\"\n");
        let result = Settings::with_env_prefix(Some(file.path()), &isolated_prefix("base"));

        assert_matches!(result, Err(ConfigError::Message(message)) if message.contains("youtube_base"));
    }

    #[test]
    fn unparsable_base_is_rejected() {
        let file = config_file("[links]\namazon_base = \"not a url\"\n");
        let result = Settings::with_env_prefix(Some(file.path()), &isolated_prefix("unparsable"));

        assert_matches!(result, Err(ConfigError::Message(message)) if message.contains("link"));
    }

    #[test]
    fn invalid_directives_are_rejected() {
        let file = config_file("[logging]\ndirectives = \"trackpack=loud\"\n");
        let result = Settings::with_env_prefix(Some(file.path()), &isolated_prefix("directives"));

        assert_matches!(result, Err(ConfigError::Message(message)) if message.contains("trackpack=loud"));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let file = config_file("[logging]\nformat = \"xml\"\n");
        let result = Settings::with_env_prefix(Some(file.path()), &isolated_prefix("format"));

        assert!(result.is_err());
    }
}
