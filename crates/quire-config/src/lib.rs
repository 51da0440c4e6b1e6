//! Configuration management for quire.
//!
//! Parses `quire.toml` with serde and discovers the file in the current
//! directory or any parent. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [site]
//! default_lang = "en"
//! languages = ["en", "es"]
//! base_url = "${QUIRE_BASE_URL:-https://example.org}"
//!
//! [render]
//! debug = false
//! tag_group = "common"
//!
//! [input]
//! bundle = "site.json"
//!
//! [output]
//! dir = "dist"
//! search_index = "search-index.json"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `site.base_url`, `input.bundle` and `output.dir` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site bundle path.
    pub bundle: Option<PathBuf>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override debug mode.
    pub debug: Option<bool>,
    /// Override the canonical URL prefix.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub render: RenderConfig,
    input: InputConfigRaw,
    output: OutputConfigRaw,

    /// Resolved input paths (set after loading).
    #[serde(skip)]
    pub input_resolved: InputConfig,
    /// Resolved output paths (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Language served without a URL prefix.
    pub default_lang: String,
    /// Languages the site is published in.
    pub languages: Vec<String>,
    /// Prefix for canonical URLs.
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_lang: "en".to_owned(),
            languages: vec!["en".to_owned()],
            base_url: None,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render unresolved page links as placeholders instead of failing.
    pub debug: bool,
    /// Game assumed for tags named without one.
    pub tag_group: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            debug: false,
            tag_group: "common".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    bundle: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    search_index: Option<String>,
}

/// Resolved input configuration with absolute paths.
#[derive(Debug, Default)]
pub struct InputConfig {
    /// Site bundle (JSON or YAML).
    pub bundle: PathBuf,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory pages are written to.
    pub dir: PathBuf,
    /// Search index file name within `dir`.
    pub search_index: String,
}

impl OutputConfig {
    /// Full path of the search index file.
    #[must_use]
    pub fn search_index_path(&self) -> PathBuf {
        self.dir.join(&self.search_index)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`QUIRE_BASE_URL`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `quire.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// CLI settings are applied last and take precedence.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the result is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(bundle) = &settings.bundle {
            self.input_resolved.bundle.clone_from(bundle);
        }
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(dir);
        }
        if let Some(debug) = settings.debug {
            self.render.debug = debug;
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = Some(base_url.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            render: RenderConfig::default(),
            input: InputConfigRaw::default(),
            output: OutputConfigRaw::default(),
            input_resolved: InputConfig {
                bundle: base.join("site.json"),
            },
            output_resolved: OutputConfig {
                dir: base.join("dist"),
                search_index: "search-index.json".to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        require_non_empty(&self.render.tag_group, "render.tag_group")?;
        require_non_empty(&self.output_resolved.search_index, "output.search_index")?;
        if self.output_resolved.search_index.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "output.search_index must be a file name".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.default_lang, "site.default_lang")?;
        if !self.site.languages.is_empty() && !self.site.languages.contains(&self.site.default_lang)
        {
            return Err(ConfigError::Validation(format!(
                "site.languages must include default_lang `{}`",
                self.site.default_lang
            )));
        }
        if let Some(base_url) = &self.site.base_url {
            require_http_url(base_url, "site.base_url")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.site.base_url {
            let expanded = expand::expand_env(base_url, "site.base_url")?;
            // An empty default disables canonical URLs.
            self.site.base_url = Some(expanded).filter(|url| !url.is_empty());
        }
        if let Some(bundle) = &self.input.bundle {
            self.input.bundle = Some(expand::expand_env(bundle, "input.bundle")?);
        }
        if let Some(dir) = &self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.input_resolved = InputConfig {
            bundle: resolve(self.input.bundle.as_deref(), "site.json"),
        };
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "dist"),
            search_index: self
                .output
                .search_index
                .clone()
                .unwrap_or_else(|| "search-index.json".to_owned()),
        };
    }
}
