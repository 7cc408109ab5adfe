use crate::error::{Result, TocError};
use crate::inject::{DEFAULT_ANCHOR_FORMAT, DEFAULT_TOKEN, DEFAULT_WRAPPER_FORMAT, InjectOptions};
use crate::toc::{DEFAULT_BASE_LEVEL, DEFAULT_PLACEHOLDER_TITLE, TocOptions, TocTemplate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Item and level markup for the rendered list
    #[serde(default)]
    pub template: TocTemplate,

    /// How the contents block is placed into a page
    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Placeholder token replaced by the contents block
    #[serde(default = "default_token")]
    pub token: String,

    /// Marker inserted before each heading (`{id}` placeholder)
    #[serde(default = "default_anchor_format")]
    pub anchor_format: String,

    /// Container around the list (`{items}` placeholder)
    #[serde(default = "default_wrapper_format")]
    pub wrapper_format: String,

    /// Drop the container entirely when a page has no headings (default: true)
    #[serde(default = "default_omit_empty")]
    pub omit_empty: bool,

    /// Title shown for skipped heading levels
    #[serde(default = "default_placeholder_title")]
    pub placeholder_title: String,

    /// Heading level treated as top level (default: 2)
    #[serde(default = "default_base_level")]
    pub base_level: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
            anchor_format: default_anchor_format(),
            wrapper_format: default_wrapper_format(),
            omit_empty: default_omit_empty(),
            placeholder_title: default_placeholder_title(),
            base_level: default_base_level(),
        }
    }
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

fn default_anchor_format() -> String {
    DEFAULT_ANCHOR_FORMAT.to_string()
}

fn default_wrapper_format() -> String {
    DEFAULT_WRAPPER_FORMAT.to_string()
}

fn default_omit_empty() -> bool {
    true
}

fn default_placeholder_title() -> String {
    DEFAULT_PLACEHOLDER_TITLE.to_string()
}

fn default_base_level() -> usize {
    DEFAULT_BASE_LEVEL
}

impl Config {
    /// Get the XDG-style config file path (~/.config/wikitoc/config.toml)
    /// This is preferred on macOS for CLI tools and cross-platform dotfiles
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("wikitoc").join("config.toml"))
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/wikitoc/config.toml
    /// - Linux: ~/.config/wikitoc/config.toml
    /// - Windows: %APPDATA%/wikitoc/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wikitoc").join("config.toml"))
    }

    /// Load config from the default location, or return defaults if there is
    /// no readable, valid file.
    /// On macOS, checks ~/.config/wikitoc first, then falls back to ~/Library/Application Support
    pub fn load() -> Self {
        #[cfg(target_os = "macos")]
        {
            if let Some(config) = Self::xdg_config_path().and_then(|p| Self::load_from(&p).ok()) {
                return config;
            }
        }

        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| {
                Self::load_from(&path)
                    .inspect_err(|e| debug!("ignoring config: {e}"))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Load config from an explicit path, surfacing read and parse errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents).map_err(|source| TocError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| std::io::Error::other("Could not determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn toc_options(&self) -> TocOptions {
        TocOptions {
            base_level: self.document.base_level,
            placeholder_title: self.document.placeholder_title.clone(),
            template: self.template.clone(),
        }
    }

    /// Integrator options, validated.
    pub fn inject_options(&self) -> Result<InjectOptions> {
        let options = InjectOptions {
            toc: self.toc_options(),
            token: self.document.token.clone(),
            anchor_format: self.document.anchor_format.clone(),
            wrapper_format: self.document.wrapper_format.clone(),
            omit_empty: self.document.omit_empty,
        };
        options.toc.validate()?;
        Ok(options)
    }
}
