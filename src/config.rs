use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub code: CodeConfig,
    pub lists: ListsConfig,
    pub html: HtmlConfig,
    pub turns: TurnsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodeConfig {
    /// Tag `<code>` inside a fenced block with a class naming its language.
    pub language_class: bool,
    pub class_prefix: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            language_class: true,
            class_prefix: "language-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListsConfig {
    /// Emit `start` on ordered lists that do not begin at 1.
    pub ordered_start: bool,
    /// Split a paragraph that mixes list lines and plain lines into separate
    /// lists and paragraphs instead of keeping it one paragraph.
    pub loose_runs: bool,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            ordered_start: true,
            loose_runs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HtmlConfig {
    pub self_closing_breaks: bool,
}

impl HtmlConfig {
    pub fn line_break(&self) -> &'static str {
        if self.self_closing_breaks { "<br />" } else { "<br>" }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TurnsConfig {
    pub user_class: String,
    pub ai_class: String,
}

impl Default for TurnsConfig {
    fn default() -> Self {
        Self {
            user_class: "msg user".to_string(),
            ai_class: "msg ai".to_string(),
        }
    }
}

impl Config {
    /// The bundled defaults from `default_config.toml`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Keys missing from the file take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return the bundled defaults if it cannot be read.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "using default config");
                Self::compiled_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_defaults_match_code_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[lists]\nloose_runs = true\n").unwrap();
        assert!(config.lists.loose_runs);
        assert!(config.lists.ordered_start);
        assert_eq!(config.code, CodeConfig::default());
        assert_eq!(config.turns, TurnsConfig::default());
    }

    #[test]
    fn break_style() {
        let mut html = HtmlConfig::default();
        assert_eq!(html.line_break(), "<br>");
        html.self_closing_breaks = true;
        assert_eq!(html.line_break(), "<br />");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/chatmark.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_or_default_falls_back() {
        assert_eq!(
            Config::load_or_default(Path::new("/nonexistent/chatmark.toml")),
            Config::default()
        );
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("chatmark-invalid-{}.toml", std::process::id()));
        fs::write(&path, "[lists\nloose_runs = ").unwrap();
        let err = Config::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
