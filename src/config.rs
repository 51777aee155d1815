//! The single structured options value (`spec.md` §6, SPEC_FULL.md §A.4).
//!
//! This crate only owns the struct and its defaults, not the
//! transport-side negotiation that hands it a `serde_json::Value` from an
//! LSP `initializationOptions` / `workspace/configuration` payload.

use serde::{Deserialize, Serialize};

/// `logging.level` (`spec.md` §6). Affects diagnostic verbosity only; this
/// crate never reads it to suppress its own `tracing` calls, it only
/// exposes the parsed value for the embedding server's own subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Log,
    #[default]
    Info,
    Warn,
    Error,
    None,
}

impl LogLevel {
    /// `None` has no `tracing::Level` equivalent; every other variant maps
    /// onto the nearest one (`Log` behaves like `Info`).
    pub fn as_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Log | LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::None => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingOptions {
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsOptions {
    /// When `false`, `ide::diagnostics` returns an empty list (`spec.md` §6).
    #[serde(default = "default_true")]
    pub enable: bool,
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self { enable: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardHtmlOptions {
    /// Reserved; does not alter core mapping (`spec.md` §6).
    #[serde(default)]
    pub enable: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionsOptions {
    #[serde(default, rename = "standardHtml")]
    pub standard_html: StandardHtmlOptions,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub logging: LoggingOptions,
    #[serde(default)]
    pub diagnostics: DiagnosticsOptions,
    #[serde(default)]
    pub completions: CompletionsOptions,
}

impl Options {
    /// Parses a `workspace/configuration`-shaped JSON payload, falling
    /// back to defaults for anything malformed rather than failing the
    /// whole request (`spec.md` §7: a bad setting degrades, it doesn't
    /// become fatal).
    pub fn from_json(value: serde_json::Value) -> crate::error::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::error::Error::InvalidConfiguration(e.to_string()))
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_diagnostics_and_use_info_logging() {
        let options = Options::default();
        assert!(options.diagnostics.enable);
        assert_eq!(options.logging.level, LogLevel::Info);
        assert!(!options.completions.standard_html.enable);
    }

    #[test]
    fn parses_nested_camel_case_payload() {
        let payload = serde_json::json!({
            "logging": { "level": "debug" },
            "diagnostics": { "enable": false },
            "completions": { "standardHtml": { "enable": true } },
        });
        let options = Options::from_json(payload).unwrap();
        assert_eq!(options.logging.level, LogLevel::Debug);
        assert!(!options.diagnostics.enable);
        assert!(options.completions.standard_html.enable);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options = Options::from_json(serde_json::json!({})).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn none_level_has_no_tracing_equivalent() {
        assert_eq!(LogLevel::None.as_tracing_level(), None);
        assert_eq!(LogLevel::Error.as_tracing_level(), Some(tracing::Level::ERROR));
    }
}
