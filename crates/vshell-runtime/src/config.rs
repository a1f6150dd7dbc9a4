#![forbid(unsafe_code)]

//! Shell configuration.
//!
//! Everything tunable lives here: drawer geometry and slide timing, the
//! handoff deadlines, and the external target's scheme candidates and
//! display name. Defaults match the shipped app; builder methods override
//! pieces in code, and the `config-file` feature layers overrides from a
//! TOML or JSON file on top of the defaults.

use vshell_core::drawer::DrawerConfig;
use vshell_core::uri::{ConfigError, ExternalAppTarget};

use crate::invoker::HandoffConfig;

// ---------------------------------------------------------------------------
// ShellConfig
// ---------------------------------------------------------------------------

/// Complete shell configuration.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Drawer geometry and slide timing.
    pub drawer: DrawerConfig,
    /// Handoff phase deadlines.
    pub handoff: HandoffConfig,
    /// Display name of the external app, used in notices.
    pub app_display_name: String,
    /// Ordered launch-URI candidates for the external app.
    pub scheme_candidates: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            drawer: DrawerConfig::default(),
            handoff: HandoffConfig::default(),
            app_display_name: "Vortex".to_string(),
            scheme_candidates: vec!["vortex://open".to_string(), "vortex://".to_string()],
        }
    }
}

impl ShellConfig {
    /// Replace the drawer settings.
    #[must_use]
    pub fn with_drawer(mut self, drawer: DrawerConfig) -> Self {
        self.drawer = drawer;
        self
    }

    /// Replace the handoff deadlines.
    #[must_use]
    pub fn with_handoff(mut self, handoff: HandoffConfig) -> Self {
        self.handoff = handoff;
        self
    }

    /// Replace the external app's display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.app_display_name = name.into();
        self
    }

    /// Replace the scheme candidate list.
    #[must_use]
    pub fn with_schemes(mut self, schemes: Vec<String>) -> Self {
        self.scheme_candidates = schemes;
        self
    }

    /// Build the immutable handoff target from this configuration, as done
    /// once when the handoff screen mounts.
    pub fn handoff_target(&self) -> Result<ExternalAppTarget, ConfigError> {
        ExternalAppTarget::new(self.app_display_name.clone(), self.scheme_candidates.clone())
    }
}

// ---------------------------------------------------------------------------
// File overrides (feature-gated)
// ---------------------------------------------------------------------------

#[cfg(feature = "config-file")]
mod file {
    use std::path::Path;

    use serde::{Deserialize, Serialize};
    use thiserror::Error;
    use web_time::Duration;

    use super::ShellConfig;

    /// Failure loading a config file.
    #[derive(Debug, Error)]
    pub enum ConfigFileError {
        #[error("could not read config file: {0}")]
        Io(#[from] std::io::Error),
        #[error("invalid TOML config: {0}")]
        Toml(#[from] toml::de::Error),
        #[error("invalid JSON config: {0}")]
        Json(#[from] serde_json::Error),
    }

    /// On-disk shape. Every field is optional; absent fields keep their
    /// defaults.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ShellConfigFile {
        drawer: Option<DrawerSection>,
        handoff: Option<HandoffSection>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct DrawerSection {
        width: Option<f32>,
        slide_ms: Option<u64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct HandoffSection {
        query_timeout_ms: Option<u64>,
        open_timeout_ms: Option<u64>,
        display_name: Option<String>,
        schemes: Option<Vec<String>>,
    }

    impl ShellConfigFile {
        fn apply(self, mut config: ShellConfig) -> ShellConfig {
            if let Some(drawer) = self.drawer {
                if let Some(width) = drawer.width {
                    config.drawer.width = width;
                }
                if let Some(ms) = drawer.slide_ms {
                    config.drawer.slide = Duration::from_millis(ms);
                }
            }
            if let Some(handoff) = self.handoff {
                if let Some(ms) = handoff.query_timeout_ms {
                    config.handoff.query_timeout = Duration::from_millis(ms);
                }
                if let Some(ms) = handoff.open_timeout_ms {
                    config.handoff.open_timeout = Duration::from_millis(ms);
                }
                if let Some(name) = handoff.display_name {
                    config.app_display_name = name;
                }
                if let Some(schemes) = handoff.schemes {
                    config.scheme_candidates = schemes;
                }
            }
            config
        }
    }

    impl ShellConfig {
        /// Defaults plus overrides from a TOML document.
        pub fn from_toml_str(text: &str) -> Result<Self, ConfigFileError> {
            let file: ShellConfigFile = toml::from_str(text)?;
            Ok(file.apply(Self::default()))
        }

        /// Defaults plus overrides from a JSON document.
        pub fn from_json_str(text: &str) -> Result<Self, ConfigFileError> {
            let file: ShellConfigFile = serde_json::from_str(text)?;
            Ok(file.apply(Self::default()))
        }

        /// Load overrides from a file, dispatching on the `.json` extension
        /// (everything else parses as TOML).
        pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path)?;
            let config = if path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
            {
                Self::from_json_str(&text)?
            } else {
                Self::from_toml_str(&text)?
            };
            tracing::info!(
                target: "vshell.config",
                path = %path.display(),
                "loaded shell config overrides"
            );
            Ok(config)
        }
    }
}

#[cfg(feature = "config-file")]
pub use file::ConfigFileError;

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    #[test]
    fn defaults_match_the_shipped_app() {
        let config = ShellConfig::default();
        assert_eq!(config.app_display_name, "Vortex");
        assert_eq!(
            config.scheme_candidates,
            vec!["vortex://open".to_string(), "vortex://".to_string()]
        );
        assert_eq!(config.drawer.slide, Duration::from_millis(300));
    }

    #[test]
    fn builders_override_pieces() {
        let config = ShellConfig::default()
            .with_display_name("Vortex AR")
            .with_schemes(vec!["vortexar://".to_string()]);
        assert_eq!(config.app_display_name, "Vortex AR");
        assert_eq!(config.scheme_candidates, vec!["vortexar://".to_string()]);
    }

    #[test]
    fn handoff_target_uses_name_and_candidates() {
        let target = ShellConfig::default().handoff_target().unwrap();
        assert_eq!(target.display_name(), "Vortex");
        assert_eq!(target.candidates().len(), 2);
    }

    #[test]
    fn empty_scheme_list_fails_target_construction() {
        let config = ShellConfig::default().with_schemes(Vec::new());
        assert!(config.handoff_target().is_err());
    }

    #[cfg(feature = "config-file")]
    mod file_overrides {
        use super::*;
        use std::io::Write;

        #[test]
        fn toml_overrides_layer_onto_defaults() {
            let config = ShellConfig::from_toml_str(
                r#"
                [drawer]
                slide_ms = 200

                [handoff]
                display_name = "Vortex AR"
                schemes = ["vortexar://open"]
                "#,
            )
            .unwrap();
            assert_eq!(config.drawer.slide, Duration::from_millis(200));
            assert_eq!(config.drawer.width, 280.0);
            assert_eq!(config.app_display_name, "Vortex AR");
            assert_eq!(config.scheme_candidates, vec!["vortexar://open".to_string()]);
            assert_eq!(config.handoff.query_timeout, Duration::from_secs(2));
        }

        #[test]
        fn json_overrides_parse_too() {
            let config = ShellConfig::from_json_str(
                r#"{"handoff": {"query_timeout_ms": 500, "open_timeout_ms": 750}}"#,
            )
            .unwrap();
            assert_eq!(config.handoff.query_timeout, Duration::from_millis(500));
            assert_eq!(config.handoff.open_timeout, Duration::from_millis(750));
        }

        #[test]
        fn unknown_fields_are_rejected() {
            assert!(ShellConfig::from_toml_str("[drawer]\nwdith = 1.0\n").is_err());
        }

        #[test]
        fn load_dispatches_on_extension() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("shell.toml");
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "[drawer]\nwidth = 320.0").unwrap();
            let config = ShellConfig::load(&path).unwrap();
            assert_eq!(config.drawer.width, 320.0);

            let json_path = dir.path().join("shell.json");
            std::fs::write(&json_path, r#"{"drawer": {"width": 200.0}}"#).unwrap();
            let config = ShellConfig::load(&json_path).unwrap();
            assert_eq!(config.drawer.width, 200.0);
        }
    }
}
