use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::capture::{CaptureSettings, CaptureSourceKind};
use crate::interview::{CompletionPolicy, SessionSettings};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_source")]
    pub source: String,
    pub file_path: Option<String>,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
    /// Offer a blank camera so video mode can record
    #[serde(default)]
    pub camera: bool,
    #[serde(default)]
    pub deny_access: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Fixed number of answers that completes a session. Unset means "all questions".
    pub completion_threshold: Option<usize>,
    pub scoring_seed: Option<u64>,
}

fn default_source() -> String {
    "synthetic".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_frame_ms() -> u64 {
    100
}

fn default_max_duration_ms() -> u64 {
    300_000
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            file_path: None,
            sample_rate: default_sample_rate(),
            frame_ms: default_frame_ms(),
            max_duration_ms: default_max_duration_ms(),
            camera: false,
            deny_access: false,
        }
    }
}

impl Config {
    /// Load from a config file (extension optional) layered with
    /// `INTERVIEW_COACH__SECTION__KEY` environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("INTERVIEW_COACH")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings
            .try_deserialize()
            .context("Failed to deserialize config")
    }

    /// Parse a TOML document directly (no environment layering).
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .context("Failed to parse TOML config")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize config")
    }

    pub fn capture_settings(&self) -> Result<CaptureSettings> {
        let source = match self.capture.source.as_str() {
            "synthetic" => CaptureSourceKind::Synthetic,
            "file" => {
                let raw = self
                    .capture
                    .file_path
                    .as_deref()
                    .context("capture.file_path is required when capture.source = \"file\"")?;
                CaptureSourceKind::File(PathBuf::from(shellexpand::tilde(raw).into_owned()))
            }
            other => anyhow::bail!("Unknown capture source: {}", other),
        };

        Ok(CaptureSettings {
            source,
            sample_rate: self.capture.sample_rate,
            frame_ms: self.capture.frame_ms,
            max_duration_ms: self.capture.max_duration_ms,
            camera: self.capture.camera,
            deny_access: self.capture.deny_access,
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            completion: match self.session.completion_threshold {
                Some(n) => CompletionPolicy::Fixed(n),
                None => CompletionPolicy::QuestionCount,
            },
            scoring_seed: self.session.scoring_seed,
        }
    }
}
