use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use distind_core::geometry::{
    RulerSpec, ANIMATION_DURATION, HIGHLIGHT_COUNT, HIGHLIGHT_HEIGHT, MARKS, MARK_HEIGHT,
    MARK_WIDTH, UPDATE_INTERVAL,
};
use distind_core::source::SourceError;
use distind_core::DistanceState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ruler: RulerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

/// Upper bounds for ruler settings. Anything larger cannot fit a terminal.
const MAX_MARKS: usize = 1024;
const MAX_ROWS: u16 = 64;

fn default_marks() -> usize {
    MARKS
}

fn default_mark_width() -> f64 {
    MARK_WIDTH
}

fn default_mark_height() -> f64 {
    MARK_HEIGHT
}

fn default_highlight_height() -> f64 {
    HIGHLIGHT_HEIGHT
}

fn default_highlight_count() -> usize {
    HIGHLIGHT_COUNT
}

fn default_mark_rows() -> u16 {
    2
}

fn default_highlight_rows() -> u16 {
    3
}

fn default_animation_ms() -> u64 {
    ANIMATION_DURATION.as_millis() as u64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulerConfig {
    #[serde(default = "default_marks")]
    pub marks: usize,
    /// Mark width in columns.
    #[serde(default = "default_mark_width")]
    pub mark_width: f64,
    #[serde(default = "default_mark_height")]
    pub mark_height: f64,
    #[serde(default = "default_highlight_height")]
    pub highlight_height: f64,
    #[serde(default = "default_highlight_count")]
    pub highlight_count: usize,
    /// Terminal rows used by a plain mark.
    #[serde(default = "default_mark_rows")]
    pub mark_rows: u16,
    /// Terminal rows used by a highlighted mark.
    #[serde(default = "default_highlight_rows")]
    pub highlight_rows: u16,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            marks: default_marks(),
            mark_width: default_mark_width(),
            mark_height: default_mark_height(),
            highlight_height: default_highlight_height(),
            highlight_count: default_highlight_count(),
            mark_rows: default_mark_rows(),
            highlight_rows: default_highlight_rows(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl RulerConfig {
    pub fn spec(&self) -> RulerSpec {
        RulerSpec {
            marks: self.marks,
            mark_width: self.mark_width,
            mark_height: self.mark_height,
            highlight_height: self.highlight_height,
            highlight_count: self.highlight_count,
        }
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Random,
    Script,
    Stdin,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Random => write!(f, "random"),
            SourceKind::Script => write!(f, "script"),
            SourceKind::Stdin => write!(f, "stdin"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = SourceError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" | "sim" | "simulated" => Ok(SourceKind::Random),
            "script" | "scripted" => Ok(SourceKind::Script),
            "stdin" | "-" => Ok(SourceKind::Stdin),
            other => Err(SourceError::UnknownKind(other.to_string())),
        }
    }
}

fn default_interval_ms() -> u64 {
    UPDATE_INTERVAL.as_millis() as u64
}

fn default_script() -> Vec<DistanceState> {
    vec![
        DistanceState::TooClose,
        DistanceState::Acceptable,
        DistanceState::TooFar,
        DistanceState::Acceptable,
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_script")]
    pub script: Vec<DistanceState>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            interval_ms: default_interval_ms(),
            script: default_script(),
            seed: None,
        }
    }
}

impl SourceConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_frame_ms() -> u64 {
    16
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Overrides the highlight colour, `#rrggbb`.
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            accent: None,
            frame_ms: default_frame_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content).context("Failed to parse config file")?;
        config.validate();
        Ok(config)
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("distind")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("distind")
    }

    pub fn log_path() -> PathBuf {
        Self::data_dir().join("distind.log")
    }

    pub fn ensure_dirs() -> Result<()> {
        std::fs::create_dir_all(Self::data_dir())?;
        Ok(())
    }

    /// Replaces values the ruler cannot draw with the defaults.
    pub fn validate(&mut self) {
        let ruler = &mut self.ruler;
        if ruler.marks == 0 {
            tracing::warn!("ruler.marks must be at least 1, using {MARKS}");
            ruler.marks = MARKS;
        }
        if ruler.marks > MAX_MARKS {
            tracing::warn!(value = ruler.marks, "ruler.marks is capped at {MAX_MARKS}");
            ruler.marks = MAX_MARKS;
        }
        if !(ruler.mark_width.is_finite() && ruler.mark_width >= 1.0) {
            tracing::warn!(value = ruler.mark_width, "Invalid ruler.mark_width, using {MARK_WIDTH}");
            ruler.mark_width = MARK_WIDTH;
        }
        // marks are drawn in whole columns
        ruler.mark_width = ruler.mark_width.round();
        if ruler.highlight_count == 0 || ruler.highlight_count > ruler.marks {
            let fallback = HIGHLIGHT_COUNT.min(ruler.marks);
            tracing::warn!(
                value = ruler.highlight_count,
                "ruler.highlight_count must be between 1 and ruler.marks, using {fallback}"
            );
            ruler.highlight_count = fallback;
        }
        if ruler.mark_rows == 0 {
            ruler.mark_rows = default_mark_rows();
        }
        if ruler.mark_rows > MAX_ROWS || ruler.highlight_rows > MAX_ROWS {
            tracing::warn!(
                mark_rows = ruler.mark_rows,
                highlight_rows = ruler.highlight_rows,
                "ruler rows are capped at {MAX_ROWS}"
            );
            ruler.mark_rows = ruler.mark_rows.min(MAX_ROWS);
            ruler.highlight_rows = ruler.highlight_rows.min(MAX_ROWS);
        }
        if ruler.highlight_rows < ruler.mark_rows {
            ruler.highlight_rows = ruler.mark_rows;
        }
        if self.source.interval_ms == 0 {
            tracing::warn!("source.interval_ms must be positive, using {}", default_interval_ms());
            self.source.interval_ms = default_interval_ms();
        }
        if self.source.script.is_empty() {
            self.source.script = default_script();
        }
        if self.tui.frame_ms == 0 {
            self.tui.frame_ms = default_frame_ms();
        }
    }
}
