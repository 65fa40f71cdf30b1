use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file used while the terminal UI owns the screen
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Thresholds of the header visibility state machine, in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Scrolling down past this offset may hide the primary header
    #[serde(default = "default_hide_threshold")]
    pub hide_threshold: f64,
    /// When scrolling stops above this offset a hidden header is shown again
    #[serde(default = "default_show_threshold")]
    pub show_threshold: f64,
    /// Secondary bar gets the "scrolled" class past this offset
    #[serde(default = "default_scrolled_offset")]
    pub scrolled_offset: f64,
    /// Deltas at or below this never change header visibility
    #[serde(default = "default_jitter_tolerance")]
    pub jitter_tolerance: f64,
    /// Duration of the secondary bar pulse played when the header hides
    #[serde(default = "default_hide_pulse_ms")]
    pub hide_pulse_ms: u64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            hide_threshold: default_hide_threshold(),
            show_threshold: default_show_threshold(),
            scrolled_offset: default_scrolled_offset(),
            jitter_tolerance: default_jitter_tolerance(),
            hide_pulse_ms: default_hide_pulse_ms(),
        }
    }
}

impl HeaderConfig {
    pub fn hide_pulse(&self) -> Duration {
        Duration::from_millis(self.hide_pulse_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Quiet period after the last scroll before "scroll stopped" fires
    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
    /// Quiet period after the last resize before the width is compared
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            idle_ms: default_idle_ms(),
            resize_debounce_ms: default_resize_debounce_ms(),
        }
    }
}

impl TimingConfig {
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }

    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Velocity above which the auto-scrolling track pauses
    #[serde(default = "default_pause_velocity")]
    pub pause_velocity: f64,
    /// Velocity below which the track resumes
    #[serde(default = "default_resume_velocity")]
    pub resume_velocity: f64,
    /// Arrow/Enter navigation inside the secondary bar
    #[serde(default = "default_true")]
    pub keyboard_navigation: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            pause_velocity: default_pause_velocity(),
            resume_velocity: default_resume_velocity(),
            keyboard_navigation: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroConfig {
    /// Visible fraction of the hero counted as intersecting (0.0-1.0)
    #[serde(default = "default_hero_threshold")]
    pub threshold: f64,
    /// Pixels trimmed from the top and bottom of the viewport
    #[serde(default = "default_root_margin")]
    pub root_margin: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            threshold: default_hero_threshold(),
            root_margin: default_root_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Master switch for hover and ripple effects
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f64,
    #[serde(default = "default_hover_pulse_ms")]
    pub hover_pulse_ms: u64,
    #[serde(default = "default_ripple_ms")]
    pub ripple_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            hover_scale: default_hover_scale(),
            hover_pulse_ms: default_hover_pulse_ms(),
            ripple_ms: default_ripple_ms(),
        }
    }
}

impl EffectsConfig {
    pub fn hover_pulse(&self) -> Duration {
        Duration::from_millis(self.hover_pulse_ms)
    }

    pub fn ripple_lifetime(&self) -> Duration {
        Duration::from_millis(self.ripple_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bar thickness in pixels
    #[serde(default = "default_progress_height")]
    pub height: f64,
    #[serde(default = "default_progress_z_index")]
    pub z_index: i32,
    /// Width transition in milliseconds
    #[serde(default = "default_progress_transition_ms")]
    pub transition_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            height: default_progress_height(),
            z_index: default_progress_z_index(),
            transition_ms: default_progress_transition_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Smooth scrolling of the demo page
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve used by smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Pixels moved by a single line scroll
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_step: default_scroll_step(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_hide_threshold() -> f64 {
    200.0
}

fn default_show_threshold() -> f64 {
    100.0
}

fn default_scrolled_offset() -> f64 {
    50.0
}

fn default_jitter_tolerance() -> f64 {
    5.0
}

fn default_hide_pulse_ms() -> u64 {
    200
}

fn default_idle_ms() -> u64 {
    150
}

fn default_resize_debounce_ms() -> u64 {
    250
}

fn default_pause_velocity() -> f64 {
    20.0
}

fn default_resume_velocity() -> f64 {
    5.0
}

fn default_hero_threshold() -> f64 {
    0.1
}

fn default_root_margin() -> f64 {
    50.0
}

fn default_hover_scale() -> f64 {
    1.02
}

fn default_hover_pulse_ms() -> u64 {
    200
}

fn default_ripple_ms() -> u64 {
    600
}

fn default_progress_height() -> f64 {
    2.0
}

fn default_progress_z_index() -> i32 {
    1002
}

fn default_progress_transition_ms() -> u64 {
    100
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_step() -> f64 {
    48.0
}

fn default_animation_fps() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/masthead/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("masthead")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let config = AppConfig::default();
        assert_eq!(config.header.hide_threshold, 200.0);
        assert_eq!(config.header.show_threshold, 100.0);
        assert_eq!(config.header.scrolled_offset, 50.0);
        assert_eq!(config.header.jitter_tolerance, 5.0);
        assert_eq!(config.timing.idle_delay(), Duration::from_millis(150));
        assert_eq!(config.timing.resize_delay(), Duration::from_millis(250));
        assert_eq!(config.carousel.pause_velocity, 20.0);
        assert_eq!(config.carousel.resume_velocity, 5.0);
        assert_eq!(config.hero.threshold, 0.1);
        assert_eq!(config.hero.root_margin, 50.0);
        assert_eq!(config.effects.ripple_lifetime(), Duration::from_millis(600));
        assert_eq!(config.effects.hover_pulse(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [header]
            hide_threshold = 320.0

            [ui.scroll]
            easing = "ease_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.header.hide_threshold, 320.0);
        assert_eq!(config.header.show_threshold, 100.0);
        assert_eq!(config.ui.scroll.easing, EasingType::EaseOut);
        assert!(config.ui.scroll.smooth_enabled);
        assert_eq!(config.timing.idle_ms, 150);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[header]\nhide_threshold = \"high\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = AppConfig::default().to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.progress.z_index, 1002);
        assert_eq!(parsed.ui.scroll.animation_fps, 60);
    }
}
