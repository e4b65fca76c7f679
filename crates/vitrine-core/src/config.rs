use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::easing::Easing;
use crate::loader::CompletionPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds (used when nothing is animating)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Animation frame rate ceiling
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Skip entrance animations and smooth scrolling
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            fps: default_fps(),
            reduced_motion: false,
        }
    }
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth (animated) scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub duration_ms: u64,
    /// Easing curve for scroll animation
    #[serde(default = "default_scroll_easing")]
    pub easing: Easing,
    /// Rows moved per line-scroll request
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            duration_ms: default_scroll_duration(),
            easing: default_scroll_easing(),
            scroll_lines: default_scroll_lines(),
        }
    }
}

impl ScrollConfig {
    /// Animation duration as a [`Duration`]
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Check if smooth scrolling is enabled
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled
    }
}

/// Pointer overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Render the dot/ring pointer follower
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring smoothing factor per frame, in (0, 1]
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            smoothing: default_smoothing(),
        }
    }
}

/// Loading sequence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Run the loading sequence before revealing the page
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// What happens to an unreported completion when the loader is torn
    /// down early
    #[serde(default)]
    pub completion: CompletionPolicy,
    /// Multiplier on the sequence's clock (2.0 = twice as fast)
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            completion: CompletionPolicy::default(),
            time_scale: default_time_scale(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    250
}

fn default_fps() -> u32 {
    60
}

fn default_scroll_duration() -> u64 {
    1200
}

fn default_scroll_easing() -> Easing {
    Easing::ExpoOut
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_smoothing() -> f64 {
    0.12
}

fn default_time_scale() -> f64 {
    1.0
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaults if it is absent
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vitrine/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vitrine")
            .join("config.toml")
    }

    /// Animation tick duration derived from the fps ceiling
    pub fn animation_tick(&self) -> Duration {
        if self.ui.fps == 0 {
            return Duration::from_millis(16);
        }
        Duration::from_millis((1000 / self.ui.fps as u64).max(1))
    }

    /// Idle tick duration
    pub fn idle_tick(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.scroll.smooth_enabled);
        assert_eq!(config.scroll.duration_ms, 1200);
        assert_eq!(config.scroll.easing, Easing::ExpoOut);
        assert!((config.overlay.smoothing - 0.12).abs() < 1e-9);
        assert_eq!(config.loader.completion, CompletionPolicy::Abandon);
        assert_eq!(config.animation_tick(), Duration::from_millis(16));
        assert_eq!(config.idle_tick(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [scroll]
            smooth_enabled = false

            [loader]
            completion = "deliver"
            "#,
        )
        .expect("parse");
        assert!(!config.scroll.smooth_enabled);
        assert_eq!(config.scroll.duration_ms, 1200);
        assert_eq!(config.loader.completion, CompletionPolicy::Deliver);
        assert!(config.overlay.enabled);
    }

    #[test]
    fn test_easing_kebab_names() {
        let config: AppConfig = toml::from_str(
            r#"
            [scroll]
            easing = "quad-in-out"
            "#,
        )
        .expect("parse");
        assert_eq!(config.scroll.easing, Easing::QuadInOut);
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).expect("serialize");
        let back: AppConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back.scroll.duration_ms, config.scroll.duration_ms);
        assert_eq!(back.ui.fps, config.ui.fps);
    }
}
