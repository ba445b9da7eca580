//! Overlay-wide settings, loaded once at startup.
//!
//! ```toml
//! [animation]
//! duration_ms = 300
//! easing = "accelerate_decelerate"
//!
//! [pointer]
//! visibility = "hide"
//! width = 16.0
//! height = 8.0
//!
//! [chrome]
//! default_background = 0xFFFFFFFF
//! default_text = 0x000000FF
//! corner_radius = 4.0
//! shadow_offset = 2.0
//! padding = 8.0
//! ```

use std::path::Path;

use bubbletip_core::{Easing, TransitionTiming};
use serde::Deserialize;

use crate::error::{OverlayError, OverlayResult};
use crate::style::Color;

/// How the pointer on the unused side is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerVisibility {
    /// Left out of the render list.
    #[default]
    Hide,
    /// Drawn with zero alpha, so it keeps its layout slot.
    Transparent,
}

/// Transition timing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Duration of every appear/disappear transition.
    pub duration_ms: u32,
    /// Easing shared by all tracks.
    pub easing: Easing,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::AccelerateDecelerate,
        }
    }
}

/// Pointer drawing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerSettings {
    /// Inactive pointer strategy.
    pub visibility: PointerVisibility,
    /// Width used when the host measurement reports none.
    pub width: f32,
    /// Pointer height, part of the measured bubble height.
    pub height: f32,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            visibility: PointerVisibility::Hide,
            width: 0.0,
            height: 8.0,
        }
    }
}

/// Chrome defaults used when a config leaves a color unset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChromeSettings {
    /// Background as 0xRRGGBBAA.
    pub default_background: u32,
    /// Text color as 0xRRGGBBAA.
    pub default_text: u32,
    /// Corner radius of the chrome.
    pub corner_radius: f32,
    /// Vertical offset of the shadow below the chrome.
    pub shadow_offset: f32,
    /// Inset of the content inside the chrome.
    pub padding: f32,
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            default_background: 0xFFFF_FFFF,
            default_text: 0x0000_00FF,
            corner_radius: 4.0,
            shadow_offset: 2.0,
            padding: 8.0,
        }
    }
}

impl ChromeSettings {
    /// Background color.
    #[must_use]
    pub fn background(&self) -> Color {
        Color::hex(self.default_background)
    }

    /// Text color.
    #[must_use]
    pub fn text(&self) -> Color {
        Color::hex(self.default_text)
    }
}

/// All overlay settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Transition timing.
    pub animation: AnimationSettings,
    /// Pointer drawing.
    pub pointer: PointerSettings,
    /// Chrome defaults.
    pub chrome: ChromeSettings,
}

impl OverlaySettings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidSettings`] on syntax errors, unknown enum
    /// values, or negative / non-finite sizes.
    pub fn from_toml_str(text: &str) -> OverlayResult<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| OverlayError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidSettings`] if the file cannot be read or
    /// fails [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| OverlayError::InvalidSettings(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Transition timing for the animation controller.
    #[must_use]
    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            duration: self.animation.duration_ms as f32 / 1000.0,
            easing: self.animation.easing,
        }
    }

    fn validate(&self) -> OverlayResult<()> {
        let sizes = [
            ("pointer.width", self.pointer.width),
            ("pointer.height", self.pointer.height),
            ("chrome.corner_radius", self.chrome.corner_radius),
            ("chrome.shadow_offset", self.chrome.shadow_offset),
            ("chrome.padding", self.chrome.padding),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(OverlayError::InvalidSettings(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
