//! Tooltip description handed to the overlay.
//!
//! Built with chained `with_*` calls; the overlay takes it by value, so it
//! cannot change once a bubble is shown.

use bubbletip_core::AnimationStyle;

use crate::style::Color;

/// Opaque handle to caller-provided content rendered inside the bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHandle(pub u64);

/// Opaque handle to a resolved typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// What the bubble shows. Exactly one kind is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A plain text run.
    Text(String),
    /// A custom content node owned by the caller.
    Custom(ContentHandle),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Tooltip configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolTipConfig {
    content: Content,
    font: Option<FontHandle>,
    text_color: Option<Color>,
    background_color: Option<Color>,
    shadow_enabled: bool,
    animation_style: AnimationStyle,
}

impl Default for ToolTipConfig {
    fn default() -> Self {
        Self {
            content: Content::default(),
            font: None,
            text_color: None,
            background_color: None,
            shadow_enabled: true,
            animation_style: AnimationStyle::FromAnchor,
        }
    }
}

impl ToolTipConfig {
    /// Creates a config with empty text, shadow on and `FromAnchor` style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a text run, replacing any custom content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    /// Sets the typeface of the text run.
    #[must_use]
    pub fn with_font(mut self, font: FontHandle) -> Self {
        self.font = Some(font);
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Shows a custom content node, replacing any text.
    #[must_use]
    pub fn with_content(mut self, content: ContentHandle) -> Self {
        self.content = Content::Custom(content);
        self
    }

    /// Tints the chrome and both pointers.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Draws a shadow below the bubble.
    #[must_use]
    pub fn with_shadow(mut self) -> Self {
        self.shadow_enabled = true;
        self
    }

    /// Draws no shadow.
    #[must_use]
    pub fn without_shadow(mut self) -> Self {
        self.shadow_enabled = false;
        self
    }

    /// Sets how the bubble animates in and out.
    #[must_use]
    pub fn with_animation_style(mut self, style: AnimationStyle) -> Self {
        self.animation_style = style;
        self
    }

    /// Returns the active content.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Returns the text, if text is the active content.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Custom(_) => None,
        }
    }

    /// Returns the custom content, if it is the active content.
    #[must_use]
    pub fn custom_content(&self) -> Option<ContentHandle> {
        match self.content {
            Content::Custom(handle) => Some(handle),
            Content::Text(_) => None,
        }
    }

    /// Typeface, `None` when never set.
    #[must_use]
    pub fn font(&self) -> Option<FontHandle> {
        self.font
    }

    /// Text color, `None` when never set.
    #[must_use]
    pub fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// Background tint, `None` when never set.
    #[must_use]
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Whether a shadow is drawn.
    #[must_use]
    pub fn shadow_enabled(&self) -> bool {
        self.shadow_enabled
    }

    /// Animation style.
    #[must_use]
    pub fn animation_style(&self) -> AnimationStyle {
        self.animation_style
    }
}
