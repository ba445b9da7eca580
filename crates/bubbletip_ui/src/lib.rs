//! # Bubbletip UI
//!
//! Anchored tooltip overlay built on the `bubbletip_core` engine:
//! - One live bubble per anchor
//! - Pointer on whichever side has room
//! - Interruptible appear/disappear, detached exactly once
//!
//! ## Flow
//!
//! ```text
//! ToolTipConfig ─▶ Overlay::show ─▶ Host::attach
//!                                        │ layout pass
//!                  Overlay::on_measured ◀┘
//!                        │ resolve + appear
//!                  Overlay::tick … VISIBLE
//!                        │ tap / remove
//!                  Overlay::tick … REMOVED ─▶ Host::detach
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use bubbletip_ui::{ElementHandle, HeadlessHost, Overlay, OverlaySettings, ToolTipConfig};
//!
//! let mut overlay = Overlay::new(host, container, OverlaySettings::default());
//! let bubble = overlay.show(ToolTipConfig::new().with_text("Tap to close"), anchor)?;
//! for (node, size) in overlay.host_mut().layout_pass() {
//!     overlay.on_measured(node, size);
//! }
//! overlay.tick(1.0 / 60.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod anchor;
pub mod bubble;
pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod overlay;
pub mod render;
pub mod settings;
pub mod style;

pub use anchor::{AnchorQuery, AnchorResolver, AnchorRole};
pub use bubble::{Bubble, BubbleHandle};
pub use config::{Content, ContentHandle, FontHandle, ToolTipConfig};
pub use error::{OverlayError, OverlayResult};
pub use headless::{HeadlessHost, HostCall};
pub use host::{BubbleMeasurement, ElementHandle, Host, NodeId};
pub use overlay::{ClickListener, LifecycleListener, Overlay};
pub use render::{render_bubble, tessellate, vertex_bytes, BubbleVertex, RenderCommand};
pub use settings::{
    AnimationSettings, ChromeSettings, OverlaySettings, PointerSettings, PointerVisibility,
};
pub use style::Color;

pub use bubbletip_core::{
    AnimationState, AnimationStyle, BubbleFrame, BubbleGeometry, PointerSide, Rect,
};
