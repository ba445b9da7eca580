//! # Bubbletip Core
//!
//! Geometry and animation engine for tooltip bubbles anchored to an
//! element inside a clipped viewport.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      BUBBLE PIPELINE                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Anchor rect → resolve() → BubbleGeometry → Controller   │
//! │       ↓            ↓              ↓             ↓        │
//! │  overlay space  clamp + side   pointer offset  frames    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here can fail: degenerate anchors still produce a valid
//! placement, and every dismissal request is either applied or ignored.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod animation;
pub mod controller;
pub mod geometry;

pub use animation::{
    AnimationStyle, BubbleFrame, Easing, Transition, TransitionId, TransitionTiming,
};
pub use controller::{AnimationController, AnimationState, Progress, Settled};
pub use geometry::{pointer_offset_x, resolve, AnchorGeometry, BubbleGeometry, PointerSide, Rect};
