//! A single tooltip bubble bound to one anchor.

use bubbletip_core::{AnimationController, AnimationState, BubbleFrame, BubbleGeometry};

use crate::config::ToolTipConfig;
use crate::host::{ElementHandle, NodeId};

/// Caller-facing handle of a bubble. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleHandle(pub u64);

impl BubbleHandle {
    /// The visual node backing this bubble in the host tree.
    #[must_use]
    pub const fn node(self) -> NodeId {
        NodeId(self.0)
    }
}

/// One bubble instance owned by the overlay.
#[derive(Debug)]
pub struct Bubble {
    handle: BubbleHandle,
    anchor: ElementHandle,
    config: ToolTipConfig,
    pub(crate) controller: AnimationController,
    pub(crate) pointer_width: f32,
    pub(crate) clicked: bool,
}

impl Bubble {
    pub(crate) fn new(
        handle: BubbleHandle,
        anchor: ElementHandle,
        config: ToolTipConfig,
        controller: AnimationController,
    ) -> Self {
        Self {
            handle,
            anchor,
            config,
            controller,
            pointer_width: 0.0,
            clicked: false,
        }
    }

    /// Handle of this bubble.
    #[must_use]
    pub fn handle(&self) -> BubbleHandle {
        self.handle
    }

    /// Element the bubble points at.
    #[must_use]
    pub fn anchor(&self) -> ElementHandle {
        self.anchor
    }

    /// Configuration the bubble was shown with.
    #[must_use]
    pub fn config(&self) -> &ToolTipConfig {
        &self.config
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.controller.state()
    }

    /// Resolved geometry, once measured.
    #[must_use]
    pub fn geometry(&self) -> Option<&BubbleGeometry> {
        self.controller.geometry()
    }

    /// Current interpolated frame.
    #[must_use]
    pub fn frame(&self) -> BubbleFrame {
        self.controller.frame()
    }

    /// Pointer width used for the pointer offset.
    #[must_use]
    pub fn pointer_width(&self) -> f32 {
        self.pointer_width
    }
}
