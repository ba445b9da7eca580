//! The host collaborator.
//!
//! The host owns the view tree. It answers geometry queries, inserts and
//! removes the bubble's node, and reports the node's size after its
//! layout pass by calling [`Overlay::on_measured`](crate::overlay::Overlay::on_measured).

use bubbletip_core::Rect;

use crate::config::Content;
use crate::error::OverlayResult;

/// Handle to an element in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// Handle to a bubble's visual node in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Size reported by the host once a bubble node was laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BubbleMeasurement {
    /// Natural content width.
    pub width: f32,
    /// Full bubble height.
    pub height: f32,
    /// Larger of the two pointer widths; 0 if the host does not know it.
    pub pointer_width: f32,
}

/// View-tree operations the overlay relies on.
///
/// There is no animate/cancel pair here: transitions run inside the
/// overlay and the host's frame scheduler drives them through
/// [`Overlay::tick`](crate::overlay::Overlay::tick). The post-layout
/// callback is [`Overlay::on_measured`](crate::overlay::Overlay::on_measured).
pub trait Host {
    /// Screen rect of an element, `None` if it is not in the tree.
    fn screen_rect(&self, element: ElementHandle) -> Option<Rect>;

    /// Visible display area in screen coordinates.
    fn viewport_rect(&self) -> Rect;

    /// Inserts a bubble node. The host must later report its size.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidHostState`](crate::error::OverlayError::InvalidHostState)
    /// if the tree cannot take the node.
    fn attach(&mut self, node: NodeId, content: &Content) -> OverlayResult<()>;

    /// Removes a bubble node.
    fn detach(&mut self, node: NodeId);
}
