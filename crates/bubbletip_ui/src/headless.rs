//! In-memory host for tests and the demo binary.
//!
//! Keeps element rects in a table, records every attach/detach, and runs a
//! fake layout pass that sizes text with a monospace estimate.

use std::collections::HashMap;

use bubbletip_core::Rect;

use crate::anchor::{AnchorQuery, AnchorResolver};
use crate::config::Content;
use crate::error::{OverlayError, OverlayResult};
use crate::host::{BubbleMeasurement, ElementHandle, Host, NodeId};

/// A recorded host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    /// `attach(node)`.
    Attach(NodeId),
    /// `detach(node)`.
    Detach(NodeId),
}

/// Deterministic host backed by tables.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    elements: HashMap<ElementHandle, Rect>,
    anchors: HashMap<AnchorQuery, ElementHandle>,
    viewport: Rect,
    calls: Vec<HostCall>,
    pending_layout: Vec<(NodeId, BubbleMeasurement)>,
    refuse_attach: bool,
    char_width: f32,
    line_height: f32,
    padding: f32,
    pointer: (f32, f32),
    custom_size: (f32, f32),
}

impl HeadlessHost {
    /// Creates a host with an empty tree and the given viewport.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            elements: HashMap::new(),
            anchors: HashMap::new(),
            viewport,
            calls: Vec::new(),
            pending_layout: Vec::new(),
            refuse_attach: false,
            char_width: 8.0,
            line_height: 16.0,
            padding: 8.0,
            pointer: (16.0, 8.0),
            custom_size: (120.0, 48.0),
        }
    }

    /// Inserts or moves an element.
    pub fn set_element(&mut self, element: ElementHandle, rect: Rect) {
        self.elements.insert(element, rect);
    }

    /// Removes an element from the tree.
    pub fn remove_element(&mut self, element: ElementHandle) {
        self.elements.remove(&element);
    }

    /// Makes an element findable through a special-anchor query.
    pub fn register_anchor(&mut self, query: AnchorQuery, element: ElementHandle) {
        self.anchors.insert(query, element);
    }

    /// Changes the visible display area.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Makes subsequent `attach` calls fail.
    pub fn set_refuse_attach(&mut self, refuse: bool) {
        self.refuse_attach = refuse;
    }

    /// Size reported for custom content nodes.
    pub fn set_custom_content_size(&mut self, width: f32, height: f32) {
        self.custom_size = (width, height);
    }

    /// Every attach/detach in call order.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// How often `node` was attached.
    #[must_use]
    pub fn attach_count(&self, node: NodeId) -> usize {
        self.calls.iter().filter(|c| **c == HostCall::Attach(node)).count()
    }

    /// How often `node` was detached.
    #[must_use]
    pub fn detach_count(&self, node: NodeId) -> usize {
        self.calls.iter().filter(|c| **c == HostCall::Detach(node)).count()
    }

    /// Returns true if `node` is currently in the tree.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.attach_count(node) > self.detach_count(node)
    }

    /// Runs the layout pass for nodes attached since the last pass.
    ///
    /// The caller forwards each entry to
    /// [`Overlay::on_measured`](crate::overlay::Overlay::on_measured).
    pub fn layout_pass(&mut self) -> Vec<(NodeId, BubbleMeasurement)> {
        std::mem::take(&mut self.pending_layout)
    }

    fn measure(&self, content: &Content) -> BubbleMeasurement {
        let (pointer_width, pointer_height) = self.pointer;
        let (width, height) = match content {
            Content::Text(text) => (
                text.chars().count() as f32 * self.char_width + self.padding * 2.0,
                self.line_height + self.padding * 2.0,
            ),
            Content::Custom(_) => self.custom_size,
        };
        BubbleMeasurement {
            width,
            height: height + pointer_height,
            pointer_width,
        }
    }
}

impl Host for HeadlessHost {
    fn screen_rect(&self, element: ElementHandle) -> Option<Rect> {
        self.elements.get(&element).copied()
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    fn attach(&mut self, node: NodeId, content: &Content) -> OverlayResult<()> {
        if self.refuse_attach {
            return Err(OverlayError::InvalidHostState(format!(
                "tree not ready for node {}",
                node.0
            )));
        }
        self.calls.push(HostCall::Attach(node));
        let measurement = self.measure(content);
        self.pending_layout.push((node, measurement));
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        self.calls.push(HostCall::Detach(node));
        self.pending_layout.retain(|(pending, _)| *pending != node);
    }
}

impl AnchorResolver for HeadlessHost {
    fn resolve_anchor(&self, query: &AnchorQuery) -> Option<ElementHandle> {
        let element = self.anchors.get(query).copied()?;
        // A registered anchor that left the tree is a mismatch too.
        self.elements.contains_key(&element).then_some(element)
    }
}
