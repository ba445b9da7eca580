//! Tooltip overlay: per-anchor bubble lifecycle and event routing.
//!
//! ```text
//! show() ──attach──▶ MEASURING ──on_measured()──▶ resolve ──▶ appear
//!                                                               │
//! tap() / remove() ──▶ disappear ──tick()…──▶ REMOVED ──detach──┘
//! ```
//!
//! The overlay is driven entirely by the host: `on_measured` after the
//! layout pass, `tick` from the frame scheduler, `tap` from input. Nothing
//! blocks and nothing runs on another thread.

use std::collections::{BTreeMap, HashMap};

use bubbletip_core::{
    resolve, AnchorGeometry, AnimationController, AnimationState, Progress, Settled,
};

use crate::anchor::{AnchorQuery, AnchorResolver, AnchorRole};
use crate::bubble::{Bubble, BubbleHandle};
use crate::config::ToolTipConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::host::{BubbleMeasurement, ElementHandle, Host, NodeId};
use crate::render::{render_bubble, RenderCommand};
use crate::settings::OverlaySettings;

/// Receives the handle of a tapped bubble, before it is detached.
pub type ClickListener = Box<dyn FnMut(BubbleHandle)>;

/// Receives `Visible` and `Removed` lifecycle notifications.
pub type LifecycleListener = Box<dyn FnMut(BubbleHandle, AnimationState)>;

/// Owns every live bubble of one overlay container.
pub struct Overlay<H: Host> {
    host: H,
    container: ElementHandle,
    settings: OverlaySettings,
    bubbles: BTreeMap<BubbleHandle, Bubble>,
    by_anchor: HashMap<ElementHandle, BubbleHandle>,
    next_handle: u64,
    click_listener: Option<ClickListener>,
    lifecycle_listener: Option<LifecycleListener>,
}

impl<H: Host> Overlay<H> {
    /// Creates an overlay hosted by `container`.
    #[must_use]
    pub fn new(host: H, container: ElementHandle, settings: OverlaySettings) -> Self {
        Self {
            host,
            container,
            settings,
            bubbles: BTreeMap::new(),
            by_anchor: HashMap::new(),
            next_handle: 1,
            click_listener: None,
            lifecycle_listener: None,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Registers the click listener, returning the one it replaces.
    pub fn set_click_listener(
        &mut self,
        listener: impl FnMut(BubbleHandle) + 'static,
    ) -> Option<ClickListener> {
        self.click_listener.replace(Box::new(listener))
    }

    /// Removes the click listener.
    pub fn clear_click_listener(&mut self) -> Option<ClickListener> {
        self.click_listener.take()
    }

    /// Registers the lifecycle listener, returning the one it replaces.
    pub fn set_lifecycle_listener(
        &mut self,
        listener: impl FnMut(BubbleHandle, AnimationState) + 'static,
    ) -> Option<LifecycleListener> {
        self.lifecycle_listener.replace(Box::new(listener))
    }

    /// Returns a live bubble.
    #[must_use]
    pub fn bubble(&self, handle: BubbleHandle) -> Option<&Bubble> {
        self.bubbles.get(&handle)
    }

    /// Iterates over live bubbles in creation order.
    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> + '_ {
        self.bubbles.values()
    }

    /// Returns the live bubble bound to an anchor.
    #[must_use]
    pub fn bubble_for_anchor(&self, anchor: ElementHandle) -> Option<BubbleHandle> {
        self.by_anchor.get(&anchor).copied()
    }

    /// Number of live bubbles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Returns true if no bubble is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Shows a tooltip for an anchor element.
    ///
    /// Once the host accepts the new node, a live bubble already bound to
    /// the same anchor is removed at once, without animation, so an anchor
    /// never has two live bubbles.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidHostState`] if the overlay container is not in
    /// the tree or the host refuses the node. No bubble is registered then,
    /// and a bubble already on the anchor stays live.
    pub fn show(
        &mut self,
        config: ToolTipConfig,
        anchor: ElementHandle,
    ) -> OverlayResult<BubbleHandle> {
        if self.host.screen_rect(self.container).is_none() {
            tracing::warn!(container = self.container.0, "overlay container is not in the tree");
            return Err(OverlayError::InvalidHostState(format!(
                "overlay container {} is not in the tree",
                self.container.0
            )));
        }

        let handle = BubbleHandle(self.next_handle);
        self.next_handle += 1;

        let controller = AnimationController::new(config.animation_style(), self.settings.timing());
        let mut bubble = Bubble::new(handle, anchor, config, controller);

        if let Err(err) = self.host.attach(handle.node(), bubble.config().content()) {
            tracing::warn!(bubble = handle.0, %err, "host refused bubble");
            return Err(err);
        }
        bubble.controller.begin_measuring();

        if let Some(previous) = self.by_anchor.get(&anchor).copied() {
            self.replace(previous);
        }

        tracing::info!(bubble = handle.0, anchor = anchor.0, "tooltip shown");
        self.bubbles.insert(handle, bubble);
        self.by_anchor.insert(anchor, handle);
        Ok(handle)
    }

    /// Shows a tooltip for a special anchor located by the host.
    ///
    /// # Errors
    ///
    /// [`OverlayError::AnchorNotFound`] if the host cannot locate the
    /// anchor, otherwise as [`Self::show`].
    pub fn show_for_query(
        &mut self,
        config: ToolTipConfig,
        query: AnchorQuery,
    ) -> OverlayResult<BubbleHandle>
    where
        H: AnchorResolver,
    {
        let Some(anchor) = self.host.resolve_anchor(&query) else {
            tracing::warn!(%query, "anchor not found");
            return Err(OverlayError::AnchorNotFound { query });
        };
        self.show(config, anchor)
    }

    /// Shows a tooltip for the element with a platform identifier.
    ///
    /// # Errors
    ///
    /// As [`Self::show_for_query`].
    pub fn show_for_id(&mut self, config: ToolTipConfig, id: u32) -> OverlayResult<BubbleHandle>
    where
        H: AnchorResolver,
    {
        self.show_for_query(config, AnchorQuery::Id(id))
    }

    /// Shows a tooltip for the toolbar home button.
    ///
    /// # Errors
    ///
    /// As [`Self::show_for_query`].
    pub fn show_for_home(&mut self, config: ToolTipConfig) -> OverlayResult<BubbleHandle>
    where
        H: AnchorResolver,
    {
        self.show_for_query(config, AnchorQuery::Role(AnchorRole::Home))
    }

    /// Shows a tooltip for the toolbar title.
    ///
    /// # Errors
    ///
    /// As [`Self::show_for_query`].
    pub fn show_for_title(&mut self, config: ToolTipConfig) -> OverlayResult<BubbleHandle>
    where
        H: AnchorResolver,
    {
        self.show_for_query(config, AnchorQuery::Role(AnchorRole::Title))
    }

    /// Shows a tooltip for the overflow menu button.
    ///
    /// # Errors
    ///
    /// As [`Self::show_for_query`].
    pub fn show_for_overflow_menu(&mut self, config: ToolTipConfig) -> OverlayResult<BubbleHandle>
    where
        H: AnchorResolver,
    {
        self.show_for_query(config, AnchorQuery::Role(AnchorRole::OverflowMenu))
    }

    /// Host callback: a bubble node finished its layout pass.
    ///
    /// Resolves the geometry and starts the appear transition. Only the
    /// first report per bubble counts.
    pub fn on_measured(&mut self, node: NodeId, measurement: BubbleMeasurement) {
        let handle = BubbleHandle(node.0);
        let Some(bubble) = self.bubbles.get(&handle) else {
            return;
        };
        if bubble.state() != AnimationState::Measuring {
            tracing::debug!(bubble = handle.0, state = ?bubble.state(), "measurement ignored");
            return;
        }

        let pointer_width = if measurement.pointer_width > 0.0 {
            measurement.pointer_width
        } else {
            self.settings.pointer.width
        };

        let Some(anchor) = self.anchor_geometry(bubble.anchor()) else {
            tracing::warn!(bubble = handle.0, "anchor left the tree before measurement");
            self.dismiss(handle);
            return;
        };
        let geometry = resolve(&anchor, measurement.width, measurement.height, pointer_width);
        tracing::debug!(
            bubble = handle.0,
            x = geometry.x,
            y = geometry.y,
            side = ?geometry.pointer_side,
            "geometry resolved"
        );

        let Some(bubble) = self.bubbles.get_mut(&handle) else {
            return;
        };
        bubble.pointer_width = pointer_width;
        bubble.controller.position(anchor, geometry);
        let progress = bubble.controller.appear();
        self.apply(handle, progress);
    }

    /// Re-runs placement for a live bubble after its anchor moved or the
    /// viewport changed. Returns false if there was nothing to move.
    pub fn reposition(&mut self, handle: BubbleHandle) -> bool {
        let Some(bubble) = self.bubbles.get(&handle) else {
            return false;
        };
        let Some(current) = bubble.geometry().copied() else {
            return false;
        };
        let Some(anchor) = self.anchor_geometry(bubble.anchor()) else {
            return false;
        };

        let pointer_width = bubble.pointer_width();
        let geometry = resolve(&anchor, current.width, current.height, pointer_width);
        self.bubbles
            .get_mut(&handle)
            .is_some_and(|bubble| bubble.controller.reposition(anchor, geometry))
    }

    /// Dismisses a bubble. No-op if it is already on its way out or gone.
    pub fn remove(&mut self, handle: BubbleHandle) {
        self.dismiss(handle);
    }

    /// Input callback: the bubble was tapped.
    ///
    /// Dismisses like [`Self::remove`], then notifies the click listener
    /// before the bubble can be detached. Fires at most once per bubble.
    pub fn tap(&mut self, handle: BubbleHandle) {
        let Some(bubble) = self.bubbles.get_mut(&handle) else {
            return;
        };
        if bubble.clicked || !bubble.state().accepts_dismissal() {
            return;
        }
        bubble.clicked = true;

        let progress = bubble.controller.disappear();
        if let Some(listener) = self.click_listener.as_mut() {
            listener(handle);
        }
        self.apply(handle, progress);
    }

    /// Advances every transition in flight by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let handles: Vec<BubbleHandle> = self.bubbles.keys().copied().collect();
        for handle in handles {
            let Some(bubble) = self.bubbles.get_mut(&handle) else {
                continue;
            };
            let progress = bubble.controller.advance(dt);
            self.apply(handle, progress);
        }
    }

    /// Generates render commands for every visible bubble.
    pub fn render(&self, commands: &mut Vec<RenderCommand>) {
        for bubble in self.bubbles.values() {
            render_bubble(bubble, &self.settings, commands);
        }
    }

    fn anchor_geometry(&self, anchor: ElementHandle) -> Option<AnchorGeometry> {
        let anchor = self.host.screen_rect(anchor)?;
        let overlay = self.host.screen_rect(self.container)?;
        Some(AnchorGeometry::from_screen(anchor, overlay, self.host.viewport_rect()))
    }

    fn dismiss(&mut self, handle: BubbleHandle) {
        let Some(bubble) = self.bubbles.get_mut(&handle) else {
            return;
        };
        let progress = bubble.controller.disappear();
        self.apply(handle, progress);
    }

    fn replace(&mut self, previous: BubbleHandle) {
        let Some(bubble) = self.bubbles.get_mut(&previous) else {
            return;
        };
        if bubble.controller.abort() {
            tracing::debug!(bubble = previous.0, "replaced by a new bubble on the same anchor");
            self.finish(previous);
        }
    }

    fn apply(&mut self, handle: BubbleHandle, progress: Progress) {
        let Progress::Settled(Settled { state, .. }) = progress else {
            return;
        };
        match state {
            AnimationState::Visible => self.notify(handle, AnimationState::Visible),
            AnimationState::Removed => self.finish(handle),
            _ => {}
        }
    }

    fn finish(&mut self, handle: BubbleHandle) {
        let Some(bubble) = self.bubbles.remove(&handle) else {
            return;
        };
        if self.by_anchor.get(&bubble.anchor()) == Some(&handle) {
            self.by_anchor.remove(&bubble.anchor());
        }
        self.host.detach(handle.node());
        tracing::info!(bubble = handle.0, "tooltip removed");
        self.notify(handle, AnimationState::Removed);
    }

    fn notify(&mut self, handle: BubbleHandle, state: AnimationState) {
        if let Some(listener) = self.lifecycle_listener.as_mut() {
            listener(handle, state);
        }
    }
}
