//! Bubble lifecycle state machine.
//!
//! ```text
//! CREATED → MEASURING → POSITIONED → APPEARING → VISIBLE → DISAPPEARING → REMOVED
//!                           └────────────┴───────────┴──────────↗
//! ```
//!
//! States only ever move forward. A dismissal from `POSITIONED`,
//! `APPEARING` or `VISIBLE` enters `DISAPPEARING`; a dismissal before the
//! bubble was measured has nothing to animate and settles on `REMOVED`
//! directly.

use crate::animation::{AnimationStyle, BubbleFrame, Transition, TransitionId, TransitionTiming};
use crate::geometry::{AnchorGeometry, BubbleGeometry};

/// Lifecycle state of one bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationState {
    /// Built, not yet attached.
    Created,
    /// Attached, waiting for the host to report the rendered size.
    Measuring,
    /// Geometry resolved.
    Positioned,
    /// Appear transition in flight.
    Appearing,
    /// Fully shown.
    Visible,
    /// Disappear transition in flight.
    Disappearing,
    /// Detached. Terminal.
    Removed,
}

impl AnimationState {
    /// Returns true for `Removed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Removed)
    }

    /// Returns true if a dismissal request would change anything.
    #[must_use]
    pub const fn accepts_dismissal(self) -> bool {
        !matches!(self, Self::Disappearing | Self::Removed)
    }
}

/// A transition that reached its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// Transition that completed.
    pub transition: TransitionId,
    /// State entered on completion: `Visible` or `Removed`.
    pub state: AnimationState,
}

/// Outcome of driving the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Progress {
    /// Nothing in flight, or the request was a no-op.
    Idle,
    /// A transition is in flight.
    Running(TransitionId),
    /// A transition completed during this call. Reported once per id.
    Settled(Settled),
}

/// Drives one bubble through its lifecycle.
#[derive(Debug, Clone)]
pub struct AnimationController {
    style: AnimationStyle,
    timing: TransitionTiming,
    state: AnimationState,
    anchor: Option<AnchorGeometry>,
    geometry: Option<BubbleGeometry>,
    frame: BubbleFrame,
    transition: Option<Transition>,
    next_transition: u64,
}

impl AnimationController {
    /// Creates a controller in `Created`.
    #[must_use]
    pub fn new(style: AnimationStyle, timing: TransitionTiming) -> Self {
        Self {
            style,
            timing,
            state: AnimationState::Created,
            anchor: None,
            geometry: None,
            frame: BubbleFrame::default(),
            transition: None,
            next_transition: 1,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Returns the animation style.
    #[must_use]
    pub fn style(&self) -> AnimationStyle {
        self.style
    }

    /// Returns the resolved geometry, once positioned.
    #[must_use]
    pub fn geometry(&self) -> Option<&BubbleGeometry> {
        self.geometry.as_ref()
    }

    /// Returns the current interpolated frame.
    #[must_use]
    pub fn frame(&self) -> BubbleFrame {
        self.frame
    }

    /// Returns the id of the transition in flight, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<TransitionId> {
        self.transition.as_ref().map(Transition::id)
    }

    /// `Created → Measuring`. Returns false from any other state.
    pub fn begin_measuring(&mut self) -> bool {
        if self.state != AnimationState::Created {
            return false;
        }
        self.set_state(AnimationState::Measuring);
        true
    }

    /// `Measuring → Positioned`, storing the resolved geometry.
    ///
    /// The frame is parked at the appear origin so nothing is visible
    /// before `appear` runs. Returns false from any other state.
    pub fn position(&mut self, anchor: AnchorGeometry, geometry: BubbleGeometry) -> bool {
        if self.state != AnimationState::Measuring {
            return false;
        }
        self.anchor = Some(anchor);
        self.geometry = Some(geometry);
        self.frame = self.appear_origin(&anchor, &geometry);
        self.set_state(AnimationState::Positioned);
        true
    }

    /// Starts the appear transition from `Positioned`.
    ///
    /// With [`AnimationStyle::None`] the bubble jumps to its final frame
    /// and settles on `Visible` within this call.
    pub fn appear(&mut self) -> Progress {
        if self.state != AnimationState::Positioned {
            return Progress::Idle;
        }
        let (Some(anchor), Some(geometry)) = (self.anchor, self.geometry) else {
            return Progress::Idle;
        };

        self.set_state(AnimationState::Appearing);
        let id = self.allocate_id();
        let target = BubbleFrame::shown(geometry.x, geometry.y);

        if self.style == AnimationStyle::None {
            self.frame = target;
            self.set_state(AnimationState::Visible);
            return Progress::Settled(Settled {
                transition: id,
                state: AnimationState::Visible,
            });
        }

        let origin = self.appear_origin(&anchor, &geometry);
        self.frame = origin;
        self.transition = Some(Transition::new(id, origin, target, self.timing));
        Progress::Running(id)
    }

    /// Starts the disappear transition.
    ///
    /// An appear in flight is dropped and never settles; the disappear
    /// starts from the current interpolated frame. No-op while already
    /// disappearing or removed.
    pub fn disappear(&mut self) -> Progress {
        match self.state {
            AnimationState::Disappearing | AnimationState::Removed => return Progress::Idle,
            AnimationState::Created | AnimationState::Measuring => {
                let id = self.allocate_id();
                self.set_state(AnimationState::Removed);
                return Progress::Settled(Settled {
                    transition: id,
                    state: AnimationState::Removed,
                });
            }
            AnimationState::Positioned | AnimationState::Appearing | AnimationState::Visible => {}
        }

        if let Some(cancelled) = self.transition.take() {
            tracing::debug!(transition = cancelled.id().0, "appear cancelled");
        }

        self.set_state(AnimationState::Disappearing);
        let id = self.allocate_id();
        let from = self.frame;

        let to = match (self.style, self.anchor, self.geometry) {
            (AnimationStyle::FromAnchor, Some(anchor), Some(geometry)) => {
                let (x, y) = anchor.centered_origin(geometry.width, geometry.height);
                BubbleFrame::collapsed(x, y)
            }
            (AnimationStyle::FromTop, ..) => BubbleFrame::collapsed(from.x, 0.0),
            _ => BubbleFrame::collapsed(from.x, from.y),
        };

        if self.style == AnimationStyle::None {
            self.frame = to;
            self.set_state(AnimationState::Removed);
            return Progress::Settled(Settled {
                transition: id,
                state: AnimationState::Removed,
            });
        }

        self.transition = Some(Transition::new(id, from, to, self.timing));
        Progress::Running(id)
    }

    /// Advances the transition in flight by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Progress {
        let Some(transition) = self.transition.as_mut() else {
            return Progress::Idle;
        };

        self.frame = transition.advance(dt);
        let id = transition.id();
        tracing::trace!(
            transition = id.0,
            x = self.frame.x,
            y = self.frame.y,
            scale = self.frame.scale,
            opacity = self.frame.opacity,
            "frame"
        );

        if !transition.is_complete() {
            return Progress::Running(id);
        }

        self.transition = None;
        let next = match self.state {
            AnimationState::Appearing => AnimationState::Visible,
            _ => AnimationState::Removed,
        };
        self.set_state(next);
        Progress::Settled(Settled {
            transition: id,
            state: next,
        })
    }

    /// Replaces the resolved geometry of a live bubble.
    ///
    /// A visible bubble snaps to the new position. An appear in flight is
    /// retargeted from its current frame under the same transition id, so
    /// it still settles once. Returns false when there is nothing to move.
    pub fn reposition(&mut self, anchor: AnchorGeometry, geometry: BubbleGeometry) -> bool {
        match self.state {
            AnimationState::Positioned => {
                self.frame = self.appear_origin(&anchor, &geometry);
            }
            AnimationState::Appearing => {
                if let Some(transition) = self.transition.take() {
                    self.transition = Some(Transition::new(
                        transition.id(),
                        self.frame,
                        BubbleFrame::shown(geometry.x, geometry.y),
                        self.timing,
                    ));
                }
            }
            AnimationState::Visible => {
                self.frame = BubbleFrame::shown(geometry.x, geometry.y);
            }
            _ => return false,
        }
        self.anchor = Some(anchor);
        self.geometry = Some(geometry);
        true
    }

    /// Drops any transition and jumps to `Removed`.
    ///
    /// Used when a bubble is replaced before it could animate out.
    /// Returns false if already removed.
    pub fn abort(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.transition = None;
        self.frame.opacity = 0.0;
        self.set_state(AnimationState::Removed);
        true
    }

    fn appear_origin(&self, anchor: &AnchorGeometry, geometry: &BubbleGeometry) -> BubbleFrame {
        match self.style {
            AnimationStyle::FromAnchor => {
                let (x, y) = anchor.centered_origin(geometry.width, geometry.height);
                BubbleFrame::collapsed(x, y)
            }
            AnimationStyle::FromTop => BubbleFrame::collapsed(geometry.x, 0.0),
            AnimationStyle::None => BubbleFrame::collapsed(geometry.x, geometry.y),
        }
    }

    fn allocate_id(&mut self) -> TransitionId {
        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        id
    }

    fn set_state(&mut self, next: AnimationState) {
        debug_assert!(next > self.state, "{:?} -> {next:?}", self.state);
        tracing::debug!(from = ?self.state, to = ?next, "bubble state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::geometry::{resolve, Rect};

    fn positioned(style: AnimationStyle) -> AnimationController {
        let anchor = AnchorGeometry {
            anchor: Rect::new(100.0, 200.0, 50.0, 30.0),
            viewport: Rect::new(0.0, 0.0, 400.0, 800.0),
        };
        let geometry = resolve(&anchor, 120.0, 60.0, 0.0);
        let timing = TransitionTiming {
            duration: 0.3,
            easing: Easing::Linear,
        };

        let mut controller = AnimationController::new(style, timing);
        assert!(controller.begin_measuring());
        assert!(controller.position(anchor, geometry));
        controller
    }

    fn run_to_end(controller: &mut AnimationController) -> Vec<Settled> {
        let mut settled = Vec::new();
        for _ in 0..100 {
            if let Progress::Settled(s) = controller.advance(0.016) {
                settled.push(s);
            }
        }
        settled
    }

    #[test]
    fn test_from_anchor_appear_starts_at_anchor_center() {
        let mut controller = positioned(AnimationStyle::FromAnchor);
        let Progress::Running(_) = controller.appear() else {
            panic!("appear should run");
        };

        // anchor center (125, 215) minus half the bubble
        assert_eq!(controller.frame(), BubbleFrame::collapsed(65.0, 185.0));

        let settled = run_to_end(&mut controller);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].state, AnimationState::Visible);
        assert_eq!(controller.frame(), BubbleFrame::shown(65.0, 140.0));
    }

    #[test]
    fn test_from_top_moves_only_y() {
        let mut controller = positioned(AnimationStyle::FromTop);
        let _ = controller.appear();
        assert_eq!(controller.frame(), BubbleFrame::collapsed(65.0, 0.0));

        let _ = controller.advance(0.15);
        assert_eq!(controller.frame().x, 65.0);
        assert!(controller.frame().y > 0.0 && controller.frame().y < 140.0);

        run_to_end(&mut controller);
        let _ = controller.disappear();
        run_to_end(&mut controller);
        assert_eq!(controller.state(), AnimationState::Removed);
        assert_eq!(controller.frame(), BubbleFrame::collapsed(65.0, 0.0));
    }

    #[test]
    fn test_none_style_settles_without_frames() {
        let mut controller = positioned(AnimationStyle::None);

        let Progress::Settled(shown) = controller.appear() else {
            panic!("none style should settle immediately");
        };
        assert_eq!(shown.state, AnimationState::Visible);
        assert_eq!(controller.advance(0.016), Progress::Idle);

        let Progress::Settled(gone) = controller.disappear() else {
            panic!("none style should settle immediately");
        };
        assert_eq!(gone.state, AnimationState::Removed);
        assert_ne!(shown.transition, gone.transition);
    }

    #[test]
    fn test_disappear_during_appear_continues_from_current_frame() {
        let mut controller = positioned(AnimationStyle::FromAnchor);
        let Progress::Running(appear_id) = controller.appear() else {
            panic!("appear should run");
        };

        let _ = controller.advance(0.1);
        let mid = controller.frame();

        let Progress::Running(disappear_id) = controller.disappear() else {
            panic!("disappear should run");
        };
        assert_ne!(appear_id, disappear_id);
        assert_eq!(controller.frame(), mid);

        let _ = controller.advance(0.016);
        let step = controller.frame();
        assert!((step.x - mid.x).abs() < 5.0);
        assert!((step.y - mid.y).abs() < 5.0);

        let settled = run_to_end(&mut controller);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].transition, disappear_id);
        assert_eq!(settled[0].state, AnimationState::Removed);
    }

    #[test]
    fn test_disappear_is_idempotent() {
        let mut controller = positioned(AnimationStyle::FromAnchor);
        let _ = controller.appear();
        run_to_end(&mut controller);

        assert!(matches!(controller.disappear(), Progress::Running(_)));
        assert_eq!(controller.disappear(), Progress::Idle);
        run_to_end(&mut controller);
        assert_eq!(controller.disappear(), Progress::Idle);
    }

    #[test]
    fn test_dismiss_before_measure_removes() {
        let mut controller =
            AnimationController::new(AnimationStyle::FromAnchor, TransitionTiming::default());
        assert!(controller.begin_measuring());

        let Progress::Settled(settled) = controller.disappear() else {
            panic!("unmeasured bubble should be removed at once");
        };
        assert_eq!(settled.state, AnimationState::Removed);
        assert_eq!(controller.appear(), Progress::Idle);
    }

    #[test]
    fn test_from_anchor_disappear_ends_at_anchor_center() {
        let mut controller = positioned(AnimationStyle::FromAnchor);
        let _ = controller.appear();
        run_to_end(&mut controller);

        assert!(matches!(controller.disappear(), Progress::Running(_)));
        let settled = run_to_end(&mut controller);

        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].state, AnimationState::Removed);
        assert_eq!(controller.frame(), BubbleFrame::collapsed(65.0, 185.0));
    }

    #[test]
    fn test_reposition_during_appear_keeps_transition() {
        let mut controller = positioned(AnimationStyle::FromAnchor);
        let Progress::Running(appear_id) = controller.appear() else {
            panic!("appear should run");
        };
        let _ = controller.advance(0.1);
        let mid = controller.frame();

        let anchor = AnchorGeometry {
            anchor: Rect::new(200.0, 400.0, 50.0, 30.0),
            viewport: Rect::new(0.0, 0.0, 400.0, 800.0),
        };
        let geometry = resolve(&anchor, 120.0, 60.0, 0.0);
        assert!(controller.reposition(anchor, geometry));

        assert_eq!(controller.state(), AnimationState::Appearing);
        assert_eq!(controller.active_transition(), Some(appear_id));
        assert_eq!(controller.frame(), mid);

        let settled = run_to_end(&mut controller);
        assert_eq!(
            settled,
            vec![Settled {
                transition: appear_id,
                state: AnimationState::Visible
            }]
        );
        assert_eq!(controller.frame(), BubbleFrame::shown(165.0, 340.0));
    }

    #[test]
    fn test_reposition_visible_snaps() {
        let mut controller = positioned(AnimationStyle::FromAnchor);
        let _ = controller.appear();
        run_to_end(&mut controller);

        let anchor = AnchorGeometry {
            anchor: Rect::new(200.0, 400.0, 50.0, 30.0),
            viewport: Rect::new(0.0, 0.0, 400.0, 800.0),
        };
        let geometry = resolve(&anchor, 120.0, 60.0, 0.0);
        assert!(controller.reposition(anchor, geometry));
        assert_eq!(controller.frame(), BubbleFrame::shown(165.0, 340.0));
    }
}
