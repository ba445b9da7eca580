//! Bubble rendering.
//!
//! Turns a bubble's current frame into render commands: shadow, chrome,
//! pointer, content. Scale is applied around the bubble's center and
//! opacity multiplies every color.

use bubbletip_core::{AnimationState, BubbleFrame, BubbleGeometry, PointerSide, Rect};

use crate::bubble::Bubble;
use crate::config::{Content, ContentHandle, FontHandle};
use crate::settings::{OverlaySettings, PointerVisibility};
use crate::style::Color;

/// A render command for the host's renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Filled triangle.
    Triangle {
        /// Corners.
        points: [[f32; 2]; 3],
        /// Fill color.
        color: Color,
    },
    /// Text run.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
        /// Typeface, host default when `None`.
        font: Option<FontHandle>,
        /// Current bubble scale.
        scale: f32,
    },
    /// Caller-provided content node.
    Content {
        /// Content handle.
        handle: ContentHandle,
        /// Bounds.
        bounds: Rect,
        /// Current bubble opacity.
        opacity: f32,
    },
}

const SHADOW: Color = Color::rgba(0.0, 0.0, 0.0, 0.25);

/// Appends the render commands of one bubble.
///
/// Nothing is emitted before the bubble is positioned, after it is
/// removed, or while it is fully collapsed.
pub fn render_bubble(
    bubble: &Bubble,
    settings: &OverlaySettings,
    commands: &mut Vec<RenderCommand>,
) {
    if matches!(
        bubble.state(),
        AnimationState::Created | AnimationState::Measuring | AnimationState::Removed
    ) {
        return;
    }
    let Some(geometry) = bubble.geometry() else {
        return;
    };
    let frame = bubble.frame();
    if frame.scale <= 0.0 || frame.opacity <= 0.0 {
        return;
    }

    let config = bubble.config();
    let chrome = &settings.chrome;
    let background = match config.background_color() {
        Some(tint) => chrome.background().multiply(tint),
        None => chrome.background(),
    };
    let fade = |color: Color| color.with_alpha(color.a * frame.opacity);
    let place = Placement::new(frame, geometry);

    let pointer_height = settings.pointer.height.min(geometry.height);
    let body = match geometry.pointer_side {
        PointerSide::Up => Rect::new(
            0.0,
            pointer_height,
            geometry.width,
            geometry.height - pointer_height,
        ),
        PointerSide::Down => Rect::new(0.0, 0.0, geometry.width, geometry.height - pointer_height),
    };

    if config.shadow_enabled() {
        let shadow = Rect::new(body.x, body.y + chrome.shadow_offset, body.width, body.height);
        commands.push(RenderCommand::Rect {
            bounds: place.rect(shadow),
            color: fade(SHADOW),
            corner_radius: chrome.corner_radius * frame.scale,
        });
    }

    commands.push(RenderCommand::Rect {
        bounds: place.rect(body),
        color: fade(background),
        corner_radius: chrome.corner_radius * frame.scale,
    });

    let pointer_width = bubble.pointer_width();
    for side in [PointerSide::Up, PointerSide::Down] {
        let color = if side == geometry.pointer_side {
            fade(background)
        } else {
            match settings.pointer.visibility {
                PointerVisibility::Hide => continue,
                PointerVisibility::Transparent => background.with_alpha(0.0),
            }
        };
        let left = geometry.pointer_offset_x;
        let points = match side {
            PointerSide::Up => [
                [left, pointer_height],
                [left + pointer_width / 2.0, 0.0],
                [left + pointer_width, pointer_height],
            ],
            PointerSide::Down => [
                [left, geometry.height - pointer_height],
                [left + pointer_width / 2.0, geometry.height],
                [left + pointer_width, geometry.height - pointer_height],
            ],
        };
        commands.push(RenderCommand::Triangle {
            points: points.map(|[x, y]| place.point(x, y)),
            color,
        });
    }

    let inner = Rect::new(
        body.x + chrome.padding,
        body.y + chrome.padding,
        (body.width - chrome.padding * 2.0).max(0.0),
        (body.height - chrome.padding * 2.0).max(0.0),
    );
    match config.content() {
        Content::Text(text) => {
            let [x, y] = place.point(inner.x, inner.y);
            commands.push(RenderCommand::Text {
                text: text.clone(),
                x,
                y,
                color: fade(config.text_color().unwrap_or_else(|| chrome.text())),
                font: config.font(),
                scale: frame.scale,
            });
        }
        Content::Custom(handle) => commands.push(RenderCommand::Content {
            handle: *handle,
            bounds: place.rect(inner),
            opacity: frame.opacity,
        }),
    }
}

/// Maps bubble-local coordinates to overlay space under the frame's
/// position and center-pivoted scale.
struct Placement {
    origin: (f32, f32),
    pivot: (f32, f32),
    scale: f32,
}

impl Placement {
    fn new(frame: BubbleFrame, geometry: &BubbleGeometry) -> Self {
        Self {
            origin: (frame.x, frame.y),
            pivot: (geometry.width / 2.0, geometry.height / 2.0),
            scale: frame.scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> [f32; 2] {
        [
            self.origin.0 + self.pivot.0 + (x - self.pivot.0) * self.scale,
            self.origin.1 + self.pivot.1 + (y - self.pivot.1) * self.scale,
        ]
    }

    fn rect(&self, local: Rect) -> Rect {
        let [x, y] = self.point(local.x, local.y);
        Rect::new(x, y, local.width * self.scale, local.height * self.scale)
    }
}

/// Vertex for bubble chrome rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BubbleVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl BubbleVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Triangulates the chrome commands (rects and pointers).
///
/// Text and custom content are drawn by the host and produce no
/// vertices. Corner radii are ignored.
#[must_use]
pub fn tessellate(commands: &[RenderCommand]) -> Vec<BubbleVertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for command in commands {
        match command {
            RenderCommand::Rect { bounds, color, .. } => {
                let c = color.to_array();
                let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
                vertices.extend_from_slice(&[
                    BubbleVertex::new(l, t, c),
                    BubbleVertex::new(r, t, c),
                    BubbleVertex::new(l, b, c),
                    BubbleVertex::new(r, t, c),
                    BubbleVertex::new(r, b, c),
                    BubbleVertex::new(l, b, c),
                ]);
            }
            RenderCommand::Triangle { points, color } => {
                let c = color.to_array();
                vertices.extend(points.iter().map(|[x, y]| BubbleVertex::new(*x, *y, c)));
            }
            RenderCommand::Text { .. } | RenderCommand::Content { .. } => {}
        }
    }
    vertices
}

/// Raw bytes of a vertex slice, ready for a GPU buffer upload.
#[must_use]
pub fn vertex_bytes(vertices: &[BubbleVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
