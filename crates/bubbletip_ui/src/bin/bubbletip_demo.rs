//! Scripted walkthrough of the tooltip overlay over the headless host.
//!
//! Usage: `bubbletip_demo [settings.toml]`. Set `RUST_LOG=debug` to see
//! state transitions.

use bubbletip_ui::{
    AnchorQuery, AnchorRole, AnimationStyle, Color, ElementHandle, HeadlessHost, Overlay,
    OverlaySettings, Rect, RenderCommand, ToolTipConfig,
};
use tracing_subscriber::EnvFilter;

const CONTAINER: ElementHandle = ElementHandle(1);
const SAVE_BUTTON: ElementHandle = ElementHandle(2);
const TITLE: ElementHandle = ElementHandle(3);
const CORNER_BUTTON: ElementHandle = ElementHandle(4);

const FRAME: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => OverlaySettings::from_toml_file(path)?,
        None => OverlaySettings::default(),
    };

    let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, 360.0, 640.0));
    host.set_element(CONTAINER, Rect::new(0.0, 24.0, 360.0, 616.0));
    host.set_element(SAVE_BUTTON, Rect::new(40.0, 300.0, 80.0, 40.0));
    host.set_element(TITLE, Rect::new(120.0, 24.0, 120.0, 32.0));
    host.set_element(CORNER_BUTTON, Rect::new(320.0, 500.0, 32.0, 32.0));
    host.register_anchor(AnchorQuery::Role(AnchorRole::Title), TITLE);

    let mut overlay = Overlay::new(host, CONTAINER, settings);
    overlay.set_click_listener(|handle| tracing::info!(bubble = handle.0, "clicked"));
    overlay.set_lifecycle_listener(|handle, state| {
        tracing::info!(bubble = handle.0, ?state, "lifecycle");
    });

    let save = overlay.show(
        ToolTipConfig::new().with_text("Save your progress here"),
        SAVE_BUTTON,
    )?;
    let title = overlay.show_for_title(
        ToolTipConfig::new()
            .with_text("Tap the title to rename")
            .with_animation_style(AnimationStyle::FromTop),
    )?;
    let corner = overlay.show(
        ToolTipConfig::new()
            .with_text("Options")
            .with_color(Color::rgb(1.0, 0.9, 0.6))
            .with_animation_style(AnimationStyle::None)
            .without_shadow(),
        CORNER_BUTTON,
    )?;

    if let Err(err) = overlay.show_for_overflow_menu(ToolTipConfig::new().with_text("More")) {
        tracing::warn!(%err, "overflow tooltip skipped");
    }

    for (node, measurement) in overlay.host_mut().layout_pass() {
        overlay.on_measured(node, measurement);
    }

    for bubble in overlay.bubbles() {
        if let Some(geometry) = bubble.geometry() {
            println!(
                "bubble {} at ({:.0}, {:.0}) {}x{} pointer {:?} offset {:.0}",
                bubble.handle().0,
                geometry.x,
                geometry.y,
                geometry.width,
                geometry.height,
                geometry.pointer_side,
                geometry.pointer_offset_x,
            );
        }
    }

    run(&mut overlay, 8);
    // interrupted mid-appear
    overlay.remove(title);
    run(&mut overlay, 30);

    overlay.tap(save);
    run(&mut overlay, 30);

    let mut commands = Vec::new();
    overlay.render(&mut commands);
    let rects = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::Rect { .. }))
        .count();
    println!("{} live bubble(s), {rects} rect(s) in the last frame", overlay.len());

    overlay.remove(corner);

    let host = overlay.host();
    println!(
        "host calls: {} total, all detached: {}",
        host.calls().len(),
        [save, title, corner]
            .iter()
            .all(|handle| !host.is_attached(handle.node()))
    );
    Ok(())
}

fn run(overlay: &mut Overlay<HeadlessHost>, frames: usize) {
    for _ in 0..frames {
        overlay.tick(FRAME);
    }
}
