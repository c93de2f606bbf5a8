// crates/dino_plugin/src/systems/scene.rs
//! The scene: layered background, placed props, placement preview and edge scrolling.

use engine_shared::Rect;
use glam::Vec2;
use tracing::trace;

use crate::assets::ImageTable;
use crate::canvas::Style;
use crate::catalog::{ImageId, PropKind};
use crate::depth::DepthLayer;
use crate::lake::in_lake;
use crate::state::{GameConfig, PlacementOutcome, PlayState, SceneProp};
use crate::ui::Ui;

/// Props can't be placed higher up than this (that's sky and far hills).
pub const HORIZON_Y: f32 = 0.35;

/// Prop size at the horizon / at the bottom edge, as a fraction of background height.
const FAR_SIZE: f32 = 0.06;
const CLOSE_SIZE: f32 = 0.24;

/// Where the background lands on screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub background: Rect,
    /// Set when the background is narrower than the viewport and gets letterboxed.
    pub clip: Option<Rect>,
}

/// Fits the background to the viewport height. Returns the frame and the clamped scroll.
pub fn frame_scene(viewport: Rect, aspect: f32, scroll: f32) -> (SceneFrame, f32) {
    let background = viewport.with_w(viewport.h * aspect);

    if background.w < viewport.w {
        let background = Rect {
            x: viewport.x + (viewport.w - background.w) / 2.0,
            ..background
        };
        let frame = SceneFrame { background, clip: Some(background) };
        return (frame, scroll);
    }

    let scroll = scroll.clamp(0.0, background.w - viewport.w);
    let frame = SceneFrame {
        background: Rect { x: viewport.x - scroll, ..background },
        clip: None,
    };
    (frame, scroll)
}

/// Screen point to background-relative coordinates.
pub fn to_scene(background: Rect, p: Vec2) -> Vec2 {
    (p - background.min()) / background.size()
}

/// Props must stand on visible ground, and only fish may go in the lake.
pub fn placement_allowed(pos: Vec2, kind: PropKind) -> bool {
    let in_scene = (0.0..=1.0).contains(&pos.x) && (HORIZON_Y..=1.0).contains(&pos.y);
    in_scene && (kind.floats() || !in_lake(pos.x, pos.y))
}

/// Screen rect and texture coordinates for a placed prop. Props in the lake
/// only show their top half, as if floating.
pub fn prop_sprite(background: Rect, prop: &SceneProp) -> (Rect, Rect) {
    let def = prop.prop.def();
    let anchor = background.min() + background.size() * prop.pos;

    let unit = background.h;
    let far = FAR_SIZE * unit * def.scale;
    let close = CLOSE_SIZE * unit * def.scale;
    let depth = (prop.pos.y - HORIZON_Y) / (1.0 - HORIZON_Y);
    let size = far + (close - far) * depth;

    let x = anchor.x - size / 2.0;
    let y = anchor.y - size + size * def.margin;

    if in_lake(prop.pos.x, prop.pos.y) {
        (Rect::new(x, y, size, size / 2.0), Rect::new(0.0, 0.0, 1.0, 0.5))
    } else {
        (Rect::new(x, y, size, size), Rect::UNIT)
    }
}

/// Scroll delta for a pointer at `rel_x` (0..1 across the viewport).
/// Speed ramps from 0 at the inner edge of the scroll zone to full at the screen edge.
pub fn edge_scroll(rel_x: f32, dt: f32, config: &GameConfig) -> f32 {
    let edge = config.scroll_edge;
    if edge <= 0.0 {
        return 0.0;
    }
    if rel_x < edge {
        -dt * config.scroll_speed * (edge - rel_x) / edge
    } else if rel_x > 1.0 - edge {
        dt * config.scroll_speed * (rel_x - (1.0 - edge)) / edge
    } else {
        0.0
    }
}

pub fn run(play: &mut PlayState, config: &GameConfig, images: &ImageTable, ui: &mut Ui) {
    let input = *ui.input();
    let viewport = input.viewport;
    if viewport.w <= 0.0 || viewport.h <= 0.0 {
        return;
    }

    let (frame, scroll) = frame_scene(viewport, config.background_aspect, play.scroll);
    play.scroll = scroll;
    let background = frame.background;

    if frame.clip.is_some() {
        ui.canvas().fill_rect(viewport, Style::default());
    }
    let style = Style { clip: frame.clip, ..Style::default() };

    // Placement preview, committed on click.
    let mut preview = play.mode.placing().and_then(|prop| {
        let pos = to_scene(background, input.pointer);
        placement_allowed(pos, prop.def().kind).then_some(SceneProp { prop, pos })
    });
    if let Some(p) = preview.filter(|_| input.primary_pressed) {
        if let PlacementOutcome::Placed { .. } = play.commit_placement(p.prop, p.pos) {
            // It's in the scene now; don't draw it twice.
            preview = None;
        }
    }

    draw_layers(ui, images, background, style, play.scene.iter().chain(preview.iter()));

    if frame.clip.is_none() {
        play.scroll += edge_scroll(input.pointer_rel_x(), input.dt, config);
    }
}

/// Painter's algorithm: background layer N, then the props standing in depth
/// layer N, and the frontmost background layer last.
fn draw_layers<'p>(
    ui: &mut Ui,
    images: &ImageTable,
    background: Rect,
    style: Style,
    props: impl Iterator<Item = &'p SceneProp> + Clone,
) {
    for depth in DepthLayer::all() {
        ui.image(background, images.get(ImageId::BACKGROUND_LAYERS[depth.index()]), style);

        for prop in props.clone().filter(|p| DepthLayer::from_y(p.pos.y) == depth) {
            let (rect, uv) = prop_sprite(background, prop);
            trace!(prop = prop.prop.def().name, layer = depth.index(), "draw prop");
            ui.canvas().textured_rect(rect, images.get(prop.prop.def().image), uv, style);
        }
    }
    ui.image(background, images.get(ImageId::BACKGROUND_LAYERS[DepthLayer::COUNT]), style);
}
