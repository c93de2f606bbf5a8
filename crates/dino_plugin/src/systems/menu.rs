// crates/dino_plugin/src/systems/menu.rs
//! Corner menu button and the menu panel with its screens.
//!
//! Everything is sized from `unit`, the short side of the viewport. A screen
//! returns the mode it wants to switch to, which is applied once it has drawn.

use engine_shared::{Color, Rect, TextAlign};
use glam::Vec2;

use crate::assets::ImageTable;
use crate::canvas::Style;
use crate::catalog::{ImageId, PropId, DINOSAURS};
use crate::paging::{grid_cell, Paging, COLUMNS, ROWS};
use crate::state::{PlayState, UiMode};
use crate::ui::{Ui, DISABLED_ALPHA};

const CORNER_MARGIN: f32 = 5.0;

pub fn run(play: &mut PlayState, images: &ImageTable, ui: &mut Ui) {
    let viewport = ui.input().viewport;
    let unit = viewport.w.min(viewport.h);
    if unit <= 0.0 {
        return;
    }

    let (corner, _) = viewport
        .inset(CORNER_MARGIN, CORNER_MARGIN)
        .split_left(0.15 * unit, 0.0);
    let (corner, _) = corner.split_top(0.15 * unit, 0.0);

    if play.mode.is_scene() {
        if ui.button(corner, images.get(ImageId::Menu)) {
            play.open(UiMode::Menu);
        }
        return;
    }

    if ui.button(corner, images.get(ImageId::Close)) {
        play.open(UiMode::Main);
        return;
    }

    let panel = viewport.centered(0.8 * unit, 0.8 * unit);
    ui.image(panel, images.get(ImageId::MenuBackground), Style::default());

    let back = Rect::at(panel.min() + Vec2::splat(0.02 * unit)).centered(0.1 * unit, 0.1 * unit);
    let (back_icon, back_to) = match play.mode {
        UiMode::Menu => (ImageId::Close, UiMode::Main),
        _ => (ImageId::Back, UiMode::Menu),
    };
    if ui.button(back, images.get(back_icon)) {
        play.open(back_to);
        return;
    }

    let screen = MenuScreen {
        images,
        panel,
        content: panel.inset(0.05 * unit, 0.05 * unit),
        unit,
    };
    let next = match play.mode {
        UiMode::Menu => screen.main_menu(ui),
        UiMode::Inventory => screen.inventory(play, ui),
        UiMode::Shop => screen.shop(play, ui),
        UiMode::Album => screen.album(play, ui),
        UiMode::Main | UiMode::Placing { .. } => None,
    };
    if let Some(mode) = next {
        play.open(mode);
    }
}

/// Icon with a caption and a footer strip under it.
struct Card {
    icon: Rect,
    caption: Rect,
    footer: Rect,
}

struct MenuScreen<'a> {
    images: &'a ImageTable,
    panel: Rect,
    content: Rect,
    unit: f32,
}

impl MenuScreen<'_> {
    fn line_height(&self) -> f32 {
        0.03 * self.unit
    }

    fn cell(&self, margin: f32, i: usize) -> Rect {
        let (col, row) = grid_cell(i);
        self.content
            .divide_x(margin, COLUMNS, col)
            .divide_y(margin, ROWS, row)
    }

    fn card(&self, i: usize) -> Card {
        let gap = 0.01 * self.unit;
        let mut rest = self.cell(gap, i);
        let footer = rest.split_off_bottom(self.line_height(), gap);
        let caption = rest.split_off_bottom(self.line_height(), gap);

        let side = rest.w.min(rest.h);
        let icon = rest.centered(side, side);
        Card {
            icon,
            caption: caption.centered(side, caption.h),
            footer: footer.centered(side, footer.h),
        }
    }

    fn label(&self, ui: &mut Ui, rect: Rect, text: &str, align: TextAlign, alpha: u8) {
        let style = Style::tint(Color::BLACK.with_alpha(alpha));
        ui.canvas().text(rect, text, rect.h, align, style);
    }

    /// Left/right arrows beside the panel. Changes `page` when clicked.
    fn arrows(&self, ui: &mut Ui, paging: Paging, page: &mut usize) {
        let size = 0.15 * self.unit;
        let (left, _) = self.panel.split_left(0.05 * self.unit, 0.0);
        let (_, right) = self.panel.split_right(0.05 * self.unit, 0.0);

        if paging.has_prev() && ui.button(left.centered(size, size), self.images.get(ImageId::LeftArrow)) {
            *page = paging.page - 1;
        }
        if paging.has_next() && ui.button(right.centered(size, size), self.images.get(ImageId::RightArrow)) {
            *page = paging.page + 1;
        }
    }

    fn main_menu(&self, ui: &mut Ui) -> Option<UiMode> {
        const ENTRIES: [(ImageId, UiMode); 3] = [
            (ImageId::Inventory, UiMode::Inventory),
            (ImageId::Shop, UiMode::Shop),
            (ImageId::Album, UiMode::Album),
        ];

        let mut next = None;
        for (i, (icon, mode)) in ENTRIES.into_iter().enumerate() {
            let cell = self.cell(0.04 * self.unit, i);
            let side = cell.w.min(cell.h);
            if ui.button(cell.centered(side, side), self.images.get(icon)) {
                next = Some(mode);
            }
        }
        next
    }

    fn inventory(&self, play: &mut PlayState, ui: &mut Ui) -> Option<UiMode> {
        let stocked: Vec<(PropId, u32)> = play.inventory.stocked().collect();
        let paging = Paging::new(stocked.len(), play.page);
        play.page = paging.page;

        let mut next = None;
        for (slot, i) in paging.visible().enumerate() {
            let (prop, count) = stocked[i];
            let def = prop.def();
            let card = self.card(slot);

            if ui.button(card.icon, self.images.get(def.image)) {
                next = Some(UiMode::Placing { prop });
            }
            self.label(ui, card.caption, def.name, TextAlign::Center, 255);
            self.label(ui, card.footer, &format!("x{count}"), TextAlign::Center, 255);
        }

        self.arrows(ui, paging, &mut play.page);
        next
    }

    fn shop(&self, play: &mut PlayState, ui: &mut Ui) -> Option<UiMode> {
        let paging = Paging::new(PropId::all().count(), play.page);
        play.page = paging.page;

        for (slot, i) in paging.visible().enumerate() {
            let Some(prop) = PropId::new(i) else { continue };
            let def = prop.def();
            let card = self.card(slot);
            let image = self.images.get(def.image);

            let affordable = play.money >= def.price;
            let alpha = if affordable { 255 } else { DISABLED_ALPHA };
            if !affordable {
                ui.disabled_button(card.icon, image);
            } else if ui.button(card.icon, image) {
                play.buy(prop);
            }

            self.label(ui, card.caption, def.name, TextAlign::Center, alpha);

            let (bone, price) = card.footer.split_left(card.footer.h, 0.005 * self.unit);
            let tint = Style::tint(Color::WHITE.with_alpha(alpha));
            ui.image(bone, self.images.get(ImageId::Bone), tint);
            self.label(ui, price, &def.price.to_string(), TextAlign::Left, alpha);
            let owned = play.inventory.count(prop);
            self.label(ui, price, &format!("x{owned}"), TextAlign::Right, alpha);
        }

        self.arrows(ui, paging, &mut play.page);
        None
    }

    fn album(&self, play: &mut PlayState, ui: &mut Ui) -> Option<UiMode> {
        let paging = Paging::new(DINOSAURS.len(), play.page);
        play.page = paging.page;

        for (slot, i) in paging.visible().enumerate() {
            let dino = &DINOSAURS[i];
            let card = self.card(slot);

            ui.image(card.icon, self.images.get(dino.image), Style::default());
            self.label(ui, card.caption, dino.name, TextAlign::Center, 255);

            let (lure, rest) = card.footer.split_left(card.footer.h, 0.005 * self.unit);
            if let Some(&prop_image) = dino.attracted_by.first() {
                ui.image(lure, self.images.get(prop_image), Style::default());
            }
            let minutes = format!("~{:.0} min", dino.minutes_to_spawn);
            self.label(ui, rest, &minutes, TextAlign::Right, 255);
        }

        self.arrows(ui, paging, &mut play.page);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameConfig;
    use crate::testing::{MapResolver, Op, RecordingCanvas};
    use crate::ui::UiMemory;
    use engine_shared::FrameInput;

    struct Harness {
        images: ImageTable,
        play: PlayState,
        memory: UiMemory,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                images: ImageTable::load(&mut MapResolver::with_all_images()),
                play: PlayState::new(&GameConfig::default()),
                memory: UiMemory::default(),
            }
        }

        fn frame(&mut self, pointer: Vec2, pressed: bool) -> RecordingCanvas {
            let input = FrameInput {
                viewport: Rect::new(0.0, 0.0, 1000.0, 800.0),
                pointer,
                primary_pressed: pressed,
                ..Default::default()
            };
            let mut canvas = RecordingCanvas::default();
            let mut ui = Ui::begin(&mut canvas, &input, &mut self.memory);
            run(&mut self.play, &self.images, &mut ui);
            ui.finish();
            canvas
        }

        /// Hovers the first draw of `image` for a frame, then presses on it.
        fn click(&mut self, image: ImageId) {
            let handle = self.images.get(image);
            let rect = self.frame(Vec2::ZERO, false).rect_of(handle).expect("image on screen");
            let center = rect.min() + rect.size() / 2.0;
            self.frame(center, false);
            self.frame(center, true);
        }

        fn shows(&mut self, image: ImageId) -> bool {
            let handle = self.images.get(image);
            self.frame(Vec2::ZERO, false).images().any(|i| i == handle)
        }
    }

    #[test]
    fn corner_button_opens_and_closes_the_menu() {
        let mut h = Harness::new();
        assert!(h.shows(ImageId::Menu));
        assert!(!h.shows(ImageId::MenuBackground));

        h.click(ImageId::Menu);
        assert_eq!(h.play.mode, UiMode::Menu);
        assert!(h.shows(ImageId::MenuBackground));

        h.click(ImageId::Close);
        assert_eq!(h.play.mode, UiMode::Main);
    }

    #[test]
    fn back_returns_to_the_menu_page() {
        let mut h = Harness::new();
        h.play.open(UiMode::Menu);
        h.click(ImageId::Shop);
        assert_eq!(h.play.mode, UiMode::Shop);

        h.click(ImageId::Back);
        assert_eq!(h.play.mode, UiMode::Menu);
    }

    #[test]
    fn shop_buys_and_fades_what_is_too_expensive() {
        let mut h = Harness::new();
        h.play.open(UiMode::Shop);
        h.play.money = 7;

        let berries = h.images.get(ImageId::BerryBunch);
        let canvas = h.frame(Vec2::ZERO, false);
        let faded = canvas.ops.iter().any(|op| {
            matches!(op, Op::Textured { image, style, .. } if *image == berries && style.color.a == DISABLED_ALPHA)
        });
        assert!(faded);

        h.click(ImageId::Leaves);
        assert_eq!(h.play.money, 2);
        assert_eq!(h.play.inventory.count(PropId::new(0).expect("leaves")), 1);

        // Nothing is affordable now; clicking does nothing.
        h.click(ImageId::Meat);
        assert_eq!(h.play.money, 2);
    }

    #[test]
    fn inventory_lists_owned_props_and_starts_placing() {
        let mut h = Harness::new();
        let banana = PropId::new(4).expect("banana bunch");
        h.play.inventory.add(banana, 2);
        h.play.open(UiMode::Inventory);

        let canvas = h.frame(Vec2::ZERO, false);
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["Banana Bunch", "x2"]);
        assert!(!h.shows(ImageId::Leaves));

        h.click(ImageId::BananaBunch);
        assert_eq!(h.play.mode, UiMode::Placing { prop: banana });
        assert!(h.shows(ImageId::Menu));
    }

    #[test]
    fn album_pages_through_the_catalog() {
        let mut h = Harness::new();
        h.play.open(UiMode::Album);
        assert!(h.shows(ImageId::RightArrow));
        assert!(!h.shows(ImageId::LeftArrow));
        assert!(h.shows(ImageId::Ankylosaurus));

        h.click(ImageId::RightArrow);
        assert_eq!(h.play.page, 1);
        assert!(h.shows(ImageId::LeftArrow));
        assert!(!h.shows(ImageId::Ankylosaurus));

        h.play.page = 9;
        h.frame(Vec2::ZERO, false);
        assert_eq!(h.play.page, 2);
        assert!(!h.shows(ImageId::RightArrow));
    }

    #[test]
    fn empty_inventory_has_no_arrows() {
        let mut h = Harness::new();
        h.play.open(UiMode::Inventory);
        assert!(!h.shows(ImageId::LeftArrow));
        assert!(!h.shows(ImageId::RightArrow));
        assert_eq!(h.play.page, 0);
    }
}
