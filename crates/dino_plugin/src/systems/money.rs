// crates/dino_plugin/src/systems/money.rs
//! Balance counter in the bottom-left corner.

use engine_shared::{Color, Rect, TextAlign};

use crate::assets::ImageTable;
use crate::canvas::Style;
use crate::catalog::ImageId;
use crate::state::PlayState;
use crate::ui::Ui;

const CORNER_MARGIN: f32 = 5.0;
const TEXT_GAP: f32 = 10.0;
const BACKING_PAD: f32 = 5.0;

pub fn run(play: &PlayState, images: &ImageTable, ui: &mut Ui) {
    let viewport = ui.input().viewport;
    let unit = viewport.w.min(viewport.h);
    if unit <= 0.0 {
        return;
    }

    let icon = 0.08 * unit;
    let font_size = icon;

    let (corner, _) = viewport.inset(CORNER_MARGIN, CORNER_MARGIN).split_left(icon, 0.0);
    let (_, symbol) = corner.split_bottom(icon, 0.0);

    let text = play.money.to_string();
    let canvas = ui.canvas();
    let text_w = canvas.text_width(&text, font_size);
    let amount = Rect::new(symbol.right() + TEXT_GAP, symbol.y - 2.0, text_w, symbol.h);

    let backing = Rect::new(symbol.x, symbol.y, amount.right() - symbol.x, symbol.h)
        .inset(-BACKING_PAD, -BACKING_PAD);
    canvas.fill_rect(backing, Style::default());
    canvas.textured_rect(symbol, images.get(ImageId::Bone), Rect::UNIT, Style::default());
    canvas.text(amount, &text, font_size, TextAlign::Left, Style::tint(Color::BLACK));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameConfig;
    use crate::testing::{MapResolver, Op, RecordingCanvas};
    use crate::ui::UiMemory;
    use engine_shared::FrameInput;

    #[test]
    fn balance_sits_on_a_backing_in_the_bottom_left() {
        let images = ImageTable::load(&mut MapResolver::with_all_images());
        let play = PlayState::new(&GameConfig::default());
        let input = FrameInput {
            viewport: Rect::new(0.0, 0.0, 1000.0, 500.0),
            ..Default::default()
        };

        let mut canvas = RecordingCanvas::default();
        let mut memory = UiMemory::default();
        let mut ui = Ui::begin(&mut canvas, &input, &mut memory);
        run(&play, &images, &mut ui);
        ui.finish();

        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["10000"]);

        // 0.08 * 500 = 40 point icon, 5 points in from the corner.
        let bone = canvas.rect_of(images.get(ImageId::Bone)).expect("bone icon");
        assert_eq!(bone, Rect::new(5.0, 455.0, 40.0, 40.0));

        let Op::Fill { rect: backing, .. } = &canvas.ops[0] else {
            panic!("backing must be drawn first");
        };
        // "10000" is 5 * 20 = 100 points wide in the recorder.
        assert_eq!(backing.x, 0.0);
        assert_eq!(backing.right(), 5.0 + 40.0 + 10.0 + 100.0 + 5.0);
        assert!(backing.bottom() >= bone.bottom());
    }
}
