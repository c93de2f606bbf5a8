// crates/dino_plugin/src/state.rs

use engine_shared::plugin_api::{calculate_layout_hash, HostInterface};
use engine_shared::FrameInput;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::ImageTable;
use crate::bounded::BoundedQueue;
use crate::canvas::{AssetResolver, Canvas};
use crate::catalog::PropId;
use crate::inventory::Inventory;
use crate::systems;
use crate::ui::{Ui, UiMemory};

/// Bump together with `SCHEMA` whenever a serialized field changes.
pub const STATE_VERSION: u32 = 1;
const SCHEMA: &str = "DinoGame{config{money,capacity,aspect,scroll_speed,scroll_edge},\
                      play{money,mode,page,inventory,scroll,scene}}/1";
pub const SCHEMA_HASH: u64 = calculate_layout_hash(SCHEMA);

/// Tuning values. Defaults match the shipped art.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_money: u32,
    /// Props kept in the scene before the oldest disappears.
    pub scene_capacity: usize,
    /// Width / height of the background art.
    pub background_aspect: f32,
    /// Points per second at the very edge of the screen.
    pub scroll_speed: f32,
    /// Fraction of the screen width on each side that scrolls.
    pub scroll_edge: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 10_000,
            scene_capacity: 32,
            background_aspect: 2.0,
            scroll_speed: 2000.0,
            scroll_edge: 0.25,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiMode {
    /// Plain scene view.
    #[default]
    Main,
    Menu,
    Inventory,
    Shop,
    Album,
    /// A prop from the inventory follows the pointer until dropped.
    Placing { prop: PropId },
}

impl UiMode {
    /// Modes that show the scene with only the menu icon on top.
    pub fn is_scene(self) -> bool {
        matches!(self, UiMode::Main | UiMode::Placing { .. })
    }

    pub fn placing(self) -> Option<PropId> {
        match self {
            UiMode::Placing { prop } => Some(prop),
            _ => None,
        }
    }

    fn is_paged(self) -> bool {
        matches!(self, UiMode::Inventory | UiMode::Shop | UiMode::Album)
    }
}

/// A prop dropped into the scene, in background-relative coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneProp {
    pub prop: PropId,
    pub pos: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed { left: u32, evicted: bool },
    OutOfStock,
}

/// Everything that survives a hot reload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayState {
    pub money: u32,
    pub mode: UiMode,
    /// Page of the current menu screen.
    pub page: usize,
    pub inventory: Inventory,
    /// Horizontal scroll of the scene in points.
    pub scroll: f32,
    pub scene: BoundedQueue<SceneProp>,
}

impl PlayState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            money: config.starting_money,
            mode: UiMode::Main,
            page: 0,
            inventory: Inventory::default(),
            scroll: 0.0,
            scene: BoundedQueue::with_capacity(config.scene_capacity),
        }
    }

    /// Switches screens. Paged screens always open on their first page.
    pub fn open(&mut self, mode: UiMode) {
        if mode.is_paged() {
            self.page = 0;
        }
        if mode != self.mode {
            debug!(from = ?self.mode, to = ?mode, "ui mode");
        }
        self.mode = mode;
    }

    /// Buys one `prop` if affordable.
    pub fn buy(&mut self, prop: PropId) -> bool {
        let price = prop.def().price;
        let Some(money) = self.money.checked_sub(price) else {
            return false;
        };
        self.money = money;
        self.inventory.add(prop, 1);
        debug!(prop = prop.def().name, price, money, "bought");
        true
    }

    /// Drops one `prop` from the inventory into the scene at `pos`.
    /// Leaves placing mode once the last one is used.
    pub fn commit_placement(&mut self, prop: PropId, pos: Vec2) -> PlacementOutcome {
        let Some(left) = self.inventory.take_one(prop) else {
            self.open(UiMode::Main);
            return PlacementOutcome::OutOfStock;
        };

        let evicted = self.scene.push(SceneProp { prop, pos }).is_some();
        if left == 0 {
            self.open(UiMode::Main);
        }
        debug!(prop = prop.def().name, x = pos.x, y = pos.y, left, evicted, "prop placed");
        PlacementOutcome::Placed { left, evicted }
    }
}

/// Plugin instance. Owned by the host through `PluginApi::state`.
#[derive(Serialize, Deserialize)]
pub struct DinoGame {
    pub config: GameConfig,
    pub play: PlayState,
    #[serde(skip)]
    pub images: ImageTable,
    #[serde(skip)]
    pub ui: UiMemory,
    #[serde(skip)]
    pub host: Option<HostInterface>,
}

impl Default for DinoGame {
    fn default() -> Self {
        let config = GameConfig::default();
        let play = PlayState::new(&config);
        Self {
            config,
            play,
            images: ImageTable::default(),
            ui: UiMemory::default(),
            host: None,
        }
    }
}

impl DinoGame {
    pub fn bind_images(&mut self, resolver: &mut dyn AssetResolver) {
        self.images = ImageTable::load(resolver);
    }

    /// One frame: scene, money counter, then menus on top.
    pub fn tick(&mut self, input: &FrameInput, canvas: &mut dyn Canvas) {
        let mut ui = Ui::begin(canvas, input, &mut self.ui);
        systems::scene::run(&mut self.play, &self.config, &self.images, &mut ui);
        systems::money::run(&self.play, &self.images, &mut ui);
        systems::menu::run(&mut self.play, &self.images, &mut ui);
        ui.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(i: usize) -> PropId {
        PropId::new(i).expect("catalog prop")
    }

    #[test]
    fn last_placement_returns_to_main() {
        let mut play = PlayState::new(&GameConfig::default());
        play.inventory.add(prop(0), 1);
        play.open(UiMode::Placing { prop: prop(0) });

        let outcome = play.commit_placement(prop(0), Vec2::new(0.6, 0.6));
        assert_eq!(outcome, PlacementOutcome::Placed { left: 0, evicted: false });
        assert_eq!(play.mode, UiMode::Main);
        assert_eq!(play.inventory.count(prop(0)), 0);
        assert_eq!(play.scene.len(), 1);

        assert_eq!(play.commit_placement(prop(0), Vec2::new(0.6, 0.6)), PlacementOutcome::OutOfStock);
        assert_eq!(play.scene.len(), 1);
    }

    #[test]
    fn placing_keeps_mode_while_stock_remains() {
        let mut play = PlayState::new(&GameConfig::default());
        play.inventory.add(prop(1), 2);
        play.open(UiMode::Placing { prop: prop(1) });
        play.commit_placement(prop(1), Vec2::new(0.5, 0.9));
        assert_eq!(play.mode, UiMode::Placing { prop: prop(1) });
    }

    #[test]
    fn scene_evicts_oldest_past_capacity() {
        let config = GameConfig { scene_capacity: 2, ..GameConfig::default() };
        let mut play = PlayState::new(&config);
        play.inventory.add(prop(0), 3);
        for x in [0.5, 0.6, 0.7] {
            play.commit_placement(prop(0), Vec2::new(x, 0.9));
        }
        let xs: Vec<f32> = play.scene.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![0.6, 0.7]);
    }

    #[test]
    fn buying_needs_money() {
        let config = GameConfig { starting_money: 12, ..GameConfig::default() };
        let mut play = PlayState::new(&config);
        let starfish = prop(11);
        assert!(!play.buy(starfish));
        assert!(play.buy(prop(0)));
        assert_eq!(play.money, 7);
        assert_eq!(play.inventory.count(prop(0)), 1);
    }

    #[test]
    fn paged_screens_open_on_first_page() {
        let mut play = PlayState::new(&GameConfig::default());
        play.page = 4;
        play.open(UiMode::Shop);
        assert_eq!(play.page, 0);
    }

    #[test]
    fn test_layout_change_requires_version_ack() {
        let game = DinoGame::default();
        let current_size =
            bincode::serialized_size(&game).expect("Serialization of DinoGame must succeed");

        const EXPECTED_SIZE: u64 = 68;
        const EXPECTED_VERSION: u32 = 1;

        assert_eq!(
            current_size, EXPECTED_SIZE,
            "STRUCT LAYOUT CHANGED! Update EXPECTED_SIZE, SCHEMA and STATE_VERSION."
        );
        assert_eq!(STATE_VERSION, EXPECTED_VERSION);
    }
}
