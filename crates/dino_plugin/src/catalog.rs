// crates/dino_plugin/src/catalog.rs
//! Compiled-in game content: every image, prop and dinosaur.

use serde::{Deserialize, Serialize};

macro_rules! image_ids {
    ($($variant:ident => $path:literal,)*) => {
        /// Every image the game draws, with its project-relative asset path.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ImageId {
            $($variant,)*
        }

        impl ImageId {
            pub const ALL: &'static [ImageId] = &[$(ImageId::$variant,)*];
            pub const COUNT: usize = Self::ALL.len();

            pub const fn path(self) -> &'static str {
                match self {
                    $(ImageId::$variant => $path,)*
                }
            }
        }
    };
}

image_ids! {
    // Substituted for anything that fails to load.
    Placeholder => "art/icons/missing.png",

    // Background, back to front. Props are drawn between these.
    Background0 => "art/backgrounds/background.png",
    Background1 => "art/backgrounds/layer 1.png",
    Background2 => "art/backgrounds/layer 2.png",
    Background3 => "art/backgrounds/layer 3.png",
    Background4 => "art/backgrounds/layer 4.png",

    Ankylosaurus => "art/dinosaurs/ankylosaurus.png",
    Ankylosaurus2 => "art/dinosaurs/ankylosaurus_2.png",
    Apatosaurus => "art/dinosaurs/apatosaurus.png",
    Brachiosaurus => "art/dinosaurs/brachiosaurus.png",
    Brachiosaurus2 => "art/dinosaurs/brachiosaurus_2.png",
    Carnotaurus => "art/dinosaurs/carnotaurus.png",
    Dimorphodon => "art/dinosaurs/dimorphodon.png",
    Pachycephalosaurus => "art/dinosaurs/pachycephalosaurus.png",
    Parasaurolophus => "art/dinosaurs/parasaurolophus.png",
    Parasaurolophus2 => "art/dinosaurs/parasaurolophus_2.png",
    Plesiosaurus => "art/dinosaurs/plesiosaurus.png",
    Pliosaurus => "art/dinosaurs/pliosaurus.png",
    Pteranodon => "art/dinosaurs/pteranodon.png",
    Spinosaurus => "art/dinosaurs/spinosaurus.png",
    Stegosaurus => "art/dinosaurs/stegosaurus.png",
    Stegosaurus2 => "art/dinosaurs/stegosaurus_2.png",
    Stegosaurus3 => "art/dinosaurs/stegosaurus_3.png",
    Stygimoloch => "art/dinosaurs/stygimoloch.png",
    Therizinosaurus => "art/dinosaurs/therizinosaurus.png",
    Triceratops => "art/dinosaurs/triceratops.png",
    Triceratops2 => "art/dinosaurs/triceratops_2.png",
    Tyrannosaurus => "art/dinosaurs/tyrannosaurus.png",
    Utahceratops => "art/dinosaurs/utahceratops.png",
    Velociraptor => "art/dinosaurs/velociraptor.png",

    Album => "art/icons/album.png",
    Back => "art/icons/back.png",
    Bone => "art/icons/bone.png",
    Close => "art/icons/close.png",
    Inventory => "art/icons/inventory.png",
    Menu => "art/icons/menu.png",
    MenuBackground => "art/icons/menu_background.png",
    Shop => "art/icons/shop.png",
    Square => "art/icons/square.png",
    LeftArrow => "art/icons/left_arrow.png",
    RightArrow => "art/icons/right_arrow.png",

    BananaBunch => "art/props/banana_bunch.png",
    BerryBunch => "art/props/berry_bunch.png",
    DeadMouse => "art/props/dead_mouse.png",
    Fish => "art/props/fish.png",
    Ham => "art/props/ham.png",
    Haunch => "art/props/haunch.png",
    HerbBundle => "art/props/herb_bundle.png",
    Leaves => "art/props/leaves.png",
    Meat => "art/props/meat.png",
    Squid => "art/props/squid.png",
    Starfish => "art/props/starfish.png",
    Urchin => "art/props/urchin.png",
}

impl ImageId {
    pub const BACKGROUND_LAYERS: [ImageId; 5] = [
        ImageId::Background0,
        ImageId::Background1,
        ImageId::Background2,
        ImageId::Background3,
        ImageId::Background4,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropKind {
    Vegetation,
    Meat,
    Fish,
}

impl PropKind {
    /// Only fish may be dropped into the lake.
    pub fn floats(self) -> bool {
        matches!(self, PropKind::Fish)
    }
}

#[derive(Debug)]
pub struct PropDef {
    pub name: &'static str,
    pub image: ImageId,

    /// Gap between the bottom of the drawn graphics and the bottom of the
    /// (square) image, as a fraction of the image height. Used to stand the
    /// visible prop on the cursor rather than the image box.
    pub margin: f32,

    /// World draw scale.
    pub scale: f32,

    pub kind: PropKind,
    pub price: u32,
}

const fn prop(name: &'static str, image: ImageId, kind: PropKind, price: u32, margin: f32, scale: f32) -> PropDef {
    PropDef { name, image, margin, scale, kind, price }
}

pub static PROPS: [PropDef; 12] = [
    prop("Leaves", ImageId::Leaves, PropKind::Vegetation, 5, 0.17, 0.9),
    prop("Meat", ImageId::Meat, PropKind::Meat, 5, 0.2, 1.0),
    prop("Fish", ImageId::Fish, PropKind::Fish, 5, 0.35, 0.7),
    prop("Herb Bundle", ImageId::HerbBundle, PropKind::Vegetation, 10, 0.2, 0.7),
    prop("Banana Bunch", ImageId::BananaBunch, PropKind::Vegetation, 20, 0.2, 0.8),
    prop("Berry Bunch", ImageId::BerryBunch, PropKind::Vegetation, 30, 0.2, 0.6),
    prop("Ham", ImageId::Ham, PropKind::Meat, 10, 0.2, 0.9),
    prop("Haunch", ImageId::Haunch, PropKind::Meat, 20, 0.2, 1.1),
    prop("Dead Mouse", ImageId::DeadMouse, PropKind::Meat, 30, 0.2, 0.7),
    prop("Squid", ImageId::Squid, PropKind::Fish, 10, 0.2, 1.0),
    prop("Urchin", ImageId::Urchin, PropKind::Fish, 20, 0.2, 0.7),
    prop("Starfish", ImageId::Starfish, PropKind::Fish, 30, 0.2, 0.7),
];

/// Stable id of a catalog prop. Only constructible for valid catalog indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PropId(u16);

impl PropId {
    pub fn new(index: usize) -> Option<Self> {
        (index < PROPS.len()).then_some(Self(index as u16))
    }

    /// All props in catalog (and shop) order.
    pub fn all() -> impl Iterator<Item = PropId> {
        (0..PROPS.len() as u16).map(PropId)
    }

    pub fn def(self) -> &'static PropDef {
        &PROPS[self.0 as usize]
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u16> for PropId {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        PropId::new(value as usize).ok_or_else(|| format!("unknown prop id {value}"))
    }
}

impl From<PropId> for u16 {
    fn from(id: PropId) -> u16 {
        id.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DinoKind {
    Herbivore,
    Carnivore,
    Pterosaur,
    Ichthyosaur,
}

#[derive(Debug)]
pub struct DinosaurDef {
    pub name: &'static str,
    pub image: ImageId,
    pub kind: DinoKind,

    /// Average minutes before it shows up once an attracting prop is placed.
    pub minutes_to_spawn: f32,

    /// Images of the props that attract it.
    pub attracted_by: &'static [ImageId],
}

const fn dino(
    name: &'static str,
    image: ImageId,
    kind: DinoKind,
    minutes_to_spawn: f32,
    attracted_by: &'static [ImageId],
) -> DinosaurDef {
    DinosaurDef { name, image, kind, minutes_to_spawn, attracted_by }
}

use DinoKind::*;

pub static DINOSAURS: [DinosaurDef; 24] = [
    dino("Ankylosaurus", ImageId::Ankylosaurus, Herbivore, 1.0, &[ImageId::Leaves]),
    dino("Ankylosaurus 2", ImageId::Ankylosaurus2, Herbivore, 3.0, &[ImageId::HerbBundle]),
    dino("Apatosaurus", ImageId::Apatosaurus, Herbivore, 5.0, &[ImageId::Leaves]),
    dino("Brachiosaurus", ImageId::Brachiosaurus, Herbivore, 10.0, &[ImageId::BerryBunch]),
    dino("Brachiosaurus 2", ImageId::Brachiosaurus2, Herbivore, 30.0, &[ImageId::BananaBunch]),
    dino("Carnotaurus", ImageId::Carnotaurus, Carnivore, 30.0, &[ImageId::Haunch]),
    dino("Dimorphodon", ImageId::Dimorphodon, Pterosaur, 10.0, &[ImageId::Meat]),
    dino("Pachycephalosaurus", ImageId::Pachycephalosaurus, Herbivore, 10.0, &[ImageId::BerryBunch]),
    dino("Parasaurolophus", ImageId::Parasaurolophus, Herbivore, 12.0, &[ImageId::BananaBunch]),
    dino("Parasaurolophus 2", ImageId::Parasaurolophus2, Herbivore, 50.0, &[ImageId::Leaves]),
    dino("Plesiosaurus", ImageId::Plesiosaurus, Ichthyosaur, 45.0, &[ImageId::Fish]),
    dino("Pliosaurus", ImageId::Pliosaurus, Ichthyosaur, 25.0, &[ImageId::Squid]),
    dino("Pteranodon", ImageId::Pteranodon, Pterosaur, 20.0, &[ImageId::DeadMouse]),
    dino("Spinosaurus", ImageId::Spinosaurus, Carnivore, 30.0, &[ImageId::Ham]),
    dino("Stegosaurus", ImageId::Stegosaurus, Herbivore, 5.0, &[ImageId::Leaves]),
    dino("Stegosaurus 2", ImageId::Stegosaurus2, Herbivore, 100.0, &[ImageId::HerbBundle]),
    dino("Stegosaurus 3", ImageId::Stegosaurus3, Herbivore, 200.0, &[ImageId::BerryBunch]),
    dino("Stygimoloch", ImageId::Stygimoloch, Herbivore, 120.0, &[ImageId::BananaBunch]),
    dino("Therizinosaurus", ImageId::Therizinosaurus, Carnivore, 45.0, &[ImageId::Urchin]),
    dino("Triceratops", ImageId::Triceratops, Herbivore, 10.0, &[ImageId::Leaves]),
    dino("Triceratops 2", ImageId::Triceratops2, Herbivore, 120.0, &[ImageId::BerryBunch]),
    dino("Tyrannosaurus", ImageId::Tyrannosaurus, Carnivore, 10.0, &[ImageId::Haunch]),
    dino("Utahceratops", ImageId::Utahceratops, Herbivore, 60.0, &[ImageId::BerryBunch]),
    dino("Velociraptor", ImageId::Velociraptor, Carnivore, 20.0, &[ImageId::Haunch]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prop_image_is_a_prop_asset() {
        for id in PropId::all() {
            assert!(id.def().image.path().starts_with("art/props/"), "{}", id.def().name);
        }
    }

    #[test]
    fn prop_id_rejects_out_of_range() {
        assert!(PropId::new(PROPS.len()).is_none());
        assert!(PropId::try_from(99u16).is_err());
        assert_eq!(PropId::try_from(2u16).map(|id| id.def().name), Ok("Fish"));
    }

    #[test]
    fn image_paths_are_unique() {
        let mut paths: Vec<_> = ImageId::ALL.iter().map(|id| id.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ImageId::COUNT);
    }
}
