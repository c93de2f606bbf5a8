// crates/dino_plugin/src/depth.rs
//! Fake occlusion: props are bucketed by how far down the scene they stand and
//! drawn between the matching background layers.

/// y at which a prop moves to the next layer towards the viewer.
const LAYER_THRESHOLDS: [f32; 3] = [0.45, 0.52, 0.82];

/// One of the four prop layers. Layer `n` is drawn after background image `n`
/// and before background image `n + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DepthLayer(u8);

impl DepthLayer {
    pub const COUNT: usize = LAYER_THRESHOLDS.len() + 1;

    pub fn from_y(y: f32) -> Self {
        let n = LAYER_THRESHOLDS.iter().filter(|&&t| y >= t).count();
        Self(n as u8)
    }

    pub fn all() -> impl Iterator<Item = DepthLayer> {
        (0..Self::COUNT as u8).map(DepthLayer)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(DepthLayer::from_y(0.0).index(), 0);
        assert_eq!(DepthLayer::from_y(0.4499).index(), 0);
        assert_eq!(DepthLayer::from_y(0.45).index(), 1);
        assert_eq!(DepthLayer::from_y(0.52).index(), 2);
        assert_eq!(DepthLayer::from_y(0.81).index(), 2);
        assert_eq!(DepthLayer::from_y(0.82).index(), 3);
        assert_eq!(DepthLayer::from_y(1.0).index(), 3);
    }

    #[test]
    fn closer_never_draws_behind() {
        let mut last = DepthLayer::from_y(0.0);
        for i in 0..=1000 {
            let layer = DepthLayer::from_y(i as f32 / 1000.0);
            assert!(layer >= last);
            last = layer;
        }
        assert_eq!(DepthLayer::all().count(), 4);
    }
}
