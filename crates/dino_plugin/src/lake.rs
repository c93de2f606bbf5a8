// crates/dino_plugin/src/lake.rs
//! Hand-fitted outline of the lake in the background art.
//!
//! Coordinates are background-relative: `(0,0)` top-left, `(1,1)` bottom-right.
//! The lake sits in the lower-left of the scene; the constants trace the shore
//! of the painted background and must stay in sync with it.

/// Everything at or right of this x is land.
const EAST_SHORE: f32 = 0.39;

/// Rows above this are tested against the far (north) shore, rows below against the near one.
const SPLIT_Y: f32 = 0.68;

/// North shore: `(x_start, x_end, y_at_start, y_at_end)`, checked left to right.
/// Water lies *below* (greater y than) the shore line.
const NORTH_SHORE: [(f32, f32, f32, f32); 4] = [
    (0.00, 0.09, 0.48, 0.45),
    (0.09, 0.13, 0.45, 0.52),
    (0.13, 0.33, 0.52, 0.55),
    (0.33, 0.39, 0.55, 0.68),
];

/// South shore; water lies *above* (smaller y than) the shore line.
const SOUTH_SHORE: [(f32, f32, f32, f32); 2] = [
    (0.00, 0.22, 0.88, 0.88),
    (0.22, 0.39, 0.90, 0.74),
];

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Shore height at `x` for a segment list. Segments are half-open `[start, end)`,
/// so a breakpoint belongs to the segment that starts there.
fn shore_y(segments: &[(f32, f32, f32, f32)], x: f32) -> Option<f32> {
    segments
        .iter()
        .find(|(x0, x1, _, _)| x >= *x0 && x < *x1)
        .map(|&(x0, x1, y0, y1)| lerp(y0, y1, (x - x0) / (x1 - x0)))
}

/// True if the background-relative point `(x, y)` is water.
pub fn in_lake(x: f32, y: f32) -> bool {
    if !(0.0..EAST_SHORE).contains(&x) {
        return false;
    }

    if y < SPLIT_Y {
        shore_y(&NORTH_SHORE, x).is_some_and(|shore| y > shore)
    } else {
        shore_y(&SOUTH_SHORE, x).is_some_and(|shore| y < shore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_basin_is_water() {
        // Shore here is ~0.463; 0.50 is well inside.
        assert!(in_lake(0.05, 0.50));
        assert!(in_lake(0.20, 0.75));
    }

    #[test]
    fn east_of_the_shore_is_always_land() {
        for y in [0.0, 0.4, 0.5, 0.6, 0.7, 0.8, 0.95, 1.0] {
            assert!(!in_lake(0.39, y));
            assert!(!in_lake(0.50, y));
            assert!(!in_lake(0.99, y));
        }
    }

    #[test]
    fn above_the_north_shore_is_land() {
        let mut x = 0.0;
        while x < EAST_SHORE {
            let shore = shore_y(&NORTH_SHORE, x).expect("covered");
            assert!(!in_lake(x, shore - 0.01), "x = {x}");
            x += 0.01;
        }
    }

    #[test]
    fn below_the_south_shore_is_land() {
        assert!(!in_lake(0.10, 0.90));
        assert!(!in_lake(0.30, 0.90));
    }

    #[test]
    fn breakpoints_use_the_segment_starting_there() {
        // At x = 0.09 the second segment starts at 0.45.
        assert_eq!(shore_y(&NORTH_SHORE, 0.09), Some(0.45));
        assert_eq!(shore_y(&NORTH_SHORE, 0.13), Some(0.52));
        assert_eq!(shore_y(&SOUTH_SHORE, 0.22), Some(0.90));
        assert!(in_lake(0.09, 0.46));
    }
}
