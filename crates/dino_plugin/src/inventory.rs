// crates/dino_plugin/src/inventory.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::PropId;

/// How many of each prop the player owns. Props with a zero count are not stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: BTreeMap<PropId, u32>,
}

impl Inventory {
    pub fn count(&self, prop: PropId) -> u32 {
        self.counts.get(&prop).copied().unwrap_or(0)
    }

    pub fn add(&mut self, prop: PropId, n: u32) {
        if n > 0 {
            *self.counts.entry(prop).or_insert(0) += n;
        }
    }

    /// Removes one unit and returns how many are left, or `None` if there was none.
    pub fn take_one(&mut self, prop: PropId) -> Option<u32> {
        let count = self.counts.get_mut(&prop)?;
        *count -= 1;
        let left = *count;
        if left == 0 {
            self.counts.remove(&prop);
        }
        Some(left)
    }

    /// Owned props in catalog order.
    pub fn stocked(&self) -> impl Iterator<Item = (PropId, u32)> + '_ {
        self.counts.iter().map(|(&id, &n)| (id, n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(i: usize) -> PropId {
        PropId::new(i).expect("catalog prop")
    }

    #[test]
    fn take_stops_at_zero() {
        let mut inv = Inventory::default();
        inv.add(prop(3), 2);
        assert_eq!(inv.take_one(prop(3)), Some(1));
        assert_eq!(inv.take_one(prop(3)), Some(0));
        assert_eq!(inv.take_one(prop(3)), None);
        assert_eq!(inv.count(prop(3)), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn stocked_is_in_catalog_order() {
        let mut inv = Inventory::default();
        inv.add(prop(7), 1);
        inv.add(prop(1), 4);
        inv.add(prop(5), 0);
        let listed: Vec<_> = inv.stocked().collect();
        assert_eq!(listed, vec![(prop(1), 4), (prop(7), 1)]);
    }
}
