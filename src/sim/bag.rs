//! Non-repeating island prefab bag
//!
//! Prefabs are drawn without replacement. When the bag runs dry it is refilled from the
//! master set, minus the prefab just drawn, so the same island never appears twice in a row.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of an island prefab owned by the scene collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabId(pub u32);

/// Draw-without-replacement pool over a fixed master set
#[derive(Debug, Clone)]
pub struct PrefabBag {
    master: Vec<PrefabId>,
    available: Vec<PrefabId>,
}

impl PrefabBag {
    /// Create a full bag. Returns `None` for an empty master set.
    pub fn new(master: Vec<PrefabId>) -> Option<Self> {
        if master.is_empty() {
            return None;
        }
        Some(Self {
            available: master.clone(),
            master,
        })
    }

    /// A fresh bag over the same master set
    pub fn refilled(&self) -> Self {
        Self {
            master: self.master.clone(),
            available: self.master.clone(),
        }
    }

    /// Prefabs still in the bag (order is unspecified)
    pub fn available(&self) -> &[PrefabId] {
        &self.available
    }

    pub fn master(&self) -> &[PrefabId] {
        &self.master
    }

    /// Draw a prefab uniformly from the bag, refilling it if this empties it
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PrefabId {
        let index = rng.random_range(0..self.available.len());
        let picked = self.available.swap_remove(index);
        if self.available.is_empty() {
            self.refill_excluding(picked);
        }
        picked
    }

    /// Refill from the master set, leaving out `excluded`.
    ///
    /// A single-prefab master set can't avoid repeating, so it refills with that prefab.
    pub fn refill_excluding(&mut self, excluded: PrefabId) {
        self.available.clear();
        self.available
            .extend(self.master.iter().copied().filter(|&id| id != excluded));
        if self.available.is_empty() {
            self.available.extend_from_slice(&self.master);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn ids(n: u32) -> Vec<PrefabId> {
        (0..n).map(PrefabId).collect()
    }

    #[test]
    fn test_empty_master_rejected() {
        assert!(PrefabBag::new(Vec::new()).is_none());
    }

    #[test]
    fn test_depletion_cycle_has_no_repeats() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut bag = PrefabBag::new(ids(6)).unwrap();
        let drawn: HashSet<_> = (0..6).map(|_| bag.take_random(&mut rng)).collect();
        assert_eq!(drawn.len(), 6);
    }

    #[test]
    fn test_refill_excludes_last_pick() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut bag = PrefabBag::new(ids(4)).unwrap();
        let mut last = PrefabId(0);
        for _ in 0..4 {
            last = bag.take_random(&mut rng);
        }
        assert_eq!(bag.available().len(), 3);
        assert!(!bag.available().contains(&last));
    }

    #[test]
    fn test_bag_never_left_empty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bag = PrefabBag::new(ids(3)).unwrap();
        for _ in 0..50 {
            bag.take_random(&mut rng);
            assert!(!bag.available().is_empty());
        }
    }

    #[test]
    fn test_single_prefab_master_repeats() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bag = PrefabBag::new(ids(1)).unwrap();
        assert_eq!(bag.take_random(&mut rng), PrefabId(0));
        assert_eq!(bag.take_random(&mut rng), PrefabId(0));
    }

    #[test]
    fn test_refilled_restores_master() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut bag = PrefabBag::new(ids(5)).unwrap();
        bag.take_random(&mut rng);
        bag.take_random(&mut rng);
        let fresh = bag.refilled();
        assert_eq!(fresh.available().len(), 5);
        assert_eq!(fresh.master(), bag.master());
    }

    proptest! {
        #[test]
        fn prop_no_immediate_repeat(seed in any::<u64>(), size in 2u32..12, draws in 1usize..80) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bag = PrefabBag::new(ids(size)).unwrap();
            let mut previous = None;
            for _ in 0..draws {
                let id = bag.take_random(&mut rng);
                prop_assert_ne!(Some(id), previous);
                previous = Some(id);
            }
        }

        #[test]
        fn prop_first_cycle_is_a_permutation(seed in any::<u64>(), size in 1u32..16) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut bag = PrefabBag::new(ids(size)).unwrap();
            let mut drawn: Vec<_> = (0..size).map(|_| bag.take_random(&mut rng)).collect();
            drawn.sort();
            prop_assert_eq!(drawn, ids(size));
        }
    }
}
