//! Procedural island generation
//!
//! Every time the player reaches a new depth, the gap between that depth and the height of
//! the last generated cluster decides whether a new cluster of islands is placed below them.
//! Cluster sizes follow a right-censored exponential distribution. Islands are spread over
//! concentric rings and a jittered vertical band so a cluster never stacks.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bag::{PrefabBag, PrefabId};
use crate::tuning::WorldTuning;
use crate::{height_of, xz_direction};

/// A request for the scene collaborator to instantiate an island
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IslandPlacement {
    pub prefab: PrefabId,
    pub position: Vec3,
}

/// Chance of generating a cluster for a given height delta
pub fn generation_chance(delta: i32, tuning: &WorldTuning) -> f32 {
    if delta > tuning.force_threshold {
        1.0
    } else if delta > tuning.min_threshold {
        1.0 - (delta as f32).powf(-1.0 / tuning.probability_falloff)
    } else {
        0.0
    }
}

/// Cluster size for an exponential sample `u` in (0, 1]
pub fn cluster_size(u: f32, max_cluster: u32) -> u32 {
    let f = -u.ln();
    let max = max_cluster as f32;
    if f >= max {
        max_cluster
    } else if f >= 1.0 {
        f as u32
    } else {
        1
    }
}

/// Uniform heading on the XZ plane
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    xz_direction(rng.random_range(0.0..std::f32::consts::TAU))
}

/// World generation state owned by the session
#[derive(Debug, Clone)]
pub struct IslandGenerator {
    /// Deepest integer height reached so far
    pub min_height: i32,
    /// Height the last cluster was generated for
    pub last_generation_height: i32,
    pub bag: PrefabBag,
}

impl IslandGenerator {
    pub fn new(bag: PrefabBag, start_height: i32) -> Self {
        Self {
            min_height: start_height,
            last_generation_height: start_height,
            bag,
        }
    }

    /// The starting island plus a staircase of islands beneath it
    pub fn seed_start<R: Rng + ?Sized>(
        &mut self,
        start: Vec3,
        rng: &mut R,
        tuning: &WorldTuning,
    ) -> Vec<IslandPlacement> {
        let mut placements = Vec::with_capacity(1 + tuning.starter_staircase as usize);
        placements.push(IslandPlacement {
            prefab: self.bag.take_random(rng),
            position: start,
        });

        for step in 1..=tuning.starter_staircase {
            let dir = random_direction(rng);
            let offset = Vec3::new(dir.x, -(step as f32), dir.z) * tuning.island_spacing;
            placements.push(IslandPlacement {
                prefab: self.bag.take_random(rng),
                position: start + offset,
            });
        }

        self.min_height = height_of(start);
        self.last_generation_height = height_of(start);
        placements
    }

    fn should_generate<R: Rng + ?Sized>(&self, rng: &mut R, tuning: &WorldTuning) -> bool {
        let delta = (self.min_height - self.last_generation_height).abs();
        let chance = generation_chance(delta, tuning);
        if chance >= 1.0 {
            true
        } else if chance <= 0.0 {
            false
        } else {
            rng.random::<f32>() < chance
        }
    }

    /// Feed the player's position; returns any islands to spawn this tick
    pub fn observe<R: Rng + ?Sized>(
        &mut self,
        player_position: Vec3,
        rng: &mut R,
        tuning: &WorldTuning,
    ) -> Vec<IslandPlacement> {
        let height = height_of(player_position);
        if height >= self.min_height {
            return Vec::new();
        }
        self.min_height = height;

        if !self.should_generate(rng, tuning) {
            return Vec::new();
        }

        // 1 - [0, 1) keeps the sample away from ln(0)
        let u = 1.0 - rng.random::<f32>();
        let count = cluster_size(u, tuning.max_cluster);
        let band = tuning.layer_band / count as f32;

        let mut placements = Vec::with_capacity(count as usize);
        for i in 1..=count {
            let prefab = self.bag.take_random(rng);
            let dir = random_direction(rng);
            let ring = (i - 1) as f32;
            let distance =
                rng.random_range(ring * tuning.island_spacing..(ring + 1.0) * tuning.island_spacing);
            let y = player_position.y - ring * band - rng.random_range(0.0..band) - tuning.drop_depth;

            let position = Vec3::new(
                player_position.x + dir.x * distance,
                y,
                player_position.z + dir.z * distance,
            );
            placements.push(IslandPlacement { prefab, position });

            self.last_generation_height = y as i32 + tuning.drop_depth as i32;
        }

        log::debug!(
            "Generated {} island(s) at depth {} (next trigger from {})",
            count,
            height,
            self.last_generation_height
        );
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn generator() -> IslandGenerator {
        let bag = PrefabBag::new((0..6).map(PrefabId).collect()).unwrap();
        IslandGenerator::new(bag, 0)
    }

    #[test]
    fn test_chance_thresholds() {
        let tuning = WorldTuning::default();
        assert_eq!(generation_chance(71, &tuning), 1.0);
        assert_eq!(generation_chance(10, &tuning), 0.0);
        assert_eq!(generation_chance(14, &tuning), 0.0);
        let at_40 = 1.0 - 40f32.powf(-1.0 / 35.0);
        assert!((generation_chance(40, &tuning) - at_40).abs() < 1e-6);
        // 70 is still probabilistic
        assert!(generation_chance(70, &tuning) < 1.0);
    }

    #[test]
    fn test_cluster_size_buckets() {
        assert_eq!(cluster_size(1.0, 3), 1);
        assert_eq!(cluster_size(0.5, 3), 1); // f ~ 0.69
        assert_eq!(cluster_size(0.3, 3), 1); // f ~ 1.20
        assert_eq!(cluster_size(0.1, 3), 2); // f ~ 2.30
        assert_eq!(cluster_size(0.01, 3), 3); // f ~ 4.6
        assert_eq!(cluster_size(f32::MIN_POSITIVE, 3), 3);
    }

    #[test]
    fn test_seed_start_staircase() {
        let tuning = WorldTuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut generator = generator();
        let start = Vec3::new(10.0, 50.0, -4.0);
        let placements = generator.seed_start(start, &mut rng, &tuning);

        assert_eq!(placements.len(), 5);
        assert_eq!(placements[0].position, start);
        for (k, placement) in placements.iter().enumerate().skip(1) {
            let offset = placement.position - start;
            assert!((offset.y + k as f32 * 35.0).abs() < 1e-3);
            let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
            assert!((horizontal - 35.0).abs() < 1e-3);
        }
        assert_eq!(generator.min_height, 50);
        assert_eq!(generator.last_generation_height, 50);
    }

    #[test]
    fn test_seed_start_prefabs_distinct_within_cycle() {
        let tuning = WorldTuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut generator = generator();
        let placements = generator.seed_start(Vec3::ZERO, &mut rng, &tuning);
        let mut prefabs: Vec<_> = placements.iter().map(|p| p.prefab).collect();
        prefabs.sort();
        prefabs.dedup();
        assert_eq!(prefabs.len(), 5);
    }

    #[test]
    fn test_small_drop_never_generates() {
        let tuning = WorldTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut generator = generator();
        for y in 1..=14 {
            let placed = generator.observe(Vec3::new(0.0, -(y as f32), 0.0), &mut rng, &tuning);
            assert!(placed.is_empty());
        }
        assert_eq!(generator.min_height, -14);
    }

    #[test]
    fn test_large_drop_always_generates_below_player() {
        let tuning = WorldTuning::default();
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut generator = generator();
            let player = Vec3::new(3.0, -71.5, 2.0);
            let placed = generator.observe(player, &mut rng, &tuning);
            assert!(!placed.is_empty() && placed.len() <= 3);

            let count = placed.len() as f32;
            for (idx, island) in placed.iter().enumerate() {
                let ring = idx as f32;
                let drop = player.y - island.position.y;
                assert!(drop >= 140.0 + ring * 14.0 / count - 1e-3);
                assert!(drop <= 140.0 + (ring + 1.0) * 14.0 / count + 1e-3);

                let dx = island.position.x - player.x;
                let dz = island.position.z - player.z;
                let distance = (dx * dx + dz * dz).sqrt();
                assert!(distance >= ring * 35.0 - 1e-3);
                assert!(distance <= (ring + 1.0) * 35.0 + 1e-3);
            }

            let last = placed.last().unwrap();
            assert_eq!(
                generator.last_generation_height,
                last.position.y as i32 + 140
            );
        }
    }

    #[test]
    fn test_revisited_heights_do_not_retrigger() {
        let tuning = WorldTuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut generator = generator();
        let deep = Vec3::new(0.0, -100.0, 0.0);
        assert!(!generator.observe(deep, &mut rng, &tuning).is_empty());

        generator.last_generation_height = 1000;
        assert!(generator.observe(deep, &mut rng, &tuning).is_empty());
        assert!(generator
            .observe(Vec3::new(0.0, -50.0, 0.0), &mut rng, &tuning)
            .is_empty());
        assert_eq!(generator.min_height, -100);
    }

    #[test]
    fn test_probabilistic_rate_matches_curve() {
        let tuning = WorldTuning::default();
        let mut rng = Pcg32::seed_from_u64(0xfeed);
        let trials = 20_000;
        let mut hits = 0;
        for _ in 0..trials {
            let mut generator = generator();
            if !generator
                .observe(Vec3::new(0.0, -40.0, 0.0), &mut rng, &tuning)
                .is_empty()
            {
                hits += 1;
            }
        }
        let expected = 1.0 - 40f32.powf(-1.0 / 35.0);
        let observed = hits as f32 / trials as f32;
        assert!(
            (observed - expected).abs() < 0.01,
            "observed {observed}, expected {expected}"
        );
    }

    proptest! {
        #[test]
        fn prop_min_height_only_decreases(seed in any::<u64>(), heights in proptest::collection::vec(-2000.0f32..100.0, 1..60)) {
            let tuning = WorldTuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut generator = generator();
            let mut previous = generator.min_height;
            for y in heights {
                let placed = generator.observe(Vec3::new(0.0, y, 0.0), &mut rng, &tuning);
                prop_assert!(generator.min_height <= previous);
                if generator.min_height == previous {
                    prop_assert!(placed.is_empty());
                }
                for island in &placed {
                    prop_assert!(island.position.y < y - 139.0);
                }
                previous = generator.min_height;
            }
        }
    }
}
