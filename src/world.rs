//! Reference island field
//!
//! A minimal stand-in for the host's collision scene: every island is a flat disc at its
//! placement height. Good enough to run the simulation headless and to test landings.

use glam::Vec3;

use crate::sim::{ContactLayer, IslandPlacement, PrefabId, WorldQuery};

/// A placed island
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Island {
    pub prefab: PrefabId,
    /// Centre of the walkable top surface
    pub top: Vec3,
}

/// Disc islands that can be stood on and peeked over
#[derive(Debug, Clone)]
pub struct IslandField {
    islands: Vec<Island>,
    /// Walkable radius of every island
    pub radius: f32,
    /// Width of the border ring at the island rim
    pub border_width: f32,
}

impl Default for IslandField {
    fn default() -> Self {
        Self::new(12.0, 1.5)
    }
}

impl IslandField {
    pub fn new(radius: f32, border_width: f32) -> Self {
        Self {
            islands: Vec::new(),
            radius,
            border_width,
        }
    }

    pub fn place(&mut self, placement: IslandPlacement) {
        self.islands.push(Island {
            prefab: placement.prefab,
            top: placement.position,
        });
    }

    pub fn place_all(&mut self, placements: impl IntoIterator<Item = IslandPlacement>) {
        for placement in placements {
            self.place(placement);
        }
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
        let d = a - b;
        (d.x * d.x + d.z * d.z).sqrt()
    }
}

impl WorldQuery for IslandField {
    fn check_sphere(&self, center: Vec3, radius: f32, layer: ContactLayer) -> bool {
        self.islands.iter().any(|island| {
            if (center.y - island.top.y).abs() > radius {
                return false;
            }
            let d = Self::horizontal_distance(center, island.top);
            match layer {
                ContactLayer::Ground => d <= self.radius,
                ContactLayer::Border => d <= self.radius && d >= self.radius - self.border_width,
            }
        })
    }

    fn sweep(&self, from: Vec3, delta: Vec3) -> Vec3 {
        let to = from + delta;
        if delta.y >= 0.0 {
            return to;
        }

        // Stop on the highest island top crossed on the way down
        let landing = self
            .islands
            .iter()
            .filter(|island| {
                from.y >= island.top.y
                    && to.y < island.top.y
                    && Self::horizontal_distance(to, island.top) <= self.radius
            })
            .map(|island| island.top.y)
            .fold(None, |best: Option<f32>, y| Some(best.map_or(y, |b| b.max(y))));

        match landing {
            Some(y) => Vec3::new(to.x, y, to.z),
            None => to,
        }
    }
}
