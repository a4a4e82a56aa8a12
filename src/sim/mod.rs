//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one shared source per session
//! - Collision geometry and presentation reached only through traits and event queues
//! - No rendering, audio or platform dependencies

pub mod bag;
pub mod contact;
pub mod events;
pub mod islands;
pub mod kinematics;
pub mod player;
pub mod state;
pub mod tick;

pub use bag::{PrefabBag, PrefabId};
pub use contact::{ContactLayer, ContactReading, ScriptedContact, WorldQuery};
pub use events::GameEvent;
pub use islands::{IslandGenerator, IslandPlacement, cluster_size, generation_chance};
pub use player::{fall_bonus, fall_multiplier, impact_damage};
pub use state::{GameState, MotionState, Player, RunMode, Vitals};
pub use tick::{TickInput, gate_input, tick};
