//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics integration or platform dependencies

pub mod body;
pub mod contact;
pub mod events;
pub mod medium;
pub mod pollution;
pub mod spawner;
pub mod squid;
pub mod state;
pub mod tick;
pub mod timer;
pub mod trash;

pub use body::{Body, BodyCommands};
pub use contact::{Contact, ContactKind, DetectorId, Interaction, Participant, classify};
pub use events::{EventBus, EventSink, GameEvent, SceneRequest, SinkId};
pub use medium::{DualMediumProfile, Medium, MediumProfile, is_submerged};
pub use pollution::{Pollution, PollutionChange};
pub use spawner::{SpawnOrder, SpawnerConfig, TrashSpawner};
pub use squid::{Squid, SquidConfig, ThrustPolicy};
pub use state::{GamePhase, GameState, SQUID_DETECTOR};
pub use tick::{TickInput, tick};
pub use timer::{Countdown, Repeating};
pub use trash::{Trash, TrashConfig, TrashId, TrashState, TrashVariant};
