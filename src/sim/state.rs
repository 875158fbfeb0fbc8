//! Game state and the routing between gameplay components
//!
//! `GameState` owns the one squid, the one pollution meter, the spawner and
//! every trash item. Components never call each other; every signal goes
//! through a method here, which applies the reactions in a fixed order and
//! appends the signal to the event log.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::contact::{Contact, DetectorId, Interaction, classify};
use super::events::{GameEvent, SceneRequest};
use super::pollution::Pollution;
use super::spawner::{SpawnOrder, SpawnerConfig, TrashSpawner};
use super::squid::{Squid, SquidConfig};
use super::trash::{Trash, TrashConfig, TrashId, TrashState};
use crate::consts::{SQUID_START_X, SQUID_START_Y};
use crate::tuning::Tuning;

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Pollution saturated; only a restart does anything
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub squid: Squid,
    /// All trash ever spawned this round (sorted by id)
    pub trash: Vec<Trash>,
    pub spawner: TrashSpawner,
    pub pollution: Pollution,
    /// Config given to newly spawned trash
    pub trash_config: TrashConfig,
    /// Events raised since the host last called `take_events`
    pub events: Vec<GameEvent>,
    /// Scene change the host hasn't picked up yet
    pub pending_scene: Option<SceneRequest>,
    next_id: u32,
}

/// The squid's only pickup detector
pub const SQUID_DETECTOR: DetectorId = DetectorId(0);

impl GameState {
    /// New round with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_configs(
            seed,
            SquidConfig::default(),
            TrashConfig::default(),
            SpawnerConfig::default(),
        )
    }

    /// New round with the given tuning
    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        Self::with_configs(seed, tuning.squid, tuning.trash, tuning.spawner)
    }

    fn with_configs(
        seed: u64,
        squid: SquidConfig,
        trash: TrashConfig,
        spawner: SpawnerConfig,
    ) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            squid: Squid::new(Vec2::new(SQUID_START_X, SQUID_START_Y), SQUID_DETECTOR, squid),
            trash: Vec::new(),
            spawner: TrashSpawner::new(spawner),
            pollution: Pollution::new(),
            trash_config: trash,
            events: Vec::new(),
            pending_scene: None,
            next_id: 1,
        };
        state.start_round();
        state
    }

    fn start_round(&mut self) {
        log::info!("Round started (seed {})", self.seed);
        self.events.push(GameEvent::RoundStarted { seed: self.seed });
        let change = self.pollution.reset();
        self.events.push(GameEvent::PollutionSet { level: change.level });
    }

    /// Throw the round away and start a fresh one with the same tuning
    pub fn restart(&mut self) {
        let seed = self.rng.next_u64();
        let mut events = std::mem::take(&mut self.events);
        events.push(GameEvent::SceneRequested(SceneRequest::Reload));

        let mut fresh =
            Self::with_configs(seed, self.squid.config, self.trash_config, self.spawner.config);
        events.append(&mut fresh.events);
        fresh.events = events;
        fresh.pending_scene = Some(SceneRequest::Reload);
        *self = fresh;
    }

    /// Update squid, trash and spawner constants in place
    pub fn apply_tuning(&mut self, tuning: &Tuning) {
        self.squid.config = tuning.squid;
        self.trash_config = tuning.trash;
        for trash in &mut self.trash {
            trash.config = tuning.trash;
        }
        self.spawner.reconfigure(tuning.spawner);
    }

    /// Allocate a new entity ID
    fn next_trash_id(&mut self) -> TrashId {
        let id = TrashId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Hand the frame's events to the host
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand a pending scene request to the host
    pub fn take_scene_request(&mut self) -> Option<SceneRequest> {
        self.pending_scene.take()
    }

    pub fn trash(&self, id: TrashId) -> Option<&Trash> {
        let idx = self.trash.binary_search_by_key(&id, |t| t.id).ok()?;
        self.trash.get(idx)
    }

    fn trash_mut(&mut self, id: TrashId) -> Option<&mut Trash> {
        let idx = self.trash.binary_search_by_key(&id, |t| t.id).ok()?;
        self.trash.get_mut(idx)
    }

    /// Number of trash items currently in a given lifecycle state
    pub fn count_where(&self, pred: impl Fn(&TrashState) -> bool) -> usize {
        self.trash.iter().filter(|t| pred(&t.state)).count()
    }

    /// Advance the spawner and roll this step's spawns
    pub(crate) fn due_spawns(&mut self, dt: f32) -> Vec<SpawnOrder> {
        self.spawner.tick(dt, &mut self.rng)
    }

    // --- Signals ---------------------------------------------------------

    /// Spawner fired: create the item, then pollution +1
    pub fn spawn_trash(&mut self, order: SpawnOrder) -> TrashId {
        let id = self.next_trash_id();
        self.trash
            .push(Trash::new(id, order.variant, order.pos, self.trash_config));
        log::debug!("Spawned {} (variant {}) at x={:.1}", id, order.variant.0, order.pos.x);

        self.events.push(GameEvent::TrashSpawned {
            trash: id,
            variant: order.variant,
            pos: order.pos,
        });
        self.adjust_pollution(1);
        id
    }

    /// Apply a pollution delta and announce the new level
    pub fn adjust_pollution(&mut self, delta: i32) {
        let change = self.pollution.adjust(delta);
        log::debug!("Pollution {:+} -> {}", delta, change.level);
        self.events.push(GameEvent::PollutionSet { level: change.level });

        if change.triggered_loss {
            log::info!("Pollution saturated, round lost");
            self.events.push(GameEvent::SceneRequested(SceneRequest::Loss));
            self.pending_scene = Some(SceneRequest::Loss);
        }
    }

    /// Route a host-reported contact
    pub fn handle_contact(&mut self, contact: &Contact) {
        match classify(contact) {
            Some(Interaction::DetectorOverlap { detector, trash }) => {
                self.offer_pickup(detector, trash);
            }
            Some(Interaction::BoatHit { trash }) => {
                self.deliver_trash(trash);
            }
            None => {}
        }
    }

    /// Trash entered a detector. The item checks its own eligibility first,
    /// then the squid decides whether it takes it.
    pub fn offer_pickup(&mut self, detector: DetectorId, id: TrashId) -> bool {
        let Some(trash) = self.trash(id) else {
            log::trace!("Pickup offer for unknown {}", id);
            return false;
        };
        if !trash.can_be_picked_up() {
            log::trace!("{} not pickable ({})", id, trash.state.name());
            return false;
        }
        if !self.squid.accepts_pickup(detector) {
            log::trace!("Squid refused {} (pickup gate closed)", id);
            return false;
        }

        let at = self.squid.detector_position();
        let rotation = self.squid.body.rotation;
        let Some(trash) = self.trash_mut(id) else {
            return false;
        };
        if !trash.attach(at) {
            return false;
        }
        trash.body.rotation = rotation;
        self.squid.push_carried(id);
        log::debug!("Picked up {} ({} carried)", id, self.squid.carried().len());
        self.events.push(GameEvent::TrashPickedUp { trash: id });
        true
    }

    /// Let go of everything the squid carries, then close the pickup gate
    pub fn drop_all_trash(&mut self) {
        let carried = self.squid.take_carried();
        for id in carried {
            let impulse = self.squid.drop_impulse();
            let Some(trash) = self.trash_mut(id) else {
                continue;
            };
            if trash.detach(impulse) {
                log::debug!("Dropped {} with impulse {:?}", id, impulse);
                self.events.push(GameEvent::TrashDropped { trash: id, impulse });
            }
        }
        self.squid.close_pickup_gate();
    }

    /// Trash hit the boat: lock it in, then pollution -1
    pub fn deliver_trash(&mut self, id: TrashId) -> bool {
        let Some(trash) = self.trash_mut(id) else {
            return false;
        };
        if !trash.deliver() {
            log::trace!("Ignored boat hit for {} ({})", id, trash.state.name());
            return false;
        }
        log::debug!("Delivered {}", id);
        self.events.push(GameEvent::TrashDelivered { trash: id });
        self.adjust_pollution(-1);
        true
    }

    /// Keep carried trash pinned to the detector
    pub(crate) fn update_carried(&mut self) {
        let at = self.squid.detector_position();
        let rotation = self.squid.body.rotation;
        for trash in &mut self.trash {
            if trash.state == TrashState::PickedUp {
                trash.follow(at, rotation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trash::TrashVariant;

    fn order(x: f32) -> SpawnOrder {
        SpawnOrder {
            variant: TrashVariant(0),
            pos: Vec2::new(x, 0.0),
        }
    }

    #[test]
    fn test_new_round_announces_zero() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.pollution.level(), 0);
        assert_eq!(
            state.events,
            vec![
                GameEvent::RoundStarted { seed: 1 },
                GameEvent::PollutionSet { level: 0 }
            ]
        );
    }

    #[test]
    fn test_spawn_raises_pollution() {
        let mut state = GameState::new(1);
        state.take_events();

        let id = state.spawn_trash(order(3.0));
        assert_eq!(state.pollution.level(), 1);
        assert_eq!(state.trash(id).map(|t| t.state), Some(TrashState::Free));

        let events = state.take_events();
        assert!(matches!(events[0], GameEvent::TrashSpawned { trash, .. } if trash == id));
        assert_eq!(events[1], GameEvent::PollutionSet { level: 1 });
    }

    #[test]
    fn test_pickup_and_drop_all() {
        let mut state = GameState::new(1);
        let a = state.spawn_trash(order(0.0));
        let b = state.spawn_trash(order(1.0));

        assert!(state.offer_pickup(SQUID_DETECTOR, a));
        assert!(state.offer_pickup(SQUID_DETECTOR, b));
        assert_eq!(state.squid.carried(), &[a, b]);

        let at = state.squid.detector_position();
        let carried = state.trash(a).map(|t| (t.body.simulated, t.body.pos));
        assert_eq!(carried, Some((false, at)));

        state.take_events();
        state.drop_all_trash();
        assert!(state.squid.carried().is_empty());
        assert!(!state.squid.can_pick_up);

        let events = state.take_events();
        let dropped: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::TrashDropped { trash, .. } => Some(*trash),
                _ => None,
            })
            .collect();
        assert_eq!(dropped, vec![a, b]);
        for id in [a, b] {
            let trash = state.trash(id).map(|t| (t.body.simulated, t.can_be_picked_up()));
            assert_eq!(trash, Some((true, false)));
        }
    }

    #[test]
    fn test_pickup_rejected_by_other_detector_or_closed_gate() {
        let mut state = GameState::new(1);
        let id = state.spawn_trash(order(0.0));

        assert!(!state.offer_pickup(DetectorId(9), id));
        state.drop_all_trash();
        assert!(!state.offer_pickup(SQUID_DETECTOR, id));
        assert_eq!(state.trash(id).map(|t| t.state), Some(TrashState::Free));
        assert!(!state.offer_pickup(SQUID_DETECTOR, TrashId(999)));
    }

    #[test]
    fn test_delivery_lowers_pollution_once() {
        let mut state = GameState::new(1);
        let id = state.spawn_trash(order(0.0));
        state.spawn_trash(order(1.0));
        assert_eq!(state.pollution.level(), 2);

        assert!(state.deliver_trash(id));
        assert_eq!(state.pollution.level(), 1);
        assert!(!state.deliver_trash(id));
        assert_eq!(state.pollution.level(), 1);
        assert!(!state.offer_pickup(SQUID_DETECTOR, id));
    }

    #[test]
    fn test_carried_trash_cannot_be_delivered() {
        let mut state = GameState::new(1);
        let id = state.spawn_trash(order(0.0));
        state.offer_pickup(SQUID_DETECTOR, id);

        assert!(!state.deliver_trash(id));
        assert_eq!(state.pollution.level(), 1);
        assert_eq!(state.trash(id).map(|t| t.state), Some(TrashState::PickedUp));
    }

    #[test]
    fn test_loss_requested_once() {
        let mut state = GameState::new(1);
        state.pollution.set(99);
        state.take_events();

        state.adjust_pollution(1);
        state.adjust_pollution(1);
        assert_eq!(state.pollution.level(), 100);

        let losses = state
            .take_events()
            .iter()
            .filter(|e| **e == GameEvent::SceneRequested(SceneRequest::Loss))
            .count();
        assert_eq!(losses, 1);
        assert_eq!(state.take_scene_request(), Some(SceneRequest::Loss));
        assert_eq!(state.take_scene_request(), None);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut state = GameState::new(5);
        state.spawn_trash(order(0.0));
        state.squid.config.torque = 7.0;
        state.take_events();

        state.restart();
        assert!(state.trash.is_empty());
        assert_eq!(state.pollution.level(), 0);
        assert_eq!(state.squid.config.torque, 7.0);
        assert_eq!(state.pending_scene, Some(SceneRequest::Reload));
        assert_eq!(state.events[0], GameEvent::SceneRequested(SceneRequest::Reload));
        assert!(state.events.contains(&GameEvent::PollutionSet { level: 0 }));
    }
}
