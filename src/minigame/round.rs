//! Munchies round state machine
//!
//! Active -> Ended. The round owns its clock, advanced by frame deltas, so
//! the countdown, combo window and replacement delay all read one timeline
//! and replay identically for a given seed and input sequence.
//!
//! The clock takes whole frame deltas, so the countdown tracks real seconds
//! even at low frame rates. Only the fall step is capped at `max_frame_dt`.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::{FoodItem, INITIAL_BAND, REPLACEMENT_BAND};
use crate::store::SessionStore;
use crate::tuning::Tuning;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundState {
    /// Timer running, food falling
    Active,
    /// Time's up; only a restart leaves this state
    Ended,
}

/// Result of a successful collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOutcome {
    pub id: u32,
    /// Points actually awarded (combo applied)
    pub points: u64,
    /// Combo after this collection
    pub combo: u32,
}

/// End-of-round summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub final_score: u64,
    /// XP granted when the player leaves the summary
    pub xp_reward: u64,
}

impl RoundSummary {
    pub fn new(final_score: u64) -> Self {
        Self {
            final_score,
            xp_reward: final_score / 2,
        }
    }
}

/// Renderer-facing view of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub state: RoundState,
    pub time_left: u32,
    pub combo: u32,
    pub items: Vec<FoodItem>,
}

/// One timed munchies round
#[derive(Debug, Clone)]
pub struct MunchieRound {
    state: RoundState,
    time_left: u32,
    combo: u32,
    items: Vec<FoodItem>,
    /// Seconds since round start
    clock: f64,
    /// Time banked toward the next countdown second
    second_accum: f64,
    last_collect: Option<f64>,
    /// Due times of scheduled replacements (ascending)
    pending_replacements: VecDeque<f64>,
    next_id: u32,
    rng: Pcg32,
    tuning: Tuning,
}

impl MunchieRound {
    /// Start a fresh round: zero the store's score and drop the first batch
    pub fn start(store: &mut SessionStore, seed: u64) -> Self {
        let tuning = store.tuning().clone();
        let mut round = Self {
            state: RoundState::Active,
            time_left: tuning.round_seconds,
            combo: 0,
            items: Vec::with_capacity(tuning.initial_food_count + 1),
            clock: 0.0,
            second_accum: 0.0,
            last_collect: None,
            pending_replacements: VecDeque::new(),
            next_id: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        store.reset_munchie_score();
        for _ in 0..round.tuning.initial_food_count {
            let id = round.next_item_id();
            let item = FoodItem::spawn(id, &INITIAL_BAND, &mut round.rng);
            round.items.push(item);
        }

        // A zero-length round is over before it starts
        if round.time_left == 0 {
            round.state = RoundState::Ended;
        }

        log::info!(
            "Munchies round started: {}s, {} items",
            round.time_left,
            round.items.len()
        );
        round
    }

    fn next_item_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RoundState::Active
    }

    pub fn is_ended(&self) -> bool {
        self.state == RoundState::Ended
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn item(&self, id: u32) -> Option<&FoodItem> {
        self.items.iter().find(|f| f.id == id)
    }

    /// Summary once the round is over
    pub fn summary(&self, store: &SessionStore) -> Option<RoundSummary> {
        self.is_ended()
            .then(|| RoundSummary::new(store.munchie_score()))
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            state: self.state,
            time_left: self.time_left,
            combo: self.combo,
            items: self.items.clone(),
        }
    }

    /// Advance the round by `dt` seconds. Returns true on the frame the timer
    /// runs out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_active() || dt <= 0.0 {
            return false;
        }

        self.clock += dt as f64;

        let step = dt.min(self.tuning.max_frame_dt);
        for item in &mut self.items {
            item.fall(step, &mut self.rng);
        }

        while self
            .pending_replacements
            .front()
            .is_some_and(|&due| due <= self.clock)
        {
            self.pending_replacements.pop_front();
            self.replace_collected();
        }

        self.second_accum += dt as f64;
        while self.second_accum >= 1.0 {
            self.second_accum -= 1.0;
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.end();
                return true;
            }
        }

        false
    }

    /// Sweep eaten items and drop in one replacement
    fn replace_collected(&mut self) {
        self.items.retain(|f| !f.collected);
        let id = self.next_item_id();
        let item = FoodItem::spawn(id, &REPLACEMENT_BAND, &mut self.rng);
        self.items.push(item);
    }

    fn end(&mut self) {
        self.state = RoundState::Ended;
        self.second_accum = 0.0;
        self.pending_replacements.clear();
        log::info!("Munchies over! Combo at end: {}", self.combo);
    }

    /// Eat the item with `id`, scoring through the store.
    ///
    /// Unknown ids, already-eaten items and collections after time's up are
    /// ignored.
    pub fn collect(&mut self, id: u32, store: &mut SessionStore) -> Option<CollectOutcome> {
        if !self.is_active() {
            log::debug!("Ignoring collect of {} after round end", id);
            return None;
        }
        let index = self.items.iter().position(|f| f.id == id && !f.collected)?;

        self.combo = match self.last_collect {
            Some(last) if self.clock - last < self.tuning.combo_window => {
                (self.combo + 1).min(self.tuning.combo_cap)
            }
            _ => 0,
        };
        self.last_collect = Some(self.clock);

        let item = &mut self.items[index];
        let points = self.tuning.combo_points(item.points, self.combo);
        item.collected = true;

        store.set_munchie_score(store.munchie_score() + points);
        store.add_munchies_eaten(1);

        self.pending_replacements
            .push_back(self.clock + self.tuning.respawn_delay);

        log::debug!(
            "Ate {:?} #{} for {} points (combo x{})",
            self.items[index].kind,
            id,
            points,
            self.combo
        );

        Some(CollectOutcome {
            id,
            points,
            combo: self.combo,
        })
    }
}
