//! Command-driven engine
//!
//! The renderer never touches state directly. Frame ticks, clicks and
//! navigation all arrive as [`Command`]s and are applied strictly in arrival
//! order on one thread, so there is nothing to lock and every read after a
//! command sees its effects.

use serde::{Deserialize, Serialize};

use crate::ledger::PlayerStats;
use crate::minigame::{CollectOutcome, MunchieRound, RoundSummary, RoundView};
use crate::settings::{VibeSettings, VibeSettingsPatch};
use crate::store::{Phase, SessionStore, StoreChange, SubscriptionId};
use crate::strains::Strain;
use crate::tuning::Tuning;

/// Inputs from the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A rendered frame, `dt` seconds after the previous one
    Tick { dt: f32 },
    /// Menu / back buttons
    Navigate(Phase),
    /// Bong clicked in the room
    TakeHit,
    /// Fridge clicked in the room
    OpenMunchies,
    /// Food item clicked
    Collect(u32),
    /// Strain card clicked in the collection screen
    SelectStrain(String),
    /// "Play again" on the round summary
    RestartRound,
    /// "Back to sesh" on the round summary
    BackToSession,
    Screenshot(String),
    UpdateVibeSettings(VibeSettingsPatch),
    /// Wipe the session back to defaults
    ResetSession,
}

/// Everything the renderer reads each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub vibe_level: f64,
    pub trip_intensity: f64,
    pub current_strain: Option<Strain>,
    pub strains: Vec<Strain>,
    pub stats: PlayerStats,
    pub munchie_score: u64,
    pub vibe_settings: VibeSettings,
    pub screenshots: Vec<String>,
    pub round: Option<RoundView>,
    pub summary: Option<RoundSummary>,
}

/// Session engine: the store plus the live munchies round, if any
#[derive(Debug)]
pub struct Engine {
    store: SessionStore,
    round: Option<MunchieRound>,
    rounds_started: u64,
}

impl Engine {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Session started with seed: {}", seed);
        Self {
            store: SessionStore::new(seed, tuning),
            round: None,
            rounds_started: 0,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Register a store observer. Mutations still go through commands.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreChange) + 'static) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn round(&self) -> Option<&MunchieRound> {
        self.round.as_ref()
    }

    /// Apply one command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Tick { dt } => self.tick(dt),
            Command::Navigate(phase) => self.navigate(phase),
            Command::TakeHit => self.store.take_hit(),
            Command::OpenMunchies => self.navigate(Phase::Munchies),
            Command::Collect(id) => {
                self.collect(id);
            }
            Command::SelectStrain(id) => {
                self.store.set_current_strain(Some(&id));
            }
            Command::RestartRound => self.restart_round(),
            Command::BackToSession => self.back_to_session(),
            Command::Screenshot(url) => self.store.add_screenshot(url),
            Command::UpdateVibeSettings(patch) => self.store.set_vibe_settings(&patch),
            Command::ResetSession => self.reset(),
        }
    }

    /// Apply a batch of commands in order
    pub fn handle_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.handle(command);
        }
    }

    /// One rendered frame
    pub fn tick(&mut self, dt: f32) {
        // Negative and NaN deltas count as no time
        let dt = dt.max(0.0);

        // Meters only wear off while the room is on screen
        if self.store.phase() == Phase::Playing {
            self.store.decay_frame();
        }

        if let Some(round) = self.round.as_mut() {
            if round.advance(dt) {
                log::info!("Final score: {}", self.store.munchie_score());
            }
        }
    }

    pub fn navigate(&mut self, phase: Phase) {
        let from = self.store.phase();
        if from == Phase::Munchies && phase != Phase::Munchies {
            self.discard_round();
        }
        self.store.set_phase(phase);
        if phase == Phase::Munchies && self.round.is_none() {
            self.start_round();
        }
    }

    /// Eat a food item in the live round
    pub fn collect(&mut self, id: u32) -> Option<CollectOutcome> {
        self.round.as_mut()?.collect(id, &mut self.store)
    }

    fn start_round(&mut self) {
        self.rounds_started += 1;
        let seed = self
            .store
            .seed()
            .wrapping_add(self.rounds_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.round = Some(MunchieRound::start(&mut self.store, seed));
    }

    fn discard_round(&mut self) {
        if self.round.take().is_some() {
            log::debug!("Munchies round discarded");
        }
    }

    /// Summary of the live round once time is up
    pub fn summary(&self) -> Option<RoundSummary> {
        self.round.as_ref()?.summary(&self.store)
    }

    /// Cash in the ended round's XP and start a fresh one
    pub fn restart_round(&mut self) {
        let Some(summary) = self.summary() else {
            log::debug!("Restart ignored: no finished round");
            return;
        };
        self.store.grant_xp(summary.xp_reward);
        self.start_round();
    }

    /// Cash in the ended round's XP and head back to the room
    pub fn back_to_session(&mut self) {
        let Some(summary) = self.summary() else {
            log::debug!("Back to session ignored: no finished round");
            return;
        };
        self.store.grant_xp(summary.xp_reward);
        self.navigate(Phase::Playing);
    }

    /// Back to session defaults
    pub fn reset(&mut self) {
        self.discard_round();
        self.rounds_started = 0;
        self.store.reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.store.phase(),
            vibe_level: self.store.vibe_level(),
            trip_intensity: self.store.trip_intensity(),
            current_strain: self.store.current_strain().cloned(),
            strains: self.store.strains().to_vec(),
            stats: self.store.stats().clone(),
            munchie_score: self.store.munchie_score(),
            vibe_settings: *self.store.vibe_settings(),
            screenshots: self.store.screenshots().to_vec(),
            round: self.round.as_ref().map(MunchieRound::view),
            summary: self.summary(),
        }
    }
}
