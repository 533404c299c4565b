//! Session state store
//!
//! The one piece of mutable shared state. Owns the progress ledger, the
//! transient meters and the current screen, and tells observers about every
//! change synchronously, before the mutating call returns.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ledger::{PlayerStats, ProgressLedger, XpGrant};
use crate::settings::{VibeSettings, VibeSettingsPatch};
use crate::strains::{DEFAULT_STRAIN_ID, Strain};
use crate::tuning::Tuning;
use crate::clamp_meter;

/// Top-level screen. Any phase may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Menu,
    /// The chill room
    Playing,
    Munchies,
    Gallery,
    Collection,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Menu,
        Phase::Playing,
        Phase::Munchies,
        Phase::Gallery,
        Phase::Collection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Munchies => "munchies",
            Phase::Gallery => "gallery",
            Phase::Collection => "collection",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// A change notification, carrying the new value
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Phase(Phase),
    VibeLevel(f64),
    TripIntensity(f64),
    CurrentStrain(Option<String>),
    StrainUnlocked(String),
    Stats(PlayerStats),
    MunchieScore(u64),
    VibeSettings(VibeSettings),
    Screenshot(String),
    /// Everything went back to defaults
    Reset,
}

/// Handle returned by [`SessionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Observer = Box<dyn FnMut(&StoreChange)>;

/// Session state with observer registry
pub struct SessionStore {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    ledger: ProgressLedger,
    phase: Phase,
    vibe_level: f64,
    trip_intensity: f64,
    current_strain: Option<String>,
    munchie_score: u64,
    screenshots: Vec<String>,
    vibe_settings: VibeSettings,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u32,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("phase", &self.phase)
            .field("vibe_level", &self.vibe_level)
            .field("trip_intensity", &self.trip_intensity)
            .field("current_strain", &self.current_strain)
            .field("munchie_score", &self.munchie_score)
            .field("stats", self.ledger.stats())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SessionStore {
    /// Create a store with session defaults
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            ledger: ProgressLedger::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Menu,
            vibe_level: 0.0,
            trip_intensity: 0.0,
            current_strain: Some(DEFAULT_STRAIN_ID.to_string()),
            munchie_score: 0,
            screenshots: Vec::new(),
            vibe_settings: VibeSettings::default(),
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Put every field back to its session default. Observers stay registered.
    pub fn reset(&mut self) {
        let observers = std::mem::take(&mut self.observers);
        let next_subscription = self.next_subscription;
        *self = Self::new(self.seed, self.tuning.clone());
        self.observers = observers;
        self.next_subscription = next_subscription;
        log::info!("Session reset");
        self.emit(StoreChange::Reset);
    }

    // === Observers ===

    /// Register a callback that runs after every change
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn emit(&mut self, change: StoreChange) {
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
    }

    fn emit_stats(&mut self) {
        let stats = self.ledger.stats().clone();
        self.emit(StoreChange::Stats(stats));
    }

    // === Reads ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn vibe_level(&self) -> f64 {
        self.vibe_level
    }

    pub fn trip_intensity(&self) -> f64 {
        self.trip_intensity
    }

    pub fn current_strain_id(&self) -> Option<&str> {
        self.current_strain.as_deref()
    }

    pub fn current_strain(&self) -> Option<&Strain> {
        self.current_strain
            .as_deref()
            .and_then(|id| self.ledger.strain(id))
    }

    pub fn munchie_score(&self) -> u64 {
        self.munchie_score
    }

    pub fn screenshots(&self) -> &[String] {
        &self.screenshots
    }

    pub fn vibe_settings(&self) -> &VibeSettings {
        &self.vibe_settings
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    pub fn stats(&self) -> &PlayerStats {
        self.ledger.stats()
    }

    pub fn strains(&self) -> &[Strain] {
        self.ledger.strains()
    }

    // === Writes ===

    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("Phase: {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
            self.emit(StoreChange::Phase(phase));
        }
    }

    /// Set the vibe meter, clamped to `[0, 100]`
    pub fn set_vibe_level(&mut self, level: f64) {
        let level = clamp_meter(level, VIBE_MAX);
        if self.vibe_level != level {
            self.vibe_level = level;
            self.emit(StoreChange::VibeLevel(level));
        }
    }

    /// Set trip intensity, clamped to `[0, 1]`
    pub fn set_trip_intensity(&mut self, intensity: f64) {
        let intensity = clamp_meter(intensity, TRIP_MAX);
        if self.trip_intensity != intensity {
            self.trip_intensity = intensity;
            self.emit(StoreChange::TripIntensity(intensity));
        }
    }

    /// Pick the active strain. Locked or unknown strains are refused.
    pub fn set_current_strain(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if !self.ledger.is_unlocked(id) {
                log::debug!("Refusing to select locked or unknown strain '{}'", id);
                return false;
            }
        }
        if self.current_strain.as_deref() != id {
            self.current_strain = id.map(str::to_string);
            self.emit(StoreChange::CurrentStrain(self.current_strain.clone()));
        }
        true
    }

    pub fn unlock_strain(&mut self, id: &str) {
        if self.ledger.unlock_strain(id) {
            self.emit(StoreChange::StrainUnlocked(id.to_string()));
            self.emit_stats();
        }
    }

    /// Grant XP through the ledger using the session generator
    pub fn grant_xp(&mut self, amount: u64) -> XpGrant {
        let grant = self.ledger.grant_xp(amount, &mut self.rng);
        for id in &grant.unlocked {
            self.emit(StoreChange::StrainUnlocked(id.clone()));
        }
        if amount > 0 {
            self.emit_stats();
        }
        grant
    }

    pub fn increment_sessions(&mut self) {
        self.ledger.increment_sessions();
        self.emit_stats();
    }

    /// Set the round score and fold it into the high score
    pub fn set_munchie_score(&mut self, score: u64) {
        if self.ledger.report_score(score) {
            self.emit_stats();
        }
        if self.munchie_score != score {
            self.munchie_score = score;
            self.emit(StoreChange::MunchieScore(score));
        }
    }

    pub fn reset_munchie_score(&mut self) {
        if self.munchie_score != 0 {
            self.munchie_score = 0;
            self.emit(StoreChange::MunchieScore(0));
        }
    }

    pub fn add_munchies_eaten(&mut self, count: u64) {
        if count > 0 {
            self.ledger.add_munchies_eaten(count);
            self.emit_stats();
        }
    }

    /// Append to the screenshot log, keeping only the most recent entries
    pub fn add_screenshot(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.screenshots.push(url.clone());
        if self.screenshots.len() > MAX_SCREENSHOTS {
            let excess = self.screenshots.len() - MAX_SCREENSHOTS;
            self.screenshots.drain(..excess);
        }
        self.emit(StoreChange::Screenshot(url));
    }

    pub fn set_vibe_settings(&mut self, patch: &VibeSettingsPatch) {
        if self.vibe_settings.apply(patch) {
            self.emit(StoreChange::VibeSettings(self.vibe_settings));
        }
    }

    // === Room interactions ===

    /// One frame of meters wearing off
    pub fn decay_frame(&mut self) {
        if self.vibe_level > 0.0 {
            self.set_vibe_level(self.vibe_level - self.tuning.vibe_decay_per_frame);
        }
        if self.trip_intensity > 0.0 {
            self.set_trip_intensity(self.trip_intensity - self.tuning.trip_decay_per_frame);
        }
    }

    /// Take a hit: vibes and trip up, a little XP, one more session
    pub fn take_hit(&mut self) {
        self.set_vibe_level(self.vibe_level + self.tuning.hit_vibe_boost);
        self.set_trip_intensity(self.trip_intensity + self.tuning.hit_trip_boost);
        self.grant_xp(self.tuning.hit_xp);
        self.increment_sessions();
        log::debug!(
            "Hit taken! Vibe: {:.1}, Trip: {:.2}",
            self.vibe_level,
            self.trip_intensity
        );
    }

    pub fn open_munchies(&mut self) {
        self.set_phase(Phase::Munchies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> SessionStore {
        SessionStore::new(42, Tuning::default())
    }

    #[test]
    fn test_defaults() {
        let store = store();
        assert_eq!(store.phase(), Phase::Menu);
        assert_eq!(store.vibe_level(), 0.0);
        assert_eq!(store.trip_intensity(), 0.0);
        assert_eq!(store.current_strain_id(), Some("og-kush"));
        assert_eq!(store.munchie_score(), 0);
        assert_eq!(store.stats().strains_collected, 2);
    }

    #[test]
    fn test_vibe_clamps() {
        let mut store = store();
        store.set_vibe_level(150.0);
        assert_eq!(store.vibe_level(), 100.0);
        store.set_vibe_level(-10.0);
        assert_eq!(store.vibe_level(), 0.0);
    }

    #[test]
    fn test_trip_clamps() {
        let mut store = store();
        store.set_trip_intensity(3.0);
        assert_eq!(store.trip_intensity(), 1.0);
        store.set_trip_intensity(-0.5);
        assert_eq!(store.trip_intensity(), 0.0);
    }

    #[test]
    fn test_decay_lands_on_zero() {
        let mut store = store();
        store.set_vibe_level(50.0);
        for _ in 0..2500 {
            store.decay_frame();
            assert!(store.vibe_level() >= 0.0);
        }
        assert_eq!(store.vibe_level(), 0.0);

        store.decay_frame();
        assert_eq!(store.vibe_level(), 0.0);
    }

    #[test]
    fn test_trip_decay() {
        let mut store = store();
        store.set_trip_intensity(0.15);
        for _ in 0..200 {
            store.decay_frame();
        }
        assert_eq!(store.trip_intensity(), 0.0);
    }

    #[test]
    fn test_take_hit() {
        let mut store = store();
        store.set_vibe_level(95.0);
        store.set_trip_intensity(0.9);
        store.take_hit();
        assert_eq!(store.vibe_level(), 100.0);
        assert_eq!(store.trip_intensity(), 1.0);
        assert_eq!(store.stats().xp, 10);
        assert_eq!(store.stats().total_sessions, 1);
    }

    #[test]
    fn test_open_munchies() {
        let mut store = store();
        store.open_munchies();
        assert_eq!(store.phase(), Phase::Munchies);
    }

    #[test]
    fn test_any_phase_reaches_any_phase() {
        let mut store = store();
        for from in Phase::ALL {
            for to in Phase::ALL {
                store.set_phase(from);
                store.set_phase(to);
                assert_eq!(store.phase(), to);
            }
        }
    }

    #[test]
    fn test_locked_strain_cannot_be_current() {
        let mut store = store();
        assert!(!store.set_current_strain(Some("lava-cake")));
        assert_eq!(store.current_strain_id(), Some("og-kush"));
        assert!(!store.set_current_strain(Some("nope")));

        store.unlock_strain("lava-cake");
        assert!(store.set_current_strain(Some("lava-cake")));
        assert_eq!(store.current_strain().map(|s| s.name.as_str()), Some("Lava Cake"));

        assert!(store.set_current_strain(None));
        assert!(store.current_strain().is_none());
    }

    #[test]
    fn test_unlock_counts_once() {
        let mut store = store();
        store.unlock_strain("blue-dream");
        assert_eq!(store.stats().strains_collected, 3);
        store.unlock_strain("blue-dream");
        assert_eq!(store.stats().strains_collected, 3);
    }

    #[test]
    fn test_munchie_score_feeds_high_score() {
        let mut store = store();
        store.set_munchie_score(120);
        store.set_munchie_score(40);
        assert_eq!(store.munchie_score(), 40);
        assert_eq!(store.stats().high_score, 120);
        store.reset_munchie_score();
        assert_eq!(store.munchie_score(), 0);
        assert_eq!(store.stats().high_score, 120);
    }

    #[test]
    fn test_screenshot_log_keeps_last_20() {
        let mut store = store();
        for i in 0..25 {
            store.add_screenshot(format!("shot-{}", i));
        }
        assert_eq!(store.screenshots().len(), 20);
        assert_eq!(store.screenshots()[0], "shot-5");
        assert_eq!(store.screenshots()[19], "shot-24");
    }

    #[test]
    fn test_observers_see_changes_immediately() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        store.set_phase(Phase::Playing);
        store.set_phase(Phase::Playing);
        store.set_vibe_level(30.0);
        assert_eq!(
            *seen.borrow(),
            vec![StoreChange::Phase(Phase::Playing), StoreChange::VibeLevel(30.0)]
        );

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_vibe_level(10.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_unlock_from_xp_notifies() {
        let mut store = store();
        let unlocked = Rc::new(RefCell::new(Vec::new()));
        let sink = unlocked.clone();
        store.subscribe(move |change| {
            if let StoreChange::StrainUnlocked(id) = change {
                sink.borrow_mut().push(id.clone());
            }
        });
        let grant = store.grant_xp(250);
        assert_eq!(*unlocked.borrow(), grant.unlocked);
        assert_eq!(unlocked.borrow().len(), 1);
    }

    #[test]
    fn test_reset_restores_defaults_keeps_observers() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.take_hit();
        store.set_phase(Phase::Gallery);
        let before = *count.borrow();
        store.reset();
        assert_eq!(store.phase(), Phase::Menu);
        assert_eq!(store.stats().xp, 0);
        assert_eq!(store.vibe_level(), 0.0);
        assert_eq!(*count.borrow(), before + 1);
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!(Phase::from_str("munchies"), Some(Phase::Munchies));
        assert_eq!(Phase::from_str("Collection"), Some(Phase::Collection));
        assert_eq!(Phase::from_str("lobby"), None);
    }

    proptest! {
        #[test]
        fn prop_meters_stay_in_range(writes in prop::collection::vec(-500.0f64..500.0, 1..40)) {
            let mut store = store();
            for value in writes {
                store.set_vibe_level(value);
                store.set_trip_intensity(value / 100.0);
                store.decay_frame();
                prop_assert!((0.0..=100.0).contains(&store.vibe_level()));
                prop_assert!((0.0..=1.0).contains(&store.trip_intensity()));
            }
        }
    }
}
