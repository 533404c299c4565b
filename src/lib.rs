//! Vibe Sesh - progression and session engine for a chill 3D vibe simulator
//!
//! Core modules:
//! - `ledger`: Level, XP, strain unlocks and lifetime stats
//! - `store`: Session state store with observer notifications
//! - `minigame`: Munchies round (falling food, combos, scoring)
//! - `engine`: Command-driven front door the renderer talks to
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod ledger;
pub mod minigame;
pub mod platform;
pub mod settings;
pub mod store;
pub mod strains;
pub mod tuning;

pub use engine::{Command, Engine, SessionSnapshot};
pub use ledger::{PlayerStats, ProgressLedger, XpGrant};
pub use settings::{LightingPreset, RoomTheme, VibeSettings, VibeSettingsPatch};
pub use store::{Phase, SessionStore, StoreChange, SubscriptionId};
pub use strains::{Rarity, Strain, StrainKind};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Upper bound of the vibe meter
    pub const VIBE_MAX: f64 = 100.0;
    /// Upper bound of trip intensity
    pub const TRIP_MAX: f64 = 1.0;
    /// Meters below this snap to zero so decay lands exactly on 0
    pub const METER_EPSILON: f64 = 1e-6;

    /// Level a fresh profile starts at
    pub const START_LEVEL: u32 = 1;
    /// XP required for the first level-up
    pub const START_XP_TO_NEXT: u64 = 100;

    /// Screenshots kept in the session log
    pub const MAX_SCREENSHOTS: usize = 20;

    /// Munchies playfield bounds (world units)
    pub const FOOD_SPAWN_HALF_WIDTH: f32 = 4.0;
    pub const FOOD_FLOOR_Y: f32 = -5.0;
    pub const FOOD_WRAP_Y: f32 = 6.0;
}

/// Clamp a value into `[0, max]`, snapping tiny residues to zero
#[inline]
pub fn clamp_meter(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let clamped = value.clamp(0.0, max);
    if clamped < consts::METER_EPSILON {
        0.0
    } else {
        clamped
    }
}
