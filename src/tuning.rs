//! Data-driven game balance
//!
//! Every gameplay number lives here so a build can swap the balance without
//! touching code. Defaults reproduce the shipped feel.

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Room scene ===
    /// Vibe lost per rendered frame
    pub vibe_decay_per_frame: f64,
    /// Trip intensity lost per rendered frame
    pub trip_decay_per_frame: f64,
    /// Vibe gained per hit
    pub hit_vibe_boost: f64,
    /// Trip intensity gained per hit
    pub hit_trip_boost: f64,
    /// XP granted per hit
    pub hit_xp: u64,

    // === Progression ===
    /// Growth factor of the XP threshold on each level-up (floored)
    pub xp_growth: f64,
    /// A locked strain unlocks on every level that is a multiple of this
    pub unlock_every_levels: u32,

    // === Munchies ===
    /// Round length in whole seconds
    pub round_seconds: u32,
    /// Food items spawned at round start
    pub initial_food_count: usize,
    /// Max gap between collections that keeps the combo alive (seconds)
    pub combo_window: f64,
    /// Highest reachable combo
    pub combo_cap: u32,
    /// Score multiplier added per combo step
    pub combo_step: f64,
    /// Delay before a collected item is replaced (seconds)
    pub respawn_delay: f64,

    // === Frame clock ===
    /// Largest step food falls in one frame. Only movement is clamped; the
    /// countdown and combo window always see the full frame delta.
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            vibe_decay_per_frame: 0.02,
            trip_decay_per_frame: 0.001,
            hit_vibe_boost: 15.0,
            hit_trip_boost: 0.15,
            hit_xp: 10,

            xp_growth: 1.5,
            unlock_every_levels: 3,

            round_seconds: 30,
            initial_food_count: 15,
            combo_window: 1.5,
            combo_cap: 10,
            combo_step: 0.5,
            respawn_delay: 0.3,

            max_frame_dt: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Score awarded for an item at the given combo
    pub fn combo_points(&self, points: u32, combo: u32) -> u64 {
        (points as f64 * (1.0 + combo as f64 * self.combo_step)).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_points() {
        let tuning = Tuning::default();
        assert_eq!(tuning.combo_points(10, 0), 10);
        assert_eq!(tuning.combo_points(10, 2), 20);
        assert_eq!(tuning.combo_points(15, 1), 22);
        assert_eq!(tuning.combo_points(30, 10), 180);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "round_seconds": 45 }"#).unwrap();
        assert_eq!(tuning.round_seconds, 45);
        assert_eq!(tuning.initial_food_count, 15);
        assert_eq!(tuning.combo_window, 1.5);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }
}
