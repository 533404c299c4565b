//! JS-facing engine handle
//!
//! The three.js renderer owns one `WebEngine`, forwards clicks and frame
//! deltas into it, and pulls a JSON snapshot back each frame.

use wasm_bindgen::prelude::*;

use crate::engine::{Command, Engine};
use crate::settings::VibeSettingsPatch;
use crate::store::Phase;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    super::init_logging();
    log::info!("Vibe Sesh engine loaded");
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl WebEngine {
    /// Create an engine. `seed` of `None` seeds from the clock.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> WebEngine {
        super::init_logging();
        let seed = seed.map(|s| s as u64).unwrap_or_else(super::session_seed);
        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json_or_default)
            .unwrap_or_default();
        WebEngine {
            engine: Engine::new(seed, tuning),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.engine.handle(Command::Tick { dt });
    }

    /// Navigate by phase name. Returns false for unknown names.
    pub fn navigate(&mut self, phase: &str) -> bool {
        match Phase::from_str(phase) {
            Some(phase) => {
                self.engine.handle(Command::Navigate(phase));
                true
            }
            None => {
                log::warn!("Unknown phase '{}'", phase);
                false
            }
        }
    }

    pub fn take_hit(&mut self) {
        self.engine.handle(Command::TakeHit);
    }

    pub fn open_munchies(&mut self) {
        self.engine.handle(Command::OpenMunchies);
    }

    /// Returns the points awarded, or 0 if the click did nothing
    pub fn collect(&mut self, id: u32) -> f64 {
        self.engine
            .collect(id)
            .map(|outcome| outcome.points as f64)
            .unwrap_or(0.0)
    }

    pub fn select_strain(&mut self, id: String) {
        self.engine.handle(Command::SelectStrain(id));
    }

    pub fn restart_round(&mut self) {
        self.engine.handle(Command::RestartRound);
    }

    pub fn back_to_session(&mut self) {
        self.engine.handle(Command::BackToSession);
    }

    pub fn screenshot(&mut self, url: String) {
        self.engine.handle(Command::Screenshot(url));
    }

    /// Apply a partial settings update given as JSON
    pub fn update_vibe_settings(&mut self, patch_json: &str) -> bool {
        match serde_json::from_str::<VibeSettingsPatch>(patch_json) {
            Ok(patch) => {
                self.engine.handle(Command::UpdateVibeSettings(patch));
                true
            }
            Err(e) => {
                log::warn!("Invalid vibe settings patch: {}", e);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.engine.handle(Command::ResetSession);
    }

    /// Current state as JSON for the renderer
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.engine.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                String::from("{}")
            }
        }
    }
}
