//! Vibe Sesh entry point
//!
//! The web build is driven from JS through `platform::web::WebEngine`. The
//! native binary plays a scripted headless session and prints where it ended
//! up, which is handy for eyeballing balance changes.
//!
//! Usage: `vibe-sesh [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use vibe_sesh::platform;
    use vibe_sesh::{Engine, Tuning};

    platform::init_logging();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Seed '{}' is not a number, picking one", arg);
            platform::session_seed()
        }),
        None => platform::session_seed(),
    };
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Vibe Sesh (native) starting...");
    let mut engine = Engine::new(seed, tuning);
    demo::run(&mut engine);

    match serde_json::to_string_pretty(&demo::Report::from(&engine)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use serde::Serialize;
    use vibe_sesh::{Command, Engine, Phase, PlayerStats};

    /// 60 fps frame delta
    const FRAME_DT: f32 = 1.0 / 60.0;

    /// End-of-demo summary
    #[derive(Serialize)]
    pub struct Report {
        seed: u64,
        phase: Phase,
        vibe_level: f64,
        trip_intensity: f64,
        current_strain: Option<String>,
        unlocked: Vec<String>,
        stats: PlayerStats,
    }

    impl From<&Engine> for Report {
        fn from(engine: &Engine) -> Self {
            let store = engine.store();
            Self {
                seed: store.seed(),
                phase: store.phase(),
                vibe_level: store.vibe_level(),
                trip_intensity: store.trip_intensity(),
                current_strain: store.current_strain_id().map(str::to_string),
                unlocked: store
                    .strains()
                    .iter()
                    .filter(|s| s.unlocked)
                    .map(|s| s.name.clone())
                    .collect(),
                stats: store.stats().clone(),
            }
        }
    }

    fn frames(engine: &mut Engine, count: u32) {
        for _ in 0..count {
            engine.handle(Command::Tick { dt: FRAME_DT });
        }
    }

    /// Menu -> room (a few hits) -> two munchies rounds -> collection
    pub fn run(engine: &mut Engine) {
        engine.handle(Command::Navigate(Phase::Playing));
        for _ in 0..5 {
            engine.handle(Command::TakeHit);
            frames(engine, 30);
        }

        engine.handle(Command::OpenMunchies);
        play_round(engine);
        engine.handle(Command::RestartRound);
        play_round(engine);
        engine.handle(Command::BackToSession);
        frames(engine, 120);

        engine.handle(Command::Navigate(Phase::Collection));
        // Wear the newest strain we have
        let newest = engine
            .store()
            .strains()
            .iter()
            .rev()
            .find(|s| s.unlocked)
            .map(|s| s.id.clone());
        if let Some(id) = newest {
            engine.handle(Command::SelectStrain(id));
        }
    }

    /// Eat the lowest item every half second until time runs out
    fn play_round(engine: &mut Engine) {
        while engine.round().is_some_and(|r| r.is_active()) {
            let target = engine.round().and_then(|r| {
                r.items()
                    .iter()
                    .filter(|f| !f.collected)
                    .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|f| f.id)
            });
            if let Some(id) = target {
                engine.handle(Command::Collect(id));
            }
            frames(engine, 30);
        }
        if let Some(summary) = engine.summary() {
            log::info!(
                "Round over: {} points, {} XP on the table",
                summary.final_score,
                summary.xp_reward
            );
        }
    }
}
