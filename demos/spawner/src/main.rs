//! spawner: a host render loop driving the cadence scheduler.
//!
//! A stand-in "scene" is updated by scheduled events instead of per-frame
//! conditionals: an elapsed-time label refreshes every second and a sprite
//! appears at a random point every half second.  Partway through the run the
//! loop pauses for a while; the frame timer reports zero-length frames and
//! corrects the first frame after the pause, so no sprites are spawned for the
//! paused wall-clock time.
//!
//! ```text
//! cargo run -p spawner                     # built-in config
//! cargo run -p spawner -- scene.json       # {"name": "...", "duration": 4.0, "seed": 7}
//! RUST_LOG=cadence_sched=trace cargo run -p spawner
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cadence_core::{FrameTimer, SchedRng};
use cadence_sched::{DrainSummary, Scheduler, SchedulerConfig, SchedulerEvent, SchedulerObserver, SimTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64      = 42;
const DURATION_SECS:  f64      = 6.0;
const FRAME:          Duration = Duration::from_millis(16);
const PAUSE_AT_FRAME: u64      = 120;
const PAUSE_FRAMES:   u64      = 60;
const MAX_FRAMES:     u64      = 10_000;
const SCENE_WIDTH:    f64      = 640.0;
const SCENE_HEIGHT:   f64      = 360.0;

// ── Scene ─────────────────────────────────────────────────────────────────────

struct Scene {
    label:   String,
    sprites: Vec<(f64, f64)>,
    /// Simulation time, mirrored from the scheduler before any event fires.
    elapsed: SimTime,
    rng:     SchedRng,
}

impl Scene {
    fn new(seed: u64) -> Self {
        Self {
            label:   "Elapsed time: 0 secs".into(),
            sprites: Vec::new(),
            elapsed: SimTime::ZERO,
            rng:     SchedRng::new(seed),
        }
    }

    fn update_elapsed_label(&mut self) {
        self.label = format!("Elapsed time: {} secs", self.elapsed.secs() as u64);
        info!(label = %self.label, sprites = self.sprites.len(), "label updated");
    }

    fn create_random_sprite(&mut self) {
        let x = self.rng.unit() * SCENE_WIDTH;
        let y = self.rng.unit() * SCENE_HEIGHT;
        self.sprites.push((x, y));
    }

    fn farewell(&mut self) {
        info!(sprites = self.sprites.len(), "scene torn down");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Keeps the scene's clock in step with the scheduler and counts fires.
struct SceneObserver {
    scene:   Rc<RefCell<Scene>>,
    fired:   usize,
    invoked: usize,
    drained: Option<DrainSummary>,
}

impl SceneObserver {
    fn new(scene: Rc<RefCell<Scene>>) -> Self {
        Self { scene, fired: 0, invoked: 0, drained: None }
    }
}

impl SchedulerObserver for SceneObserver {
    fn on_update_start(&mut self, elapsed: SimTime) {
        self.scene.borrow_mut().elapsed = elapsed;
    }

    fn on_fire(&mut self, _event: &SchedulerEvent, invoked: bool) {
        self.fired += 1;
        self.invoked += usize::from(invoked);
    }

    fn on_stop(&mut self, _elapsed: SimTime, summary: &DrainSummary) {
        self.drained = Some(*summary);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SchedulerConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SchedulerConfig {
            name:     "spawner".into(),
            duration: DURATION_SECS,
            seed:     Some(SEED),
        });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let config = load_config()?;
    let scene = Rc::new(RefCell::new(Scene::new(config.seed.unwrap_or(SEED))));
    let mut scheduler = Scheduler::from_config(config)?;
    info!(name = %scheduler.name, duration = scheduler.duration(), "scheduler configured");

    scheduler
        .every(1.0)
        .name("label")
        .bind_weak(&scene, Scene::update_elapsed_label)
        .every(0.5)?
        .name("sprite")
        .bind_weak(&scene, Scene::create_random_sprite)
        .commit()?;

    // Far beyond the run length: only ever fires through `ensure`.
    scheduler
        .after(1_000.0)
        .name("farewell")
        .ensure()
        .bind_weak(&scene, Scene::farewell)
        .commit()?;

    scheduler.start();

    let mut timer = FrameTimer::monotonic();
    let mut observer = SceneObserver::new(Rc::clone(&scene));
    let wall_start = Instant::now();
    let mut frame = 0;

    while scheduler.is_running() || frame < PAUSE_AT_FRAME + PAUSE_FRAMES {
        if frame >= MAX_FRAMES {
            scheduler.stop_with(&mut observer);
            break;
        }

        let paused = (PAUSE_AT_FRAME..PAUSE_AT_FRAME + PAUSE_FRAMES).contains(&frame);
        if paused && frame == PAUSE_AT_FRAME {
            scheduler.pause();
        } else if !paused && frame == PAUSE_AT_FRAME + PAUSE_FRAMES {
            scheduler.resume();
        }

        timer.advance(paused);
        scheduler.update_with(timer.dt(), &mut observer)?;

        frame += 1;
        thread::sleep(FRAME);
    }

    let scene = scene.borrow();
    println!();
    println!("Frames          : {frame}");
    println!("Wall clock      : {:.3} s", wall_start.elapsed().as_secs_f64());
    println!("Simulation time : {:.3} s", scheduler.elapsed().secs());
    println!("Fires           : {} ({} invoked)", observer.fired, observer.invoked);
    if let Some(drained) = observer.drained {
        println!("Stop drain      : {} forced, {} discarded", drained.forced, drained.discarded);
    }
    println!("Sprites         : {}", scene.sprites.len());
    println!("Label           : {}", scene.label);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_shows_elapsed_time_of_the_firing_update() {
        let scene = Rc::new(RefCell::new(Scene::new(SEED)));
        let mut scheduler = Scheduler::seeded(SEED);
        scheduler
            .every(1.0)
            .bind_weak(&scene, Scene::update_elapsed_label)
            .commit()
            .unwrap();
        scheduler.start();

        let mut observer = SceneObserver::new(Rc::clone(&scene));
        scheduler.update_with(0.5, &mut observer).unwrap();
        assert_eq!(scene.borrow().label, "Elapsed time: 0 secs");

        scheduler.update_with(1.75, &mut observer).unwrap();
        assert_eq!(scene.borrow().label, "Elapsed time: 2 secs");
        assert_eq!(observer.fired, 2);
    }

    #[test]
    fn sprites_land_inside_the_scene() {
        let mut scene = Scene::new(SEED);
        for _ in 0..100 {
            scene.create_random_sprite();
        }
        assert!(scene.sprites.iter().all(|&(x, y)| {
            (0.0..SCENE_WIDTH).contains(&x) && (0.0..SCENE_HEIGHT).contains(&y)
        }));
    }
}
