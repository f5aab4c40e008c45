//! Hookline headless driver
//!
//! Runs the movement core at a fixed timestep with a seeded autopilot standing
//! in for a player. The run walks the menus once, plays, and resizes the
//! window halfway through.
//!
//! Usage: `hookline [--settings PATH] [--tuning PATH] [--seed N] [--seconds N] [--realtime]`

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use hookline::consts::{MAX_SUBSTEPS, SIM_DT};
use hookline::renderer::DrawList;
use hookline::settings::RESOLUTIONS;
use hookline::sim::{GameState, Level, TickInput, tick};
use hookline::ui::{ElementId, Menu, MenuAction};
use hookline::{Rect, Settings, Tuning, ViewportContext};

struct Options {
    settings_path: PathBuf,
    tuning_path: Option<PathBuf>,
    seed: u64,
    seconds: f32,
    realtime: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("hookline_settings.json"),
            tuning_path: None,
            seed: 12345,
            seconds: 30.0,
            realtime: false,
        }
    }
}

fn parse_args() -> Options {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                if let Some(path) = args.next() {
                    options.settings_path = PathBuf::from(path);
                }
            }
            "--tuning" => options.tuning_path = args.next().map(PathBuf::from),
            "--seed" => match args.next().map(|s| s.parse()) {
                Some(Ok(seed)) => options.seed = seed,
                _ => log::warn!("--seed needs an integer, using {}", options.seed),
            },
            "--seconds" => match args.next().map(|s| s.parse::<f32>()) {
                Some(Ok(seconds)) if seconds > 0.0 => options.seconds = seconds,
                _ => log::warn!("--seconds needs a positive number, using {}", options.seconds),
            },
            "--realtime" => options.realtime = true,
            other => log::warn!("Ignoring unknown argument {other:?}"),
        }
    }
    options
}

fn load_tuning(options: &Options) -> Tuning {
    let Some(path) = &options.tuning_path else {
        return Tuning::default();
    };
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            log::warn!("Could not load tuning {} ({e}), using defaults", path.display());
            Tuning::default()
        }
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    viewport: ViewportContext,
    accumulator: f32,
    input: TickInput,
    event_counts: BTreeMap<String, u32>,
}

impl Game {
    fn new(tuning: Tuning, viewport: ViewportContext) -> Self {
        Self {
            state: GameState::new(Level::demo(), tuning),
            viewport,
            accumulator: 0.0,
            input: TickInput::default(),
            event_counts: BTreeMap::new(),
        }
    }

    /// Fire the hook at a window point, converted with the current viewport
    fn pointer_pressed(&mut self, screen: Vec2) {
        let world = self.viewport.screen_to_world(screen, &self.state.camera);
        self.input.hook_target = Some(world);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        for event in self.state.drain_events() {
            *self.event_counts.entry(format!("{event:?}")).or_default() += 1;
        }
    }
}

/// Seeded stand-in for a human player
struct Autopilot {
    rng: Pcg32,
    hold_ticks: u32,
    jump_ticks: u32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            hold_ticks: 0,
            jump_ticks: 0,
        }
    }

    fn drive(&mut self, game: &mut Game) {
        if self.hold_ticks == 0 {
            game.input.move_axis = [-1.0, 0.0, 1.0, 1.0][self.rng.random_range(0..4usize)];
            self.hold_ticks = self.rng.random_range(20..90);
        }
        self.hold_ticks -= 1;

        if self.jump_ticks > 0 {
            self.jump_ticks -= 1;
        } else if self.rng.random_bool(0.03) {
            game.input.jump_pressed = true;
            self.jump_ticks = self.rng.random_range(4..20);
        }
        game.input.jump_held = self.jump_ticks > 0;

        if self.rng.random_bool(0.01) {
            game.input.dash_pressed = true;
        }

        let grapple = &game.state.player.grapple;
        let (idle, attached) = (grapple.is_idle(), grapple.is_attached());

        if idle && self.rng.random_bool(0.02) {
            // Aim above the player, in window pixels like a real click
            let scale = game.viewport.scale();
            let aim = Vec2::new(
                self.rng.random_range(-400.0..400.0),
                self.rng.random_range(-600.0..-200.0),
            );
            let at = game
                .viewport
                .world_to_screen(game.state.player.body.position, &game.state.camera)
                + aim * scale;
            game.pointer_pressed(at);
        }

        if attached {
            game.input.release_held = self.rng.random_bool(0.02);
            game.input.reel_axis = self.rng.random_range(-1.0..1.0);
        } else {
            game.input.release_held = false;
            game.input.reel_axis = 0.0;
        }
    }
}

/// Click through Settings, bump the resolution, go Back and press Play
fn walk_menus(settings: &mut Settings, viewport: &mut ViewportContext) -> bool {
    let mut changed = false;
    let mut menu = Menu::main(viewport);

    let click = |menu: &mut Menu, id: ElementId, at: fn(&Rect) -> Vec2| {
        let point = menu.element(id).map(|e| at(&e.screen))?;
        menu.pointer_pressed(point)
    };

    if click(&mut menu, ElementId::Settings, |r| r.center()) == Some(MenuAction::OpenSettings) {
        let mut settings_menu = Menu::settings(settings, viewport);

        let arrow: fn(&Rect) -> Vec2 = if settings.resolution_index() + 1 < RESOLUTIONS.len() {
            |r| Vec2::new(r.right() - 1.0, r.center().y)
        } else {
            |r| Vec2::new(r.left() + 1.0, r.center().y)
        };

        if let Some(action) = click(&mut settings_menu, ElementId::Resolution, arrow) {
            changed |= settings.apply(&action);
            let (w, h) = settings.resolution;
            viewport.resize(w, h);
            settings_menu.relayout(viewport);
            menu.relayout(viewport);
        }

        if click(&mut settings_menu, ElementId::Back, |r| r.center()) == Some(MenuAction::Back) {
            log::info!("Back to main menu at {:?}", settings.resolution);
        }
    }

    let played = click(&mut menu, ElementId::Play, |r| r.center()) == Some(MenuAction::Play);
    if !played {
        log::warn!("Play button missed after relayout");
    }
    changed
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Hookline (headless) starting...");

    let options = parse_args();
    let mut settings = Settings::load_from(&options.settings_path);
    let (width, height) = settings.resolution;
    let mut viewport = ViewportContext::new(width, height);

    if walk_menus(&mut settings, &mut viewport) {
        if let Err(e) = settings.save_to(&options.settings_path) {
            log::warn!("Could not save settings: {e}");
        }
    }

    let mut game = Game::new(load_tuning(&options), viewport);
    let mut autopilot = Autopilot::new(options.seed);
    let mut jitter = Pcg32::seed_from_u64(options.seed ^ 0x5eed);

    let frames = (options.seconds / SIM_DT).round() as u32;
    let resize_at = frames / 2;
    let mut tiles_drawn = 0usize;
    let started = Instant::now();

    for frame in 0..frames {
        autopilot.drive(&mut game);

        if frame == resize_at {
            let (w, h) = RESOLUTIONS[(settings.resolution_index() + 1) % RESOLUTIONS.len()];
            game.resize(w, h);
        }

        // Uneven frame pacing, like a real display loop
        let dt = SIM_DT * jitter.random_range(0.5..2.5);
        let frame_start = Instant::now();
        game.update(dt);

        let draw = DrawList::build(&game.state, &game.viewport, settings.show_debug_overlay);
        tiles_drawn += draw.tiles.len();

        if options.realtime {
            let spent = frame_start.elapsed();
            if let Some(rest) = Duration::from_secs_f32(dt).checked_sub(spent) {
                std::thread::sleep(rest);
            }
        }
    }

    let player = &game.state.player;
    log::info!(
        "Ran {} ticks over {} frames in {:.2?}",
        game.state.time_ticks,
        frames,
        started.elapsed()
    );
    log::info!(
        "Player at ({:.1}, {:.1}), {:?}, avg {:.1} tiles drawn per frame",
        player.body.position.x,
        player.body.position.y,
        player.pose(),
        tiles_drawn as f32 / frames.max(1) as f32
    );
    for (event, count) in &game.event_counts {
        log::info!("  {event}: {count}");
    }
}
