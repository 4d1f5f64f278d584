/// The game state machine and per-tick orchestration.
///
/// Input arrives as explicit `Command` values and is consumed synchronously;
/// the machine answers with `Cue` values for the caller to play. Only the
/// `Playing` phase moves entities or evaluates collisions — every other phase
/// is render-only.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error};

use crate::assets::Assets;
use crate::collision;
use crate::config::GameConfig;
use crate::entities::Player;
use crate::formation::Formation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Welcome,
    Playing,
    Paused,
    Lost,
    Won,
}

/// Discrete inputs, produced by the key handler and the menu overlays alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SteerLeft,
    SteerRight,
    Halt,
    Fire,
    Pause,
    Start,
}

/// Sound cues the machine asks the caller to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Fire,
    Kill,
    Loss,
}

pub struct Game {
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    /// Size of the next wave: back to the configured value on loss, +1 on win.
    pub enemy_count: usize,
    pub player: Player,
    pub formation: Formation,
    /// Present once loading succeeded; the display reads sprites from here.
    pub assets: Option<Assets>,
    /// Set when loading failed; the game then stays in `Loading` for good.
    pub load_error: Option<String>,
    pub music_playing: bool,
    /// Banner offset for the music marquee; rewound on regeneration.
    pub music_pos: u64,
    pub frame: u64,
    cfg: GameConfig,
    rng: StdRng,
}

impl Game {
    pub fn new(cfg: GameConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = spawn_player(&cfg);
        let formation = Formation::generate(cfg.initial_enemies, &cfg, &mut rng);
        Self {
            phase: Phase::Loading,
            score: 0,
            level: 0,
            enemy_count: cfg.initial_enemies,
            player,
            formation,
            assets: None,
            load_error: None,
            music_playing: false,
            music_pos: 0,
            frame: 0,
            cfg,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    /// Loading → Welcome. Entity sizes are adopted from the sprites and the
    /// wave regenerated so the world matches what will be drawn.
    pub fn assets_ready(&mut self, assets: Assets) {
        if self.phase != Phase::Loading {
            return;
        }
        self.cfg.player_size = (assets.player.width, assets.player.height);
        self.cfg.enemy_size = (assets.enemy.width, assets.enemy.height);
        self.cfg.missile_size = (assets.missile.width, assets.missile.height);
        self.assets = Some(assets);
        self.regenerate();
        self.phase = Phase::Welcome;
        debug!("assets ready, entering welcome");
    }

    /// Load failure: reported and fatal to this attempt. No retry, no
    /// degraded mode — the loading overlay shows the error until quit.
    pub fn load_failed(&mut self, err: impl Into<String>) {
        let err = err.into();
        error!(error = %err, "asset load failed");
        self.load_error = Some(err);
    }

    /// Apply one command. Commands that make no sense in the current phase
    /// are silently ignored.
    pub fn apply(&mut self, cmd: Command) -> Option<Cue> {
        match (self.phase, cmd) {
            (Phase::Playing, Command::SteerLeft) => {
                // Boundary policy lives here, not in the entity.
                self.player.body.direction.x = if self.player.body.x > 0.0 { -1.0 } else { 0.0 };
                None
            }
            (Phase::Playing, Command::SteerRight) => {
                self.player.body.direction.x = if self.player.body.right() < self.cfg.width {
                    1.0
                } else {
                    0.0
                };
                None
            }
            (Phase::Playing, Command::Halt) => {
                self.player.body.direction.x = 0.0;
                None
            }
            (Phase::Playing, Command::Fire) => {
                let (width, height) = self.cfg.missile_size;
                self.player.fire(width, height, self.cfg.missile_velocity);
                Some(Cue::Fire)
            }
            (Phase::Playing, Command::Pause) => {
                self.pause();
                None
            }
            (Phase::Paused, Command::Pause | Command::Start) => {
                self.resume();
                None
            }
            (Phase::Welcome | Phase::Lost | Phase::Won, Command::Start) => {
                self.resume();
                None
            }
            _ => None,
        }
    }

    /// One update tick. Outside `Playing` this is a no-op; the caller keeps
    /// rendering every frame regardless.
    pub fn tick(&mut self) -> Vec<Cue> {
        let mut cues = Vec::new();
        if self.phase != Phase::Playing {
            return cues;
        }
        self.frame += 1;
        if self.music_playing {
            self.music_pos += 1;
        }

        self.player.body.advance();
        for missile in &mut self.player.missiles {
            missile.body.advance();
        }
        self.formation.advance(self.cfg.width);

        let outcome = collision::resolve(&mut self.player, &mut self.formation, self.cfg.height);
        self.score += outcome.kills;
        for _ in 0..outcome.kills {
            cues.push(Cue::Kill);
        }

        if outcome.lost {
            self.lose();
            cues.push(Cue::Loss);
        } else if outcome.won {
            self.win();
        }
        cues
    }

    fn pause(&mut self) {
        self.phase = Phase::Paused;
        self.music_playing = false;
        debug!("paused");
    }

    fn resume(&mut self) {
        self.phase = Phase::Playing;
        self.music_playing = true;
        debug!("playing");
    }

    fn lose(&mut self) {
        self.phase = Phase::Lost;
        self.score = 0;
        self.level = 0;
        self.enemy_count = self.cfg.initial_enemies;
        self.regenerate();
        debug!("lost, counters reset");
    }

    fn win(&mut self) {
        self.phase = Phase::Won;
        self.level += 1;
        self.enemy_count += 1;
        self.regenerate();
        debug!(level = self.level, enemies = self.enemy_count, "wave cleared");
    }

    fn regenerate(&mut self) {
        self.player = spawn_player(&self.cfg);
        self.formation = Formation::generate(self.enemy_count, &self.cfg, &mut self.rng);
        self.music_playing = false;
        self.music_pos = 0;
    }
}

fn spawn_player(cfg: &GameConfig) -> Player {
    let (width, height) = cfg.player_size;
    Player::new(
        cfg.width / 2.0,
        cfg.height - cfg.player_row_offset,
        width,
        height,
        cfg.player_velocity,
    )
}
