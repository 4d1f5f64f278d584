mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use space_invaders::assets::{AssetError, Assets};
use space_invaders::config::GameConfig;
use space_invaders::game::{Command, Cue, Game, Phase};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Frames a sound-cue label stays visible in the HUD.
const CUE_FLASH_FRAMES: u32 = 10;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(version, about = "Terminal Space Invaders")]
struct Cli {
    /// Number of enemies in the opening wave.
    #[arg(long, default_value_t = 3)]
    enemies: usize,

    /// Directory holding the sprite and sound-cue assets.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Seed for deterministic enemy placement.
    #[arg(long)]
    seed: Option<u64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Log to stderr so the alternate screen stays clean; redirect 2> to keep.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (width, height) = terminal::size().context("query terminal size")?;
    let mut cfg = GameConfig::new(width, height);
    cfg.initial_enemies = cli.enemies.max(1);
    cfg.seed = cli.seed;
    let game = Game::new(cfg);

    // Kick off the asset join-all before touching the terminal; the loading
    // overlay renders until the result arrives on this channel.
    let (asset_tx, asset_rx) = mpsc::channel::<Result<Assets, AssetError>>();
    let asset_dir = cli.assets.clone();
    thread::spawn(move || {
        let _ = asset_tx.send(Assets::load(&asset_dir));
    });

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, game, &rx, &asset_rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Runs until the user quits. Per frame, in order: apply input, poll the
/// asset loader while still loading, tick the game (a no-op outside
/// `Playing`), render, then sleep the frame remainder.
fn run<W: Write>(
    out: &mut W,
    mut game: Game,
    input: &mpsc::Receiver<Event>,
    loader: &mpsc::Receiver<Result<Assets, AssetError>>,
) -> anyhow::Result<()> {
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut cue_flash: Option<(String, u32)> = None;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = input.try_recv() {
            match kind {
                // Press: record key + one-shot commands
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Enter => {
                            let _ = game.apply(Command::Start);
                        }
                        KeyCode::Esc | KeyCode::Char('p') => {
                            let _ = game.apply(Command::Pause);
                        }
                        KeyCode::Char(' ') => {
                            // One missile per discrete fire input; key
                            // auto-repeat is the only cadence limit.
                            if let Some(cue) = game.apply(Command::Fire) {
                                play_cue(out, &game, cue, &mut cue_flash)?;
                            }
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Steering from held keys, re-applied every frame ───────────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);
        let steer = match (left, right) {
            (true, false) => Command::SteerLeft,
            (false, true) => Command::SteerRight,
            _ => Command::Halt,
        };
        let _ = game.apply(steer);

        // ── Asset loader outcome, polled while Loading ────────────────────────
        if game.phase == Phase::Loading && game.load_error.is_none() {
            match loader.try_recv() {
                Ok(Ok(assets)) => game.assets_ready(assets),
                Ok(Err(err)) => game.load_failed(err.to_string()),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {}
            }
        }

        // ── Update & render ───────────────────────────────────────────────────
        for cue in game.tick() {
            play_cue(out, &game, cue, &mut cue_flash)?;
        }

        if let Some((_, frames_left)) = &mut cue_flash {
            *frames_left -= 1;
            if *frames_left == 0 {
                cue_flash = None;
            }
        }

        let flash = cue_flash.as_ref().map(|(label, _)| label.as_str());
        display::render(out, &game, flash)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// "Play" a sound cue: ring the terminal bell and arm the HUD flash with the
/// cue's label from the asset catalogue.
fn play_cue<W: Write>(
    out: &mut W,
    game: &Game,
    cue: Cue,
    flash: &mut Option<(String, u32)>,
) -> anyhow::Result<()> {
    let assets = match &game.assets {
        Some(assets) => assets,
        None => return Ok(()),
    };
    let label = match cue {
        Cue::Fire => &assets.fire.label,
        Cue::Kill => &assets.kill.label,
        Cue::Loss => &assets.loss.label,
    };
    out.write_all(b"\x07")?;
    *flash = Some((label.clone(), CUE_FLASH_FRAMES));
    Ok(())
}
