/// The named asset catalogue: ASCII sprites, sound-cue labels and the music
/// banner, all read from one directory before the game leaves `Loading`.
///
/// Loading is a join-all over one reader thread per asset: either every file
/// arrives and parses, or the first failure rejects the whole load. There is
/// no retry and no partial catalogue.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("asset {} is blank", path.display())]
    Blank { path: PathBuf },
    #[error("asset loader thread panicked")]
    LoaderPanic,
}

/// A multi-line ASCII sprite. Width is the widest row in characters.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    fn parse(path: PathBuf, text: String) -> Result<Self, AssetError> {
        let rows: Vec<String> = text
            .lines()
            .map(str::to_owned)
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(AssetError::Blank { path });
        }
        let height = rows.len();
        Ok(Self {
            rows,
            width: width as f32,
            height: height as f32,
        })
    }
}

/// A short label flashed in the HUD (with the terminal bell) when played.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundCue {
    pub label: String,
}

impl SoundCue {
    fn parse(path: PathBuf, text: String) -> Result<Self, AssetError> {
        match text.lines().map(str::trim).find(|l| !l.is_empty()) {
            Some(label) => Ok(Self {
                label: label.to_owned(),
            }),
            None => Err(AssetError::Blank { path }),
        }
    }
}

/// The looping banner scrolled through the HUD while music "plays".
#[derive(Clone, Debug, PartialEq)]
pub struct Music {
    pub banner: String,
}

impl Music {
    fn parse(path: PathBuf, text: String) -> Result<Self, AssetError> {
        match text.lines().map(str::trim).find(|l| !l.is_empty()) {
            Some(banner) => Ok(Self {
                banner: banner.to_owned(),
            }),
            None => Err(AssetError::Blank { path }),
        }
    }
}

/// Every asset the game uses, decoded and ready for the rest of the process.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub enemy: Sprite,
    pub missile: Sprite,
    pub fire: SoundCue,
    pub kill: SoundCue,
    pub loss: SoundCue,
    pub music: Music,
}

impl Assets {
    /// Load the fixed asset set from `dir`.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let player = spawn_read(dir, "player.txt");
        let enemy = spawn_read(dir, "enemy.txt");
        let missile = spawn_read(dir, "missile.txt");
        let fire = spawn_read(dir, "fire.txt");
        let kill = spawn_read(dir, "kill.txt");
        let loss = spawn_read(dir, "loss.txt");
        let music = spawn_read(dir, "music.txt");

        let (path, text) = join(player)?;
        let player = Sprite::parse(path, text)?;
        let (path, text) = join(enemy)?;
        let enemy = Sprite::parse(path, text)?;
        let (path, text) = join(missile)?;
        let missile = Sprite::parse(path, text)?;
        let (path, text) = join(fire)?;
        let fire = SoundCue::parse(path, text)?;
        let (path, text) = join(kill)?;
        let kill = SoundCue::parse(path, text)?;
        let (path, text) = join(loss)?;
        let loss = SoundCue::parse(path, text)?;
        let (path, text) = join(music)?;
        let music = Music::parse(path, text)?;

        debug!(dir = %dir.display(), "asset catalogue loaded");
        Ok(Self {
            player,
            enemy,
            missile,
            fire,
            kill,
            loss,
            music,
        })
    }
}

type ReadResult = Result<(PathBuf, String), AssetError>;

fn spawn_read(dir: &Path, name: &'static str) -> JoinHandle<ReadResult> {
    let path = dir.join(name);
    thread::spawn(move || match fs::read_to_string(&path) {
        Ok(text) => Ok((path, text)),
        Err(source) => Err(AssetError::Read { path, source }),
    })
}

fn join(handle: JoinHandle<ReadResult>) -> ReadResult {
    handle.join().map_err(|_| AssetError::LoaderPanic)?
}
