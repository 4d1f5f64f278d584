use std::fs;
use std::path::Path;

use tempfile::tempdir;

use space_invaders::assets::{AssetError, Assets};

fn write_catalogue(dir: &Path) {
    fs::write(dir.join("player.txt"), " ▲\n/█\\\n").unwrap();
    fs::write(dir.join("enemy.txt"), "«▼»\n╚═╝\n").unwrap();
    fs::write(dir.join("missile.txt"), "║\n").unwrap();
    fs::write(dir.join("fire.txt"), "pew!\n").unwrap();
    fs::write(dir.join("kill.txt"), "boom\n").unwrap();
    fs::write(dir.join("loss.txt"), "krrsh\n").unwrap();
    fs::write(dir.join("music.txt"), "♪ invaders march ♪\n").unwrap();
}

#[test]
fn loads_the_full_catalogue() {
    let dir = tempdir().unwrap();
    write_catalogue(dir.path());

    let assets = Assets::load(dir.path()).unwrap();

    assert_eq!(assets.player.rows, vec![" ▲", "/█\\"]);
    assert_eq!(assets.fire.label, "pew!");
    assert_eq!(assets.kill.label, "boom");
    assert_eq!(assets.loss.label, "krrsh");
    assert_eq!(assets.music.banner, "♪ invaders march ♪");
}

#[test]
fn sprite_dimensions_derive_from_the_text() {
    let dir = tempdir().unwrap();
    write_catalogue(dir.path());
    fs::write(dir.path().join("enemy.txt"), "/MMM\\\n|o o|\n\\---/\n").unwrap();

    let assets = Assets::load(dir.path()).unwrap();

    assert_eq!(assets.enemy.width, 5.0);
    assert_eq!(assets.enemy.height, 3.0);
    assert_eq!(assets.missile.width, 1.0);
    assert_eq!(assets.missile.height, 1.0);
}

#[test]
fn a_missing_file_rejects_the_whole_load() {
    let dir = tempdir().unwrap();
    write_catalogue(dir.path());
    fs::remove_file(dir.path().join("kill.txt")).unwrap();

    let err = Assets::load(dir.path()).unwrap_err();

    assert!(matches!(err, AssetError::Read { .. }));
    assert!(err.to_string().contains("kill.txt"));
}

#[test]
fn a_blank_sprite_rejects_the_whole_load() {
    let dir = tempdir().unwrap();
    write_catalogue(dir.path());
    fs::write(dir.path().join("player.txt"), "").unwrap();

    let err = Assets::load(dir.path()).unwrap_err();

    assert!(matches!(err, AssetError::Blank { .. }));
}

#[test]
fn a_blank_sound_cue_rejects_the_whole_load() {
    let dir = tempdir().unwrap();
    write_catalogue(dir.path());
    fs::write(dir.path().join("fire.txt"), "\n   \n").unwrap();

    let err = Assets::load(dir.path()).unwrap_err();

    assert!(matches!(err, AssetError::Blank { .. }));
}

#[test]
fn sound_cue_labels_are_trimmed() {
    let dir = tempdir().unwrap();
    write_catalogue(dir.path());
    fs::write(dir.path().join("fire.txt"), "\n  pew pew  \n").unwrap();

    let assets = Assets::load(dir.path()).unwrap();

    assert_eq!(assets.fire.label, "pew pew");
}
