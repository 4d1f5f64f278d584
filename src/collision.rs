/// Per-tick collision resolution.
///
/// The resolver only marks and removes; score bookkeeping, cue playback and
/// the actual phase transition stay with the state machine. Removals are
/// batched after the scan so no (missile, enemy) pair is skipped by a
/// mid-scan mutation.

use crate::entities::Player;
use crate::formation::Formation;

/// What one tick of collision resolution produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Enemies destroyed this tick; one point and one kill cue each.
    pub kills: u32,
    /// Some enemy's bottom edge passed the player's row.
    pub lost: bool,
    /// The formation is empty and no loss fired. Loss wins ties.
    pub won: bool,
}

/// Resolve one tick over post-move positions.
///
/// A hit is a point-in-rectangle test of the missile's reference point
/// (its top-left corner) strictly inside the enemy's box — deliberately not
/// a box-overlap test, so grazing contact does not register.
pub fn resolve(player: &mut Player, formation: &mut Formation, screen_height: f32) -> Outcome {
    let mut hit_enemies = vec![false; formation.enemies.len()];
    let mut spent_missiles = vec![false; player.missiles.len()];
    let mut kills = 0u32;
    let mut lost = false;

    for (ei, enemy) in formation.enemies.iter().enumerate() {
        for (mi, missile) in player.missiles.iter().enumerate() {
            if spent_missiles[mi] {
                // One hit pair per missile per tick, even inside
                // overlapping enemies.
                continue;
            }
            if enemy.body.contains(missile.body.x, missile.body.y) {
                spent_missiles[mi] = true;
                if !hit_enemies[ei] {
                    hit_enemies[ei] = true;
                    kills += 1;
                }
            }
        }

        // Loss is evaluated inside the same scan, hit or not.
        if enemy.body.bottom() > player.body.y {
            lost = true;
        }
    }

    // Missiles leaving the playfield vertically go in the same batch,
    // independent of hits.
    for (mi, missile) in player.missiles.iter().enumerate() {
        if missile.body.y < 0.0 || missile.body.bottom() > screen_height {
            spent_missiles[mi] = true;
        }
    }

    let mut ei = 0;
    formation.enemies.retain(|_| {
        let keep = !hit_enemies[ei];
        ei += 1;
        keep
    });
    let mut mi = 0;
    player.missiles.retain(|_| {
        let keep = !spent_missiles[mi];
        mi += 1;
        keep
    });

    let won = !lost && formation.is_empty();
    Outcome { kills, lost, won }
}
