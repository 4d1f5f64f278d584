/// The enemy formation: every member shares one horizontal sweep direction,
/// reversed when any member crosses a screen edge.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Enemy;

#[derive(Clone, Debug)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    sweep: f32,
    reverse_pending: bool,
}

impl Formation {
    pub fn new(enemies: Vec<Enemy>) -> Self {
        Self {
            enemies,
            sweep: 1.0,
            reverse_pending: false,
        }
    }

    /// Spawn a fresh wave: `count` enemies with horizontal centres spread
    /// evenly across the playfield and a random depth inside the spawn band.
    pub fn generate(count: usize, cfg: &GameConfig, rng: &mut impl Rng) -> Self {
        let (width, height) = cfg.enemy_size;
        let enemies = (0..count)
            .map(|i| {
                let cx = cfg.width * (i as f32 / count as f32) + cfg.width / (2.0 * count as f32);
                let cy = cfg.spawn_band_top + rng.gen_range(0.0..cfg.spawn_band_depth);
                Enemy::new(cx, cy, width, height, cfg.enemy_velocity, cfg.enemy_creep)
            })
            .collect();
        Self::new(enemies)
    }

    /// Current shared sweep sign: +1.0 (rightward) or -1.0 (leftward).
    pub fn sweep(&self) -> f32 {
        self.sweep
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Advance every enemy one tick.
    ///
    /// A reversal detected on the previous tick is applied first: the scan
    /// runs on post-move positions, so the formation overshoots the edge by
    /// one tick before turning around.
    pub fn advance(&mut self, screen_width: f32) {
        if self.reverse_pending {
            self.sweep = -self.sweep;
        }
        for enemy in &mut self.enemies {
            enemy.body.direction.x = self.sweep;
            enemy.body.advance();
            enemy.body.y += enemy.creep;
        }
        self.reverse_pending = self
            .enemies
            .iter()
            .any(|e| e.body.x < 0.0 || e.body.right() > screen_width);
    }
}
