use space_invaders::config::GameConfig;
use space_invaders::entities::Enemy;
use space_invaders::formation::Formation;

use rand::rngs::StdRng;
use rand::SeedableRng;

const SCREEN_W: f32 = 100.0;

/// 2×2 enemy centred on (cx, cy), one cell per tick, no creep.
fn enemy_at(cx: f32, cy: f32) -> Enemy {
    Enemy::new(cx, cy, 2.0, 2.0, 1.0, 0.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

#[test]
fn sweep_starts_rightward() {
    let f = Formation::new(vec![enemy_at(10.0, 5.0)]);
    assert_eq!(f.sweep(), 1.0);
}

#[test]
fn advance_moves_every_member_by_the_shared_sweep() {
    let mut f = Formation::new(vec![enemy_at(10.0, 5.0), enemy_at(30.0, 7.0)]);
    f.advance(SCREEN_W);
    assert_eq!(f.enemies[0].body.x, 10.0); // 9 + 1
    assert_eq!(f.enemies[1].body.x, 30.0); // 29 + 1
}

#[test]
fn creep_pulls_enemies_down_each_tick() {
    let mut f = Formation::new(vec![Enemy::new(10.0, 5.0, 2.0, 2.0, 1.0, 0.5)]);
    f.advance(SCREEN_W);
    f.advance(SCREEN_W);
    assert_eq!(f.enemies[0].body.y, 5.0); // 4 + 2 × 0.5
}

// ── Edge reversal ─────────────────────────────────────────────────────────────

#[test]
fn reversal_is_applied_one_tick_after_the_overflow() {
    // Right edge of the box reaches 100 exactly; one more tick overflows.
    let mut f = Formation::new(vec![enemy_at(99.0, 5.0)]); // box 98..100
    f.advance(SCREEN_W); // moves to 99..101 — overflow, not yet reversed
    assert_eq!(f.enemies[0].body.x, 99.0);
    assert_eq!(f.sweep(), 1.0);
    f.advance(SCREEN_W); // reversal applies now
    assert_eq!(f.enemies[0].body.x, 98.0);
    assert_eq!(f.sweep(), -1.0);
}

#[test]
fn reversal_triggers_on_the_left_edge_too() {
    let mut f = Formation::new(vec![enemy_at(99.0, 5.0)]);
    f.advance(SCREEN_W); // overflow right
    f.advance(SCREEN_W); // now sweeping left from x = 98
    assert_eq!(f.sweep(), -1.0);
    // Walk to the left edge: x goes 97, 96, ... 0, then -1 overflows.
    for _ in 0..99 {
        f.advance(SCREEN_W);
    }
    assert_eq!(f.enemies[0].body.x, -1.0);
    assert_eq!(f.sweep(), -1.0); // detected, not yet applied
    f.advance(SCREEN_W);
    assert_eq!(f.sweep(), 1.0); // applied one tick late
    assert_eq!(f.enemies[0].body.x, 0.0);
}

#[test]
fn sweep_flips_once_per_contiguous_overflow() {
    let mut f = Formation::new(vec![enemy_at(99.0, 5.0)]);
    f.advance(SCREEN_W); // overflow detected
    f.advance(SCREEN_W); // flip applied, back inside
    assert_eq!(f.sweep(), -1.0);
    f.advance(SCREEN_W);
    f.advance(SCREEN_W);
    assert_eq!(f.sweep(), -1.0); // no second flip from the same event
    assert_eq!(f.enemies[0].body.x, 96.0);
}

#[test]
fn any_single_member_overflow_reverses_the_whole_formation() {
    let mut f = Formation::new(vec![enemy_at(50.0, 5.0), enemy_at(99.0, 5.0)]);
    f.advance(SCREEN_W); // right enemy overflows
    f.advance(SCREEN_W);
    assert_eq!(f.sweep(), -1.0);
    assert_eq!(f.enemies[0].body.x, 49.0); // the centre enemy turned too
}

// ── Wave generation ───────────────────────────────────────────────────────────

#[test]
fn generate_spreads_centres_evenly() {
    let cfg = GameConfig::default(); // width 80
    let f = Formation::generate(4, &cfg, &mut seeded_rng());
    assert_eq!(f.len(), 4);
    let centres: Vec<f32> = f.enemies.iter().map(|e| e.body.center_x()).collect();
    assert_eq!(centres, vec![10.0, 30.0, 50.0, 70.0]);
}

#[test]
fn generate_keeps_spawn_depth_inside_the_band() {
    let cfg = GameConfig::default(); // band top 3, depth 5
    let f = Formation::generate(6, &cfg, &mut seeded_rng());
    for enemy in &f.enemies {
        let centre_y = enemy.body.y + enemy.body.height / 2.0;
        assert!(centre_y >= cfg.spawn_band_top);
        assert!(centre_y < cfg.spawn_band_top + cfg.spawn_band_depth);
    }
}

#[test]
fn generate_is_deterministic_for_a_seed() {
    let cfg = GameConfig::default();
    let a = Formation::generate(5, &cfg, &mut seeded_rng());
    let b = Formation::generate(5, &cfg, &mut seeded_rng());
    for (ea, eb) in a.enemies.iter().zip(b.enemies.iter()) {
        assert_eq!(ea.body, eb.body);
    }
}

#[test]
fn generated_enemies_use_configured_motion() {
    let cfg = GameConfig::default();
    let f = Formation::generate(3, &cfg, &mut seeded_rng());
    for enemy in &f.enemies {
        assert_eq!(enemy.body.velocity, cfg.enemy_velocity);
        assert_eq!(enemy.creep, cfg.enemy_creep);
    }
}
