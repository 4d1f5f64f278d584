/// Gameplay tuning. Everything here is expressed in terminal cells and
/// cells-per-tick; the frame loop runs at roughly 30 ticks per second.

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Playfield width in cells.
    pub width: f32,
    /// Playfield height in cells.
    pub height: f32,
    /// Enemies in the opening wave. Grows by one per win, restored on loss.
    pub initial_enemies: usize,
    /// Player ship speed while a steering key is held.
    pub player_velocity: f32,
    /// Horizontal sweep speed of every enemy.
    pub enemy_velocity: f32,
    /// Extra downward cells added to every enemy each tick.
    pub enemy_creep: f32,
    /// Missile speed. Must stay strictly above `player_velocity`.
    pub missile_velocity: f32,
    /// Missile sprite size fallback until assets arrive.
    pub missile_size: (f32, f32),
    /// Player sprite size fallback until assets arrive.
    pub player_size: (f32, f32),
    /// Enemy sprite size fallback until assets arrive.
    pub enemy_size: (f32, f32),
    /// Rows below the bottom edge reserved for the player ship's centre.
    pub player_row_offset: f32,
    /// Vertical band `[top, top + depth)` enemies spawn into.
    pub spawn_band_top: f32,
    pub spawn_band_depth: f32,
    /// Seed for enemy placement. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 24.0,
            initial_enemies: 3,
            player_velocity: 1.0,
            enemy_velocity: 0.2,
            enemy_creep: 0.02,
            missile_velocity: 1.5,
            missile_size: (1.0, 1.0),
            player_size: (3.0, 2.0),
            enemy_size: (3.0, 2.0),
            player_row_offset: 4.0,
            spawn_band_top: 3.0,
            spawn_band_depth: 5.0,
            seed: None,
        }
    }
}
