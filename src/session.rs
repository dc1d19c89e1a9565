/// The per-frame game orchestrator.
///
/// One `GameSession` is one play-through.  The frame driver calls
/// [`GameSession::advance`] once per animation frame with the measured
/// wall-clock delta; all randomness comes through the injected `rng`
/// handle so callers control determinism (tests use a seeded RNG).

use rand::Rng;

use crate::background::Background;
use crate::entities::{Enemy, EnemyKind, Player, WorldContext, MAX_AMMO};
use crate::input::InputState;

// ── Session constants ─────────────────────────────────────────────────────────

/// Session length; reaching it without the winning score is a loss.
pub const TIME_LIMIT_MS: f32 = 15_000.0;
pub const WINNING_SCORE: i32 = 10;
/// One enemy spawns each time this much delta accumulates.
pub const ENEMY_INTERVAL_MS: f32 = 1_000.0;
/// Passive +1 ammo each time this much delta accumulates.
pub const AMMO_INTERVAL_MS: f32 = 500.0;

// ── Session ───────────────────────────────────────────────────────────────────

pub struct GameSession {
    pub world: WorldContext,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub background: Background,
    /// May go negative: ramming a non-lucky enemy costs a point with
    /// no floor.
    pub score: i32,
    pub game_time: f32,
    /// Terminal and monotonic: once set it never clears within a
    /// session.
    pub game_over: bool,
    ammo_timer: f32,
    enemy_timer: f32,
}

impl GameSession {
    pub fn new(world: WorldContext) -> Self {
        GameSession {
            background: Background::new(&world),
            world,
            player: Player::new(),
            enemies: Vec::new(),
            score: 0,
            game_time: 0.0,
            game_over: false,
            ammo_timer: 0.0,
            enemy_timer: 0.0,
        }
    }

    /// Advance the whole simulation by one tick of `delta`
    /// milliseconds.
    ///
    /// Entities keep moving after game over; only the clock, scoring
    /// and spawning stop.  The renderer reads the settled state after
    /// this returns; nothing mutates between advance and render.
    pub fn advance(&mut self, input: &InputState, delta: f32, rng: &mut impl Rng) {
        // 1. Game clock and time-limit check.
        if !self.game_over {
            self.game_time += delta;
            if self.game_time > TIME_LIMIT_MS {
                self.game_over = true;
            }
        }

        // 2. World scroll (cosmetic, never gated).
        self.background.advance(&self.world);

        // 3. Player movement, projectiles, animation, power-up.
        self.player.advance(input, delta, &self.world);

        // 4. Passive ammo regeneration.  The timer resets once it
        //    trips the interval whether or not the cap allowed a
        //    refill.
        if self.ammo_timer > AMMO_INTERVAL_MS {
            if self.player.ammo < MAX_AMMO {
                self.player.ammo = (self.player.ammo + 1.0).min(MAX_AMMO);
            }
            self.ammo_timer = 0.0;
        } else {
            self.ammo_timer += delta;
        }

        // 5. Enemy movement and collision resolution.
        for enemy in &mut self.enemies {
            enemy.advance(&self.world);

            if self.player.rect.overlaps(&enemy.rect) {
                enemy.removed = true;
                if enemy.kind.is_lucky() {
                    self.player.enter_power_up();
                } else {
                    self.score -= 1;
                }
            }

            for projectile in &mut self.player.projectiles {
                if projectile.expired {
                    continue;
                }
                if projectile.rect.overlaps(&enemy.rect) {
                    enemy.lives -= 1;
                    projectile.expired = true;
                    if enemy.lives <= 0 {
                        enemy.removed = true;
                        if !self.game_over {
                            self.score += enemy.kind.score_value();
                            if self.score > WINNING_SCORE {
                                self.game_over = true;
                            }
                        }
                    }
                }
            }
        }

        // 6. Compact: drop everything marked this tick, keeping
        //    survivor order.
        self.enemies.retain(|e| !e.removed);

        // 7. Enemy spawn timer.
        if self.enemy_timer > ENEMY_INTERVAL_MS && !self.game_over {
            self.add_enemy(rng);
            self.enemy_timer = 0.0;
        } else {
            self.enemy_timer += delta;
        }
    }

    /// Weighted spawn: 30% Angler1, 30% Angler2, 40% LuckyFish.
    fn add_enemy(&mut self, rng: &mut impl Rng) {
        let roll: f32 = rng.gen();
        let kind = if roll < 0.3 {
            EnemyKind::Angler1
        } else if roll < 0.6 {
            EnemyKind::Angler2
        } else {
            EnemyKind::LuckyFish
        };
        self.enemies.push(Enemy::spawn(kind, &self.world, rng));
    }

    /// Edge-triggered fire, routed from the frame driver.
    pub fn fire(&mut self) {
        self.player.fire();
    }

    /// Edge-triggered debug-overlay toggle.
    pub fn toggle_debug(&mut self) {
        self.world.debug = !self.world.debug;
    }

    /// Which end screen to show.  Only meaningful once `game_over` is
    /// set; the two terminal paths are distinguished solely by this
    /// comparison.
    pub fn won(&self) -> bool {
        self.score > WINNING_SCORE
    }
}
