//! Game state and core simulation types
//!
//! Everything the per-tick update reads or writes lives here. The state is
//! deterministic for a given seed and input sequence; the only randomness is
//! the seeded chaser spawn.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::motion::{BehaviorProfile, Body, MotionState};
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with profile selection
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation suspended mid-run
    Paused,
    /// The chaser caught the crawler; death effect, then back to the menu
    GameOver,
}

/// Things the simulation did this tick that the platform layer reacts to
/// (audio, leaderboard). Drained by the caller after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run started from the menu or a restart
    Started,
    /// The menu selection moved
    ProfileSelected,
    /// A jump arc launched
    Jumped,
    /// A dash fired (cost already deducted)
    Dashed,
    /// The chaser caught the head; the run is over
    Caught,
}

/// The player-controlled caterpillar
#[derive(Debug, Clone)]
pub struct Crawler {
    pub body: Body,
    pub motion: MotionState,
}

impl Crawler {
    /// Spawn at the start position: bottom center, tail to the left
    pub fn spawn() -> Self {
        Self {
            body: Body::new_at(IVec2::new(PLAY_WIDTH / 2, PLAY_HEIGHT - 50), BODY_SEGMENTS),
            motion: MotionState::default(),
        }
    }
}

/// The pursuing enemy
#[derive(Debug, Clone, Copy)]
pub struct Chaser {
    pub pos: IVec2,
    pub size: i32,
}

impl Chaser {
    /// Spawn at a seeded random spot at least `CHASER_MIN_SPAWN_DIST` away
    /// from the head (Chebyshev); falls back to the farthest corner when the
    /// roll keeps landing too close.
    pub fn spawn(rng: &mut Pcg32, head: IVec2) -> Self {
        let max_x = PLAY_WIDTH - CHASER_SIZE;
        let max_y = PLAY_HEIGHT - CHASER_SIZE;
        for _ in 0..16 {
            let pos = IVec2::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            let dist = (pos - head).abs().max_element();
            if dist >= CHASER_MIN_SPAWN_DIST {
                return Self {
                    pos,
                    size: CHASER_SIZE,
                };
            }
        }
        let corners = [
            IVec2::new(0, 0),
            IVec2::new(max_x, 0),
            IVec2::new(0, max_y),
            IVec2::new(max_x, max_y),
        ];
        let pos = corners
            .into_iter()
            .max_by_key(|c| (*c - head).abs().max_element())
            .unwrap_or(IVec2::ZERO);
        Self {
            pos,
            size: CHASER_SIZE,
        }
    }

    /// Close in on the target by up to `CHASER_STEP` per axis
    pub fn pursue(&mut self, target: IVec2) {
        let delta = target - self.pos;
        self.pos.x += delta.x.signum() * delta.x.abs().min(CHASER_STEP);
        self.pos.y += delta.y.signum() * delta.y.abs().min(CHASER_STEP);
    }
}

/// A death-effect particle; render-only, never feeds back into gameplay
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
}

/// Particle count of one death burst
const DEATH_BURST: u32 = 24;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; each run derives its own stream from it
    pub seed: u64,
    /// Runs started this session, mixed into the per-run RNG stream
    pub runs: u32,
    /// Menu cursor into `BehaviorProfile::ALL`
    pub profile_index: usize,
    /// Profile the current run was started with
    pub profile: BehaviorProfile,
    pub phase: GamePhase,
    pub crawler: Crawler,
    pub chaser: Chaser,
    /// Ticks survived in the current run
    pub time_ticks: u64,
    /// Current score: survival seconds times two, minus dash spending
    pub score: u64,
    /// Total score spent on dashes this run
    pub dash_spent: u64,
    /// Remaining death-effect ticks while in `GameOver`
    pub death_ticks: u32,
    /// Death-effect particles
    pub particles: Vec<Particle>,
    /// Events produced by the current tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, profile_index: usize) -> Self {
        let profile_index = profile_index.min(BehaviorProfile::ALL.len() - 1);
        let crawler = Crawler::spawn();
        let mut rng = Pcg32::seed_from_u64(seed);
        let chaser = Chaser::spawn(&mut rng, crawler.body.head());
        Self {
            seed,
            runs: 0,
            profile_index,
            profile: BehaviorProfile::ALL[profile_index],
            phase: GamePhase::Menu,
            crawler,
            chaser,
            time_ticks: 0,
            score: 0,
            dash_spent: 0,
            death_ticks: 0,
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run with the currently selected profile
    pub fn start_run(&mut self) {
        self.runs += 1;
        self.profile = BehaviorProfile::ALL[self.profile_index];
        self.crawler = Crawler::spawn();
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.runs as u64));
        self.chaser = Chaser::spawn(&mut rng, self.crawler.body.head());
        self.time_ticks = 0;
        self.score = 0;
        self.dash_spent = 0;
        self.death_ticks = 0;
        self.particles.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
    }

    /// Seconds survived in the current run
    #[inline]
    pub fn survived_secs(&self) -> u64 {
        crate::ticks_to_secs(self.time_ticks)
    }

    /// Scatter a burst of particles from the head on capture. Directions come
    /// from a deterministic hash so replays with the same seed look the same.
    pub fn spawn_death_burst(&mut self) {
        let head = self.crawler.body.head();
        let center = Vec2::new(
            head.x as f32 + SEGMENT_SIZE as f32 / 2.0,
            head.y as f32 + SEGMENT_SIZE as f32 / 2.0,
        );
        let burst_seed = (self.seed as u32) ^ self.runs.wrapping_mul(2654435761);
        for i in 0..DEATH_BURST {
            let hash = burst_seed.wrapping_add(i.wrapping_mul(7919));
            let angle = (hash % 1000) as f32 / 1000.0 * std::f32::consts::TAU;
            let speed = 1.5 + ((hash >> 10) % 100) as f32 / 100.0 * 2.5;
            self.particles.push(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 40 + (hash >> 20) % 40,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_the_menu() {
        let state = GameState::new(7, 0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.crawler.body.len(), BODY_SEGMENTS);
    }

    #[test]
    fn chaser_spawns_away_from_the_head() {
        for seed in 0..32u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let head = IVec2::new(PLAY_WIDTH / 2, PLAY_HEIGHT - 50);
            let chaser = Chaser::spawn(&mut rng, head);
            let dist = (chaser.pos - head).abs().max_element();
            assert!(dist >= CHASER_MIN_SPAWN_DIST, "seed {seed}: spawned {dist} away");
            assert!(chaser.pos.x >= 0 && chaser.pos.x <= PLAY_WIDTH - CHASER_SIZE);
            assert!(chaser.pos.y >= 0 && chaser.pos.y <= PLAY_HEIGHT - CHASER_SIZE);
        }
    }

    #[test]
    fn pursuit_closes_the_gap_monotonically() {
        let mut chaser = Chaser {
            pos: IVec2::new(0, 0),
            size: CHASER_SIZE,
        };
        let target = IVec2::new(100, 37);
        let mut last = (target - chaser.pos).abs();
        for _ in 0..50 {
            chaser.pursue(target);
            let gap = (target - chaser.pos).abs();
            assert!(gap.x <= last.x && gap.y <= last.y);
            last = gap;
        }
        assert_eq!(chaser.pos, target);
    }

    #[test]
    fn pursuit_does_not_overshoot() {
        let mut chaser = Chaser {
            pos: IVec2::new(98, 50),
            size: CHASER_SIZE,
        };
        chaser.pursue(IVec2::new(100, 50));
        assert_eq!(chaser.pos, IVec2::new(100, 50));
    }

    #[test]
    fn same_seed_spawns_identical_runs() {
        let mut a = GameState::new(1234, 0);
        let mut b = GameState::new(1234, 0);
        a.start_run();
        b.start_run();
        assert_eq!(a.chaser.pos, b.chaser.pos);
    }

    #[test]
    fn death_burst_is_deterministic() {
        let mut a = GameState::new(9, 0);
        a.start_run();
        a.spawn_death_burst();
        let mut b = GameState::new(9, 0);
        b.start_run();
        b.spawn_death_burst();
        assert_eq!(a.particles.len(), b.particles.len());
        assert_eq!(a.particles[0].vel, b.particles[0].vel);
    }
}
