//! Fixed-rate simulation tick
//!
//! One call advances the session by exactly one tick: resolve the input
//! snapshot, run the motion step, move the chaser, check the capture
//! condition and update score and phase. No rendering, audio or IO happens
//! here; the tick reports through `GameState::events` instead.

use super::collision::squares_overlap;
use super::motion::{self, Direction, StepInput};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick
///
/// Direction fields are level-triggered (key currently held); the action
/// fields are one-shot edges the platform layer clears after a processed
/// tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Jump requested (edge)
    pub jump: bool,
    /// Dash requested (edge)
    pub dash: bool,
    /// Confirm / start (edge)
    pub confirm: bool,
    /// Pause toggle (edge)
    pub pause: bool,
    /// Restart the run with the same profile (edge)
    pub restart: bool,
    /// Profile selection from the menu (edge)
    pub select: Option<usize>,
}

impl TickInput {
    /// Resolve the held direction keys to a single command.
    ///
    /// Exactly one held key moves; zero or several held keys resolve to no
    /// movement, so conflicting input never produces a diagonal sum.
    pub fn resolve_direction(&self) -> Option<Direction> {
        let held = [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ];
        let mut it = held.iter().filter(|(on, _)| *on).map(|(_, d)| *d);
        match (it.next(), it.next()) {
            (Some(dir), None) => Some(dir),
            _ => None,
        }
    }

    /// Clear the one-shot fields after a processed tick
    pub fn clear_one_shots(&mut self) {
        self.jump = false;
        self.dash = false;
        self.confirm = false;
        self.pause = false;
        self.restart = false;
        self.select = None;
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu => tick_menu(state, input),
        GamePhase::Playing => tick_playing(state, input),
        GamePhase::Paused => {
            if input.pause || input.confirm {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::GameOver => tick_game_over(state, input),
    }
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    if let Some(index) = input.select {
        if index < motion::BehaviorProfile::ALL.len() && index != state.profile_index {
            state.profile_index = index;
            state.events.push(GameEvent::ProfileSelected);
        }
    }
    if input.confirm {
        state.start_run();
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.phase = GamePhase::Paused;
        return;
    }

    // Dash is gated here: the motion model only sees affordable requests
    let dash = input.dash
        && state.profile.dash_multiplier > 0
        && state.score >= DASH_COST;

    let step_input = StepInput {
        direction: input.resolve_direction(),
        jump: input.jump,
        dash,
    };
    let outcome = motion::step(
        &mut state.crawler.body,
        &mut state.crawler.motion,
        step_input,
        &state.profile,
        motion::Bounds::play_field(),
    );
    if outcome.jumped {
        state.events.push(GameEvent::Jumped);
    }
    if outcome.dashed {
        state.dash_spent += DASH_COST;
        state.events.push(GameEvent::Dashed);
    }

    state.time_ticks += 1;
    state.score = (state.survived_secs() * SCORE_PER_SECOND).saturating_sub(state.dash_spent);

    state.chaser.pursue(state.crawler.body.head());

    let head = state.crawler.body.head();
    if squares_overlap(head, SEGMENT_SIZE, state.chaser.pos, state.chaser.size) {
        state.spawn_death_burst();
        state.death_ticks = DEATH_EFFECT_TICKS;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Caught);
    }
}

fn tick_game_over(state: &mut GameState, input: &TickInput) {
    state.death_ticks = state.death_ticks.saturating_sub(1);

    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += 0.25;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    if input.restart {
        state.start_run();
    } else if input.confirm && state.death_ticks == 0 {
        state.phase = GamePhase::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::BehaviorProfile;
    use glam::IVec2;

    fn playing_state(profile_index: usize) -> GameState {
        let mut state = GameState::new(42, profile_index);
        state.start_run();
        state.events.clear();
        state
    }

    fn held_right() -> TickInput {
        TickInput {
            right: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn confirm_starts_a_run_from_the_menu() {
        let mut state = GameState::new(1, 0);
        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn menu_selection_switches_profiles() {
        let mut state = GameState::new(1, 0);
        tick(
            &mut state,
            &TickInput {
                select: Some(2),
                ..TickInput::default()
            },
        );
        assert_eq!(state.profile_index, 2);
        assert!(state.events.contains(&GameEvent::ProfileSelected));

        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.profile, BehaviorProfile::SPRINT);
    }

    #[test]
    fn conflicting_directions_resolve_to_no_movement() {
        let input = TickInput {
            left: true,
            right: true,
            ..TickInput::default()
        };
        assert_eq!(input.resolve_direction(), None);

        let mut state = playing_state(0);
        let before = state.crawler.body.head();
        tick(&mut state, &input);
        assert_eq!(state.crawler.body.head(), before);
    }

    #[test]
    fn pause_suspends_and_resumes() {
        let mut state = playing_state(0);
        let pause = TickInput {
            pause: true,
            ..TickInput::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let ticks_before = state.time_ticks;
        tick(&mut state, &held_right());
        assert_eq!(state.time_ticks, ticks_before, "paused sim must not advance");

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn score_tracks_survival_seconds() {
        let mut state = playing_state(0);
        for _ in 0..(TICK_HZ as u64 * 3) {
            // Keep the chaser pinned in a corner so the run survives
            state.chaser.pos = IVec2::new(0, 0);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 3 * SCORE_PER_SECOND);
    }

    #[test]
    fn dash_needs_score_and_deducts_its_cost() {
        let mut state = playing_state(2); // SPRINT
        assert_eq!(state.profile.dash_multiplier, 4);

        // Broke: the dash request is ignored
        let before = state.crawler.body.head();
        tick(
            &mut state,
            &TickInput {
                dash: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.crawler.body.head(), before);
        assert_eq!(state.dash_spent, 0);

        // Fund the dash, then fire it
        state.time_ticks = TICK_HZ as u64 * 15;
        state.score = 30;
        let before = state.crawler.body.head();
        tick(
            &mut state,
            &TickInput {
                dash: true,
                ..TickInput::default()
            },
        );
        assert!(state.events.contains(&GameEvent::Dashed));
        assert_eq!(state.dash_spent, DASH_COST);
        assert_eq!(state.score, 30 - DASH_COST);
        assert_eq!(
            state.crawler.body.head(),
            (before + IVec2::new(4 * STEP_SIZE, 0))
                .min(IVec2::new(PLAY_WIDTH - SEGMENT_SIZE, PLAY_HEIGHT - SEGMENT_SIZE))
        );
    }

    #[test]
    fn capture_ends_the_run() {
        let mut state = playing_state(0);
        // Park the chaser on top of the head's next position
        state.chaser.pos = state.crawler.body.head();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::Caught));
        assert!(!state.particles.is_empty());
        assert_eq!(state.death_ticks, DEATH_EFFECT_TICKS);
    }

    #[test]
    fn game_over_confirm_waits_for_the_death_effect() {
        let mut state = playing_state(0);
        state.chaser.pos = state.crawler.body.head();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let confirm = TickInput {
            confirm: true,
            ..TickInput::default()
        };
        tick(&mut state, &confirm);
        assert_eq!(state.phase, GamePhase::GameOver, "effect still running");

        for _ in 0..DEATH_EFFECT_TICKS {
            tick(&mut state, &TickInput::default());
        }
        tick(&mut state, &confirm);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn restart_skips_the_menu() {
        let mut state = playing_state(2);
        state.chaser.pos = state.crawler.body.head();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..TickInput::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.profile, BehaviorProfile::SPRINT);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn chaser_steps_toward_the_head_each_tick() {
        let mut state = playing_state(0);
        let head = state.crawler.body.head();
        let gap_before = (state.chaser.pos - head).abs().max_element();
        tick(&mut state, &TickInput::default());
        let gap_after = (state.chaser.pos - head).abs().max_element();
        assert!(gap_after < gap_before);
    }
}
