//! Segmented-body motion model
//!
//! The crawler's body is a fixed-length sliding window over the head's most
//! recent positions: every step prepends a freshly computed head and drops the
//! oldest segment, so trailing segments are derived by shifting, never
//! simulated. On top of that sits an optional kinematic jump arc (launch
//! velocity plus a constant gravity increment, terminated when the head falls
//! back to its launch height) and boundary clamping of the head.

use std::collections::VecDeque;

use glam::IVec2;

use crate::consts::*;

/// One of the four commandable movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen space (y grows downward)
    #[inline]
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Rectangular movement region the head is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The session play field
    pub const fn play_field() -> Self {
        Self::new(PLAY_WIDTH, PLAY_HEIGHT)
    }
}

/// Behavior flags distinguishing the game's movement variants
///
/// Each named preset is an independent profile; the presets deliberately do
/// not share one reconciled rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorProfile {
    /// Display name, also recorded on high-score entries
    pub name: &'static str,
    /// A commanded direction only takes effect on the tick it is newly
    /// commanded, so one press advances exactly one step
    pub continuous: bool,
    /// Whether jump requests start a gravity arc (disabled = move-only)
    pub gravity_enabled: bool,
    /// Head displacement multiplier for a dash, in step sizes (0 = no dash)
    pub dash_multiplier: i32,
}

impl BehaviorProfile {
    /// Hold-to-move with jumping; the default rules
    pub const GARDEN: Self = Self {
        name: "GARDEN",
        continuous: false,
        gravity_enabled: true,
        dash_multiplier: 0,
    };

    /// Turn-based sliding: one press, one step, no jumping
    pub const RELAY: Self = Self {
        name: "RELAY",
        continuous: true,
        gravity_enabled: false,
        dash_multiplier: 0,
    };

    /// Garden rules plus a score-gated 4x dash
    pub const SPRINT: Self = Self {
        name: "SPRINT",
        continuous: false,
        gravity_enabled: true,
        dash_multiplier: 4,
    };

    /// Menu order
    pub const ALL: [Self; 3] = [Self::GARDEN, Self::RELAY, Self::SPRINT];
}

/// Fixed-length segment window; index 0 is the head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    segments: VecDeque<IVec2>,
}

impl Body {
    /// Build a body whose head sits at `head` and whose tail extends one step
    /// size to the left per segment
    pub fn new_at(head: IVec2, len: usize) -> Self {
        debug_assert!(len >= 1);
        let segments = (0..len as i32)
            .map(|i| IVec2::new(head.x - i * STEP_SIZE, head.y))
            .collect();
        Self { segments }
    }

    #[inline]
    pub fn head(&self) -> IVec2 {
        self.segments[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from head to tail
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.segments.iter().copied()
    }

    /// Slide the window: prepend the new head, drop the oldest segment
    fn advance(&mut self, new_head: IVec2) {
        self.segments.push_front(new_head);
        self.segments.pop_back();
    }
}

/// Per-actor movement state mutated once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionState {
    /// Last commanded direction; dashes fire along it
    pub facing: Direction,
    /// Whether a jump arc is in progress
    pub jumping: bool,
    /// Current vertical jump velocity (negative = rising)
    pub jump_velocity: i32,
    /// Head height recorded when the jump started; the arc ends there
    pub jump_origin: i32,
    /// Direction commanded on the previous tick, for continuous-mode edges
    prev_commanded: Option<Direction>,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            facing: Direction::Right,
            jumping: false,
            jump_velocity: 0,
            jump_origin: 0,
            prev_commanded: None,
        }
    }
}

/// Control input for a single motion step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Commanded direction, already disambiguated (multi-key input resolves
    /// to `None`, never to a diagonal sum)
    pub direction: Option<Direction>,
    /// Jump requested this tick
    pub jump: bool,
    /// Dash requested this tick; the caller gates it on the score threshold
    pub dash: bool,
}

/// What a step did, for event reporting by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// A jump arc started this tick
    pub jumped: bool,
    /// A dash displacement fired this tick
    pub dashed: bool,
}

/// Advance the body by one tick.
///
/// Pure with respect to the outside world: the only effects are on `body` and
/// `motion`. Out-of-range positions are clamped, never rejected.
pub fn step(
    body: &mut Body,
    motion: &mut MotionState,
    input: StepInput,
    profile: &BehaviorProfile,
    bounds: Bounds,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    // Continuous mode moves on command edges only: holding a key yields one
    // step, a direction change while held counts as a new command.
    let commanded = if profile.continuous {
        if input.direction == motion.prev_commanded {
            None
        } else {
            input.direction
        }
    } else {
        input.direction
    };
    motion.prev_commanded = input.direction;

    let mut delta = IVec2::ZERO;
    if input.dash && profile.dash_multiplier > 0 {
        // One-shot burst along the facing direction; replaces the regular
        // displacement for this tick.
        delta = motion.facing.unit() * (profile.dash_multiplier * STEP_SIZE);
        outcome.dashed = true;
    } else if let Some(dir) = commanded {
        delta = dir.unit() * STEP_SIZE;
        motion.facing = dir;
    }

    if profile.gravity_enabled {
        if input.jump && !motion.jumping {
            motion.jumping = true;
            motion.jump_origin = body.head().y;
            motion.jump_velocity = JUMP_LAUNCH_VELOCITY;
            outcome.jumped = true;
        }
        if motion.jumping {
            motion.jump_velocity += JUMP_GRAVITY;
            delta.y += motion.jump_velocity;
        }
    }

    let mut new_head = body.head() + delta;

    // Landing rule: the arc is purely kinematic and ends at its launch height
    if motion.jumping && new_head.y >= motion.jump_origin {
        new_head.y = motion.jump_origin;
        motion.jumping = false;
        motion.jump_velocity = 0;
    }

    new_head.x = new_head.x.clamp(0, bounds.width - SEGMENT_SIZE);
    new_head.y = new_head.y.clamp(0, bounds.height - SEGMENT_SIZE);

    body.advance(new_head);
    outcome
}
