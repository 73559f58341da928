//! Leaf Crawler entry point
//!
//! Owns the window, polls input into per-tick snapshots, pumps the fixed-rate
//! simulation and hands each frame to the software renderer. Audio and the
//! leaderboard react to the events the sim reports.

use std::time::{Duration, Instant};

use anyhow::Result;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use leaf_crawler::audio::{AudioManager, SoundEffect};
use leaf_crawler::consts::*;
use leaf_crawler::render::{self, Frame};
use leaf_crawler::sim::{GameEvent, GameState, TickInput, tick};
use leaf_crawler::{HighScores, Settings, unix_millis};

/// Bound on catch-up ticks after a stalled frame
const MAX_TICKS_PER_FRAME: u32 = 5;

fn main() -> Result<()> {
    env_logger::init();

    // Optional fixed seed for reproducible runs: `leaf-crawler [seed]`
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw.parse()?,
        None => unix_millis(),
    };

    let settings = Settings::load();
    let mut highscores = HighScores::load();

    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    if settings.music_enabled {
        audio.start_music();
    }

    let mut window = Window::new(
        "Leaf Crawler",
        PLAY_WIDTH as usize,
        PLAY_HEIGHT as usize,
        WindowOptions::default(),
    )?;
    window.set_target_fps(TICK_HZ as usize);

    let mut state = GameState::new(seed, settings.default_profile);
    let mut frame = Frame::new(PLAY_WIDTH as usize, PLAY_HEIGHT as usize);

    log::info!("session seed: {seed}");

    let tick_duration = Duration::from_micros(1_000_000 / TICK_HZ as u64);
    let mut last_tick = Instant::now();

    // One-shot inputs survive frames that run no tick
    let mut input = TickInput::default();

    // FPS tracking
    let mut fps = TICK_HZ;
    let mut frames = 0u32;
    let mut fps_window = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        merge_input(&mut input, snapshot_input(&window));

        // Advance enough ticks to keep the sim at its fixed rate; a stalled
        // frame runs a bounded burst and then resynchronizes
        let mut ticks = 0;
        while last_tick.elapsed() >= tick_duration && ticks < MAX_TICKS_PER_FRAME {
            tick(&mut state, &input);
            handle_events(&state, &mut highscores, &audio);
            input.clear_one_shots();
            last_tick += tick_duration;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            last_tick = Instant::now();
        }

        audio.set_muted(settings.mute_on_blur && !window.is_active());

        render::draw(&mut frame, &state, highscores.top_score(), &settings, fps);
        window.update_with_buffer(frame.data(), frame.width(), frame.height())?;

        frames += 1;
        if fps_window.elapsed() >= Duration::from_secs(1) {
            fps = frames;
            frames = 0;
            fps_window = Instant::now();
        }
    }

    Ok(())
}

/// Read the current key state into a tick input snapshot
fn snapshot_input(window: &Window) -> TickInput {
    let pressed = |key| window.is_key_pressed(key, KeyRepeat::No);
    let mut input = TickInput {
        up: window.is_key_down(Key::W) || window.is_key_down(Key::Up),
        down: window.is_key_down(Key::S) || window.is_key_down(Key::Down),
        left: window.is_key_down(Key::A) || window.is_key_down(Key::Left),
        right: window.is_key_down(Key::D) || window.is_key_down(Key::Right),
        jump: pressed(Key::Space),
        dash: pressed(Key::LeftShift) || pressed(Key::RightShift),
        confirm: pressed(Key::Enter),
        pause: pressed(Key::P),
        restart: pressed(Key::R),
        select: None,
    };

    const PROFILE_KEYS: [Key; 3] = [Key::Key1, Key::Key2, Key::Key3];
    for (i, &key) in PROFILE_KEYS.iter().enumerate() {
        if pressed(key) {
            input.select = Some(i);
            break;
        }
    }
    input
}

/// Fold a fresh snapshot into the pending input: direction keys are
/// level-triggered, one-shots accumulate until a tick consumes them
fn merge_input(pending: &mut TickInput, snap: TickInput) {
    pending.up = snap.up;
    pending.down = snap.down;
    pending.left = snap.left;
    pending.right = snap.right;
    pending.jump |= snap.jump;
    pending.dash |= snap.dash;
    pending.confirm |= snap.confirm;
    pending.pause |= snap.pause;
    pending.restart |= snap.restart;
    if snap.select.is_some() {
        pending.select = snap.select;
    }
}

/// React to what the last tick reported
fn handle_events(state: &GameState, highscores: &mut HighScores, audio: &AudioManager) {
    for event in &state.events {
        match event {
            GameEvent::Started => audio.play(SoundEffect::Start),
            GameEvent::ProfileSelected => audio.play(SoundEffect::MenuTick),
            GameEvent::Jumped => audio.play(SoundEffect::Jump),
            GameEvent::Dashed => audio.play(SoundEffect::Dash),
            GameEvent::Caught => {
                let rank = highscores.add_score(
                    state.score,
                    state.survived_secs(),
                    state.profile.name,
                    unix_millis(),
                );
                if rank.is_some() {
                    highscores.save();
                }
                if rank == Some(1) {
                    audio.play(SoundEffect::HighScore);
                } else {
                    audio.play(SoundEffect::Caught);
                }
                log::info!(
                    "caught after {}s with score {}{}",
                    state.survived_secs(),
                    state.score,
                    rank.map(|r| format!(", leaderboard rank {r}"))
                        .unwrap_or_default()
                );
            }
        }
    }
}
