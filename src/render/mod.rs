//! Software rendering into a bare `u32` framebuffer
//!
//! The whole scene is composed on the CPU and handed to the window as one
//! `0x00RRGGBB` buffer. The renderer only reads simulation state; nothing it
//! does feeds back into the game.

pub mod font;

use glam::IVec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Direction, GamePhase, GameState};

/// Pixel format of the framebuffer (0x00RRGGBB)
pub type Pixel = u32;

#[inline]
const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

// Garden palette
const GRASS: Pixel = rgb(96, 160, 66);
const GRASS_LIGHT: Pixel = rgb(112, 178, 78);
const BODY_GREEN: Pixel = rgb(70, 140, 60);
const BODY_LIGHT: Pixel = rgb(120, 200, 90);
const HEAD_GREEN: Pixel = rgb(52, 110, 46);
const HEAD_LIGHT: Pixel = rgb(95, 170, 75);
const EYE: Pixel = rgb(20, 24, 18);
const CHASER_RED: Pixel = rgb(140, 34, 30);
const CHASER_LIGHT: Pixel = rgb(205, 70, 55);
const LEAF_BIT: Pixel = rgb(150, 220, 110);
const HUD_TEXT: Pixel = rgb(250, 250, 240);
const HUD_SHADOW: Pixel = rgb(25, 40, 20);
const MENU_ACCENT: Pixel = rgb(255, 214, 90);

/// Fixed-size CPU framebuffer
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixels, row-major, for `update_with_buffer`
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    /// Fill a rectangle, clipped to the frame
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Pixel) {
        let x0 = x.clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        if x0 >= x1 {
            return;
        }
        for row in y0..y1 {
            let offset = row * self.width;
            self.data[offset + x0..offset + x1].fill(color);
        }
    }

    /// Darken the whole frame to roughly half brightness
    pub fn dim(&mut self) {
        for px in self.data.iter_mut() {
            *px = (*px >> 1) & 0x007F_7F7F;
        }
    }

    /// Pull every channel toward white; `strength` is 0..=255
    pub fn flash(&mut self, strength: u8) {
        let s = strength as u32;
        for px in self.data.iter_mut() {
            let r = (*px >> 16) & 0xFF;
            let g = (*px >> 8) & 0xFF;
            let b = *px & 0xFF;
            let r = r + (255 - r) * s / 255;
            let g = g + (255 - g) * s / 255;
            let b = b + (255 - b) * s / 255;
            *px = (r << 16) | (g << 8) | b;
        }
    }
}

/// Compose one frame of the current session
pub fn draw(frame: &mut Frame, state: &GameState, best: Option<u64>, settings: &Settings, fps: u32) {
    draw_background(frame);

    match state.phase {
        GamePhase::Menu => {
            draw_crawler(frame, state);
            frame.dim();
            draw_menu(frame, state, best);
        }
        GamePhase::Playing => {
            draw_chaser(frame, state);
            draw_crawler(frame, state);
            draw_hud(frame, state, settings, fps);
        }
        GamePhase::Paused => {
            draw_chaser(frame, state);
            draw_crawler(frame, state);
            frame.dim();
            draw_centered(frame, PLAY_HEIGHT / 2 - 20, 3, HUD_TEXT, "PAUSED");
            draw_centered(frame, PLAY_HEIGHT / 2 + 20, 1, HUD_TEXT, "P: RESUME");
        }
        GamePhase::GameOver => {
            draw_chaser(frame, state);
            draw_crawler(frame, state);
            draw_particles(frame, state);
            // Brief white flash right after the capture
            let elapsed = DEATH_EFFECT_TICKS.saturating_sub(state.death_ticks);
            if elapsed < 12 {
                frame.flash((200 - elapsed * 16) as u8);
            }
            draw_game_over(frame, state, best);
        }
    }
}

fn draw_background(frame: &mut Frame) {
    let tile = SEGMENT_SIZE;
    for ty in 0..(PLAY_HEIGHT / tile) {
        for tx in 0..(PLAY_WIDTH / tile) {
            let color = if (tx + ty) % 2 == 0 { GRASS } else { GRASS_LIGHT };
            frame.fill_rect(tx * tile, ty * tile, tile, tile, color);
        }
    }
}

fn draw_square(frame: &mut Frame, pos: IVec2, size: i32, border: Pixel, fill: Pixel) {
    frame.fill_rect(pos.x, pos.y, size, size, border);
    frame.fill_rect(pos.x + 2, pos.y + 2, size - 4, size - 4, fill);
}

fn draw_crawler(frame: &mut Frame, state: &GameState) {
    // Tail first so the head is drawn on top when segments overlap
    let segments: Vec<IVec2> = state.crawler.body.iter().collect();
    for &segment in segments.iter().skip(1).rev() {
        draw_square(frame, segment, SEGMENT_SIZE, BODY_GREEN, BODY_LIGHT);
    }
    let head = state.crawler.body.head();
    draw_square(frame, head, SEGMENT_SIZE, HEAD_GREEN, HEAD_LIGHT);

    // Eyes sit on the leading edge
    let (a, b) = match state.crawler.motion.facing {
        Direction::Up => (IVec2::new(5, 4), IVec2::new(12, 4)),
        Direction::Down => (IVec2::new(5, 13), IVec2::new(12, 13)),
        Direction::Left => (IVec2::new(4, 5), IVec2::new(4, 12)),
        Direction::Right => (IVec2::new(13, 5), IVec2::new(13, 12)),
    };
    frame.fill_rect(head.x + a.x, head.y + a.y, 3, 3, EYE);
    frame.fill_rect(head.x + b.x, head.y + b.y, 3, 3, EYE);
}

fn draw_chaser(frame: &mut Frame, state: &GameState) {
    draw_square(
        frame,
        state.chaser.pos,
        state.chaser.size,
        CHASER_RED,
        CHASER_LIGHT,
    );
}

fn draw_particles(frame: &mut Frame, state: &GameState) {
    for particle in &state.particles {
        frame.fill_rect(
            particle.pos.x as i32,
            particle.pos.y as i32,
            3,
            3,
            LEAF_BIT,
        );
    }
}

/// Text with a one-pixel drop shadow, the HUD house style
fn draw_shadowed(frame: &mut Frame, x: i32, y: i32, scale: i32, color: Pixel, text: &str) {
    font::draw_text(frame, x + scale, y + scale, scale, HUD_SHADOW, text);
    font::draw_text(frame, x, y, scale, color, text);
}

fn draw_centered(frame: &mut Frame, y: i32, scale: i32, color: Pixel, text: &str) {
    let x = (PLAY_WIDTH - font::text_width(text, scale)) / 2;
    draw_shadowed(frame, x, y, scale, color, text);
}

fn draw_hud(frame: &mut Frame, state: &GameState, settings: &Settings, fps: u32) {
    let score_line = format!("SCORE {}", state.score);
    let time_line = format!("TIME {}", state.survived_secs());
    draw_shadowed(frame, 10, PLAY_HEIGHT - 22, 2, HUD_TEXT, &score_line);
    let time_x = PLAY_WIDTH - font::text_width(&time_line, 2) - 10;
    draw_shadowed(frame, time_x, PLAY_HEIGHT - 22, 2, HUD_TEXT, &time_line);

    if settings.show_fps {
        let fps_line = format!("FPS {fps}");
        let x = PLAY_WIDTH - font::text_width(&fps_line, 1) - 6;
        draw_shadowed(frame, x, 6, 1, HUD_TEXT, &fps_line);
    }
}

fn draw_menu(frame: &mut Frame, state: &GameState, best: Option<u64>) {
    use crate::sim::BehaviorProfile;

    draw_centered(frame, 90, 4, MENU_ACCENT, "LEAF CRAWLER");

    for (i, profile) in BehaviorProfile::ALL.iter().enumerate() {
        let y = 200 + i as i32 * 30;
        let line = format!("{} {}", i + 1, profile.name);
        let x = (PLAY_WIDTH - font::text_width(&line, 2)) / 2;
        let color = if i == state.profile_index { MENU_ACCENT } else { HUD_TEXT };
        if i == state.profile_index {
            draw_shadowed(frame, x - 24, y, 2, MENU_ACCENT, ">");
        }
        draw_shadowed(frame, x, y, 2, color, &line);
    }

    draw_centered(frame, 320, 1, HUD_TEXT, "WASD OR ARROWS: MOVE");
    draw_centered(frame, 335, 1, HUD_TEXT, "SPACE: JUMP  SHIFT: DASH");
    draw_centered(frame, 350, 1, HUD_TEXT, "ENTER: START");
    if let Some(best) = best {
        draw_centered(frame, 395, 2, MENU_ACCENT, &format!("BEST {best}"));
    }
}

fn draw_game_over(frame: &mut Frame, state: &GameState, best: Option<u64>) {
    draw_centered(frame, 150, 4, CHASER_LIGHT, "GAME OVER");
    draw_centered(
        frame,
        230,
        2,
        HUD_TEXT,
        &format!("SCORE {}  TIME {}", state.score, state.survived_secs()),
    );
    if let Some(best) = best {
        let label = if state.score >= best.max(1) { "NEW BEST" } else { "BEST" };
        draw_centered(frame, 265, 2, MENU_ACCENT, &format!("{label} {}", best.max(state.score)));
    }
    if state.death_ticks == 0 {
        draw_centered(frame, 330, 1, HUD_TEXT, "ENTER: MENU  R: RETRY");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn fill_rect_clips_to_the_frame() {
        let mut frame = Frame::new(16, 16);
        frame.fill_rect(-4, -4, 8, 8, 0x00FF_0000);
        frame.fill_rect(12, 12, 100, 100, 0x0000_FF00);
        assert_eq!(frame.data()[0], 0x00FF_0000);
        assert_eq!(frame.data()[15 * 16 + 15], 0x0000_FF00);
    }

    #[test]
    fn dim_halves_channels() {
        let mut frame = Frame::new(2, 1);
        frame.fill_rect(0, 0, 2, 1, rgb(200, 100, 50));
        frame.dim();
        assert_eq!(frame.data()[0], rgb(100, 50, 25));
    }

    #[test]
    fn full_flash_saturates_to_white() {
        let mut frame = Frame::new(1, 1);
        frame.fill_rect(0, 0, 1, 1, rgb(10, 20, 30));
        frame.flash(255);
        assert_eq!(frame.data()[0], rgb(255, 255, 255));
    }

    #[test]
    fn every_phase_renders_without_panicking() {
        let mut frame = Frame::new(PLAY_WIDTH as usize, PLAY_HEIGHT as usize);
        let settings = Settings::default();
        let mut state = GameState::new(3, 0);
        draw(&mut frame, &state, Some(44), &settings, 50);

        state.start_run();
        draw(&mut frame, &state, Some(44), &settings, 50);

        state.phase = GamePhase::Paused;
        draw(&mut frame, &state, None, &settings, 50);

        state.phase = GamePhase::GameOver;
        state.death_ticks = DEATH_EFFECT_TICKS;
        state.spawn_death_burst();
        draw(&mut frame, &state, Some(44), &settings, 50);
    }
}
