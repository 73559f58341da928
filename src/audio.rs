//! Procedural audio
//!
//! Every sound is synthesized at startup or on demand - no asset files. An
//! output stream failure degrades to silence with a warning; the game never
//! depends on audio working.

use fundsp::hacker32 as dsp;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Menu selection moved
    MenuTick,
    /// Run started
    Start,
    /// Jump launched
    Jump,
    /// Dash fired
    Dash,
    /// Chaser caught the crawler
    Caught,
    /// Run ended on a new top score
    HighScore,
}

/// Audio manager for the game
pub struct AudioManager {
    /// Keeps the device alive; `None` when audio is unavailable
    output: Option<(OutputStream, OutputStreamHandle)>,
    music: Option<Sink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(err) => {
                log::warn!("failed to open audio output - audio disabled: {err}");
                None
            }
        };
        Self {
            output,
            music: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Mute/unmute everything (effects are skipped, music volume drops to 0)
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.muted = muted;
            self.apply_music_volume();
        }
    }

    fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn apply_music_volume(&self) {
        if let Some(sink) = &self.music {
            sink.set_volume(self.effective_music());
        }
    }

    /// Start the looping background track
    pub fn start_music(&mut self) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            log::warn!("failed to open music sink");
            return;
        };
        let samples = generate_music_loop(SAMPLE_RATE);
        sink.set_volume(self.effective_music());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples).repeat_infinite());
        self.music = Some(sink);
    }

    /// Stop the background track
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    /// Play a sound effect on a detached sink
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_sfx();
        if vol <= 0.0 {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };

        let samples = match effect {
            SoundEffect::MenuTick => generate_menu_tick(SAMPLE_RATE),
            SoundEffect::Start => generate_start(SAMPLE_RATE),
            SoundEffect::Jump => generate_jump(SAMPLE_RATE),
            SoundEffect::Dash => generate_dash(SAMPLE_RATE),
            SoundEffect::Caught => generate_caught(SAMPLE_RATE),
            SoundEffect::HighScore => generate_high_score(SAMPLE_RATE),
        };

        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(vol);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

// === Sound generators ===

/// Short blip for menu navigation
fn generate_menu_tick(sample_rate: u32) -> Vec<f32> {
    let duration = 0.05;
    let mut node =
        dsp::sine_hz(880.0) * dsp::lfo(move |t: f32| dsp::xerp(0.12, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, sample_rate, duration)
}

/// Rising two-note chirp when a run starts
fn generate_start(sample_rate: u32) -> Vec<f32> {
    layered_notes(sample_rate, &[523.0, 784.0], 0.09, 0.16)
}

/// Upward sweep for the jump launch
fn generate_jump(sample_rate: u32) -> Vec<f32> {
    let duration = 0.15;
    let mut node = (dsp::lfo(|t: f32| dsp::xerp(300.0, 700.0, (t / 0.12).min(1.0))) >> dsp::sine())
        * dsp::lfo(move |t: f32| dsp::xerp(0.15, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, sample_rate, duration)
}

/// Filtered-noise whoosh for the dash burst
fn generate_dash(sample_rate: u32) -> Vec<f32> {
    let duration = 0.12;
    let mut node = (dsp::noise() >> dsp::bandpass_hz(1400.0, 0.6) >> dsp::mul(0.5))
        * dsp::lfo(move |t: f32| dsp::xerp(0.3, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, sample_rate, duration)
}

/// Falling saw when the chaser wins
fn generate_caught(sample_rate: u32) -> Vec<f32> {
    let duration = 0.5;
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(400.0, 70.0, (t / 0.4).min(1.0))) >> dsp::saw())
        * dsp::lfo(move |t: f32| dsp::lerp(0.15, 0.0, (t / duration).min(1.0)));
    render_mono(&mut node, sample_rate, duration)
}

/// Celebratory arpeggio for a new top score
fn generate_high_score(sample_rate: u32) -> Vec<f32> {
    layered_notes(sample_rate, &[523.0, 659.0, 784.0, 1046.0], 0.08, 0.2)
}

/// The background loop: a short pentatonic melody
fn generate_music_loop(sample_rate: u32) -> Vec<f32> {
    const MELODY: [f32; 8] = [392.0, 440.0, 523.0, 440.0, 392.0, 330.0, 294.0, 330.0];
    layered_notes(sample_rate, &MELODY, 0.25, 0.22)
}

/// Render a sequence of sine notes, overlapping their decay tails
fn layered_notes(sample_rate: u32, notes: &[f32], note_gap: f32, note_len: f32) -> Vec<f32> {
    let total_duration = note_gap * notes.len() as f32 + note_len;
    let total_samples = (sample_rate as f32 * total_duration) as usize;
    let mut samples = vec![0.0f32; total_samples];

    for (idx, freq) in notes.iter().enumerate() {
        let start = (note_gap * idx as f32 * sample_rate as f32) as usize;
        let mut node = dsp::sine_hz(*freq)
            * dsp::lfo(move |t: f32| dsp::xerp(0.12, 0.001, (t / note_len).min(1.0)));
        let tone = render_mono(&mut node, sample_rate, note_len);
        for (i, s) in tone.into_iter().enumerate() {
            let target = start + i;
            if target < total_samples {
                samples[target] += s;
            }
        }
    }

    samples
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(sample_count);
    for _ in 0..sample_count {
        samples.push(node.get_mono());
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_produce_audible_buffers() {
        for samples in [
            generate_menu_tick(SAMPLE_RATE),
            generate_start(SAMPLE_RATE),
            generate_jump(SAMPLE_RATE),
            generate_dash(SAMPLE_RATE),
            generate_caught(SAMPLE_RATE),
            generate_high_score(SAMPLE_RATE),
            generate_music_loop(SAMPLE_RATE),
        ] {
            assert!(!samples.is_empty());
            assert!(samples.iter().any(|s| s.abs() > 0.01));
            assert!(samples.iter().all(|s| s.abs() <= 1.0));
        }
    }

    #[test]
    fn music_loop_is_a_couple_of_seconds() {
        let samples = generate_music_loop(SAMPLE_RATE);
        let secs = samples.len() as f32 / SAMPLE_RATE as f32;
        assert!((1.5..4.0).contains(&secs));
    }
}
