use ggez::audio::{SoundData, SoundSource, Source};
use ggez::Context;
use std::f32::consts::TAU;

const SAMPLE_RATE: u32 = 44_100;

#[derive(Copy, Clone)]
enum Waveform {
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    // phase in [0, 1)
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.
                } else {
                    -1.
                }
            }
            Waveform::Triangle => 4. * (phase - 0.5).abs() - 1.,
        }
    }
}

/// Constant-pitch beep with a short release to avoid clicks
fn beep(freq: f32, duration: f32, waveform: Waveform, gain: f32) -> Vec<u8> {
    let n = (SAMPLE_RATE as f32 * duration) as usize;
    let release = n.saturating_sub(n / 8);

    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = if i >= release {
                (n - i) as f32 / (n - release) as f32
            } else {
                1.
            };
            gain * envelope * waveform.sample((freq * t).fract())
        })
        .collect();
    wav_bytes(&samples)
}

/// Downward sweep played on death: sawtooth gliding 880 Hz -> 80 Hz
/// with an exponential gain ramp-down
fn death_sweep() -> Vec<u8> {
    const DURATION: f32 = 0.4;
    const F_START: f32 = 880.;
    const F_END: f32 = 80.;
    const GAIN: f32 = 0.1;
    const GAIN_END: f32 = 0.0001;

    let n = (SAMPLE_RATE as f32 * DURATION) as usize;
    let mut phase = 0.;
    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let progress = i as f32 / n as f32;
            let freq = F_START * (F_END / F_START).powf(progress);
            phase = (phase + freq / SAMPLE_RATE as f32).fract();
            let gain = GAIN * (GAIN_END / GAIN).powf(progress);
            gain * (2. * phase - 1.)
        })
        .collect();
    wav_bytes(&samples)
}

/// Mono 16-bit PCM WAV
fn wav_bytes(samples: &[f32]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;

    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for &sample in samples {
        let quantized = (sample.clamp(-1., 1.) * i16::MAX as f32) as i16;
        out.extend_from_slice(&quantized.to_le_bytes());
    }
    out
}

/// Short tone cues for eat/step/death. All failures to build or play
/// a source degrade to silence; the game never depends on a working
/// audio subsystem.
pub struct Sounds {
    eat: Option<Source>,
    step: Option<Source>,
    die: Option<Source>,

    pub muted: bool,
    pub volume: f32,
}

impl Sounds {
    pub fn new(ctx: &mut Context, muted: bool, volume: f32) -> Self {
        let mut build = |bytes: Vec<u8>, name: &str| {
            match Source::from_data(ctx, SoundData::from_bytes(&bytes)) {
                Ok(source) => Some(source),
                Err(e) => {
                    eprintln!("warning: no {name} sound: {e}");
                    None
                }
            }
        };

        Self {
            eat: build(beep(660., 0.05, Waveform::Triangle, 0.8), "eat"),
            step: build(beep(220., 0.02, Waveform::Square, 0.2), "step"),
            die: build(death_sweep(), "death"),

            muted,
            volume,
        }
    }

    fn play(source: &mut Option<Source>, ctx: &Context, volume: f32) {
        if let Some(source) = source {
            source.set_volume(volume);
            // a failed cue is not worth interrupting the game for
            let _ = source.play_detached(ctx);
        }
    }

    pub fn eat(&mut self, ctx: &Context) {
        if !self.muted {
            Self::play(&mut self.eat, ctx, self.volume);
        }
    }

    pub fn step(&mut self, ctx: &Context) {
        if !self.muted {
            Self::play(&mut self.step, ctx, self.volume);
        }
    }

    pub fn death(&mut self, ctx: &Context) {
        if !self.muted {
            Self::play(&mut self.die, ctx, self.volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_is_well_formed() {
        let bytes = beep(440., 0.1, Waveform::Sine, 0.5);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[36..40], b"data");
        // header + declared data length match the buffer
        let data_len = u32::from_le_bytes(bytes[40..44].try_into().unwrap());
        assert_eq!(bytes.len(), 44 + data_len as usize);
    }

    #[test]
    fn samples_stay_in_range() {
        for bytes in [
            beep(660., 0.05, Waveform::Triangle, 0.8),
            beep(220., 0.02, Waveform::Square, 0.2),
            death_sweep(),
        ] {
            for chunk in bytes[44..].chunks_exact(2) {
                let _sample = i16::from_le_bytes([chunk[0], chunk[1]]);
                // decoding must consume the whole buffer evenly
            }
            assert_eq!((bytes.len() - 44) % 2, 0);
        }
    }

    #[test]
    fn sweep_is_nonempty_and_decays() {
        let bytes = death_sweep();
        let samples: Vec<i16> = bytes[44..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert!(!samples.is_empty());

        let peak_start = samples[..1000].iter().map(|s| s.abs()).max().unwrap();
        let peak_end = samples[samples.len() - 1000..]
            .iter()
            .map(|s| s.abs())
            .max()
            .unwrap();
        assert!(peak_start > peak_end * 10);
    }
}
