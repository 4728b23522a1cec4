use std::f32::consts::TAU;

/// Notes played in a loop, one after another.
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
    /// Note frequencies in Hz; `0.0` is a rest.
    pub notes: Vec<f32>,
    /// Seconds per note.
    pub note_secs: f32,
    /// Peak amplitude, `0..=1`.
    pub volume: f32,
}

impl Default for Melody {
    /// A slow C major arpeggio.
    fn default() -> Self {
        Self {
            notes: vec![261.63, 329.63, 392.0, 523.25, 392.0, 329.63],
            note_secs: 0.25,
            volume: 0.15,
        }
    }
}

/// Sine oscillator walking a [`Melody`], one sample at a time.
#[derive(Debug, Clone)]
pub struct Synth {
    melody: Melody,
    sample_rate: f32,
    note_len: usize,
    sample: usize,
    phase: f32,
}

/// Attack/release ramp at each note edge, as a fraction of the note.
const EDGE: f32 = 0.1;

impl Synth {
    pub fn new(melody: Melody, sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1) as f32;
        let note_len = ((melody.note_secs * sample_rate) as usize).max(1);
        Self {
            melody,
            sample_rate,
            note_len,
            sample: 0,
            phase: 0.0,
        }
    }

    /// Samples in one full pass over the melody.
    pub fn loop_len(&self) -> usize {
        self.note_len * self.melody.notes.len().max(1)
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.melody.notes.is_empty() {
            return 0.0;
        }

        let note = (self.sample / self.note_len) % self.melody.notes.len();
        let pos = (self.sample % self.note_len) as f32 / self.note_len as f32;
        self.sample = (self.sample + 1) % self.loop_len();

        let freq = self.melody.notes[note];
        if freq <= 0.0 {
            return 0.0;
        }

        self.phase = (self.phase + freq / self.sample_rate).fract();
        let envelope = (pos / EDGE).min((1.0 - pos) / EDGE).min(1.0);
        (self.phase * TAU).sin() * envelope * self.melody.volume
    }

    /// Fills interleaved frames, writing the same sample to every channel.
    pub fn fill(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let s = self.next_sample();
            frame.fill(s);
        }
    }
}
