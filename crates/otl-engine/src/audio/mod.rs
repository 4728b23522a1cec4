//! Background sound.
//!
//! No audio files are loaded: [`Tone`] synthesizes a short looping melody on
//! the default output device, and [`Silence`] stands in when there is none.

mod synth;
mod tone;

use anyhow::Result;

pub use synth::{Melody, Synth};
pub use tone::Tone;

/// A looping sound a phase can start and stop.
pub trait Sound {
    fn play(&mut self) -> Result<()>;
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Sound that plays nothing.
#[derive(Debug, Default)]
pub struct Silence {
    playing: bool,
}

impl Sound for Silence {
    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Opens a looping [`Tone`], or [`Silence`] when disabled or no device works.
pub fn background_loop(enabled: bool, melody: Melody) -> Box<dyn Sound> {
    if !enabled {
        return Box::new(Silence::default());
    }

    match Tone::open(melody) {
        Ok(tone) => Box::new(tone),
        Err(e) => {
            log::warn!("audio unavailable, continuing silently: {e:#}");
            Box::new(Silence::default())
        }
    }
}
