use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};

use super::{Melody, Sound, Synth};

/// Looping [`Synth`] on the default output device.
///
/// The stream runs from `open` on; `play`/`stop` only flip a flag the audio
/// callback reads, so the main thread never blocks on the device.
pub struct Tone {
    playing: Arc<AtomicBool>,
    _stream: cpal::Stream,
}

impl Tone {
    pub fn open(melody: Melody) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no audio output device available"))?;

        let config = device
            .default_output_config()
            .context("failed to get default output config")?;

        let playing = Arc::new(AtomicBool::new(false));
        let synth = Synth::new(melody, config.sample_rate().0);
        let channels = config.channels() as usize;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build::<f32>(&device, &config.into(), channels, synth, playing.clone())?
            }
            cpal::SampleFormat::I16 => {
                build::<i16>(&device, &config.into(), channels, synth, playing.clone())?
            }
            cpal::SampleFormat::U16 => {
                build::<u16>(&device, &config.into(), channels, synth, playing.clone())?
            }
            other => bail!("unsupported sample format: {other:?}"),
        };

        stream.play().context("failed to start audio stream")?;
        log::debug!("audio stream started");

        Ok(Self {
            playing,
            _stream: stream,
        })
    }
}

fn build<S>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut synth: Synth,
    playing: Arc<AtomicBool>,
) -> Result<cpal::Stream>
where
    S: SizedSample + FromSample<f32>,
{
    let mut scratch: Vec<f32> = Vec::new();
    device
        .build_output_stream(
            config,
            move |data: &mut [S], _: &cpal::OutputCallbackInfo| {
                if scratch.len() < data.len() {
                    scratch.resize(data.len(), 0.0);
                }
                let buf = &mut scratch[..data.len()];
                if playing.load(Ordering::Relaxed) {
                    synth.fill(buf, channels);
                } else {
                    buf.fill(0.0);
                }
                for (out, s) in data.iter_mut().zip(buf.iter()) {
                    *out = S::from_sample(*s);
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .context("failed to build audio stream")
}

impl Sound for Tone {
    fn play(&mut self) -> Result<()> {
        self.playing.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn stop(&mut self) {
        self.playing.store(false, Ordering::Relaxed);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }
}
