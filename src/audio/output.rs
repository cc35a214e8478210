use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat,
};
use log::{error, info};
use rtrb::{Producer, RingBuffer};

use crate::{
    config::SynthConfig,
    player::renderer::{Renderer, RendererError},
    synth::{
        message::{SynthMessage, TimedMessage},
        patch,
        poly::PolySynth,
    },
    theory::{ChordKey, Pitch},
    MAX_BLOCK_SIZE,
};

/// Capacity of the control → audio note queue.
pub const MESSAGE_QUEUE_SIZE: usize = 256;

/// Everything that exists only while the output is open.
struct OutputStream {
    _stream: cpal::Stream,
    tx: Producer<TimedMessage>,
    frames: Arc<AtomicU64>,
    sample_rate: f64,
}

impl OutputStream {
    fn frame_at(&self, at: f64) -> u64 {
        (at.max(0.0) * self.sample_rate).round() as u64
    }
}

/// `Renderer` that plays through the default cpal output device.
///
/// The `PolySynth` lives inside the stream callback. Note events reach it
/// over a wait-free ring buffer, stamped with the output frame they belong
/// to; the callback publishes how many frames it has rendered, which is the
/// renderer clock.
pub struct CpalRenderer {
    config: SynthConfig,
    output: Option<OutputStream>,
}

impl CpalRenderer {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            output: None,
        }
    }

    pub fn sample_rate(&self) -> Option<f64> {
        self.output.as_ref().map(|out| out.sample_rate)
    }

    fn open(&self) -> Result<OutputStream, RendererError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(RendererError::NoOutputDevice)?;
        let supported = device.default_output_config()?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(RendererError::UnsupportedFormat(
                supported.sample_format().to_string(),
            ));
        }

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;

        let (tx, rx) = RingBuffer::<TimedMessage>::new(MESSAGE_QUEUE_SIZE);
        let frames = Arc::new(AtomicU64::new(0));

        let stream = device.build_output_stream(
            &supported.into(),
            {
                let mut synth = PolySynth::new(
                    sample_rate,
                    self.config.max_polyphony,
                    patch::voice_factory(self.config),
                    rx,
                );
                let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
                let frames = Arc::clone(&frames);
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut written = 0;
                    while written < total_frames {
                        let len = (total_frames - written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..len];
                        synth.render_block(block);

                        // Mono to every channel
                        let out_off = written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }
                        written += len;
                    }
                    frames.store(synth.frame_counter(), Ordering::Release);
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        info!(
            "audio output open: {} Hz, {} channels, {} voices, {}",
            sample_rate, channels, self.config.max_polyphony, self.config.waveform
        );

        Ok(OutputStream {
            _stream: stream,
            tx,
            frames,
            sample_rate: sample_rate as f64,
        })
    }

    fn send(
        &mut self,
        pitches: &[Pitch],
        at: f64,
        message: impl Fn(u8) -> SynthMessage,
    ) -> Result<(), RendererError> {
        let output = self.output.as_mut().ok_or(RendererError::NotReady)?;
        let frame = output.frame_at(at);
        push_all(&mut output.tx, frame, pitches, message)
    }
}

/// Queue one message per pitch at `frame`, all or nothing.
///
/// A chord is never split: if the ring cannot take every pitch, nothing is
/// pushed and the caller keeps its previous state.
fn push_all(
    tx: &mut Producer<TimedMessage>,
    frame: u64,
    pitches: &[Pitch],
    message: impl Fn(u8) -> SynthMessage,
) -> Result<(), RendererError> {
    let available = tx.slots();
    if available < pitches.len() {
        return Err(RendererError::QueueFull {
            needed: pitches.len(),
            available,
        });
    }

    for pitch in pitches {
        let timed = TimedMessage::new(frame, message(pitch.midi_note()));
        if tx.push(timed).is_err() {
            // slots() was checked above and this is the only producer.
            return Err(RendererError::QueueFull {
                needed: 1,
                available: 0,
            });
        }
    }
    Ok(())
}

impl Renderer for CpalRenderer {
    fn initialize(&mut self) -> Result<(), RendererError> {
        if self.output.is_none() {
            self.output = Some(self.open()?);
        }
        Ok(())
    }

    fn now(&self) -> f64 {
        self.output.as_ref().map_or(0.0, |out| {
            out.frames.load(Ordering::Acquire) as f64 / out.sample_rate
        })
    }

    fn attack(&mut self, key: ChordKey, pitches: &[Pitch], at: f64) -> Result<(), RendererError> {
        let group = key.number();
        let velocity = self.config.velocity;
        self.send(pitches, at, |note| SynthMessage::NoteOn {
            group,
            note,
            velocity,
        })
    }

    fn release(&mut self, key: ChordKey, pitches: &[Pitch], at: f64) -> Result<(), RendererError> {
        let group = key.number();
        self.send(pitches, at, |note| SynthMessage::NoteOff { group, note })
    }

    fn dispose(&mut self) {
        if self.output.take().is_some() {
            info!("audio output closed");
        }
    }
}
