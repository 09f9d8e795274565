// SPDX-License-Identifier: MPL-2.0
//! Soundtrack decoding and output.
//!
//! [`AudioTrack`] turns the container's audio packets into interleaved `f32`
//! samples at the device rate. [`AudioSink`] owns the cpal stream; the device
//! callback pulls from a shared buffer and applies gain, mute and pause.
//! Both live on the decoder thread, next to the video decoder.

use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ffmpeg_next::software::resampling;
use ffmpeg_next::{format, frame, media, ChannelLayout, Packet};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// State shared between the decoder thread and the device callback.
#[derive(Debug)]
pub(super) struct SinkState {
    buffer: Mutex<VecDeque<f32>>,
    capacity: usize,
    gain_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl SinkState {
    /// `capacity` is in samples across all channels.
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            gain_bits: AtomicU32::new(1.0_f32.to_bits()),
            muted: AtomicBool::new(false),
            paused: AtomicBool::new(true),
        }
    }

    /// Queues samples. Whatever does not fit in the buffer is dropped.
    pub(super) fn push(&self, samples: &[f32]) {
        let Ok(mut buffer) = self.buffer.lock() else {
            return;
        };
        let room = self.capacity.saturating_sub(buffer.len());
        buffer.extend(samples.iter().take(room));
    }

    pub(super) fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    pub(super) fn buffered(&self) -> usize {
        self.buffer.lock().map_or(0, |buffer| buffer.len())
    }

    pub(super) fn set_gain(&self, volume: f32) {
        self.gain_bits
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn gain(&self) -> f32 {
        f32::from_bits(self.gain_bits.load(Ordering::Relaxed))
    }

    pub(super) fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub(super) fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Fills one device buffer.
    ///
    /// Paused output is silent and keeps the queue. Muted output is silent
    /// but still consumes, so the soundtrack stays level with the picture.
    /// Gain is squared to follow perceived loudness.
    pub(super) fn fill<T: cpal::SizedSample + cpal::FromSample<f32>>(&self, out: &mut [T]) {
        let silence = || T::from_sample(0.0_f32);

        if self.paused.load(Ordering::Relaxed) {
            out.fill(silence());
            return;
        }
        let Ok(mut buffer) = self.buffer.lock() else {
            out.fill(silence());
            return;
        };

        let muted = self.muted.load(Ordering::Relaxed);
        let gain = self.gain() * self.gain();
        for sample in out.iter_mut() {
            *sample = match buffer.pop_front() {
                Some(_) if muted => silence(),
                Some(value) => T::from_sample((value * gain).clamp(-1.0, 0.999_999_9)),
                None => silence(),
            };
        }
    }
}

/// The default output device, playing whatever is pushed into its state.
pub(super) struct AudioSink {
    state: Arc<SinkState>,
    sample_rate: u32,
    channels: u16,
    _stream: cpal::Stream,
}

impl AudioSink {
    pub(super) fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("no audio output device found".to_string()))?;
        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let channels = supported_config.channels();
        // About one second of audio.
        let state = Arc::new(SinkState::new(sample_rate as usize * channels as usize));

        let config = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&state))?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&state))?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&state))?,
            other => {
                return Err(Error::Io(format!("unsupported audio sample format {other:?}")));
            }
        };
        stream
            .play()
            .map_err(|e| Error::Io(format!("failed to start audio stream: {e}")))?;

        Ok(Self {
            state,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    pub(super) fn state(&self) -> &SinkState {
        &self.state
    }

    pub(super) fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub(super) fn channels(&self) -> u16 {
        self.channels
    }
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    state: Arc<SinkState>,
) -> Result<cpal::Stream> {
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| state.fill(data),
            |err| tracing::warn!("audio output error: {err}"),
            None,
        )
        .map_err(|e| Error::Io(format!("failed to build audio stream: {e}")))
}

/// Decoder and resampler for the container's main audio stream.
pub(super) struct AudioTrack {
    decoder: ffmpeg_next::decoder::Audio,
    resampler: resampling::Context,
    stream_index: usize,
    secs_per_tick: f64,
    out_rate: u32,
    out_channels: u16,
    /// Frames ending before this point are dropped after a seek.
    skip_until: Option<f64>,
}

impl AudioTrack {
    /// Opens the best audio stream of `input`, converting to packed `f32`.
    ///
    /// Returns `Ok(None)` for silent videos. Anything other than one channel
    /// is mixed to stereo.
    pub(super) fn open(
        input: &format::context::Input,
        out_rate: u32,
        out_channels: u16,
    ) -> Result<Option<Self>> {
        let Some(stream) = input.streams().best(media::Type::Audio) else {
            return Ok(None);
        };
        let stream_index = stream.index();
        let time_base = stream.time_base();
        let secs_per_tick = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?
            .decoder()
            .audio()?;

        let (layout, out_channels) = match out_channels {
            1 => (ChannelLayout::MONO, 1),
            _ => (ChannelLayout::STEREO, 2),
        };
        let resampler = resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            format::Sample::F32(format::sample::Type::Packed),
            layout,
            out_rate,
        )?;

        Ok(Some(Self {
            decoder,
            resampler,
            stream_index,
            secs_per_tick,
            out_rate,
            out_channels,
            skip_until: None,
        }))
    }

    pub(super) fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Samples per output frame; the device may want more channels than this.
    pub(super) fn out_channels(&self) -> u16 {
        self.out_channels
    }

    pub(super) fn seek(&mut self, target_secs: f64) {
        self.decoder.flush();
        self.skip_until = Some(target_secs);
    }

    /// Decodes one packet into interleaved samples.
    pub(super) fn decode(&mut self, packet: &Packet) -> Result<Vec<f32>> {
        self.decoder.send_packet(packet)?;

        let mut samples = Vec::new();
        let mut decoded = frame::Audio::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let mut resampled = frame::Audio::empty();
            self.resampler.run(&decoded, &mut resampled)?;

            let chunk = interleaved_samples(
                resampled.data(0),
                resampled.samples() * usize::from(self.out_channels),
            );
            let pts_secs = decoded
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * self.secs_per_tick);
            let frame_secs =
                chunk.len() as f64 / (f64::from(self.out_rate) * f64::from(self.out_channels));

            if let Some(target) = self.skip_until {
                if pts_secs + frame_secs < target {
                    continue;
                }
                self.skip_until = None;
            }
            samples.extend(chunk);
        }
        Ok(samples)
    }
}

/// Reads `count` little-endian `f32` values from a packed sample plane.
fn interleaved_samples(data: &[u8], count: usize) -> Vec<f32> {
    data.chunks_exact(4)
        .take(count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Spreads mono or stereo samples over a device with more channels.
///
/// Extra device channels stay silent.
pub(super) fn widen_channels(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from >= to || from == 0 {
        return samples.to_vec();
    }
    let (from, to) = (usize::from(from), usize::from(to));
    let mut widened = Vec::with_capacity(samples.len() / from * to);
    for frame in samples.chunks_exact(from) {
        widened.extend_from_slice(frame);
        if from == 1 && to >= 2 {
            // Mono goes to both front speakers.
            widened.push(frame[0]);
            widened.extend(std::iter::repeat(0.0).take(to - 2));
        } else {
            widened.extend(std::iter::repeat(0.0).take(to - from));
        }
    }
    widened
}
