// SPDX-License-Identifier: MPL-2.0
//! FFmpeg frame decoder running off the UI thread.
//!
//! FFmpeg contexts and the audio stream are not `Send`, so everything lives
//! on one blocking Tokio thread. Transport commands arrive on an unbounded channel; frames leave
//! through a two-slot bounded channel, which throttles decoding to what the
//! UI consumes.

use super::audio::{widen_channels, AudioSink, AudioTrack, SinkState};
use crate::error::{Error, Result};
use ffmpeg_next::{format, frame, media, software::scaling};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long the idle loop waits between command polls.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// A decoded RGBA frame.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Tightly packed rows, `width * height * 4` bytes.
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    pub pts_ms: u64,
}

impl DecodedFrame {
    pub fn size_bytes(&self) -> usize {
        self.rgba_data.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    Play,
    Pause,
    /// While paused, one frame at the target is decoded so the still updates.
    Seek { position_ms: u64 },
    SetRate(f64),
    /// Output gain, 0.0 to 1.0. Applied squared by the audio device.
    SetVolume(f32),
    /// Silences the soundtrack without pausing it.
    SetMuted(bool),
    Stop,
}

#[derive(Debug, Clone)]
pub enum DecoderEvent {
    Opened { duration_ms: u64 },
    FrameReady(DecodedFrame),
    EndOfStream,
    Error(String),
}

/// Handle to a running decoder thread.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns the decoder for `path`. Must be called inside a Tokio runtime.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(Error::Io(format!("video file not found: {}", path.display())));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            if let Err(err) = run(&path, command_rx, &event_tx) {
                tracing::warn!("decoder for {:?} failed: {}", path, err);
                let _ = event_tx.blocking_send(DecoderEvent::Error(err.to_string()));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Media("decoder thread has exited".into()))
    }

    /// Next event, or `None` once the decoder thread is gone.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }
}

/// Fallback frame duration for streams without an average frame rate.
const DEFAULT_FRAME_SECS: f64 = 1.0 / 30.0;

/// Open input with its video decoder, RGBA scaler and optional soundtrack.
struct VideoSource {
    input: format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: scaling::Context,
    stream_index: usize,
    secs_per_tick: f64,
    frame_secs: f64,
    audio: Option<AudioTrack>,
    /// Frames ending before this point are dropped after a seek.
    seek_target: Option<f64>,
    /// The demuxer is exhausted and the decoder is being drained.
    draining: bool,
}

impl VideoSource {
    fn open(path: &Path) -> Result<Self> {
        crate::media::video::init_ffmpeg()?;

        let input = format::input(path)?;
        let stream = input
            .streams()
            .best(media::Type::Video)
            .ok_or(crate::error::VideoError::MissingVideoStream)?;
        let stream_index = stream.index();
        let time_base = stream.time_base();
        let secs_per_tick = f64::from(time_base.numerator()) / f64::from(time_base.denominator());
        let frame_rate = stream.avg_frame_rate();
        let frame_secs = if frame_rate.numerator() > 0 && frame_rate.denominator() > 0 {
            f64::from(frame_rate.denominator()) / f64::from(frame_rate.numerator())
        } else {
            DEFAULT_FRAME_SECS
        };

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?
            .decoder()
            .video()?;
        let scaler = scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            format::Pixel::RGBA,
            decoder.width(),
            decoder.height(),
            scaling::Flags::BILINEAR,
        )?;

        Ok(Self {
            input,
            decoder,
            scaler,
            stream_index,
            secs_per_tick,
            frame_secs,
            audio: None,
            seek_target: None,
            draining: false,
        })
    }

    fn has_audio(&self) -> bool {
        self.input.streams().best(media::Type::Audio).is_some()
    }

    /// Starts decoding the soundtrack for a device with this layout.
    fn enable_audio(&mut self, sample_rate: u32, channels: u16) -> Result<()> {
        self.audio = AudioTrack::open(&self.input, sample_rate, channels)?;
        Ok(())
    }

    fn duration_ms(&self) -> u64 {
        crate::media::video::container_duration_ms(&self.input)
    }

    /// Repositions the demuxer. Timestamps are in `AV_TIME_BASE` (microseconds).
    ///
    /// The demuxer lands on the keyframe before the target; frames between
    /// it and the target are decoded but not shown.
    fn seek(&mut self, position_ms: u64) -> Result<()> {
        let target = i64::try_from(position_ms.saturating_mul(1000)).unwrap_or(i64::MAX);
        self.input.seek(target, ..target)?;
        self.decoder.flush();
        self.draining = false;

        let target_secs = position_ms as f64 / 1000.0;
        self.seek_target = (position_ms > 0).then_some(target_secs);
        if let Some(audio) = self.audio.as_mut() {
            audio.seek(target_secs);
        }
        Ok(())
    }

    /// Decodes forward to the next displayable frame.
    ///
    /// Audio packets met on the way are decoded into `sink` when one is given
    /// and dropped otherwise. Returns `Ok(None)` once the demuxer is exhausted
    /// and every buffered frame has been drained. Per-packet failures are
    /// reported on `event_tx` and skipped.
    fn next_frame(
        &mut self,
        sink: Option<(&SinkState, u16)>,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Result<Option<(f64, frame::Video)>> {
        loop {
            let mut decoded = frame::Video::empty();
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts_secs = decoded
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * self.secs_per_tick)
                    .max(0.0);
                if ends_before(pts_secs, self.frame_secs, self.seek_target) {
                    continue;
                }
                self.seek_target = None;

                let mut rgba = frame::Video::empty();
                if let Err(err) = self.scaler.run(&decoded, &mut rgba) {
                    let _ = event_tx.blocking_send(DecoderEvent::Error(format!("scaling failed: {err}")));
                    continue;
                }
                return Ok(Some((pts_secs, rgba)));
            }

            if self.draining {
                return Ok(None);
            }

            let next = self
                .input
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));
            match next {
                Some((index, packet)) if index == self.stream_index => {
                    if let Err(err) = self.decoder.send_packet(&packet) {
                        let _ = event_tx.blocking_send(DecoderEvent::Error(format!("packet rejected: {err}")));
                    }
                }
                Some((index, packet)) => {
                    let Some(audio) = self.audio.as_mut().filter(|a| a.stream_index() == index) else {
                        continue;
                    };
                    let Some((sink, device_channels)) = sink else {
                        continue;
                    };
                    match audio.decode(&packet) {
                        Ok(samples) => sink.push(&widen_channels(
                            &samples,
                            audio.out_channels(),
                            device_channels,
                        )),
                        Err(err) => tracing::debug!("audio packet skipped: {err}"),
                    }
                }
                None => {
                    // Flush frames still held for reordering.
                    self.draining = true;
                    if let Err(err) = self.decoder.send_eof() {
                        tracing::debug!("decoder refused end of input: {err}");
                    }
                }
            }
        }
    }
}

/// Whether a frame at `pts_secs` lasting `frame_secs` ends before `target`.
fn ends_before(pts_secs: f64, frame_secs: f64, target: Option<f64>) -> bool {
    target.is_some_and(|target| pts_secs + frame_secs <= target)
}

/// Maps frame timestamps onto wall-clock deadlines at a given rate.
///
/// The anchor is reset on play, seek and rate change so a new rate applies
/// from the current frame onward.
#[derive(Debug, Default)]
struct Pacer {
    anchor: Option<(Instant, Option<f64>)>,
}

impl Pacer {
    fn restart(&mut self) {
        self.anchor = Some((Instant::now(), None));
    }

    fn stop(&mut self) {
        self.anchor = None;
    }

    /// How long to wait before showing a frame stamped `pts_secs`.
    fn delay_for(&mut self, pts_secs: f64, rate: f64) -> Duration {
        let Some((started, first_pts)) = self.anchor.as_mut() else {
            return Duration::ZERO;
        };
        let first = *first_pts.get_or_insert(pts_secs);
        let due = *started + Duration::from_secs_f64(((pts_secs - first) / rate).max(0.0));
        due.saturating_duration_since(Instant::now())
    }
}

fn run(
    path: &Path,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: &mpsc::Sender<DecoderEvent>,
) -> Result<()> {
    let mut source = VideoSource::open(path)?;
    let (width, height) = (source.decoder.width(), source.decoder.height());
    let sink = if source.has_audio() {
        open_sink(&mut source)
    } else {
        None
    };

    if event_tx
        .blocking_send(DecoderEvent::Opened {
            duration_ms: source.duration_ms(),
        })
        .is_err()
    {
        return Ok(());
    }

    let mut playing = false;
    let mut rate = 1.0_f64;
    let mut pacer = Pacer::default();
    // Show the first frame before playback starts.
    let mut want_still = true;

    loop {
        match command_rx.try_recv() {
            Ok(DecoderCommand::Play) => {
                playing = true;
                pacer.restart();
            }
            Ok(DecoderCommand::Pause) => {
                playing = false;
                pacer.stop();
            }
            Ok(DecoderCommand::Seek { position_ms }) => {
                if let Some(sink) = &sink {
                    sink.state().clear();
                }
                match source.seek(position_ms) {
                    Ok(()) if playing => pacer.restart(),
                    Ok(()) => want_still = true,
                    Err(err) => {
                        let _ = event_tx.blocking_send(DecoderEvent::Error(format!("seek failed: {err}")));
                    }
                }
            }
            Ok(DecoderCommand::SetRate(new_rate)) => {
                rate = new_rate.max(f64::EPSILON);
                if playing {
                    pacer.restart();
                }
            }
            Ok(DecoderCommand::SetVolume(level)) => {
                if let Some(sink) = &sink {
                    sink.state().set_gain(level);
                }
                tracing::debug!(volume = level, "volume changed");
            }
            Ok(DecoderCommand::SetMuted(muted)) => {
                if let Some(sink) = &sink {
                    sink.state().set_muted(muted);
                }
            }
            Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        // Sound only plays at normal speed; boosted playback is silent.
        let audible = playing && is_normal_rate(rate);
        if let Some(sink) = &sink {
            sink.state().set_paused(!audible);
            if playing && !audible {
                sink.state().clear();
            }
        }

        if !playing && !want_still {
            std::thread::sleep(IDLE_POLL);
            continue;
        }

        let audio_out = sink
            .as_ref()
            .filter(|_| audible)
            .map(|sink| (sink.state(), sink.channels()));
        let Some((pts_secs, rgba)) = source.next_frame(audio_out, event_tx)? else {
            let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
            playing = false;
            want_still = false;
            pacer.stop();
            continue;
        };

        std::thread::sleep(pacer.delay_for(pts_secs, rate));
        want_still = false;

        let frame = DecodedFrame {
            rgba_data: Arc::new(extract_rgba_data(&rgba)),
            width,
            height,
            pts_ms: (pts_secs * 1000.0).round() as u64,
        };
        if event_tx.blocking_send(DecoderEvent::FrameReady(frame)).is_err() {
            break;
        }
    }

    tracing::debug!("decoder stopped for {:?}", path);
    Ok(())
}

/// Opens the output device and the matching soundtrack decoder.
///
/// Without a usable device the video plays silently.
fn open_sink(source: &mut VideoSource) -> Option<AudioSink> {
    let sink = match AudioSink::open() {
        Ok(sink) => sink,
        Err(err) => {
            tracing::warn!("playing without sound: {err}");
            return None;
        }
    };
    if let Err(err) = source.enable_audio(sink.sample_rate(), sink.channels()) {
        tracing::warn!("soundtrack could not be decoded: {err}");
        return None;
    }
    Some(sink)
}

fn is_normal_rate(rate: f64) -> bool {
    (rate - 1.0).abs() < f64::EPSILON
}

/// Copies RGBA rows out of a frame, dropping any stride padding.
pub(crate) fn extract_rgba_data(frame: &frame::Video) -> Vec<u8> {
    let row_bytes = frame.width() as usize * 4;
    let stride = frame.stride(0);
    frame
        .data(0)
        .chunks(stride)
        .take(frame.height() as usize)
        .flat_map(|row| &row[..row_bytes.min(row.len())])
        .copied()
        .collect()
}
