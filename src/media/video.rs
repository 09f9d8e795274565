// SPDX-License-Identifier: MPL-2.0
//! FFmpeg helpers for probing and thumbnailing video files.

use crate::error::{Error, Result, VideoError};
use crate::media::thumbnail::Thumbnail;
use ffmpeg_next::{format, frame, media, software::scaling};
use std::path::Path;
use std::sync::OnceLock;

static FFMPEG_INIT: OnceLock<Result<()>> = OnceLock::new();

/// Initializes FFmpeg once per process and quiets its logging to errors only.
///
/// The outcome of the first call is kept, so a failed initialization keeps
/// failing instead of letting later callers use an unready FFmpeg.
pub fn init_ffmpeg() -> Result<()> {
    run_once(&FFMPEG_INIT, || {
        ffmpeg_next::init()
            .map_err(|e| Error::Media(format!("FFmpeg initialization failed: {e}")))?;

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
        Ok(())
    })
}

fn run_once(cell: &OnceLock<Result<()>>, init: impl FnOnce() -> Result<()>) -> Result<()> {
    cell.get_or_init(init).clone()
}

/// Duration of an opened container in milliseconds, preferring the video stream.
///
/// Returns 0 when neither the stream nor the container reports one.
pub fn container_duration_ms(ictx: &format::context::Input) -> u64 {
    let stream_secs = ictx
        .streams()
        .best(media::Type::Video)
        .filter(|stream| stream.duration() > 0)
        .map(|stream| {
            let time_base = stream.time_base();
            stream.duration() as f64 * f64::from(time_base.numerator())
                / f64::from(time_base.denominator())
        });

    let secs = match stream_secs {
        Some(secs) => secs,
        None if ictx.duration() > 0 => {
            ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
        }
        None => 0.0,
    };

    (secs.max(0.0) * 1000.0).round() as u64
}

/// Reads a file's duration in milliseconds without decoding frames.
pub fn read_duration_ms<P: AsRef<Path>>(path: P) -> Result<u64> {
    init_ffmpeg()?;

    let input = format::input(path.as_ref())?;
    if input.streams().best(media::Type::Video).is_none() {
        return Err(VideoError::MissingVideoStream.into());
    }
    Ok(container_duration_ms(&input))
}

/// Size of a thumbnail no wider than `max_width`, keeping the aspect ratio.
pub(crate) fn thumbnail_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled_height = (u64::from(height) * u64::from(max_width) / u64::from(width)).max(1);
    (max_width, scaled_height as u32)
}

/// Decodes the first frame of a video, downscaled to at most `max_width` pixels.
pub fn extract_thumbnail<P: AsRef<Path>>(path: P, max_width: u32) -> Result<Thumbnail> {
    init_ffmpeg()?;

    let mut input = format::input(path.as_ref())?;
    let stream = input
        .streams()
        .best(media::Type::Video)
        .ok_or(VideoError::MissingVideoStream)?;
    let stream_index = stream.index();
    let mut decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?
        .decoder()
        .video()?;

    let (width, height) = (decoder.width(), decoder.height());
    if width == 0 || height == 0 {
        return Err(Error::Media(format!("unusable frame size {width}x{height}")));
    }
    let (thumb_width, thumb_height) = thumbnail_size(width, height, max_width);
    let mut scaler = scaling::Context::get(
        decoder.format(),
        width,
        height,
        format::Pixel::RGBA,
        thumb_width,
        thumb_height,
        scaling::Flags::BILINEAR,
    )?;

    let mut decoded = frame::Video::empty();
    for (stream, packet) in input.packets() {
        if stream.index() != stream_index {
            continue;
        }
        decoder.send_packet(&packet)?;
        if decoder.receive_frame(&mut decoded).is_ok() {
            let mut rgba = frame::Video::empty();
            scaler.run(&decoded, &mut rgba)?;
            let pixels = crate::video_player::extract_rgba_data(&rgba);
            return Ok(Thumbnail::from_rgba(rgba.width(), rgba.height(), pixels));
        }
    }

    Err(Error::Media("no decodable frame".into()))
}
