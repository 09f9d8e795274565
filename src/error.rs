// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error types.
//!
//! [`Error`] is what fallible operations return. [`VideoError`] is the
//! user-facing classification of playback failures; the player screen shows
//! its localized message instead of the raw FFmpeg text.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("state store: {0}")]
    Database(String),
    /// FFmpeg could not open, decode or scale a file.
    #[error("media: {0}")]
    Media(String),
    #[error(transparent)]
    Video(#[from] VideoError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<ffmpeg_next::Error> for Error {
    fn from(err: ffmpeg_next::Error) -> Self {
        Error::Media(err.to_string())
    }
}

/// Why a video could not be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoError {
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),
    #[error("file is corrupted")]
    Corrupted,
    #[error("file has no video stream")]
    MissingVideoStream,
    #[error("decoding failed: {0}")]
    Decode(String),
    /// Missing file, permission denied, read failure.
    #[error("file could not be read: {0}")]
    Unreadable(String),
    #[error("{0}")]
    Unknown(String),
}

/// Codec names recognized in FFmpeg messages, matched lowercase.
const KNOWN_CODECS: &[&str] = &["h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2"];

impl VideoError {
    /// Fluent key of the message shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::UnsupportedCodec(_) => "error-video-unsupported-codec",
            Self::Corrupted => "error-video-corrupted",
            Self::MissingVideoStream => "error-video-no-video-stream",
            Self::Decode(_) => "error-video-decoding-failed",
            Self::Unreadable(_) => "error-video-io",
            Self::Unknown(_) => "error-video-general",
        }
    }

    /// Classifies a raw decoder message.
    ///
    /// Codec checks run first because FFmpeg reports a missing decoder as
    /// "not found", which would otherwise read as a missing file.
    pub fn from_message(msg: &str) -> Self {
        let lower = msg.to_lowercase();
        let mentions = |needles: &[&str]| needles.iter().any(|needle| lower.contains(needle));

        if mentions(&["codec", "decoder"]) {
            if let Some(codec) = KNOWN_CODECS.iter().find(|codec| lower.contains(*codec)) {
                return Self::UnsupportedCodec(codec.to_uppercase());
            }
            if mentions(&["not found", "unsupported"]) {
                return Self::Decode(msg.to_owned());
            }
        }

        if mentions(&["no such file", "not found", "permission denied", "i/o error"]) {
            Self::Unreadable(msg.to_owned())
        } else if mentions(&["no video stream", "invalid data found"]) {
            Self::MissingVideoStream
        } else if mentions(&["corrupt", "invalid", "malformed"]) {
            Self::Corrupted
        } else if mentions(&["packet", "scaling", "seek", "decode"]) {
            Self::Decode(msg.to_owned())
        } else {
            Self::Unknown(msg.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_display() {
        let err: Error = std::io::Error::other("disk failure").into();
        assert!(matches!(&err, Error::Io(message) if message.contains("disk failure")));
        assert_eq!(err.to_string(), "I/O error: disk failure");
    }

    #[test]
    fn sqlite_errors_map_to_database() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn video_errors_display_transparently() {
        let err: Error = VideoError::Corrupted.into();
        assert_eq!(err.to_string(), "file is corrupted");
    }

    #[test]
    fn missing_files_are_unreadable() {
        assert!(matches!(
            VideoError::from_message("No such file or directory"),
            VideoError::Unreadable(_)
        ));
        assert!(matches!(
            VideoError::from_message("Permission denied"),
            VideoError::Unreadable(_)
        ));
    }

    #[test]
    fn missing_decoder_names_the_codec() {
        assert_eq!(
            VideoError::from_message("Decoder h264 not found"),
            VideoError::UnsupportedCodec("H264".into())
        );
    }

    #[test]
    fn unknown_decoder_is_a_decode_failure() {
        assert!(matches!(
            VideoError::from_message("Decoder not found"),
            VideoError::Decode(_)
        ));
    }

    #[test]
    fn stream_and_corruption_messages() {
        assert_eq!(
            VideoError::from_message("No video stream found in file"),
            VideoError::MissingVideoStream
        );
        assert_eq!(
            VideoError::from_message("File is corrupt or invalid"),
            VideoError::Corrupted
        );
        assert!(matches!(
            VideoError::from_message("Packet send failed: error"),
            VideoError::Decode(_)
        ));
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(
            VideoError::from_message("something odd happened"),
            VideoError::Unknown("something odd happened".into())
        );
    }

    #[test]
    fn every_variant_has_a_message_key() {
        let all = [
            VideoError::UnsupportedCodec("AV1".into()),
            VideoError::Corrupted,
            VideoError::MissingVideoStream,
            VideoError::Decode(String::new()),
            VideoError::Unreadable(String::new()),
            VideoError::Unknown(String::new()),
        ];
        for err in all {
            assert!(err.i18n_key().starts_with("error-video-"));
        }
    }
}
