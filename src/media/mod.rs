// SPDX-License-Identifier: MPL-2.0
//! Media library access, probing and thumbnails.

pub mod library;
pub mod thumbnail;
pub mod video;

pub use library::{
    list_albums_with_videos, list_video_assets, Album, AlbumId, DeniedLibrary, FsLibrary,
    MediaLibrary, PermissionStatus, VideoAsset,
};
pub use thumbnail::{Thumbnail, ThumbnailCache, ThumbnailSlot};

/// Supported file extensions.
pub mod extensions {
    use std::path::Path;

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "avi", "mov", "mkv", "webm"];

    /// Returns true if the path has a video extension (case-insensitive).
    #[must_use]
    pub fn is_video_path(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn recognizes_video_extensions() {
            assert!(is_video_path(Path::new("clip.mp4")));
            assert!(is_video_path(Path::new("clip.MP4")));
            assert!(is_video_path(Path::new("clip.m4v")));
            assert!(is_video_path(Path::new("clip.webm")));
        }

        #[test]
        fn rejects_other_files() {
            assert!(!is_video_path(Path::new("photo.jpg")));
            assert!(!is_video_path(Path::new("notes.txt")));
            assert!(!is_video_path(Path::new("mp4")));
        }
    }
}
