// SPDX-License-Identifier: MPL-2.0
//! Media library enumeration: albums and their video assets.
//!
//! The screens talk to a [`MediaLibrary`] through two free functions,
//! [`list_albums_with_videos`] and [`list_video_assets`], which never fail:
//! permission denial and enumeration errors are logged and turn into empty
//! lists. [`FsLibrary`] is the on-disk implementation, where every library
//! root and each sub-folder beneath it (down to a configurable depth) is an
//! album.

use crate::config::{SortOrder, DEFAULT_MAX_SCAN_DEPTH};
use crate::error::{Error, Result};
use crate::media::extensions::is_video_path;
use crate::media::video;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Outcome of asking for access to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Stable identifier of an album within one library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlbumId(String);

impl AlbumId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A media collection: a folder holding videos.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    /// Number of video assets; filled in by [`list_albums_with_videos`].
    pub asset_count: usize,
    pub path: PathBuf,
}

/// A single playable video file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAsset {
    pub id: String,
    pub uri: String,
    pub path: PathBuf,
    pub filename: String,
    /// Duration in milliseconds; 0 when the file could not be read.
    pub duration_ms: u64,
    pub modified: Option<SystemTime>,
}

impl VideoAsset {
    /// Builds an asset for `path` with an already-known duration.
    pub fn from_path(path: PathBuf, duration_ms: u64) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        Self {
            id: path.to_string_lossy().into_owned(),
            uri: format!("file://{}", path.display()),
            path,
            filename,
            duration_ms,
            modified,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

/// Source of albums and video assets.
pub trait MediaLibrary: Send + Sync {
    fn request_permission(&self) -> PermissionStatus;

    fn albums(&self) -> Result<Vec<Album>>;

    fn video_count(&self, album: &Album) -> Result<usize>;

    /// At most `page_size` assets, in the library's display order.
    fn video_assets(&self, album: &Album, page_size: usize) -> Result<Vec<VideoAsset>>;
}

/// Albums containing at least one video, sorted by title.
///
/// `asset_count` of each returned album is its video count. Denied
/// permission or any enumeration error yields an empty list.
pub fn list_albums_with_videos(library: &dyn MediaLibrary) -> Vec<Album> {
    if library.request_permission() == PermissionStatus::Denied {
        tracing::warn!("media library permission denied");
        return Vec::new();
    }

    let albums = match library.albums() {
        Ok(albums) => albums,
        Err(err) => {
            tracing::warn!("failed to enumerate albums: {}", err);
            return Vec::new();
        }
    };

    let mut with_videos: Vec<Album> = albums
        .into_iter()
        .filter_map(|mut album| match library.video_count(&album) {
            Ok(0) => None,
            Ok(count) => {
                album.asset_count = count;
                Some(album)
            }
            Err(err) => {
                tracing::warn!("failed to count videos in {:?}: {}", album.path, err);
                None
            }
        })
        .collect();

    with_videos.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.path.cmp(&b.path))
    });
    tracing::debug!("{} albums with videos", with_videos.len());
    with_videos
}

/// Up to `page_size` video assets of the album identified by `album_id`.
///
/// Denied permission, an unknown album or any enumeration error yields an
/// empty list.
pub fn list_video_assets(
    library: &dyn MediaLibrary,
    album_id: &AlbumId,
    page_size: usize,
) -> Vec<VideoAsset> {
    if library.request_permission() == PermissionStatus::Denied {
        tracing::warn!("media library permission denied");
        return Vec::new();
    }

    let album = match library.albums() {
        Ok(albums) => albums.into_iter().find(|album| &album.id == album_id),
        Err(err) => {
            tracing::warn!("failed to enumerate albums: {}", err);
            return Vec::new();
        }
    };

    let Some(album) = album else {
        tracing::warn!("album {} not found", album_id.as_str());
        return Vec::new();
    };

    library
        .video_assets(&album, page_size)
        .unwrap_or_else(|err| {
            tracing::warn!("failed to list videos in {:?}: {}", album.path, err);
            Vec::new()
        })
}

/// Library backed by folders on disk.
#[derive(Debug, Clone)]
pub struct FsLibrary {
    roots: Vec<PathBuf>,
    max_depth: usize,
    sort_order: SortOrder,
    read_durations: bool,
}

impl FsLibrary {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            max_depth: DEFAULT_MAX_SCAN_DEPTH,
            sort_order: SortOrder::default(),
            read_durations: true,
        }
    }

    /// How many folder levels below each root become albums.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Disables FFmpeg duration probing; every asset reports 0 ms.
    #[must_use]
    pub fn without_duration_lookup(mut self) -> Self {
        self.read_durations = false;
        self
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn collect_albums(&self, dir: &Path, depth: usize, albums: &mut Vec<Album>) {
        albums.push(album_for(dir));

        if depth >= self.max_depth {
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!("skipping unreadable folder {:?}: {}", dir, err);
                return;
            }
        };

        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            // file_type() does not follow symlinks, which keeps the walk acyclic
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .map(|entry| entry.path())
            .filter(|path| !is_hidden(path))
            .collect();
        children.sort();

        for child in children {
            self.collect_albums(&child, depth + 1, albums);
        }
    }

    fn video_files(album: &Album) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&album.path)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && !is_hidden(&path) && is_video_path(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

impl MediaLibrary for FsLibrary {
    fn request_permission(&self) -> PermissionStatus {
        if self.roots.iter().any(|root| fs::read_dir(root).is_ok()) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn albums(&self) -> Result<Vec<Album>> {
        let mut albums = Vec::new();
        for root in &self.roots {
            if !root.is_dir() {
                tracing::warn!("library root {:?} is not a readable folder", root);
                continue;
            }
            self.collect_albums(root, 0, &mut albums);
        }
        Ok(albums)
    }

    fn video_count(&self, album: &Album) -> Result<usize> {
        Ok(Self::video_files(album)?.len())
    }

    fn video_assets(&self, album: &Album, page_size: usize) -> Result<Vec<VideoAsset>> {
        let mut files = Self::video_files(album)?;
        sort_video_files(&mut files, self.sort_order);
        files.truncate(page_size);

        let assets = files
            .into_iter()
            .map(|path| {
                let duration_ms = if self.read_durations {
                    video::read_duration_ms(&path).unwrap_or_else(|err| {
                        tracing::debug!("duration lookup failed for {:?}: {}", path, err);
                        0
                    })
                } else {
                    0
                };
                VideoAsset::from_path(path, duration_ms)
            })
            .collect();
        Ok(assets)
    }
}

fn album_for(dir: &Path) -> Album {
    let title = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned());
    Album {
        id: AlbumId::new(dir.to_string_lossy()),
        title,
        asset_count: 0,
        path: dir.to_path_buf(),
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn sort_video_files(files: &mut [PathBuf], sort_order: SortOrder) {
    let modified = |path: &PathBuf| {
        path.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    };
    let by_name = |a: &PathBuf, b: &PathBuf| {
        let a_name = a.file_name().map(|n| n.to_string_lossy().to_lowercase());
        let b_name = b.file_name().map(|n| n.to_string_lossy().to_lowercase());
        a_name.cmp(&b_name)
    };

    match sort_order {
        SortOrder::Alphabetical => files.sort_by(by_name),
        SortOrder::NewestFirst => {
            files.sort_by(|a, b| modified(b).cmp(&modified(a)).then_with(|| by_name(a, b)));
        }
        SortOrder::OldestFirst => {
            files.sort_by(|a, b| modified(a).cmp(&modified(b)).then_with(|| by_name(a, b)));
        }
    }
}

/// Library used when no usable roots exist; always denies access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLibrary;

impl MediaLibrary for DeniedLibrary {
    fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    fn albums(&self) -> Result<Vec<Album>> {
        Err(Error::Io("media library access denied".into()))
    }

    fn video_count(&self, _album: &Album) -> Result<usize> {
        Err(Error::Io("media library access denied".into()))
    }

    fn video_assets(&self, _album: &Album, _page_size: usize) -> Result<Vec<VideoAsset>> {
        Err(Error::Io("media library access denied".into()))
    }
}
