// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for library enumeration.
//!
//! Builds a synthetic library of nested folders with empty video files and
//! measures album listing and per-album asset listing. Duration probing is
//! disabled so only the directory walk and sorting are measured.

use criterion::{criterion_group, criterion_main, Criterion};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;
use vidgallery::config::SortOrder;
use vidgallery::media::{list_albums_with_videos, list_video_assets, FsLibrary};

const FOLDERS: usize = 20;
const VIDEOS_PER_FOLDER: usize = 50;

fn build_library() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for folder in 0..FOLDERS {
        let album = dir.path().join(format!("album-{folder:02}"));
        fs::create_dir_all(album.join("nested")).expect("mkdir");
        for index in 0..VIDEOS_PER_FOLDER {
            fs::write(album.join(format!("clip-{index:03}.mp4")), b"").expect("write");
        }
        fs::write(album.join("cover.jpg"), b"").expect("write");
        fs::write(album.join("nested").join("extra.mkv"), b"").expect("write");
    }
    dir
}

fn library(root: &Path, sort_order: SortOrder) -> FsLibrary {
    FsLibrary::new(vec![root.to_path_buf()])
        .with_sort_order(sort_order)
        .without_duration_lookup()
}

fn bench_list_albums(c: &mut Criterion) {
    let dir = build_library();
    let library = library(dir.path(), SortOrder::Alphabetical);

    let mut group = c.benchmark_group("library_scan");
    group.bench_function("list_albums_with_videos", |b| {
        b.iter(|| black_box(list_albums_with_videos(&library)));
    });
    group.finish();
}

fn bench_list_assets(c: &mut Criterion) {
    let dir = build_library();
    let mut group = c.benchmark_group("library_scan");

    for (name, sort_order) in [
        ("alphabetical", SortOrder::Alphabetical),
        ("newest_first", SortOrder::NewestFirst),
    ] {
        let library = library(dir.path(), sort_order);
        let albums = list_albums_with_videos(&library);
        let album = albums
            .iter()
            .find(|album| album.title == "album-00")
            .expect("album-00 listed");

        group.bench_function(format!("list_video_assets_{name}"), |b| {
            b.iter(|| black_box(list_video_assets(&library, &album.id, 50)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_list_albums, bench_list_assets);
criterion_main!(benches);
