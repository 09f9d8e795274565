// SPDX-License-Identifier: MPL-2.0
use std::fs;
use tempfile::tempdir;
use vidgallery::app::persisted_state::OnboardingStore;
use vidgallery::config::{self, Config, SortOrder};
use vidgallery::i18n::fluent::I18n;
use vidgallery::media::{
    list_albums_with_videos, list_video_assets, AlbumId, DeniedLibrary, FsLibrary,
};

#[test]
fn onboarding_flag_survives_reopening() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let db_path = dir.path().join("nested").join("state.db");

    {
        let store = OnboardingStore::open(&db_path).expect("Failed to open store");
        assert!(!store.is_onboarding_visited());
        store
            .mark_onboarding_visited()
            .expect("Failed to mark onboarding");
    }

    let reopened = OnboardingStore::open(&db_path).expect("Failed to reopen store");
    assert!(reopened.is_onboarding_visited());
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.language = Some("en-US".to_string());
    config::save_to_path(&config, &config_path).expect("Failed to write config");
    let loaded = config::load_from_path(&config_path).expect("Failed to load config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    config.general.language = Some("fr".to_string());
    config::save_to_path(&config, &config_path).expect("Failed to write config");
    let loaded = config::load_from_path(&config_path).expect("Failed to load config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("directories-title"), "Vos collections de vidéos");
}

#[test]
fn invalid_config_falls_back_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(dir.path().join("settings.toml"), "[player\nvolume = ").expect("write");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}

#[test]
fn library_lists_only_folders_with_videos() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let root = dir.path();
    fs::create_dir_all(root.join("trips")).expect("mkdir");
    fs::create_dir_all(root.join("photos")).expect("mkdir");
    fs::write(root.join("trips/beach.mp4"), b"not really a video").expect("write");
    fs::write(root.join("trips/alps.MKV"), b"not really a video").expect("write");
    fs::write(root.join("photos/cat.jpg"), b"jpeg").expect("write");

    let library = FsLibrary::new(vec![root.to_path_buf()])
        .with_sort_order(SortOrder::Alphabetical)
        .without_duration_lookup();

    let albums = list_albums_with_videos(&library);
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].title, "trips");
    assert_eq!(albums[0].asset_count, 2);

    let videos = list_video_assets(&library, &albums[0].id, 50);
    let names: Vec<&str> = videos.iter().map(|v| v.filename.as_str()).collect();
    assert_eq!(names, vec!["alps.MKV", "beach.mp4"]);
    assert!(videos.iter().all(|v| v.uri.starts_with("file://")));
}

#[test]
fn denied_library_yields_empty_lists() {
    assert!(list_albums_with_videos(&DeniedLibrary).is_empty());
    assert!(list_video_assets(&DeniedLibrary, &AlbumId::new("anything"), 50).is_empty());
}
