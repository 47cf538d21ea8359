//! Corruption recovery round-trips for both persisted stores.

use std::fs;

use slither_game::{
    Difficulty, RankingConfig, RankingStore, SaveConfig, SaveProfile, SaveStore,
};

#[test]
fn save_store_roundtrip_survives_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = SaveConfig {
        path: dir.path().join("save.json"),
        ..SaveConfig::default()
    };

    // Persist the default profile, then stomp the file on disk.
    let mut store = SaveStore::load(cfg.clone(), 0.0);
    store.flush(0.0, true);
    assert!(cfg.path.exists());
    fs::write(&cfg.path, b"}}}{{{").unwrap();

    let recovered = SaveStore::load(cfg, 1.0);
    assert_eq!(*recovered.profile(), SaveProfile::default());
}

#[test]
fn ranking_store_roundtrip_survives_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = RankingConfig {
        path: dir.path().join("rankings.json"),
        ..RankingConfig::default()
    };

    let mut store = RankingStore::load(cfg.clone(), 0.0);
    store.submit(Difficulty::Hard, 120, "keith", 1.0);
    fs::write(&cfg.path, b"\xde\xad\xbe\xef").unwrap();

    let recovered = RankingStore::load(cfg, 2.0);
    for difficulty in Difficulty::ALL {
        assert!(recovered.query("all_time", difficulty).is_empty());
    }
}

#[test]
fn wrong_shaped_json_is_treated_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = RankingConfig {
        path: dir.path().join("rankings.json"),
        ..RankingConfig::default()
    };
    // Parses as JSON but the record lists are not homogeneous records.
    fs::write(
        &cfg.path,
        br#"{"all_time": {"easy": [1, 2, 3], "medium": [], "hard": [], "infinite": []}}"#,
    )
    .unwrap();

    let store = RankingStore::load(cfg, 0.0);
    assert!(store.query("all_time", Difficulty::Easy).is_empty());
}

#[test]
fn flush_never_leaves_a_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = SaveConfig {
        path: dir.path().join("save.json"),
        ..SaveConfig::default()
    };
    let mut store = SaveStore::load(cfg.clone(), 0.0);
    store.flush(0.0, true);
    assert!(cfg.path.exists());
    assert!(!cfg.path.with_extension("tmp").exists());
}
