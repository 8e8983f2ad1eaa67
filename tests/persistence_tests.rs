//! Persistence tests - saved game and leaderboard on disk

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use blocktris::core::{
    EngineConfig, GameEngine, Leaderboard, Storage, LEADERBOARD_KEY, SNAPSHOT_KEY,
};
use blocktris::storage::FileStorage;
use blocktris::types::GamePhase;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("blocktris_persistence_{tag}_{nanos}"))
}

#[test]
fn test_autosaved_game_resumes_in_new_engine() {
    let dir = unique_temp_dir("resume");

    let mut engine = GameEngine::new(
        EngineConfig::seeded(11).with_autosave(true),
        FileStorage::new(&dir),
    );
    engine.reset();
    for _ in 0..3 {
        engine.hard_drop();
    }
    let board = engine.board().clone();
    let (score, next, held) = (engine.score(), engine.next_piece(), engine.held_piece());
    assert!(dir.join(format!("{SNAPSHOT_KEY}.json")).is_file());

    let mut resumed = GameEngine::new(EngineConfig::seeded(12), FileStorage::new(&dir));
    assert!(resumed.load_snapshot());
    assert_eq!(resumed.phase(), GamePhase::Running);
    assert_eq!(resumed.board(), &board);
    assert_eq!(resumed.score(), score);
    assert_eq!(resumed.next_piece(), next);
    assert_eq!(resumed.held_piece(), held);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_save_file_is_rejected() {
    let dir = unique_temp_dir("corrupt");
    let mut storage = FileStorage::new(&dir);
    storage.set(SNAPSHOT_KEY, "{\"board\": [[0]]}").unwrap();

    let mut engine = GameEngine::new(EngineConfig::seeded(1), storage);
    engine.reset();
    let before = engine.snapshot();

    assert!(engine.try_load_snapshot().is_err());
    assert!(!engine.load_snapshot());
    assert_eq!(engine.snapshot(), before);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_leaderboard_shares_save_dir() {
    let dir = unique_temp_dir("leaderboard");
    let mut storage = FileStorage::new(&dir);

    let mut scores = Leaderboard::load(&storage);
    assert!(scores.is_empty());
    assert_eq!(scores.submit("ada", 1200, 2, 11, 1), Some(1));
    assert_eq!(scores.submit("bob", 800, 1, 6, 2), Some(2));
    scores.save(&mut storage).unwrap();

    assert!(dir.join(format!("{LEADERBOARD_KEY}.json")).is_file());
    let reloaded = Leaderboard::load(&FileStorage::new(&dir));
    assert_eq!(reloaded, scores);

    // Clearing the saved game leaves the leaderboard alone.
    storage.remove(SNAPSHOT_KEY).unwrap();
    assert_eq!(Leaderboard::load(&storage).entries().len(), 2);

    let _ = fs::remove_dir_all(&dir);
}
