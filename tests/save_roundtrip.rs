//! Save-engine behavior through the public API: framing, rotation, sidecar,
//! and validation working together on a real session.

use necroshell::save::{
    self, load_from_path, save_file_exists, save_file_size, save_to_path, validate_save_file,
    SaveError,
};
use necroshell::session::{Ending, Session};

fn sample() -> Session {
    Session {
        player_name: "Vess".to_string(),
        commands_executed: 77,
        sessions_started: 3,
        play_seconds: 1234,
        completed: false,
        ending: Ending::Unresolved,
    }
}

#[test]
fn session_survives_a_full_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.dat");

    save_to_path(&sample(), &path).unwrap();
    let loaded: Session = load_from_path(&path).unwrap();
    assert_eq!(loaded, sample());

    let header = validate_save_file(&path).unwrap();
    assert_eq!(header.payload_len + 20, save_file_size(&path).unwrap());
}

#[test]
fn sidecar_reflects_the_saved_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.dat");
    save_to_path(&sample(), &path).unwrap();

    let text = std::fs::read_to_string(dir.path().join("game.dat.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["player"], "Vess");
    assert_eq!(doc["commands_executed"], 77);
    assert_eq!(doc["format_version"], "1.0.0");
}

#[test]
fn backup_holds_the_previous_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.dat");

    let mut first = sample();
    first.commands_executed = 1;
    save_to_path(&first, &path).unwrap();

    let mut second = sample();
    second.commands_executed = 2;
    save_to_path(&second, &path).unwrap();

    let current: Session = load_from_path(&path).unwrap();
    let previous: Session = load_from_path(&dir.path().join("game.dat.bak")).unwrap();
    assert_eq!(current.commands_executed, 2);
    assert_eq!(previous.commands_executed, 1);
}

#[test]
fn garbage_file_is_not_a_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.dat");
    std::fs::write(&path, b"definitely not a save file, but long enough").unwrap();

    assert!(matches!(
        validate_save_file(&path).unwrap_err(),
        SaveError::BadMagic { .. }
    ));
}

#[test]
fn probes_track_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.dat");

    assert!(!save_file_exists(&path));
    save_to_path(&sample(), &path).unwrap();
    assert!(save_file_exists(&path));
    assert!(save_file_size(&path).unwrap() > 20);

    assert_eq!(save::default_save_path().file_name().unwrap(), ".necroshell_save.dat");
}
