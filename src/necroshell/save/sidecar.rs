//! Human-readable JSON summary written next to the binary save. Never read
//! back; it exists so an operator can inspect a save without a hex dump.

use crate::save::engine::{SaveError, SAVE_VERSION};
use chrono::Utc;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// `<savepath>.json`.
pub fn sidecar_path(save_path: &Path) -> PathBuf {
    let mut os = save_path.as_os_str().to_os_string();
    os.push(".json");
    PathBuf::from(os)
}

/// Write the sidecar: engine version, UTC timestamp, and whatever summary
/// fields the collaborator contributed, merged into one flat object.
pub fn write_sidecar(save_path: &Path, summary: &Value) -> Result<(), SaveError> {
    let (major, minor, patch) = SAVE_VERSION;
    let mut doc = json!({
        "format_version": format!("{major}.{minor}.{patch}"),
        "saved_at": Utc::now().to_rfc3339(),
    });

    if let (Some(doc_map), Some(summary_map)) = (doc.as_object_mut(), summary.as_object()) {
        for (key, value) in summary_map {
            doc_map.insert(key.clone(), value.clone());
        }
    }

    let text = serde_json::to_string_pretty(&doc)
        .map_err(|err| SaveError::Handler(format!("sidecar serialization failed: {err}")))?;
    fs::write(sidecar_path(save_path), text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_lands_next_to_the_save() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/game.dat")),
            PathBuf::from("/tmp/game.dat.json")
        );
    }

    #[test]
    fn sidecar_merges_summary_fields() {
        let dir = tempfile::tempdir().unwrap();
        let save_path = dir.path().join("game.dat");

        write_sidecar(&save_path, &json!({ "souls": 13, "completed": false })).unwrap();

        let text = fs::read_to_string(sidecar_path(&save_path)).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["format_version"], "1.0.0");
        assert_eq!(doc["souls"], 13);
        assert_eq!(doc["completed"], false);
        // RFC 3339 timestamp parses back.
        assert!(chrono::DateTime::parse_from_rfc3339(doc["saved_at"].as_str().unwrap()).is_ok());
    }
}
