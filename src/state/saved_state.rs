use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::game::Snapshot;
use crate::model::DrawHistory;
use crate::theme::Theme;
use crate::util::file::write_atomic;

/// Flat record of a session, written after every change.
///
/// `current_ball` and `generated_phrase` are kept for readers of the
/// file; on load both are rederived from `history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedState {
    pub history: Vec<u8>,
    pub current_ball: Option<u8>,
    pub generated_phrase: Option<String>,
    pub theme: Theme,
}

impl SavedState {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            history: snapshot.history.clone(),
            current_ball: snapshot.current_ball,
            generated_phrase: snapshot.announcement.clone(),
            theme: snapshot.theme,
        }
    }

    /// Loads saved state, falling back to a fresh session when the file
    /// is missing or unreadable. Never fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No saved state at {}", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(state) => state,
            Err(e) => {
                warn!("Ignoring saved state: {e:#}");
                Self::default()
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        write_atomic(path.as_ref(), content.as_bytes())
    }

    /// Validated history. A corrupt list (duplicates or out-of-range
    /// balls) is dropped in favour of an empty game.
    pub fn to_history(&self) -> DrawHistory {
        match DrawHistory::from_numbers(self.history.clone()) {
            Ok(history) => history,
            Err(e) => {
                warn!("Discarding saved history: {e:#}");
                DrawHistory::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::AnimationPhase;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let state = SavedState::load_or_default(dir.path().join("nope.json"));
        assert_eq!(state, SavedState::default());
    }

    #[test]
    fn malformed_file_gives_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ history: oops").unwrap();
        assert_eq!(SavedState::load_or_default(&path), SavedState::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let state = SavedState {
            history: vec![3, 22, 71],
            current_ball: Some(71),
            generated_phrase: Some("Nummer 71".to_string()),
            theme: Theme::Christmas,
        };
        state.save_to(&path).unwrap();
        assert_eq!(SavedState::load_or_default(&path), state);
    }

    #[test]
    fn uses_camel_case_keys() {
        let state = SavedState {
            history: vec![14],
            current_ball: Some(14),
            generated_phrase: Some("Johan Cruijff".to_string()),
            theme: Theme::Default,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"currentBall\":14"));
        assert!(json.contains("\"generatedPhrase\":\"Johan Cruijff\""));
        assert!(json.contains("\"theme\":\"default\""));
    }

    #[test]
    fn partial_record_fills_defaults() {
        let state: SavedState = serde_json::from_str(r#"{"history":[1,2]}"#).unwrap();
        assert_eq!(state.history, vec![1, 2]);
        assert_eq!(state.current_ball, None);
        assert_eq!(state.theme, Theme::Default);
    }

    #[test]
    fn corrupt_history_is_dropped() {
        let state = SavedState {
            history: vec![5, 5, 90],
            ..SavedState::default()
        };
        assert!(state.to_history().is_empty());

        let state = SavedState {
            history: vec![5, 40],
            ..SavedState::default()
        };
        assert_eq!(state.to_history().as_slice(), &[5, 40]);
    }

    #[test]
    fn captures_snapshot() {
        let snapshot = Snapshot {
            history: vec![9, 60],
            current_ball: Some(60),
            phase: AnimationPhase::Revealed,
            announcement: Some("Minuten in een uur".to_string()),
            theme: Theme::Christmas,
            candidate: None,
            celebration: 2,
        };
        let state = SavedState::from_snapshot(&snapshot);
        assert_eq!(state.history, vec![9, 60]);
        assert_eq!(state.current_ball, Some(60));
        assert_eq!(state.generated_phrase.as_deref(), Some("Minuten in een uur"));
        assert_eq!(state.theme, Theme::Christmas);
    }
}
