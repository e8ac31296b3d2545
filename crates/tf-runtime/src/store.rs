use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tf_core::{decode_state_asset, State, TimeforkError};
use walkdir::WalkDir;

/// A transition resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub trigger: String,
    /// Name from the first postcondition; `None` when the transition has none.
    pub destination: Option<String>,
}

#[derive(Debug, Clone)]
struct StateEntry {
    state: Arc<State>,
    edges: Vec<Edge>,
}

impl StateEntry {
    fn new(state: State) -> Self {
        let edges = state
            .transitions
            .iter()
            .map(|transition| Edge {
                trigger: state.trigger_name(transition).into_owned(),
                destination: state.destination(transition).map(|name| name.into_owned()),
            })
            .collect();
        Self {
            state: Arc::new(state),
            edges,
        }
    }
}

/// Every compiled state, keyed by name. Read-only once play begins.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    entries: HashMap<String, StateEntry>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_states(states: impl IntoIterator<Item = State>) -> Self {
        let mut store = Self::new();
        for state in states {
            store.insert(state);
        }
        store
    }

    pub fn load_dir(assets_dir: &Path) -> Result<Self, TimeforkError> {
        if !assets_dir.is_dir() {
            return Err(TimeforkError::new(
                "STORE_DIR_NOT_FOUND",
                format!("asset dir is missing: {}", assets_dir.display()),
            ));
        }

        let mut store = Self::new();
        for entry in WalkDir::new(assets_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .map_err(|error| TimeforkError::new("STORE_DIR_SCAN", error.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let bytes = fs::read(entry.path()).map_err(|error| {
                TimeforkError::new(
                    "STORE_ASSET_READ",
                    format!("{}: {}", entry.path().display(), error),
                )
            })?;
            let state = decode_state_asset(name, &bytes).map_err(|error| TimeforkError {
                message: format!("{}: {}", entry.path().display(), error.message),
                ..error
            })?;
            store.insert(state);
        }

        tracing::info!(dir = %assets_dir.display(), states = store.len(), "loaded state store");
        Ok(store)
    }

    pub fn insert(&mut self, state: State) {
        let name = state.name.clone();
        if self.entries.insert(name.clone(), StateEntry::new(state)).is_some() {
            tracing::warn!(state = %name, "state replaced an earlier one with the same name");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<State>> {
        self.entries.get(name).map(|entry| &entry.state)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Outgoing edges of `name` in authoring order; empty for unknown states.
    pub fn edges(&self, name: &str) -> &[Edge] {
        self.entries
            .get(name)
            .map(|entry| entry.edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.entries.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::runtime_test_support::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tf_compiler::{compile_scripts_dir, compile_state};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("timefork-runtime-{}-{}", name, nanos))
    }

    #[test]
    fn edges_resolve_trigger_and_destination() {
        let store = story_store();
        let edges = store.edges("start");
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].trigger, "Next");
        assert_eq!(edges[0].destination.as_deref(), Some("ask_age_kairos"));
        assert_eq!(edges[1].trigger, "15 YEARS AGO");
        assert!(store.edges("missing").is_empty());
        assert!(store.edges("future_city").is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let store = story_store();
        assert_eq!(
            store.names(),
            vec!["ask_age_kairos", "future_city", "past_kitchen", "start"]
        );
        assert!(store.contains("start"));
        assert!(!store.contains("nowhere"));
    }

    #[test]
    fn load_dir_reads_compiled_assets() {
        let root = temp_path("load");
        let scripts = root.join("states");
        let assets = root.join("assets");
        fs::create_dir_all(&scripts).expect("scripts dir");
        fs::write(
            scripts.join("start.txt"),
            "*Angela: Hello.\n-\n[Next] -> ask_age_kairos\n",
        )
        .expect("write start");
        fs::write(scripts.join("ask_age_kairos.txt"), "*Angela: Well?\n").expect("write ask");
        compile_scripts_dir(&scripts, &assets).expect("compile should pass");
        fs::write(assets.join(".DS_Store"), "junk").expect("write junk");

        let store = StateStore::load_dir(&assets).expect("load should pass");
        assert_eq!(store.len(), 2);
        let start = store.get("start").expect("start should load");
        let expected = compile_state("start", "*Angela: Hello.\n-\n[Next] -> ask_age_kairos\n")
            .expect("compile");
        assert_eq!(start.as_ref(), &expected);
        assert_eq!(store.edges("start")[0].destination.as_deref(), Some("ask_age_kairos"));
    }

    #[test]
    fn load_dir_fails_on_missing_dir_and_corrupt_asset() {
        let missing = temp_path("missing");
        assert_eq!(
            StateStore::load_dir(&missing).expect_err("missing").code,
            "STORE_DIR_NOT_FOUND"
        );

        let root = temp_path("corrupt");
        fs::create_dir_all(&root).expect("root");
        fs::write(root.join("start"), b"nope").expect("write");
        let error = StateStore::load_dir(&root).expect_err("corrupt");
        assert_eq!(error.code, "ASSET_CHUNK_TAG");
    }
}
