use std::fs;
use std::path::{Path, PathBuf};

use tf_core::{encode_state_asset, State, TimeforkError};
use walkdir::WalkDir;

use crate::script_parse::compile_state;

pub const SCRIPT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    pub state_name: String,
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledAsset {
    pub state_name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Compiles every script in `scripts_dir` and writes one asset per state into `out_dir`.
///
/// Nothing is written unless every script compiles.
pub fn compile_scripts_dir(
    scripts_dir: &Path,
    out_dir: &Path,
) -> Result<Vec<CompiledAsset>, TimeforkError> {
    let sources = read_script_sources(scripts_dir)?;
    if sources.is_empty() {
        tracing::warn!(dir = %scripts_dir.display(), "no .txt scripts found");
    }
    let states = compile_sources(&sources)?;
    write_state_assets(&states, out_dir)
}

pub fn read_script_sources(scripts_dir: &Path) -> Result<Vec<ScriptSource>, TimeforkError> {
    if !scripts_dir.exists() {
        return Err(TimeforkError::new(
            "COMPILE_SOURCE_NOT_FOUND",
            format!("scripts dir does not exist: {}", scripts_dir.display()),
        ));
    }
    if !scripts_dir.is_dir() {
        return Err(TimeforkError::new(
            "COMPILE_SOURCE_NOT_DIR",
            format!("scripts dir is not a directory: {}", scripts_dir.display()),
        ));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(scripts_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .follow_links(false)
    {
        let entry = entry.map_err(|error| {
            TimeforkError::new("COMPILE_SOURCE_SCAN", error.to_string())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(state_name) = state_name_from_path(entry.path()) else {
            continue;
        };
        let text = fs::read_to_string(entry.path()).map_err(|error| {
            TimeforkError::new(
                "COMPILE_SOURCE_READ",
                format!("{}: {}", entry.path().display(), error),
            )
        })?;
        sources.push(ScriptSource {
            state_name,
            path: entry.path().to_path_buf(),
            text,
        });
    }

    Ok(sources)
}

/// `states/start.txt` names the state `start`.
pub fn state_name_from_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(SCRIPT_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}

pub fn compile_sources(sources: &[ScriptSource]) -> Result<Vec<State>, TimeforkError> {
    sources
        .iter()
        .map(|source| {
            compile_state(&source.state_name, &source.text).map_err(|error| {
                let message = format!("{}: {}", source.path.display(), error.message);
                TimeforkError {
                    message,
                    ..error
                }
            })
        })
        .collect()
}

pub fn write_state_assets(
    states: &[State],
    out_dir: &Path,
) -> Result<Vec<CompiledAsset>, TimeforkError> {
    fs::create_dir_all(out_dir).map_err(|error| {
        TimeforkError::new(
            "COMPILE_ASSET_WRITE",
            format!("{}: {}", out_dir.display(), error),
        )
    })?;

    let mut written = Vec::with_capacity(states.len());
    for state in states {
        let bytes = encode_state_asset(state)?;
        let path = out_dir.join(&state.name);
        fs::write(&path, &bytes).map_err(|error| {
            TimeforkError::new(
                "COMPILE_ASSET_WRITE",
                format!("{}: {}", path.display(), error),
            )
        })?;
        tracing::info!(state = %state.name, bytes = bytes.len(), "wrote state asset");
        written.push(CompiledAsset {
            state_name: state.name.clone(),
            path,
            bytes: bytes.len(),
        });
    }
    Ok(written)
}
