use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tf_core::TimeforkError;
use tf_layout::{CharRange, Color};
use tf_runtime::RuntimeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerColor {
    pub speaker: String,
    pub color: Color,
}

impl SpeakerColor {
    pub fn new(speaker: impl Into<String>, color: Color) -> Self {
        Self {
            speaker: speaker.into(),
            color,
        }
    }
}

/// Screen geometry, palette, and runtime settings for a play session.
///
/// Every field is optional in JSON; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub timeline_width: i32,
    /// Wrap width for dialogue lines inside a timeline column.
    pub state_width: i32,
    pub font_size: i32,
    pub scroll_speed: i32,
    pub min_char: u32,
    pub max_char: u32,
    pub background_color: Color,
    pub default_color: Color,
    pub date_color: Color,
    pub trigger_color: Color,
    pub timeline_index_color: Color,
    pub speaker_colors: Vec<SpeakerColor>,
    pub runtime: RuntimeConfig,
}

impl Default for PlayConfig {
    fn default() -> Self {
        let timeline_width = 600;
        Self {
            screen_width: 1280,
            screen_height: 720,
            timeline_width,
            state_width: (timeline_width as f32 * 0.9) as i32,
            font_size: 24,
            scroll_speed: 32,
            min_char: 32,
            max_char: 126,
            background_color: [0x00, 0x00, 0x00, 0xff],
            default_color: [0xdd, 0xdd, 0xdd, 0xff],
            date_color: [0x88, 0xcc, 0xff, 0xff],
            trigger_color: [0xff, 0xd7, 0x40, 0xff],
            timeline_index_color: [0x66, 0x66, 0x66, 0xff],
            speaker_colors: vec![
                SpeakerColor::new("Angela", [0xff, 0x9e, 0xb5, 0xff]),
                SpeakerColor::new("Child", [0xff, 0x9e, 0xb5, 0xff]),
                SpeakerColor::new("You", [0x9e, 0xff, 0xb0, 0xff]),
                SpeakerColor::new("Z", [0xc4, 0x9e, 0xff, 0xff]),
            ],
            runtime: RuntimeConfig::default(),
        }
    }
}

impl PlayConfig {
    pub fn load(path: &Path) -> Result<Self, TimeforkError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            TimeforkError::new(
                "PLAY_CONFIG_READ",
                format!("Failed to read config {}: {}", path.display(), error),
            )
        })?;
        Self::from_json_str(&raw).map_err(|error| TimeforkError {
            message: format!("{}: {}", path.display(), error.message),
            ..error
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TimeforkError> {
        serde_json::from_str(raw)
            .map_err(|error| TimeforkError::new("PLAY_CONFIG_INVALID", error.to_string()))
    }

    pub fn char_range(&self) -> CharRange {
        CharRange::new(self.min_char, self.max_char)
    }

    pub fn speaker_color(&self, speaker: &str) -> Color {
        self.speaker_colors
            .iter()
            .find(|entry| entry.speaker == speaker)
            .map(|entry| entry.color)
            .unwrap_or(self.default_color)
    }
}
