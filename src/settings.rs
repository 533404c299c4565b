//! Vibe settings
//!
//! Cosmetic preferences the renderer reads to light and dress the room.
//! Kept for the lifetime of a session only.

use serde::{Deserialize, Serialize};

/// Lighting presets for the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LightingPreset {
    #[default]
    Sunset,
    Neon,
    Chill,
    Cosmic,
    Forest,
}

impl LightingPreset {
    pub const ALL: [LightingPreset; 5] = [
        LightingPreset::Sunset,
        LightingPreset::Neon,
        LightingPreset::Chill,
        LightingPreset::Cosmic,
        LightingPreset::Forest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LightingPreset::Sunset => "sunset",
            LightingPreset::Neon => "neon",
            LightingPreset::Chill => "chill",
            LightingPreset::Cosmic => "cosmic",
            LightingPreset::Forest => "forest",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Room dressing themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomTheme {
    #[default]
    Apartment,
    Rooftop,
    Forest,
    Space,
    Beach,
}

impl RoomTheme {
    pub const ALL: [RoomTheme; 5] = [
        RoomTheme::Apartment,
        RoomTheme::Rooftop,
        RoomTheme::Forest,
        RoomTheme::Space,
        RoomTheme::Beach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomTheme::Apartment => "apartment",
            RoomTheme::Rooftop => "rooftop",
            RoomTheme::Forest => "forest",
            RoomTheme::Space => "space",
            RoomTheme::Beach => "beach",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Session vibe preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VibeSettings {
    pub lighting_preset: LightingPreset,
    pub room_theme: RoomTheme,
    /// Index into the renderer's playlist
    pub music_track: u32,
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VibeSettingsPatch {
    pub lighting_preset: Option<LightingPreset>,
    pub room_theme: Option<RoomTheme>,
    pub music_track: Option<u32>,
}

impl VibeSettings {
    /// Merge a patch in. Returns true if anything changed.
    pub fn apply(&mut self, patch: &VibeSettingsPatch) -> bool {
        let before = *self;
        if let Some(preset) = patch.lighting_preset {
            self.lighting_preset = preset;
        }
        if let Some(theme) = patch.room_theme {
            self.room_theme = theme;
        }
        if let Some(track) = patch.music_track {
            self.music_track = track;
        }
        *self != before
    }
}
