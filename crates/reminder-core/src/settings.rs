//! User Settings
//!
//! Preferences kept in browser local storage, independent of any medication.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SOUND: &str = "default";

/// A bundled alarm sound, served at `/sounds/{id}.mp3`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmSound {
    pub id: &'static str,
    pub name: &'static str,
}

pub const ALARM_SOUNDS: &[AlarmSound] = &[
    AlarmSound { id: "default", name: "Default" },
    AlarmSound { id: "bell", name: "Bell" },
    AlarmSound { id: "chime", name: "Chime" },
    AlarmSound { id: "digital", name: "Digital" },
    AlarmSound { id: "gentle", name: "Gentle" },
];

/// Asset path of an alarm sound; unknown ids fall back to the default sound
pub fn sound_path(id: &str) -> String {
    let id = ALARM_SOUNDS
        .iter()
        .find(|sound| sound.id == id)
        .map_or(DEFAULT_SOUND, |sound| sound.id);
    format!("/sounds/{}.mp3", id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub alarm: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#1976d2".to_string(),
            secondary: "#dc004e".to_string(),
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
            alarm: "#f44336".to_string(),
        }
    }
}

impl Theme {
    /// CSS custom properties applied on the document root
    pub fn css_variables(&self) -> [(&'static str, &str); 5] {
        [
            ("--color-primary", self.primary.as_str()),
            ("--color-secondary", self.secondary.as_str()),
            ("--color-background", self.background.as_str()),
            ("--color-text", self.text.as_str()),
            ("--color-alarm", self.alarm.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub picture: Option<String>,
    pub name: String,
}

/// Missing fields load with their defaults, so settings written by older
/// clients stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub alarm_sound: String,
    pub notification_enabled: bool,
    pub theme: Theme,
    pub profile: Profile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alarm_sound: DEFAULT_SOUND.to_string(),
            notification_enabled: true,
            theme: Theme::default(),
            profile: Profile::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"alarmSound":"bell"}"#).unwrap();
        assert_eq!(settings.alarm_sound, "bell");
        assert!(settings.notification_enabled);
        assert_eq!(settings.theme, Theme::default());
        assert_eq!(settings.profile.name, "");
    }

    #[test]
    fn test_sound_path_known_and_unknown() {
        assert_eq!(sound_path("chime"), "/sounds/chime.mp3");
        assert_eq!(sound_path("../etc/passwd"), "/sounds/default.mp3");
    }
}
