//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Seahorse palette, cycled by the color button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorScheme {
    #[default]
    Golden,
    Pink,
    Teal,
    Purple,
}

/// Colors for one scheme (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeColors {
    pub body: u32,
    pub spot: u32,
    pub fin: u32,
    pub dark: u32,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::Golden,
        ColorScheme::Pink,
        ColorScheme::Teal,
        ColorScheme::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Golden => "Golden",
            ColorScheme::Pink => "Pink",
            ColorScheme::Teal => "Teal",
            ColorScheme::Purple => "Purple",
        }
    }

    pub fn colors(&self) -> SchemeColors {
        match self {
            ColorScheme::Golden => SchemeColors {
                body: 0xE8902A,
                spot: 0xF5C878,
                fin: 0xC96010,
                dark: 0x8B4A10,
            },
            ColorScheme::Pink => SchemeColors {
                body: 0xFF6B9D,
                spot: 0xFFB3D9,
                fin: 0xC0005A,
                dark: 0x7A0038,
            },
            ColorScheme::Teal => SchemeColors {
                body: 0x00CED1,
                spot: 0x80FFFF,
                fin: 0x007A8A,
                dark: 0x004A55,
            },
            ColorScheme::Purple => SchemeColors {
                body: 0x9B6BDE,
                spot: 0xCCA8FF,
                fin: 0x6030AA,
                dark: 0x3A1870,
            },
        }
    }

    /// Next scheme, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seahorse color scheme
    pub scheme: ColorScheme,
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "spike_jumper_settings";

    /// Advance to the next color scheme
    pub fn cycle_scheme(&mut self) -> ColorScheme {
        self.scheme = self.scheme.next();
        self.scheme
    }

    /// Decode a stored payload, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Discarding unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings ({})", settings.scheme.as_str());
                return settings;
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to save settings");
                    }
                }
                Err(e) => log::warn!("Failed to encode settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
