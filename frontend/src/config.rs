//! Persisted frontend settings: window scale and key binding overrides.
//! Lives at the platform config directory via `dirs`; absent or
//! unparsable config is treated as "use the defaults", never a fatal
//! error.

use std::collections::HashMap;
use std::path::PathBuf;

use sdl2::keyboard::Scancode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub keys: KeyBindings,
}

/// Button name to SDL scancode name overrides, as stored in the TOML
/// config file (e.g. `"P1 Fire" = "Space"`).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(flatten)]
    bindings: HashMap<String, String>,
}

impl KeyBindings {
    pub fn scancode_for(&self, button_name: &str) -> Option<Scancode> {
        let name = self.bindings.get(button_name)?;
        Scancode::from_name(name)
    }

    pub fn set(&mut self, button_name: &str, scancode: Scancode) {
        self.bindings
            .insert(button_name.to_string(), scancode.name().to_string());
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("invaders").join("config.toml"))
}

/// Load the config from disk, falling back to defaults on any failure
/// (missing file, unreadable, malformed TOML).
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => toml::from_str(&text).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "ignoring malformed config");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings_round_trip_through_toml() {
        let mut bindings = KeyBindings::default();
        bindings.set("P1 Fire", Scancode::Space);
        let text = toml::to_string(&bindings).unwrap();
        let parsed: KeyBindings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.scancode_for("P1 Fire"), Some(Scancode::Space));
    }

    #[test]
    fn unknown_button_has_no_override() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.scancode_for("P1 Fire"), None);
    }
}
