use std::collections::HashMap;

use invaders_core::prelude::InputButton;
use sdl2::keyboard::Scancode;

use crate::config::KeyBindings;

/// Maps SDL scancodes to machine button IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a machine button ID.
    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    /// Look up the machine button ID for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a key map for the cabinet's input buttons, starting from the
/// default layout and applying any overrides from the saved config.
pub fn default_key_map(buttons: &[InputButton], overrides: &KeyBindings) -> KeyMap {
    let mut km = KeyMap::new();

    for button in buttons {
        let scancode = overrides
            .scancode_for(button.name)
            .or_else(|| builtin_default(button.name));

        if let Some(sc) = scancode {
            km.bind(sc, button.id);
        }
    }

    km
}

fn builtin_default(name: &str) -> Option<Scancode> {
    match name {
        "Coin" => Some(Scancode::Num5),
        "1P Start" => Some(Scancode::Num1),
        "2P Start" => Some(Scancode::Num2),
        "P1 Fire" => Some(Scancode::LCtrl),
        "P1 Left" => Some(Scancode::Left),
        "P1 Right" => Some(Scancode::Right),
        "P2 Fire" => Some(Scancode::RCtrl),
        "P2 Left" => Some(Scancode::A),
        "P2 Right" => Some(Scancode::D),
        "Tilt" => Some(Scancode::T),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_cover_every_board_button() {
        let names = [
            "Coin", "1P Start", "2P Start", "P1 Fire", "P1 Left", "P1 Right", "P2 Fire",
            "P2 Left", "P2 Right", "Tilt",
        ];
        for name in names {
            assert!(builtin_default(name).is_some(), "missing default for {name}");
        }
    }

    #[test]
    fn config_override_takes_precedence_over_builtin() {
        let mut overrides = KeyBindings::default();
        overrides.set("Coin", Scancode::Num9);
        let buttons = [InputButton { id: 0, name: "Coin" }];
        let km = default_key_map(&buttons, &overrides);
        assert_eq!(km.get(Scancode::Num9), Some(0));
        assert_eq!(km.get(Scancode::Num5), None);
    }
}
