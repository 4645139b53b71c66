//! Controller tuning.

/// Pause after every press-driven transition, absorbing contact bounce.
pub const DEBOUNCE_MS: u32 = 250;

pub const BACK_LABEL: &str = "Back";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MenuConfig {
    pub(crate) button_pressed_level: bool,
    pub(crate) debounce_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            button_pressed_level: false,
            debounce_ms: DEBOUNCE_MS,
        }
    }
}

impl MenuConfig {
    /// Pin level that reads as "pressed". Defaults to low (pull-up wiring).
    pub const fn with_button_pressed_level(mut self, button_pressed_level: bool) -> Self {
        self.button_pressed_level = button_pressed_level;
        self
    }

    pub const fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub const fn button_pressed_level(&self) -> bool {
        self.button_pressed_level
    }

    pub const fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }
}
