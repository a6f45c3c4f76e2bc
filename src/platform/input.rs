//! Keyboard state with per-key debouncing
//!
//! Continuous actions (paddle movement) poll `is_down` every frame. Discrete
//! actions (confirm, level select) use `take_press`, which fires once per
//! physical press and re-arms only after the key is released.

/// Number of tracked key codes
pub const KEY_COUNT: usize = 1024;

/// Key codes used by the game (GLFW numbering)
pub mod key_code {
    pub const SPACE: i32 = 32;
    pub const A: i32 = 65;
    pub const D: i32 = 68;
    pub const S: i32 = 83;
    pub const W: i32 = 87;
    pub const ESCAPE: i32 = 256;
    pub const ENTER: i32 = 257;
}

/// Pressed/processed flags for every key code
#[derive(Debug, Clone)]
pub struct Keys {
    pressed: Vec<bool>,
    processed: Vec<bool>,
}

impl Default for Keys {
    fn default() -> Self {
        Self::new()
    }
}

impl Keys {
    pub fn new() -> Self {
        Self {
            pressed: vec![false; KEY_COUNT],
            processed: vec![false; KEY_COUNT],
        }
    }

    fn index(code: i32) -> Option<usize> {
        usize::try_from(code).ok().filter(|&i| i < KEY_COUNT)
    }

    /// Record a key press. Returns false (and ignores it) for out-of-range codes.
    pub fn press(&mut self, code: i32) -> bool {
        match Self::index(code) {
            Some(i) => {
                self.pressed[i] = true;
                true
            }
            None => {
                log::warn!("Ignoring press of out-of-range key code {}", code);
                false
            }
        }
    }

    /// Record a key release, re-arming its discrete action
    pub fn release(&mut self, code: i32) -> bool {
        match Self::index(code) {
            Some(i) => {
                self.pressed[i] = false;
                self.processed[i] = false;
                true
            }
            None => {
                log::warn!("Ignoring release of out-of-range key code {}", code);
                false
            }
        }
    }

    /// Whether the key is currently held
    pub fn is_down(&self, code: i32) -> bool {
        Self::index(code).is_some_and(|i| self.pressed[i])
    }

    /// True once per press: consumes the press until the key is released
    pub fn take_press(&mut self, code: i32) -> bool {
        let Some(i) = Self::index(code) else {
            return false;
        };
        if self.pressed[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }

    /// Release every key (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.pressed.fill(false);
        self.processed.fill(false);
    }
}
