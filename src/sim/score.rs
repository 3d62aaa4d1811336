//! Two-digit score buffers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-width ASCII score, "00" through "99"
///
/// Incrementing past "99" saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDigits {
    text: [u8; 2],
}

impl Default for ScoreDigits {
    fn default() -> Self {
        Self { text: *b"00" }
    }
}

impl ScoreDigits {
    pub const MAX: u8 = 99;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add one point. Returns false if the score was already saturated.
    pub fn increment(&mut self) -> bool {
        let [tens, ones] = &mut self.text;
        if *ones < b'9' {
            *ones += 1;
            return true;
        }
        if *tens == b'9' {
            return false;
        }
        *ones = b'0';
        *tens += 1;
        true
    }

    pub fn value(&self) -> u8 {
        (self.text[0] - b'0') * 10 + (self.text[1] - b'0')
    }

    /// The buffer as text for display
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored
        std::str::from_utf8(&self.text).unwrap_or("??")
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for ScoreDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
