//! Platform abstraction layer
//!
//! The engine talks to hardware through two small traits:
//! - `Switches`: bitmask of pressed buttons
//! - `Buzzer`: tone period, 0 for silence
//!
//! The display is any `embedded_graphics` draw target. Host stand-ins for
//! both traits live here for the demo binary and tests.

use std::collections::VecDeque;

use bitflags::bitflags;

bitflags! {
    /// Buttons as reported by [`Switches::read`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        /// Move the bottom paddle left
        const LEFT = 1 << 0;
        /// Move the bottom paddle right
        const RIGHT = 1 << 1;
        /// Toggle pause on press
        const PAUSE = 1 << 2;
        /// Restart the game on press
        const RESET = 1 << 3;
    }
}

/// Digital input source
pub trait Switches {
    /// Bitmask of buttons currently held down
    fn read(&mut self) -> u8;
}

/// Tone generator
pub trait Buzzer {
    /// Set the tone period in timer cycles; 0 silences the buzzer
    fn set_period(&mut self, cycles: u16);
}

/// Switches replaying a fixed script, one entry per read, then idle
#[derive(Debug, Clone, Default)]
pub struct ScriptedSwitches {
    script: VecDeque<Buttons>,
}

impl ScriptedSwitches {
    pub fn new(script: impl IntoIterator<Item = Buttons>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Hold `buttons` for `reads` consecutive reads
    pub fn hold(mut self, buttons: Buttons, reads: usize) -> Self {
        self.script.extend(std::iter::repeat_n(buttons, reads));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Switches for ScriptedSwitches {
    fn read(&mut self) -> u8 {
        self.script.pop_front().unwrap_or_default().bits()
    }
}

/// Buzzer that logs period changes and remembers the last one
#[derive(Debug, Clone, Default)]
pub struct LogBuzzer {
    pub period: u16,
    /// Number of period changes seen
    pub changes: u32,
}

impl Buzzer for LogBuzzer {
    fn set_period(&mut self, cycles: u16) {
        if cycles != self.period {
            log::trace!("Buzzer period {cycles}");
            self.changes += 1;
        }
        self.period = cycles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_switches_replay_then_idle() {
        let mut switches =
            ScriptedSwitches::new([Buttons::LEFT]).hold(Buttons::PAUSE | Buttons::RIGHT, 2);
        assert_eq!(switches.read(), 0b0001);
        assert_eq!(switches.read(), 0b0110);
        assert_eq!(switches.read(), 0b0110);
        assert_eq!(switches.read(), 0);
        assert_eq!(switches.remaining(), 0);
    }

    #[test]
    fn test_log_buzzer_counts_changes() {
        let mut buzzer = LogBuzzer::default();
        buzzer.set_period(2500);
        buzzer.set_period(2500);
        buzzer.set_period(0);
        assert_eq!(buzzer.period, 0);
        assert_eq!(buzzer.changes, 2);
    }
}
