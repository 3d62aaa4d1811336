//! Buzzer sound cues
//!
//! Each cue is a single square-wave tone held for a few timer ticks.

use crate::platform::Buzzer;
use crate::sim::TickSignals;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SoundEffect {
    /// Ball hits the left or right wall
    WallHit,
    /// Ball hits a paddle
    PaddleHit,
    /// A paddle missed the ball
    Score,
}

impl SoundEffect {
    /// Tone period in timer cycles (2 MHz clock)
    pub fn period(self) -> u16 {
        match self {
            SoundEffect::WallHit => 5000,   // 400 Hz
            SoundEffect::PaddleHit => 2500, // 800 Hz
            SoundEffect::Score => 1000,     // 2 kHz
        }
    }

    /// How many ticks the tone is held
    pub fn duration_ticks(self) -> u8 {
        match self {
            SoundEffect::WallHit | SoundEffect::PaddleHit => 2,
            SoundEffect::Score => 6,
        }
    }

    /// Most important cue raised by a set of engine signals
    pub fn for_signals(signals: &TickSignals) -> Option<SoundEffect> {
        if signals.scored.is_some() {
            Some(SoundEffect::Score)
        } else if signals.paddle_bounce {
            Some(SoundEffect::PaddleHit)
        } else if signals.wall_bounce {
            Some(SoundEffect::WallHit)
        } else {
            None
        }
    }
}

/// Audio manager driving a buzzer from the timer context
pub struct AudioManager<B: Buzzer> {
    buzzer: B,
    current: Option<SoundEffect>,
    remaining_ticks: u8,
    muted: bool,
}

impl<B: Buzzer> AudioManager<B> {
    pub fn new(mut buzzer: B) -> Self {
        buzzer.set_period(0);
        Self {
            buzzer,
            current: None,
            remaining_ticks: 0,
            muted: false,
        }
    }

    /// Mute/unmute; muting silences any tone in progress
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop();
        }
    }

    /// Start a cue, replacing the current one
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.current = Some(effect);
        self.remaining_ticks = effect.duration_ticks();
        self.buzzer.set_period(effect.period());
    }

    /// Play the cue for a tick's signals, if any
    pub fn play_signals(&mut self, signals: &TickSignals) {
        if let Some(effect) = SoundEffect::for_signals(signals) {
            self.play(effect);
        }
    }

    /// Count down the current cue; call once per timer tick
    pub fn tick(&mut self) {
        if self.remaining_ticks == 0 {
            return;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            self.stop();
        }
    }

    pub fn current(&self) -> Option<SoundEffect> {
        self.current
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    fn stop(&mut self) {
        self.current = None;
        self.remaining_ticks = 0;
        self.buzzer.set_period(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::LogBuzzer;
    use crate::sim::Side;

    #[test]
    fn test_cue_priority() {
        let signals = TickSignals {
            wall_bounce: true,
            paddle_bounce: true,
            scored: None,
        };
        assert_eq!(
            SoundEffect::for_signals(&signals),
            Some(SoundEffect::PaddleHit)
        );

        let signals = TickSignals {
            scored: Some(Side::Top),
            ..signals
        };
        assert_eq!(SoundEffect::for_signals(&signals), Some(SoundEffect::Score));
        assert_eq!(SoundEffect::for_signals(&TickSignals::default()), None);
    }

    #[test]
    fn test_tone_stops_after_duration() {
        let mut audio = AudioManager::new(LogBuzzer::default());
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(audio.buzzer().period, 2500);

        audio.tick();
        assert_eq!(audio.buzzer().period, 2500);
        audio.tick();
        assert_eq!(audio.buzzer().period, 0);
        assert_eq!(audio.current(), None);
    }

    #[test]
    fn test_muted_stays_silent() {
        let mut audio = AudioManager::new(LogBuzzer::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Score);
        assert_eq!(audio.buzzer().period, 0);
        assert_eq!(audio.current(), None);
    }
}
