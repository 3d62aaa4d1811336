//! State shared between the timer context and the main loop
//!
//! The timer context owns the engine: it writes velocities, staged positions,
//! scores and the pause flag, then raises the redraw flag. The main loop
//! takes the flag, commits staged positions and snapshots the scene inside
//! one critical section, then repaints from its snapshot with interrupts
//! enabled.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

use crate::renderer::compositor;
use crate::settings::Settings;
use crate::sim::{GameState, Scene, ScoreDigits, TickInput, TickSignals, tick};

pub struct SharedState {
    state: Mutex<RefCell<GameState>>,
    redraw: AtomicBool,
}

impl SharedState {
    pub fn new(settings: &Settings) -> Self {
        Self::from_state(GameState::new(settings))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state: Mutex::new(RefCell::new(state)),
            // the first frame always needs drawing
            redraw: AtomicBool::new(true),
        }
    }

    /// Timer context entry: run one tick and hand back the signals it raised
    pub fn on_timer(&self, input: &TickInput) -> TickSignals {
        let (stepped, signals) = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            let stepped = tick(&mut state, input);
            (stepped, state.take_signals())
        });
        if stepped {
            self.redraw.store(true, Ordering::Release);
        }
        signals
    }

    /// Main loop: consume the redraw request, if any
    pub fn take_redraw(&self) -> bool {
        self.redraw.swap(false, Ordering::AcqRel)
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.load(Ordering::Acquire)
    }

    /// Commit phase. Staged positions become current and the committed scene
    /// is copied into `frame`, all without the timer context interleaving.
    pub fn commit_into(&self, frame: &mut Scene) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.scene.commit();
            frame.clone_from(&state.scene);
        });
    }

    /// Copy the current scene without committing anything
    pub fn snapshot_into(&self, frame: &mut Scene) {
        critical_section::with(|cs| frame.clone_from(&self.state.borrow_ref(cs).scene));
    }

    /// Commit, then repaint the moving layers from the fresh snapshot
    pub fn redraw<D>(
        &self,
        frame: &mut Scene,
        background: Rgb565,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.commit_into(frame);
        compositor::repaint(frame, background, target)
    }

    pub fn scores(&self) -> [ScoreDigits; 2] {
        critical_section::with(|cs| self.state.borrow_ref(cs).scores)
    }

    pub fn is_paused(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).paused)
    }

    /// Run `f` with exclusive access to the engine state
    pub fn with_state<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs)))
    }
}
