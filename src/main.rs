//! Layer Pong host entry point
//!
//! A timer thread plays the part of the periodic interrupt: it polls the
//! switches, runs the engine and drives the buzzer. The main thread sleeps
//! until a redraw is requested, then commits and repaints into an in-memory
//! framebuffer.
//!
//! Usage: `layer-pong [seconds]` (default 10). Tuning comes from the JSON file
//! named by `LAYER_PONG_CONFIG`, if set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use layer_pong::audio::AudioManager;
use layer_pong::consts::*;
use layer_pong::platform::{Buttons, LogBuzzer, ScriptedSwitches, Switches};
use layer_pong::renderer::{Framebuffer, draw_scene, draw_scores};
use layer_pong::sim::{Scene, Side, TickInput};
use layer_pong::{Settings, SharedState};

fn main() {
    env_logger::init();

    let seconds: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10);
    let settings = Settings::load();
    let shared = Arc::new(SharedState::new(&settings));

    let mut fb = Framebuffer::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    let mut frame = Scene::new();
    shared.snapshot_into(&mut frame);
    let Ok(()) = draw_scene(&frame, BG_COLOR, &mut fb);
    let Ok(()) = draw_scores(&frame, &shared.scores(), BG_COLOR, &mut fb);
    shared.take_redraw();

    let done = Arc::new(AtomicBool::new(false));
    let timer = {
        let shared = Arc::clone(&shared);
        let done = Arc::clone(&done);
        let main_thread = thread::current();
        let ticks = seconds * u64::from(settings.tick_hz);
        let period = Duration::from_millis(settings.tick_period_ms());
        let mute = settings.mute;

        thread::spawn(move || {
            // sweep the bottom paddle back and forth
            let mut switches = ScriptedSwitches::default();
            for _ in 0..ticks / 40 + 1 {
                switches = switches.hold(Buttons::LEFT, 20).hold(Buttons::RIGHT, 20);
            }
            let mut audio = AudioManager::new(LogBuzzer::default());
            audio.set_muted(mute);

            for _ in 0..ticks {
                thread::sleep(period);
                let input = TickInput {
                    buttons: switches.read(),
                };
                let signals = shared.on_timer(&input);
                audio.play_signals(&signals);
                audio.tick();
                if shared.needs_redraw() {
                    main_thread.unpark();
                }
            }
            log::info!("Buzzer changed tone {} times", audio.buzzer().changes);
            done.store(true, Ordering::Release);
            main_thread.unpark();
        })
    };

    let mut redraws = 0u64;
    while !done.load(Ordering::Acquire) {
        // low-power wait until the timer asks for a redraw
        while !shared.take_redraw() {
            if done.load(Ordering::Acquire) {
                break;
            }
            thread::park();
        }
        fb.reset_counter();
        let Ok(()) = shared.redraw(&mut frame, BG_COLOR, &mut fb);
        let Ok(()) = draw_scores(&frame, &shared.scores(), BG_COLOR, &mut fb);
        redraws += 1;
        log::trace!("Redraw {redraws}: {} pixels", fb.pixels_written());
    }

    if timer.join().is_err() {
        log::error!("Timer thread panicked");
        std::process::exit(1);
    }

    let scores = shared.scores();
    log::info!(
        "{redraws} redraws in {seconds}s, score top {} bottom {}",
        scores[Side::Top.index()],
        scores[Side::Bottom.index()]
    );
    println!(
        "top {} - bottom {}",
        scores[Side::Top.index()],
        scores[Side::Bottom.index()]
    );
}
