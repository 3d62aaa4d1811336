//! Fixed-rate timer tick and the motion/collision step
//!
//! `tick` is what the timer context calls. It handles buttons and paddle
//! steering, honors the pause flag and runs `advance` every few ticks.
//! `advance` only stages positions in `pos_next`; nothing here touches the
//! displayed positions.

use glam::IVec2;

use super::collision::{Edge, fence_bounce, paddle_contact};
use super::layer::LayerId;
use super::state::{GameState, Side, TickSignals};
use crate::platform::Buttons;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Raw switch bitmask, see [`Buttons`]
    pub buttons: u8,
}

impl TickInput {
    pub fn new(buttons: Buttons) -> Self {
        Self {
            buttons: buttons.bits(),
        }
    }
}

/// Run one timer tick. Returns true if the engine stepped, i.e. the screen
/// needs a redraw.
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    state.time_ticks += 1;

    let held = Buttons::from_bits_truncate(input.buttons);
    let pressed = held.difference(Buttons::from_bits_truncate(state.last_buttons));
    state.last_buttons = input.buttons;

    if pressed.contains(Buttons::RESET) {
        state.reset();
        return true;
    }
    if pressed.contains(Buttons::PAUSE) {
        state.toggle_pause();
    }

    if state.paused {
        return false;
    }

    steer_player(state, held);
    steer_ai(state);

    if state.time_ticks % u64::from(state.tuning.advance_every) != 0 {
        return false;
    }

    advance(state);
    true
}

/// Bottom paddle follows the left/right buttons
fn steer_player(state: &mut GameState, held: Buttons) {
    let speed = state.tuning.player_paddle_speed;
    let dx = match (held.contains(Buttons::LEFT), held.contains(Buttons::RIGHT)) {
        (true, false) => -speed,
        (false, true) => speed,
        _ => 0,
    };
    state.set_velocity(state.handles.bottom_paddle, IVec2::new(dx, 0));
}

/// Top paddle chases the ball horizontally
fn steer_ai(state: &mut GameState) {
    let ball_x = state.scene[state.handles.ball].pos_next.x;
    let paddle = state.handles.top_paddle;
    let speed = state.tuning.ai_paddle_speed;
    let dx = if ball_x < state.scene[paddle].pos_next.x {
        -speed
    } else {
        speed
    };
    state.set_velocity(paddle, IVec2::new(dx, 0));
}

/// One motion/collision step over every moving layer, in draw order.
///
/// Signals raised by the ball are merged into `state.signals` and also
/// returned.
pub fn advance(state: &mut GameState) -> TickSignals {
    let mut signals = TickSignals::default();
    for index in 0..state.scene.len() {
        let id = LayerId(index);
        let layer = &state.scene[id];
        let Some(mut velocity) = layer.velocity else {
            continue;
        };
        assert!(
            layer.bounds_next().intersects(&state.fence),
            "layer {id:?} is entirely outside the fence"
        );

        let mut pos = layer.pos_next + velocity;
        let bounds = layer.shape.bounds(pos);
        let bounce = fence_bounce(&bounds, &state.fence, &mut pos, &mut velocity);

        if id == state.handles.ball {
            if bounce[0].is_some() {
                signals.wall_bounce = true;
            }
            match bounce[1] {
                // The paddle guarding that end missed
                Some(Edge::Low) => signals.scored = Some(Side::Bottom),
                Some(Edge::High) => signals.scored = Some(Side::Top),
                None => {}
            }

            let ball_bounds = layer.shape.bounds(pos);
            for side in [Side::Top, Side::Bottom] {
                let paddle = &state.scene[state.handles.paddle(side)];
                if let Some(dir) = paddle_contact(&ball_bounds, &paddle.bounds_next()) {
                    velocity.y = dir * state.tuning.paddle_bounce_speed;
                    signals.paddle_bounce = true;
                }
            }
        }

        let layer = &mut state.scene[id];
        layer.pos_next = pos;
        layer.velocity = Some(velocity);
    }

    if let Some(side) = signals.scored {
        let score = &mut state.scores[side.index()];
        if score.increment() {
            log::debug!("{side:?} scores: {score}");
        }
    }

    state.steps += 1;
    state.signals.merge(signals);
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::region::Region;
    use crate::sim::shape::Shape;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(&Settings::default())
    }

    /// State with only the ball moving; paddles and arrow stay at home
    fn ball_only(pos: IVec2, velocity: IVec2) -> GameState {
        let mut state = new_state();
        let h = state.handles;
        for id in [h.top_paddle, h.bottom_paddle, h.arrow] {
            state.scene[id].velocity = None;
        }
        let ball = &mut state.scene[h.ball];
        ball.pos_next = pos;
        ball.velocity = Some(velocity);
        state
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut state = new_state();
        let ball = state.handles.ball;
        advance(&mut state);
        assert_eq!(state.scene[ball].pos_next, IVec2::new(76, 86));
        // displayed position untouched until commit
        assert_eq!(state.scene[ball].pos, IVec2::new(74, 85));
    }

    #[test]
    fn test_unit_ball_reflects_off_fence_bottom() {
        let mut state = ball_only(IVec2::new(50, 50), IVec2::new(3, 10));
        let ball = state.handles.ball;
        state.scene[ball].shape = Shape::Rect { half: IVec2::ONE };
        state.fence = Region::new(IVec2::new(10, 10), IVec2::new(100, 55));

        let signals = advance(&mut state);
        let layer = &state.scene[ball];
        assert_eq!(layer.velocity, Some(IVec2::new(3, -10)));
        assert_eq!(layer.pos_next, IVec2::new(53, 40));
        assert!(layer.pos_next.y >= 10);
        assert_eq!(signals.scored, Some(Side::Top));
    }

    #[test]
    fn test_no_double_reflection_after_bounce() {
        let mut state = ball_only(IVec2::new(120, 60), IVec2::new(3, 0));
        let ball = state.handles.ball;

        let first = advance(&mut state);
        assert!(first.wall_bounce);
        assert_eq!(state.velocity(ball), Some(IVec2::new(-3, 0)));
        assert_eq!(state.scene[ball].pos_next, IVec2::new(117, 60));

        let second = advance(&mut state);
        assert!(!second.wall_bounce);
        assert_eq!(state.velocity(ball), Some(IVec2::new(-3, 0)));
        assert_eq!(state.scene[ball].pos_next, IVec2::new(114, 60));
    }

    #[test]
    fn test_miss_at_top_scores_for_bottom() {
        let mut state = ball_only(IVec2::new(100, 9), IVec2::new(0, -1));
        let signals = advance(&mut state);
        assert_eq!(signals.scored, Some(Side::Bottom));
        assert_eq!(state.score(Side::Bottom).as_str(), "01");
        assert_eq!(state.score(Side::Top).as_str(), "00");
        assert_eq!(state.take_signals().scored, Some(Side::Bottom));
        assert!(state.signals.is_empty());
    }

    #[test]
    fn test_paddle_kicks_ball_down() {
        // top paddle spans y 7..=13; ball top lands on y 13 after one step
        let mut state = ball_only(IVec2::new(64, 22), IVec2::new(1, -1));
        let ball = state.handles.ball;
        let signals = advance(&mut state);
        assert!(signals.paddle_bounce);
        assert_eq!(state.velocity(ball), Some(IVec2::new(1, 2)));
    }

    #[test]
    fn test_paddle_kicks_ball_up() {
        // bottom paddle spans y 147..=153
        let mut state = ball_only(IVec2::new(64, 138), IVec2::new(-1, 1));
        let ball = state.handles.ball;
        let signals = advance(&mut state);
        assert!(signals.paddle_bounce);
        assert_eq!(state.velocity(ball), Some(IVec2::new(-1, -2)));
    }

    proptest! {
        #[test]
        fn interior_displacement_equals_velocity(
            x in 30..98i32,
            y in 30..130i32,
            vx in -5..=5i32,
            vy in -5..=5i32,
        ) {
            let mut state = ball_only(IVec2::new(x, y), IVec2::new(vx, vy));
            let ball = state.handles.ball;
            let before = state.scene[ball].pos_next;
            let signals = advance(&mut state);
            prop_assume!(!signals.paddle_bounce);
            prop_assert_eq!(state.scene[ball].pos_next - before, IVec2::new(vx, vy));
            prop_assert_eq!(state.velocity(ball), Some(IVec2::new(vx, vy)));
        }

        #[test]
        fn paddle_kick_is_direction_stable(speed in 1..8i32, dx in -2..=2i32) {
            // approaching the bottom paddle from above
            let mut state = ball_only(IVec2::new(64 + dx, 139 - speed), IVec2::new(dx, speed));
            let ball = state.handles.ball;
            advance(&mut state);
            prop_assert_eq!(state.velocity(ball).map(|v| v.y), Some(-2));

            // approaching the top paddle from below
            let mut state = ball_only(IVec2::new(64 + dx, 21 + speed), IVec2::new(dx, -speed));
            advance(&mut state);
            prop_assert_eq!(state.velocity(ball).map(|v| v.y), Some(2));
        }
    }

    #[test]
    fn test_pause_freezes_motion_but_counts_ticks() {
        let mut state = new_state();
        let ball = state.handles.ball;
        let pause = TickInput::new(Buttons::PAUSE);

        assert!(!tick(&mut state, &pause));
        assert!(state.paused);
        let frozen = state.scene[ball].pos_next;

        // button released, still paused
        for _ in 0..5 {
            assert!(!tick(&mut state, &TickInput::default()));
        }
        assert_eq!(state.scene[ball].pos_next, frozen);
        assert_eq!(state.time_ticks, 6);
        assert_eq!(state.steps, 0);

        // second press resumes
        assert!(tick(&mut state, &pause));
        assert!(!state.paused);
        assert_ne!(state.scene[ball].pos_next, frozen);
    }

    #[test]
    fn test_holding_pause_toggles_once() {
        let mut state = new_state();
        let pause = TickInput::new(Buttons::PAUSE);
        tick(&mut state, &pause);
        tick(&mut state, &pause);
        tick(&mut state, &pause);
        assert!(state.paused);
    }

    #[test]
    fn test_player_paddle_follows_buttons() {
        let mut state = new_state();
        let paddle = state.handles.bottom_paddle;

        tick(&mut state, &TickInput::new(Buttons::LEFT));
        assert_eq!(state.velocity(paddle), Some(IVec2::new(-2, 0)));
        assert_eq!(state.scene[paddle].pos_next, IVec2::new(62, 150));

        tick(&mut state, &TickInput::new(Buttons::RIGHT));
        assert_eq!(state.velocity(paddle), Some(IVec2::new(2, 0)));

        tick(&mut state, &TickInput::new(Buttons::LEFT | Buttons::RIGHT));
        assert_eq!(state.velocity(paddle), Some(IVec2::ZERO));
    }

    #[test]
    fn test_ai_paddle_chases_ball() {
        let mut state = new_state();
        let paddle = state.handles.top_paddle;
        state.scene[state.handles.ball].pos_next.x = 30;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.velocity(paddle), Some(IVec2::new(-1, 0)));
        assert_eq!(state.scene[paddle].pos_next.x, 63);
    }

    #[test]
    fn test_reset_button_restarts() {
        let mut state = new_state();
        let ball = state.handles.ball;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        state.scores[1].increment();
        assert!(tick(&mut state, &TickInput::new(Buttons::RESET)));
        assert_eq!(state.scene[ball].pos_next, state.scene[ball].home);
        assert_eq!(state.score(Side::Bottom).value(), 0);
    }

    #[test]
    fn test_advance_divisor() {
        let mut settings = Settings::default();
        settings.advance_every = 3;
        let mut state = GameState::new(&settings);
        let stepped: Vec<bool> = (0..6)
            .map(|_| tick(&mut state, &TickInput::default()))
            .collect();
        assert_eq!(stepped, vec![false, false, true, false, false, true]);
        assert_eq!(state.steps, 2);
    }

    #[test]
    #[should_panic(expected = "outside the fence")]
    fn test_layer_outside_fence_is_a_contract_violation() {
        let mut state = ball_only(IVec2::new(500, 500), IVec2::ONE);
        advance(&mut state);
    }

    #[test]
    fn test_long_run_stays_inside_fence() {
        let mut state = new_state();
        for i in 0..2000u32 {
            let buttons = if (i / 40) % 2 == 0 {
                Buttons::LEFT
            } else {
                Buttons::RIGHT
            };
            tick(&mut state, &TickInput::new(buttons));
            for id in state.scene.moving_ids() {
                assert!(state.scene[id].bounds_next().intersects(&state.fence));
            }
        }
        assert_eq!(state.steps, 2000);
    }
}
