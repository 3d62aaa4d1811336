//! Game state and core engine types
//!
//! Everything the timer context mutates lives here.

use embedded_graphics::pixelcolor::Rgb565;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::layer::{Layer, LayerId, Scene};
use super::region::Region;
use super::score::ScoreDigits;
use super::shape::Shape;
use crate::consts::*;
use crate::settings::Settings;

/// The two players, named by the paddle they own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Bottom => 1,
        }
    }
}

/// Side effects raised by the engine, consumed by the surrounding system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSignals {
    /// Ball bounced off the left or right fence edge
    pub wall_bounce: bool,
    /// Ball was kicked by a paddle
    pub paddle_bounce: bool,
    /// Ball crossed an end of the field; the named side scored
    pub scored: Option<Side>,
}

impl TickSignals {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fold `other` into `self`; a later score replaces an earlier one
    pub fn merge(&mut self, other: TickSignals) {
        self.wall_bounce |= other.wall_bounce;
        self.paddle_bounce |= other.paddle_bounce;
        if other.scored.is_some() {
            self.scored = other.scored;
        }
    }
}

/// Named layers the engine treats specially
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handles {
    pub top_paddle: LayerId,
    pub bottom_paddle: LayerId,
    pub field: LayerId,
    pub ball: LayerId,
    pub arrow: LayerId,
}

impl Handles {
    pub fn paddle(&self, side: Side) -> LayerId {
        match side {
            Side::Top => self.top_paddle,
            Side::Bottom => self.bottom_paddle,
        }
    }
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameState {
    pub scene: Scene,
    pub handles: Handles,
    /// Motion boundary, taken from the field layer's bounds
    pub fence: Region,
    pub scores: [ScoreDigits; 2],
    /// While set, ticks still count but nothing moves
    pub paused: bool,
    /// Timer ticks seen, paused or not
    pub time_ticks: u64,
    /// Engine steps actually taken
    pub steps: u64,
    /// Signals raised since the last `take_signals`
    pub signals: TickSignals,
    /// Button state seen on the previous tick, for press edges
    pub(crate) last_buttons: u8,
    pub(crate) tuning: Tuning,
}

/// Engine parameters copied out of [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tuning {
    pub advance_every: u32,
    pub ai_paddle_speed: i32,
    pub player_paddle_speed: i32,
    pub paddle_bounce_speed: i32,
}

impl GameState {
    /// Build the static scene, run the initialization pass and take the fence
    pub fn new(settings: &Settings) -> Self {
        let paddle = Shape::Rect {
            half: IVec2::from(settings.paddle_half_size),
        };
        let field = Shape::RectOutline {
            half: IVec2::new(SCREEN_WIDTH / 2 - 1, SCREEN_HEIGHT / 2 - 1),
        };
        let ball = Shape::Circle {
            radius: settings.ball_radius,
        };
        let arrow = Shape::Arrow {
            span: settings.arrow_span,
        };

        let center = crate::screen_center();
        let ball_home = center + IVec2::new(10, 5);
        let moving = |shape: Shape, color: Rgb565, home: IVec2, velocity: [i32; 2]| {
            Layer::moving(shape, color, home, IVec2::from(velocity))
        };

        let mut scene = Scene::new();
        let handles = Handles {
            top_paddle: scene.push(moving(
                paddle,
                TOP_PADDLE_COLOR,
                IVec2::new(center.x, 10),
                [settings.ai_paddle_speed, 0],
            )),
            bottom_paddle: scene.push(moving(
                paddle,
                BOTTOM_PADDLE_COLOR,
                IVec2::new(center.x, SCREEN_HEIGHT - 10),
                [0, 0],
            )),
            field: scene.push(Layer::fixed(field, FIELD_COLOR, center)),
            ball: scene.push(moving(ball, BALL_COLOR, ball_home, settings.ball_velocity)),
            arrow: scene.push(moving(
                arrow,
                ARROW_COLOR,
                ball_home,
                settings.arrow_velocity,
            )),
        };
        scene.init();

        let fence = scene[handles.field].bounds();
        log::info!(
            "Scene built: {} layers, fence {} .. {}",
            scene.len(),
            fence.top_left,
            fence.bot_right
        );

        Self {
            scene,
            handles,
            fence,
            scores: [ScoreDigits::new(); 2],
            paused: false,
            time_ticks: 0,
            steps: 0,
            signals: TickSignals::default(),
            last_buttons: 0,
            tuning: Tuning {
                advance_every: settings.advance_every.max(1),
                ai_paddle_speed: settings.ai_paddle_speed,
                player_paddle_speed: settings.player_paddle_speed,
                paddle_bounce_speed: settings.paddle_bounce_speed,
            },
        }
    }

    /// Restage every layer at home and clear both scores
    pub fn reset(&mut self) {
        self.scene.restage();
        for score in &mut self.scores {
            score.reset();
        }
        self.paused = false;
        self.signals = TickSignals::default();
        log::info!("Game reset");
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("Paused: {paused}");
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn score(&self, side: Side) -> ScoreDigits {
        self.scores[side.index()]
    }

    /// Hand pending signals to the caller and clear them
    pub fn take_signals(&mut self) -> TickSignals {
        std::mem::take(&mut self.signals)
    }

    pub fn velocity(&self, id: LayerId) -> Option<IVec2> {
        self.scene[id].velocity
    }

    /// Set the velocity of a moving layer; fixed layers are left alone
    pub fn set_velocity(&mut self, id: LayerId, velocity: IVec2) {
        if let Some(v) = self.scene[id].velocity.as_mut() {
            *v = velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_layout() {
        let state = GameState::new(&Settings::default());
        let h = state.handles;

        // draw order: paddles, field, ball, arrow
        assert_eq!(
            [h.top_paddle, h.bottom_paddle, h.field, h.ball, h.arrow],
            [LayerId(0), LayerId(1), LayerId(2), LayerId(3), LayerId(4)]
        );
        assert!(!state.scene[h.field].is_moving());
        assert_eq!(state.scene.moving_ids().count(), 4);
        assert_eq!(
            state.fence,
            Region::new(IVec2::new(1, 1), IVec2::new(127, 159))
        );
        assert_eq!(state.scene[h.ball].pos, IVec2::new(74, 85));
    }

    #[test]
    fn test_every_moving_layer_starts_inside_fence() {
        let state = GameState::new(&Settings::default());
        for id in state.scene.moving_ids() {
            let b = state.scene[id].bounds_next();
            assert_eq!(b.intersection(&state.fence), Some(b), "{id:?}");
        }
    }

    #[test]
    fn test_reset_clears_scores_and_positions() {
        let mut state = GameState::new(&Settings::default());
        let ball = state.handles.ball;
        state.scores[0].increment();
        state.scene[ball].pos_next = IVec2::new(20, 20);
        state.paused = true;

        state.reset();
        assert_eq!(state.score(Side::Top).as_str(), "00");
        assert_eq!(state.scene[ball].pos_next, state.scene[ball].home);
        // still drawn where it was until the next commit
        assert_eq!(state.scene[ball].pos, IVec2::new(74, 85));
        assert!(!state.paused);
    }

    #[test]
    fn test_set_velocity_ignores_fixed_layers() {
        let mut state = GameState::new(&Settings::default());
        let field = state.handles.field;
        state.set_velocity(field, IVec2::ONE);
        assert_eq!(state.velocity(field), None);
    }

    #[test]
    fn test_signal_merge() {
        let mut a = TickSignals {
            wall_bounce: true,
            ..Default::default()
        };
        a.merge(TickSignals {
            scored: Some(Side::Top),
            ..Default::default()
        });
        assert!(a.wall_bounce);
        assert_eq!(a.scored, Some(Side::Top));
        assert!(TickSignals::default().is_empty());
    }
}
