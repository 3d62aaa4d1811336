//! Collision detection and response on the integer grid
//!
//! Two rules: shapes bounce elastically off the fence, and the ball is
//! kicked away from a paddle whose edge it touches.

use glam::IVec2;

use super::region::Region;

/// Which edge of an axis a shape crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left for axis 0, top for axis 1
    Low,
    /// Right for axis 0, bottom for axis 1
    High,
}

/// Per-axis result of a fence check (index 0 horizontal, 1 vertical)
pub type FenceBounce = [Option<Edge>; 2];

/// Bounce a tentative position off the fence.
///
/// `bounds` is the shape's box at the tentative `pos`. On each axis the low
/// edge is checked first; only if it holds is the high edge checked, so one
/// axis reflects at most once per step. A reflection negates the velocity on
/// that axis and moves the position by twice the new velocity, undoing the
/// overshoot of the step just taken.
pub fn fence_bounce(
    bounds: &Region,
    fence: &Region,
    pos: &mut IVec2,
    velocity: &mut IVec2,
) -> FenceBounce {
    let mut result = [None; 2];
    for axis in 0..2 {
        let edge = if bounds.top_left[axis] < fence.top_left[axis] {
            Edge::Low
        } else if bounds.bot_right[axis] > fence.bot_right[axis] {
            Edge::High
        } else {
            continue;
        };
        velocity[axis] = -velocity[axis];
        pos[axis] += 2 * velocity[axis];
        result[axis] = Some(edge);
    }
    result
}

/// Vertical direction the ball must take after touching `paddle`, if it does.
///
/// Contact means the ball lies strictly inside the paddle horizontally and
/// its top edge sits on the paddle's bottom edge (ball below, returns +1)
/// or its bottom edge sits on the paddle's top edge (ball above, returns -1).
pub fn paddle_contact(ball: &Region, paddle: &Region) -> Option<i32> {
    let inside = ball.top_left.x > paddle.top_left.x && ball.bot_right.x < paddle.bot_right.x;
    if !inside {
        return None;
    }

    if ball.top_left.y == paddle.bot_right.y {
        Some(1)
    } else if ball.bot_right.y == paddle.top_left.y {
        Some(-1)
    } else {
        None
    }
}
