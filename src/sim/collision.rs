//! Motion and collision
//!
//! Axis-aligned only: balls are integrated with one explicit Euler step per
//! tick and reflected off the canvas walls, the paddle and bricks. There is
//! no sub-stepping, so a fast enough ball can tunnel through a brick.
//!
//! Wall and paddle checks use the projected position (`pos + vel`) after the
//! tick's integration step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::BrickGrid;
use super::state::{Ball, GameEvent, Paddle};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict containment: points on the border are outside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Playfield size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Advance every ball one tick and resolve its collisions.
///
/// Balls are processed in insertion order, bricks in column-major order.
/// A ball whose center lies inside several bricks destroys all of them in
/// the same tick, flipping its vertical speed once per brick. Balls that
/// leave through the bottom are removed; `AllBallsLost` is raised when that
/// empties the collection.
pub fn step_balls(
    balls: &mut Vec<Ball>,
    paddle: &Paddle,
    grid: &mut BrickGrid,
    bounds: Bounds,
    score_per_brick: u64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let had_balls = !balls.is_empty();
    let paddle_rect = paddle.rect();

    balls.retain_mut(|ball| {
        ball.pos += ball.vel;

        reflect_walls(ball, bounds);

        if hits_paddle(ball, &paddle_rect) {
            ball.vel.y = -ball.vel.y.abs();
            events.push(GameEvent::PaddleHit { ball_id: ball.id });
        }

        let mut hits = Vec::new();
        for brick in grid.iter_alive() {
            if brick.rect.contains(ball.pos) {
                hits.push((brick.column, brick.row, brick.rect));
            }
        }
        for (column, row, rect) in hits {
            if !ball.fireball {
                ball.vel.y = -ball.vel.y;
            }
            grid.destroy(column, row);
            events.push(GameEvent::BrickDestroyed {
                column,
                row,
                rect,
                score_delta: score_per_brick,
            });
        }

        // Top edge below the canvas floor
        if ball.pos.y - ball.radius > bounds.height {
            events.push(GameEvent::BallLost { ball_id: ball.id });
            return false;
        }
        true
    });

    if had_balls && balls.is_empty() {
        events.push(GameEvent::AllBallsLost);
    }
    events
}

fn reflect_walls(ball: &mut Ball, bounds: Bounds) {
    let next = ball.pos + ball.vel;
    if next.x > bounds.width - ball.radius || next.x < ball.radius {
        ball.vel.x = -ball.vel.x;
    }
    if next.y < ball.radius {
        ball.vel.y = -ball.vel.y;
    }
}

/// Descending ball whose projected bottom edge reaches the paddle top while
/// its x lies within the paddle span. Ascending balls never count, so a ball
/// lingering in the paddle zone bounces once per approach.
fn hits_paddle(ball: &Ball, paddle: &Rect) -> bool {
    if ball.vel.y <= 0.0 {
        return false;
    }
    let next_y = ball.pos.y + ball.vel.y;
    next_y + ball.radius > paddle.y
        && ball.pos.y - ball.radius < paddle.bottom()
        && ball.pos.x > paddle.x
        && ball.pos.x < paddle.right()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::GridLayout;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn paddle() -> Paddle {
        Paddle::new(100.0, 20.0, 800.0, 600.0)
    }

    fn grid() -> BrickGrid {
        let mut grid = BrickGrid::new(10, 5);
        grid.layout(&GridLayout {
            cell_width: 75.0,
            cell_height: 30.0,
            padding: 5.0,
            offset_x: 30.0,
            offset_y: 60.0,
        });
        grid
    }

    fn ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(1, pos, vel, 10.0)
    }

    #[test]
    fn test_rect_contains_is_strict() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(5.0, 5.0)));
        assert!(!r.contains(Vec2::new(0.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_integration() {
        let mut balls = vec![ball(Vec2::new(400.0, 400.0), Vec2::new(3.0, -4.0))];
        let events = step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert!(events.is_empty());
        assert_eq!(balls[0].pos, Vec2::new(403.0, 396.0));
    }

    #[test]
    fn test_side_walls_reflect() {
        let mut balls = vec![
            ball(Vec2::new(784.0, 400.0), Vec2::new(4.0, 1.0)),
            ball(Vec2::new(16.0, 400.0), Vec2::new(-4.0, 1.0)),
        ];
        step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert_eq!(balls[0].vel.x, -4.0);
        assert_eq!(balls[1].vel.x, 4.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut balls = vec![ball(Vec2::new(400.0, 16.0), Vec2::new(0.0, -4.0))];
        step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert_eq!(balls[0].vel.y, 4.0);
    }

    #[test]
    fn test_paddle_forces_upward() {
        // Paddle spans x 350..450, top at 580
        let mut balls = vec![ball(Vec2::new(400.0, 564.0), Vec2::new(1.0, 4.0))];
        let events = step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert!(balls[0].vel.y < 0.0);
        assert_eq!(events, vec![GameEvent::PaddleHit { ball_id: 1 }]);
    }

    #[test]
    fn test_paddle_single_event_per_approach() {
        let mut balls = vec![ball(Vec2::new(400.0, 564.0), Vec2::new(0.0, 4.0))];
        let p = paddle();
        let mut g = grid();
        let first = step_balls(&mut balls, &p, &mut g, BOUNDS, 10);
        // Still inside the paddle zone on the next tick, but moving up
        let second = step_balls(&mut balls, &p, &mut g, BOUNDS, 10);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!(balls[0].vel.y < 0.0);
    }

    #[test]
    fn test_paddle_miss_outside_span() {
        let mut balls = vec![ball(Vec2::new(100.0, 564.0), Vec2::new(0.0, 4.0))];
        let events = step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert!(events.is_empty());
        assert!(balls[0].vel.y > 0.0);
    }

    #[test]
    fn test_brick_hit_reflects_and_destroys() {
        let mut g = grid();
        // Brick (0, 0) spans x 30..105, y 60..90
        let mut balls = vec![ball(Vec2::new(60.0, 79.0), Vec2::new(0.0, -4.0))];
        let events = step_balls(&mut balls, &paddle(), &mut g, BOUNDS, 10);
        assert_eq!(balls[0].vel.y, 4.0);
        assert!(!g.cell(0, 0).unwrap().is_alive());
        assert_eq!(
            events,
            vec![GameEvent::BrickDestroyed {
                column: 0,
                row: 0,
                rect: Rect::new(30.0, 60.0, 75.0, 30.0),
                score_delta: 10,
            }]
        );
    }

    #[test]
    fn test_fireball_passes_through() {
        let mut g = grid();
        let mut b = ball(Vec2::new(60.0, 79.0), Vec2::new(0.0, -4.0));
        b.fireball = true;
        let mut balls = vec![b];
        let events = step_balls(&mut balls, &paddle(), &mut g, BOUNDS, 10);
        assert_eq!(balls[0].vel.y, -4.0);
        assert_eq!(events.len(), 1);
        assert_eq!(g.alive_count(), 49);
    }

    #[test]
    fn test_overlapping_bricks_all_hit() {
        // 2×2 grid collapsed onto one 50×50 rectangle at (100, 100)
        let mut g = BrickGrid::new(2, 2);
        g.layout(&GridLayout {
            cell_width: 50.0,
            cell_height: 50.0,
            padding: -50.0,
            offset_x: 100.0,
            offset_y: 100.0,
        });
        let mut balls = vec![ball(Vec2::new(125.0, 129.0), Vec2::new(0.0, -4.0))];
        let events = step_balls(&mut balls, &paddle(), &mut g, BOUNDS, 10);
        let order: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::BrickDestroyed { column, row, .. } => Some((*column, *row)),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        // Flipped four times
        assert_eq!(balls[0].vel.y, -4.0);
        assert!(g.is_cleared());
    }

    #[test]
    fn test_ball_lost_below_floor() {
        let mut balls = vec![
            ball(Vec2::new(100.0, 615.0), Vec2::new(0.0, 4.0)),
            Ball::new(2, Vec2::new(400.0, 300.0), Vec2::new(0.0, 4.0), 10.0),
        ];
        let events = step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert_eq!(events, vec![GameEvent::BallLost { ball_id: 1 }]);
        assert_eq!(balls.len(), 1);
        assert_eq!(balls[0].id, 2);
    }

    #[test]
    fn test_last_ball_lost() {
        let mut balls = vec![ball(Vec2::new(100.0, 615.0), Vec2::new(0.0, 4.0))];
        let events = step_balls(&mut balls, &paddle(), &mut grid(), BOUNDS, 10);
        assert_eq!(
            events,
            vec![GameEvent::BallLost { ball_id: 1 }, GameEvent::AllBallsLost]
        );
        assert!(balls.is_empty());
    }
}
