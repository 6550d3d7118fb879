use crate::base::Tile;

//////////////////////////////////////////////////////////////////////////////

// ShieldTracker: follows the terminal-phase shield as it oscillates
// horizontally, learning its two turning points from observed movement
// and extrapolating where it will be when the boss next attacks.

pub struct ShieldTracker {
    last_position: Option<Tile>,
    base: Option<Tile>,

    // -2 until the first observed move, -1 once movement starts (a
    // one-shot signal the encounter consumes to seed the boss cycle),
    // 0 after consumption.
    corner_ticks: i32,

    negative_x: i32,
    positive_x: i32,
    last_nonzero_delta: i32,
    last_delta: i32,
    ticks_left_in_corner: i32,
}

impl Default for ShieldTracker {
    fn default() -> Self {
        Self {
            last_position: None,
            base: None,
            corner_ticks: -2,
            negative_x: -1,
            positive_x: -1,
            last_nonzero_delta: 0,
            last_delta: 0,
            ticks_left_in_corner: -1,
        }
    }
}

impl ShieldTracker {
    // Fresh boss spawn: forget movement history but keep any turning
    // points already learned this attempt.
    pub fn reset(&mut self) {
        self.corner_ticks = -2;
        self.last_position = None;
        self.base = None;
    }

    pub fn position(&self) -> Option<Tile> { self.last_position }

    pub fn base(&self) -> Option<Tile> { self.base }

    pub fn corner_pending(&self) -> bool { self.corner_ticks == -1 }

    pub fn consume_corner(&mut self) { self.corner_ticks = 0; }

    // One observation of the shield's position, once per tick.
    pub fn observe(&mut self, current: Tile) {
        if let Some(last) = self.last_position {
            if last.0 != current.0 && self.corner_ticks == -2 {
                self.base = Some(last);
                self.corner_ticks = -1;
            }

            let delta = current.0 - last.0;
            if delta != 0 {
                self.last_nonzero_delta = delta;
            }

            if delta == 0 {
                if self.last_nonzero_delta > 0 {
                    self.positive_x = current.0;
                } else if self.last_nonzero_delta < 0 {
                    self.negative_x = current.0;
                }

                // Entering the corner starts the dwell countdown; each
                // further motionless tick burns one.
                if self.last_delta != 0 {
                    self.ticks_left_in_corner = 4;
                } else if self.ticks_left_in_corner > 0 {
                    self.ticks_left_in_corner -= 1;
                }
            }

            self.last_delta = delta;
        }

        self.last_position = Some(current);
    }

    // Extrapolate the shield's x when the boss next attacks, reflecting
    // off a turning point if the projection overshoots it. Requires both
    // turning points to be known.
    pub fn predicted_x(&self, boss_ticks: i32, final_phase: bool) -> Option<i32> {
        let current = self.last_position?;
        if self.positive_x == -1 || self.negative_x == -1 { return None; }

        let mut ticks = if final_phase { boss_ticks } else { boss_ticks - 1 };
        if ticks < 1 {
            if final_phase { return None; }
            ticks = 10;
        }

        let mut x = current.0;
        if self.last_nonzero_delta > 0 {
            x += ticks;
            if x > self.positive_x {
                x -= self.ticks_left_in_corner;
                if x <= self.positive_x {
                    x = self.positive_x;
                } else {
                    x = 2 * self.positive_x - x;
                }
            }
        } else {
            x -= ticks;
            if x < self.negative_x {
                x += self.ticks_left_in_corner;
                if x >= self.negative_x {
                    x = self.negative_x;
                } else {
                    x = 2 * self.negative_x - x;
                }
            }
        }
        Some(x)
    }
}

// The protected pocket south of the shield for a given shield position.
pub fn safe_zone(x: i32, y: i32, plane: i32) -> impl Iterator<Item = Tile> {
    (x - 1..=x + 3).flat_map(move |sx| {
        (y - 4..=y - 2).map(move |sy| Tile(sx, sy, plane))
    })
}

//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(tracker: &mut ShieldTracker, xs: &[i32]) {
        for &x in xs {
            tracker.observe(Tile(x, 10, 0));
        }
    }

    #[test]
    fn test_first_move_flags_corner_pending() {
        let mut tracker = ShieldTracker::default();
        tracker.observe(Tile(30, 10, 0));
        assert!(!tracker.corner_pending());
        tracker.observe(Tile(31, 10, 0));
        assert!(tracker.corner_pending());
        assert_eq!(tracker.base(), Some(Tile(30, 10, 0)));

        tracker.consume_corner();
        assert!(!tracker.corner_pending());
    }

    #[test]
    fn test_turning_point_starts_corner_countdown() {
        let mut tracker = ShieldTracker::default();
        // Three ticks of positive delta, then the shield holds still.
        walk(&mut tracker, &[30, 31, 32, 33, 33]);
        assert_eq!(tracker.positive_x, 33);
        assert_eq!(tracker.ticks_left_in_corner, 4);

        // Each further motionless tick burns one tick of dwell.
        walk(&mut tracker, &[33, 33]);
        assert_eq!(tracker.ticks_left_in_corner, 2);
    }

    #[test]
    fn test_negative_turning_point() {
        let mut tracker = ShieldTracker::default();
        walk(&mut tracker, &[30, 29, 28, 28]);
        assert_eq!(tracker.negative_x, 28);
        assert_eq!(tracker.positive_x, -1);
    }

    #[test]
    fn test_prediction_requires_both_corners() {
        let mut tracker = ShieldTracker::default();
        walk(&mut tracker, &[30, 31, 32, 32]);
        assert_eq!(tracker.predicted_x(5, false), None);
    }

    #[test]
    fn test_prediction_clamps_into_the_corner() {
        let mut tracker = ShieldTracker::default();
        walk(&mut tracker, &[28, 27, 27, 28, 29, 30, 31, 32, 33, 33]);
        assert_eq!(tracker.negative_x, 27);
        assert_eq!(tracker.positive_x, 33);
        assert_eq!(tracker.ticks_left_in_corner, 4);

        // At the corner with 4 dwell ticks left: a 4-tick projection
        // overshoots by 4, all of which the dwell absorbs, landing on
        // the turning point itself.
        assert_eq!(tracker.predicted_x(4, true), Some(33));
    }

    #[test]
    fn test_prediction_reflects_off_the_corner() {
        let mut tracker = ShieldTracker::default();
        walk(&mut tracker, &[28, 27, 27, 28, 29, 30]);
        tracker.positive_x = 33;
        tracker.ticks_left_in_corner = 0;

        // Moving right from 30 with 7 ticks out: reaches 37, reflects to
        // 33 - (37 - 33) = 29.
        assert_eq!(tracker.predicted_x(7, true), Some(29));
    }

    #[test]
    fn test_prediction_final_phase_aborts_when_imminent() {
        let mut tracker = ShieldTracker::default();
        walk(&mut tracker, &[28, 27, 27, 28, 29, 30, 31, 32, 33, 33]);
        assert_eq!(tracker.predicted_x(0, true), None);
        // Outside the final phase the cycle length stands in instead.
        assert!(tracker.predicted_x(0, false).is_some());
    }

    #[test]
    fn test_safe_zone_shape() {
        let tiles: Vec<Tile> = safe_zone(30, 10, 0).collect();
        assert_eq!(tiles.len(), 15);
        assert!(tiles.contains(&Tile(29, 6, 0)));
        assert!(tiles.contains(&Tile(33, 8, 0)));
        assert!(!tiles.contains(&Tile(30, 9, 0)));
    }
}
