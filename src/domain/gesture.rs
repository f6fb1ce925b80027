//! Turns a horizontal drag on the front card into a swipe decision.

use super::Direction;

/// Displacement a release must exceed to commit a decision
pub const COMMIT_THRESHOLD: f64 = 60.0;
/// Displacement at which the LIKE/PASS label is emphasized
pub const EMPHASIS_THRESHOLD: f64 = 40.0;
/// Displacement at which tint and fade reach full strength
pub const FEEDBACK_RANGE: f64 = 150.0;

/// Interprets the displacement at release.
///
/// Returns `None` when the threshold is not crossed; the card springs back.
pub fn interpret(displacement: f64) -> Option<Direction> {
    if displacement.abs() > COMMIT_THRESHOLD {
        Some(Direction::from_displacement(displacement))
    } else {
        None
    }
}

/// Direction whose label should be emphasized while dragging
pub fn emphasis(displacement: f64) -> Option<Direction> {
    if displacement.abs() >= EMPHASIS_THRESHOLD {
        Some(Direction::from_displacement(displacement))
    } else {
        None
    }
}

/// Strength of the visual feedback for a displacement, in `[0, 1]`
pub fn feedback_ratio(displacement: f64) -> f64 {
    (displacement.abs() / FEEDBACK_RANGE).clamp(0.0, 1.0)
}

/// Tracks a single pointer drag.
///
/// Pointer positions are terminal columns; `scale` converts a column delta
/// into displacement units.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTracker {
    origin: Option<f64>,
    current: f64,
    scale: f64,
}

impl DragTracker {
    pub fn new(scale: f64) -> Self {
        Self {
            origin: None,
            current: 0.0,
            scale,
        }
    }

    /// Starts a drag at `x`. Returns false if a drag is already active.
    pub fn begin(&mut self, x: f64) -> bool {
        if self.origin.is_some() {
            return false;
        }
        self.origin = Some(x);
        self.current = x;
        true
    }

    pub fn update(&mut self, x: f64) {
        if self.origin.is_some() {
            self.current = x;
        }
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn displacement(&self) -> f64 {
        match self.origin {
            Some(origin) => (self.current - origin) * self.scale,
            None => 0.0,
        }
    }

    /// Ends the drag and returns the decision it produced, if any
    pub fn release(&mut self) -> Option<Direction> {
        if !self.is_active() {
            return None;
        }
        let decision = interpret(self.displacement());
        self.cancel();
        decision
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.current = 0.0;
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod interpret_tests {
        use super::*;

        #[test]
        fn test_threshold_exactly_does_not_commit() {
            assert_eq!(interpret(COMMIT_THRESHOLD), None);
            assert_eq!(interpret(-COMMIT_THRESHOLD), None);
        }

        #[test]
        fn test_just_past_threshold_commits() {
            let epsilon = 0.001;
            assert_eq!(
                interpret(COMMIT_THRESHOLD + epsilon),
                Some(Direction::Right)
            );
            assert_eq!(
                interpret(-COMMIT_THRESHOLD - epsilon),
                Some(Direction::Left)
            );
        }

        #[test]
        fn test_small_displacement_reverts() {
            assert_eq!(interpret(0.0), None);
            assert_eq!(interpret(25.0), None);
            assert_eq!(interpret(-59.9), None);
        }

        #[test]
        fn test_emphasis_threshold() {
            assert_eq!(emphasis(39.9), None);
            assert_eq!(emphasis(40.0), Some(Direction::Right));
            assert_eq!(emphasis(-45.0), Some(Direction::Left));
        }

        #[test]
        fn test_feedback_ratio_is_clamped() {
            assert_eq!(feedback_ratio(0.0), 0.0);
            assert_eq!(feedback_ratio(-75.0), 0.5);
            assert_eq!(feedback_ratio(400.0), 1.0);
        }
    }

    mod tracker_tests {
        use super::*;

        #[test]
        fn test_drag_past_threshold_commits() {
            let mut tracker = DragTracker::new(4.0);
            assert!(tracker.begin(10.0));
            tracker.update(26.0);

            assert_eq!(tracker.displacement(), 64.0);
            assert_eq!(tracker.release(), Some(Direction::Right));
            assert!(!tracker.is_active());
        }

        #[test]
        fn test_drag_to_exact_threshold_springs_back() {
            let mut tracker = DragTracker::new(4.0);
            tracker.begin(40.0);
            tracker.update(25.0);

            assert_eq!(tracker.displacement(), -60.0);
            assert_eq!(tracker.release(), None);
            assert_eq!(tracker.displacement(), 0.0);
        }

        #[test]
        fn test_second_pointer_is_ignored() {
            let mut tracker = DragTracker::new(1.0);
            assert!(tracker.begin(0.0));
            assert!(!tracker.begin(100.0));

            tracker.update(-70.0);
            assert_eq!(tracker.release(), Some(Direction::Left));
        }

        #[test]
        fn test_update_without_begin_is_ignored() {
            let mut tracker = DragTracker::default();
            tracker.update(500.0);
            assert_eq!(tracker.displacement(), 0.0);
            assert_eq!(tracker.release(), None);
        }

        #[test]
        fn test_cancel_discards_drag() {
            let mut tracker = DragTracker::new(2.0);
            tracker.begin(0.0);
            tracker.update(100.0);
            tracker.cancel();

            assert!(!tracker.is_active());
            assert_eq!(tracker.release(), None);
        }
    }
}
