//! Fire-and-forget signal when a swipe is committed

use crate::domain::DecisionRecord;
use std::io::{self, Write};

pub trait Feedback: Send {
    fn decision_committed(&self, record: &DecisionRecord);
}

/// Rings the terminal bell, the closest thing a terminal has to a vibration
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Feedback for TerminalBell {
    fn decision_committed(&self, _record: &DecisionRecord) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

#[derive(Debug, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn decision_committed(&self, _record: &DecisionRecord) {}
}
