//! Scripted swipe session used by the demo binary.

use swipedeck_ui::{SwipeDecision, SwipeDirection};

use crate::ledger::SwipeLedger;
use crate::shell::DemoShell;

const MAX_SETTLE_FRAMES: usize = 600;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub ledger: SwipeLedger,
    /// Release decisions, in order, for every gesture that became a drag.
    pub decisions: Vec<SwipeDecision>,
    /// Button taps dropped because a commit was in flight or the deck was empty.
    pub ignored_taps: usize,
    pub remaining: usize,
    pub frames: u64,
}

impl SessionReport {
    fn gesture(&mut self, shell: &mut DemoShell, label: &str, decision: Option<SwipeDecision>) {
        log::info!("{}: {:?}", label, decision);
        self.decisions.extend(decision);
        shell.run_until_idle(MAX_SETTLE_FRAMES);
    }

    fn tap(&mut self, shell: &DemoShell, direction: SwipeDirection) {
        let started = shell.handle().swipe(direction);
        log::info!(
            "tap {:?}: {}",
            direction,
            if started { "started" } else { "ignored" }
        );
        if !started {
            self.ignored_taps += 1;
        }
    }
}

/// Plays a fixed mix of drags, flings and button taps against the shell.
pub fn run_scripted_session(shell: &mut DemoShell) -> SessionReport {
    let width = shell.stack().viewport().width;
    let mut report = SessionReport::default();

    log::info!("starting session with {} cards", shell.stack().remaining());
    for line in shell.describe() {
        log::info!("  {}", line);
    }

    let decision = shell.drag(0.35 * width, 20.0, 12, true);
    report.gesture(shell, "slow drag right", decision);

    let decision = shell.drag(-0.1 * width, 10.0, 8, true);
    report.gesture(shell, "short drag left", decision);

    let decision = shell.drag(-0.15 * width, 0.0, 2, false);
    report.gesture(shell, "flick left", decision);

    report.tap(shell, SwipeDirection::Top);
    shell.run_until_idle(MAX_SETTLE_FRAMES);

    // The second tap lands while the first card is still leaving.
    report.tap(shell, SwipeDirection::Right);
    report.tap(shell, SwipeDirection::Right);
    shell.run_until_idle(MAX_SETTLE_FRAMES);

    let decision = shell.drag(-0.4 * width, -0.5 * width, 3, false);
    report.gesture(shell, "diagonal flick up-left", decision);

    log::info!("top of deck after session:");
    for line in shell.describe() {
        log::info!("  {}", line);
    }

    report.ledger = shell.ledger();
    report.remaining = shell.stack().remaining();
    report.frames = shell.frames_run();
    report
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
