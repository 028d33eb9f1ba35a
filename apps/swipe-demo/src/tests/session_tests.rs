use super::*;

use crate::listing::sample_listings;
use crate::shell::FrameSource;
use swipedeck_ui_graphics::Size;

fn virtual_shell() -> DemoShell {
    DemoShell::new(
        Size::new(390.0, 844.0),
        FrameSource::virtual_clock(),
        sample_listings(),
    )
}

#[test]
fn scripted_session_fills_the_ledger() {
    let mut shell = virtual_shell();
    let report = run_scripted_session(&mut shell);

    assert_eq!(report.ledger.saved, vec![101, 104]);
    assert_eq!(report.ledger.rejected, vec![102, 105]);
    assert_eq!(report.ledger.super_liked, vec![103]);
    assert_eq!(report.ignored_taps, 1);
    assert_eq!(report.remaining, 2);
    assert_eq!(shell.stack().top_card_id(), Some(106));
}

#[test]
fn scripted_session_reports_each_release() {
    let mut shell = virtual_shell();
    let report = run_scripted_session(&mut shell);

    assert_eq!(
        report.decisions,
        vec![
            SwipeDecision::Commit(SwipeDirection::Right),
            SwipeDecision::Cancel,
            SwipeDecision::Commit(SwipeDirection::Left),
            SwipeDecision::Commit(SwipeDirection::Left),
        ]
    );
    assert!(report.frames > 0);
}

#[test]
fn ledger_sorts_ids_by_direction() {
    let mut ledger = SwipeLedger::new();
    ledger.record(SwipeDirection::Right, 1);
    ledger.record(SwipeDirection::Left, 2);
    ledger.record(SwipeDirection::Top, 3);
    ledger.record(SwipeDirection::Right, 4);

    assert_eq!(ledger.saved, vec![1, 4]);
    assert_eq!(ledger.total(), 4);
    assert!(ledger.contains(3));
    assert!(!ledger.contains(5));
    assert_eq!(
        ledger.to_string(),
        "saved [1, 4], rejected [2], super-liked [3]"
    );
}

#[test]
fn describe_lists_visible_cards_top_first() {
    let shell = virtual_shell();
    let lines = shell.describe();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[0] #101 Sunny studio"));
    assert!(lines[1].contains("scale=0.950"));
}
