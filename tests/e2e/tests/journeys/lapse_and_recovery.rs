//! Journey: hard ratings inside and after the learning phase, and the
//! recovery path back to long intervals.

use chrono::Duration;
use lexis_e2e_tests::harness::StudyHarness;
use lexis_core::{Direction, Phase, Quality};

#[test]
fn hard_during_learning_erases_credit_and_reappears_first() {
    let mut h = StudyHarness::new();
    h.store.select_word(9).unwrap();

    h.submit(9, Direction::Forward, Quality::Easy);
    h.advance(Duration::hours(1));
    let almost = h.submit(9, Direction::Forward, Quality::Easy);
    assert_eq!(almost.successful_reviews, 2.0);

    h.advance(Duration::hours(1));
    let failed = h.submit(9, Direction::Forward, Quality::Hard);
    assert_eq!(failed.successful_reviews, 0.0);
    assert_eq!(failed.phase, Phase::Learning);
    assert_eq!(failed.hard_presses, 1);
    assert_eq!(failed.next_review_at, h.now() + Duration::minutes(5));
    // Smallest offset over the current session maximum
    assert_eq!(failed.session_position, Some(h.session_max));

    // The climb starts over: three fresh easies to graduate
    for _ in 0..2 {
        h.advance(Duration::minutes(61));
        let record = h.submit(9, Direction::Forward, Quality::Easy);
        assert_eq!(record.phase, Phase::Learning);
    }
    h.advance(Duration::minutes(61));
    let graduated = h.submit(9, Direction::Forward, Quality::Easy);
    assert_eq!(graduated.phase, Phase::Review);
    assert_eq!(graduated.hard_presses, 0);
}

#[test]
fn review_lapse_restarts_interval_but_keeps_review_phase() {
    let mut h = StudyHarness::new();
    h.store.select_word(21).unwrap();

    // Graduate, then grow the interval with two easy reviews
    for _ in 0..3 {
        h.submit(21, Direction::Forward, Quality::Easy);
        h.advance(Duration::minutes(61));
    }
    h.advance(Duration::days(1));
    h.submit(21, Direction::Forward, Quality::Easy);
    h.advance(Duration::days(3));
    let grown = h.submit(21, Direction::Forward, Quality::Easy);
    assert_eq!(grown.interval_days, 7.0);
    assert_eq!(grown.repetitions, 3);

    // A week later the word is gone: lapse
    h.advance(Duration::days(7));
    let lapsed = h.submit(21, Direction::Forward, Quality::Hard);
    assert_eq!(lapsed.phase, Phase::Review);
    assert_eq!(lapsed.repetitions, 1);
    assert_eq!(lapsed.interval_days, 1.0);
    assert_eq!(lapsed.next_review_at, h.now() + Duration::days(1));
    assert_eq!(lapsed.session_position, None);
    assert!(lapsed.ease_factor < grown.ease_factor);

    // Recovery climbs the progressive table again from the lapse count
    h.advance(Duration::days(1));
    let recovered = h.submit(21, Direction::Forward, Quality::Easy);
    assert_eq!(recovered.repetitions, 2);
    assert_eq!(recovered.interval_days, 3.0);
}

#[test]
fn overdue_review_outranks_buried_learning_items() {
    let mut h = StudyHarness::new();
    h.store.select_word(1).unwrap();
    h.store.select_word(2).unwrap();

    // Word 1 graduates; word 2 gets buried at an extreme session depth
    for _ in 0..3 {
        h.submit(1, Direction::Forward, Quality::Easy);
        h.advance(Duration::minutes(61));
    }
    h.session_max = 5_500;
    h.submit(2, Direction::Forward, Quality::Hard);

    // Freshly scheduled review loses to the learning item even when buried
    let next = h.store.next_item(Direction::Forward).unwrap().unwrap();
    assert_eq!(next.word_id, 2);

    // Four days overdue, the review item wins
    h.advance(Duration::days(5));
    let next = h.store.next_item(Direction::Forward).unwrap().unwrap();
    assert_eq!(next.word_id, 1);
}

#[test]
fn deselect_resets_all_progress() {
    let mut h = StudyHarness::new();
    h.store.select_word(3).unwrap();
    for _ in 0..3 {
        h.submit(3, Direction::Forward, Quality::Easy);
        h.advance(Duration::minutes(61));
    }

    h.store.deselect_word(3).unwrap();
    assert!(h.store.load(3, Direction::Forward).unwrap().is_none());

    // Selecting again starts from scratch
    let (forward, _) = h.store.select_word(3).unwrap();
    assert_eq!(forward.phase, Phase::Learning);
    assert_eq!(forward.repetitions, 0);
    assert_eq!(forward.successful_reviews, 0.0);
}
