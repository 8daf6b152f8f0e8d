//! Journey: a new word travels from selection through graduation into
//! multi-day reviews, with the ranker driving item order throughout.

use chrono::Duration;
use lexis_e2e_tests::harness::StudyHarness;
use lexis_core::{time_until_review, Direction, Phase, Quality};

#[test]
fn new_word_graduates_and_settles_into_review_cadence() {
    let mut h = StudyHarness::new();

    let (forward, backward) = h.store.select_word(100).unwrap();
    assert_eq!(forward.phase, Phase::Learning);
    assert_eq!(backward.phase, Phase::Learning);

    // Fresh learning item is the obvious next pick
    let next = h.store.next_item(Direction::Forward).unwrap().unwrap();
    assert_eq!(next.word_id, 100);
    assert_eq!(time_until_review(next.next_review_at, h.now()), "now");

    // Two easies accumulate credit without graduating
    let r1 = h.submit(100, Direction::Forward, Quality::Easy);
    assert_eq!(r1.successful_reviews, 1.0);
    assert_eq!(r1.session_position, Some(10));
    h.advance(Duration::minutes(61));

    let r2 = h.submit(100, Direction::Forward, Quality::Easy);
    assert_eq!(r2.successful_reviews, 2.0);
    assert_eq!(r2.phase, Phase::Learning);
    h.advance(Duration::minutes(61));

    // Third easy graduates at a one-day interval with a full ease factor
    let graduated = h.submit(100, Direction::Forward, Quality::Easy);
    assert_eq!(graduated.phase, Phase::Review);
    assert_eq!(graduated.interval_days, 1.0);
    assert_eq!(graduated.ease_factor, 2.5);
    assert_eq!(graduated.session_position, None);
    assert_eq!(graduated.next_review_at, h.now() + Duration::days(1));
    assert_eq!(time_until_review(graduated.next_review_at, h.now()), "tomorrow");

    // Next day, a medium review grows the interval by the short bucket
    h.advance(Duration::days(1));
    let reviewed = h.submit(100, Direction::Forward, Quality::Medium);
    assert_eq!(reviewed.phase, Phase::Review);
    assert!((reviewed.interval_days - 1.5).abs() < 1e-9);

    // The backward direction never moved
    let backward = h.store.load(100, Direction::Backward).unwrap().unwrap();
    assert_eq!(backward.repetitions, 0);
    assert_eq!(backward.phase, Phase::Learning);
}

#[test]
fn medium_only_path_graduates_on_the_sixth_rating() {
    let mut h = StudyHarness::new();
    h.store.select_word(7).unwrap();

    for i in 0..5 {
        let record = h.submit(7, Direction::Backward, Quality::Medium);
        assert_eq!(record.phase, Phase::Learning, "graduated early at rating {}", i);
        assert_eq!(record.successful_reviews, 0.5 * (i + 1) as f64);
        h.advance(Duration::minutes(11));
    }

    let graduated = h.submit(7, Direction::Backward, Quality::Medium);
    assert_eq!(graduated.phase, Phase::Review);
    assert_eq!(graduated.interval_days, 1.0);
    assert_eq!(graduated.next_review_at, h.now() + Duration::days(1));
}

#[test]
fn session_order_follows_priority_across_words() {
    let mut h = StudyHarness::new();
    for word_id in 1..=3 {
        h.store.select_word(word_id).unwrap();
    }

    // Word 1 gets pushed deep into the session queue by a hard press chain
    h.submit(1, Direction::Forward, Quality::Hard);
    h.submit(2, Direction::Forward, Quality::Medium);

    // Word 3 has no session position yet, so it outranks both
    let next = h.store.next_item(Direction::Forward).unwrap().unwrap();
    assert_eq!(next.word_id, 3);

    // After rating word 3 easy, the hard-pressed word 1 has the smallest
    // offset of the three and comes back first
    h.submit(3, Direction::Forward, Quality::Easy);
    let next = h.store.next_item(Direction::Forward).unwrap().unwrap();
    assert_eq!(next.word_id, 1);
}

#[test]
fn progress_survives_store_reopen() {
    let mut h = StudyHarness::new();
    h.store.select_word(55).unwrap();

    for _ in 0..3 {
        h.submit(55, Direction::Forward, Quality::Easy);
        h.advance(Duration::hours(2));
    }

    h.reopen();

    let record = h.store.load(55, Direction::Forward).unwrap().unwrap();
    assert_eq!(record.phase, Phase::Review);
    assert_eq!(record.repetitions, 1);

    let stats = h.store.stats().unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.review_count, 1);
}
