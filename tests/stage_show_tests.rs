//! Integration tests for stage scheduling and genre slot exclusivity

use festival_crowd_simulator::stage::StageScheduler;
use festival_crowd_simulator::types::{Genre, PerformerSpec};

fn roster() -> Vec<PerformerSpec> {
    vec![
        PerformerSpec::new("Pop One", Genre::Pop, 15),
        PerformerSpec::new("Rap One", Genre::Rap, 15),
        PerformerSpec::new("Pop Two", Genre::Pop, 15),
        PerformerSpec::new("Reggaeton One", Genre::Reggaeton, 15),
        PerformerSpec::new("Rap Two", Genre::Rap, 15),
    ]
}

/// Slots are genre-exclusive and preserve roster order within a genre
#[test]
fn test_slots_are_genre_exclusive_and_ordered() {
    let scheduler = StageScheduler::new(&roster());
    scheduler.start().join().unwrap();

    let pop: Vec<_> = scheduler.set_history(0).iter().map(|s| s.performer.clone()).collect();
    let rap: Vec<_> = scheduler.set_history(1).iter().map(|s| s.performer.clone()).collect();
    let reggaeton: Vec<_> =
        scheduler.set_history(2).iter().map(|s| s.performer.clone()).collect();

    assert_eq!(pop, vec!["Pop One", "Pop Two"]);
    assert_eq!(rap, vec!["Rap One", "Rap Two"]);
    assert_eq!(reggaeton, vec!["Reggaeton One"]);
}

/// No two sets in the same slot ever overlap in time
#[test]
fn test_no_overlapping_sets_within_a_slot() {
    let scheduler = StageScheduler::new(&roster());
    scheduler.start().join().unwrap();

    for slot in 0..scheduler.slot_count() {
        let history = scheduler.set_history(slot);
        for pair in history.windows(2) {
            assert!(
                pair[1].started_at >= pair[0].ended_at,
                "sets {} and {} overlapped in slot {}",
                pair[0].performer,
                pair[1].performer,
                slot
            );
        }
    }
}

/// The show plays the full roster exactly once
#[test]
fn test_show_plays_the_full_roster() {
    let scheduler = StageScheduler::new(&roster());
    let total = scheduler.start().join().unwrap();
    assert_eq!(total, 5);
}

/// Slot genres follow the fixed genre order, even when a genre is missing
/// from the roster
#[test]
fn test_genre_slots_exist_even_when_empty() {
    let scheduler =
        StageScheduler::new(&[PerformerSpec::new("Only Rap", Genre::Rap, 5)]);
    assert_eq!(scheduler.slot_count(), 3);
    assert_eq!(scheduler.slot_genre(0), Some(Genre::Pop));
    assert_eq!(scheduler.slot_genre(1), Some(Genre::Rap));
    assert_eq!(scheduler.slot_genre(2), Some(Genre::Reggaeton));

    let total = scheduler.start().join().unwrap();
    assert_eq!(total, 1);
    assert!(scheduler.set_history(0).is_empty());
    assert_eq!(scheduler.set_history(1).len(), 1);
}

/// After the show no slot reports an active performer
#[test]
fn test_stage_is_quiet_after_the_show() {
    let scheduler = StageScheduler::new(&roster());
    scheduler.start().join().unwrap();
    for slot in 0..scheduler.slot_count() {
        assert!(scheduler.current_performer(slot).is_none());
    }
}
