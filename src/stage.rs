//! Stage scheduling
//!
//! The festival runs one stage slot per genre. Each slot plays its lineup
//! strictly in order, one performer at a time: at most one performer is ever
//! active in a slot, and a slot never hosts a performer of another genre.
//! The show runs to completion regardless of how the crowd behaves; the end
//! of the last set is what triggers the run's shutdown sequence.
//!
//! Attendees observe a slot with [`StageScheduler::current_performer`], a
//! cheap lock of the active cell. Slot threads never hold that lock while a
//! set is playing.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Genre, PerformerSpec};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// One performer in a slot lineup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Performer {
    /// Stage name
    pub name: String,
    /// Genre, always equal to the hosting slot's genre
    pub genre: Genre,
    /// How long the set plays
    pub set_duration: Duration,
}

impl Performer {
    fn from_spec(spec: &PerformerSpec) -> Self {
        Self {
            name: spec.name.clone(),
            genre: spec.genre,
            set_duration: Duration::from_millis(spec.set_ms),
        }
    }
}

/// One finished set, kept for post-run inspection
#[derive(Debug, Clone)]
pub struct SetRecord {
    /// Who played
    pub performer: String,
    /// When the set started
    pub started_at: Instant,
    /// When the set ended
    pub ended_at: Instant,
}

#[derive(Debug)]
struct StageSlot {
    genre: Genre,
    lineup: Vec<Performer>,
    active: Arc<Mutex<Option<Performer>>>,
    history: Arc<Mutex<Vec<SetRecord>>>,
}

/// Schedules the full roster across one slot per genre
#[derive(Debug)]
pub struct StageScheduler {
    slots: Vec<StageSlot>,
}

/// Handle on a running show; joining it waits for the last set to end
#[derive(Debug)]
pub struct StageShow {
    handles: Vec<JoinHandle<u64>>,
}

impl StageScheduler {
    /// Partition the roster into genre slots, preserving roster order within
    /// each slot
    pub fn new(roster: &[PerformerSpec]) -> Self {
        let slots = Genre::all()
            .into_iter()
            .map(|genre| StageSlot {
                genre,
                lineup: roster
                    .iter()
                    .filter(|spec| spec.genre == genre)
                    .map(Performer::from_spec)
                    .collect(),
                active: Arc::new(Mutex::new(None)),
                history: Arc::new(Mutex::new(Vec::new())),
            })
            .collect();
        Self { slots }
    }

    /// Number of slots, one per genre
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Genre hosted by a slot
    pub fn slot_genre(&self, slot: usize) -> Option<Genre> {
        self.slots.get(slot).map(|s| s.genre)
    }

    /// The performer currently playing in a slot, if any
    pub fn current_performer(&self, slot: usize) -> Option<Performer> {
        let slot = self.slots.get(slot)?;
        slot.active.lock().ok()?.clone()
    }

    /// Finished sets for a slot, in play order
    pub fn set_history(&self, slot: usize) -> Vec<SetRecord> {
        self.slots
            .get(slot)
            .and_then(|s| s.history.lock().ok().map(|h| h.clone()))
            .unwrap_or_default()
    }

    /// Start the show: one thread per slot, each playing its lineup in order
    pub fn start(&self) -> StageShow {
        let handles = self
            .slots
            .iter()
            .map(|slot| {
                let genre = slot.genre;
                let lineup = slot.lineup.clone();
                let active = Arc::clone(&slot.active);
                let history = Arc::clone(&slot.history);
                thread::spawn(move || run_slot(genre, lineup, &active, &history))
            })
            .collect();
        StageShow { handles }
    }
}

fn run_slot(
    genre: Genre,
    lineup: Vec<Performer>,
    active: &Mutex<Option<Performer>>,
    history: &Mutex<Vec<SetRecord>>,
) -> u64 {
    let mut sets = 0;
    for performer in lineup {
        let started_at = Instant::now();
        if let Ok(mut cell) = active.lock() {
            *cell = Some(performer.clone());
        }
        debug!(slot = %genre, performer = %performer.name, "set started");

        // The set plays with the active cell unlocked
        thread::sleep(performer.set_duration);

        if let Ok(mut cell) = active.lock() {
            *cell = None;
        }
        if let Ok(mut records) = history.lock() {
            records.push(SetRecord { performer: performer.name.clone(), started_at, ended_at: Instant::now() });
        }
        debug!(slot = %genre, performer = %performer.name, "set ended");
        sets += 1;
    }
    info!(slot = %genre, sets, "slot lineup complete");
    sets
}

impl StageShow {
    /// Wait for every slot to finish its lineup; returns total sets played
    pub fn join(self) -> SimulationResult<u64> {
        let mut total = 0;
        for handle in self.handles {
            total += handle
                .join()
                .map_err(|_| SimulationError::phase_fault("Stage", "slot thread panicked"))?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<PerformerSpec> {
        vec![
            PerformerSpec { name: "A".into(), genre: Genre::Pop, set_ms: 10 },
            PerformerSpec { name: "B".into(), genre: Genre::Rap, set_ms: 10 },
            PerformerSpec { name: "C".into(), genre: Genre::Pop, set_ms: 10 },
            PerformerSpec { name: "D".into(), genre: Genre::Reggaeton, set_ms: 10 },
        ]
    }

    #[test]
    fn test_slots_partition_roster_by_genre_in_order() {
        let scheduler = StageScheduler::new(&roster());
        assert_eq!(scheduler.slot_count(), 3);
        assert_eq!(scheduler.slot_genre(0), Some(Genre::Pop));
        assert_eq!(scheduler.slot_genre(1), Some(Genre::Rap));
        assert_eq!(scheduler.slot_genre(2), Some(Genre::Reggaeton));
        assert_eq!(scheduler.slots[0].lineup.len(), 2);
        assert_eq!(scheduler.slots[0].lineup[0].name, "A");
        assert_eq!(scheduler.slots[0].lineup[1].name, "C");
    }

    #[test]
    fn test_show_plays_every_set() {
        let scheduler = StageScheduler::new(&roster());
        let total = scheduler.start().join().unwrap();
        assert_eq!(total, 4);
        assert_eq!(scheduler.set_history(0).len(), 2);
        assert_eq!(scheduler.set_history(1).len(), 1);
        assert_eq!(scheduler.set_history(2).len(), 1);
    }

    #[test]
    fn test_sets_within_a_slot_never_overlap() {
        let scheduler = StageScheduler::new(&roster());
        scheduler.start().join().unwrap();

        for slot in 0..scheduler.slot_count() {
            let history = scheduler.set_history(slot);
            for pair in history.windows(2) {
                assert!(
                    pair[1].started_at >= pair[0].ended_at,
                    "slot {} sets overlapped",
                    slot
                );
            }
        }
    }

    #[test]
    fn test_slot_is_quiet_after_the_show() {
        let scheduler = StageScheduler::new(&roster());
        scheduler.start().join().unwrap();
        for slot in 0..scheduler.slot_count() {
            assert!(scheduler.current_performer(slot).is_none());
        }
    }

    #[test]
    fn test_empty_lineup_slot_finishes_immediately() {
        let scheduler = StageScheduler::new(&[PerformerSpec {
            name: "Solo".into(),
            genre: Genre::Rap,
            set_ms: 5,
        }]);
        let total = scheduler.start().join().unwrap();
        assert_eq!(total, 1);
        assert!(scheduler.set_history(0).is_empty());
    }
}
