//! Population generation
//!
//! Builds the attendee population from configuration, optionally seeded for
//! reproducible runs. Ticket classes, ages, restroom zones and free-pass
//! benefits are drawn here, once, before any thread starts.

use crate::attendee::Attendee;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Activity, RestroomZone, SimulationConfig, TicketType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

const TICKET_CHOICES: [TicketType; 4] = [
    TicketType::FullAccess,
    TicketType::ThreeDayPass,
    TicketType::OneDayPass,
    TicketType::NoTicket,
];

/// Generates the attendee population for one run
#[derive(Debug)]
pub struct AttendeeGenerator {
    rng: StdRng,
}

impl AttendeeGenerator {
    /// Create a generator, seeded when the configuration requests it
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Generate the full population described by the configuration
    pub fn generate(&mut self, config: &SimulationConfig) -> SimulationResult<Vec<Attendee>> {
        if config.attendee_count == 0 {
            return Err(SimulationError::population_error("attendee_count must be positive"));
        }

        let attendees: Vec<Attendee> =
            (0..config.attendee_count).map(|_| self.generate_one(config)).collect();

        let ticketless =
            attendees.iter().filter(|a| a.ticket == TicketType::NoTicket).count();
        info!(
            total = attendees.len(),
            ticketless,
            "generated attendee population"
        );
        Ok(attendees)
    }

    fn generate_one(&mut self, config: &SimulationConfig) -> Attendee {
        let age = self.rng.gen_range(18..=40);
        let ticket = *TICKET_CHOICES
            .choose(&mut self.rng)
            .unwrap_or(&TicketType::NoTicket);
        let zone = if self.rng.gen_bool(0.5) { RestroomZone::East } else { RestroomZone::West };

        let mut attendee = Attendee::new(age, ticket, zone, Activity::all());
        attendee.has_free_pass = self.rng.gen_bool(config.free_pass_ratio);
        attendee
    }

    /// Derive a per-attendee RNG so agent threads never share one
    pub fn agent_rng(config: &SimulationConfig, index: u64) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index).wrapping_mul(0x9E37_79B9)),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_population_size() {
        let config = SimulationConfig { attendee_count: 50, seed: Some(1), ..Default::default() };
        let mut generator = AttendeeGenerator::new(&config);
        let attendees = generator.generate(&config).unwrap();
        assert_eq!(attendees.len(), 50);
    }

    #[test]
    fn test_population_starts_outside() {
        let config = SimulationConfig { attendee_count: 20, seed: Some(2), ..Default::default() };
        let mut generator = AttendeeGenerator::new(&config);
        let attendees = generator.generate(&config).unwrap();
        assert!(attendees.iter().all(|a| !a.is_inside && a.total_activities() == 0));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = SimulationConfig { attendee_count: 30, seed: Some(7), ..Default::default() };

        let run = |config: &SimulationConfig| {
            let mut generator = AttendeeGenerator::new(config);
            generator
                .generate(config)
                .unwrap()
                .into_iter()
                .map(|a| (a.age, a.ticket, a.restroom_zone, a.has_free_pass))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(&config), run(&config));
    }

    #[test]
    fn test_free_pass_ratio_extremes() {
        let config = SimulationConfig {
            attendee_count: 25,
            free_pass_ratio: 0.0,
            seed: Some(3),
            ..Default::default()
        };
        let attendees = AttendeeGenerator::new(&config).generate(&config).unwrap();
        assert!(attendees.iter().all(|a| !a.has_free_pass));

        let config = SimulationConfig { free_pass_ratio: 1.0, ..config };
        let attendees = AttendeeGenerator::new(&config).generate(&config).unwrap();
        assert!(attendees.iter().all(|a| a.has_free_pass));
    }

    #[test]
    fn test_ages_within_range() {
        let config = SimulationConfig { attendee_count: 100, seed: Some(4), ..Default::default() };
        let attendees = AttendeeGenerator::new(&config).generate(&config).unwrap();
        assert!(attendees.iter().all(|a| (18..=40).contains(&a.age)));
    }

    #[test]
    fn test_agent_rngs_differ_per_index() {
        let config = SimulationConfig { seed: Some(5), ..Default::default() };
        let mut rng_a = AttendeeGenerator::agent_rng(&config, 0);
        let mut rng_b = AttendeeGenerator::agent_rng(&config, 1);
        let a: u64 = rng_a.gen();
        let b: u64 = rng_b.gen();
        assert_ne!(a, b);
    }
}
