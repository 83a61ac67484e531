//! Run orchestration
//!
//! [`FestivalSimulation`] owns the lifecycle of one run and nothing else:
//! generate the population, run the admission phase to its barrier, start
//! the services and the stage show, let the admitted crowd loose, and when
//! the show ends walk the shutdown sequence in order. Agents stop first,
//! then service pools drain and join, then everything is finalized into an
//! in-memory [`SimulationReport`]. Persistence is the caller's decision.

use crate::attendee::{run_agent, AgentContext, Attendee, AttendeeGenerator};
use crate::catalog::Catalog;
use crate::service::{Bathroom, EmergencyUnit, Entrance, OrderLedger, PoolOutcome, Vendor, WorkerPool};
use crate::simulation::{
    ShutdownToken, SimulationError, SimulationReport, SimulationResult, SimulationStatistics,
};
use crate::stage::StageScheduler;
use crate::types::SimulationConfig;
use crate::persistence::AttendeeRecord;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Orchestrates one complete festival run
#[derive(Debug)]
pub struct FestivalSimulation {
    config: SimulationConfig,
}

impl FestivalSimulation {
    /// Create a simulation from a validated configuration
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        if let Err(errors) = config.validate() {
            let joined =
                errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
            return Err(SimulationError::configuration_error(joined));
        }
        Ok(Self { config })
    }

    /// The configuration this run uses
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the festival to completion
    pub fn run(&self) -> SimulationResult<SimulationReport> {
        let started = Instant::now();
        let config = &self.config;
        info!(attendees = config.attendee_count, "festival run starting");

        let population = AttendeeGenerator::new(config).generate(config)?;

        // Phase 1: admission; joining the gate pool is the barrier
        let entrance = Entrance::new(config.entry_check_ms);
        let (population, _) = entrance.admit_all(population, config.security_count)?;
        let (admitted, rejected): (Vec<Attendee>, Vec<Attendee>) =
            population.into_iter().partition(|a| a.is_inside);

        // Phase 2: services up, show on, crowd loose
        let ledger = OrderLedger::new();
        let agent_stop = ShutdownToken::new();
        let service_stop = ShutdownToken::new();
        let poll = Duration::from_millis(config.worker_poll_ms);

        let bars: Vec<Arc<Vendor>> = (1..=config.bar_count)
            .map(|i| Arc::new(Vendor::new(format!("Bar {}", i), Catalog::bar(), ledger.clone())))
            .collect();
        let food_trucks: Vec<Arc<Vendor>> = (1..=config.food_truck_count)
            .map(|i| {
                Arc::new(Vendor::new(
                    format!("Food truck {}", i),
                    Catalog::food_truck(),
                    ledger.clone(),
                ))
            })
            .collect();
        let bathroom = Arc::new(Bathroom::new(config.bathroom_ms));
        let emergency = Arc::new(EmergencyUnit::new(config.treatment_ms));
        let stage = Arc::new(StageScheduler::new(&config.roster));

        let mut pools: Vec<WorkerPool> = Vec::new();
        for bar in &bars {
            pools.push(bar.spawn_pool(config.baristas_per_bar, service_stop.clone(), poll));
        }
        for truck in &food_trucks {
            pools.push(truck.spawn_pool(config.cooks_per_truck, service_stop.clone(), poll));
        }
        pools.extend(bathroom.spawn_pools(config.stalls_per_zone, service_stop.clone(), poll));
        pools.push(emergency.spawn_pool(config.doctor_count, service_stop.clone(), poll));

        let show = stage.start();
        let agents = self.spawn_agents(admitted, &bars, &food_trucks, &bathroom, &emergency, &stage, &agent_stop);
        info!(agents = agents.len(), pools = pools.len(), "crowd released");

        // Phase 3: the show ending gates shutdown
        let sets_performed = show.join()?;
        info!(sets_performed, "show over, stopping the crowd");
        agent_stop.shutdown();

        let mut finalized = rejected;
        for handle in agents {
            let attendee = handle
                .join()
                .map_err(|_| SimulationError::phase_fault("Agents", "agent thread panicked"))?;
            finalized.push(attendee);
        }

        // Agents are gone; pending requests drain before pools join
        service_stop.shutdown();
        let mut outcome = PoolOutcome::default();
        for pool in pools {
            let name = pool.name().to_string();
            let pool_outcome = pool.join()?;
            if pool_outcome.failed > 0 {
                warn!(pool = %name, failed = pool_outcome.failed, "pool reported failed items");
            }
            outcome.processed += pool_outcome.processed;
            outcome.failed += pool_outcome.failed;
        }

        let orders = ledger.snapshot();
        let statistics =
            SimulationStatistics::compute(&finalized, &orders, sets_performed, started.elapsed());
        info!(
            processed = outcome.processed,
            failed = outcome.failed,
            duration_ms = statistics.duration_ms,
            "festival run finished"
        );

        Ok(SimulationReport {
            statistics,
            attendees: finalized.iter().map(AttendeeRecord::from_attendee).collect(),
            orders,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_agents(
        &self,
        admitted: Vec<Attendee>,
        bars: &[Arc<Vendor>],
        food_trucks: &[Arc<Vendor>],
        bathroom: &Arc<Bathroom>,
        emergency: &Arc<EmergencyUnit>,
        stage: &Arc<StageScheduler>,
        agent_stop: &ShutdownToken,
    ) -> Vec<JoinHandle<Attendee>> {
        let config = &self.config;
        admitted
            .into_iter()
            .enumerate()
            .map(|(index, attendee)| {
                let ctx = AgentContext {
                    bar: Arc::clone(&bars[index % bars.len()]),
                    food: Arc::clone(&food_trucks[index % food_trucks.len()]),
                    bathroom: Arc::clone(bathroom),
                    emergency: Arc::clone(emergency),
                    stage: Arc::clone(stage),
                    stop: agent_stop.clone(),
                    think_ms: config.think_time_ms,
                    cooldown_ms: config.activity_cooldown_ms,
                    stage_watch_ms: config.stage_watch_ms,
                };
                let rng = AttendeeGenerator::agent_rng(config, index as u64);
                let (notify, notifications) = crossbeam_channel::unbounded();
                thread::spawn(move || run_agent(attendee, notifications, notify, &ctx, rng))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Genre, PerformerSpec, TicketType};

    fn quick_config() -> SimulationConfig {
        SimulationConfig {
            attendee_count: 12,
            security_count: 3,
            bar_count: 1,
            baristas_per_bar: 2,
            food_truck_count: 1,
            cooks_per_truck: 2,
            stalls_per_zone: 1,
            doctor_count: 1,
            entry_check_ms: (1, 2),
            think_time_ms: (1, 2),
            activity_cooldown_ms: (1, 2),
            bathroom_ms: (1, 2),
            treatment_ms: (1, 2),
            stage_watch_ms: (1, 2),
            worker_poll_ms: 2,
            seed: Some(11),
            roster: vec![
                PerformerSpec::new("A", Genre::Pop, 40),
                PerformerSpec::new("B", Genre::Rap, 40),
                PerformerSpec::new("C", Genre::Reggaeton, 40),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_configuration_is_rejected_up_front() {
        let config = SimulationConfig { attendee_count: 0, ..Default::default() };
        assert!(FestivalSimulation::new(config).is_err());
    }

    #[test]
    fn test_run_accounts_for_every_attendee() {
        let report = FestivalSimulation::new(quick_config()).unwrap().run().unwrap();
        assert_eq!(report.attendees.len(), 12);
        assert_eq!(report.statistics.admitted + report.statistics.rejected, 12);
    }

    #[test]
    fn test_run_leaves_nobody_inside() {
        let report = FestivalSimulation::new(quick_config()).unwrap().run().unwrap();
        assert!(report
            .attendees
            .iter()
            .all(|a| a.entered_at.is_none() || a.exited_at.is_some()));
    }

    #[test]
    fn test_rejected_attendees_never_act() {
        let report = FestivalSimulation::new(quick_config()).unwrap().run().unwrap();
        for record in report.attendees.iter().filter(|a| a.entered_at.is_none()) {
            assert_eq!(record.ticket_type, TicketType::NoTicket);
            let total = record.total_drinks
                + record.total_foods
                + record.total_treatments
                + record.total_bathroom_visits
                + record.total_stage_visits;
            assert_eq!(total, 0);
        }
    }

    #[test]
    fn test_show_plays_the_whole_roster() {
        let report = FestivalSimulation::new(quick_config()).unwrap().run().unwrap();
        assert_eq!(report.statistics.sets_performed, 3);
    }

    #[test]
    fn test_orders_drain_before_the_run_ends() {
        let report = FestivalSimulation::new(quick_config()).unwrap().run().unwrap();
        let issued: u32 = report
            .attendees
            .iter()
            .map(|a| a.total_drinks + a.total_foods)
            .sum();
        assert_eq!(report.orders.len() as u32, issued);
    }
}
