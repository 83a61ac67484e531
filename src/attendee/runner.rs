//! Attendee activity loop
//!
//! Each admitted attendee runs [`run_agent`] on its own thread: a repeated
//! cycle of notification draining, a leave decision, one activity attempt
//! and a cooldown, until the attendee departs. The loop exclusively owns its
//! [`Attendee`] value; services only ever see the attendee's id plus a
//! notification sender, so counter increments always happen here, at the
//! moment the request is issued.
//!
//! A forced stop (the show ending) takes precedence over everything and
//! never re-fires the leave decision: the attendee simply departs.

use crate::attendee::{Attendee, LeavePolicy, NeedPolicy};
use crate::service::{Bathroom, EmergencyUnit, Vendor};
use crate::simulation::ShutdownToken;
use crate::stage::StageScheduler;
use crate::types::{Activity, MsRange};
use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// A service's asynchronous reply to an attendee
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A placed order finished preparing
    OrderReady {
        /// Item name
        item: String,
        /// Amount charged; zero for free-pass holders
        charge: f64,
    },
    /// A reported first-aid case finished treatment
    Treated,
}

/// Everything an agent thread needs to reach the festival services
#[derive(Debug, Clone)]
pub struct AgentContext {
    /// The bar this attendee orders drinks from
    pub bar: Arc<Vendor>,
    /// The food truck this attendee orders food from
    pub food: Arc<Vendor>,
    /// The shared restroom facility
    pub bathroom: Arc<Bathroom>,
    /// The shared first-aid unit
    pub emergency: Arc<EmergencyUnit>,
    /// The shared stage scheduler
    pub stage: Arc<StageScheduler>,
    /// Forced-stop signal, flipped when the show ends
    pub stop: ShutdownToken,
    /// Pause before each activity attempt
    pub think_ms: MsRange,
    /// Pause after each activity attempt
    pub cooldown_ms: MsRange,
    /// How long a stage visit watches
    pub stage_watch_ms: MsRange,
}

/// Run one attendee's activity loop to departure; returns the final state
pub fn run_agent(
    mut attendee: Attendee,
    notifications: Receiver<Notification>,
    notify: Sender<Notification>,
    ctx: &AgentContext,
    mut rng: StdRng,
) -> Attendee {
    let leave_policy = LeavePolicy::default();

    while attendee.is_inside {
        drain_notifications(&attendee, &notifications);

        // Show over: depart without consulting the leave policy
        if ctx.stop.is_shutdown() {
            debug!(attendee = %attendee.id, "forced stop, departing");
            attendee.mark_departed();
            break;
        }

        let leave = leave_policy.probability(
            attendee.time_inside().as_secs_f64(),
            attendee.total_treatments,
            attendee.total_drinks,
        );
        if rng.gen_bool(leave) {
            debug!(attendee = %attendee.id, probability = leave, "decided to leave");
            attendee.mark_departed();
            break;
        }

        sleep_range(&mut rng, ctx.think_ms);

        if !attendee.mid_activity {
            attendee.mid_activity = true;
            attempt_activity(&mut attendee, &notify, ctx, &mut rng);
            sleep_range(&mut rng, ctx.cooldown_ms);
            attendee.mid_activity = false;
        }
    }

    drain_notifications(&attendee, &notifications);
    attendee
}

fn attempt_activity(
    attendee: &mut Attendee,
    notify: &Sender<Notification>,
    ctx: &AgentContext,
    rng: &mut StdRng,
) {
    let activity = match attendee.allowed_activities.choose(rng) {
        Some(activity) => *activity,
        None => return,
    };

    match activity {
        Activity::Drinks => order_from(attendee, &ctx.bar, notify, rng, Activity::Drinks),
        Activity::Food => order_from(attendee, &ctx.food, notify, rng, Activity::Food),
        Activity::Music => watch_stage(attendee, ctx, rng),
        Activity::Bathroom => {
            let need = NeedPolicy::bathroom()
                .probability(attendee.total_drinks, attendee.total_bathroom_visits);
            if rng.gen_bool(need) {
                match ctx.bathroom.request_use(attendee.restroom_zone, attendee.id) {
                    Ok(()) => attendee.total_bathroom_visits += 1,
                    Err(error) => warn!(attendee = %attendee.id, %error, "restroom request failed"),
                }
            }
        }
        Activity::Emergency => {
            let need = NeedPolicy::emergency()
                .probability(attendee.total_drinks, attendee.total_treatments);
            if rng.gen_bool(need) {
                match ctx.emergency.report_case(attendee.id, notify.clone()) {
                    Ok(()) => attendee.total_treatments += 1,
                    Err(error) => warn!(attendee = %attendee.id, %error, "first-aid report failed"),
                }
            }
        }
    }
}

fn order_from(
    attendee: &mut Attendee,
    vendor: &Vendor,
    notify: &Sender<Notification>,
    rng: &mut StdRng,
    activity: Activity,
) {
    let item = match vendor.catalog().random_item(rng) {
        Some(item) => item.clone(),
        None => return,
    };
    match vendor.place_order(attendee.id, item, attendee.has_free_pass, notify.clone()) {
        Ok(()) => match activity {
            Activity::Drinks => attendee.total_drinks += 1,
            _ => attendee.total_foods += 1,
        },
        Err(error) => warn!(attendee = %attendee.id, vendor = vendor.name(), %error, "order failed"),
    }
}

fn watch_stage(attendee: &mut Attendee, ctx: &AgentContext, rng: &mut StdRng) {
    let slot = rng.gen_range(0..ctx.stage.slot_count());
    if let Some(performer) = ctx.stage.current_performer(slot) {
        attendee.total_stage_visits += 1;
        debug!(attendee = %attendee.id, performer = %performer.name, "watching a set");
        sleep_range(rng, ctx.stage_watch_ms);
    }
}

fn drain_notifications(attendee: &Attendee, notifications: &Receiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        match notification {
            Notification::OrderReady { item, charge } => {
                debug!(attendee = %attendee.id, item, charge, "order picked up");
            }
            Notification::Treated => {
                debug!(attendee = %attendee.id, "treatment received");
            }
        }
    }
}

fn sleep_range(rng: &mut StdRng, range: MsRange) {
    let millis = rng.gen_range(range.0..=range.1);
    thread::sleep(Duration::from_millis(millis));
}
