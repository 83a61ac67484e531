//! Probabilistic decision policies
//!
//! Each policy is a clamped linear form over the attendee's own counters:
//! a base rate, weights that raise the probability with "risk" counters and
//! weights that lower it with "mitigation" counters. The constants are
//! deliberately retunable; what the rest of the system relies on is the
//! shape - monotone in each input and always a valid probability.

/// Policy for the decision to leave the festival
///
/// Probability rises with time spent inside, with drinks consumed and with
/// treatments received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeavePolicy {
    /// Base leave probability per evaluation
    pub base: f64,
    /// Added per first-aid treatment
    pub per_treatment: f64,
    /// Added per drink ordered
    pub per_drink: f64,
    /// Added per second spent inside
    pub per_second: f64,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self { base: 0.0001, per_treatment: 0.005, per_drink: 0.002, per_second: 0.001 }
    }
}

impl LeavePolicy {
    /// Evaluate the leave probability, clamped to `[0, 1]`
    pub fn probability(&self, seconds_inside: f64, treatments: u32, drinks: u32) -> f64 {
        let p = self.base
            + self.per_treatment * f64::from(treatments)
            + self.per_drink * f64::from(drinks)
            + self.per_second * seconds_inside;
        p.clamp(0.0, 1.0)
    }
}

/// Policy for a need-driven activity (restroom, first aid)
///
/// Probability rises with the risk counter and falls with the mitigation
/// counter: restroom demand rises with drinks and falls with prior visits,
/// emergency demand rises with drinks and falls with prior treatments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedPolicy {
    /// Base probability
    pub base: f64,
    /// Added per unit of the risk counter
    pub per_risk: f64,
    /// Subtracted per unit of the mitigation counter
    pub per_mitigation: f64,
}

impl NeedPolicy {
    /// The restroom demand policy
    pub fn bathroom() -> Self {
        Self { base: 0.1, per_risk: 0.1, per_mitigation: 0.05 }
    }

    /// The first-aid demand policy
    pub fn emergency() -> Self {
        Self { base: 0.001, per_risk: 0.05, per_mitigation: 0.05 }
    }

    /// Evaluate the need probability, clamped to `[0, 1]`
    pub fn probability(&self, risk: u32, mitigation: u32) -> f64 {
        let p = self.base + self.per_risk * f64::from(risk)
            - self.per_mitigation * f64::from(mitigation);
        p.clamp(0.0, 1.0)
    }
}
