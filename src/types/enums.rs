//! Enumeration types for the festival simulator
//!
//! This module contains all enumeration types used throughout the simulation:
//! ticket classes, stage genres, attendee activities, order statuses, and the
//! restroom zone partition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Admission ticket classes
///
/// Assigned once at population generation and immutable afterwards. Only
/// `NoTicket` causes the entrance gate to reject an attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    /// Full-access pass for the whole event
    FullAccess,
    /// Multi-day pass
    ThreeDayPass,
    /// Single-day pass
    OneDayPass,
    /// No valid ticket - rejected at the gate
    NoTicket,
}

impl TicketType {
    /// Whether this ticket class grants admission
    pub fn grants_entry(&self) -> bool {
        !matches!(self, TicketType::NoTicket)
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketType::FullAccess => write!(f, "Full Access"),
            TicketType::ThreeDayPass => write!(f, "3-Day Pass"),
            TicketType::OneDayPass => write!(f, "1-Day Pass"),
            TicketType::NoTicket => write!(f, "No Ticket"),
        }
    }
}

impl FromStr for TicketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full access" | "fullaccess" | "vip" => Ok(TicketType::FullAccess),
            "3-day pass" | "3day" | "threedaypass" => Ok(TicketType::ThreeDayPass),
            "1-day pass" | "1day" | "onedaypass" => Ok(TicketType::OneDayPass),
            "no ticket" | "noticket" | "none" => Ok(TicketType::NoTicket),
            _ => Err(format!("Unknown ticket type: {}", s)),
        }
    }
}

/// Stage genres
///
/// Each genre maps to exactly one performance slot on the stage scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Pop stage
    Pop,
    /// Rap stage
    Rap,
    /// Reggaeton stage
    Reggaeton,
}

impl Genre {
    /// All genres in slot order
    pub fn all() -> [Genre; 3] {
        [Genre::Pop, Genre::Rap, Genre::Reggaeton]
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::Pop => write!(f, "Pop"),
            Genre::Rap => write!(f, "Rap"),
            Genre::Reggaeton => write!(f, "Reggaeton"),
        }
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pop" => Ok(Genre::Pop),
            "rap" => Ok(Genre::Rap),
            "reggaeton" => Ok(Genre::Reggaeton),
            _ => Err(format!("Unknown genre: {}", s)),
        }
    }
}

/// Activities an attendee may attempt while inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    /// Order a drink at a bar
    Drinks,
    /// Order food at a food truck
    Food,
    /// Watch a stage performance
    Music,
    /// Visit a restroom
    Bathroom,
    /// Seek treatment at the first-aid unit
    Emergency,
}

impl Activity {
    /// The full activity set given to generated attendees
    pub fn all() -> Vec<Activity> {
        vec![
            Activity::Drinks,
            Activity::Food,
            Activity::Music,
            Activity::Bathroom,
            Activity::Emergency,
        ]
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Drinks => write!(f, "Drinks"),
            Activity::Food => write!(f, "Food"),
            Activity::Music => write!(f, "Music"),
            Activity::Bathroom => write!(f, "Bathroom"),
            Activity::Emergency => write!(f, "Emergency"),
        }
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drinks" | "drink" => Ok(Activity::Drinks),
            "food" => Ok(Activity::Food),
            "music" | "stage" => Ok(Activity::Music),
            "bathroom" => Ok(Activity::Bathroom),
            "emergency" => Ok(Activity::Emergency),
            _ => Err(format!("Unknown activity: {}", s)),
        }
    }
}

/// Lifecycle status of an order
///
/// Transitions are strictly `Waiting -> InProgress -> Completed`. `Failed`
/// is a terminal state a worker applies when fulfilment errors, so a bad
/// item is marked rather than silently lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Enqueued, not yet picked up by a worker
    Waiting,
    /// Picked up by exactly one worker
    InProgress,
    /// Fulfilled and charged
    Completed,
    /// Fulfilment failed; terminal
    Failed,
}

impl OrderStatus {
    /// Whether the given transition is allowed
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Waiting, OrderStatus::InProgress)
                | (OrderStatus::InProgress, OrderStatus::Completed)
                | (OrderStatus::InProgress, OrderStatus::Failed)
        )
    }

    /// Whether this status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Waiting => write!(f, "waiting"),
            OrderStatus::InProgress => write!(f, "in progress"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waiting" => Ok(OrderStatus::Waiting),
            "in progress" | "inprogress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "failed" => Ok(OrderStatus::Failed),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// Restroom partition attribute
///
/// Each zone has its own queue, its own stall pool and its own lock; there
/// is no cross-zone contention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestroomZone {
    /// East side facilities
    East,
    /// West side facilities
    West,
}

impl RestroomZone {
    /// Both zones
    pub fn all() -> [RestroomZone; 2] {
        [RestroomZone::East, RestroomZone::West]
    }

    /// The opposite zone
    pub fn other(&self) -> RestroomZone {
        match self {
            RestroomZone::East => RestroomZone::West,
            RestroomZone::West => RestroomZone::East,
        }
    }
}

impl fmt::Display for RestroomZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestroomZone::East => write!(f, "East"),
            RestroomZone::West => write!(f, "West"),
        }
    }
}

impl FromStr for RestroomZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "east" => Ok(RestroomZone::East),
            "west" => Ok(RestroomZone::West),
            _ => Err(format!("Unknown restroom zone: {}", s)),
        }
    }
}
