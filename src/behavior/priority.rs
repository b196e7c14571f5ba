//! Priority ranks for behavior actions
//!
//! Higher numeric value = higher priority. The gaps between ranks leave room
//! for callers that derive a rank from a score via [`PriorityLevel::from_value`].

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Ordered priority rank for an action
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[repr(u16)]
pub enum PriorityLevel {
    #[display(fmt = "LOWEST")]
    Lowest = 0,
    #[display(fmt = "LOW")]
    Low = 100,
    #[display(fmt = "NORMAL")]
    Normal = 200,
    #[display(fmt = "HIGH")]
    High = 300,
    #[display(fmt = "CRITICAL")]
    Critical = 400,
    #[display(fmt = "OVERRIDE")]
    Override = 500,
}

impl PriorityLevel {
    /// All levels in ascending rank order
    pub const ALL: [PriorityLevel; 6] = [
        PriorityLevel::Lowest,
        PriorityLevel::Low,
        PriorityLevel::Normal,
        PriorityLevel::High,
        PriorityLevel::Critical,
        PriorityLevel::Override,
    ];

    pub fn value(&self) -> u16 {
        *self as u16
    }

    pub fn is_higher_than(&self, other: PriorityLevel) -> bool {
        self.value() > other.value()
    }

    pub fn is_at_least(&self, other: PriorityLevel) -> bool {
        self.value() >= other.value()
    }

    pub fn max(a: PriorityLevel, b: PriorityLevel) -> PriorityLevel {
        if a.is_at_least(b) {
            a
        } else {
            b
        }
    }

    /// Lowest-ranked level whose value is >= `n`, defaulting to Override
    pub fn from_value(n: u16) -> PriorityLevel {
        Self::ALL
            .into_iter()
            .find(|level| level.value() >= n)
            .unwrap_or(PriorityLevel::Override)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        for pair in PriorityLevel::ALL.windows(2) {
            assert!(pair[1].is_higher_than(pair[0]));
            assert!(!pair[0].is_higher_than(pair[1]));
        }
    }

    #[test]
    fn test_is_at_least_reflexive() {
        for level in PriorityLevel::ALL {
            assert!(level.is_at_least(level));
            assert!(!level.is_higher_than(level));
        }
    }

    #[test]
    fn test_max() {
        assert_eq!(
            PriorityLevel::max(PriorityLevel::Low, PriorityLevel::Critical),
            PriorityLevel::Critical
        );
        assert_eq!(
            PriorityLevel::max(PriorityLevel::High, PriorityLevel::High),
            PriorityLevel::High
        );
    }

    #[test]
    fn test_from_value_boundaries() {
        assert_eq!(PriorityLevel::from_value(0), PriorityLevel::Lowest);
        assert_eq!(PriorityLevel::from_value(1), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_value(100), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_value(250), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_value(500), PriorityLevel::Override);
        assert_eq!(PriorityLevel::from_value(501), PriorityLevel::Override);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(PriorityLevel::Lowest.to_string(), "LOWEST");
        assert_eq!(PriorityLevel::Override.to_string(), "OVERRIDE");
    }
}
