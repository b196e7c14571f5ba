//! Personality traits that bias behavior decisions
//!
//! Traits are fixed at spawn (optionally randomized) and queried as pure
//! predicates by the engine's situational cascade and trigger entry points.

use serde::{Deserialize, Serialize};

/// Personality profile for one agent, all values 0.0 to 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitProfile {
    /// Willingness to stand ground; scales the fear threshold
    pub bravery: f32,
    /// Urge to check out unusual happenings
    pub curiosity: f32,
    /// Willingness to report crime to the authorities
    pub civic_duty: f32,
    /// Preference for company over solitude
    pub sociability: f32,
}

impl Default for TraitProfile {
    fn default() -> Self {
        Self {
            bravery: 0.5,
            curiosity: 0.5,
            civic_duty: 0.5,
            sociability: 0.5,
        }
    }
}

impl TraitProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Randomize traits within reasonable bounds
    pub fn randomize(&mut self, rng: &mut impl rand::Rng) {
        self.bravery = rng.gen_range(0.2..0.8);
        self.curiosity = rng.gen_range(0.2..0.8);
        self.civic_duty = rng.gen_range(0.2..0.8);
        self.sociability = rng.gen_range(0.2..0.8);
    }

    pub fn would_investigate(&self) -> bool {
        self.curiosity > 0.6
    }

    /// Whether a crime of the given severity (0-10) gets reported
    ///
    /// Dutiful agents report petty crime; even careless ones report the
    /// worst offenses.
    pub fn would_report(&self, severity: u8) -> bool {
        self.civic_duty + f32::from(severity) / 10.0 > 1.0
    }

    /// Fear threshold on the 0-100 scale used by threat triggers; braver
    /// agents tolerate more before running
    pub fn fear_threshold(&self) -> f32 {
        self.bravery * 100.0
    }

    pub fn courage(&self) -> f32 {
        self.bravery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_would_report_scales_with_severity() {
        let traits = TraitProfile {
            civic_duty: 0.4,
            ..TraitProfile::default()
        };
        assert!(!traits.would_report(5));
        assert!(traits.would_report(7));
    }

    #[test]
    fn test_dutiful_agent_reports_petty_crime() {
        let traits = TraitProfile {
            civic_duty: 0.9,
            ..TraitProfile::default()
        };
        assert!(traits.would_report(2));
    }

    #[test]
    fn test_fear_threshold_from_bravery() {
        let traits = TraitProfile {
            bravery: 0.5,
            ..TraitProfile::default()
        };
        assert!((traits.fear_threshold() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_randomize_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut traits = TraitProfile::default();
        traits.randomize(&mut rng);
        for value in [
            traits.bravery,
            traits.curiosity,
            traits.civic_duty,
            traits.sociability,
        ] {
            assert!((0.2..0.8).contains(&value));
        }
    }
}
