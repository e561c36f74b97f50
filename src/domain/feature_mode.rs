// ============================================================
// Layer 3 - Feature Mode
// ============================================================
// Selects which per-location features feed the pairwise tensor:
//
//   Full    → demographics columns followed by POI columns
//             F = D_d + D_p
//   Reduced → only the first demographics column (total population)
//             F = 1
//
// The mode is passed explicitly into the feature builder on every
// call, so there is never a question of when it takes effect.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    #[default]
    Full,
    Reduced,
}

impl FeatureMode {
    /// Per-location feature width F for the given column counts
    pub fn width(self, demographic_cols: usize, poi_cols: usize) -> usize {
        match self {
            FeatureMode::Full    => demographic_cols + poi_cols,
            FeatureMode::Reduced => 1,
        }
    }

    /// Width of one pair feature vector: origin F + destination F + distance
    pub fn pair_width(self, demographic_cols: usize, poi_cols: usize) -> usize {
        2 * self.width(demographic_cols, poi_cols) + 1
    }
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureMode::Full    => write!(f, "full"),
            FeatureMode::Reduced => write!(f, "reduced"),
        }
    }
}

impl FromStr for FeatureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full"    => Ok(FeatureMode::Full),
            "reduced" => Ok(FeatureMode::Reduced),
            other => Err(format!("unknown feature mode '{other}' (expected full|reduced)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(FeatureMode::default(), FeatureMode::Full);
    }

    #[test]
    fn test_widths() {
        assert_eq!(FeatureMode::Full.width(3, 4), 7);
        assert_eq!(FeatureMode::Full.pair_width(3, 4), 15);
        assert_eq!(FeatureMode::Reduced.width(3, 4), 1);
        assert_eq!(FeatureMode::Reduced.pair_width(3, 4), 3);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("FULL".parse::<FeatureMode>(), Ok(FeatureMode::Full));
        assert_eq!("Reduced".parse::<FeatureMode>(), Ok(FeatureMode::Reduced));
        assert!("sparse".parse::<FeatureMode>().is_err());
        assert_eq!(FeatureMode::Reduced.to_string(), "reduced");
    }

    #[test]
    fn test_only_listed_names_parse() {
        let err = "toy".parse::<FeatureMode>().unwrap_err();
        assert!(err.contains("expected full|reduced"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FeatureMode::Reduced).unwrap();
        assert_eq!(json, "\"reduced\"");
        let back: FeatureMode = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(back, FeatureMode::Full);
    }
}
