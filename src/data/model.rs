use std::collections::BTreeSet;
use std::fmt;

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. The discriminants match the dataset's `class`
/// column so summing outcomes counts successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure = 0,
    Success = 1,
}

impl Outcome {
    /// Parse a raw `class` cell. Accepts `0`/`1` and their float spellings.
    pub fn parse(raw: &str, row: usize) -> Result<Self, DatasetError> {
        match raw.trim() {
            "1" | "1.0" => Ok(Outcome::Success),
            "0" | "0.0" => Ok(Outcome::Failure),
            other => Err(DatasetError::InvalidOutcome {
                row,
                value: other.to_string(),
            }),
        }
    }

    pub fn from_f64(value: f64, row: usize) -> Result<Self, DatasetError> {
        if value == 1.0 {
            Ok(Outcome::Success)
        } else if value == 0.0 {
            Ok(Outcome::Failure)
        } else {
            Err(DatasetError::InvalidOutcome {
                row,
                value: value.to_string(),
            })
        }
    }

    pub fn as_u64(self) -> u64 {
        self as u64
    }

    pub fn as_f64(self) -> f64 {
        self as u8 as f64
    }

    /// Human-readable legend label.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }
}

/// Displays as the raw class value, the way the pie chart names its slices.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub outcome: Outcome,
    /// Payload mass in kilograms, always finite and non-negative.
    pub payload_mass: f64,
    /// Only used for colouring the scatter chart.
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Build a record, enforcing the row invariants.
    pub fn new(
        row: usize,
        launch_site: impl Into<String>,
        outcome: Outcome,
        payload_mass: f64,
        booster_version_category: impl Into<String>,
    ) -> Result<Self, DatasetError> {
        let launch_site = launch_site.into();
        if launch_site.trim().is_empty() {
            return Err(DatasetError::EmptySite { row });
        }
        if !payload_mass.is_finite() || payload_mass < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: payload_mass,
            });
        }
        Ok(LaunchRecord {
            launch_site,
            outcome,
            payload_mass,
            booster_version_category: booster_version_category.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices. Never mutated after
/// construction; the UI shares it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-seen order.
    sites: Vec<String>,
    /// Sorted distinct booster categories.
    booster_categories: BTreeSet<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.iter().any(|s| s == &rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
            payload_bounds = Some(match payload_bounds {
                None => (rec.payload_mass, rec.payload_mass),
                Some((lo, hi)) => (lo.min(rec.payload_mass), hi.max(rec.payload_mass)),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed (min, max) payload mass, `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, outcome: Outcome, payload: f64, booster: &str) -> LaunchRecord {
        LaunchRecord::new(0, site, outcome, payload, booster).unwrap()
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!(Outcome::parse("1", 0).unwrap(), Outcome::Success);
        assert_eq!(Outcome::parse(" 0.0 ", 0).unwrap(), Outcome::Failure);
        assert!(matches!(
            Outcome::parse("2", 7),
            Err(DatasetError::InvalidOutcome { row: 7, .. })
        ));
        assert!(Outcome::from_f64(0.5, 0).is_err());
    }

    #[test]
    fn test_outcome_display_is_class_value() {
        assert_eq!(Outcome::Success.to_string(), "1");
        assert_eq!(Outcome::Failure.to_string(), "0");
        assert_eq!(Outcome::Success.as_f64(), 1.0);
    }

    #[test]
    fn test_record_rejects_bad_rows() {
        assert!(matches!(
            LaunchRecord::new(3, "  ", Outcome::Success, 10.0, "FT"),
            Err(DatasetError::EmptySite { row: 3 })
        ));
        assert!(LaunchRecord::new(0, "A", Outcome::Success, -1.0, "FT").is_err());
        assert!(LaunchRecord::new(0, "A", Outcome::Success, f64::NAN, "FT").is_err());
        assert!(LaunchRecord::new(0, "A", Outcome::Success, 0.0, "FT").is_ok());
    }

    #[test]
    fn test_dataset_indices() {
        let ds = LaunchDataset::from_records(vec![
            rec("B", Outcome::Success, 3000.0, "v1.1"),
            rec("A", Outcome::Failure, 500.0, "FT"),
            rec("B", Outcome::Failure, 1500.0, "FT"),
        ]);

        assert_eq!(ds.sites(), ["B".to_string(), "A".to_string()]);
        assert_eq!(ds.booster_categories().len(), 2);
        assert_eq!(ds.payload_bounds(), Some((500.0, 3000.0)));
        assert!(ds.has_site("A"));
        assert!(!ds.has_site("C"));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
        assert!(ds.sites().is_empty());
    }
}
