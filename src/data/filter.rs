use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value meaning "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site filter
// ---------------------------------------------------------------------------

/// The site selector value: the `ALL` sentinel or one exact site identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Interpret a raw dropdown value.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(site) => record.launch_site == *site,
        }
    }

    /// Dropdown label.
    pub fn label(&self) -> &str {
        match self {
            SiteFilter::All => "All Sites",
            SiteFilter::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "{ALL_SITES}"),
            SiteFilter::Site(site) => write!(f, "{site}"),
        }
    }
}

/// Dropdown entries: the `ALL` sentinel, then every site in the data.
pub fn site_options(dataset: &LaunchDataset) -> Vec<SiteFilter> {
    std::iter::once(ALL_SITES)
        .chain(dataset.sites().iter().map(String::as_str))
        .map(SiteFilter::from_value)
        .collect()
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive `[lo, hi]` payload bounds in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    lo: f64,
    hi: f64,
}

impl PayloadRange {
    /// Build a range; swapped bounds are reordered. Returns `None` if either
    /// bound is NaN.
    pub fn new(a: f64, b: f64) -> Option<Self> {
        if a.is_nan() || b.is_nan() {
            return None;
        }
        Some(PayloadRange {
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    /// A range that admits every payload.
    pub fn unbounded() -> Self {
        PayloadRange {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, payload_mass: f64) -> bool {
        self.lo <= payload_mass && payload_mass <= self.hi
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

// ---------------------------------------------------------------------------
// Selection – the current values of every interactive control
// ---------------------------------------------------------------------------

/// Ephemeral snapshot of the controls, handed to every callback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub site: SiteFilter,
    pub payload_range: PayloadRange,
}
