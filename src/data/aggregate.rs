//! Launch record aggregation.
//!
//! Every function here is pure over an immutable [`LaunchDataset`]: calling
//! it twice with the same arguments yields the same sequence in the same
//! order.

use super::filter::{PayloadRange, SiteFilter};
use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::error::AggregateError;

/// One point of the payload/outcome scatter chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint<'a> {
    pub payload_mass: f64,
    pub outcome: Outcome,
    pub booster_version_category: &'a str,
}

/// Launch and success totals for one site (or every site).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteSummary {
    pub launches: u64,
    pub successes: u64,
}

impl SiteSummary {
    /// Success ratio in `[0, 1]`, `None` when there were no launches.
    pub fn success_rate(&self) -> Option<f64> {
        (self.launches > 0).then(|| self.successes as f64 / self.launches as f64)
    }
}

/// Successful launches per site, one entry per distinct site in first-seen
/// order. Sites without a single success are kept with a zero count.
pub fn success_counts_by_site(dataset: &LaunchDataset) -> Vec<(String, u64)> {
    dataset
        .sites()
        .iter()
        .map(|site| {
            let successes = dataset
                .records()
                .iter()
                .filter(|r| r.launch_site == *site)
                .map(|r| r.outcome.as_u64())
                .sum();
            (site.clone(), successes)
        })
        .collect()
}

/// Count of each outcome at one site, largest count first (ties put
/// `Success` first). Outcomes that never occurred are omitted, so there are
/// at most two entries.
pub fn outcome_counts_for_site(
    dataset: &LaunchDataset,
    site: &str,
) -> Result<Vec<(Outcome, u64)>, AggregateError> {
    if !dataset.has_site(site) {
        return Err(AggregateError::InvalidSite(site.to_string()));
    }

    let summary = site_summary(dataset, &SiteFilter::Site(site.to_string()));
    let mut counts: Vec<(Outcome, u64)> = [
        (Outcome::Success, summary.successes),
        (Outcome::Failure, summary.launches - summary.successes),
    ]
    .into_iter()
    .filter(|&(_, n)| n > 0)
    .collect();

    // Stable sort keeps Success ahead on ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

/// Records matching the site filter whose payload lies inside `range`, in
/// dataset order. Both the scatter chart and the records table read this.
pub fn matching_records<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteFilter,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |r| site.matches(r) && range.contains(r.payload_mass))
}

/// [`matching_records`] projected to scatter points. Lazy and
/// order-preserving.
///
/// A specific site restricts the output to that site; a site absent from the
/// data therefore yields nothing.
pub fn scatter_selection<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteFilter,
    range: PayloadRange,
) -> impl Iterator<Item = ScatterPoint<'a>> + 'a {
    matching_records(dataset, site, range).map(|r| ScatterPoint {
        payload_mass: r.payload_mass,
        outcome: r.outcome,
        booster_version_category: &r.booster_version_category,
    })
}

pub fn site_summary(dataset: &LaunchDataset, site: &SiteFilter) -> SiteSummary {
    dataset
        .records()
        .iter()
        .filter(|r| site.matches(r))
        .fold(SiteSummary::default(), |mut acc, r| {
            acc.launches += 1;
            acc.successes += r.outcome.as_u64();
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(site: &str, outcome: Outcome, payload: f64, booster: &str) -> LaunchRecord {
        LaunchRecord::new(0, site, outcome, payload, booster).unwrap()
    }

    fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("A", Outcome::Success, 500.0, "v1.0"),
            rec("A", Outcome::Failure, 1500.0, "v1.1"),
            rec("B", Outcome::Success, 3000.0, "FT"),
        ])
    }

    fn larger() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", Outcome::Failure, 0.0, "v1.0"),
            rec("CCAFS LC-40", Outcome::Failure, 525.0, "v1.0"),
            rec("VAFB SLC-4E", Outcome::Failure, 500.0, "v1.1"),
            rec("KSC LC-39A", Outcome::Success, 5300.0, "FT"),
            rec("CCAFS LC-40", Outcome::Success, 2216.0, "FT"),
            rec("KSC LC-39A", Outcome::Success, 9600.0, "B4"),
            rec("VAFB SLC-4E", Outcome::Success, 9600.0, "FT"),
            rec("CCAFS SLC-40", Outcome::Failure, 3600.0, "B5"),
            rec("KSC LC-39A", Outcome::Failure, 6800.0, "B4"),
        ])
    }

    #[test]
    fn test_success_counts_by_site_scenario() {
        let counts = success_counts_by_site(&scenario());
        assert_eq!(counts, vec![("A".to_string(), 1), ("B".to_string(), 1)]);
    }

    #[test]
    fn test_success_counts_keep_zero_sites() {
        let counts = success_counts_by_site(&larger());
        assert_eq!(counts.len(), 4);
        assert!(counts.contains(&("CCAFS SLC-40".to_string(), 0)));
    }

    #[test]
    fn test_success_totals_match_records() {
        for ds in [scenario(), larger()] {
            let total: u64 = success_counts_by_site(&ds).iter().map(|(_, n)| n).sum();
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.outcome == Outcome::Success)
                .count() as u64;
            assert_eq!(total, expected);
        }
    }

    #[test]
    fn test_outcome_counts_for_site_scenario() {
        let counts = outcome_counts_for_site(&scenario(), "A").unwrap();
        assert_eq!(counts, vec![(Outcome::Success, 1), (Outcome::Failure, 1)]);
    }

    #[test]
    fn test_outcome_counts_sorted_by_count() {
        let counts = outcome_counts_for_site(&larger(), "CCAFS LC-40").unwrap();
        assert_eq!(counts, vec![(Outcome::Failure, 2), (Outcome::Success, 1)]);

        let counts = outcome_counts_for_site(&larger(), "CCAFS SLC-40").unwrap();
        assert_eq!(counts, vec![(Outcome::Failure, 1)]);
    }

    #[test]
    fn test_outcome_counts_partition_site() {
        let ds = larger();
        for site in ds.sites() {
            let total: u64 = outcome_counts_for_site(&ds, site)
                .unwrap()
                .iter()
                .map(|(_, n)| n)
                .sum();
            let expected = ds.records().iter().filter(|r| &r.launch_site == site).count();
            assert_eq!(total, expected as u64, "site {site}");
        }
    }

    #[test]
    fn test_outcome_counts_unknown_site() {
        let err = outcome_counts_for_site(&scenario(), "Z").unwrap_err();
        assert_eq!(err, AggregateError::InvalidSite("Z".to_string()));
        assert_eq!(err.to_string(), "unknown launch site 'Z'");
    }

    #[test]
    fn test_scatter_single_point_range() {
        let ds = scenario();
        let range = PayloadRange::new(500.0, 500.0).unwrap();
        let points: Vec<_> = scatter_selection(&ds, &SiteFilter::All, range).collect();
        assert_eq!(
            points,
            vec![ScatterPoint {
                payload_mass: 500.0,
                outcome: Outcome::Success,
                booster_version_category: "v1.0",
            }]
        );
    }

    #[test]
    fn test_scatter_range_is_exact() {
        let ds = larger();
        let range = PayloadRange::new(500.0, 5300.0).unwrap();
        let points: Vec<_> = scatter_selection(&ds, &SiteFilter::All, range).collect();

        assert!(points.iter().all(|p| range.contains(p.payload_mass)));
        let expected: Vec<f64> = ds
            .records()
            .iter()
            .map(|r| r.payload_mass)
            .filter(|&m| (500.0..=5300.0).contains(&m))
            .collect();
        let got: Vec<f64> = points.iter().map(|p| p.payload_mass).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_scatter_filters_by_site() {
        let ds = larger();
        let site = SiteFilter::Site("KSC LC-39A".to_string());
        let points: Vec<_> = scatter_selection(&ds, &site, PayloadRange::unbounded()).collect();
        let payloads: Vec<f64> = points.iter().map(|p| p.payload_mass).collect();
        assert_eq!(payloads, vec![5300.0, 9600.0, 6800.0]);

        let unknown = SiteFilter::Site("nowhere".to_string());
        assert_eq!(
            scatter_selection(&ds, &unknown, PayloadRange::unbounded()).count(),
            0
        );
    }

    #[test]
    fn test_aggregations_are_repeatable() {
        let ds = larger();
        assert_eq!(success_counts_by_site(&ds), success_counts_by_site(&ds));
        assert_eq!(
            outcome_counts_for_site(&ds, "KSC LC-39A"),
            outcome_counts_for_site(&ds, "KSC LC-39A")
        );
        let range = PayloadRange::new(0.0, 6000.0).unwrap();
        let first: Vec<_> = scatter_selection(&ds, &SiteFilter::All, range).collect();
        let second: Vec<_> = scatter_selection(&ds, &SiteFilter::All, range).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_site_summary() {
        let ds = larger();
        let all = site_summary(&ds, &SiteFilter::All);
        assert_eq!(all, SiteSummary { launches: 9, successes: 4 });

        let ksc = site_summary(&ds, &SiteFilter::Site("KSC LC-39A".into()));
        assert_eq!(ksc.success_rate(), Some(2.0 / 3.0));
        assert_eq!(SiteSummary::default().success_rate(), None);
    }

    const SITE_NAMES: [&str; 4] = ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E", "nowhere"];
    const BOOSTERS: [&str; 3] = ["v1.1", "FT", "B5"];

    /// Up to 40 launches over the first three site names; payloads are whole
    /// kilograms so generated bounds regularly land exactly on a record.
    fn arb_dataset() -> impl Strategy<Value = LaunchDataset> {
        prop::collection::vec(
            (0usize..3, any::<bool>(), 0u32..12_000, 0usize..BOOSTERS.len()),
            0..40,
        )
        .prop_map(|rows| {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(i, (site, ok, payload, booster))| {
                    let outcome = if ok { Outcome::Success } else { Outcome::Failure };
                    LaunchRecord::new(i, SITE_NAMES[site], outcome, payload as f64, BOOSTERS[booster])
                        .unwrap()
                })
                .collect();
            LaunchDataset::from_records(records)
        })
    }

    fn arb_range() -> impl Strategy<Value = PayloadRange> {
        (-1_000i32..15_000, -1_000i32..15_000)
            .prop_map(|(a, b)| PayloadRange::new(a as f64, b as f64).unwrap())
    }

    fn arb_site() -> impl Strategy<Value = SiteFilter> {
        prop_oneof![
            Just(SiteFilter::All),
            (0usize..SITE_NAMES.len()).prop_map(|i| SiteFilter::Site(SITE_NAMES[i].to_string())),
        ]
    }

    proptest! {
        #[test]
        fn test_success_totals_for_any_dataset(ds in arb_dataset()) {
            let total: u64 = success_counts_by_site(&ds).iter().map(|(_, n)| n).sum();
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.outcome == Outcome::Success)
                .count() as u64;
            prop_assert_eq!(total, expected);
            prop_assert_eq!(success_counts_by_site(&ds).len(), ds.sites().len());
        }

        #[test]
        fn test_outcome_counts_partition_any_dataset(ds in arb_dataset()) {
            for site in ds.sites() {
                let counts = outcome_counts_for_site(&ds, site).unwrap();
                prop_assert!(!counts.is_empty() && counts.len() <= 2);
                let total: u64 = counts.iter().map(|(_, n)| n).sum();
                let expected = ds.records().iter().filter(|r| &r.launch_site == site).count();
                prop_assert_eq!(total, expected as u64);
            }
            prop_assert!(outcome_counts_for_site(&ds, "nowhere").is_err());
        }

        #[test]
        fn test_scatter_matches_filter_exactly(
            ds in arb_dataset(),
            site in arb_site(),
            range in arb_range(),
        ) {
            let got: Vec<ScatterPoint<'_>> = scatter_selection(&ds, &site, range).collect();
            let expected: Vec<ScatterPoint<'_>> = ds
                .records()
                .iter()
                .filter(|r| match &site {
                    SiteFilter::All => true,
                    SiteFilter::Site(s) => r.launch_site == *s,
                })
                .filter(|r| range.lo() <= r.payload_mass && r.payload_mass <= range.hi())
                .map(|r| ScatterPoint {
                    payload_mass: r.payload_mass,
                    outcome: r.outcome,
                    booster_version_category: &r.booster_version_category,
                })
                .collect();
            prop_assert_eq!(&got, &expected);
            prop_assert_eq!(matching_records(&ds, &site, range).count(), got.len());
        }

        #[test]
        fn test_operations_repeatable_for_any_input(
            ds in arb_dataset(),
            site in arb_site(),
            range in arb_range(),
        ) {
            prop_assert_eq!(success_counts_by_site(&ds), success_counts_by_site(&ds));
            if let SiteFilter::Site(s) = &site {
                prop_assert_eq!(outcome_counts_for_site(&ds, s), outcome_counts_for_site(&ds, s));
            }
            let first: Vec<_> = scatter_selection(&ds, &site, range).collect();
            let second: Vec<_> = scatter_selection(&ds, &site, range).collect();
            prop_assert_eq!(first, second);
        }
    }
}
