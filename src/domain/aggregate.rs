//! Cross-package aggregation of dependency analyses
//!
//! Provides structures for combining per-package results into one summary
//! for a preset or a watch list. Individual results may be missing when the
//! lookup for that package failed.

use super::DependencyAnalysis;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// De-duplicated, summed view over a batch of packages
///
/// Built only from set unions and sums, so the result does not depend on
/// the order in which packages are supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetAggregate {
    /// Distinct runtime dependency names across all resolved packages
    pub unique_dependency_names: BTreeSet<String>,
    /// Distinct peer dependency names across all resolved packages
    pub unique_peer_dependency_names: BTreeSet<String>,
    /// Sum of minified bundle sizes in bytes
    pub total_bundle_bytes: u64,
    /// Sum of gzipped bundle sizes in bytes
    pub total_gzip_bytes: u64,
    /// Number of packages requested
    pub package_count: usize,
    /// Number of packages with an analysis
    pub resolved_count: usize,
    /// Number of analysed packages that reported a bundle size
    pub sized_count: usize,
}

impl PresetAggregate {
    /// Creates an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one requested package into the aggregate
    ///
    /// A missing analysis still counts toward `package_count`.
    pub fn absorb(&mut self, analysis: Option<&DependencyAnalysis>) {
        self.package_count += 1;

        let Some(analysis) = analysis else {
            return;
        };
        self.resolved_count += 1;

        self.unique_dependency_names
            .extend(analysis.dependencies.keys().cloned());
        self.unique_peer_dependency_names
            .extend(analysis.peer_dependencies.keys().cloned());

        if let Some(bundle) = analysis.bundle_size {
            self.sized_count += 1;
            self.total_bundle_bytes = self.total_bundle_bytes.saturating_add(bundle.size);
            self.total_gzip_bytes = self.total_gzip_bytes.saturating_add(bundle.gzip);
        }
    }

    /// Combines two partial aggregates
    pub fn merge(mut self, other: PresetAggregate) -> Self {
        self.unique_dependency_names
            .extend(other.unique_dependency_names);
        self.unique_peer_dependency_names
            .extend(other.unique_peer_dependency_names);
        self.total_bundle_bytes = self
            .total_bundle_bytes
            .saturating_add(other.total_bundle_bytes);
        self.total_gzip_bytes = self.total_gzip_bytes.saturating_add(other.total_gzip_bytes);
        self.package_count += other.package_count;
        self.resolved_count += other.resolved_count;
        self.sized_count += other.sized_count;
        self
    }

    /// Number of distinct runtime dependencies
    pub fn dependency_count(&self) -> usize {
        self.unique_dependency_names.len()
    }

    /// Number of distinct peer dependencies
    pub fn peer_dependency_count(&self) -> usize {
        self.unique_peer_dependency_names.len()
    }

    /// Number of requested packages without an analysis
    pub fn missing_count(&self) -> usize {
        self.package_count - self.resolved_count
    }

    /// Whether some resolved packages are left out of the size totals
    pub fn has_unsized(&self) -> bool {
        self.sized_count < self.resolved_count
    }
}

/// Aggregate a batch of `(package name, analysis)` pairs
///
/// Never fails: packages whose analysis is absent only lower the totals.
pub fn aggregate<'a, N, I>(records: I) -> PresetAggregate
where
    N: AsRef<str>,
    I: IntoIterator<Item = (N, Option<&'a DependencyAnalysis>)>,
{
    records
        .into_iter()
        .fold(PresetAggregate::new(), |mut acc, (_name, analysis)| {
            acc.absorb(analysis);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg_a() -> DependencyAnalysis {
        DependencyAnalysis::new()
            .with_dependency("x", "^1.0.0")
            .with_dependency("y", "^2.0.0")
            .with_bundle_size(1000, 400)
    }

    fn pkg_b() -> DependencyAnalysis {
        DependencyAnalysis::new()
            .with_dependency("y", "^2.1.0")
            .with_dependency("z", "~3.0.0")
            .with_bundle_size(2000, 800)
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_records_deduplicate_and_sum() {
        let a = pkg_a();
        let b = pkg_b();
        let result = aggregate([("pkgA", Some(&a)), ("pkgB", Some(&b))]);

        assert_eq!(result.unique_dependency_names, names(&["x", "y", "z"]));
        assert_eq!(result.dependency_count(), 3);
        assert_eq!(result.total_bundle_bytes, 3000);
        assert_eq!(result.total_gzip_bytes, 1200);
        assert_eq!(result.package_count, 2);
        assert_eq!(result.resolved_count, 2);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(Vec::<(String, Option<&DependencyAnalysis>)>::new());
        assert_eq!(result, PresetAggregate::default());
        assert_eq!(result.package_count, 0);
    }

    #[test]
    fn test_absent_record_counts_but_contributes_nothing() {
        let a = pkg_a();
        let alone = aggregate([("pkgA", Some(&a))]);
        let with_missing = aggregate([("pkgA", Some(&a)), ("broken", None)]);

        assert_eq!(with_missing.package_count, 2);
        assert_eq!(with_missing.resolved_count, 1);
        assert_eq!(with_missing.missing_count(), 1);
        assert_eq!(
            with_missing.unique_dependency_names,
            alone.unique_dependency_names
        );
        assert_eq!(with_missing.total_bundle_bytes, alone.total_bundle_bytes);
        assert_eq!(with_missing.total_gzip_bytes, alone.total_gzip_bytes);
    }

    #[test]
    fn test_all_absent() {
        let result = aggregate([("a", None), ("b", None), ("c", None)]);
        assert_eq!(result.package_count, 3);
        assert_eq!(result.resolved_count, 0);
        assert!(result.unique_dependency_names.is_empty());
        assert!(result.unique_peer_dependency_names.is_empty());
        assert_eq!(result.total_bundle_bytes, 0);
        assert_eq!(result.total_gzip_bytes, 0);
    }

    #[test]
    fn test_missing_bundle_size_adds_zero() {
        let no_size = DependencyAnalysis::new().with_dependency("x", "1");
        let a = pkg_a();
        let result = aggregate([("no-size", Some(&no_size)), ("pkgA", Some(&a))]);

        assert_eq!(result.total_bundle_bytes, 1000);
        assert_eq!(result.total_gzip_bytes, 400);
        assert_eq!(result.resolved_count, 2);
        assert_eq!(result.sized_count, 1);
        assert!(result.has_unsized());
    }

    #[test]
    fn test_sized_count_matches_resolved_when_all_sized() {
        let a = pkg_a();
        let b = pkg_b();
        let result = aggregate([("a", Some(&a)), ("b", Some(&b)), ("gone", None)]);
        assert_eq!(result.sized_count, 2);
        assert!(!result.has_unsized());
    }

    #[test]
    fn test_huge_bundle_sizes_saturate() {
        let huge = DependencyAnalysis::new().with_bundle_size(u64::MAX, 1);
        let small = DependencyAnalysis::new().with_bundle_size(1, 1);
        let result = aggregate([("huge", Some(&huge)), ("small", Some(&small))]);

        assert_eq!(result.total_bundle_bytes, u64::MAX);
        assert_eq!(result.total_gzip_bytes, 2);

        let left = aggregate([("huge", Some(&huge))]);
        let right = aggregate([("small", Some(&small))]);
        assert_eq!(left.merge(right).total_bundle_bytes, u64::MAX);
    }

    #[test]
    fn test_peer_dependencies_tracked_separately() {
        let a = DependencyAnalysis::new()
            .with_dependency("react", "^18")
            .with_peer_dependency("react", "^18")
            .with_peer_dependency("react-dom", "^18");
        let b = DependencyAnalysis::new().with_peer_dependency("react", ">=16");
        let result = aggregate([("a", Some(&a)), ("b", Some(&b))]);

        assert_eq!(result.unique_dependency_names, names(&["react"]));
        assert_eq!(
            result.unique_peer_dependency_names,
            names(&["react", "react-dom"])
        );
    }

    #[test]
    fn test_dev_dependencies_are_not_aggregated() {
        let a = DependencyAnalysis::new().with_dev_dependency("jest", "^29");
        let result = aggregate([("a", Some(&a))]);
        assert!(result.unique_dependency_names.is_empty());
    }

    #[test]
    fn test_order_independence() {
        let a = pkg_a();
        let b = pkg_b();
        let c = DependencyAnalysis::new()
            .with_dependency("w", "1")
            .with_peer_dependency("p", "2")
            .with_bundle_size(7, 3);

        let orders: Vec<Vec<(&str, Option<&DependencyAnalysis>)>> = vec![
            vec![("a", Some(&a)), ("b", Some(&b)), ("c", Some(&c)), ("d", None)],
            vec![("d", None), ("c", Some(&c)), ("b", Some(&b)), ("a", Some(&a))],
            vec![("b", Some(&b)), ("d", None), ("a", Some(&a)), ("c", Some(&c))],
            vec![("c", Some(&c)), ("a", Some(&a)), ("d", None), ("b", Some(&b))],
        ];

        let expected = aggregate(orders[0].clone());
        for order in orders {
            assert_eq!(aggregate(order), expected);
        }
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let a = pkg_a();
        let b = pkg_b();
        let single = aggregate([("a", Some(&a)), ("missing", None), ("b", Some(&b))]);

        let left = aggregate([("a", Some(&a)), ("missing", None)]);
        let right = aggregate([("b", Some(&b))]);

        assert_eq!(left.clone().merge(right.clone()), single);
        assert_eq!(right.merge(left), single);
    }

    #[test]
    fn test_accepts_owned_names() {
        let a = pkg_a();
        let records = vec![("pkgA".to_string(), Some(&a))];
        assert_eq!(aggregate(records).package_count, 1);
    }
}
