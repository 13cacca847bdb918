//! Aggregate statistics over a run's records

use crate::record::PageRecord;
use std::collections::BTreeSet;

/// Counts shown at the top of the report and in the final log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    /// Total number of records
    pub total: usize,

    /// Records with a non-empty price
    pub with_price: usize,

    /// Records with a non-empty image URL
    pub with_image: usize,

    /// Number of distinct site labels (including `unknown`)
    pub distinct_sites: usize,
}

impl ReportStats {
    /// Computes statistics for a record list
    pub fn from_records(records: &[PageRecord]) -> Self {
        let sites: BTreeSet<_> = records.iter().map(|r| r.site).map(|s| s.label()).collect();

        Self {
            total: records.len(),
            with_price: records.iter().filter(|r| r.has_price()).count(),
            with_image: records.iter().filter(|r| r.has_image()).count(),
            distinct_sites: sites.len(),
        }
    }

    /// Returns the share of records with a price as a percentage
    pub fn price_coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.with_price as f64 / self.total as f64) * 100.0
    }
}

/// Prints statistics to the console
pub fn print_statistics(stats: &ReportStats) {
    println!("=== Run Statistics ===\n");
    println!("Products:       {}", stats.total);
    println!(
        "With price:     {} ({:.1}%)",
        stats.with_price,
        stats.price_coverage()
    );
    println!("With image:     {}", stats.with_image);
    println!("Sites:          {}", stats.distinct_sites);
}
