use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::model::{CompanyTable, TableView};
use super::stats::{self, StatsError};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Sector restriction for the strong-stocks view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectorChoice {
    #[default]
    All,
    Sector(String),
}

impl SectorChoice {
    pub fn matches(&self, sector: &str) -> bool {
        match self {
            SectorChoice::All => true,
            SectorChoice::Sector(s) => s == sector,
        }
    }
}

impl fmt::Display for SectorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectorChoice::All => f.write_str("All"),
            SectorChoice::Sector(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Rows with `Sector == sector` and `Price/Earnings <= pe_max`.
pub fn filter_by_sector_and_pe<'a>(
    table: &'a CompanyTable,
    sector: &str,
    pe_max: f64,
) -> TableView<'a> {
    TableView::select(table, |r| r.sector == sector && r.price_earnings <= pe_max)
}

/// Rows whose sector is in `sectors`; every row when `sectors` is empty.
pub fn filter_by_sectors<'a>(table: &'a CompanyTable, sectors: &BTreeSet<String>) -> TableView<'a> {
    if sectors.is_empty() {
        return table.full_view();
    }
    TableView::select(table, |r| sectors.contains(&r.sector))
}

/// Rows with EPS above the table's EPS median and P/E below its P/E median.
///
/// Both medians are taken over `table` itself on every call.
pub fn strong_stocks(table: &CompanyTable) -> Result<TableView<'_>, StatsError> {
    let eps_median = stats::median(table.earnings_per_share())?;
    let pe_median = stats::median(table.price_earnings())?;
    log::debug!("strong stock medians: eps={eps_median}, pe={pe_median}");
    Ok(TableView::select(table, |r| {
        r.earnings_per_share > eps_median && r.price_earnings < pe_median
    }))
}

/// [`strong_stocks`] restricted to one sector, or unrestricted for `All`.
pub fn strong_stocks_in_sector<'a>(
    table: &'a CompanyTable,
    choice: &SectorChoice,
) -> Result<TableView<'a>, StatsError> {
    Ok(strong_stocks(table)?.restrict(|r| choice.matches(&r.sector)))
}

/// Row count per sector, largest first. Ties keep first-appearance order.
pub fn sector_counts(table: &CompanyTable) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for r in &table.records {
        match index.get(r.sector.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(&r.sector, counts.len());
                counts.push((r.sector.clone(), 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CompanyRecord;

    fn sample() -> CompanyTable {
        CompanyTable::new(vec![
            CompanyRecord::new("A", "Tech", 2.0, 10.0),
            CompanyRecord::new("B", "Tech", 5.0, 20.0),
            CompanyRecord::new("C", "Health", 1.0, 30.0),
        ])
    }

    fn larger() -> CompanyTable {
        CompanyTable::new(vec![
            CompanyRecord::new("A", "Energy", 3.0, 12.0),
            CompanyRecord::new("B", "Tech", 6.0, 8.0),
            CompanyRecord::new("C", "Health", 1.0, 40.0),
            CompanyRecord::new("D", "Tech", 4.5, 15.0),
            CompanyRecord::new("E", "Energy", -2.0, -5.0),
            CompanyRecord::new("F", "Health", 7.0, 11.0),
            CompanyRecord::new("G", "Utilities", 0.5, 25.0),
        ])
    }

    fn names(view: &TableView<'_>) -> Vec<String> {
        view.iter().map(|r| r.name.clone()).collect()
    }

    fn set(sectors: &[&str]) -> BTreeSet<String> {
        sectors.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sector_and_pe_scenario() {
        let table = sample();
        let view = filter_by_sector_and_pe(&table, "Tech", 15.0);
        assert_eq!(names(&view), vec!["A"]);
    }

    #[test]
    fn test_sector_and_pe_inclusive_ceiling() {
        let table = sample();
        let view = filter_by_sector_and_pe(&table, "Tech", 20.0);
        assert_eq!(names(&view), vec!["A", "B"]);
    }

    #[test]
    fn test_sector_at_max_pe_only_has_sector() {
        let table = larger();
        let max_pe = stats::min_max(table.price_earnings()).unwrap().1;
        for sector in table.distinct_sectors() {
            let view = filter_by_sector_and_pe(&table, &sector, max_pe);
            assert!(!view.is_empty());
            assert!(view.iter().all(|r| r.sector == sector));
        }
    }

    #[test]
    fn test_unknown_sector_is_empty() {
        let table = sample();
        assert!(filter_by_sector_and_pe(&table, "Mining", 100.0).is_empty());
        assert!(filter_by_sectors(&table, &set(&["Mining"])).is_empty());
    }

    #[test]
    fn test_empty_sector_set_is_identity() {
        let table = larger();
        assert_eq!(filter_by_sectors(&table, &BTreeSet::new()), table.full_view());
    }

    #[test]
    fn test_sectors_union_in_table_order() {
        let table = sample();
        let view = filter_by_sectors(&table, &set(&["Tech", "Health"]));
        assert_eq!(names(&view), vec!["A", "B", "C"]);

        let table = larger();
        let view = filter_by_sectors(&table, &set(&["Health", "Energy", "Health"]));
        assert_eq!(names(&view), vec!["A", "C", "E", "F"]);
    }

    #[test]
    fn test_strong_stocks_scenario_is_empty() {
        let table = sample();
        assert!(strong_stocks(&table).unwrap().is_empty());
    }

    #[test]
    fn test_strong_stocks_partition() {
        let table = larger();
        let eps_median = stats::median(table.earnings_per_share()).unwrap();
        let pe_median = stats::median(table.price_earnings()).unwrap();
        let strong = strong_stocks(&table).unwrap();
        assert_eq!(names(&strong), vec!["B", "F"]);

        for (i, r) in table.records.iter().enumerate() {
            let qualifies = r.earnings_per_share > eps_median && r.price_earnings < pe_median;
            assert_eq!(strong.rows().contains(&i), qualifies, "row {}", r.name);
        }
    }

    #[test]
    fn test_strong_stocks_empty_table() {
        let table = CompanyTable::default();
        assert!(matches!(
            strong_stocks(&table),
            Err(StatsError::EmptyTable(_))
        ));
    }

    #[test]
    fn test_strong_stocks_by_sector() {
        let table = larger();
        let all = strong_stocks_in_sector(&table, &SectorChoice::All).unwrap();
        assert_eq!(names(&all), vec!["B", "F"]);

        let health =
            strong_stocks_in_sector(&table, &SectorChoice::Sector("Health".into())).unwrap();
        assert_eq!(names(&health), vec!["F"]);
        assert_eq!(health.distinct_sectors(), vec!["Health"]);
    }

    #[test]
    fn test_sector_counts_scenario() {
        let counts = sector_counts(&sample());
        assert_eq!(
            counts,
            vec![("Tech".to_string(), 2), ("Health".to_string(), 1)]
        );
    }

    #[test]
    fn test_sector_counts_ties_and_sum() {
        let table = larger();
        let counts = sector_counts(&table);
        let order: Vec<_> = counts.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["Energy", "Tech", "Health", "Utilities"]);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), table.len());

        let mut keys: Vec<_> = counts.into_iter().map(|(s, _)| s).collect();
        keys.sort();
        assert_eq!(keys, table.distinct_sectors());
    }

    #[test]
    fn test_operations_are_repeatable() {
        let table = larger();
        assert_eq!(strong_stocks(&table).unwrap(), strong_stocks(&table).unwrap());
        assert_eq!(sector_counts(&table), sector_counts(&table));
    }
}
