use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{
    filter_by_sector_and_pe, filter_by_sectors, sector_counts, strong_stocks,
    strong_stocks_in_sector, SectorChoice,
};
use crate::data::model::{CompanyTable, TableView};
use crate::data::stats::{self, StatsError};

/// Quantile of `Price/Earnings` used as the initial P/E ceiling.
const DEFAULT_PE_QUANTILE: f64 = 0.75;

// ---------------------------------------------------------------------------
// Parameters and events
// ---------------------------------------------------------------------------

/// Current values of the sidebar controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub sector: String,
    pub pe_ceiling: f64,
    pub selected_sectors: BTreeSet<String>,
    pub strong_sector: SectorChoice,
}

/// A user interaction with one of the sidebar controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SelectSector(String),
    SetPeCeiling(f64),
    ToggleSector(String),
    ShowSelectedSectors,
    SelectStrongSector(SectorChoice),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Derived views are stored as row indices and recomputed from the base
/// table whenever one of their parameters changes.
pub struct AppState {
    /// Loaded dataset; never mutated after construction.
    table: CompanyTable,

    /// Sorted distinct sectors, offered by the dropdown and the multi-select.
    pub sectors: Vec<String>,

    /// Observed `[min, max]` of `Price/Earnings`, the slider bounds.
    pub pe_range: (f64, f64),

    pub params: FilterParams,

    sector_pe_rows: Vec<usize>,

    /// Result of the last "Show" press, cleared when its inputs change.
    multi_sector_rows: Option<Vec<usize>>,

    /// Sorted sectors present among strong stocks.
    pub strong_sectors: Vec<String>,

    strong_rows: Result<Vec<usize>, StatsError>,

    pub sector_counts: Vec<(String, usize)>,

    /// Scatter colours keyed by sector.
    pub color_map: ColorMap,
}

impl AppState {
    /// Ingest the loaded dataset, initialise parameters and every view.
    pub fn new(table: CompanyTable) -> Self {
        let sectors = table.distinct_sectors();
        let pe_range = stats::min_max(table.price_earnings()).unwrap_or_else(|e| {
            log::warn!("no P/E values: {e}");
            (0.0, 0.0)
        });
        let pe_ceiling =
            stats::quantile(table.price_earnings(), DEFAULT_PE_QUANTILE).unwrap_or(pe_range.1);

        let strong_sectors = match strong_stocks(&table) {
            Ok(view) => view.distinct_sectors(),
            Err(_) => Vec::new(),
        };

        let params = FilterParams {
            sector: sectors.first().cloned().unwrap_or_default(),
            pe_ceiling,
            selected_sectors: BTreeSet::new(),
            strong_sector: SectorChoice::All,
        };

        let mut state = Self {
            sector_counts: sector_counts(&table),
            color_map: ColorMap::new(&sectors),
            table,
            sectors,
            pe_range,
            params,
            sector_pe_rows: Vec::new(),
            multi_sector_rows: None,
            strong_sectors,
            strong_rows: Ok(Vec::new()),
        };
        state.refilter_sector_pe();
        state.refilter_strong();
        state
    }

    pub fn table(&self) -> &CompanyTable {
        &self.table
    }

    /// Apply one interaction and recompute only the views it affects.
    pub fn apply(&mut self, event: Event) {
        log::debug!("event: {event:?}");
        match event {
            Event::SelectSector(sector) => {
                self.params.sector = sector;
                self.multi_sector_rows = None;
                self.refilter_sector_pe();
            }
            Event::SetPeCeiling(pe) => {
                self.params.pe_ceiling = pe.clamp(self.pe_range.0, self.pe_range.1);
                self.multi_sector_rows = None;
                self.refilter_sector_pe();
            }
            Event::ToggleSector(sector) => {
                if !self.params.selected_sectors.remove(&sector) {
                    self.params.selected_sectors.insert(sector);
                }
                self.multi_sector_rows = None;
            }
            Event::ShowSelectedSectors => {
                let view = filter_by_sectors(&self.table, &self.params.selected_sectors);
                log::debug!("multi-sector view: {} rows", view.len());
                self.multi_sector_rows = Some(view.into_rows());
            }
            Event::SelectStrongSector(choice) => {
                self.params.strong_sector = choice;
                self.refilter_strong();
            }
        }
    }

    fn refilter_sector_pe(&mut self) {
        let view =
            filter_by_sector_and_pe(&self.table, &self.params.sector, self.params.pe_ceiling);
        log::debug!(
            "sector/P/E view ({} <= {}): {} rows",
            self.params.sector,
            self.params.pe_ceiling,
            view.len()
        );
        self.sector_pe_rows = view.into_rows();
    }

    fn refilter_strong(&mut self) {
        self.strong_rows = strong_stocks_in_sector(&self.table, &self.params.strong_sector)
            .map(TableView::into_rows);
        if let Err(e) = &self.strong_rows {
            log::warn!("strong stocks unavailable: {e}");
        }
    }

    // -- Views handed to the renderer --

    pub fn sector_pe_view(&self) -> TableView<'_> {
        TableView::from_rows(&self.table, self.sector_pe_rows.clone())
    }

    pub fn multi_sector_view(&self) -> Option<TableView<'_>> {
        self.multi_sector_rows
            .as_ref()
            .map(|rows| TableView::from_rows(&self.table, rows.clone()))
    }

    /// The view plotted in the scatter chart: the multi-sector result while
    /// it is shown, otherwise the sector/P/E view.
    pub fn scatter_view(&self) -> TableView<'_> {
        self.multi_sector_view()
            .unwrap_or_else(|| self.sector_pe_view())
    }

    pub fn strong_view(&self) -> Result<TableView<'_>, StatsError> {
        self.strong_rows
            .as_ref()
            .map(|rows| TableView::from_rows(&self.table, rows.clone()))
            .map_err(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CompanyRecord;
    use approx::assert_relative_eq;

    fn state() -> AppState {
        AppState::new(CompanyTable::new(vec![
            CompanyRecord::new("A", "Energy", 3.0, 12.0),
            CompanyRecord::new("B", "Tech", 6.0, 8.0),
            CompanyRecord::new("C", "Health", 1.0, 40.0),
            CompanyRecord::new("D", "Tech", 4.5, 15.0),
            CompanyRecord::new("E", "Energy", -2.0, -5.0),
            CompanyRecord::new("F", "Health", 7.0, 11.0),
            CompanyRecord::new("G", "Utilities", 0.5, 25.0),
        ]))
    }

    fn names(view: &TableView<'_>) -> Vec<String> {
        view.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_initial_parameters() {
        let state = state();
        assert_eq!(state.sectors, vec!["Energy", "Health", "Tech", "Utilities"]);
        assert_eq!(state.params.sector, "Energy");
        assert_eq!(state.pe_range, (-5.0, 40.0));
        // sorted P/E: -5 8 11 12 15 25 40, 75th percentile at rank 4.5
        assert_relative_eq!(state.params.pe_ceiling, 20.0);
        assert_eq!(state.params.strong_sector, SectorChoice::All);
        assert_eq!(state.strong_sectors, vec!["Health", "Tech"]);
    }

    #[test]
    fn test_initial_views() {
        let state = state();
        assert_eq!(names(&state.sector_pe_view()), vec!["A", "E"]);
        assert!(state.multi_sector_view().is_none());
        assert_eq!(names(&state.strong_view().unwrap()), vec!["B", "F"]);
        assert_eq!(state.sector_counts[0], ("Energy".to_string(), 2));
    }

    #[test]
    fn test_sector_and_ceiling_events() {
        let mut state = state();
        state.apply(Event::SelectSector("Tech".into()));
        assert_eq!(names(&state.sector_pe_view()), vec!["B", "D"]);

        state.apply(Event::SetPeCeiling(10.0));
        assert_eq!(names(&state.sector_pe_view()), vec!["B"]);

        state.apply(Event::SetPeCeiling(1000.0));
        assert_relative_eq!(state.params.pe_ceiling, 40.0);
    }

    #[test]
    fn test_show_selected_sectors() {
        let mut state = state();
        state.apply(Event::ShowSelectedSectors);
        assert_eq!(state.multi_sector_view().unwrap().len(), 7);

        state.apply(Event::ToggleSector("Health".into()));
        state.apply(Event::ToggleSector("Utilities".into()));
        assert!(state.multi_sector_view().is_none());
        assert_eq!(names(&state.scatter_view()), vec!["A", "E"]);

        state.apply(Event::ShowSelectedSectors);
        assert_eq!(names(&state.scatter_view()), vec!["C", "F", "G"]);

        state.apply(Event::ToggleSector("Utilities".into()));
        state.apply(Event::ShowSelectedSectors);
        assert_eq!(names(&state.scatter_view()), vec!["C", "F"]);

        state.apply(Event::SetPeCeiling(30.0));
        assert_eq!(names(&state.scatter_view()), vec!["A", "E"]);
    }

    #[test]
    fn test_strong_sector_event() {
        let mut state = state();
        state.apply(Event::SelectStrongSector(SectorChoice::Sector("Tech".into())));
        assert_eq!(names(&state.strong_view().unwrap()), vec!["B"]);

        // strong view ignores the sidebar sector/P/E filter
        state.apply(Event::SetPeCeiling(-5.0));
        assert_eq!(names(&state.strong_view().unwrap()), vec!["B"]);
    }

    #[test]
    fn test_empty_table_reports_no_data() {
        let state = AppState::new(CompanyTable::default());
        assert!(state.sectors.is_empty());
        assert!(state.sector_pe_view().is_empty());
        assert!(matches!(state.strong_view(), Err(StatsError::EmptyTable(_))));
        assert!(state.sector_counts.is_empty());
    }
}
