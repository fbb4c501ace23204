use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column names of the required fields
// ---------------------------------------------------------------------------

pub const NAME: &str = "Name";
pub const SECTOR: &str = "Sector";
pub const EARNINGS_PER_SHARE: &str = "Earnings/Share";
pub const PRICE_EARNINGS: &str = "Price/Earnings";

/// Columns every input file must provide, in display order.
pub const REQUIRED_COLUMNS: [&str; 4] = [NAME, SECTOR, EARNINGS_PER_SHARE, PRICE_EARNINGS];

// ---------------------------------------------------------------------------
// CompanyRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single company (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub name: String,
    pub sector: String,
    /// `Earnings/Share`; NaN when the source cell was empty.
    pub earnings_per_share: f64,
    /// `Price/Earnings`; NaN when the source cell was empty.
    pub price_earnings: f64,
    /// Raw text of the pass-through columns, aligned with
    /// [`CompanyTable::extra_columns`].
    pub extra: Vec<String>,
}

impl CompanyRecord {
    pub fn new(
        name: impl Into<String>,
        sector: impl Into<String>,
        earnings_per_share: f64,
        price_earnings: f64,
    ) -> Self {
        Self {
            name: name.into(),
            sector: sector.into(),
            earnings_per_share,
            price_earnings,
            extra: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – a displayable column of the table
// ---------------------------------------------------------------------------

/// Addresses one column of a [`CompanyTable`] for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Sector,
    EarningsPerShare,
    PriceEarnings,
    /// Index into [`CompanyTable::extra_columns`].
    Extra(usize),
}

impl Column {
    /// The four required columns, in the order they are shown.
    pub const SUMMARY: [Column; 4] = [
        Column::Name,
        Column::Sector,
        Column::EarningsPerShare,
        Column::PriceEarnings,
    ];

    pub fn header<'a>(&self, table: &'a CompanyTable) -> &'a str {
        match self {
            Column::Name => NAME,
            Column::Sector => SECTOR,
            Column::EarningsPerShare => EARNINGS_PER_SHARE,
            Column::PriceEarnings => PRICE_EARNINGS,
            Column::Extra(i) => table.extra_columns.get(*i).map_or("", String::as_str),
        }
    }

    pub fn cell(&self, record: &CompanyRecord) -> String {
        match self {
            Column::Name => record.name.clone(),
            Column::Sector => record.sector.clone(),
            Column::EarningsPerShare => format_number(record.earnings_per_share),
            Column::PriceEarnings => format_number(record.price_earnings),
            Column::Extra(i) => record.extra.get(*i).cloned().unwrap_or_default(),
        }
    }

    /// Whether the column holds numbers (right-aligned in tables).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::EarningsPerShare | Column::PriceEarnings)
    }
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        "<null>".to_string()
    } else {
        format!("{v:.2}")
    }
}

// ---------------------------------------------------------------------------
// CompanyTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The base table, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyTable {
    /// Rows in file order.
    pub records: Vec<CompanyRecord>,
    /// Header names of the columns beyond the required four, in file order.
    pub extra_columns: Vec<String>,
}

impl CompanyTable {
    pub fn new(records: Vec<CompanyRecord>) -> Self {
        Self {
            records,
            extra_columns: Vec::new(),
        }
    }

    /// Number of companies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every column in display order: required ones first, then pass-through.
    pub fn columns(&self) -> Vec<Column> {
        Column::SUMMARY
            .into_iter()
            .chain((0..self.extra_columns.len()).map(Column::Extra))
            .collect()
    }

    /// Sorted distinct sector values.
    pub fn distinct_sectors(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.sector.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn earnings_per_share(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.earnings_per_share)
    }

    pub fn price_earnings(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.price_earnings)
    }

    /// A view selecting every row.
    pub fn full_view(&self) -> TableView<'_> {
        TableView {
            table: self,
            rows: (0..self.len()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// TableView – a row subset of the base table
// ---------------------------------------------------------------------------

/// A derived view: indices of base-table rows in ascending (file) order.
///
/// Views only ever reference rows of the table they borrow, so a view can
/// never contain a synthesized or modified record.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a CompanyTable,
    rows: Vec<usize>,
}

impl<'a> TableView<'a> {
    /// Build a view from the rows of `table` that satisfy `keep`.
    pub fn select(table: &'a CompanyTable, keep: impl Fn(&CompanyRecord) -> bool) -> Self {
        let rows = table
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| keep(*r))
            .map(|(i, _)| i)
            .collect();
        Self { table, rows }
    }

    /// Rebuild a view from indices kept by [`TableView::into_rows`].
    /// Indices past the end of `table` are dropped.
    pub fn from_rows(table: &'a CompanyTable, mut rows: Vec<usize>) -> Self {
        rows.retain(|&row| row < table.len());
        Self { table, rows }
    }

    pub fn table(&self) -> &'a CompanyTable {
        self.table
    }

    /// Row indices into the base table.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `i`-th record of the view.
    pub fn get(&self, i: usize) -> Option<&'a CompanyRecord> {
        let table = self.table;
        self.rows.get(i).map(|&row| &table.records[row])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CompanyRecord> + '_ {
        let table = self.table;
        self.rows.iter().map(move |&row| &table.records[row])
    }

    /// Keep only the rows of this view that satisfy `keep`.
    pub fn restrict(&self, keep: impl Fn(&CompanyRecord) -> bool) -> Self {
        let table = self.table;
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&row| keep(&table.records[row]))
            .collect();
        Self { table, rows }
    }

    /// Sorted distinct sectors present in this view.
    pub fn distinct_sectors(&self) -> Vec<String> {
        self.iter()
            .map(|r| r.sector.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Detach the view from its table, e.g. to keep it across frames.
    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }
}

impl PartialEq for TableView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.rows == other.rows
    }
}
