//! Core transaction book and business logic

pub mod error;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use kharcha_config::Config;
use kharcha_store::{StoreRef, StoredTransaction};
use kharcha_utils::format_amount;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

pub use error::{CoreError, ErrorCode, ErrorDetails};

/// Month names, indexed by month number - 1
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ==================== Entry Model ====================

/// Entry kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money in
    Credit,
    /// Money out
    Debit,
}

impl Default for EntryKind {
    fn default() -> Self {
        EntryKind::Credit
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit" => Ok(EntryKind::Credit),
            "debit" => Ok(EntryKind::Debit),
            _ => Err(format!("Invalid entry kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Credit => write!(f, "Credit"),
            EntryKind::Debit => write!(f, "Debit"),
        }
    }
}

/// A single credit/debit entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Entry timestamp, as entered ("YYYY-MM-DDTHH:MM")
    pub date_time: String,
    /// Credit or Debit
    pub kind: EntryKind,
    /// Entry amount, positive
    pub amount: f64,
    /// Free-text remarks (may be empty)
    pub remarks: String,
}

impl Transaction {
    /// Create a new entry
    pub fn new(date_time: String, kind: EntryKind, amount: f64, remarks: String) -> Self {
        Self {
            date_time,
            kind,
            amount,
            remarks,
        }
    }

    /// Parse the stored timestamp, accepting the datetime-local format and
    /// a few close variants
    pub fn parse_datetime(&self) -> Option<NaiveDateTime> {
        let value = self.date_time.trim();
        for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
                return Some(dt);
            }
        }
        // Date-only values count as midnight
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Get the entry date, if the timestamp parses
    pub fn date_naive(&self) -> Option<NaiveDate> {
        self.parse_datetime().map(|dt| dt.date())
    }

    /// Human-readable timestamp, falling back to the raw value
    pub fn display_datetime(&self) -> String {
        match self.parse_datetime() {
            Some(dt) => dt.format("%d %b %Y, %H:%M").to_string(),
            None => self.date_time.clone(),
        }
    }

    /// Check if this entry is a credit
    pub fn is_credit(&self) -> bool {
        self.kind == EntryKind::Credit
    }

    /// Check if this entry is a debit
    pub fn is_debit(&self) -> bool {
        self.kind == EntryKind::Debit
    }

    /// Entry-time validation
    ///
    /// Only run when a user submits a new entry; records loaded from the
    /// blob are accepted as-is.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.amount.is_finite() {
            return Err(CoreError::InvalidAmount {
                reason: "amount is not a number".to_string(),
            });
        }
        if self.amount <= 0.0 {
            return Err(CoreError::InvalidAmount {
                reason: "amount must be greater than zero".to_string(),
            });
        }
        if self.parse_datetime().is_none() {
            return Err(CoreError::InvalidDateTime {
                value: self.date_time.clone(),
            });
        }
        Ok(())
    }

    /// Convert a wire record into an entry
    ///
    /// Only "Credit" is recognized as money in; any other type string,
    /// recognized or not, counts as Debit.
    pub fn from_stored(stored: StoredTransaction) -> Self {
        let kind = stored.kind.parse().unwrap_or(EntryKind::Debit);
        Self {
            date_time: stored.date_time,
            kind,
            amount: stored.amount,
            remarks: stored.remarks,
        }
    }

    /// Convert this entry into a wire record
    pub fn to_stored(&self) -> StoredTransaction {
        StoredTransaction {
            date_time: self.date_time.clone(),
            kind: self.kind.to_string(),
            amount: self.amount,
            remarks: self.remarks.clone(),
        }
    }
}

/// An entry together with its position in the full stored list
///
/// The position is what delete operates on, so it must reference the stored
/// list, not the filtered view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedTransaction {
    pub index: usize,
    #[serde(flatten)]
    pub transaction: Transaction,
}

// ==================== Filtering ====================

/// Combinable entry filters, mirroring the page's filter controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    /// Month of the entry timestamp (1-12)
    pub month: Option<u32>,
    /// Year of the entry timestamp
    pub year: Option<i32>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
    /// Case-insensitive remarks substring
    pub remarks: Option<String>,
}

impl EntryFilter {
    /// Check whether no filter is active
    pub fn is_empty(&self) -> bool {
        *self == EntryFilter::default()
    }

    /// Check whether an entry passes every active filter
    ///
    /// Entries with an unparseable timestamp fail month/year filters when
    /// those are set, but pass the from/to bounds.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(query) = &self.remarks {
            let query = query.trim().to_lowercase();
            if !query.is_empty() && !tx.remarks.to_lowercase().contains(&query) {
                return false;
            }
        }

        let date = match tx.date_naive() {
            Some(d) => d,
            None => return self.month.is_none() && self.year.is_none(),
        };

        if let Some(month) = self.month {
            if date.month() != month {
                return false;
            }
        }
        if let Some(year) = self.year {
            if date.year() != year {
                return false;
            }
        }
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }

        true
    }
}

// ==================== The Book ====================

/// The transaction book
///
/// Holds the in-memory copy of the blob. Every mutation re-reads the whole
/// list from the store, modifies it, and writes the whole list back: last
/// write wins, matching the storage contract.
pub struct Book {
    config: Config,
    store: StoreRef,
    entries: RwLock<Vec<Transaction>>,
}

impl Book {
    /// Create a new book over the given store
    pub fn new(config: Config, store: StoreRef) -> Self {
        Self {
            config,
            store,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Load the blob from the store, replacing the in-memory copy.
    /// Returns the number of entries loaded.
    pub async fn load(&self) -> Result<usize, CoreError> {
        let stored = self.store.load().await?;
        let transactions: Vec<Transaction> =
            stored.into_iter().map(Transaction::from_stored).collect();
        let count = transactions.len();
        *self.entries.write().unwrap() = transactions;
        Ok(count)
    }

    /// Reload the blob from the store
    pub async fn reload(&self) -> Result<usize, CoreError> {
        self.load().await
    }

    /// Get all entries
    pub fn transactions(&self) -> Vec<Transaction> {
        self.entries.read().unwrap().clone()
    }

    /// Get total entry count
    pub fn transaction_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Get filtered entries with their stored positions, newest first
    pub fn filtered(&self, filter: &EntryFilter) -> Vec<IndexedTransaction> {
        let entries = self.entries.read().unwrap();
        let mut result: Vec<IndexedTransaction> = entries
            .iter()
            .enumerate()
            .filter(|(_, tx)| filter.matches(tx))
            .map(|(index, tx)| IndexedTransaction {
                index,
                transaction: tx.clone(),
            })
            .collect();

        // Newest first; unparseable timestamps sort last
        result.sort_by(|a, b| {
            b.transaction
                .parse_datetime()
                .cmp(&a.transaction.parse_datetime())
        });
        result
    }

    /// Get count of filtered entries
    pub fn filtered_count(&self, filter: &EntryFilter) -> usize {
        let entries = self.entries.read().unwrap();
        entries.iter().filter(|tx| filter.matches(tx)).count()
    }

    /// Add a new entry: validate, then read-modify-write the whole list
    pub async fn add(&self, tx: Transaction) -> Result<(), CoreError> {
        tx.validate()?;

        let mut stored = self.store.load().await?;
        stored.push(tx.to_stored());
        self.store.save(&stored).await?;

        *self.entries.write().unwrap() =
            stored.into_iter().map(Transaction::from_stored).collect();
        log::info!("Added entry, blob now holds {} transactions", self.transaction_count());
        Ok(())
    }

    /// Remove the entry at the given position in the full stored list
    pub async fn remove(&self, index: usize) -> Result<Transaction, CoreError> {
        let mut stored = self.store.load().await?;
        if index >= stored.len() {
            return Err(CoreError::EntryNotFound { index });
        }
        let removed = stored.remove(index);
        self.store.save(&stored).await?;

        *self.entries.write().unwrap() =
            stored.into_iter().map(Transaction::from_stored).collect();
        log::info!("Removed entry at position {}", index);
        Ok(Transaction::from_stored(removed))
    }

    // ==================== Reports ====================

    /// Raw credit/debit totals over the filtered set
    pub fn totals(&self, filter: &EntryFilter) -> (f64, f64) {
        let entries = self.entries.read().unwrap();
        let mut total_credit = 0.0;
        let mut total_debit = 0.0;
        for tx in entries.iter().filter(|tx| filter.matches(tx)) {
            match tx.kind {
                EntryKind::Credit => total_credit += tx.amount,
                EntryKind::Debit => total_debit += tx.amount,
            }
        }
        (total_credit, total_debit)
    }

    /// Generate the summary report for the filtered set
    pub fn summary(&self, filter: &EntryFilter) -> SummaryReport {
        let (total_credit, total_debit) = self.totals(filter);
        let net = total_credit - total_debit;
        let decimals = self.config.display.decimal_places;

        SummaryReport {
            total_credit: format_amount(total_credit, decimals),
            total_debit: format_amount(total_debit, decimals),
            net: format_amount(net.abs(), decimals),
            net_side: if net >= 0.0 { "Cr" } else { "Dr" }.to_string(),
            currency: self.config.display.currency_symbol.clone(),
            transaction_count: self.filtered_count(filter),
        }
    }

    /// Generate pie chart data for the filtered set
    pub fn chart_data(&self, filter: &EntryFilter) -> ChartData {
        let (total_credit, total_debit) = self.totals(filter);

        let data_points = vec![
            ChartDataPoint {
                label: "Credit".to_string(),
                value: total_credit,
                color: Some("green".to_string()),
            },
            ChartDataPoint {
                label: "Debit".to_string(),
                value: total_debit,
                color: Some("red".to_string()),
            },
        ];

        let labels: Vec<String> = data_points.iter().map(|dp| dp.label.clone()).collect();
        let values: Vec<f64> = data_points.iter().map(|dp| dp.value).collect();

        ChartData {
            chart_type: "pie".to_string(),
            title: "Credit vs Debit".to_string(),
            data_points,
            labels,
            datasets: vec![ChartDataset {
                label: "Totals".to_string(),
                data: values,
            }],
            currency: self.config.display.currency_symbol.clone(),
        }
    }

    /// Get entry statistics over the whole book
    pub fn stats(&self) -> TransactionStats {
        let entries = self.entries.read().unwrap();

        let credit_count = entries.iter().filter(|tx| tx.is_credit()).count();
        let debit_count = entries.len() - credit_count;

        let date_range = entries.iter().filter_map(|tx| tx.date_naive()).fold(
            (None, None),
            |(min, max), date| {
                (
                    Some(min.unwrap_or(date).min(date)),
                    Some(max.unwrap_or(date).max(date)),
                )
            },
        );

        TransactionStats {
            total_transactions: entries.len(),
            credit_count,
            debit_count,
            date_range_start: date_range.0.map(|d| d.to_string()),
            date_range_end: date_range.1.map(|d| d.to_string()),
        }
    }

    // ==================== Time Helpers ====================

    /// Current wall-clock time in the configured UTC offset
    pub fn local_now(&self) -> NaiveDateTime {
        let offset = FixedOffset::east_opt(self.config.time.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        Utc::now().with_timezone(&offset).naive_local()
    }

    /// Default value for the entry form's datetime-local input
    pub fn default_entry_datetime(&self) -> String {
        self.local_now().format("%Y-%m-%dT%H:%M").to_string()
    }

    /// Current month number in the configured offset (1-12)
    pub fn current_month(&self) -> u32 {
        self.local_now().month()
    }

    /// Current year in the configured offset
    pub fn current_year(&self) -> i32 {
        self.local_now().year()
    }

    /// Month options for the filter dropdown
    pub fn month_options(&self) -> Vec<FilterOption> {
        MONTHS
            .iter()
            .enumerate()
            .map(|(i, name)| FilterOption {
                value: (i + 1).to_string(),
                label: name.to_string(),
            })
            .collect()
    }

    /// Year options for the filter dropdown: current year +/- the window
    pub fn year_options(&self) -> Vec<FilterOption> {
        let current = self.current_year();
        let window = self.config.display.year_window;
        (current - window..=current + window)
            .map(|year| FilterOption {
                value: year.to_string(),
                label: year.to_string(),
            })
            .collect()
    }
}

// ==================== Report Structures ====================

/// Filter dropdown option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Credit/debit totals for the filtered set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_credit: String,
    pub total_debit: String,
    /// Absolute net amount
    pub net: String,
    /// "Cr" when credit >= debit, "Dr" otherwise
    pub net_side: String,
    pub currency: String,
    pub transaction_count: usize,
}

/// Entry statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_transactions: usize,
    pub credit_count: usize,
    pub debit_count: usize,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
}

/// Transactions list response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<IndexedTransaction>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Chart data point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

/// Chart dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart data for visualization
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartData {
    pub chart_type: String,
    pub title: String,
    pub data_points: Vec<ChartDataPoint>,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub currency: String,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use kharcha_store::{MemoryStore, TransactionStore};
    use std::sync::Arc;

    fn entry(date_time: &str, kind: EntryKind, amount: f64, remarks: &str) -> Transaction {
        Transaction::new(date_time.to_string(), kind, amount, remarks.to_string())
    }

    fn test_book(transactions: Vec<Transaction>) -> Book {
        let stored: Vec<StoredTransaction> =
            transactions.iter().map(Transaction::to_stored).collect();
        let store = Arc::new(MemoryStore::with_transactions(stored));
        Book::new(Config::default(), store)
    }

    async fn loaded_book(transactions: Vec<Transaction>) -> Book {
        let book = test_book(transactions);
        book.load().await.unwrap();
        book
    }

    fn sample_entries() -> Vec<Transaction> {
        vec![
            entry("2026-08-01T09:30", EntryKind::Credit, 5000.0, "Salary"),
            entry("2026-08-02T19:15", EntryKind::Debit, 250.75, "Groceries"),
            entry("2026-07-15T08:00", EntryKind::Debit, 1200.0, "Rent July"),
            entry("2025-08-20T12:00", EntryKind::Credit, 300.0, "refund"),
        ]
    }

    #[test]
    fn test_entry_kind_from_str() {
        assert_eq!("credit".parse::<EntryKind>().unwrap(), EntryKind::Credit);
        assert_eq!("Debit".parse::<EntryKind>().unwrap(), EntryKind::Debit);
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_entry_kind_serializes_capitalized() {
        let json = serde_json::to_string(&EntryKind::Credit).unwrap();
        assert_eq!(json, "\"Credit\"");
    }

    #[test]
    fn test_from_stored_unknown_kind_is_debit() {
        let stored = StoredTransaction {
            date_time: "2026-08-07T10:00".to_string(),
            kind: "Transfer".to_string(),
            amount: 10.0,
            remarks: String::new(),
        };
        let tx = Transaction::from_stored(stored);
        assert_eq!(tx.kind, EntryKind::Debit);
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert!(entry("2026-08-07T21:30", EntryKind::Credit, 1.0, "").parse_datetime().is_some());
        assert!(entry("2026-08-07T21:30:15", EntryKind::Credit, 1.0, "").parse_datetime().is_some());
        assert!(entry("2026-08-07 21:30:15", EntryKind::Credit, 1.0, "").parse_datetime().is_some());
        assert!(entry("2026-08-07", EntryKind::Credit, 1.0, "").parse_datetime().is_some());
        assert!(entry("yesterday", EntryKind::Credit, 1.0, "").parse_datetime().is_none());
    }

    #[test]
    fn test_display_datetime() {
        let tx = entry("2026-08-07T21:30", EntryKind::Credit, 1.0, "");
        assert_eq!(tx.display_datetime(), "07 Aug 2026, 21:30");

        let raw = entry("not-a-date", EntryKind::Credit, 1.0, "");
        assert_eq!(raw.display_datetime(), "not-a-date");
    }

    #[test]
    fn test_validate() {
        assert!(entry("2026-08-07T21:30", EntryKind::Credit, 10.0, "ok").validate().is_ok());

        let zero = entry("2026-08-07T21:30", EntryKind::Debit, 0.0, "");
        assert!(matches!(zero.validate(), Err(CoreError::InvalidAmount { .. })));

        let negative = entry("2026-08-07T21:30", EntryKind::Debit, -5.0, "");
        assert!(matches!(negative.validate(), Err(CoreError::InvalidAmount { .. })));

        let nan = entry("2026-08-07T21:30", EntryKind::Debit, f64::NAN, "");
        assert!(matches!(nan.validate(), Err(CoreError::InvalidAmount { .. })));

        let bad_date = entry("soon", EntryKind::Debit, 5.0, "");
        assert!(matches!(bad_date.validate(), Err(CoreError::InvalidDateTime { .. })));
    }

    #[test]
    fn test_filter_month_and_year() {
        let tx = entry("2026-08-01T09:30", EntryKind::Credit, 5000.0, "Salary");

        let mut filter = EntryFilter::default();
        assert!(filter.matches(&tx));

        filter.month = Some(8);
        assert!(filter.matches(&tx));
        filter.month = Some(7);
        assert!(!filter.matches(&tx));

        // Month without year matches that month in any year
        let last_year = entry("2025-08-20T12:00", EntryKind::Credit, 300.0, "refund");
        filter.month = Some(8);
        assert!(filter.matches(&last_year));

        filter.year = Some(2026);
        assert!(!filter.matches(&last_year));
        assert!(filter.matches(&tx));
    }

    #[test]
    fn test_filter_date_range() {
        let tx = entry("2026-08-02T19:15", EntryKind::Debit, 250.75, "Groceries");
        let mut filter = EntryFilter {
            from: NaiveDate::from_ymd_opt(2026, 8, 1),
            to: NaiveDate::from_ymd_opt(2026, 8, 2),
            ..Default::default()
        };
        // Upper bound is inclusive for the whole day
        assert!(filter.matches(&tx));

        filter.to = NaiveDate::from_ymd_opt(2026, 8, 1);
        assert!(!filter.matches(&tx));

        // from > to matches nothing
        filter.from = NaiveDate::from_ymd_opt(2026, 8, 3);
        filter.to = NaiveDate::from_ymd_opt(2026, 8, 1);
        assert!(!filter.matches(&tx));
    }

    #[test]
    fn test_filter_remarks_substring() {
        let tx = entry("2026-08-02T19:15", EntryKind::Debit, 250.75, "Groceries at market");
        let mut filter = EntryFilter {
            remarks: Some("MARKET".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&tx));

        filter.remarks = Some("petrol".to_string());
        assert!(!filter.matches(&tx));

        // Blank query is not a filter
        filter.remarks = Some("   ".to_string());
        assert!(filter.matches(&tx));
    }

    #[test]
    fn test_filter_unparseable_timestamp() {
        let tx = entry("garbage", EntryKind::Debit, 10.0, "old import");

        // Passes date-range filters
        let range = EntryFilter {
            from: NaiveDate::from_ymd_opt(2026, 1, 1),
            to: NaiveDate::from_ymd_opt(2026, 12, 31),
            ..Default::default()
        };
        assert!(range.matches(&tx));

        // Fails month/year filters
        let month = EntryFilter {
            month: Some(8),
            ..Default::default()
        };
        assert!(!month.matches(&tx));
    }

    #[tokio::test]
    async fn test_filtered_sorted_newest_first() {
        let book = loaded_book(sample_entries()).await;
        let listed = book.filtered(&EntryFilter::default());
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[0].transaction.remarks, "Groceries");
        assert_eq!(listed[1].transaction.remarks, "Salary");
        assert_eq!(listed[2].transaction.remarks, "Rent July");
        assert_eq!(listed[3].transaction.remarks, "refund");
        // Positions reference the stored list, not the sorted view
        assert_eq!(listed[0].index, 1);
        assert_eq!(listed[1].index, 0);
    }

    #[tokio::test]
    async fn test_summary_totals_and_net_side() {
        let book = loaded_book(sample_entries()).await;

        let summary = book.summary(&EntryFilter::default());
        assert_eq!(summary.total_credit, "5,300.00");
        assert_eq!(summary.total_debit, "1,450.75");
        assert_eq!(summary.net, "3,849.25");
        assert_eq!(summary.net_side, "Cr");
        assert_eq!(summary.currency, "₹");
        assert_eq!(summary.transaction_count, 4);

        // Debit-heavy filter flips the side marker
        let july = EntryFilter {
            month: Some(7),
            year: Some(2026),
            ..Default::default()
        };
        let summary = book.summary(&july);
        assert_eq!(summary.total_credit, "0.00");
        assert_eq!(summary.total_debit, "1,200.00");
        assert_eq!(summary.net, "1,200.00");
        assert_eq!(summary.net_side, "Dr");
    }

    #[tokio::test]
    async fn test_chart_data_pie() {
        let book = loaded_book(sample_entries()).await;
        let chart = book.chart_data(&EntryFilter::default());
        assert_eq!(chart.chart_type, "pie");
        assert_eq!(chart.labels, vec!["Credit", "Debit"]);
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].data, vec![5300.0, 1450.75]);
        assert_eq!(chart.data_points[0].color.as_deref(), Some("green"));
        assert_eq!(chart.data_points[1].color.as_deref(), Some("red"));
    }

    #[tokio::test]
    async fn test_stats() {
        let book = loaded_book(sample_entries()).await;
        let stats = book.stats();
        assert_eq!(stats.total_transactions, 4);
        assert_eq!(stats.credit_count, 2);
        assert_eq!(stats.debit_count, 2);
        assert_eq!(stats.date_range_start.as_deref(), Some("2025-08-20"));
        assert_eq!(stats.date_range_end.as_deref(), Some("2026-08-02"));
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let book = Book::new(Config::default(), store.clone());
        book.load().await.unwrap();

        book.add(entry("2026-08-07T10:00", EntryKind::Credit, 100.0, "gift"))
            .await
            .unwrap();
        book.add(entry("2026-08-07T11:00", EntryKind::Debit, 40.0, "auto"))
            .await
            .unwrap();

        assert_eq!(book.transaction_count(), 2);
        let persisted = store.load().await.unwrap();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].kind, "Credit");
        assert_eq!(persisted[1].kind, "Debit");
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_without_writing() {
        let store = Arc::new(MemoryStore::default());
        let book = Book::new(Config::default(), store.clone());
        book.load().await.unwrap();

        let result = book
            .add(entry("2026-08-07T10:00", EntryKind::Credit, 0.0, ""))
            .await;
        assert!(result.is_err());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_by_stored_position() {
        let store = Arc::new(MemoryStore::with_transactions(
            sample_entries().iter().map(Transaction::to_stored).collect(),
        ));
        let book = Book::new(Config::default(), store.clone());
        book.load().await.unwrap();

        let removed = book.remove(1).await.unwrap();
        assert_eq!(removed.remarks, "Groceries");
        assert_eq!(book.transaction_count(), 3);

        // The other entries survive, including ones a filter would hide
        let persisted = store.load().await.unwrap();
        assert_eq!(persisted.len(), 3);
        assert!(persisted.iter().any(|tx| tx.remarks == "Rent July"));
        assert!(persisted.iter().any(|tx| tx.remarks == "refund"));
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let book = loaded_book(sample_entries()).await;
        let result = book.remove(99).await;
        assert!(matches!(result, Err(CoreError::EntryNotFound { index: 99 })));
        assert_eq!(book.transaction_count(), 4);
    }

    #[test]
    fn test_month_options() {
        let book = test_book(Vec::new());
        let options = book.month_options();
        assert_eq!(options.len(), 12);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[0].label, "January");
        assert_eq!(options[11].label, "December");
    }

    #[test]
    fn test_year_options_window() {
        let book = test_book(Vec::new());
        let options = book.year_options();
        assert_eq!(options.len(), 11);
        let current = book.current_year();
        assert_eq!(options[0].value, (current - 5).to_string());
        assert_eq!(options[10].value, (current + 5).to_string());
    }

    #[test]
    fn test_default_entry_datetime_format() {
        let book = test_book(Vec::new());
        let value = book.default_entry_datetime();
        assert!(NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M").is_ok());
    }
}
