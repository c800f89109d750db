//! Transaction API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered transaction list (JSON)
//! - api_transaction_create: Add a transaction (JSON)
//! - api_transaction_delete: Delete by stored position (JSON)
//! - api_summary: Filtered totals (JSON)
//! - api_chart: Pie chart data (JSON)
//! - htmx_transactions_list: Filter bar, totals, chart, table (HTML fragment)
//! - htmx_transaction_store: Store new transaction from the entry form (HTMX)
//! - htmx_transaction_delete: Delete a transaction (HTMX)

use crate::{ApiError, AppState};
use axum::extract::{Path, Query};
use chrono::NaiveDate;
use kharcha_core::{EntryFilter, EntryKind, Transaction, TransactionsResponse};
use serde::Deserialize;
use std::collections::HashMap;

/// Build an entry filter from query/form parameters
///
/// Absent or non-numeric month/year values (including "all") leave that
/// filter off; JSON API callers get the unfiltered list by default.
pub(super) fn parse_filter(params: &HashMap<String, String>) -> EntryFilter {
    EntryFilter {
        month: params
            .get("month")
            .and_then(|m| m.parse::<u32>().ok())
            .filter(|m| (1..=12).contains(m)),
        year: params.get("year").and_then(|y| y.parse::<i32>().ok()),
        from: params
            .get("from")
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        to: params
            .get("to")
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        remarks: params
            .get("q")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty()),
    }
}

/// Parse a urlencoded form body into a parameter map
pub(super) fn parse_form_body(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            let key = urlencoding::decode(key).unwrap_or_default().into_owned();
            // form encoding spells spaces as '+'
            let value = urlencoding::decode(&value.replace('+', " "))
                .unwrap_or_default()
                .into_owned();
            params.insert(key, value);
        }
    }
    params
}

/// Query string carrying the current filter selections, for pagination links
pub(super) fn list_query_string(params: &HashMap<String, String>, limit: usize) -> String {
    let mut parts = Vec::new();
    for key in ["month", "year", "from", "to", "q"] {
        if let Some(value) = params.get(key) {
            if !value.is_empty() {
                parts.push(format!("{}={}", key, urlencoding::encode(value)));
            }
        }
    }
    parts.push(format!("limit={}", limit));
    parts.join("&")
}

fn page_limit(params: &HashMap<String, String>, default_limit: usize) -> usize {
    params
        .get("limit")
        .and_then(|s| s.parse().ok())
        .filter(|l| *l > 0)
        .unwrap_or(default_limit)
}

fn page_offset(params: &HashMap<String, String>) -> usize {
    params.get("offset").and_then(|s| s.parse().ok()).unwrap_or(0)
}

// ==================== JSON API ====================

/// Get transactions with filtering and view pagination (JSON API)
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let book = state.book.read().await;
    let filter = parse_filter(&params);
    let limit = page_limit(&params, state.config.pagination.records_per_page);
    let offset = page_offset(&params);

    let all = book.filtered(&filter);
    let total_count = all.len();
    let transactions = all.into_iter().skip(offset).take(limit).collect();

    let response = TransactionsResponse {
        transactions,
        total_count,
        page: offset / limit + 1,
        page_size: limit,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// New transaction request body (JSON API)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub date_time: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub remarks: String,
}

/// Add a transaction (JSON API)
pub async fn api_transaction_create(
    state: axum::extract::State<AppState>,
    axum::Json(request): axum::Json<CreateTransactionRequest>,
) -> Result<String, ApiError> {
    let kind: EntryKind = request
        .kind
        .parse()
        .map_err(|message: String| ApiError::BadRequest { message })?;
    let tx = Transaction::new(
        request.date_time,
        kind,
        request.amount,
        request.remarks.trim().to_string(),
    );

    let book = state.book.write().await;
    book.add(tx).await?;
    Ok(r#"{"success": true, "message": "Transaction added"}"#.to_string())
}

/// Delete a transaction by its position in the stored list (JSON API)
pub async fn api_transaction_delete(
    state: axum::extract::State<AppState>,
    path: Path<usize>,
) -> Result<String, ApiError> {
    let book = state.book.write().await;
    book.remove(path.0).await?;
    Ok(r#"{"success": true, "message": "Transaction deleted"}"#.to_string())
}

/// Get filtered totals (JSON API)
pub async fn api_summary(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let book = state.book.read().await;
    let summary = book.summary(&parse_filter(&params));
    serde_json::to_string(&summary).unwrap_or_default()
}

/// Get pie chart data for the filtered set (JSON API)
pub async fn api_chart(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let book = state.book.read().await;
    let chart = book.chart_data(&parse_filter(&params));
    serde_json::to_string(&chart).unwrap_or_default()
}

// ==================== HTMX Fragments ====================

/// HTMX: Transaction list - Partial page update
///
/// Renders the filter bar, totals cards, pie chart, table, and pagination
/// for the current filter selections. Month and year default to the current
/// ones when absent (the page preselects them); "all" disables the filter.
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let book = state.book.read().await;

    let mut params = params.0;
    params
        .entry("month".to_string())
        .or_insert_with(|| book.current_month().to_string());
    params
        .entry("year".to_string())
        .or_insert_with(|| book.current_year().to_string());

    let filter = parse_filter(&params);
    let limit = page_limit(&params, state.config.pagination.records_per_page);
    let offset = page_offset(&params);

    let listed = book.filtered(&filter);
    let total_count = listed.len();
    let page_items: Vec<_> = listed.into_iter().skip(offset).take(limit).collect();

    let summary = book.summary(&filter);
    let chart = book.chart_data(&filter);

    let mut html = String::new();
    html.push_str(&super::page::render_filter_bar(&book, &params));
    html.push_str(&super::page::render_summary_cards(&summary));
    html.push_str(&super::page::render_chart(&chart));
    html.push_str(&super::page::render_table(
        &page_items,
        &state.config.display.currency_symbol,
        state.config.display.decimal_places,
    ));
    html.push_str(&super::page::render_pagination(
        total_count,
        limit,
        offset,
        &list_query_string(&params, limit),
    ));
    html.push_str("<div id='delete-result' class='mt-4'></div>");
    html
}

/// Store new transaction from the entry form (HTMX)
pub async fn htmx_transaction_store(
    state: axum::extract::State<AppState>,
    body: String,
) -> String {
    let params = parse_form_body(&body);

    let date_time = params.get("dateTime").cloned().unwrap_or_default();
    let kind_str = params.get("type").cloned().unwrap_or_default();
    let amount_str = params.get("amount").cloned().unwrap_or_default();
    let remarks = params
        .get("remarks")
        .map(|r| r.trim().to_string())
        .unwrap_or_default();

    let kind: EntryKind = match kind_str.parse() {
        Ok(kind) => kind,
        Err(_) => return error_fragment("Please pick a valid type (Credit or Debit)."),
    };
    let amount: f64 = match amount_str.trim().parse() {
        Ok(amount) => amount,
        Err(_) => return error_fragment("Please enter a valid amount."),
    };

    let tx = Transaction::new(date_time, kind, amount, remarks);

    let book = state.book.write().await;
    match book.add(tx).await {
        Ok(()) => {
            let default_dt = book.default_entry_datetime();
            format!(
                r#"<div class='bg-green-50 border border-green-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-green-600'>✓</span><span class='font-medium text-green-800'>Transaction added</span></div></div>
                <script>
                (function() {{
                    const form = document.getElementById('entry-form');
                    if (form) {{
                        form.reset();
                        const dt = form.querySelector('input[name="dateTime"]');
                        if (dt) {{ dt.value = '{}'; }}
                    }}
                }})();
                </script>"#,
                default_dt
            )
        }
        Err(e) => error_fragment(&e.to_string()),
    }
}

/// Delete a transaction (HTMX)
///
/// The index references the full stored list, not the filtered view. On
/// success the current filter selections are re-applied to refresh the list.
pub async fn htmx_transaction_delete(
    state: axum::extract::State<AppState>,
    path: Path<usize>,
) -> String {
    let book = state.book.write().await;
    match book.remove(path.0).await {
        Ok(_) => r#"<div class='bg-green-50 border border-green-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-green-600'>✓</span><span class='font-medium text-green-800'>Transaction deleted</span></div></div>
            <script>document.getElementById('filter-apply')?.click();</script>"#
            .to_string(),
        Err(e) => error_fragment(&e.to_string()),
    }
}

/// Standard error fragment for HTMX responses
fn error_fragment(message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-red-600'>✗</span><span class='font-medium text-red-800'>Failed</span></div><p class='text-sm text-red-600 mt-1'>{}</p></div>"#,
        kharcha_utils::escape_html(message)
    )
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_filter_empty() {
        let filter = parse_filter(&HashMap::new());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_parse_filter_all_is_no_filter() {
        let filter = parse_filter(&params(&[("month", "all"), ("year", "all")]));
        assert!(filter.month.is_none());
        assert!(filter.year.is_none());
    }

    #[test]
    fn test_parse_filter_values() {
        let filter = parse_filter(&params(&[
            ("month", "8"),
            ("year", "2026"),
            ("from", "2026-08-01"),
            ("to", "2026-08-31"),
            ("q", "  rent "),
        ]));
        assert_eq!(filter.month, Some(8));
        assert_eq!(filter.year, Some(2026));
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2026, 8, 1));
        assert_eq!(filter.to, NaiveDate::from_ymd_opt(2026, 8, 31));
        assert_eq!(filter.remarks.as_deref(), Some("rent"));
    }

    #[test]
    fn test_parse_filter_rejects_bad_month() {
        let filter = parse_filter(&params(&[("month", "13"), ("from", "yesterday")]));
        assert!(filter.month.is_none());
        assert!(filter.from.is_none());
    }

    #[test]
    fn test_parse_form_body() {
        let body = "dateTime=2026-08-07T21%3A30&type=Credit&amount=150.50&remarks=chai+with+friends";
        let params = parse_form_body(body);
        assert_eq!(params.get("dateTime").unwrap(), "2026-08-07T21:30");
        assert_eq!(params.get("type").unwrap(), "Credit");
        assert_eq!(params.get("amount").unwrap(), "150.50");
        assert_eq!(params.get("remarks").unwrap(), "chai with friends");
    }

    #[test]
    fn test_parse_form_body_keeps_encoded_plus() {
        let params = parse_form_body("remarks=1%2B1");
        assert_eq!(params.get("remarks").unwrap(), "1+1");
    }

    #[test]
    fn test_list_query_string_skips_empty() {
        let qs = list_query_string(
            &params(&[("month", "8"), ("year", ""), ("q", "tea time")]),
            25,
        );
        assert!(qs.contains("month=8"));
        assert!(qs.contains("q=tea%20time"));
        assert!(!qs.contains("year"));
        assert!(qs.ends_with("limit=25"));
    }
}
