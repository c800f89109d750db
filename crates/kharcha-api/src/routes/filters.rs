//! Filter dropdown option routes
//!
//! Provides the month and year options the filter controls are populated
//! with: "All" plus the twelve months, and "All" plus a window of years
//! around the current one.

use crate::AppState;
use kharcha_core::FilterOption;

/// Month options for the filter dropdown (JSON API)
pub async fn api_filter_months(state: axum::extract::State<AppState>) -> String {
    let book = state.book.read().await;
    let mut options = vec![FilterOption {
        value: "all".to_string(),
        label: "All".to_string(),
    }];
    options.extend(book.month_options());

    serde_json::to_string(&options).unwrap_or_default()
}

/// Year options for the filter dropdown (JSON API)
pub async fn api_filter_years(state: axum::extract::State<AppState>) -> String {
    let book = state.book.read().await;
    let mut options = vec![FilterOption {
        value: "all".to_string(),
        label: "All".to_string(),
    }];
    options.extend(book.year_options());

    serde_json::to_string(&options).unwrap_or_default()
}
