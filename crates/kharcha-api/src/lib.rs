//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: entry form, list, filters, totals, chart, delete
//! - routes::filters: month/year dropdown options

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use kharcha_config::Config;
use kharcha_core::Book;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<RwLock<Book>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // Import route handlers
    use routes::filters::{api_filter_months, api_filter_years};
    use routes::transactions::{
        api_chart, api_summary, api_transaction_create, api_transaction_delete, api_transactions,
        htmx_transaction_delete, htmx_transaction_store, htmx_transactions_list, page_entry,
        page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route(
            "/api/transactions",
            get(api_transactions).post(api_transaction_create),
        )
        .route("/api/transactions/:index", delete(api_transaction_delete))
        .route("/api/summary", get(api_summary))
        .route("/api/chart", get(api_chart))
        .route("/api/filters/months", get(api_filter_months))
        .route("/api/filters/years", get(api_filter_years))
        .route("/api/settings", get(api_settings))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(page_entry))
        .route("/transactions", get(page_transactions).post(htmx_transaction_store))
        // HTMX partial routes (for tab content)
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/:index", delete(htmx_transaction_delete))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Get effective configuration (JSON API)
async fn api_settings(state: axum::extract::State<AppState>) -> String {
    serde_json::to_string(&state.config).unwrap_or_default()
}

/// Reload the blob from the store
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    let book = state.book.write().await;
    match book.reload().await {
        Ok(count) => format!(
            r#"{{"success": true, "message": "Reloaded {} transactions"}}"#,
            count
        ),
        Err(e) => format!(r#"{{"success": false, "message": "{}"}}"#, e),
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Kharcha</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Tab header shown on every page
pub fn tab_header(current_path: &str) -> String {
    let tabs = [("/", "Add Entry"), ("/transactions", "All Transactions")];

    let mut nav = String::from(
        "<div class='bg-white border-b'><div class='max-w-5xl mx-auto px-6'>\
         <div class='flex items-center justify-between'>\
         <h1 class='text-xl font-bold text-indigo-600 py-4'>Kharcha</h1>\
         <div class='flex gap-1'>",
    );

    for (path, label) in &tabs {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active {
            "border-indigo-600 text-indigo-600"
        } else {
            "border-transparent text-gray-600 hover:text-gray-800"
        };
        nav.push_str(&format!(
            r#"<a href='{}' class='px-4 py-4 border-b-2 font-medium {}'>{}</a>"#,
            path, active_class, label
        ));
    }
    nav.push_str("</div></div></div></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        // HTMX partial - just the content area
        format!(
            r#"<main class='max-w-5xl mx-auto p-6'>{}</main>"#,
            inner_content
        )
    } else {
        // Full page - wrap with base HTML and tab header
        base_html(
            title,
            &format!(
                r#"{}
    <main class='max-w-5xl mx-auto p-6'>{}</main>"#,
                tab_header(current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// This is the main entry point for the Kharcha server.
/// It creates the router, binds to the address, and starts listening for requests.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `book` - The shared transaction book
pub async fn start_server(config: Config, book: Arc<RwLock<Book>>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { book, config };

    let router = create_router(state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    log::info!("Starting Kharcha server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Add Entry)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => log::info!("Server stopped gracefully"),
        Err(e) => log::error!("Server error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_header_marks_active_tab() {
        let nav = tab_header("/transactions");
        assert!(nav.contains("All Transactions"));
        // Active tab carries the indigo border; the other does not
        let active_pos = nav.find("border-indigo-600").unwrap();
        assert!(active_pos > nav.find("Add Entry").unwrap());
    }

    #[test]
    fn test_base_html_includes_cdn_scripts() {
        let html = base_html("Test", "<p>hi</p>");
        assert!(html.contains("htmx.org"));
        assert!(html.contains("chart.js"));
        assert!(html.contains("<p>hi</p>"));
    }
}
