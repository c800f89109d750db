//! Transaction routes
//!
//! - api.rs: JSON API endpoints and HTMX fragment handlers
//! - page.rs: Full page rendering and HTML helpers

pub mod api;
pub mod page;

pub use api::{
    api_chart, api_summary, api_transaction_create, api_transaction_delete, api_transactions,
    htmx_transaction_delete, htmx_transaction_store, htmx_transactions_list,
};
pub use page::{page_entry, page_transactions};
