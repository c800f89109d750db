//! Route modules for the API server
//!
//! All routes are organized into modules for better maintainability:
//! - transactions: entry form, list, filters, totals, chart, delete
//! - filters: month/year dropdown options
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX fragment handlers
//! - page.rs: Full page rendering and HTML helpers

pub mod filters;
pub mod transactions;
