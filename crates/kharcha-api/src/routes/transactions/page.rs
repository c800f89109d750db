//! Transaction page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_entry: Add Entry page (the default tab)
//! - page_transactions: All Transactions page
//!
//! Helper functions render the pieces of the list fragment: filter bar,
//! summary cards, pie chart, table, pagination.

use crate::AppState;
use kharcha_core::{Book, ChartData, IndexedTransaction, SummaryReport};
use kharcha_utils::{escape_html, format_amount};
use std::collections::HashMap;

/// Add Entry page - Entry form with default timestamp in the configured offset
pub async fn page_entry(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let book = state.book.read().await;
    let default_dt = book.default_entry_datetime();
    let symbol = escape_html(&state.config.display.currency_symbol);

    let inner_content = format!(
        r#"<div class='max-w-lg mx-auto'>
        <h2 class='text-2xl font-bold mb-4'>Add Entry</h2>
        <form id='entry-form' hx-post='/transactions' hx-target='#add-result' hx-swap='innerHTML' hx-indicator='#add-spinner'
            class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Date &amp; Time</label>
                <input type='datetime-local' name='dateTime' value='{}' class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Type</label>
                <select name='type' class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
                    <option value='Credit' selected>Credit</option>
                    <option value='Debit'>Debit</option>
                </select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Amount ({})</label>
                <input type='number' name='amount' step='0.01' min='0.01' placeholder='0.00' class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Remarks</label>
                <input type='text' name='remarks' placeholder='Optional remarks' class='w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <div class='flex items-center gap-3'>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Add Transaction</button>
                <div id='add-spinner' class='htmx-indicator'>
                    <div class='animate-spin rounded-full h-5 w-5 border-b-2 border-indigo-600'></div>
                </div>
            </div>
        </form>
        <div id='add-result' class='mt-4'></div>
    </div>"#,
        default_dt, symbol
    );

    axum::response::Html(crate::page_response(&headers, "Add Entry", "/", &inner_content))
}

/// All Transactions page - Stats cards plus the list container
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let book = state.book.read().await;
    let stats = book.stats();

    let period_start = stats.date_range_start.unwrap_or_else(|| "-".to_string());
    let period_end = stats.date_range_end.unwrap_or_else(|| "-".to_string());

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>All Transactions</h2>
            <button onclick='reloadBook()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200' title='Reload from store'>
                Reload
            </button>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-4 gap-3 mb-4'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Entries</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Credits</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100'><p class='text-xs text-red-600'>Debits</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-orange-50 p-3 rounded-lg border border-orange-100'><p class='text-xs text-orange-600'>Period</p><p class='text-sm font-medium truncate'>{} &ndash; {}</p></div>
        </div>
        <div id='transactions-content' hx-get='/transactions/list' hx-trigger='load'>
            <p class='text-gray-500 text-center py-12'>Loading...</p>
        </div>
        <script>
        function reloadBook() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        window.location.reload();
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        stats.total_transactions, stats.credit_count, stats.debit_count, period_start, period_end
    );

    axum::response::Html(crate::page_response(
        &headers,
        "All Transactions",
        "/transactions",
        &inner_content,
    ))
}

// ==================== Fragment Helpers ====================

/// Render a select element from (value, label) options with one selected
fn render_select(name: &str, options: &[(String, String)], selected: &str) -> String {
    let mut html = format!(
        "<select name='{}' class='px-2 py-1.5 text-sm border rounded-lg bg-white'>",
        name
    );
    for (value, label) in options {
        let selected_attr = if value == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            value, selected_attr, label
        ));
    }
    html.push_str("</select>");
    html
}

/// Render the filter bar, echoing the current selections
pub fn render_filter_bar(book: &Book, params: &HashMap<String, String>) -> String {
    let all = ("all".to_string(), "All".to_string());

    let mut month_options = vec![all.clone()];
    month_options.extend(book.month_options().into_iter().map(|o| (o.value, o.label)));
    let mut year_options = vec![all];
    year_options.extend(book.year_options().into_iter().map(|o| (o.value, o.label)));

    let selected_month = params.get("month").cloned().unwrap_or_else(|| "all".to_string());
    let selected_year = params.get("year").cloned().unwrap_or_else(|| "all".to_string());
    let from = escape_html(params.get("from").map(|s| s.as_str()).unwrap_or(""));
    let to = escape_html(params.get("to").map(|s| s.as_str()).unwrap_or(""));
    let query = escape_html(params.get("q").map(|s| s.as_str()).unwrap_or(""));

    format!(
        r#"<form id='filter-bar' class='bg-white rounded-xl shadow-sm p-4 mb-4 flex flex-wrap items-end gap-3'>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Month</label>
                {}
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Year</label>
                {}
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>From</label>
                <input type='date' name='from' value='{}' class='px-2 py-1.5 text-sm border rounded-lg'>
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>To</label>
                <input type='date' name='to' value='{}' class='px-2 py-1.5 text-sm border rounded-lg'>
            </div>
            <div class='flex-1 min-w-[10rem]'>
                <label class='block text-xs text-gray-500 mb-1'>Remarks</label>
                <input type='text' name='q' value='{}' placeholder='Search remarks...' class='w-full px-2 py-1.5 text-sm border rounded-lg'>
            </div>
            <button id='filter-apply' type='button' hx-get='/transactions/list' hx-include='#filter-bar' hx-target='#transactions-content' hx-swap='innerHTML' hx-indicator='#list-spinner'
                class='px-3 py-2 bg-indigo-600 text-white text-sm rounded-lg hover:bg-indigo-700'>Apply Filters</button>
            <button type='button' hx-get='/transactions/list?month=all&year=all' hx-target='#transactions-content' hx-swap='innerHTML' hx-indicator='#list-spinner'
                class='px-3 py-2 border text-sm rounded-lg hover:bg-gray-50'>Clear</button>
            <div id='list-spinner' class='htmx-indicator'>
                <div class='animate-spin rounded-full h-5 w-5 border-b-2 border-indigo-600'></div>
            </div>
        </form>"#,
        render_select("month", &month_options, &selected_month),
        render_select("year", &year_options, &selected_year),
        from,
        to,
        query
    )
}

/// Render the totals cards for the filtered set
pub fn render_summary_cards(summary: &SummaryReport) -> String {
    let symbol = escape_html(&summary.currency);
    let net_color = if summary.net_side == "Cr" {
        "text-green-700"
    } else {
        "text-red-700"
    };

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-4'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200'><p class='text-sm text-green-600'>Total Credit</p><p class='text-2xl font-bold text-green-700'>{}{}</p></div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200'><p class='text-sm text-red-600'>Total Debit</p><p class='text-2xl font-bold text-red-700'>{}{}</p></div>
            <div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>Net</p><p class='text-2xl font-bold {}'>{}{} {}</p></div>
        </div>"#,
        symbol, summary.total_credit, symbol, summary.total_debit, net_color, symbol, summary.net, summary.net_side
    )
}

/// Render the pie chart canvas and its setup script
pub fn render_chart(chart: &ChartData) -> String {
    let labels = serde_json::to_string(&chart.labels).unwrap_or_else(|_| "[]".to_string());
    let values = serde_json::to_string(&chart.datasets.first().map(|d| d.data.clone()).unwrap_or_default())
        .unwrap_or_else(|_| "[]".to_string());
    let colors: Vec<String> = chart
        .data_points
        .iter()
        .map(|dp| dp.color.clone().unwrap_or_else(|| "gray".to_string()))
        .collect();
    let colors = serde_json::to_string(&colors).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-4'>
            <h3 class='text-lg font-semibold mb-4'>{}</h3>
            <div class='flex justify-center'>
                <canvas id='pie-chart' width='250' height='250' class='max-w-[250px] max-h-[250px]'></canvas>
            </div>
            <script>
            (function() {{
                const canvas = document.getElementById('pie-chart');
                if (!canvas || typeof Chart === 'undefined') return;
                if (window.kharchaPie) {{ window.kharchaPie.destroy(); }}
                window.kharchaPie = new Chart(canvas.getContext('2d'), {{
                    type: 'pie',
                    data: {{ labels: {}, datasets: [{{ data: {}, backgroundColor: {}, hoverOffset: 20 }}] }},
                    options: {{ plugins: {{ legend: {{ position: 'bottom' }} }} }}
                }});
            }})();
            </script>
        </div>"#,
        escape_html(&chart.title),
        labels,
        values,
        colors
    )
}

/// Render the transaction table for the current page of the filtered set
pub fn render_table(items: &[IndexedTransaction], currency_symbol: &str, decimal_places: u32) -> String {
    let symbol = escape_html(currency_symbol);

    let mut html = String::from(
        "<div class='bg-white rounded-xl shadow-sm overflow-hidden'>\
         <table class='w-full text-sm'>\
         <thead class='bg-gray-50 text-left text-gray-500'>\
         <tr><th class='px-4 py-3'>Date &amp; Time</th><th class='px-4 py-3'>Type</th>\
         <th class='px-4 py-3'>Amount</th><th class='px-4 py-3'>Remarks</th>\
         <th class='px-4 py-3'></th></tr></thead><tbody>",
    );

    if items.is_empty() {
        html.push_str(
            "<tr><td colspan='5' class='px-4 py-8 text-center text-gray-500'>No transactions found</td></tr>",
        );
    } else {
        for item in items {
            let tx = &item.transaction;
            let badge_class = if tx.is_credit() {
                "bg-green-100 text-green-700"
            } else {
                "bg-red-100 text-red-700"
            };
            let remarks = if tx.remarks.is_empty() {
                "-".to_string()
            } else {
                escape_html(&tx.remarks)
            };

            html.push_str(&format!(
                r#"<tr class='border-t hover:bg-gray-50'>
                    <td class='px-4 py-3'>{}</td>
                    <td class='px-4 py-3'><span class='px-2 py-1 rounded text-xs font-medium {}'>{}</span></td>
                    <td class='px-4 py-3 font-medium'>{}{}</td>
                    <td class='px-4 py-3 text-gray-600'>{}</td>
                    <td class='px-4 py-3 text-right'>
                        <button hx-delete='/transactions/{}' hx-confirm='Are you sure you want to delete this transaction?' hx-target='#delete-result' hx-swap='innerHTML'
                            class='text-red-500 hover:text-red-700 text-xs'>Delete</button>
                    </td>
                </tr>"#,
                escape_html(&tx.display_datetime()),
                badge_class,
                tx.kind,
                symbol,
                format_amount(tx.amount, decimal_places),
                remarks,
                item.index
            ));
        }
    }

    html.push_str("</tbody></table></div>");
    html
}

/// Render pagination controls for the filtered set
pub fn render_pagination(total_count: usize, limit: usize, offset: usize, base_query: &str) -> String {
    let current_page = offset / limit + 1;
    let total_pages = (total_count + limit - 1) / limit;
    let total_pages = total_pages.max(1);

    let target = "#transactions-content";
    let page_url = |page_offset: usize| {
        format!("/transactions/list?{}&offset={}", base_query, page_offset)
    };

    format!(
        r#"<div class='mt-4 flex items-center justify-between flex-wrap gap-4'>
            <span class='text-sm text-gray-500'>{} records, page {} / {}</span>
            <div class='flex items-center gap-2'>
                <button {} onclick='htmx.ajax("GET", "{}", "{}")' class='px-3 py-1 border rounded hover:bg-gray-100'>First</button>
                <button {} onclick='htmx.ajax("GET", "{}", "{}")' class='px-3 py-1 border rounded hover:bg-gray-100'>Prev</button>
                <button {} onclick='htmx.ajax("GET", "{}", "{}")' class='px-3 py-1 border rounded hover:bg-gray-100'>Next</button>
                <button {} onclick='htmx.ajax("GET", "{}", "{}")' class='px-3 py-1 border rounded hover:bg-gray-100'>Last</button>
            </div>
        </div>
        <style>.disabled{{cursor:not-allowed;opacity:0.5;pointer-events:none}}</style>"#,
        total_count,
        current_page,
        total_pages,
        if current_page == 1 { "disabled" } else { "" },
        page_url(0),
        target,
        if current_page == 1 { "disabled" } else { "" },
        page_url(offset.saturating_sub(limit)),
        target,
        if current_page >= total_pages { "disabled" } else { "" },
        page_url(offset + limit),
        target,
        if current_page >= total_pages { "disabled" } else { "" },
        page_url((total_pages - 1) * limit),
        target
    )
}
