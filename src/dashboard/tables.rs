//! Table views for dashboard data display.
//!
//! Provides the per-seller summary shown on the sellers tab.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::SellerTotals,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
};

const TABLE_NUMBER_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";

/// Renders a table with the revenue and number of sales of every seller.
///
/// # Arguments
/// * `sellers` - Seller totals in the order they should be listed
///
/// # Returns
/// Maud markup containing the table, or nothing if there are no sellers.
pub(super) fn seller_table(sellers: &[SellerTotals]) -> Markup {
    if sellers.is_empty() {
        return html! {};
    }

    html! {
        div class="mt-4" {
            h3 class="text-xl font-semibold mb-4" { "Vendedores" }

            div class="overflow-x-auto rounded-lg shadow" {
                table
                    id="seller-table"
                    class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Vendedor" }
                            th scope="col" class=(TABLE_NUMBER_CELL_STYLE) { "Receita" }
                            th scope="col" class=(TABLE_NUMBER_CELL_STYLE) { "Vendas" }
                        }
                    }
                    tbody {
                        @for seller in sellers {
                            tr class=(TABLE_ROW_STYLE) {
                                th
                                    scope="row"
                                    class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                                {
                                    (seller.seller)
                                }
                                td class=(TABLE_NUMBER_CELL_STYLE) {
                                    (format_currency(seller.revenue))
                                }
                                td class=(TABLE_NUMBER_CELL_STYLE) {
                                    (seller.sales_count)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
