//! Headline metrics shown above the charts.

use maud::{Markup, html};

/// Formats `value` with a unit label, dividing by a thousand at most twice.
///
/// A non-empty `prefix` is separated from the number by a space, e.g.
/// `format_number(5.0, "R$")` gives `"R$ 5.00 "` and
/// `format_number(1_500_000.0, "")` gives `"1.50 milhões"`.
pub(super) fn format_number(value: f64, prefix: &str) -> String {
    let mut value = value;

    for unit in ["", "mil"] {
        if value < 1000.0 {
            return join_parts(prefix, value, unit);
        }
        value /= 1000.0;
    }

    join_parts(prefix, value, "milhões")
}

fn join_parts(prefix: &str, value: f64, unit: &str) -> String {
    if prefix.is_empty() {
        format!("{value:.2} {unit}")
    } else {
        format!("{prefix} {value:.2} {unit}")
    }
}

/// Renders the total revenue as a card.
pub(super) fn revenue_metric(revenue: f64) -> Markup {
    metric_card("Receita", &format_number(revenue, "R$"))
}

/// Renders the total number of sales as a card.
pub(super) fn sales_count_metric(sales_count: usize) -> Markup {
    metric_card("Total de vendas", &format_number(sales_count as f64, ""))
}

fn metric_card(label: &str, value: &str) -> Markup {
    html! {
        dl
            class="mb-4 bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            dt class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            dd class="text-3xl font-bold text-gray-900 dark:text-white" { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::{
        dashboard::metrics::{format_number, revenue_metric, sales_count_metric},
        test_utils::{assert_valid_html, select_text},
    };

    #[test]
    fn formats_small_numbers_without_unit() {
        assert_eq!(format_number(999.99, ""), "999.99 ");
        assert_eq!(format_number(0.0, ""), "0.00 ");
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_number(1000.0, ""), "1.00 mil");
        assert_eq!(format_number(25_300.0, ""), "25.30 mil");
    }

    #[test]
    fn formats_millions() {
        assert_eq!(format_number(1_500_000.0, ""), "1.50 milhões");
    }

    #[test]
    fn divides_at_most_twice() {
        assert_eq!(format_number(2_000_000_000.0, ""), "2000.00 milhões");
    }

    #[test]
    fn prefix_is_followed_by_space() {
        assert_eq!(format_number(5.0, "R$"), "R$ 5.00 ");
        assert_eq!(format_number(1_234.0, "R$"), "R$ 1.23 mil");
    }

    #[test]
    fn renders_revenue_card() {
        let html = Html::parse_fragment(&revenue_metric(1_500.0).into_string());

        assert_valid_html(&html);
        assert_eq!(select_text(&html, "dt"), "Receita");
        assert_eq!(select_text(&html, "dd"), "R$ 1.50 mil");
    }

    #[test]
    fn renders_sales_count_card() {
        let html = Html::parse_fragment(&sales_count_metric(12).into_string());

        assert_valid_html(&html);
        assert_eq!(select_text(&html, "dt"), "Total de vendas");
        assert_eq!(select_text(&html, "dd"), "12.00");
    }
}
