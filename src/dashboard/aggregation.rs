//! Sales aggregation for the dashboard charts and metrics.
//!
//! Every function here is a pure function of the filtered sales. Groups are
//! built in first-seen order and sorted with a stable sort, so ties keep
//! the order in which the groups first appear in the data.

use std::{collections::HashMap, hash::Hash};

use time::{Date, Month};

use crate::sales::Sale;

/// The quantity summed over a group of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Measure {
    /// The sum of the sale prices.
    Revenue,
    /// The number of sales.
    SalesCount,
}

impl Measure {
    /// The contribution of a single sale to the measure.
    fn of(self, sale: &Sale) -> f64 {
        match self {
            Measure::Revenue => sale.price,
            Measure::SalesCount => 1.0,
        }
    }
}

/// A measure summed over the sales in one place.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct LocationTotal {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

/// A measure summed over the sales in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyTotal {
    /// The last day of the month.
    pub month_end: Date,
    pub year: i32,
    pub month: Month,
    pub value: f64,
}

/// A measure summed over the sales in one product category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub category: String,
    pub value: f64,
}

/// The revenue and number of sales for one seller.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SellerTotals {
    pub seller: String,
    pub revenue: f64,
    pub sales_count: usize,
}

impl SellerTotals {
    pub fn value(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Revenue => self.revenue,
            Measure::SalesCount => self.sales_count as f64,
        }
    }
}

/// The sum of the prices of all `sales`, zero when there are none.
pub(super) fn total_revenue(sales: &[Sale]) -> f64 {
    // `Iterator::sum` of no floats is -0.0.
    sales.iter().fold(0.0, |total, sale| total + sale.price)
}

/// The number of sales.
pub(super) fn total_sales(sales: &[Sale]) -> usize {
    sales.len()
}

/// Groups `sales` by `key` and sums `measure` over each group.
///
/// # Returns
/// One entry per group in first-seen order, holding the first sale of the
/// group and the group total.
fn group_totals<'a, K, F>(sales: &'a [Sale], key: F, measure: Measure) -> Vec<(&'a Sale, f64)>
where
    K: Eq + Hash,
    F: Fn(&'a Sale) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(&Sale, f64)> = Vec::new();

    for sale in sales {
        let position = *positions.entry(key(sale)).or_insert_with(|| {
            groups.push((sale, 0.0));
            groups.len() - 1
        });
        groups[position].1 += measure.of(sale);
    }

    groups
}

/// Sums `measure` by place of purchase.
///
/// The coordinates of each place are taken from its first sale.
///
/// # Returns
/// Totals sorted from largest to smallest.
pub(super) fn totals_by_location(sales: &[Sale], measure: Measure) -> Vec<LocationTotal> {
    let mut totals: Vec<LocationTotal> =
        group_totals(sales, |sale| sale.location.as_str(), measure)
            .into_iter()
            .map(|(first, value)| LocationTotal {
                location: first.location.clone(),
                latitude: first.latitude,
                longitude: first.longitude,
                value,
            })
            .collect();

    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals
}

/// Sums `measure` by calendar month.
///
/// Sales are assigned to the month their date falls in, regardless of the
/// day. Only months with at least one sale are included.
///
/// # Returns
/// Totals in chronological order.
pub(super) fn totals_by_month(sales: &[Sale], measure: Measure) -> Vec<MonthlyTotal> {
    let mut totals: Vec<MonthlyTotal> =
        group_totals(sales, |sale| month_end(sale.date), measure)
            .into_iter()
            .map(|(first, value)| {
                let month_end = month_end(first.date);
                MonthlyTotal {
                    month_end,
                    year: month_end.year(),
                    month: month_end.month(),
                    value,
                }
            })
            .collect();

    totals.sort_by_key(|total| total.month_end);
    totals
}

/// Sums `measure` by product category.
///
/// # Returns
/// Totals sorted from largest to smallest.
pub(super) fn totals_by_category(sales: &[Sale], measure: Measure) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> =
        group_totals(sales, |sale| sale.category.as_str(), measure)
            .into_iter()
            .map(|(first, value)| CategoryTotal {
                category: first.category.clone(),
                value,
            })
            .collect();

    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals
}

/// Computes the revenue and number of sales of each seller in one pass.
///
/// # Returns
/// Totals sorted by seller name.
pub(super) fn totals_by_seller(sales: &[Sale]) -> Vec<SellerTotals> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<SellerTotals> = Vec::new();

    for sale in sales {
        let position = *positions.entry(sale.seller.as_str()).or_insert_with(|| {
            totals.push(SellerTotals {
                seller: sale.seller.clone(),
                revenue: 0.0,
                sales_count: 0,
            });
            totals.len() - 1
        });

        let seller_totals = &mut totals[position];
        seller_totals.revenue += sale.price;
        seller_totals.sales_count += 1;
    }

    totals.sort_by(|a, b| a.seller.cmp(&b.seller));
    totals
}

/// Selects the `n` sellers with the largest `measure`.
///
/// Fewer than `n` sellers are returned if there are not enough sellers.
///
/// # Returns
/// Seller totals sorted from largest to smallest.
pub(super) fn top_sellers(totals: &[SellerTotals], measure: Measure, n: usize) -> Vec<SellerTotals> {
    let mut ranked = totals.to_vec();
    ranked.sort_by(|a, b| b.value(measure).total_cmp(&a.value(measure)));
    ranked.truncate(n);
    ranked
}

/// The last day of the month `date` falls in.
fn month_end(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        month => (date.year(), month.next()),
    };

    Date::from_calendar_date(year, month, 1)
        .ok()
        .and_then(Date::previous_day)
        .unwrap_or(date)
}

/// Formats a month as a three-letter Portuguese abbreviation, e.g. "Fev".
pub(super) fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Fev",
        Month::March => "Mar",
        Month::April => "Abr",
        Month::May => "Mai",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Ago",
        Month::September => "Set",
        Month::October => "Out",
        Month::November => "Nov",
        Month::December => "Dez",
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        dashboard::{
            aggregation::{
                Measure, SellerTotals, month_end, month_label, top_sellers, total_revenue,
                total_sales, totals_by_category, totals_by_location, totals_by_month,
                totals_by_seller,
            },
            metrics::format_number,
        },
        sales::Sale,
        test_utils::test_sale,
    };

    fn test_sales() -> Vec<Sale> {
        vec![
            test_sale("Ana", "SP", "livros", 100.0, date!(2022 - 01 - 15)),
            test_sale("Bruno", "BA", "brinquedos", 50.0, date!(2022 - 01 - 31)),
            test_sale("Ana", "SP", "eletronicos", 300.0, date!(2022 - 02 - 01)),
            test_sale("Carla", "RJ", "livros", 25.0, date!(2023 - 02 - 10)),
            test_sale("Bruno", "BA", "livros", 75.0, date!(2023 - 02 - 28)),
        ]
    }

    #[test]
    fn totals_are_sum_and_count() {
        let sales = test_sales();

        assert_eq!(total_revenue(&sales), 550.0);
        assert_eq!(total_sales(&sales), 5);
    }

    #[test]
    fn totals_of_no_sales_are_zero() {
        assert_eq!(total_revenue(&[]), 0.0);
        assert!(total_revenue(&[]).is_sign_positive());
        assert_eq!(total_sales(&[]), 0);
    }

    #[test]
    fn revenue_of_no_sales_formats_without_sign() {
        assert_eq!(format_number(total_revenue(&[]), "R$"), "R$ 0.00 ");
    }

    #[test]
    fn location_revenue_is_sorted_descending() {
        let result = totals_by_location(&test_sales(), Measure::Revenue);

        let got: Vec<(&str, f64)> = result
            .iter()
            .map(|total| (total.location.as_str(), total.value))
            .collect();
        assert_eq!(got, vec![("SP", 400.0), ("BA", 125.0), ("RJ", 25.0)]);
    }

    #[test]
    fn location_count_is_sorted_descending() {
        let result = totals_by_location(&test_sales(), Measure::SalesCount);

        let got: Vec<(&str, f64)> = result
            .iter()
            .map(|total| (total.location.as_str(), total.value))
            .collect();
        assert_eq!(got, vec![("SP", 2.0), ("BA", 2.0), ("RJ", 1.0)]);
    }

    #[test]
    fn location_keeps_coordinates_of_first_sale() {
        let mut sales = test_sales();
        sales[2].latitude = 99.0;

        let result = totals_by_location(&sales, Measure::Revenue);

        let sp = result.iter().find(|total| total.location == "SP").unwrap();
        assert_eq!(sp.latitude, sales[0].latitude);
        assert_eq!(sp.longitude, sales[0].longitude);
    }

    #[test]
    fn month_groups_by_calendar_month_end() {
        let result = totals_by_month(&test_sales(), Measure::Revenue);

        let got: Vec<_> = result
            .iter()
            .map(|total| (total.month_end, total.value))
            .collect();
        assert_eq!(
            got,
            vec![
                (date!(2022 - 01 - 31), 150.0),
                (date!(2022 - 02 - 28), 300.0),
                (date!(2023 - 02 - 28), 100.0),
            ]
        );
    }

    #[test]
    fn month_keeps_year_and_month_separately() {
        let result = totals_by_month(&test_sales(), Measure::SalesCount);

        assert_eq!(result[0].year, 2022);
        assert_eq!(result[0].month, Month::January);
        assert_eq!(result[0].value, 2.0);
        assert_eq!(result[2].year, 2023);
        assert_eq!(result[2].month, Month::February);
    }

    #[test]
    fn month_is_chronological_regardless_of_input_order() {
        let mut sales = test_sales();
        sales.reverse();

        let result = totals_by_month(&sales, Measure::Revenue);

        let months: Vec<_> = result.iter().map(|total| total.month_end).collect();
        let mut sorted = months.clone();
        sorted.sort();
        assert_eq!(months, sorted);
    }

    #[test]
    fn month_end_handles_leap_years() {
        assert_eq!(month_end(date!(2024 - 02 - 01)), date!(2024 - 02 - 29));
        assert_eq!(month_end(date!(2023 - 02 - 14)), date!(2023 - 02 - 28));
        assert_eq!(month_end(date!(2022 - 12 - 31)), date!(2022 - 12 - 31));
    }

    #[test]
    fn category_revenue_is_sorted_descending() {
        let result = totals_by_category(&test_sales(), Measure::Revenue);

        let got: Vec<(&str, f64)> = result
            .iter()
            .map(|total| (total.category.as_str(), total.value))
            .collect();
        assert_eq!(
            got,
            vec![("eletronicos", 300.0), ("livros", 200.0), ("brinquedos", 50.0)]
        );
    }

    #[test]
    fn category_count_counts_rows() {
        let result = totals_by_category(&test_sales(), Measure::SalesCount);

        assert_eq!(result[0].category, "livros");
        assert_eq!(result[0].value, 3.0);
    }

    #[test]
    fn seller_totals_have_sum_and_count() {
        let result = totals_by_seller(&test_sales());

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].seller, "Ana");
        assert_eq!(result[0].revenue, 400.0);
        assert_eq!(result[0].sales_count, 2);
        assert_eq!(result[1].seller, "Bruno");
        assert_eq!(result[1].revenue, 125.0);
        assert_eq!(result[1].sales_count, 2);
    }

    #[test]
    fn top_sellers_by_revenue_and_by_count_are_independent() {
        let sales = vec![
            test_sale("Ana", "SP", "livros", 1000.0, date!(2022 - 01 - 15)),
            test_sale("Bruno", "BA", "livros", 10.0, date!(2022 - 01 - 15)),
            test_sale("Bruno", "BA", "livros", 10.0, date!(2022 - 01 - 16)),
            test_sale("Bruno", "BA", "livros", 10.0, date!(2022 - 01 - 17)),
            test_sale("Carla", "RJ", "livros", 500.0, date!(2022 - 01 - 15)),
        ];
        let totals = totals_by_seller(&sales);

        let by_revenue = top_sellers(&totals, Measure::Revenue, 2);
        let by_count = top_sellers(&totals, Measure::SalesCount, 2);

        let names = |sellers: Vec<SellerTotals>| -> Vec<String> {
            sellers.into_iter().map(|totals| totals.seller).collect()
        };
        assert_eq!(names(by_revenue), vec!["Ana", "Carla"]);
        assert_eq!(names(by_count), vec!["Bruno", "Ana"]);
    }

    #[test]
    fn top_sellers_returns_all_when_n_exceeds_sellers() {
        let totals = totals_by_seller(&test_sales());

        let result = top_sellers(&totals, Measure::Revenue, 5);

        assert_eq!(result.len(), 3);
        assert!(
            result
                .windows(2)
                .all(|pair| pair[0].revenue >= pair[1].revenue)
        );
    }

    #[test]
    fn no_sales_yield_empty_tables() {
        assert!(totals_by_location(&[], Measure::Revenue).is_empty());
        assert!(totals_by_month(&[], Measure::SalesCount).is_empty());
        assert!(totals_by_category(&[], Measure::Revenue).is_empty());
        assert!(totals_by_seller(&[]).is_empty());
        assert!(top_sellers(&[], Measure::Revenue, 5).is_empty());
    }

    #[test]
    fn group_totals_add_up_to_overall_totals() {
        let sales = test_sales();
        let revenue = total_revenue(&sales);
        let count = total_sales(&sales) as f64;

        let sum = |values: Vec<f64>| values.into_iter().sum::<f64>();

        for (measure, want) in [(Measure::Revenue, revenue), (Measure::SalesCount, count)] {
            let by_location = sum(totals_by_location(&sales, measure)
                .into_iter()
                .map(|total| total.value)
                .collect());
            let by_month = sum(totals_by_month(&sales, measure)
                .into_iter()
                .map(|total| total.value)
                .collect());
            let by_category = sum(totals_by_category(&sales, measure)
                .into_iter()
                .map(|total| total.value)
                .collect());
            let by_seller = sum(totals_by_seller(&sales)
                .iter()
                .map(|totals| totals.value(measure))
                .collect());

            assert_eq!(by_location, want);
            assert_eq!(by_month, want);
            assert_eq!(by_category, want);
            assert_eq!(by_seller, want);
        }
    }

    #[test]
    fn month_labels_are_portuguese_abbreviations() {
        assert_eq!(month_label(Month::February), "Fev");
        assert_eq!(month_label(Month::December), "Dez");
    }
}
