use std::collections::{BTreeSet, HashSet};

use crate::sales::Sale;

/// Keep only the sales made by one of `sellers`.
///
/// An empty `sellers` slice means no filter and returns `sales` unchanged.
/// The result may be empty.
pub fn filter_by_sellers(sales: Vec<Sale>, sellers: &[String]) -> Vec<Sale> {
    if sellers.is_empty() {
        return sales;
    }

    let selected: HashSet<&str> = sellers.iter().map(String::as_str).collect();

    sales
        .into_iter()
        .filter(|sale| selected.contains(sale.seller.as_str()))
        .collect()
}

/// The unique seller names in `sales`, sorted alphabetically.
pub fn distinct_sellers(sales: &[Sale]) -> Vec<String> {
    sales
        .iter()
        .map(|sale| sale.seller.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
