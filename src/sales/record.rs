//! The typed record for one row of the sales dataset.

use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(purchase_date_format, Date, "[day]/[month]/[year]");

/// One sale from the remote dataset.
///
/// Field names follow the JSON keys of the remote endpoint, so the same
/// names are used as column headers when the sales are exported as CSV.
/// Decoding fails if a required field is missing or has the wrong type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// The product name.
    #[serde(rename = "Produto", default)]
    pub product: Option<String>,

    /// The product category.
    #[serde(rename = "Categoria do Produto")]
    pub category: String,

    /// The unit price in reais.
    #[serde(rename = "Preço")]
    pub price: f64,

    /// The shipping cost in reais.
    #[serde(rename = "Frete", default)]
    pub shipping: Option<f64>,

    /// The date of the purchase, formatted as `DD/MM/YYYY` in JSON.
    #[serde(rename = "Data da Compra", with = "purchase_date_format")]
    pub date: Date,

    /// The seller's name.
    #[serde(rename = "Vendedor")]
    pub seller: String,

    /// The place of purchase, a Brazilian state abbreviation.
    #[serde(rename = "Local da compra")]
    pub location: String,

    /// The customer rating of the purchase.
    #[serde(rename = "Avaliação da compra", default)]
    pub rating: Option<u8>,

    /// The payment method.
    #[serde(rename = "Tipo de pagamento", default)]
    pub payment_type: Option<String>,

    /// The number of installments the payment was split into.
    #[serde(rename = "Quantidade de parcelas", default)]
    pub installments: Option<u32>,

    /// The latitude of the place of purchase.
    #[serde(rename = "lat")]
    pub latitude: f64,

    /// The longitude of the place of purchase.
    #[serde(rename = "lon")]
    pub longitude: f64,
}
