//! CSV export of the filtered sales.

use crate::{Error, sales::Sale};

/// The column headers, in the order of the fields of [Sale].
///
/// Written explicitly so that an export with no sales still has a header.
const CSV_HEADERS: [&str; 12] = [
    "Produto",
    "Categoria do Produto",
    "Preço",
    "Frete",
    "Data da Compra",
    "Vendedor",
    "Local da compra",
    "Avaliação da compra",
    "Tipo de pagamento",
    "Quantidade de parcelas",
    "lat",
    "lon",
];

/// Writes `sales` as CSV with the same column names as the remote dataset.
///
/// # Errors
/// Returns [Error::CsvExport] if a sale cannot be serialized.
pub(super) fn sales_to_csv(sales: &[Sale]) -> Result<String, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for sale in sales {
        writer.serialize(sale)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvExport(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvExport(error.to_string()))
}
