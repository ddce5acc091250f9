use anyhow::{bail, Result};
use portfolio_core::Holding;

/// Internal fields a CSV column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Ticker,
    Exchange,
    Currency,
    StartValue,
    EndValue,
    StartPrice,
    EndPrice,
    Dividends,
    Fees,
}

/// Fixed external header -> internal field mapping. The headers are the
/// business-facing names used by the spreadsheet export; spelling and case
/// must match exactly. Columns not listed here (withholding tax, imputation
/// credits, ADR fees, ...) are accepted and ignored.
const COLUMN_MAP: &[(&str, Field)] = &[
    ("Investment ticker symbol", Field::Ticker),
    ("Exchange", Field::Exchange),
    ("Currency", Field::Currency),
    ("Starting investment dollar value", Field::StartValue),
    ("Ending investment dollar value", Field::EndValue),
    ("Starting share price", Field::StartPrice),
    ("Ending share price", Field::EndPrice),
    ("Dividends and distributions", Field::Dividends),
    ("Transaction fees", Field::Fees),
];

fn field_for_header(header: &str) -> Option<Field> {
    COLUMN_MAP
        .iter()
        .find(|(name, _)| *name == header.trim())
        .map(|(_, field)| *field)
}

fn parse_number(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(0.0)
}

/// Parse an uploaded portfolio CSV into holdings.
///
/// Fields missing from a row default to 0 (numeric), "" (exchange) or "USD"
/// (currency). Rows without a ticker are dropped. A structurally malformed
/// file fails the whole parse; the caller leaves the store untouched in that
/// case.
pub fn parse_holdings(csv_data: &str) -> Result<Vec<Holding>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let fields: Vec<Option<Field>> = reader
        .headers()?
        .iter()
        .map(field_for_header)
        .collect();

    if !fields.contains(&Some(Field::Ticker)) {
        bail!("Missing required column: Investment ticker symbol");
    }

    let mut holdings = Vec::new();
    for result in reader.records() {
        let record = result?;

        let mut holding = Holding::new("");
        for (i, field) in fields.iter().enumerate() {
            let Some(field) = field else { continue };
            let cell = record.get(i).unwrap_or("");
            match field {
                Field::Ticker => holding.ticker = cell.trim().to_string(),
                Field::Exchange => holding.exchange = cell.trim().to_string(),
                Field::Currency => {
                    let currency = cell.trim();
                    if !currency.is_empty() {
                        holding.currency = currency.to_string();
                    }
                }
                Field::StartValue => holding.start_value = parse_number(cell),
                Field::EndValue => holding.end_value = parse_number(cell),
                Field::StartPrice => holding.start_price = parse_number(cell),
                Field::EndPrice => holding.end_price = parse_number(cell),
                Field::Dividends => holding.dividends = parse_number(cell),
                Field::Fees => holding.fees = parse_number(cell),
            }
        }

        if holding.ticker.is_empty() {
            continue;
        }

        holdings.push(holding);
    }

    Ok(holdings)
}
