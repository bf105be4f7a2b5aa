use crate::config::{ColumnVariants, PositiveMeans};
use crate::dates::parse_date;
use crate::error::ReconError;
use crate::model::{LedgerRecord, RawTable};

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Fold the accented characters the Spanish-language source systems emit.
pub fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'Á' | 'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Canonical text shape used for headers, descriptions and the fee
/// dictionary: trimmed, lowercased, accent-stripped, inner whitespace
/// collapsed to single spaces.
pub fn normalize_text(s: &str) -> String {
    strip_accents(s)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Resolve a logical field against cleaned headers. Variant order is the
/// priority order; within one variant the leftmost matching header wins.
/// Matching is substring containment, so "fecha" hits "fecha operacion".
fn resolve_column(headers: &[String], variants: &[String]) -> Option<usize> {
    for variant in variants {
        let needle = normalize_text(variant);
        if needle.is_empty() {
            continue;
        }
        if let Some(idx) = headers.iter().position(|h| h.contains(&needle)) {
            return Some(idx);
        }
    }
    None
}

fn cleaned_headers(table: &RawTable) -> Vec<String> {
    table.headers.iter().map(|h| normalize_text(h)).collect()
}

fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Parse a money cell into integer cents. `None` when not numeric.
/// Tolerates a currency sign, blanks and thousands commas.
pub fn parse_amount_cents(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value * 100.0).round() as i64)
}

/// Unparseable money cells coerce to zero cents so a bad cell never drops
/// the row.
pub fn coerce_amount_cents(raw: &str) -> i64 {
    parse_amount_cents(raw).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Books ledger
// ---------------------------------------------------------------------------

/// Normalized accounting extract plus the closing balance pulled from its
/// running-balance column (or summed from the movements when absent).
#[derive(Debug)]
pub struct BooksExtract {
    pub records: Vec<LedgerRecord>,
    pub balance_cents: i64,
}

/// Build the books ledger from the "movimiento auxiliar" extract.
///
/// Every field has a positional fallback (the report layout is stable even
/// when headers are renamed), so this side never fails column resolution:
/// voucher falls back to the first column, third party to the second, debit
/// and credit to the last two. The description is the voucher and
/// third-party cells joined. Rows positioned after the last row bearing the
/// maximum parseable date are summary/footer lines and are discarded;
/// undated rows before that point are kept.
pub fn normalize_books(
    table: &RawTable,
    columns: &ColumnVariants,
    positive_means: PositiveMeans,
) -> BooksExtract {
    let headers = cleaned_headers(table);
    let width = headers.len();

    let date_idx = resolve_column(&headers, &columns.date);
    let voucher_idx = resolve_column(&headers, &columns.voucher).unwrap_or(0);
    let third_idx = resolve_column(&headers, &columns.third_party).unwrap_or(1);
    let debit_idx = resolve_column(&headers, &columns.debit).unwrap_or(width.saturating_sub(2));
    let credit_idx = resolve_column(&headers, &columns.credit).unwrap_or(width.saturating_sub(1));
    let sign = positive_means.sign();

    let mut records: Vec<LedgerRecord> = table
        .rows
        .iter()
        .map(|row| {
            let date = date_idx.and_then(|i| parse_date(cell(row, i)));
            let description = normalize_text(&format!(
                "{} {}",
                cell(row, voucher_idx),
                cell(row, third_idx)
            ));
            let amount_cents =
                sign * (coerce_amount_cents(cell(row, debit_idx))
                    - coerce_amount_cents(cell(row, credit_idx)));
            LedgerRecord { date, description, amount_cents }
        })
        .collect();

    if let Some(cutoff) = truncation_point(&records) {
        records.truncate(cutoff + 1);
    }

    let balance_cents = book_balance(table, &headers, columns, &records);

    BooksExtract { records, balance_cents }
}

/// Index of the last row carrying the maximum parseable date, or `None`
/// when no row has a date (no truncation then).
fn truncation_point(records: &[LedgerRecord]) -> Option<usize> {
    let max_date = records.iter().filter_map(|r| r.date).max()?;
    records
        .iter()
        .rposition(|r| r.date == Some(max_date))
}

/// Closing balance: the last parseable value in the running-balance column
/// of the raw table, falling back to the sum of the normalized movements.
fn book_balance(
    table: &RawTable,
    headers: &[String],
    columns: &ColumnVariants,
    records: &[LedgerRecord],
) -> i64 {
    if let Some(idx) = resolve_column(headers, &columns.balance) {
        let last = table
            .rows
            .iter()
            .rev()
            .find_map(|row| parse_amount_cents(cell(row, idx)));
        if let Some(balance) = last {
            return balance;
        }
    }
    records.iter().map(|r| r.amount_cents).sum()
}

// ---------------------------------------------------------------------------
// Bank ledger
// ---------------------------------------------------------------------------

/// Build the bank ledger from the statement. Description and an amount
/// source (single signed column, or charges + deposits combined as
/// deposits − charges) are required; the date column is optional and
/// missing dates only exclude rows from date-dependent steps.
pub fn normalize_bank(
    table: &RawTable,
    columns: &ColumnVariants,
    positive_means: PositiveMeans,
    source: &str,
) -> Result<Vec<LedgerRecord>, ReconError> {
    let headers = cleaned_headers(table);

    let desc_idx = resolve_column(&headers, &columns.description).ok_or_else(|| {
        ReconError::MissingColumn { source: source.into(), field: "description".into() }
    })?;
    let date_idx = resolve_column(&headers, &columns.date);

    let amount_idx = resolve_column(&headers, &columns.amount);
    let split_idx = match amount_idx {
        Some(_) => None,
        None => {
            let charges = resolve_column(&headers, &columns.charges);
            let deposits = resolve_column(&headers, &columns.deposits);
            match (charges, deposits) {
                (Some(c), Some(d)) => Some((c, d)),
                _ => {
                    return Err(ReconError::MissingColumn {
                        source: source.into(),
                        field: "amount (or charges + deposits)".into(),
                    })
                }
            }
        }
    };
    let sign = positive_means.sign();

    let records = table
        .rows
        .iter()
        .map(|row| {
            let date = date_idx.and_then(|i| parse_date(cell(row, i)));
            let description = normalize_text(cell(row, desc_idx));
            let amount_cents = sign
                * match (amount_idx, split_idx) {
                    (Some(i), _) => coerce_amount_cents(cell(row, i)),
                    (None, Some((c, d))) => {
                        coerce_amount_cents(cell(row, d)) - coerce_amount_cents(cell(row, c))
                    }
                    (None, None) => unreachable!("amount source resolved above"),
                };
            LedgerRecord { date, description, amount_cents }
        })
        .collect();

    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
