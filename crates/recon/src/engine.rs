use crate::classify::classify_residuals;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::fees::{extract_bank_fees, FeeDictionary};
use crate::matcher::match_amounts;
use crate::model::{MatchOutput, RawTable, ReconInput, ReconMeta, ReconResult};
use crate::normalize::{normalize_bank, normalize_books};

/// Run one reconciliation: normalize both tables, match by amount, classify
/// the residuals, extract bank fees. Pure over its inputs; every run owns
/// its own ledger copies and no state survives between runs.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let books = normalize_books(&input.books, &config.books.columns, config.positive_means);
    let bank = normalize_bank(
        &input.bank,
        &config.bank.columns,
        config.positive_means,
        &config.bank.file,
    )?;

    let MatchOutput { books_unmatched, bank_unmatched, matched_pairs, matched_cents } =
        match_amounts(books.records, bank);
    let mut buckets = classify_residuals(books_unmatched, bank_unmatched);

    let dict = FeeDictionary::new(&config.fees.dictionary);
    let bank_fees = extract_bank_fees(&mut buckets, &dict);
    let summary = compute_summary(matched_pairs, matched_cents, &buckets, &bank_fees);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            positive_means: config.positive_means,
        },
        summary,
        buckets,
        bank_fees,
        book_balance_cents: books.balance_cents,
    })
}

/// Parse CSV text into a `RawTable`. `header_row` skips report preambles
/// (accounting exports carry several banner rows before the real header);
/// rows above it are discarded.
pub fn load_csv_table(data: &str, header_row: usize) -> Result<RawTable, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut lines: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        lines.push(record.iter().map(|f| f.to_string()).collect());
    }

    if header_row >= lines.len() {
        return Err(ReconError::Io(format!(
            "header row {header_row} beyond end of input ({} rows)",
            lines.len()
        )));
    }

    let mut rest = lines.split_off(header_row);
    let headers = rest.remove(0);
    Ok(RawTable { headers, rows: rest })
}
