//! End-to-end reconciliation runs over CSV fixtures.

use conciliar_recon::classify::classify_residuals;
use conciliar_recon::engine::load_csv_table;
use conciliar_recon::matcher::match_amounts;
use conciliar_recon::model::LedgerRecord;
use conciliar_recon::{run, ReconConfig, ReconInput};

const CONFIG: &str = r#"
name = "Integration"

[books]
file = "auxiliar.csv"

[bank]
file = "extracto.csv"
"#;

fn run_csv(books_csv: &str, bank_csv: &str) -> conciliar_recon::ReconResult {
    let config = ReconConfig::from_toml(CONFIG).unwrap();
    let input = ReconInput {
        books: load_csv_table(books_csv, 0).unwrap(),
        bank: load_csv_table(bank_csv, 0).unwrap(),
    };
    run(&config, &input).unwrap()
}

fn rec(cents: i64) -> LedgerRecord {
    LedgerRecord { date: None, description: "r".into(), amount_cents: cents }
}

// ---------------------------------------------------------------------------
// Matching scenarios
// ---------------------------------------------------------------------------

#[test]
fn credit_matches_debit_residual_stays() {
    // books [100, -50] vs bank [100]: only the -50 is left, on the book side.
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,100,0\n\
         02/03/2024,CE-2,B,0,50\n",
        "fecha,descripcion,valor\n\
         01/03/2024,CONSIGNACION,100\n",
    );
    assert_eq!(result.summary.matched_pairs, 1);
    assert_eq!(result.buckets.book_debits.len(), 1);
    assert_eq!(result.buckets.book_debits[0].amount_cents, -5_000);
    assert_eq!(result.buckets.bank_credits.len(), 0);
    assert_eq!(result.buckets.bank_debits.len(), 0);
    assert_eq!(result.buckets.book_credits.len(), 0);
}

#[test]
fn duplicate_amounts_greedy_first_wins() {
    // books [200, 200] vs bank [200]: exactly one 200 stays unmatched.
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,200,0\n\
         02/03/2024,CE-2,B,200,0\n",
        "fecha,descripcion,valor\n\
         01/03/2024,CONSIGNACION,200\n",
    );
    assert_eq!(result.summary.matched_pairs, 1);
    assert_eq!(result.buckets.book_credits.len(), 1);
    // The second books row is the survivor.
    assert_eq!(result.buckets.book_credits[0].description, "ce-2 b");
    assert!(result.buckets.bank_credits.is_empty());
}

#[test]
fn disjoint_amounts_everything_residual() {
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,11,0\n\
         02/03/2024,CE-2,B,0,22\n",
        "fecha,descripcion,valor\n\
         01/03/2024,PAGO UNO,33\n\
         02/03/2024,PAGO DOS,-44\n",
    );
    assert_eq!(result.summary.matched_pairs, 0);
    assert_eq!(result.buckets.total_rows(), 4);
}

#[test]
fn unparseable_date_still_matches() {
    // 31/02/2024 is not a calendar date; the row keeps a null date but its
    // amount still participates in matching.
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,500,0\n",
        "fecha,descripcion,valor\n\
         31/02/2024,CONSIGNACION,500\n",
    );
    assert_eq!(result.summary.matched_pairs, 1);
    assert_eq!(result.buckets.total_rows(), 0);
}

#[test]
fn fee_row_extracted_and_aggregated() {
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,100,0\n",
        "fecha,descripcion,valor\n\
         01/03/2024,CONSIGNACION ACME,100\n\
         02/03/2024,GRAVAMEN A LOS MOVIMIENTOS FINANCIEROS 123456,-50\n\
         03/03/2024,GRAVAMEN A LOS MOVIMIENTOS FINANCIEROS 123456,-30\n",
    );
    assert!(result.buckets.bank_debits.is_empty());
    assert_eq!(result.bank_fees.len(), 1);
    assert_eq!(
        result.bank_fees[0].description,
        "gravamen a los movimientos financieros 123456"
    );
    assert_eq!(result.bank_fees[0].amount_cents, -8_000);
}

#[test]
fn fee_lines_alphabetical() {
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n",
        "fecha,descripcion,valor\n\
         01/03/2024,IVA COMISIONES,-19\n\
         02/03/2024,ABONO INTERESES AHORROS,3\n\
         03/03/2024,CARGO IVA,-10\n",
    );
    let descs: Vec<_> = result.bank_fees.iter().map(|f| f.description.as_str()).collect();
    assert_eq!(descs, vec!["abono intereses ahorros", "cargo iva", "iva comisiones"]);
}

// ---------------------------------------------------------------------------
// Conservation / determinism / idempotence
// ---------------------------------------------------------------------------

#[test]
fn matching_conserves_book_totals() {
    let books: Vec<LedgerRecord> =
        [100, -50, 100, 7, 0, -3].iter().map(|&c| rec(c)).collect();
    let bank: Vec<LedgerRecord> = [100, 7, 9, -3, -3].iter().map(|&c| rec(c)).collect();
    let books_total: i64 = books.iter().map(|r| r.amount_cents).sum();

    let out = match_amounts(books, bank);
    let residual: i64 = out.books_unmatched.iter().map(|r| r.amount_cents).sum();
    assert_eq!(residual + out.matched_cents, books_total);
}

#[test]
fn repeated_runs_identical() {
    let books_csv = "fecha,comprobante,tercero,debito,credito\n\
                     01/03/2024,CE-1,A,100,0\n\
                     01/03/2024,CE-2,B,100,0\n\
                     02/03/2024,CE-3,C,0,75\n";
    let bank_csv = "fecha,descripcion,valor\n\
                    01/03/2024,PAGO,100\n\
                    02/03/2024,OTRO PAGO,100\n";
    let first = run_csv(books_csv, bank_csv);
    let second = run_csv(books_csv, bank_csv);
    assert_eq!(
        serde_json::to_value(&first.buckets).unwrap(),
        serde_json::to_value(&second.buckets).unwrap()
    );
    assert_eq!(first.summary.matched_pairs, second.summary.matched_pairs);
}

#[test]
fn classification_idempotent_over_own_output() {
    let books: Vec<LedgerRecord> = [10, -20, 30].iter().map(|&c| rec(c)).collect();
    let bank: Vec<LedgerRecord> = [-5, 15].iter().map(|&c| rec(c)).collect();
    let first = classify_residuals(books, bank);

    let again = classify_residuals(
        first.book_credits.iter().chain(first.book_debits.iter()).cloned().collect(),
        first.bank_credits.iter().chain(first.bank_debits.iter()).cloned().collect(),
    );
    assert_eq!(again.book_credits, first.book_credits);
    assert_eq!(again.book_debits, first.book_debits);
    assert_eq!(again.bank_credits, first.bank_credits);
    assert_eq!(again.bank_debits, first.bank_debits);
}

#[test]
fn zero_rows_never_reach_buckets() {
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,0,0\n\
         02/03/2024,CE-2,B,40,0\n",
        "fecha,descripcion,valor\n\
         01/03/2024,NADA,0\n\
         02/03/2024,NADA DOS,0\n",
    );
    // The books zero matches one bank zero; the spare bank zero classifies
    // nowhere. Only the 40 survives as a residual.
    assert!(result.buckets.iter_all().all(|r| r.amount_cents != 0));
    assert_eq!(result.buckets.total_rows(), 1);
}

// ---------------------------------------------------------------------------
// Source quirks
// ---------------------------------------------------------------------------

#[test]
fn preamble_and_footer_report() {
    // Shape of a real "movimiento auxiliar" export: banner rows above the
    // header and totals rows below the movements.
    let books_csv = "\
MOVIMIENTO AUXILIAR POR CUENTA CONTABLE
EMPRESA DEMO SAS
,
Fecha,Comprobante,Tercero,Saldo movimiento,Débito,Crédito
01/03/2024,CE-1,ACME,1000,1000,0
02/03/2024,CE-2,BETA,800,0,200
,TOTALES,,texto,1000,200
";
    let config = ReconConfig::from_toml(
        "name = \"p\"\n[books]\nfile = \"a.csv\"\nheader_row = 3\n[bank]\nfile = \"b.csv\"\n",
    )
    .unwrap();
    let input = ReconInput {
        books: load_csv_table(books_csv, 3).unwrap(),
        bank: load_csv_table("fecha,descripcion,valor\n01/03/2024,PAGO,1000\n", 0).unwrap(),
    };
    let result = run(&config, &input).unwrap();

    // Footer truncated, balance read from the running-balance column.
    assert_eq!(result.book_balance_cents, 80_000);
    assert_eq!(result.summary.matched_pairs, 1);
    assert_eq!(result.buckets.book_debits.len(), 1);
    assert_eq!(result.buckets.book_debits[0].amount_cents, -20_000);
}

#[test]
fn bank_with_charges_and_deposits() {
    let result = run_csv(
        "fecha,comprobante,tercero,debito,credito\n\
         01/03/2024,CE-1,A,0,300\n",
        "fecha,clase de movimiento,cargos,abonos\n\
         01/03/2024,RETIRO CAJERO,300,\n\
         02/03/2024,CONSIGNACION,,900\n",
    );
    // Books -300 matches the bank charge (deposits − charges = -300).
    assert_eq!(result.summary.matched_pairs, 1);
    assert_eq!(result.buckets.bank_credits.len(), 1);
    assert_eq!(result.buckets.bank_credits[0].amount_cents, 90_000);
}

#[test]
fn missing_bank_description_fails_with_file_identity() {
    let config = ReconConfig::from_toml(CONFIG).unwrap();
    let input = ReconInput {
        books: load_csv_table("fecha,comprobante,tercero,debito,credito\n", 0).unwrap(),
        bank: load_csv_table("fecha,valor\n01/03/2024,100\n", 0).unwrap(),
    };
    let err = run(&config, &input).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("extracto.csv"), "error should name the file: {msg}");
    assert!(msg.contains("description"));
}

#[test]
fn outflow_polarity_still_reconciles() {
    let config = ReconConfig::from_toml(&format!("{CONFIG}\npositive_means = \"outflow\"\n"))
        .unwrap();
    let input = ReconInput {
        books: load_csv_table(
            "fecha,comprobante,tercero,debito,credito\n01/03/2024,CE-1,A,100,0\n",
            0,
        )
        .unwrap(),
        bank: load_csv_table("fecha,descripcion,valor\n01/03/2024,PAGO,100\n", 0).unwrap(),
    };
    let result = run(&config, &input).unwrap();
    // Both sides flip together, so the pair still matches at -100.
    assert_eq!(result.summary.matched_pairs, 1);
    assert_eq!(result.summary.matched_cents, -10_000);
}
