use chrono::NaiveDate;
use serde::Serialize;

use crate::config::PositiveMeans;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A raw tabular dataset as handed over by the upload/parsing layer.
/// Cells are untyped strings; the normalizer owns all interpretation.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Pre-loaded input tables for one reconciliation run. Each run owns its
/// copies; the engine keeps no state between runs.
#[derive(Debug)]
pub struct ReconInput {
    pub books: RawTable,
    pub bank: RawTable,
}

/// A single normalized transaction from either ledger.
///
/// `date` is `None` when the source cell was absent or unparseable; such
/// rows still participate in amount matching. `description` is lowercased,
/// accent-stripped and whitespace-collapsed. The amount sign follows the
/// run's [`PositiveMeans`] convention, identical across both ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRecord {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount_cents: i64,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Residuals left after greedy exact-amount matching. Matched pairs are
/// consumed, not retained; only their count and cent total survive.
#[derive(Debug)]
pub struct MatchOutput {
    pub books_unmatched: Vec<LedgerRecord>,
    pub bank_unmatched: Vec<LedgerRecord>,
    pub matched_pairs: usize,
    pub matched_cents: i64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconBucket {
    BookCreditsOnly,
    BankCreditsOnly,
    BookDebitsOnly,
    BankDebitsOnly,
    BankFees,
}

impl std::fmt::Display for ReconBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookCreditsOnly => write!(f, "book_credits_only"),
            Self::BankCreditsOnly => write!(f, "bank_credits_only"),
            Self::BookDebitsOnly => write!(f, "book_debits_only"),
            Self::BankDebitsOnly => write!(f, "bank_debits_only"),
            Self::BankFees => write!(f, "bank_fees"),
        }
    }
}

/// Whether a bucket's subtotal is added to or subtracted from the book
/// balance when projecting the statement balance. Fixed double-entry
/// convention, not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceEffect {
    Add,
    Subtract,
}

impl ReconBucket {
    pub fn balance_effect(&self) -> BalanceEffect {
        match self {
            Self::BookCreditsOnly => BalanceEffect::Subtract,
            Self::BankCreditsOnly => BalanceEffect::Add,
            Self::BookDebitsOnly => BalanceEffect::Add,
            Self::BankDebitsOnly => BalanceEffect::Subtract,
            Self::BankFees => BalanceEffect::Subtract,
        }
    }

    /// Section title used by report assemblers.
    pub fn title(&self) -> &'static str {
        match self {
            Self::BookCreditsOnly => "Credits in books not on statement (less)",
            Self::BankCreditsOnly => "Credits on statement not in books (plus)",
            Self::BookDebitsOnly => "Debits in books not on statement (plus)",
            Self::BankDebitsOnly => "Debits on statement not in books (less)",
            Self::BankFees => "Bank income and expense (less)",
        }
    }
}

/// The four sign-classified residual buckets. Row order inside each bucket
/// is the original ledger order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResidualBuckets {
    pub book_credits: Vec<LedgerRecord>,
    pub bank_credits: Vec<LedgerRecord>,
    pub book_debits: Vec<LedgerRecord>,
    pub bank_debits: Vec<LedgerRecord>,
}

impl ResidualBuckets {
    pub fn iter_all(&self) -> impl Iterator<Item = &LedgerRecord> {
        self.book_credits
            .iter()
            .chain(self.bank_credits.iter())
            .chain(self.book_debits.iter())
            .chain(self.bank_debits.iter())
    }

    pub fn total_rows(&self) -> usize {
        self.book_credits.len()
            + self.bank_credits.len()
            + self.book_debits.len()
            + self.bank_debits.len()
    }
}

// ---------------------------------------------------------------------------
// Fee extraction
// ---------------------------------------------------------------------------

/// One aggregated bank fee/interest line: all extracted records sharing the
/// same normalized description, amounts summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeLine {
    pub description: String,
    pub amount_cents: i64,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BucketStat {
    pub rows: usize,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub matched_pairs: usize,
    pub matched_cents: i64,
    pub book_credits: BucketStat,
    pub bank_credits: BucketStat,
    pub book_debits: BucketStat,
    pub bank_debits: BucketStat,
    pub bank_fees: BucketStat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub positive_means: PositiveMeans,
}

/// The full result document handed to report assemblers: the four residual
/// buckets, the aggregated fee lines (alphabetical by description), and the
/// closing book balance.
#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub buckets: ResidualBuckets,
    pub bank_fees: Vec<FeeLine>,
    pub book_balance_cents: i64,
}
