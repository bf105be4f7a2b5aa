use crate::model::{LedgerRecord, ResidualBuckets};

/// Partition the residuals from each side by amount sign.
///
/// Book credits must be backed out of the book balance, book debits added
/// back, and symmetrically for the bank side; see
/// [`crate::model::ReconBucket::balance_effect`]. Zero-amount residuals
/// carry no balance information and are dropped from all four buckets.
pub fn classify_residuals(
    books_unmatched: Vec<LedgerRecord>,
    bank_unmatched: Vec<LedgerRecord>,
) -> ResidualBuckets {
    let mut buckets = ResidualBuckets::default();

    for record in books_unmatched {
        if record.amount_cents > 0 {
            buckets.book_credits.push(record);
        } else if record.amount_cents < 0 {
            buckets.book_debits.push(record);
        }
    }

    for record in bank_unmatched {
        if record.amount_cents > 0 {
            buckets.bank_credits.push(record);
        } else if record.amount_cents < 0 {
            buckets.bank_debits.push(record);
        }
    }

    buckets
}
