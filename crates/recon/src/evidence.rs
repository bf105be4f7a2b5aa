use crate::model::{BucketStat, FeeLine, LedgerRecord, ReconSummary, ResidualBuckets};

fn stat(records: &[LedgerRecord]) -> BucketStat {
    BucketStat {
        rows: records.len(),
        total_cents: records.iter().map(|r| r.amount_cents).sum(),
    }
}

/// Compute summary statistics from the final buckets and fee lines.
pub fn compute_summary(
    matched_pairs: usize,
    matched_cents: i64,
    buckets: &ResidualBuckets,
    fees: &[FeeLine],
) -> ReconSummary {
    ReconSummary {
        matched_pairs,
        matched_cents,
        book_credits: stat(&buckets.book_credits),
        bank_credits: stat(&buckets.bank_credits),
        book_debits: stat(&buckets.book_debits),
        bank_debits: stat(&buckets.bank_debits),
        bank_fees: BucketStat {
            rows: fees.len(),
            total_cents: fees.iter().map(|f| f.amount_cents).sum(),
        },
    }
}
