use std::collections::{HashMap, VecDeque};

use crate::model::{LedgerRecord, MatchOutput};

/// Greedy one-to-one exact-amount matching with consumption.
///
/// Each books record, in original order, takes the earliest remaining bank
/// record of exactly equal amount; both disappear from the output. Matching
/// ignores dates and descriptions, and is deliberately not globally optimal:
/// the order-dependent pairing is part of the observable contract. The
/// amount index keeps the naive scan's tie-break (first remaining bank row
/// by original position) while staying linear.
pub fn match_amounts(books: Vec<LedgerRecord>, bank: Vec<LedgerRecord>) -> MatchOutput {
    let mut by_amount: HashMap<i64, VecDeque<usize>> = HashMap::new();
    for (idx, record) in bank.iter().enumerate() {
        by_amount.entry(record.amount_cents).or_default().push_back(idx);
    }

    let mut consumed = vec![false; bank.len()];
    let mut books_unmatched = Vec::new();
    let mut matched_pairs = 0;
    let mut matched_cents = 0i64;

    for record in books {
        // Queues are only ever popped from the front, so the front is always
        // the earliest unconsumed bank row for that amount.
        match by_amount.get_mut(&record.amount_cents).and_then(VecDeque::pop_front) {
            Some(bank_idx) => {
                consumed[bank_idx] = true;
                matched_pairs += 1;
                matched_cents += record.amount_cents;
            }
            None => books_unmatched.push(record),
        }
    }

    let bank_unmatched = bank
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !consumed[*idx])
        .map(|(_, record)| record)
        .collect();

    MatchOutput { books_unmatched, bank_unmatched, matched_pairs, matched_cents }
}
