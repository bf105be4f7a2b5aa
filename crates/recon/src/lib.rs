//! `conciliar-recon` — bank reconciliation matching and classification engine.
//!
//! Pure engine crate: receives two pre-loaded transaction tables (accounting
//! books and a bank statement), returns classified results. No UI, upload
//! handling, or report styling.

pub mod classify;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod fees;
pub mod matcher;
pub mod model;
pub mod normalize;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{LedgerRecord, RawTable, ReconInput, ReconResult};
