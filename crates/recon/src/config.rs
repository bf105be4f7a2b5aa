use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::fees::DEFAULT_FEE_CONCEPTS;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    #[serde(default)]
    pub positive_means: PositiveMeans,
    pub books: SourceConfig,
    pub bank: SourceConfig,
    #[serde(default)]
    pub fees: FeeConfig,
}

// ---------------------------------------------------------------------------
// Sign convention
// ---------------------------------------------------------------------------

/// House polarity applied identically to both ledgers.
///
/// `Inflow` (the default): money entering the account is positive — books
/// amount = debit − credit, bank amount = deposits − charges (a bank-account
/// ledger entry is debited in the books when money arrives, so both sides
/// line up). `Outflow` negates both sides. Mixing polarities across ledgers
/// silently produces false mismatches, so the convention is a single
/// run-level setting rather than a per-source one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositiveMeans {
    Inflow,
    Outflow,
}

impl Default for PositiveMeans {
    fn default() -> Self {
        Self::Inflow
    }
}

impl PositiveMeans {
    pub fn sign(&self) -> i64 {
        match self {
            Self::Inflow => 1,
            Self::Outflow => -1,
        }
    }
}

impl std::fmt::Display for PositiveMeans {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inflow => write!(f, "inflow"),
            Self::Outflow => write!(f, "outflow"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    /// Zero-based row index of the header line. Accounting system exports
    /// carry several report-preamble rows before the real header.
    #[serde(default)]
    pub header_row: usize,
    #[serde(default)]
    pub columns: ColumnVariants,
}

// ---------------------------------------------------------------------------
// Column variants
// ---------------------------------------------------------------------------

/// Ordered header-substring variants per logical field, matched
/// case/accent-insensitively. The first variant with any hit wins, and
/// within a variant the first matching header wins. Fields a given source
/// does not use are ignored for that source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnVariants {
    pub date: Vec<String>,
    pub voucher: Vec<String>,
    pub third_party: Vec<String>,
    pub debit: Vec<String>,
    pub credit: Vec<String>,
    pub balance: Vec<String>,
    pub description: Vec<String>,
    pub amount: Vec<String>,
    pub charges: Vec<String>,
    pub deposits: Vec<String>,
}

fn to_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnVariants {
    fn default() -> Self {
        Self {
            date: to_vec(&["fecha", "fecha operacion", "dia"]),
            voucher: to_vec(&["comprobante"]),
            third_party: to_vec(&["tercero"]),
            debit: to_vec(&["debito"]),
            credit: to_vec(&["credito"]),
            balance: to_vec(&["saldo movimiento"]),
            description: to_vec(&[
                "descripcion",
                "descripcion del movimiento",
                "descripcion de la transaccion",
                "clase de movimiento",
                "concepto",
                "detalle",
                "narracion",
                "referencia",
            ]),
            amount: to_vec(&["valor", "monto", "valor original"]),
            charges: to_vec(&["cargos", "debitos"]),
            deposits: to_vec(&["abonos", "creditos"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Known bank-charge concept literals. Matching reduces each entry to its
/// first two normalized words; see [`crate::fees::FeeDictionary`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub dictionary: Vec<String>,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            dictionary: DEFAULT_FEE_CONCEPTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        for (source, cfg) in [("books", &self.books), ("bank", &self.bank)] {
            if cfg.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{source}: file must not be empty"
                )));
            }
        }

        // The bank side has no positional fallbacks, so it needs at least
        // one variant for each required field.
        let bank = &self.bank.columns;
        if bank.description.is_empty() {
            return Err(ReconError::ConfigValidation(
                "bank: description variants must not be empty".into(),
            ));
        }
        if bank.amount.is_empty() && (bank.charges.is_empty() || bank.deposits.is_empty()) {
            return Err(ReconError::ConfigValidation(
                "bank: amount variants (or charges + deposits) must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
