use std::collections::BTreeMap;

use crate::model::{FeeLine, LedgerRecord, ResidualBuckets};
use crate::normalize::normalize_text;

/// Bank-fee, tax and interest concepts as the statements spell them.
/// Hand-tuned against real statements; suffix variation (reference numbers,
/// extra qualifiers) is absorbed by the two-word prefix reduction below.
pub const DEFAULT_FEE_CONCEPTS: &[&str] = &[
    "ABONO INTERESES AHORROS",
    "ABONO INTERESES GANADOS",
    "ABONO X GRAVAMEN MOVIMIENTO FINANCIERO",
    "GRAVAMEN MOVIMIENTO FINANCIERO",
    "GRAVAMEN A LOS MOVIMIENTOS FINANCIEROS",
    "AJUSTE INTERES AHORROS DB",
    "CARGO IVA",
    "COBRO CUOT MANEJO TARJ DEBITO",
    "COBRO DE COMISION POR EL USO DEL PORTAL BUSINESS",
    "COBRO PAGO PROVEEDORES OLROS BANCOS",
    "COBRO PAGO PROVEEDORES OTROS BANCOS",
    "COBRO SERVICIO EMPRESARIAL",
    "COBRO SERVICIO MANEJO PORTAL",
    "COBRO TRANSF. ENVIADA OTRA ENTIDAD",
    "COM.IVA MES B.VIR",
    "COM.MES B.VIRTUAL",
    "COMIS RETIRO CAJERO NO BANCOL",
    "COMISION CHEQUE DEVUELTO",
    "COMISION POR USO CAJERO OTRA ENTIDAD",
    "COMISION TRANSF. ENVIADA OTRA ENTIDAD",
    "COMISION TRANSF. ENVIADA OTRA ENTIDAD B",
    "COMISIONES",
    "COSTO CHEQUERA",
    "COSTO CHEQUERA X 25 CHEQUES",
    "COSTO CHEQUERA X 50 CHEQUES",
    "CUOTA MANEJO TARJETA DEBITO",
    "DEVOLUCION COMISION",
    "GMF - RETIRO SUCURSAL",
    "IMP. GMF",
    "IVA COMISION TRANSF. ENVIADA",
    "IVA COMISION TRANSF. ENVIADA OTRA ENTIDAD",
    "IVA COMISION TRANSF. ENVIADA OTRA ENTIDAD B",
    "IVA COMISIONES",
    "IVA POR SERVICIOS",
    "IVA COSTO CHEQUERA",
    "IVA GMF - RETIRO SUCURSAL",
    "IVA TRANSFERENCIA ENVIADA",
    "IVA TRANSFERENCIA ENVIADA OTRA ENTIDAD",
    "COMISION PAGO PROVEEDORES OTROS BANCOS",
    "RENDIMIENTOS FINANCIEROS",
    "REINTEGRO GRAVAMEN MVTO FINANCIERO",
    "COBRO CONSULTA SALDOS Y MOVIMIENTOS",
    "DESCUENTO SOLICITUD COPIA EXTRACTO",
    "IMPTO GOBIERNO 4X1000",
    "CUOTA MANEJO TRJ DEB",
    "CXC IMPTO GOBIERNO 4X1000 MON",
    "AJUSTE X GRAVAMEN MOVIMIENTO FINANCIER",
    "COBRO IVA SERVICIOS FINANCIEROS",
    "COBRO CUOTA DE MANEJO TARJETA DEBITO",
    "RENDIMIENTOS FINANCIEROS.",
];

/// Known bank-charge concepts reduced to their first two normalized words.
///
/// The two-word reduction is deliberately loose so trailing reference
/// numbers and bank-specific suffixes still match. Entries sharing a
/// two-word prefix collapse into one; any hit is equivalent, since matching
/// only drives removal and aggregation.
#[derive(Debug, Clone)]
pub struct FeeDictionary {
    prefixes: Vec<String>,
}

impl FeeDictionary {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes: Vec<String> = Vec::new();
        for entry in entries {
            let prefix = two_word_prefix(entry.as_ref());
            if !prefix.is_empty() && !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }
        Self { prefixes }
    }

    pub fn default_concepts() -> Self {
        Self::new(DEFAULT_FEE_CONCEPTS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Prefix test against an already-normalized description.
    pub fn matches(&self, description: &str) -> bool {
        self.prefixes.iter().any(|p| description.starts_with(p.as_str()))
    }
}

fn two_word_prefix(entry: &str) -> String {
    normalize_text(entry)
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pull fee/interest records out of all four residual buckets and aggregate
/// them by exact normalized description, amounts summed. Output rows are
/// alphabetically ordered by description; the per-transaction rows do not
/// survive, one line per distinct description does.
pub fn extract_bank_fees(buckets: &mut ResidualBuckets, dict: &FeeDictionary) -> Vec<FeeLine> {
    let mut grouped: BTreeMap<String, i64> = BTreeMap::new();

    for bucket in [
        &mut buckets.book_credits,
        &mut buckets.bank_credits,
        &mut buckets.book_debits,
        &mut buckets.bank_debits,
    ] {
        let mut kept: Vec<LedgerRecord> = Vec::with_capacity(bucket.len());
        for record in bucket.drain(..) {
            if dict.matches(&record.description) {
                *grouped.entry(record.description).or_insert(0) += record.amount_cents;
            } else {
                kept.push(record);
            }
        }
        *bucket = kept;
    }

    grouped
        .into_iter()
        .map(|(description, amount_cents)| FeeLine { description, amount_cents })
        .collect()
}
