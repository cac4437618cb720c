use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One API record with its keys in payload order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// UUID to display-string maps for foreign keys the API left unexpanded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupTable {
    #[serde(default)]
    pub currencies: HashMap<String, String>,
    #[serde(default)]
    pub shipments: HashMap<String, String>,
}

impl LookupTable {
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty() && self.shipments.is_empty()
    }
}

/// A named dataset for the multi-sheet exports. The name is matched exactly
/// against "Sales", "Shipments" and "Payments" by the summary math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub sheet_name: String,
    pub data: Vec<Record>,
}

impl ReportDefinition {
    pub fn new(sheet_name: impl Into<String>, data: Vec<Record>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            data,
        }
    }
}

/// Single-line cell value produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl FlatValue {
    pub fn text(value: impl Into<String>) -> Self {
        FlatValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlatValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FlatValue::Text(s) => s.is_empty(),
            FlatValue::Null => true,
            _ => false,
        }
    }

    /// Text as it appears in a rendered cell; null renders empty.
    pub fn display(&self) -> String {
        match self {
            FlatValue::Text(s) => s.clone(),
            FlatValue::Number(n) => crate::report::format::format_number(n),
            FlatValue::Bool(b) => b.to_string(),
            FlatValue::Null => String::new(),
        }
    }
}

/// Flattened record: no nested objects or arrays remain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatRow {
    cells: Vec<(String, FlatValue)>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: FlatValue) {
        self.cells.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FlatValue> {
        let index = self.cells.iter().position(|(k, _)| k == key)?;
        Some(self.cells.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Top-line totals derived once per executive export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub total_revenue: f64,
    pub total_sales_count: usize,
    pub active_shipments: usize,
    pub total_shipments: usize,
    pub total_paid: f64,
    pub pending_amount: f64,
}

impl ExecutiveSummary {
    /// Revenue minus collected. Not the same figure as `pending_amount`,
    /// which sums per-payment shortfalls.
    pub fn outstanding_balance(&self) -> f64 {
        self.total_revenue - self.total_paid
    }
}

/// A rendered report file, held in memory until storage writes it.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportKind {
    IndividualXlsx,
    ProfessionalPdf,
    ExecutiveXlsx,
    ExecutivePdf,
}

impl ReportKind {
    pub fn is_single_dataset(&self) -> bool {
        matches!(self, ReportKind::IndividualXlsx | ReportKind::ProfessionalPdf)
    }

    /// Only the PDF renderers resolve foreign keys through the lookup table.
    pub fn uses_lookups(&self) -> bool {
        matches!(self, ReportKind::ProfessionalPdf | ReportKind::ExecutivePdf)
    }
}
