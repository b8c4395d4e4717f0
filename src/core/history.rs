//! Conversion records and the session history

use std::fmt;

use serde::Serialize;

/// Format an amount the way every result and record displays it
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// One successful conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRecord {
    pub amount: f64,
    pub from: String,
    pub converted: f64,
    pub to: String,
}

impl ConversionRecord {
    pub fn new(amount: f64, from: impl Into<String>, converted: f64, to: impl Into<String>) -> Self {
        Self {
            amount,
            from: from.into(),
            converted,
            to: to.into(),
        }
    }
}

impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            format_amount(self.amount),
            self.from,
            format_amount(self.converted),
            self.to
        )
    }
}

/// Append-only list of conversions made during the session
#[derive(Debug, Clone, Default)]
pub struct ConversionHistory {
    records: Vec<ConversionRecord>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ConversionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records joined by newlines, oldest first
    pub fn render(&self) -> String {
        self.records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
