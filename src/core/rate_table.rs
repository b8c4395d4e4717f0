//! Rate table model - a snapshot of exchange rates relative to one base currency

use std::collections::HashMap;

use chrono::NaiveDate;

use super::ConvertError;

/// Exchange rates keyed by currency code, in the order the provider listed them
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Currency every rate is expressed against (e.g. "USD")
    pub base: String,

    /// Date the provider reports the rates for
    pub as_of: Option<NaiveDate>,

    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl RateTable {
    /// Build a table. A repeated code keeps its first position and takes the
    /// later rate. Rates that are not positive finite numbers are kept listed
    /// and only fail a conversion that uses them.
    pub fn new(base: impl Into<String>, rates: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (code, rate) in rates {
            match index.get(&code) {
                Some(&i) => entries[i].1 = rate,
                None => {
                    index.insert(code.clone(), entries.len());
                    entries.push((code, rate));
                }
            }
        }

        Self {
            base: base.into(),
            as_of: None,
            entries,
            index,
        }
    }

    /// Builder pattern: set the as-of date
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Currency codes in provider order
    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|(code, _)| code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rate for `code` relative to the base currency
    pub fn rate(&self, code: &str) -> Result<f64, ConvertError> {
        let rate = self
            .index
            .get(code)
            .map(|&i| self.entries[i].1)
            .ok_or_else(|| ConvertError::UnknownCurrency(code.to_string()))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConvertError::InvalidRate {
                code: code.to_string(),
                rate,
            });
        }
        Ok(rate)
    }

    /// Convert through the base currency: `amount / rate[from] * rate[to]`
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Ok(amount / from_rate * to_rate)
    }
}
