//! Converter state - everything the window shows, independent of the UI toolkit
//!
//! A conversion runs in two halves so the network fetch can happen elsewhere:
//! [`ConverterState::begin_conversion`] validates the inputs and either finishes
//! immediately or hands back a [`PendingConversion`], and
//! [`ConverterState::finish_conversion`] applies the fetched rates.

use chrono::NaiveDate;

use super::{format_amount, ConversionHistory, ConversionRecord, ConvertError, RateSource, RateTable, ThemeMode};

/// Inline status banner text
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }
}

/// A validated conversion waiting for a fresh rate table
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

/// What the caller has to do after [`ConverterState::begin_conversion`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertStep {
    /// Result already displayed, nothing to fetch
    Done,
    /// Fetch rates and pass them to [`ConverterState::finish_conversion`]
    Fetch(PendingConversion),
}

/// Parse user input as an amount. Surrounding whitespace is ignored and
/// non-finite values are rejected.
pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ConvertError::InvalidAmount(trimmed.to_string())),
    }
}

/// Window state: inputs, result, history and theme
#[derive(Debug, Clone, Default)]
pub struct ConverterState {
    pub amount_text: String,
    pub from: String,
    pub to: String,
    pub currencies: Vec<String>,
    pub result: Option<String>,
    pub status: Option<StatusMessage>,
    pub rates_as_of: Option<NaiveDate>,
    theme: ThemeMode,
    history: ConversionHistory,
}

impl ConverterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn history(&self) -> &ConversionHistory {
        &self.history
    }

    pub fn has_currencies(&self) -> bool {
        !self.currencies.is_empty()
    }

    /// Fill both currency pickers from a freshly fetched table.
    /// Selections that are no longer listed fall back to the first code.
    pub fn load_currencies(&mut self, table: &RateTable) {
        self.currencies = table.codes();
        self.rates_as_of = table.as_of;

        let first = self.currencies.first().cloned().unwrap_or_default();
        if !self.currencies.contains(&self.from) {
            self.from = first.clone();
        }
        if !self.currencies.contains(&self.to) {
            self.to = first;
        }

        self.status = None;
        tracing::info!("Loaded {} currencies (base {})", self.currencies.len(), table.base);
    }

    /// Record a failed currency load
    pub fn currencies_failed(&mut self, err: &ConvertError) {
        tracing::warn!("Failed to load currencies: {}", err);
        self.status = Some(StatusMessage::error(format!("Could not load currencies. {}", err)));
    }

    /// Validate inputs and resolve everything that needs no network.
    ///
    /// An invalid amount clears the result and sets an error status.
    /// Identical currencies display the amount directly without touching history.
    pub fn begin_conversion(&mut self) -> Result<ConvertStep, ConvertError> {
        let amount = match parse_amount(&self.amount_text) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!("Rejected amount input {:?}", self.amount_text);
                self.result = None;
                self.status = Some(StatusMessage::error(err.to_string()));
                return Err(err);
            }
        };

        if self.from.is_empty() || self.to.is_empty() {
            let err = ConvertError::NoCurrencies;
            self.status = Some(StatusMessage::error(err.to_string()));
            return Err(err);
        }

        if self.from == self.to {
            self.result = Some(format!("{} {}", format_amount(amount), self.to));
            self.status = None;
            return Ok(ConvertStep::Done);
        }

        Ok(ConvertStep::Fetch(PendingConversion {
            amount,
            from: self.from.clone(),
            to: self.to.clone(),
        }))
    }

    /// Apply a fetched rate table to a pending conversion.
    ///
    /// On failure the previous result and history stay as they were.
    pub fn finish_conversion(
        &mut self,
        pending: PendingConversion,
        rates: Result<RateTable, ConvertError>,
    ) -> Result<ConversionRecord, ConvertError> {
        let converted = rates.and_then(|table| {
            self.rates_as_of = table.as_of;
            table.convert(pending.amount, &pending.from, &pending.to)
        });

        let converted = match converted {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("Conversion {} -> {} failed: {}", pending.from, pending.to, err);
                self.status = Some(StatusMessage::error(err.to_string()));
                return Err(err);
            }
        };

        let record = ConversionRecord::new(pending.amount, pending.from, converted, pending.to);
        tracing::debug!("Converted: {}", record);

        self.result = Some(format!("{} {}", format_amount(record.converted), record.to));
        self.status = None;
        self.history.push(record.clone());

        Ok(record)
    }

    /// Run a whole conversion against `source`, fetching only when needed
    pub async fn convert_with(&mut self, source: &dyn RateSource) -> Result<ConvertStep, ConvertError> {
        let step = self.begin_conversion()?;
        if let ConvertStep::Fetch(pending) = &step {
            let rates = source.fetch_rates().await;
            self.finish_conversion(pending.clone(), rates)?;
        }
        Ok(step)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!("Theme switched to {}", self.theme.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRates {
        result: Result<Vec<(&'static str, f64)>, ConvertError>,
        calls: AtomicUsize,
    }

    impl FixedRates {
        fn ok(rates: Vec<(&'static str, f64)>) -> Self {
            Self {
                result: Ok(rates),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: ConvertError) -> Self {
            Self {
                result: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for FixedRates {
        fn base(&self) -> &str {
            "USD"
        }

        async fn fetch_rates(&self) -> Result<RateTable, ConvertError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rates = self.result.clone()?;
            Ok(RateTable::new("USD", rates.into_iter().map(|(c, r)| (c.to_string(), r))))
        }
    }

    fn sample_source() -> FixedRates {
        FixedRates::ok(vec![("USD", 1.0), ("EUR", 0.9), ("JPY", 150.0)])
    }

    fn loaded_state() -> ConverterState {
        let mut state = ConverterState::new();
        let table = RateTable::new(
            "USD",
            vec![
                ("USD".to_string(), 1.0),
                ("EUR".to_string(), 0.9),
                ("JPY".to_string(), 150.0),
            ],
        );
        state.load_currencies(&table);
        state
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Ok(100.0));
        assert_eq!(parse_amount("  2.5 "), Ok(2.5));
        assert_eq!(parse_amount("-3"), Ok(-3.0));
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_load_defaults_to_first_code() {
        let state = loaded_state();
        assert_eq!(state.currencies, vec!["USD", "EUR", "JPY"]);
        assert_eq!(state.from, "USD");
        assert_eq!(state.to, "USD");
        assert_eq!(state.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_usd_to_eur_example() {
        let source = sample_source();
        let mut state = loaded_state();
        state.amount_text = "100".to_string();
        state.to = "EUR".to_string();

        let step = tokio_test::block_on(state.convert_with(&source)).unwrap();
        assert!(matches!(step, ConvertStep::Fetch(_)));
        assert_eq!(state.result.as_deref(), Some("90.00 EUR"));
        assert_eq!(state.history().render(), "100.00 USD = 90.00 EUR");
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_same_currency_skips_network_and_history() {
        let source = sample_source();
        let mut state = loaded_state();
        state.amount_text = "12.345".to_string();
        state.from = "EUR".to_string();
        state.to = "EUR".to_string();

        let step = tokio_test::block_on(state.convert_with(&source)).unwrap();
        assert_eq!(step, ConvertStep::Done);
        assert_eq!(state.result.as_deref(), Some("12.35 EUR"));
        assert!(state.history().is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_invalid_amount_sets_status_only() {
        let source = sample_source();
        let mut state = loaded_state();
        state.amount_text = "abc".to_string();
        state.to = "EUR".to_string();

        let err = tokio_test::block_on(state.convert_with(&source)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidAmount(_)));
        assert!(state.history().is_empty());
        assert_eq!(source.calls(), 0);

        let status = state.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("valid amount"));
    }

    #[test]
    fn test_each_conversion_fetches_fresh_rates() {
        let source = sample_source();
        let mut state = loaded_state();
        state.amount_text = "1".to_string();
        state.from = "EUR".to_string();
        state.to = "JPY".to_string();

        tokio_test::block_on(state.convert_with(&source)).unwrap();
        tokio_test::block_on(state.convert_with(&source)).unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.result.as_deref(), Some("166.67 JPY"));
    }

    #[test]
    fn test_fetch_failure_keeps_previous_state() {
        let mut state = loaded_state();
        state.amount_text = "100".to_string();
        state.to = "EUR".to_string();
        tokio_test::block_on(state.convert_with(&sample_source())).unwrap();

        let broken = FixedRates::failing(ConvertError::Network("connection refused".into()));
        state.amount_text = "50".to_string();
        let err = tokio_test::block_on(state.convert_with(&broken)).unwrap_err();

        assert!(!err.is_input_error());
        assert_eq!(state.result.as_deref(), Some("90.00 EUR"));
        assert_eq!(state.history().len(), 1);
        assert!(state.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn test_bad_rate_elsewhere_in_table_is_ignored() {
        let source = FixedRates::ok(vec![("USD", 1.0), ("EUR", 0.9), ("VES", 0.0)]);
        let mut state = ConverterState::new();
        state.load_currencies(&tokio_test::block_on(source.fetch_rates()).unwrap());
        assert_eq!(state.currencies, vec!["USD", "EUR", "VES"]);

        state.amount_text = "100".to_string();
        state.to = "EUR".to_string();
        tokio_test::block_on(state.convert_with(&source)).unwrap();
        assert_eq!(state.result.as_deref(), Some("90.00 EUR"));

        state.to = "VES".to_string();
        let err = tokio_test::block_on(state.convert_with(&source)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidRate { .. }));
        assert_eq!(state.result.as_deref(), Some("90.00 EUR"));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_missing_currency_in_fresh_table() {
        let mut state = loaded_state();
        state.amount_text = "10".to_string();
        state.to = "JPY".to_string();

        let shrunk = FixedRates::ok(vec![("USD", 1.0), ("EUR", 0.9)]);
        let err = tokio_test::block_on(state.convert_with(&shrunk)).unwrap_err();
        assert_eq!(err, ConvertError::UnknownCurrency("JPY".to_string()));
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_no_currencies_loaded() {
        let mut state = ConverterState::new();
        state.amount_text = "10".to_string();
        assert_eq!(state.begin_conversion(), Err(ConvertError::NoCurrencies));
    }

    #[test]
    fn test_toggle_theme_leaves_inputs_alone() {
        let mut state = loaded_state();
        state.amount_text = "100".to_string();
        state.to = "EUR".to_string();
        tokio_test::block_on(state.convert_with(&sample_source())).unwrap();

        let before = (state.amount_text.clone(), state.from.clone(), state.to.clone(), state.result.clone());
        let history_before = state.history().render();

        state.toggle_theme();
        assert_eq!(state.theme(), ThemeMode::Dark);
        state.toggle_theme();
        assert_eq!(state.theme(), ThemeMode::Light);

        let after = (state.amount_text.clone(), state.from.clone(), state.to.clone(), state.result.clone());
        assert_eq!(before, after);
        assert_eq!(state.history().render(), history_before);
    }

    #[test]
    fn test_reload_keeps_valid_selection() {
        let mut state = loaded_state();
        state.from = "EUR".to_string();
        state.to = "JPY".to_string();

        let smaller = RateTable::new("USD", vec![("USD".to_string(), 1.0), ("EUR".to_string(), 0.9)]);
        state.load_currencies(&smaller);
        assert_eq!(state.from, "EUR");
        assert_eq!(state.to, "USD");
    }
}
