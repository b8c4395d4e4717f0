//! Error taxonomy for rate fetching and conversion

use thiserror::Error;

/// Errors that can occur while converting an amount
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("Please enter a valid amount.")]
    InvalidAmount(String),

    #[error("No currencies loaded")]
    NoCurrencies,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate service returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse rates: {0}")]
    Parse(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid rate {rate} for {code}")]
    InvalidRate { code: String, rate: f64 },
}

impl ConvertError {
    /// True for faults caused by what the user typed or selected,
    /// false for network and data faults.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ConvertError::InvalidAmount(_) | ConvertError::NoCurrencies)
    }
}

impl From<reqwest::Error> for ConvertError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConvertError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ConvertError::Status(status.as_u16())
        } else {
            ConvertError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(ConvertError::InvalidAmount("abc".into()).is_input_error());
        assert!(ConvertError::NoCurrencies.is_input_error());
        assert!(!ConvertError::Network("reset".into()).is_input_error());
        assert!(!ConvertError::Status(503).is_input_error());
        assert!(!ConvertError::UnknownCurrency("XYZ".into()).is_input_error());
    }

    #[test]
    fn test_invalid_amount_message() {
        let err = ConvertError::InvalidAmount("abc".into());
        assert_eq!(err.to_string(), "Please enter a valid amount.");
    }
}
