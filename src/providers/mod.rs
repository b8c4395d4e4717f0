//! Exchange rate providers

mod exchange_rate;

pub use exchange_rate::{ExchangeRateProvider, BASE_CURRENCY};
