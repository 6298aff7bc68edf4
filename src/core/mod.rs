//! Core conversion logic and abstractions

pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod log;
pub mod quote;
pub mod rates;
pub mod render;

// Re-export main types for cleaner imports
pub use converter::{Converter, FormState};
pub use currency::CurrencyCode;
pub use error::{ConverterError, ErrorKind};
pub use quote::{Conversion, ConversionRequest, ExchangeQuote};
pub use rates::ExchangeRateProvider;
pub use render::Renderer;
