//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The [`WeatherProvider`] contract and its backends
//! - Request URL builders for each backend
//! - Streaming XML parsers producing the shared weather model
//! - Configuration & credentials handling
//!
//! No I/O happens here apart from reading and writing the config file: callers
//! fetch documents themselves and hand the text to a provider.

pub mod code;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod units;

mod xml;

pub use code::{WeatherCode, WeatherCodeProvider};
pub use config::{Config, ProviderConfig, WeatherConfig};
pub use error::{ParseError, WeatherError};
pub use model::{
    Atmosphere, City, Condition, Coordinates, CurrentWeather, DayForecast, ForecastTemperature,
    Location, Temperature, WeatherForecast, WeatherReport, Wind,
};
pub use provider::{
    ProviderId, WeatherProvider, default_provider_from_config, provider_from_config,
    yahoo::{YahooCodeProvider, YahooWeatherProvider},
};
pub use units::{UnitSystem, WeatherUnit};
