use crate::{
    City, Config, Coordinates, CurrentWeather, WeatherConfig, WeatherForecast, WeatherReport,
    code::WeatherCodeProvider,
    error::Result,
    provider::yahoo::{YahooCodeProvider, YahooWeatherProvider},
};
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod yahoo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Yahoo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Yahoo => "yahoo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Yahoo]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "yahoo" => Ok(ProviderId::Yahoo),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: yahoo."
            )),
        }
    }
}

/// Capability set every weather backend implements.
///
/// Parsers take already-fetched document text; URL builders only format
/// strings. Neither performs I/O, and every parse returns freshly allocated
/// values, so one instance can serve concurrent requests.
///
/// Operations that depend on the configuration fail with
/// [`WeatherError::NotConfigured`](crate::WeatherError::NotConfigured) until
/// [`set_config`](WeatherProvider::set_config) has been called. Those needing
/// an API key fail with
/// [`WeatherError::ApiKeyRequired`](crate::WeatherError::ApiKeyRequired)
/// when the configuration has none.
pub trait WeatherProvider: Send + Sync + Debug {
    /// Parse a weather document into current conditions plus the days after today.
    fn weather_report(&self, data: &str) -> Result<WeatherReport>;

    fn current_condition(&self, data: &str) -> Result<CurrentWeather> {
        self.weather_report(data).map(|report| report.current)
    }

    fn forecast_weather(&self, data: &str) -> Result<WeatherForecast> {
        self.weather_report(data).map(|report| report.forecast)
    }

    /// Parse a place search document, keeping document order.
    fn city_result_list(&self, data: &str) -> Result<Vec<City>>;

    fn query_city_url(&self, city_name_pattern: &str) -> Result<String>;

    fn query_city_url_by_location(&self, location: Coordinates) -> Result<String>;

    fn query_current_weather_url(&self, city_id: &str) -> Result<String>;

    fn query_forecast_weather_url(&self, city_id: &str) -> Result<String>;

    fn query_image_url(&self, icon: &str) -> Result<String>;

    fn set_config(&mut self, config: WeatherConfig);

    fn set_weather_code_provider(&mut self, code_provider: Arc<dyn WeatherCodeProvider>);
}

/// Construct a configured provider, wired to the backend's own code table.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Box<dyn WeatherProvider> {
    let mut provider: Box<dyn WeatherProvider> = match id {
        ProviderId::Yahoo => Box::new(YahooWeatherProvider::new()),
    };

    let code_provider: Arc<dyn WeatherCodeProvider> = match id {
        ProviderId::Yahoo => Arc::new(YahooCodeProvider),
    };

    provider.set_config(config.weather_config(id));
    provider.set_weather_code_provider(code_provider);

    tracing::debug!(provider = %id, "weather provider ready");
    provider
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    Ok(provider_from_config(id, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WeatherError, config::Config};

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
        assert_eq!(ProviderId::try_from("YAHOO").ok(), Some(ProviderId::Yahoo));
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn provider_from_config_without_key_fails_on_keyed_urls() {
        let cfg = Config::default();
        let provider = provider_from_config(ProviderId::Yahoo, &cfg);

        let err = provider.query_city_url("Rome").unwrap_err();
        assert!(matches!(err, WeatherError::ApiKeyRequired));
        assert!(provider.query_image_url("28").is_ok());
    }

    #[test]
    fn default_provider_from_config_errors_when_not_set() {
        let cfg = Config::default();
        let err = default_provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default provider configured"));
        assert!(msg.contains("Hint: run `weather configure"));
    }

    #[test]
    fn default_provider_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Yahoo, "KEY".to_string());

        let provider = default_provider_from_config(&cfg).expect("provider");
        let url = provider.query_city_url("Rome").expect("url");
        assert!(url.ends_with("appid=KEY"));
    }
}
