use std::sync::Arc;

use crate::{
    City, Coordinates, WeatherConfig, WeatherReport,
    code::WeatherCodeProvider,
    error::{Result, WeatherError},
    units::WeatherUnit,
};

use super::WeatherProvider;

mod codes;
mod places;
mod rss;

pub use codes::YahooCodeProvider;

const GEO_URL: &str = "http://where.yahooapis.com/v1";
const WEATHER_URL: &str = "http://weather.yahooapis.com/forecastrss";
const IMAGE_URL: &str = "http://l.yimg.com/a/i/us/we/52/";

/// Yahoo Weather RSS and GeoPlanet place search.
#[derive(Debug, Clone, Default)]
pub struct YahooWeatherProvider {
    config: Option<WeatherConfig>,
    code_provider: Option<Arc<dyn WeatherCodeProvider>>,
}

impl YahooWeatherProvider {
    /// An unconfigured provider; call [`WeatherProvider::set_config`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WeatherConfig) -> Self {
        Self {
            config: Some(config),
            code_provider: None,
        }
    }

    fn config(&self) -> Result<&WeatherConfig> {
        self.config.as_ref().ok_or(WeatherError::NotConfigured)
    }

    /// The configuration's API key, checked before any URL text is built.
    fn api_key(&self) -> Result<&str> {
        self.config()?
            .api_key
            .as_deref()
            .ok_or(WeatherError::ApiKeyRequired)
    }

    fn weather_url(&self, city_id: &str) -> Result<String> {
        self.api_key()?;
        let unit = if self.config()?.unit_system.is_metric() {
            "c"
        } else {
            "f"
        };

        Ok(format!("{WEATHER_URL}?w={city_id}&u={unit}"))
    }
}

impl WeatherProvider for YahooWeatherProvider {
    fn weather_report(&self, data: &str) -> Result<WeatherReport> {
        let units = WeatherUnit::for_system(self.config()?.unit_system);
        let report = rss::parse(data, units, self.code_provider.as_deref())?;

        tracing::debug!(
            city = %report.current.location.city,
            forecast_days = report.forecast.len(),
            "parsed yahoo weather document"
        );
        Ok(report)
    }

    fn city_result_list(&self, data: &str) -> Result<Vec<City>> {
        let cities = places::parse(data)?;
        tracing::debug!(count = cities.len(), "parsed yahoo place results");
        Ok(cities)
    }

    fn query_city_url(&self, city_name_pattern: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let max_results = self.config()?.max_results;
        let pattern = urlencoding::encode(city_name_pattern);

        Ok(format!(
            "{GEO_URL}/places.q({pattern}%2A);count={max_results}?appid={api_key}"
        ))
    }

    fn query_city_url_by_location(&self, location: Coordinates) -> Result<String> {
        let api_key = self.api_key()?;

        Ok(format!(
            "{GEO_URL}/places.q({},{})?appid={api_key}",
            location.latitude, location.longitude
        ))
    }

    fn query_current_weather_url(&self, city_id: &str) -> Result<String> {
        self.weather_url(city_id)
    }

    fn query_forecast_weather_url(&self, city_id: &str) -> Result<String> {
        self.weather_url(city_id)
    }

    fn query_image_url(&self, icon: &str) -> Result<String> {
        Ok(format!("{IMAGE_URL}{icon}.gif"))
    }

    fn set_config(&mut self, config: WeatherConfig) {
        self.config = Some(config);
    }

    fn set_weather_code_provider(&mut self, code_provider: Arc<dyn WeatherCodeProvider>) {
        self.code_provider = Some(code_provider);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;

    fn keyed(unit_system: UnitSystem) -> YahooWeatherProvider {
        YahooWeatherProvider::with_config(
            WeatherConfig::default()
                .with_api_key("KEY")
                .with_unit_system(unit_system),
        )
    }

    #[test]
    fn city_url_encodes_spaces_and_embeds_limit_and_key() {
        let provider = keyed(UnitSystem::Metric);
        let url = provider.query_city_url("New York").unwrap();

        assert_eq!(
            url,
            "http://where.yahooapis.com/v1/places.q(New%20York%2A);count=5?appid=KEY"
        );
        assert_eq!(provider.query_city_url("New York").unwrap(), url);
    }

    #[test]
    fn location_url_embeds_coordinates() {
        let provider = keyed(UnitSystem::Metric);
        let url = provider
            .query_city_url_by_location(Coordinates::new(40.7128, -74.006))
            .unwrap();

        assert_eq!(
            url,
            "http://where.yahooapis.com/v1/places.q(40.7128,-74.006)?appid=KEY"
        );
    }

    #[test]
    fn location_url_keeps_every_significant_digit_near_zero() {
        let provider = keyed(UnitSystem::Metric);
        let url = provider
            .query_city_url_by_location(Coordinates::new(0.00012345, -0.0000567))
            .unwrap();

        assert_eq!(
            url,
            "http://where.yahooapis.com/v1/places.q(0.00012345,-0.0000567)?appid=KEY"
        );
    }

    #[test]
    fn weather_urls_carry_the_unit_flag() {
        let metric = keyed(UnitSystem::Metric);
        assert_eq!(
            metric.query_current_weather_url("2502265").unwrap(),
            "http://weather.yahooapis.com/forecastrss?w=2502265&u=c"
        );

        let imperial = keyed(UnitSystem::Imperial);
        assert_eq!(
            imperial.query_forecast_weather_url("44418").unwrap(),
            "http://weather.yahooapis.com/forecastrss?w=44418&u=f"
        );
    }

    #[test]
    fn every_keyed_url_requires_an_api_key() {
        let provider = YahooWeatherProvider::with_config(WeatherConfig::default());

        assert!(matches!(
            provider.query_city_url("Rome"),
            Err(WeatherError::ApiKeyRequired)
        ));
        assert!(matches!(
            provider.query_city_url_by_location(Coordinates::new(1.0, 2.0)),
            Err(WeatherError::ApiKeyRequired)
        ));
        assert!(matches!(
            provider.query_current_weather_url("1"),
            Err(WeatherError::ApiKeyRequired)
        ));
        assert!(matches!(
            provider.query_forecast_weather_url("1"),
            Err(WeatherError::ApiKeyRequired)
        ));
    }

    #[test]
    fn image_url_needs_no_key_or_config() {
        let provider = YahooWeatherProvider::new();
        assert_eq!(
            provider.query_image_url("28").unwrap(),
            "http://l.yimg.com/a/i/us/we/52/28.gif"
        );
    }

    #[test]
    fn unconfigured_provider_is_a_distinct_failure() {
        let provider = YahooWeatherProvider::new();

        assert!(matches!(
            provider.query_city_url("Rome"),
            Err(WeatherError::NotConfigured)
        ));
        assert!(matches!(
            provider.weather_report("<rss/>"),
            Err(WeatherError::NotConfigured)
        ));
    }
}
