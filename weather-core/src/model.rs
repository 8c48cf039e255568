use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{code::WeatherCode, units::WeatherUnit};

/// A place candidate returned by a city search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub chill: i32,
    /// Degrees, meteorological convention.
    pub direction: i32,
    pub speed: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub humidity: i32,
    pub visibility: f32,
    pub pressure: f32,
    /// 0 = steady, 1 = rising, 2 = falling.
    pub pressure_trend: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Provider-native condition code.
    pub weather_id: i32,
    /// Normalized code; `None` when no code provider was injected.
    pub weather_code: Option<WeatherCode>,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: i32,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
    /// Epoch seconds of the time of day on 1970-01-01 UTC.
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub wind: Wind,
    pub atmosphere: Atmosphere,
    pub temperature: Temperature,
    pub condition: Condition,
    pub location: Location,
    pub units: WeatherUnit,
    /// Raw build date of the feed, as the provider formats it.
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastTemperature {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
    pub day: Option<String>,
    pub date: Option<NaiveDate>,
    pub temperature: ForecastTemperature,
    pub condition: Condition,
}

/// Days following today, in the order the provider listed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub days: Vec<DayForecast>,
    pub units: WeatherUnit,
}

impl WeatherForecast {
    pub fn new(units: WeatherUnit) -> Self {
        Self {
            days: Vec::new(),
            units,
        }
    }

    pub fn add_forecast(&mut self, day: DayForecast) {
        self.days.push(day);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, index: usize) -> Option<&DayForecast> {
        self.days.get(index)
    }
}

/// Everything a single weather document yields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: WeatherForecast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;

    #[test]
    fn forecast_keeps_insertion_order() {
        let mut forecast = WeatherForecast::new(WeatherUnit::for_system(UnitSystem::Imperial));
        for (i, day) in ["Wed", "Thu", "Fri"].iter().enumerate() {
            forecast.add_forecast(DayForecast {
                day: Some(day.to_string()),
                temperature: ForecastTemperature {
                    min: i as i32,
                    max: 10 + i as i32,
                },
                ..Default::default()
            });
        }

        assert_eq!(forecast.len(), 3);
        assert_eq!(forecast.day(0).and_then(|d| d.day.as_deref()), Some("Wed"));
        assert_eq!(forecast.day(2).map(|d| d.temperature.max), Some(12));
        assert!(forecast.day(3).is_none());
    }

    #[test]
    fn weather_code_serializes_in_snake_case() {
        let condition = Condition {
            weather_id: 28,
            weather_code: Some(WeatherCode::MostlyCloudyDay),
            icon: "28".into(),
            description: "Mostly Cloudy".into(),
        };

        let json = serde_json::to_string(&condition).expect("serialize");
        assert!(json.contains("\"weather_code\":\"mostly_cloudy_day\""));
    }
}
