use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::Serialize;
use weather_core::{City, CurrentWeather, WeatherForecast};

pub fn json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

pub fn cities(cities: &[City]) -> String {
    if cities.is_empty() {
        return "No matching cities.".to_string();
    }

    let mut out = String::new();
    for city in cities {
        let _ = writeln!(out, "{:>10}  {}, {}", city.id, city.name, city.country);
    }
    out
}

pub fn current(weather: &CurrentWeather) -> String {
    let units = &weather.units;
    let location = &weather.location;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}, {} ({})",
        location.city, location.region, location.country
    );
    let _ = writeln!(
        out,
        "  {}: {}{} (min {}{}, max {}{})",
        weather.condition.description,
        weather.temperature.current,
        units.temperature,
        weather.temperature.min,
        units.temperature,
        weather.temperature.max,
        units.temperature,
    );
    let _ = writeln!(
        out,
        "  Wind: {} {} from {}°, chill {}{}",
        weather.wind.speed, units.speed, weather.wind.direction, weather.wind.chill, units.temperature
    );
    let _ = writeln!(
        out,
        "  Humidity: {}%  Pressure: {} {}  Visibility: {} {}",
        weather.atmosphere.humidity,
        weather.atmosphere.pressure,
        units.pressure,
        weather.atmosphere.visibility,
        units.distance,
    );
    let _ = writeln!(
        out,
        "  Sunrise: {}  Sunset: {}",
        time_of_day(location.sunrise),
        time_of_day(location.sunset),
    );
    if let Some(updated) = &weather.last_update {
        let _ = writeln!(out, "  Updated: {updated}");
    }
    out
}

pub fn forecast(forecast: &WeatherForecast) -> String {
    let unit = &forecast.units.temperature;
    let mut out = String::new();

    for day in &forecast.days {
        let label = match (&day.day, day.date) {
            (Some(name), Some(date)) => format!("{name} {date}"),
            (Some(name), None) => name.clone(),
            (None, Some(date)) => date.to_string(),
            (None, None) => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "  {label:<16} {:>4}{unit} / {:>4}{unit}  {}",
            day.temperature.min, day.temperature.max, day.condition.description
        );
    }
    out
}

fn time_of_day(seconds: Option<i64>) -> String {
    seconds
        .and_then(|s| u32::try_from(s).ok())
        .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0))
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{DayForecast, ForecastTemperature, Location, UnitSystem, WeatherUnit};

    #[test]
    fn empty_city_list_has_a_message() {
        assert_eq!(cities(&[]), "No matching cities.");
    }

    #[test]
    fn current_weather_shows_labels_and_times() {
        let weather = CurrentWeather {
            location: Location {
                city: "Sunnyvale".into(),
                region: "CA".into(),
                country: "United States".into(),
                sunrise: Some(7 * 3600 + 2 * 60),
                sunset: None,
            },
            units: WeatherUnit::for_system(UnitSystem::Imperial),
            ..CurrentWeather::default()
        };

        let text = current(&weather);
        assert!(text.starts_with("Sunnyvale, CA (United States)"));
        assert!(text.contains("Sunrise: 07:02  Sunset: n/a"));
        assert!(text.contains("°F"));
    }

    #[test]
    fn forecast_lists_each_day() {
        let mut week = WeatherForecast::new(WeatherUnit::for_system(UnitSystem::Metric));
        week.add_forecast(DayForecast {
            day: Some("Wed".into()),
            temperature: ForecastTemperature { min: 4, max: 12 },
            ..DayForecast::default()
        });

        let text = forecast(&week);
        assert!(text.contains("Wed"));
        assert!(text.contains("°C"));
    }
}
