use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Provider-independent weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCode {
    Tornado,
    TropicalStorm,
    Hurricane,
    SevereThunderstorms,
    Thunderstorms,
    MixedRainSnow,
    MixedRainSleet,
    MixedSnowSleet,
    FreezingDrizzle,
    Drizzle,
    FreezingRain,
    Showers,
    SnowFlurries,
    LightSnowShowers,
    BlowingSnow,
    Snow,
    Hail,
    Sleet,
    Dust,
    Foggy,
    Haze,
    Smoky,
    Blustery,
    Windy,
    Cold,
    Cloudy,
    MostlyCloudyNight,
    MostlyCloudyDay,
    PartlyCloudyNight,
    PartlyCloudyDay,
    ClearNight,
    Sunny,
    FairNight,
    FairDay,
    MixedRainHail,
    Hot,
    IsolatedThunderstorms,
    ScatteredThunderstorms,
    ScatteredShowers,
    HeavySnow,
    ScatteredSnowShowers,
    PartlyCloudy,
    Thundershowers,
    SnowShowers,
    IsolatedThundershowers,
    NotAvailable,
}

impl WeatherCode {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Tornado => "Tornado",
            Self::TropicalStorm => "Tropical storm",
            Self::Hurricane => "Hurricane",
            Self::SevereThunderstorms => "Severe thunderstorms",
            Self::Thunderstorms => "Thunderstorms",
            Self::MixedRainSnow => "Mixed rain and snow",
            Self::MixedRainSleet => "Mixed rain and sleet",
            Self::MixedSnowSleet => "Mixed snow and sleet",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Drizzle => "Drizzle",
            Self::FreezingRain => "Freezing rain",
            Self::Showers => "Showers",
            Self::SnowFlurries => "Snow flurries",
            Self::LightSnowShowers => "Light snow showers",
            Self::BlowingSnow => "Blowing snow",
            Self::Snow => "Snow",
            Self::Hail => "Hail",
            Self::Sleet => "Sleet",
            Self::Dust => "Dust",
            Self::Foggy => "Foggy",
            Self::Haze => "Haze",
            Self::Smoky => "Smoky",
            Self::Blustery => "Blustery",
            Self::Windy => "Windy",
            Self::Cold => "Cold",
            Self::Cloudy => "Cloudy",
            Self::MostlyCloudyNight | Self::MostlyCloudyDay => "Mostly cloudy",
            Self::PartlyCloudyNight | Self::PartlyCloudyDay | Self::PartlyCloudy => "Partly cloudy",
            Self::ClearNight => "Clear",
            Self::Sunny => "Sunny",
            Self::FairNight | Self::FairDay => "Fair",
            Self::MixedRainHail => "Mixed rain and hail",
            Self::Hot => "Hot",
            Self::IsolatedThunderstorms => "Isolated thunderstorms",
            Self::ScatteredThunderstorms => "Scattered thunderstorms",
            Self::ScatteredShowers => "Scattered showers",
            Self::HeavySnow => "Heavy snow",
            Self::ScatteredSnowShowers => "Scattered snow showers",
            Self::Thundershowers => "Thundershowers",
            Self::SnowShowers => "Snow showers",
            Self::IsolatedThundershowers => "Isolated thundershowers",
            Self::NotAvailable => "Not available",
        }
    }
}

/// Translates provider-native condition codes into [`WeatherCode`].
///
/// Must be total: unknown codes map to [`WeatherCode::NotAvailable`] instead
/// of failing, so a single odd code never aborts a parse.
pub trait WeatherCodeProvider: Send + Sync + Debug {
    fn weather_code(&self, native_code: i32) -> WeatherCode;
}
