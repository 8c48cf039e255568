use crate::code::{WeatherCode, WeatherCodeProvider};

/// Yahoo condition codes 0–47; 3200 means "not available".
#[derive(Debug, Clone, Copy, Default)]
pub struct YahooCodeProvider;

impl WeatherCodeProvider for YahooCodeProvider {
    fn weather_code(&self, native_code: i32) -> WeatherCode {
        use WeatherCode::*;

        match native_code {
            0 => Tornado,
            1 => TropicalStorm,
            2 => Hurricane,
            3 => SevereThunderstorms,
            4 => Thunderstorms,
            5 => MixedRainSnow,
            6 => MixedRainSleet,
            7 => MixedSnowSleet,
            8 => FreezingDrizzle,
            9 => Drizzle,
            10 => FreezingRain,
            11 | 12 => Showers,
            13 => SnowFlurries,
            14 => LightSnowShowers,
            15 => BlowingSnow,
            16 => Snow,
            17 => Hail,
            18 => Sleet,
            19 => Dust,
            20 => Foggy,
            21 => Haze,
            22 => Smoky,
            23 => Blustery,
            24 => Windy,
            25 => Cold,
            26 => Cloudy,
            27 => MostlyCloudyNight,
            28 => MostlyCloudyDay,
            29 => PartlyCloudyNight,
            30 => PartlyCloudyDay,
            31 => ClearNight,
            32 => Sunny,
            33 => FairNight,
            34 => FairDay,
            35 => MixedRainHail,
            36 => Hot,
            37 => IsolatedThunderstorms,
            38 | 39 => ScatteredThunderstorms,
            40 => ScatteredShowers,
            41 | 43 => HeavySnow,
            42 => ScatteredSnowShowers,
            44 => PartlyCloudy,
            45 => Thundershowers,
            46 => SnowShowers,
            47 => IsolatedThundershowers,
            _ => NotAvailable,
        }
    }
}
