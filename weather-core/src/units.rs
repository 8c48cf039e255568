use serde::{Deserialize, Serialize};

/// Measurement system requested from the provider and used for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn is_metric(self) -> bool {
        matches!(self, UnitSystem::Metric)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Unit labels attached to parsed weather values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherUnit {
    pub temperature: String,
    pub pressure: String,
    pub distance: String,
    pub speed: String,
}

impl WeatherUnit {
    /// Labels a provider reports in when asked for `system`.
    pub fn for_system(system: UnitSystem) -> Self {
        let (temperature, pressure, distance, speed) = match system {
            UnitSystem::Metric => ("°C", "mb", "km", "km/h"),
            UnitSystem::Imperial => ("°F", "in", "mi", "mph"),
        };

        Self {
            temperature: temperature.to_string(),
            pressure: pressure.to_string(),
            distance: distance.to_string(),
            speed: speed.to_string(),
        }
    }
}

impl Default for WeatherUnit {
    fn default() -> Self {
        Self::for_system(UnitSystem::default())
    }
}
