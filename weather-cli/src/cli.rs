use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{CustomType, Password, Select, Text};
use weather_core::{
    Config, Coordinates, ProviderId, UnitSystem, WeatherProvider, provider_from_config,
};

use crate::{fetch::Fetcher, output};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Provider to use instead of the configured default.
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and preferences for a specific provider.
    Configure {
        /// Provider short name, e.g. "yahoo".
        #[arg(value_name = "PROVIDER")]
        name: String,
    },

    /// Search cities by name.
    Search {
        /// City name or prefix.
        pattern: String,
    },

    /// Find the city at a coordinate pair.
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Show weather for a city id returned by `search`.
    Show {
        city_id: String,

        /// Also list the coming days.
        #[arg(long)]
        forecast: bool,
    },

    /// Print a request URL without fetching it.
    Url {
        #[command(subcommand)]
        target: UrlTarget,
    },

    /// Parse a previously saved provider document.
    Parse {
        #[arg(value_enum)]
        kind: DocumentKind,
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum UrlTarget {
    City {
        pattern: String,
    },
    Location {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    Current {
        city_id: String,
    },
    Forecast {
        city_id: String,
    },
    Image {
        icon: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    Current,
    Forecast,
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        let provider = match &self.command {
            Command::Configure { name } => {
                let id = ProviderId::try_from(name.as_str())?;
                return configure(&mut config, id);
            }
            _ => self.provider(&config)?,
        };

        match &self.command {
            Command::Configure { .. } => Ok(()),
            Command::Search { pattern } => {
                let url = provider.query_city_url(pattern)?;
                self.search(provider.as_ref(), &url).await
            }
            Command::Locate { lat, lon } => {
                let url = provider.query_city_url_by_location(Coordinates::new(*lat, *lon))?;
                self.search(provider.as_ref(), &url).await
            }
            Command::Show { city_id, forecast } => {
                self.show(provider.as_ref(), city_id, *forecast).await
            }
            Command::Url { target } => {
                println!("{}", url(provider.as_ref(), target)?);
                Ok(())
            }
            Command::Parse { kind, file } => {
                let data = fs::read_to_string(file)
                    .with_context(|| format!("Failed to read document: {}", file.display()))?;
                self.print_document(provider.as_ref(), *kind, &data)
            }
        }
    }

    /// The `--provider` override, or the configured default.
    fn provider(&self, config: &Config) -> Result<Box<dyn WeatherProvider>> {
        let id = match &self.provider {
            Some(name) => ProviderId::try_from(name.as_str())?,
            None => config.default_provider_id()?,
        };
        if !config.is_provider_configured(id) {
            tracing::warn!(provider = %id, "no API key configured; only image URLs and parsing will work");
        }
        Ok(provider_from_config(id, config))
    }

    async fn search(&self, provider: &dyn WeatherProvider, url: &str) -> Result<()> {
        let data = Fetcher::new().fetch(url).await?;
        self.print_document(provider, DocumentKind::Cities, &data)
    }

    async fn show(&self, provider: &dyn WeatherProvider, city_id: &str, forecast: bool) -> Result<()> {
        let url = if forecast {
            provider.query_forecast_weather_url(city_id)?
        } else {
            provider.query_current_weather_url(city_id)?
        };
        let data = Fetcher::new().fetch(&url).await?;

        if !forecast {
            return self.print_document(provider, DocumentKind::Current, &data);
        }

        let report = provider.weather_report(&data)?;
        if self.json {
            println!("{}", output::json(&report)?);
        } else {
            print!("{}", output::current(&report.current));
            print!("{}", output::forecast(&report.forecast));
        }
        Ok(())
    }

    fn print_document(&self, provider: &dyn WeatherProvider, kind: DocumentKind, data: &str) -> Result<()> {
        let text = match kind {
            DocumentKind::Current => {
                let current = provider.current_condition(data)?;
                if self.json { output::json(&current)? } else { output::current(&current) }
            }
            DocumentKind::Forecast => {
                let forecast = provider.forecast_weather(data)?;
                if self.json { output::json(&forecast)? } else { output::forecast(&forecast) }
            }
            DocumentKind::Cities => {
                let cities = provider.city_result_list(data)?;
                if self.json { output::json(&cities)? } else { output::cities(&cities) }
            }
        };

        print!("{text}");
        if self.json {
            println!();
        }
        Ok(())
    }
}

fn url(provider: &dyn WeatherProvider, target: &UrlTarget) -> Result<String> {
    let url = match target {
        UrlTarget::City { pattern } => provider.query_city_url(pattern)?,
        UrlTarget::Location { lat, lon } => {
            provider.query_city_url_by_location(Coordinates::new(*lat, *lon))?
        }
        UrlTarget::Current { city_id } => provider.query_current_weather_url(city_id)?,
        UrlTarget::Forecast { city_id } => provider.query_forecast_weather_url(city_id)?,
        UrlTarget::Image { icon } => provider.query_image_url(icon)?,
    };
    Ok(url)
}

fn configure(config: &mut Config, id: ProviderId) -> Result<()> {
    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let current_unit = UnitSystem::all()
        .iter()
        .position(|unit| *unit == config.unit_system)
        .unwrap_or(0);
    let unit_system = Select::new("Unit system:", UnitSystem::all().to_vec())
        .with_starting_cursor(current_unit)
        .prompt()
        .context("Failed to read unit system")?;

    let max_results = CustomType::<u32>::new("Maximum city search results:")
        .with_default(config.max_results)
        .prompt()
        .context("Failed to read result limit")?;

    let lang = Text::new("Language:")
        .with_default(&config.lang)
        .prompt()
        .context("Failed to read language")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.set_default_provider(id);
    config.unit_system = unit_system;
    config.max_results = max_results;
    config.lang = lang;
    config.save()?;

    println!(
        "Saved {id} settings to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use weather_core::{WeatherConfig, WeatherError, YahooWeatherProvider};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_are_accepted() {
        let cli = Cli::try_parse_from(["weather", "locate", "--lat", "-33.86", "--lon", "151.2"])
            .expect("valid arguments");

        match cli.command {
            Command::Locate { lat, lon } => {
                assert_eq!(lat, -33.86);
                assert_eq!(lon, 151.2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn url_command_builds_each_target() {
        let mut provider = YahooWeatherProvider::new();
        provider.set_config(WeatherConfig::default().with_api_key("KEY"));

        let current = url(&provider, &UrlTarget::Current { city_id: "44418".into() }).unwrap();
        assert!(current.ends_with("w=44418&u=c"));

        let image = url(&provider, &UrlTarget::Image { icon: "32".into() }).unwrap();
        assert!(image.ends_with("32.gif"));
    }

    #[test]
    fn url_command_surfaces_missing_key() {
        let mut provider = YahooWeatherProvider::new();
        provider.set_config(WeatherConfig::default());

        let err = url(&provider, &UrlTarget::City { pattern: "Rome".into() }).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WeatherError>(),
            Some(WeatherError::ApiKeyRequired)
        ));
    }
}
