//! Single forward pass over a Yahoo Weather RSS document.
//!
//! Everything of interest sits in attributes of `yweather:*` elements, so the
//! parser reacts to start tags and only tracks a small [`Context`] for the few
//! plain RSS elements whose text it reads.

use chrono::{NaiveDate, NaiveTime, Timelike};
use quick_xml::events::Event;

use crate::{
    code::WeatherCodeProvider,
    error::ParseError,
    model::{
        Condition, CurrentWeather, DayForecast, ForecastTemperature, WeatherForecast,
        WeatherReport,
    },
    units::WeatherUnit,
    xml::{self, Tag},
};

const TIME_FORMAT: &str = "%I:%M %p";
const DATE_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Channel,
    Image,
    LastBuildDate,
}

struct RssParser<'a> {
    current: CurrentWeather,
    forecast: WeatherForecast,
    today_seen: bool,
    context: Context,
    code_provider: Option<&'a dyn WeatherCodeProvider>,
}

/// Parse `data` into current conditions plus the days after today.
///
/// `units` labels both halves until the document's own `yweather:units`
/// element replaces them.
pub(super) fn parse(
    data: &str,
    units: WeatherUnit,
    code_provider: Option<&dyn WeatherCodeProvider>,
) -> Result<WeatherReport, ParseError> {
    let mut reader = xml::reader(data);
    let mut parser = RssParser::new(units, code_provider);
    let mut nesting = xml::Nesting::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                parser.element(&Tag::new(&e))?;
                parser.enter(e.name().as_ref());
                nesting.enter(e.name().as_ref());
            }
            Event::Empty(e) => parser.element(&Tag::new(&e))?,
            Event::Text(text) if parser.wants_text() => parser.text(xml::text(&text)?),
            Event::CData(cdata) if parser.wants_text() => parser.text(xml::cdata(&cdata)),
            Event::End(e) => {
                parser.leave(e.name().as_ref());
                nesting.leave();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    nesting.finish()?;
    Ok(parser.finish())
}

impl<'a> RssParser<'a> {
    fn new(units: WeatherUnit, code_provider: Option<&'a dyn WeatherCodeProvider>) -> Self {
        Self {
            current: CurrentWeather {
                units: units.clone(),
                ..CurrentWeather::default()
            },
            forecast: WeatherForecast::new(units),
            today_seen: false,
            context: Context::Channel,
            code_provider,
        }
    }

    fn element(&mut self, tag: &Tag<'_>) -> Result<(), ParseError> {
        match tag.name().as_str() {
            "yweather:wind" => {
                let wind = &mut self.current.wind;
                wind.chill = tag.parse("chill")?;
                wind.direction = tag.parse("direction")?;
                wind.speed = tag.parse("speed")?;
            }
            "yweather:atmosphere" => {
                let atmosphere = &mut self.current.atmosphere;
                atmosphere.humidity = tag.parse("humidity")?;
                atmosphere.visibility = tag.parse("visibility")?;
                atmosphere.pressure = tag.parse("pressure")?;
                atmosphere.pressure_trend = tag.parse("rising")?;
            }
            "yweather:forecast" => self.forecast_day(tag)?,
            "yweather:condition" => {
                self.current.condition = self.condition(tag)?;
                self.current.temperature.current = tag.parse("temp")?;
            }
            "yweather:units" => {
                let units = WeatherUnit {
                    temperature: format!("°{}", tag.required("temperature")?),
                    pressure: tag.required("pressure")?,
                    distance: tag.required("distance")?,
                    speed: tag.required("speed")?,
                };
                self.forecast.units = units.clone();
                self.current.units = units;
            }
            "yweather:location" => {
                let location = &mut self.current.location;
                location.city = tag.attr("city")?.unwrap_or_default();
                location.region = tag.attr("region")?.unwrap_or_default();
                location.country = tag.attr("country")?.unwrap_or_default();
            }
            "yweather:astronomy" => {
                self.current.location.sunrise = time_of_day(tag, "sunrise")?;
                self.current.location.sunset = time_of_day(tag, "sunset")?;
            }
            _ => {}
        }

        Ok(())
    }

    /// The first forecast element is today and only refines the current
    /// temperature range; every later one is a day of its own.
    fn forecast_day(&mut self, tag: &Tag<'_>) -> Result<(), ParseError> {
        let temperature = ForecastTemperature {
            min: tag.parse("low")?,
            max: tag.parse("high")?,
        };

        if !self.today_seen {
            self.today_seen = true;
            self.current.temperature.min = temperature.min;
            self.current.temperature.max = temperature.max;
            return Ok(());
        }

        let date = match tag.attr("date")? {
            Some(value) => match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(err) => {
                    tracing::warn!(%value, %err, "ignoring unparseable forecast date");
                    None
                }
            },
            None => None,
        };

        let day = DayForecast {
            day: tag.attr("day")?,
            date,
            temperature,
            condition: self.condition(tag)?,
        };
        self.forecast.add_forecast(day);
        Ok(())
    }

    fn condition(&self, tag: &Tag<'_>) -> Result<Condition, ParseError> {
        let weather_id: i32 = tag.parse("code")?;

        Ok(Condition {
            weather_id,
            weather_code: self.code_provider.map(|codes| codes.weather_code(weather_id)),
            icon: weather_id.to_string(),
            description: tag.attr("text")?.unwrap_or_default(),
        })
    }

    fn enter(&mut self, name: &[u8]) {
        match (self.context, name) {
            (_, b"image") => self.context = Context::Image,
            (Context::Channel, b"lastBuildDate") => self.context = Context::LastBuildDate,
            _ => {}
        }
    }

    fn leave(&mut self, name: &[u8]) {
        match (self.context, name) {
            (Context::Image, b"image") | (Context::LastBuildDate, b"lastBuildDate") => {
                self.context = Context::Channel
            }
            _ => {}
        }
    }

    fn wants_text(&self) -> bool {
        self.context == Context::LastBuildDate
    }

    fn text(&mut self, text: String) {
        self.current.last_update = Some(text);
    }

    fn finish(self) -> WeatherReport {
        WeatherReport {
            current: self.current,
            forecast: self.forecast,
        }
    }
}

/// Seconds since midnight of an `h:mm am` attribute, i.e. its epoch time on 1970-01-01 UTC.
///
/// Absent or unparseable values leave the field unset.
fn time_of_day(tag: &Tag<'_>, attr: &'static str) -> Result<Option<i64>, ParseError> {
    let Some(value) = tag.attr(attr)? else {
        return Ok(None);
    };

    match NaiveTime::parse_from_str(value.trim(), TIME_FORMAT) {
        Ok(time) => Ok(Some(i64::from(time.num_seconds_from_midnight()))),
        Err(err) => {
            tracing::warn!(attr, %value, %err, "ignoring unparseable astronomy time");
            Ok(None)
        }
    }
}
