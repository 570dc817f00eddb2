use chrono::{DateTime, Local, TimeDelta};
use serde::Deserialize;

use crate::{
    error::Result,
    timefmt::{deserialize_attr, deserialize_attr_opt, deserialize_text},
};

/// Parsed yr.no forecast feed for one place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct ForecastDocument {
    pub credit: Credit,
    pub location: Location,
    pub meta: Meta,
    pub sun: Sun,
    /// Entries in feed order. Empty when the feed carries no `<tabular>` rows.
    pub forecast: Vec<ForecastEntry>,
}

impl ForecastDocument {
    /// Decode a raw XML feed.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Credit {
    #[serde(rename = "@url", default)]
    pub url: String,
    #[serde(rename = "@text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub country: String,
    pub timezone: Timezone,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timezone {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@utcoffsetMinutes")]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Meta {
    #[serde(rename = "lastupdate", deserialize_with = "deserialize_text")]
    pub last_update: DateTime<Local>,
    #[serde(rename = "nextupdate", deserialize_with = "deserialize_text")]
    pub next_update: DateTime<Local>,
}

impl Meta {
    pub fn hours_since_update(&self, now: DateTime<Local>) -> f64 {
        hours(now - self.last_update)
    }

    /// Negative once the next update is overdue.
    pub fn hours_to_next_update(&self, now: DateTime<Local>) -> f64 {
        hours(self.next_update - now)
    }

    /// A document is stale once its next update is no longer in the future.
    pub fn is_stale(&self, now: DateTime<Local>) -> bool {
        self.next_update <= now
    }
}

/// Sunrise and sunset. Polar night and midnight sun carry no times, only
/// `never_rise` or `never_set`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sun {
    #[serde(rename = "@rise", default, deserialize_with = "deserialize_attr_opt")]
    pub rise: Option<DateTime<Local>>,
    #[serde(rename = "@set", default, deserialize_with = "deserialize_attr_opt")]
    pub set: Option<DateTime<Local>>,
    #[serde(rename = "@never_rise", default)]
    pub never_rise: bool,
    #[serde(rename = "@never_set", default)]
    pub never_set: bool,
}

impl Sun {
    /// Hours between sunrise and sunset: 24 under midnight sun, 0 when
    /// either time is missing otherwise.
    pub fn daylight_hours(&self) -> f64 {
        match (self.rise, self.set) {
            (Some(rise), Some(set)) => hours(set - rise),
            _ if self.never_set => 24.0,
            _ => 0.0,
        }
    }
}

/// One `<time>` row of the tabular forecast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastEntry {
    #[serde(rename = "@from", deserialize_with = "deserialize_attr")]
    pub from: DateTime<Local>,
    #[serde(rename = "@to", deserialize_with = "deserialize_attr")]
    pub to: DateTime<Local>,
    /// 0 night, 1 morning, 2 day, 3 evening.
    #[serde(rename = "@period", default)]
    pub period: i32,
    #[serde(default)]
    pub pressure: Pressure,
    #[serde(default)]
    pub precipitation: Precipitation,
    #[serde(default)]
    pub symbol: Symbol,
    #[serde(default)]
    pub temperature: Temperature,
    #[serde(rename = "windDirection", default)]
    pub wind_direction: WindDirection,
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: WindSpeed,
}

impl ForecastEntry {
    /// Label for the period code, empty for codes outside 0..=3.
    pub fn period_name(&self) -> &'static str {
        match self.period {
            0 => "Night",
            1 => "Morning",
            2 => "Day",
            3 => "Evening",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pressure {
    #[serde(rename = "@unit")]
    pub unit: String,
    #[serde(rename = "@value")]
    pub value: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "@value")]
    pub value: f32,
    #[serde(rename = "@minvalue")]
    pub min: f32,
    #[serde(rename = "@maxvalue")]
    pub max: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Symbol {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@number")]
    pub number: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Temperature {
    #[serde(rename = "@unit")]
    pub unit: String,
    #[serde(rename = "@value")]
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindDirection {
    #[serde(rename = "@deg")]
    pub deg: f32,
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "@name")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindSpeed {
    #[serde(rename = "@mps")]
    pub mps: f32,
    #[serde(rename = "@name")]
    pub name: String,
}

// Wire shape: `credit>link` and `forecast>tabular>time` nest one level deeper than the model.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    credit: RawCredit,
    #[serde(default)]
    location: Location,
    meta: Meta,
    #[serde(default)]
    sun: Sun,
    #[serde(default)]
    forecast: RawForecast,
}

#[derive(Debug, Default, Deserialize)]
struct RawCredit {
    #[serde(default)]
    link: Credit,
}

#[derive(Debug, Default, Deserialize)]
struct RawForecast {
    #[serde(default)]
    tabular: RawTabular,
}

#[derive(Debug, Default, Deserialize)]
struct RawTabular {
    #[serde(rename = "time", default)]
    entries: Vec<ForecastEntry>,
}

impl TryFrom<RawDocument> for ForecastDocument {
    type Error = String;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let entries = raw.forecast.tabular.entries;

        if let Some(bad) = entries.iter().find(|e| e.from > e.to) {
            return Err(format!(
                "forecast entry starts after it ends ({} > {})",
                bad.from, bad.to
            ));
        }

        Ok(Self {
            credit: raw.credit.link,
            location: raw.location,
            meta: raw.meta,
            sun: raw.sun,
            forecast: entries,
        })
    }
}

fn hours(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 3_600_000.0
}
