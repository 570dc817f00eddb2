//! Plain-text forecast report.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use chrono::{
    DateTime, Local,
    format::{Item, StrftimeItems},
};
use woozy_core::{ForecastDocument, ForecastEntry};

use crate::icons::IconSet;

pub const DEFAULT_DATE_FORMAT: &str = "%B %d (%A):";

/// Reject strftime patterns chrono cannot render.
pub fn parse_date_format(s: &str) -> Result<String, String> {
    if StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid date format '{s}'"));
    }
    Ok(s.to_string())
}

/// Forecast entries grouped by the local calendar day they start on,
/// in ascending day order. Entries keep their feed order within a day.
pub fn group_by_day(entries: &[ForecastEntry]) -> Vec<(String, Vec<&ForecastEntry>)> {
    let mut days: BTreeMap<String, Vec<&ForecastEntry>> = BTreeMap::new();
    for entry in entries {
        days.entry(entry.from.format("%Y%m%d").to_string())
            .or_default()
            .push(entry);
    }
    days.into_iter().collect()
}

/// Local `HH:MM`, or `--:--` when the feed has no time.
fn clock(time: Option<DateTime<Local>>) -> String {
    time.map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
}

#[derive(Debug, Clone)]
pub struct Presenter {
    icons: IconSet,
    date_format: String,
}

impl Presenter {
    pub fn new(icons: IconSet, date_format: impl Into<String>) -> Result<Self> {
        let date_format = parse_date_format(&date_format.into()).map_err(|e| anyhow!(e))?;
        Ok(Self { icons, date_format })
    }

    /// Header, up to `days` days of forecast and footer.
    pub fn render(&self, doc: &ForecastDocument, days: usize, now: DateTime<Local>) -> String {
        let mut out = self.header(doc);
        out.push_str(&self.forecast(doc, days));
        out.push_str(&self.footer(doc, now));
        out
    }

    pub fn header(&self, doc: &ForecastDocument) -> String {
        let g = self.icons.glyphs();
        format!(
            "{} / {} | {} {} {} {} {} ({:.1} hours)\n\n",
            doc.location.country,
            doc.location.name,
            g.sun,
            g.sunrise,
            clock(doc.sun.rise),
            g.sunset,
            clock(doc.sun.set),
            doc.sun.daylight_hours(),
        )
    }

    /// Day blocks for the first `days` days. Asking for more days than the
    /// feed covers shows every available day.
    pub fn forecast(&self, doc: &ForecastDocument, days: usize) -> String {
        let groups = group_by_day(&doc.forecast);
        if days > groups.len() {
            tracing::warn!(
                requested = days,
                available = groups.len(),
                "Forecast covers fewer days than requested"
            );
        }

        let mut out = String::new();
        for (_, entries) in groups.iter().take(days) {
            if let Some(first) = entries.first() {
                out.push_str(&format!("{}\n", first.from.format(&self.date_format)));
            }
            for entry in entries {
                out.push_str(&self.entry_line(entry));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    pub fn entry_line(&self, entry: &ForecastEntry) -> String {
        let g = self.icons.glyphs();
        let period = match entry.period_name() {
            "" => String::new(),
            name => format!("{:<9}", format!("{name}:")),
        };

        format!(
            " {} {}    {} {}{}    {}  {:.1}mm    {}  {:.1} m/s {}",
            period,
            self.icons.sky(&entry.symbol.name),
            g.thermometer,
            entry.temperature.value,
            g.degrees,
            g.umbrella,
            entry.precipitation.value,
            g.wind,
            entry.wind_speed.mps,
            self.icons.wind(&entry.wind_direction.code),
        )
    }

    pub fn footer(&self, doc: &ForecastDocument, now: DateTime<Local>) -> String {
        format!(
            "Forecast issued {:.1} hours ago, next update in {:.1} hours\n\n{}.\n{}\n",
            doc.meta.hours_since_update(now),
            doc.meta.hours_to_next_update(now),
            doc.credit.text,
            doc.credit.url,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use woozy_core::{
        model::{Credit, Location, Meta, Sun, Symbol, Temperature},
        timefmt::parse_local,
    };

    fn at(value: &str) -> DateTime<Local> {
        parse_local(value).expect("valid timestamp")
    }

    fn entry(from: &str, period: i32, sky: &str, temperature: i32) -> ForecastEntry {
        let from = at(from);
        ForecastEntry {
            from,
            to: from + TimeDelta::hours(6),
            period,
            pressure: Default::default(),
            precipitation: Default::default(),
            symbol: Symbol {
                name: sky.to_string(),
                number: 0,
            },
            temperature: Temperature {
                unit: "celsius".to_string(),
                value: temperature,
            },
            wind_direction: Default::default(),
            wind_speed: Default::default(),
        }
    }

    fn document(forecast: Vec<ForecastEntry>) -> ForecastDocument {
        ForecastDocument {
            credit: Credit {
                url: "http://www.yr.no/place/Sweden/".to_string(),
                text: "Weather forecast from Yr".to_string(),
            },
            location: Location {
                name: "Estersmark".to_string(),
                country: "Sweden".to_string(),
                ..Default::default()
            },
            meta: Meta {
                last_update: at("2024-03-01T08:00:00"),
                next_update: at("2024-03-01T20:00:00"),
            },
            sun: Sun {
                rise: Some(at("2024-03-01T07:10:00")),
                set: Some(at("2024-03-01T17:28:00")),
                ..Default::default()
            },
            forecast,
        }
    }

    fn presenter() -> Presenter {
        Presenter::new(IconSet::Emoji, DEFAULT_DATE_FORMAT).expect("default format is valid")
    }

    #[test]
    fn groups_by_day_in_ascending_order() {
        let entries = vec![
            entry("2024-03-01T12:00:00", 2, "Cloudy", 1),
            entry("2024-03-02T06:00:00", 1, "Fair", 2),
            entry("2024-03-01T18:00:00", 3, "Rain", 3),
        ];

        let groups = group_by_day(&entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "20240301");
        assert_eq!(groups[1].0, "20240302");
        let first_day: Vec<i32> = groups[0].1.iter().map(|e| e.temperature.value).collect();
        assert_eq!(first_day, vec![1, 3]);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn empty_forecast_has_no_groups() {
        assert!(group_by_day(&[]).is_empty());
    }

    #[test]
    fn unknown_sky_condition_renders_empty_icon() {
        let line = presenter().entry_line(&entry("2024-03-01T12:00:00", 2, "Volcanic ash", 4));
        assert!(line.starts_with(" Day:      "));
        assert!(line.contains("\u{1F321} 4\u{2103}"));
    }

    #[test]
    fn unknown_period_renders_without_label() {
        let line = presenter().entry_line(&entry("2024-03-01T12:00:00", 9, "Cloudy", 4));
        assert!(line.starts_with("  \u{2601}"));
    }

    #[test]
    fn entry_line_layout() {
        let mut e = entry("2024-03-01T00:00:00", 0, "Clear sky", -5);
        e.precipitation.value = 0.3;
        e.wind_speed.mps = 3.0;
        e.wind_direction.code = "N".to_string();

        let plain = Presenter::new(IconSet::Plain, DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(
            plain.entry_line(&e),
            " Night:    clear    temp -5C    precip  0.3mm    wind  3.0 m/s from N"
        );
    }

    #[test]
    fn header_shows_sun_times_and_daylight() {
        let header = presenter().header(&document(vec![]));
        assert_eq!(
            header,
            "Sweden / Estersmark | \u{263C} \u{2191} 07:10 \u{2193} 17:28 (10.3 hours)\n\n"
        );
    }

    #[test]
    fn polar_night_header_shows_placeholders() {
        let mut doc = document(vec![]);
        doc.sun = Sun {
            never_rise: true,
            ..Default::default()
        };

        assert_eq!(
            presenter().header(&doc),
            "Sweden / Estersmark | \u{263C} \u{2191} --:-- \u{2193} --:-- (0.0 hours)\n\n"
        );
    }

    #[test]
    fn polar_night_feed_renders_full_report() {
        let xml = r#"<weatherdata>
  <location><name>Tromso</name><country>Norway</country></location>
  <credit><link text="Weather forecast from Yr" url="http://www.yr.no/" /></credit>
  <meta><lastupdate>2024-12-20T08:00:00</lastupdate><nextupdate>2024-12-20T20:00:00</nextupdate></meta>
  <sun never_rise="true" />
  <forecast><tabular>
    <time from="2024-12-20T12:00:00" to="2024-12-20T18:00:00" period="2">
      <symbol number="4" name="Cloudy" />
      <temperature unit="celsius" value="-8" />
    </time>
  </tabular></forecast>
</weatherdata>"#;
        let doc = ForecastDocument::from_xml(xml).expect("polar night feed must decode");

        let out = presenter().render(&doc, 3, at("2024-12-20T09:00:00"));

        assert!(out.starts_with("Norway / Tromso | "));
        assert!(out.contains("--:--"));
        assert!(out.contains("December 20 (Friday):"));
        assert!(out.contains("-8\u{2103}"));
    }

    #[test]
    fn requesting_too_many_days_is_clamped() {
        let doc = document(vec![
            entry("2024-03-01T12:00:00", 2, "Cloudy", 1),
            entry("2024-03-02T12:00:00", 2, "Cloudy", 2),
        ]);

        let out = presenter().forecast(&doc, 10);

        assert!(out.contains("March 01 (Friday):"));
        assert!(out.contains("March 02 (Saturday):"));
        assert_eq!(out.lines().filter(|l| l.starts_with(" Day:")).count(), 2);
    }

    #[test]
    fn forecast_shows_only_requested_days() {
        let doc = document(vec![
            entry("2024-03-02T12:00:00", 2, "Cloudy", 2),
            entry("2024-03-01T12:00:00", 2, "Cloudy", 1),
        ]);

        let out = presenter().forecast(&doc, 1);

        assert!(out.contains("March 01 (Friday):"));
        assert!(!out.contains("March 02"));
    }

    #[test]
    fn custom_date_format_is_used_for_day_headings() {
        let doc = document(vec![entry("2024-03-01T12:00:00", 2, "Cloudy", 1)]);
        let p = Presenter::new(IconSet::Emoji, "%A %d/%m:").unwrap();

        assert!(p.forecast(&doc, 1).starts_with("Friday 01/03:\n"));
    }

    #[test]
    fn footer_reports_update_times_and_credit() {
        let doc = document(vec![]);
        let now = at("2024-03-01T09:30:00");

        assert_eq!(
            presenter().footer(&doc, now),
            "Forecast issued 1.5 hours ago, next update in 10.5 hours\n\n\
             Weather forecast from Yr.\nhttp://www.yr.no/place/Sweden/\n"
        );
    }

    #[test]
    fn overdue_update_is_negative() {
        let doc = document(vec![]);
        let footer = presenter().footer(&doc, at("2024-03-01T21:00:00"));
        assert!(footer.contains("next update in -1.0 hours"));
    }

    #[test]
    fn render_orders_header_forecast_footer() {
        let doc = document(vec![entry("2024-03-01T12:00:00", 2, "Cloudy", 1)]);
        let out = presenter().render(&doc, 3, at("2024-03-01T09:30:00"));

        let header = out.find("Sweden / Estersmark").unwrap();
        let day = out.find("March 01").unwrap();
        let footer = out.find("Forecast issued").unwrap();
        assert!(header < day && day < footer);
    }

    #[test]
    fn invalid_date_format_is_rejected() {
        assert!(parse_date_format("%Q").is_err());
        assert!(Presenter::new(IconSet::Emoji, "%").is_err());
        assert!(parse_date_format("%d.%m.").is_ok());
    }
}
