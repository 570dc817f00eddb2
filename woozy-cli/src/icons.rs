//! Icon lookup tables for the report.
//!
//! Lookups never fail: unknown sky conditions and wind codes render as "".

use std::{collections::HashMap, sync::LazyLock};

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IconSet {
    /// Unicode weather symbols and arrows.
    #[default]
    Emoji,
    /// ASCII-only labels for terminals without symbol fonts.
    Plain,
}

/// Fixed glyphs used around the looked-up icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub sun: &'static str,
    pub sunrise: &'static str,
    pub sunset: &'static str,
    pub thermometer: &'static str,
    pub degrees: &'static str,
    pub umbrella: &'static str,
    pub wind: &'static str,
}

static EMOJI_SKY: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Rain", "\u{1F327}"),
        ("Snow", "\u{1F328}"),
        ("Rain and thunder", "\u{26C8}"),
        ("Light rain", "\u{1F326}"),
        ("Light snow", "\u{1F328}"),
        ("Light rain and thunder", "\u{26C8}"),
        ("Light rain showers", "\u{1F326}"),
        ("Light rain showers and thunder", "\u{26C8}"),
        ("Light snow showers", "\u{1F328}"),
        ("Heavy rain", "\u{1F327}"),
        ("Heavy rain and thunder", "\u{26C8}"),
        ("Heavy snow", "\u{1F328}"),
        ("Rain showers", "\u{1F326}"),
        ("Rain showers and thunder", "\u{26C8}"),
        ("Snow showers", "\u{1F328}"),
        ("Clear sky", "\u{263C}"),
        ("Cloudy", "\u{2601}"),
        ("Partly cloudy", "\u{26C5}"),
        ("Fair", "\u{26C5}"),
    ])
});

static PLAIN_SKY: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Rain", "rain"),
        ("Snow", "snow"),
        ("Rain and thunder", "storm"),
        ("Light rain", "drizzle"),
        ("Light snow", "flurry"),
        ("Light rain and thunder", "storm"),
        ("Light rain showers", "showers"),
        ("Light rain showers and thunder", "storm"),
        ("Light snow showers", "flurry"),
        ("Heavy rain", "RAIN"),
        ("Heavy rain and thunder", "STORM"),
        ("Heavy snow", "SNOW"),
        ("Rain showers", "showers"),
        ("Rain showers and thunder", "storm"),
        ("Snow showers", "snow"),
        ("Clear sky", "clear"),
        ("Cloudy", "cloudy"),
        ("Partly cloudy", "partly"),
        ("Fair", "fair"),
    ])
});

// Arrows point where the wind blows to, so a north wind points down.
static EMOJI_WIND: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("N", "\u{2193}"),
        ("S", "\u{2191}"),
        ("E", "\u{2190}"),
        ("W", "\u{2192}"),
        ("NE", "\u{2199}"),
        ("NNE", "\u{2199}"),
        ("NEE", "\u{2199}"),
        ("ENE", "\u{2199}"),
        ("NW", "\u{2198}"),
        ("NNW", "\u{2198}"),
        ("NWW", "\u{2198}"),
        ("WNW", "\u{2198}"),
        ("SE", "\u{2196}"),
        ("SEE", "\u{2196}"),
        ("SSE", "\u{2196}"),
        ("ESE", "\u{2196}"),
        ("SW", "\u{2197}"),
        ("SSW", "\u{2197}"),
        ("SWW", "\u{2197}"),
        ("WSW", "\u{2197}"),
    ])
});

static PLAIN_WIND: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("N", "from N"),
        ("S", "from S"),
        ("E", "from E"),
        ("W", "from W"),
        ("NE", "from NE"),
        ("NNE", "from NE"),
        ("NEE", "from NE"),
        ("ENE", "from NE"),
        ("NW", "from NW"),
        ("NNW", "from NW"),
        ("NWW", "from NW"),
        ("WNW", "from NW"),
        ("SE", "from SE"),
        ("SEE", "from SE"),
        ("SSE", "from SE"),
        ("ESE", "from SE"),
        ("SW", "from SW"),
        ("SSW", "from SW"),
        ("SWW", "from SW"),
        ("WSW", "from SW"),
    ])
});

impl IconSet {
    /// Icon for a yr.no symbol name such as "Partly cloudy".
    pub fn sky(self, name: &str) -> &'static str {
        let table = match self {
            Self::Emoji => &EMOJI_SKY,
            Self::Plain => &PLAIN_SKY,
        };
        table.get(name).copied().unwrap_or_default()
    }

    /// Icon for a compass code such as "SSW".
    pub fn wind(self, code: &str) -> &'static str {
        let table = match self {
            Self::Emoji => &EMOJI_WIND,
            Self::Plain => &PLAIN_WIND,
        };
        table.get(code).copied().unwrap_or_default()
    }

    pub fn glyphs(self) -> Glyphs {
        match self {
            Self::Emoji => Glyphs {
                sun: self.sky("Clear sky"),
                sunrise: self.wind("S"),
                sunset: self.wind("N"),
                thermometer: "\u{1F321}",
                degrees: "\u{2103}",
                umbrella: "\u{2602}",
                wind: "\u{1F32C}",
            },
            Self::Plain => Glyphs {
                sun: "sun",
                sunrise: "up",
                sunset: "down",
                thermometer: "temp",
                degrees: "C",
                umbrella: "precip",
                wind: "wind",
            },
        }
    }
}
