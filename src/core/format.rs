//! Display formatting for dates and numbers.

use crate::utils::error::{DashError, Result};
use crate::utils::validation::{validate_range, Validate};
use chrono::{Datelike, DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const INVALID_DATE: &str = "Invalid Date";

/// Sign, integer digits, remainder (fraction or exponent).
static NUMBER_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?)(\d+)(.*)$").expect("static regex"));

/// Date-only `YYYY` and `YYYY-MM`.
static PARTIAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:-(\d{2}))?$").expect("static regex"));

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "iso")]
    Iso,
}

impl Locale {
    pub const SUPPORTED: &'static [&'static str] = &["ko-KR", "en-US", "iso"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::KoKr => "ko-KR",
            Locale::EnUs => "en-US",
            Locale::Iso => "iso",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ko-KR" | "ko" => Ok(Locale::KoKr),
            "en-US" | "en" => Ok(Locale::EnUs),
            "iso" | "ISO" => Ok(Locale::Iso),
            other => Err(DashError::InvalidConfigValueError {
                field: "locale".to_string(),
                value: other.to_string(),
                reason: format!("Expected one of: {}", Locale::SUPPORTED.join(", ")),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSettings {
    #[serde(default)]
    pub locale: Locale,
    /// Zone used to render timestamps, as minutes east of UTC.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_utc_offset_minutes() -> i32 {
    9 * 60
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl Validate for FormatSettings {
    fn validate(&self) -> Result<()> {
        validate_range("format.utc_offset_minutes", self.utc_offset_minutes, -14 * 60, 14 * 60)
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    locale: Locale,
    zone: FixedOffset,
}

impl Formatter {
    pub fn new(settings: FormatSettings) -> Result<Self> {
        settings.validate()?;
        let zone = FixedOffset::east_opt(settings.utc_offset_minutes * 60).ok_or_else(|| {
            DashError::InvalidConfigValueError {
                field: "format.utc_offset_minutes".to_string(),
                value: settings.utc_offset_minutes.to_string(),
                reason: "Offset out of range".to_string(),
            }
        })?;
        Ok(Self {
            locale: settings.locale,
            zone,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Renders a date string in the configured locale, or `Invalid Date`.
    pub fn format_date(&self, input: &str) -> String {
        match self.parse_date(input) {
            Some(at) => self.render_date(at.date_naive()),
            None => {
                tracing::debug!("Unparseable date input: {:?}", input);
                INVALID_DATE.to_string()
            }
        }
    }

    pub fn format_number<N: fmt::Display>(&self, num: N) -> String {
        format_number(num)
    }

    fn parse_date(&self, input: &str) -> Option<DateTime<FixedOffset>> {
        let input = input.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(input) {
            return Some(at.with_timezone(&self.zone));
        }

        // Bare dates are UTC midnight; a missing month or day is the first.
        if let Some(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_partial_date(input))
        {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight).with_timezone(&self.zone));
        }

        // Date-times without an offset are wall-clock time in the configured zone.
        NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .and_then(|naive| self.zone.from_local_datetime(&naive).single())
    }

    fn render_date(&self, date: NaiveDate) -> String {
        match self.locale {
            Locale::KoKr => format!("{}. {}. {}.", date.year(), date.month(), date.day()),
            Locale::EnUs => date.format("%-m/%-d/%Y").to_string(),
            Locale::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }
}

fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let caps = PARTIAL_DATE.captures(input)?;
    let year = caps[1].parse().ok()?;
    let month = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            zone: FixedOffset::east_opt(default_utc_offset_minutes() * 60)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Groups the integer digits of `num` in threes with `,`.
///
/// The sign stays attached to the first digit and anything after the integer
/// digits (fraction, exponent) is kept as-is. Renderings that do not start
/// with digits, such as `NaN`, come back unchanged.
pub fn format_number<N: fmt::Display>(num: N) -> String {
    let text = num.to_string();
    let Some(caps) = NUMBER_PARTS.captures(&text) else {
        return text;
    };

    let sign = &caps[1];
    let digits = &caps[2];
    let rest = &caps[3];

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, rest)
}
