//! Recurrence descriptors: normalized repeat rules for records.
//!
//! Form input arrives either as a repeat keyword ("weekly") or as a
//! structured custom pattern. Both are resolved once, at the input boundary,
//! into a [`RecurrenceSpec`]; downstream code never inspects raw payloads.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fallback occurrence bound for open-ended series.
///
/// The calendar collaborator's contract requires recurring series to be
/// bounded, so "repeats forever" becomes "repeats 100 times".
pub const FALLBACK_OCCURRENCES: u32 = 100;

/// Repeat frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn keyword(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    fn unit_noun(&self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }
}

/// When a custom recurrence series stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EndCondition {
    /// Open-ended; bounded at [`FALLBACK_OCCURRENCES`] by the calendar mapping.
    Never,
    After { count: u32 },
    On { date: NaiveDate },
}

/// Normalized repeat-rule description for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecurrenceInput", into = "RecurrenceInput")]
pub enum RecurrenceSpec {
    None,
    Simple(Frequency),
    Custom {
        frequency: Frequency,
        interval: u32,
        end: EndCondition,
    },
}

impl RecurrenceSpec {
    pub fn is_none(&self) -> bool {
        matches!(self, RecurrenceSpec::None)
    }

    /// Display string for list/detail views.
    ///
    /// "" for none, "(weekly)" for simple, "Every 2 week(s), until 2025-01-01"
    /// for custom patterns.
    pub fn describe(&self) -> String {
        match self {
            RecurrenceSpec::None => String::new(),
            RecurrenceSpec::Simple(frequency) => format!("({})", frequency.keyword()),
            RecurrenceSpec::Custom { .. } => self.summary(),
        }
    }

    /// Short description without decoration, used in event descriptions.
    pub fn summary(&self) -> String {
        match self {
            RecurrenceSpec::None => "none".to_string(),
            RecurrenceSpec::Simple(frequency) => frequency.keyword().to_string(),
            RecurrenceSpec::Custom { frequency, interval, end } => {
                let base = format!("Every {} {}(s)", interval, frequency.unit_noun());
                match end {
                    EndCondition::Never => base,
                    EndCondition::After { count } => format!("{}, {} times", base, count),
                    EndCondition::On { date } => {
                        format!("{}, until {}", base, date.format("%Y-%m-%d"))
                    }
                }
            }
        }
    }

    /// Map this spec to the calendar collaborator's recurrence rule.
    ///
    /// Simple specs become a single rule of that frequency bounded at
    /// [`FALLBACK_OCCURRENCES`]; custom specs apply their interval and are
    /// bounded per their end condition.
    pub fn to_rule(&self) -> Option<RecurrenceRule> {
        match self {
            RecurrenceSpec::None => None,
            RecurrenceSpec::Simple(frequency) => Some(RecurrenceRule {
                frequency: *frequency,
                interval: 1,
                count: Some(FALLBACK_OCCURRENCES),
                until: None,
            }),
            RecurrenceSpec::Custom { frequency, interval, end } => {
                let (count, until) = match end {
                    EndCondition::Never => (Some(FALLBACK_OCCURRENCES), None),
                    EndCondition::After { count } => (Some(*count), None),
                    EndCondition::On { date } => (None, Some(end_of_day(*date))),
                };
                Some(RecurrenceRule {
                    frequency: *frequency,
                    interval: *interval,
                    count,
                    until,
                })
            }
        }
    }
}

/// A bounded recurrence rule as consumed by the calendar collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    /// Exactly one of `count` / `until` is set.
    pub count: Option<u32>,
    pub until: Option<DateTime<Utc>>,
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    // 23:59:59 is always a valid time (unwrap safe)
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
    Utc.from_utc_datetime(&date.and_time(time))
}

// =============================================================================
// Input boundary
// =============================================================================

/// Raw recurrence payload as submitted by forms or found in persisted blobs:
/// either a repeat keyword or a structured custom pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecurrenceInput {
    Custom(CustomRecurrence),
    Keyword(String),
}

/// Custom repeat pattern as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRecurrence {
    #[serde(rename = "type", default = "custom_tag")]
    pub kind: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub interval: Option<u32>,
    #[serde(default)]
    pub end: Option<EndCondition>,
}

fn custom_tag() -> String {
    "custom".to_string()
}

/// Resolve a raw recurrence payload into a normalized spec.
///
/// Custom intervals default to 1 when absent or non-positive; a missing end
/// condition defaults to `Never`. Unrecognized keywords mean "no repeat".
pub fn normalize_recurrence(input: RecurrenceInput) -> RecurrenceSpec {
    RecurrenceSpec::from(input)
}

impl From<RecurrenceInput> for RecurrenceSpec {
    fn from(input: RecurrenceInput) -> Self {
        match input {
            RecurrenceInput::Keyword(keyword) => match keyword.as_str() {
                "daily" => RecurrenceSpec::Simple(Frequency::Daily),
                "weekly" => RecurrenceSpec::Simple(Frequency::Weekly),
                "monthly" => RecurrenceSpec::Simple(Frequency::Monthly),
                "yearly" => RecurrenceSpec::Simple(Frequency::Yearly),
                _ => RecurrenceSpec::None,
            },
            RecurrenceInput::Custom(custom) => {
                let interval = custom.interval.filter(|i| *i >= 1).unwrap_or(1);
                let end = match custom.end {
                    Some(EndCondition::After { count: 0 }) | None => EndCondition::Never,
                    Some(end) => end,
                };
                RecurrenceSpec::Custom { frequency: custom.frequency, interval, end }
            }
        }
    }
}

impl From<RecurrenceSpec> for RecurrenceInput {
    fn from(spec: RecurrenceSpec) -> Self {
        match spec {
            RecurrenceSpec::None => RecurrenceInput::Keyword("none".to_string()),
            RecurrenceSpec::Simple(frequency) => {
                RecurrenceInput::Keyword(frequency.keyword().to_string())
            }
            RecurrenceSpec::Custom { frequency, interval, end } => {
                RecurrenceInput::Custom(CustomRecurrence {
                    kind: custom_tag(),
                    frequency,
                    interval: Some(interval),
                    end: Some(end),
                })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_normalizes_to_simple() {
        let spec: RecurrenceSpec = serde_json::from_str(r#""weekly""#).unwrap();
        assert_eq!(spec, RecurrenceSpec::Simple(Frequency::Weekly));
    }

    #[test]
    fn none_and_unknown_keywords_normalize_to_none() {
        let none: RecurrenceSpec = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(none, RecurrenceSpec::None);

        let unknown: RecurrenceSpec = serde_json::from_str(r#""fortnightly""#).unwrap();
        assert_eq!(unknown, RecurrenceSpec::None);
    }

    #[test]
    fn custom_payload_normalizes() {
        let spec: RecurrenceSpec = serde_json::from_str(
            r#"{"type":"custom","frequency":"weekly","interval":2,"end":{"type":"after","count":5}}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            RecurrenceSpec::Custom {
                frequency: Frequency::Weekly,
                interval: 2,
                end: EndCondition::After { count: 5 },
            }
        );
    }

    #[test]
    fn custom_defaults_interval_and_end() {
        let spec: RecurrenceSpec =
            serde_json::from_str(r#"{"frequency":"daily","interval":0}"#).unwrap();
        assert_eq!(
            spec,
            RecurrenceSpec::Custom {
                frequency: Frequency::Daily,
                interval: 1,
                end: EndCondition::Never,
            }
        );
    }

    #[test]
    fn simple_maps_to_bounded_rule() {
        let rule = RecurrenceSpec::Simple(Frequency::Monthly).to_rule().unwrap();
        assert_eq!(rule.frequency, Frequency::Monthly);
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.count, Some(FALLBACK_OCCURRENCES));
        assert_eq!(rule.until, None);
    }

    #[test]
    fn custom_after_maps_to_exact_count() {
        let spec = RecurrenceSpec::Custom {
            frequency: Frequency::Weekly,
            interval: 2,
            end: EndCondition::After { count: 5 },
        };
        let rule = spec.to_rule().unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.count, Some(5));
        assert_eq!(rule.until, None);
    }

    #[test]
    fn custom_on_maps_to_end_of_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let spec = RecurrenceSpec::Custom {
            frequency: Frequency::Daily,
            interval: 1,
            end: EndCondition::On { date },
        };
        let rule = spec.to_rule().unwrap();
        assert_eq!(rule.count, None);
        assert_eq!(
            rule.until.unwrap().to_rfc3339(),
            "2025-01-01T23:59:59+00:00"
        );
    }

    #[test]
    fn none_has_no_rule() {
        assert_eq!(RecurrenceSpec::None.to_rule(), None);
    }

    #[test]
    fn describe_strings() {
        assert_eq!(RecurrenceSpec::None.describe(), "");
        assert_eq!(RecurrenceSpec::Simple(Frequency::Weekly).describe(), "(weekly)");

        let until = RecurrenceSpec::Custom {
            frequency: Frequency::Weekly,
            interval: 2,
            end: EndCondition::On { date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() },
        };
        assert_eq!(until.describe(), "Every 2 week(s), until 2025-01-01");

        let times = RecurrenceSpec::Custom {
            frequency: Frequency::Daily,
            interval: 3,
            end: EndCondition::After { count: 10 },
        };
        assert_eq!(times.describe(), "Every 3 day(s), 10 times");
    }

    #[test]
    fn spec_round_trips_through_wire_format() {
        let spec = RecurrenceSpec::Custom {
            frequency: Frequency::Monthly,
            interval: 2,
            end: EndCondition::After { count: 4 },
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: RecurrenceSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);

        let simple = RecurrenceSpec::Simple(Frequency::Daily);
        assert_eq!(serde_json::to_string(&simple).unwrap(), r#""daily""#);
    }
}
