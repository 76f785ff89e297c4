//! Date splitting for date-group targets.
//!
//! Recognizes `YYYY-M-D` and `M/D/YYYY`. Month and day lose their leading
//! zeros. Anything else that is non-empty comes back as a month-only value so
//! the form's date widget can still try to coerce it.

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("valid ISO date pattern"));

static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid US date pattern"));

/// Result of splitting a date string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitDate {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

impl SplitDate {
    /// True when the input was not a recognized date and only the raw value
    /// survives in `month`.
    pub fn is_fallback(&self) -> bool {
        self.year.is_none() && self.day.is_none() && self.month.is_some()
    }
}

/// Split a date string into year, month and day.
pub fn split_date(input: &str) -> SplitDate {
    if input.is_empty() {
        return SplitDate::default();
    }

    if let Some(caps) = ISO_DATE.captures(input) {
        return SplitDate {
            year: Some(caps[1].to_string()),
            month: Some(strip_zeros(&caps[2])),
            day: Some(strip_zeros(&caps[3])),
        };
    }

    if let Some(caps) = US_DATE.captures(input) {
        return SplitDate {
            year: Some(caps[3].to_string()),
            month: Some(strip_zeros(&caps[1])),
            day: Some(strip_zeros(&caps[2])),
        };
    }

    SplitDate {
        month: Some(input.to_string()),
        ..SplitDate::default()
    }
}

// Captures are one or two ASCII digits, so the parse cannot fail.
fn strip_zeros(digits: &str) -> String {
    digits
        .parse::<u32>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| digits.to_string())
}
