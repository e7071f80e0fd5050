use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Month, Utc};

use crate::errors::AppError;

/// Selects records sold in one calendar month, whatever the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    month: Month,
}

impl MonthFilter {
    /// Resolve a month name ("March", "mar", "MARCH") or number ("3", "03").
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("month is required".to_string()));
        }

        if let Ok(number) = trimmed.parse::<u8>() {
            return Month::try_from(number)
                .map(|month| Self { month })
                .map_err(|_| AppError::Validation(format!("invalid month: {}", trimmed)));
        }

        Month::from_str(trimmed)
            .map(|month| Self { month })
            .map_err(|_| AppError::Validation(format!("invalid month: {}", trimmed)))
    }

    /// Same as `parse`, but a missing parameter is reported as such.
    pub fn from_param(param: Option<&str>) -> Result<Self, AppError> {
        match param {
            Some(value) => Self::parse(value),
            None => Err(AppError::Validation("month is required".to_string())),
        }
    }

    pub fn number(&self) -> u32 {
        self.month.number_from_month()
    }

    /// Two-digit month code, "01" through "12".
    pub fn code(&self) -> String {
        format!("{:02}", self.number())
    }

    /// Dash-padded code as it appears inside an ISO date, e.g. "-03-".
    pub fn pattern(&self) -> String {
        format!("-{}-", self.code())
    }

    pub fn matches(&self, date: Option<&DateTime<Utc>>) -> bool {
        date.is_some_and(|d| d.month() == self.number())
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.month.name())
    }
}
