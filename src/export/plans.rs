// src/export/plans.rs

use crate::constants::{BASIC_PLAN_MONTHLY_EXPORTS, FREE_PLAN_MONTHLY_EXPORTS};
use crate::types::ValidationError;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Subscription tier of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Plan {
    #[default]
    Free,
    Basic,
    Pro,
}

impl Plan {
    /// Exports allowed per calendar month; `None` is unlimited.
    pub fn monthly_limit(&self) -> Option<u32> {
        match self {
            Plan::Free => Some(FREE_PLAN_MONTHLY_EXPORTS),
            Plan::Basic => Some(BASIC_PLAN_MONTHLY_EXPORTS),
            Plan::Pro => None,
        }
    }

    /// Whether a caller who already made `used` exports this month may
    /// make another.
    pub fn allows(&self, used: u32) -> bool {
        self.monthly_limit().map_or(true, |limit| used < limit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::Pro => "pro",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "basic" => Ok(Plan::Basic),
            "pro" => Ok(Plan::Pro),
            other => Err(ValidationError::InvalidPlan(other.to_string())),
        }
    }
}

/// Midnight UTC on the first day of `now`'s month.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
