use std::fmt;

use chrono::{Datelike, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Calendar-month key in `YYYY-MM` form. Usage counters reset implicitly by
/// keying on a new month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BillingMonth(String);

impl BillingMonth {
    pub fn current() -> Self {
        let now = Utc::now();
        BillingMonth(format!("{:04}-{:02}", now.year(), now.month()))
    }

    pub fn from_parts(year: i32, month: u32) -> Self {
        BillingMonth(format!("{year:04}-{month:02}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row per (user, month). `cases_created` only grows within a month.
#[derive(Debug, Clone, FromRow)]
pub struct UsageCounter {
    pub user_id: Uuid,
    pub year_month: String,
    pub cases_created: i32,
}

/// Current-period consumption as embedded in the resolved entitlement.
/// An absent counter row means "no activity yet this month", never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub cases_created: i32,
}

impl UsageSnapshot {
    pub fn zero() -> Self {
        UsageSnapshot { cases_created: 0 }
    }
}

impl From<&UsageCounter> for UsageSnapshot {
    fn from(counter: &UsageCounter) -> Self {
        UsageSnapshot {
            cases_created: counter.cases_created,
        }
    }
}
