//! Subscription lengths offered when adding or renewing.

use chrono::{Days, NaiveDate};

const DAYS_PER_MONTH: u64 = 30;
const REMIND_DAYS_BEFORE: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanLength {
    OneMonth,
    ThreeMonths,
    SixMonths,
    Year,
}

impl PlanLength {
    pub const ALL: [PlanLength; 4] = [
        PlanLength::OneMonth,
        PlanLength::ThreeMonths,
        PlanLength::SixMonths,
        PlanLength::Year,
    ];

    pub fn from_months(months: u32) -> Option<PlanLength> {
        match months {
            1 => Some(PlanLength::OneMonth),
            3 => Some(PlanLength::ThreeMonths),
            6 => Some(PlanLength::SixMonths),
            12 => Some(PlanLength::Year),
            _ => None,
        }
    }

    pub fn months(self) -> u32 {
        match self {
            PlanLength::OneMonth => 1,
            PlanLength::ThreeMonths => 3,
            PlanLength::SixMonths => 6,
            PlanLength::Year => 12,
        }
    }
}

/// The dates a subscription covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub remind: NaiveDate,
}

impl Term {
    /// A month counts as 30 days; the reminder falls two days before the end.
    ///
    /// Returns `None` only when the dates overflow the calendar.
    pub fn starting(start: NaiveDate, length: PlanLength) -> Option<Term> {
        let end = start.checked_add_days(Days::new(DAYS_PER_MONTH * u64::from(length.months())))?;
        let remind = end.checked_sub_days(Days::new(REMIND_DAYS_BEFORE))?;

        Some(Term { start, end, remind })
    }
}
