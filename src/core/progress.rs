//! Renewal progress of a subscription.

use chrono::NaiveDate;
use std::str::FromStr;

const SEGMENTS: u8 = 10;

/// How far into its paid period a subscription is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Elapsed share of the period, `0..=100`.
    pub percent: u8,
    /// Number of filled bar segments out of ten.
    pub filled: u8,
}

/// Glyph set used to draw the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// `█` for filled and `░` for empty segments.
    Plain,
    /// Filled segments change color as the end date approaches.
    Tiered,
}

impl FromStr for BarStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(BarStyle::Plain),
            "tiered" => Ok(BarStyle::Tiered),
            _ => Err(()),
        }
    }
}

impl Progress {
    pub fn compute(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Progress {
        let total = (end - start).num_days();
        let percent = if total > 0 {
            let used = (today - start).num_days().clamp(0, total);
            (used * 100 / total) as u8
        } else {
            100
        };

        Progress {
            percent,
            filled: percent / 10,
        }
    }

    pub fn bar(&self, style: BarStyle) -> String {
        let (full, empty) = match style {
            BarStyle::Plain => ("█", "░"),
            BarStyle::Tiered => {
                let full = match self.percent {
                    70..=u8::MAX => "🟥",
                    40..=69 => "🟨",
                    _ => "🟩",
                };
                (full, "⬜")
            }
        };

        let mut bar = full.repeat(self.filled as usize);
        bar.push_str(&empty.repeat((SEGMENTS - self.filled) as usize));
        bar
    }
}
