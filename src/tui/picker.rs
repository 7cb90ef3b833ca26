use chrono::{Datelike, Days, Months, NaiveDate};

use crate::model::table::{ColumnKey, RowKey};

/// Format written into date cells
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a cell value as a date, if it is one
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Calendar picker open on one date cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    pub row: RowKey,
    pub column: ColumnKey,
    pub date: NaiveDate,
}

impl DatePicker {
    /// Open on the cell's date, or on `today` when the cell holds none
    pub fn open(row: RowKey, column: ColumnKey, current: &str, today: NaiveDate) -> Self {
        DatePicker {
            row,
            column,
            date: parse_date(current).unwrap_or(today),
        }
    }

    pub fn move_days(&mut self, days: i64) {
        let step = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.date.checked_add_days(step)
        } else {
            self.date.checked_sub_days(step)
        };
        if let Some(date) = moved {
            self.date = date;
        }
    }

    /// Move by whole months; the day clamps to the end of shorter months
    pub fn move_months(&mut self, months: i32) {
        let step = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.date.checked_add_months(step)
        } else {
            self.date.checked_sub_months(step)
        };
        if let Some(date) = moved {
            self.date = date;
        }
    }

    /// The picked value as written into the cell
    pub fn value(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn month_title(&self) -> String {
        self.date.format("%B %Y").to_string()
    }

    /// Weeks of the shown month, Monday first; `None` pads days outside it
    pub fn month_grid(&self) -> Vec<[Option<u32>; 7]> {
        let Some(first) = self.date.with_day(1) else {
            return Vec::new();
        };
        let days_in_month = first
            .checked_add_months(Months::new(1))
            .map_or(31, |next| next.signed_duration_since(first).num_days() as u32);
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut slot = offset;
        for day in 1..=days_in_month {
            week[slot] = Some(day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }
        weeks
    }
}
