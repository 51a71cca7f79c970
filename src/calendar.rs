use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate, Weekday};

/// Jour de la semaine des créneaux.
pub const SLOT_WEEKDAY: Weekday = Weekday::Fri;

/// Bornes incluses [1er de `start_month`, dernier jour réel de `end_month`].
pub fn month_range(
    year: i32,
    start_month: u32,
    end_month: u32,
) -> Result<(NaiveDate, NaiveDate), SchedError> {
    for month in [start_month, end_month] {
        if !(1..=12).contains(&month) {
            return Err(SchedError::InvalidMonth(month));
        }
    }
    if end_month < start_month {
        return Err(SchedError::InvalidRange {
            start: start_month,
            end: end_month,
        });
    }
    let start = NaiveDate::from_ymd_opt(year, start_month, 1).ok_or(SchedError::InvalidYear(year))?;
    let end = last_day_of_month(year, end_month).ok_or(SchedError::InvalidYear(year))?;
    Ok((start, end))
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Toutes les dates de `weekday` dans [start, end], en ordre chronologique.
pub fn slot_dates(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut current = start;
    while current <= end {
        if current.weekday() == weekday {
            out.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
