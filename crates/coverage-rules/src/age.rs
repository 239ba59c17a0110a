//! Customer age at contract start.
//!
//! Age is derived from elapsed whole months, not from the difference of
//! calendar years: `trunc(months_between(start, birth) / 12)`. A month counts
//! once the day of month is reached again, or when both dates fall on the last
//! day of their month (Jan 31 to Feb 28 is one month).

use chrono::{Datelike, NaiveDate};

/// Whole months elapsed from `earlier` to `later`, truncated toward zero.
///
/// Negative when `later` precedes `earlier`.
pub fn whole_months_between(later: NaiveDate, earlier: NaiveDate) -> i32 {
    if later < earlier {
        return -forward_whole_months(earlier, later);
    }
    forward_whole_months(later, earlier)
}

fn forward_whole_months(later: NaiveDate, earlier: NaiveDate) -> i32 {
    let mut months = (later.year() - earlier.year()) * 12 + later.month() as i32
        - earlier.month() as i32;
    let both_month_end = is_last_day_of_month(later) && is_last_day_of_month(earlier);
    if later.day() < earlier.day() && !both_month_end {
        months -= 1;
    }
    months
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

/// Age in whole years on `on` for a customer born on `birth_date`.
pub fn age_at(birth_date: NaiveDate, on: NaiveDate) -> i32 {
    whole_months_between(on, birth_date) / 12
}
