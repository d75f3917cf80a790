use super::{api_error, authed_client};
use crate::{
    libs::{
        calendar::{DayDetail, DayLookup, MonthCursor, MonthLoad, MonthlyCalendar},
        formatter::format_date,
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM; defaults to the current month
    #[arg(short, long)]
    month: Option<String>,
    /// Move this many months from the selected month (negative goes back)
    #[arg(short, long, allow_hyphen_values = true)]
    shift: Option<i32>,
    /// Day of the month to show the details of
    #[arg(short, long)]
    day: Option<u32>,
}

pub async fn cmd(args: CalendarArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let cursor = match &args.month {
        Some(month) => match month.parse::<MonthCursor>() {
            Ok(cursor) => cursor,
            Err(_) => msg_bail_anyhow!(Message::InvalidMonthArg(month.clone())),
        },
        None => MonthCursor::containing(today),
    };

    let target = match args.shift {
        Some(delta) => cursor.shift(delta).map_err(api_error)?,
        None => cursor,
    };
    let selected = selected_day(target, args.day, today)?;

    let calendar = MonthlyCalendar::new(authed_client()?, cursor);
    let loaded = match args.shift {
        Some(delta) => calendar.navigate(delta).await,
        None => calendar.refresh().await,
    }
    .map_err(api_error)?;
    let index = match loaded {
        MonthLoad::Loaded(index) => index,
        MonthLoad::Superseded => match calendar.index() {
            Some(index) => index,
            None => return Ok(()),
        },
    };
    let month = index.month();

    msg_print!(Message::CalendarHeader(month.title()), true);
    View::calendar(&index, args.day)?;

    let Some(day) = selected else {
        return Ok(());
    };
    match index.resolve_day(day) {
        DayLookup::Found(record) => {
            let detail = DayDetail::from(record);
            msg_print!(Message::DayDetailHeader(detail.date.clone()), true);
            View::day_detail(&detail)?;
        }
        DayLookup::NotFound => {
            let label = month.date(day).map(|date| format_date(&date)).unwrap_or_default();
            msg_info!(Message::NoAttendanceForDate(label));
        }
    }
    Ok(())
}

/// Day whose detail is shown: the `--day` argument, else today when it falls
/// in `month`. An argument outside the month is an error.
fn selected_day(month: MonthCursor, day: Option<u32>, today: NaiveDate) -> Result<Option<u32>> {
    match day {
        Some(day) if day == 0 || day > month.days_in_month() => {
            msg_bail_anyhow!(Message::InvalidDayArg(day, month.days_in_month()))
        }
        Some(day) => Ok(Some(day)),
        None if month.contains(&today) => Ok(Some(today.day())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_day() {
        let february = MonthCursor::new(2024, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();

        assert_eq!(selected_day(february, Some(29), today).unwrap(), Some(29));
        assert_eq!(selected_day(february, None, today).unwrap(), Some(14));
        assert_eq!(selected_day(february.next().unwrap(), None, today).unwrap(), None);

        let err = selected_day(february, Some(40), today).unwrap_err();
        assert_eq!(err.to_string(), Message::InvalidDayArg(40, 29).to_string());
        assert!(selected_day(february, Some(0), today).is_err());
        assert!(selected_day(MonthCursor::new(2023, 1).unwrap(), Some(29), today).is_err());
    }
}
