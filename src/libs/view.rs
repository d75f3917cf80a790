use super::calendar::{CalendarIndex, DayDetail};
use super::feed::LogEntry;
use super::formatter::format_short_date;
use crate::api::{LeaveRequest, LeaveType};
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct View {}

impl View {
    /// Month grid. Days with a record carry a `*`, the selected day is
    /// bracketed.
    pub fn calendar(index: &CalendarIndex, selected: Option<u32>) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(Row::new(WEEKDAYS.iter().map(|day| Cell::new(day)).collect()));

        let recorded = index.days_with_records();
        for week in index.month().grid().chunks(7) {
            let cells = week
                .iter()
                .map(|cell| match cell {
                    Some(day) => Cell::new(&Self::day_label(*day, recorded.contains(day), selected == Some(*day))),
                    None => Cell::new(""),
                })
                .collect();
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    fn day_label(day: u32, recorded: bool, selected: bool) -> String {
        let mark = if recorded { "*" } else { "" };
        if selected {
            format!("[{}{}]", day, mark)
        } else {
            format!("{}{}", day, mark)
        }
    }

    pub fn day_detail(detail: &DayDetail) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["DATE", detail.date]);
        table.add_row(row!["CHECK-IN", detail.check_in]);
        table.add_row(row!["CHECK-OUT", detail.check_out]);
        table.add_row(row!["STATUS", detail.status]);
        if let Some(worked) = &detail.worked {
            table.add_row(row!["WORKING HOURS", worked]);
        }
        table.printstd();

        Ok(())
    }

    pub fn log_feed(entries: &[LogEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["EVENT", "DATE", "TIME"]);
        for entry in entries {
            table.add_row(row![entry.kind, entry.date, entry.time]);
        }
        table.printstd();

        Ok(())
    }

    pub fn leave_requests(requests: &[LeaveRequest]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TYPE", "FROM", "TO", "DAYS", "STATUS", "REASON"]);
        for request in requests {
            table.add_row(row![
                request.id,
                request.leave_type.name,
                format_short_date(&request.start_date),
                format_short_date(&request.end_date),
                request.days(),
                request.status,
                request.reason
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn leave_types(types: &[LeaveType]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for leave_type in types {
            table.add_row(row![leave_type.id, leave_type.name]);
        }
        table.printstd();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label() {
        assert_eq!(View::day_label(5, true, false), "5*");
        assert_eq!(View::day_label(6, false, true), "[6]");
        assert_eq!(View::day_label(7, true, true), "[7*]");
    }
}
