use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Wall-clock now, without an offset. Falls back to UTC when the local
/// offset cannot be determined.
pub fn now_local() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    let now = match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset),
        Err(_) => now,
    };
    PrimitiveDateTime::new(now.date(), now.time())
}

/// The Monday of the week containing `date`.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(date.weekday().number_days_from_monday() as i64)
}

/// Table display shape: `2024-01-01 09:30`.
pub fn format_table_datetime(dt: PrimitiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        dt.year(),
        dt.month() as u8,
        dt.day(),
        dt.hour(),
        dt.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn week_start_of_midweek_day_is_monday() {
        // 2024-01-03 is a Wednesday
        assert_eq!(week_start(date!(2024 - 01 - 03)), date!(2024 - 01 - 01));
    }

    #[test]
    fn week_start_of_monday_is_itself() {
        assert_eq!(week_start(date!(2024 - 01 - 01)), date!(2024 - 01 - 01));
    }

    #[test]
    fn week_start_of_sunday_is_previous_monday() {
        assert_eq!(week_start(date!(2024 - 01 - 07)), date!(2024 - 01 - 01));
    }

    #[test]
    fn table_datetime_format() {
        assert_eq!(
            format_table_datetime(datetime!(2024-01-01 09:30:45)),
            "2024-01-01 09:30"
        );
    }
}
