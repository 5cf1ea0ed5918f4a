use stint_client::domain::{Project, TimeEntry};
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Number of colors in the display palette (see `ui::widgets::PALETTE`).
pub const PALETTE_LEN: usize = 16;

pub fn week_days(week_start: Date) -> [Date; 7] {
    std::array::from_fn(|i| week_start + Duration::days(i as i64))
}

fn cell_bounds(day: Date, hour: u8) -> (PrimitiveDateTime, PrimitiveDateTime) {
    let start = PrimitiveDateTime::new(day, Time::from_hms(hour, 0, 0).expect("hour < 24"));
    // Hour 23 rolls into the next date.
    (start, start + Duration::hours(1))
}

/// An entry occupies every hour cell its half-open [start, end) interval
/// overlaps: `start < cell_end && end > cell_start`. A zero-length entry
/// occupies no cell.
pub fn occupies_cell(entry: &TimeEntry, day: Date, hour: u8) -> bool {
    let (cell_start, cell_end) = cell_bounds(day, hour);
    entry.start_time < cell_end && entry.end_time > cell_start
}

pub fn entries_for_cell<'a>(entries: &'a [TimeEntry], day: Date, hour: u8) -> Vec<&'a TimeEntry> {
    entries
        .iter()
        .filter(|e| occupies_cell(e, day, hour))
        .collect()
}

/// Sum of stored durations for entries starting on `day`. An entry that
/// runs past midnight is counted on its start day only.
pub fn day_total(entries: &[TimeEntry], day: Date) -> i64 {
    entries
        .iter()
        .filter(|e| e.start_time.date() == day)
        .map(|e| e.duration)
        .sum()
}

/// Positional palette index for a project: its position in the fetched
/// list modulo the palette size. Purely a display index — reordering the
/// list reassigns colors. None for orphaned references.
pub fn project_color_index(projects: &[Project], project_id: i64) -> Option<usize> {
    projects
        .iter()
        .position(|p| p.id == project_id)
        .map(|idx| idx % PALETTE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn entry(start: PrimitiveDateTime, end: PrimitiveDateTime) -> TimeEntry {
        TimeEntry {
            id: 1,
            project_id: 1,
            project_name: Some("Alpha".to_string()),
            description: String::new(),
            start_time: start,
            end_time: end,
            duration: stint_client::domain::duration_minutes(start, end),
            created_at: None,
        }
    }

    #[test]
    fn week_days_run_monday_through_sunday() {
        let days = week_days(date!(2024 - 01 - 01));
        assert_eq!(days[0], date!(2024 - 01 - 01));
        assert_eq!(days[6], date!(2024 - 01 - 07));
    }

    #[test]
    fn partial_hours_occupy_nine_and_ten_only() {
        // Monday 09:30-10:15 touches the 9 and 10 o'clock cells.
        let e = entry(datetime!(2024-01-01 09:30), datetime!(2024-01-01 10:15));
        let monday = date!(2024 - 01 - 01);

        assert!(!occupies_cell(&e, monday, 8));
        assert!(occupies_cell(&e, monday, 9));
        assert!(occupies_cell(&e, monday, 10));
        assert!(!occupies_cell(&e, monday, 11));
        assert_eq!(e.duration, 45);
    }

    #[test]
    fn exact_hour_entry_does_not_leak_into_next_cell() {
        // end > cell_start fails at the 10:00 boundary.
        let e = entry(datetime!(2024-01-01 09:00), datetime!(2024-01-01 10:00));
        assert!(occupies_cell(&e, date!(2024 - 01 - 01), 9));
        assert!(!occupies_cell(&e, date!(2024 - 01 - 01), 10));
    }

    #[test]
    fn zero_length_entry_occupies_no_cell() {
        let e = entry(datetime!(2024-01-01 09:00), datetime!(2024-01-01 09:00));
        for hour in 0..24 {
            assert!(!occupies_cell(&e, date!(2024 - 01 - 01), hour));
        }
    }

    #[test]
    fn midnight_spanning_entry_paints_both_days() {
        let e = entry(datetime!(2024-01-01 22:30), datetime!(2024-01-02 01:30));
        assert!(occupies_cell(&e, date!(2024 - 01 - 01), 22));
        assert!(occupies_cell(&e, date!(2024 - 01 - 01), 23));
        assert!(occupies_cell(&e, date!(2024 - 01 - 02), 0));
        assert!(occupies_cell(&e, date!(2024 - 01 - 02), 1));
        assert!(!occupies_cell(&e, date!(2024 - 01 - 02), 2));
    }

    #[test]
    fn day_total_attributes_to_start_day_only() {
        let entries = vec![
            entry(datetime!(2024-01-01 09:00), datetime!(2024-01-01 10:00)),
            entry(datetime!(2024-01-01 22:30), datetime!(2024-01-02 01:30)),
            entry(datetime!(2024-01-02 09:00), datetime!(2024-01-02 09:30)),
        ];
        // The midnight-spanning entry counts all 180 minutes on Monday.
        assert_eq!(day_total(&entries, date!(2024 - 01 - 01)), 60 + 180);
        assert_eq!(day_total(&entries, date!(2024 - 01 - 02)), 30);
    }

    #[test]
    fn color_index_is_positional_modulo_palette() {
        let projects: Vec<Project> = (0..20)
            .map(|i| Project {
                id: 100 + i,
                name: format!("P{i}"),
                description: None,
                created_at: None,
            })
            .collect();

        assert_eq!(project_color_index(&projects, 100), Some(0));
        assert_eq!(project_color_index(&projects, 100 + 17), Some(1));
        assert_eq!(project_color_index(&projects, 999), None);
    }
}
