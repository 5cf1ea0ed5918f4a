use stint_client::domain::{parse_datetime, TimeEntry};
use time::PrimitiveDateTime;

use super::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilterField {
    #[default]
    Project,
    Description,
    MinDuration,
    MaxDuration,
    StartDate,
    EndDate,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::Project => Self::Description,
            Self::Description => Self::MinDuration,
            Self::MinDuration => Self::MaxDuration,
            Self::MaxDuration => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Project,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Project => Self::EndDate,
            Self::Description => Self::Project,
            Self::MinDuration => Self::Description,
            Self::MaxDuration => Self::MinDuration,
            Self::StartDate => Self::MaxDuration,
            Self::EndDate => Self::StartDate,
        }
    }
}

/// Client-side search over the already-fetched entry list: six independent
/// predicates, ANDed. An empty (or unparsable) field is always satisfied,
/// so the predicates commute.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub project_id: TextInput,
    pub description: TextInput,
    pub min_duration: TextInput,
    pub max_duration: TextInput,
    pub start_date: TextInput,
    pub end_date: TextInput,
    pub focused: FilterField,
}

fn parse_num(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

fn parse_dt(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_datetime(raw).ok()
}

impl EntryFilter {
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        // Project ids are string-compared, exactly as typed.
        if !self.project_id.value.is_empty()
            && entry.project_id.to_string() != self.project_id.value.trim()
        {
            return false;
        }
        if !self.description.value.is_empty()
            && !entry
                .description
                .to_lowercase()
                .contains(&self.description.value.to_lowercase())
        {
            return false;
        }
        if let Some(min) = parse_num(&self.min_duration.value) {
            if entry.duration < min {
                return false;
            }
        }
        if let Some(max) = parse_num(&self.max_duration.value) {
            if entry.duration > max {
                return false;
            }
        }
        if let Some(start) = parse_dt(&self.start_date.value) {
            if entry.start_time < start {
                return false;
            }
        }
        if let Some(end) = parse_dt(&self.end_date.value) {
            if entry.end_time > end {
                return false;
            }
        }
        true
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused {
            FilterField::Project => &mut self.project_id,
            FilterField::Description => &mut self.description,
            FilterField::MinDuration => &mut self.min_duration,
            FilterField::MaxDuration => &mut self.max_duration,
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
        }
    }

    pub fn clear_all(&mut self) {
        self.project_id.clear();
        self.description.clear();
        self.min_duration.clear();
        self.max_duration.clear();
        self.start_date.clear();
        self.end_date.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry() -> TimeEntry {
        TimeEntry {
            id: 1,
            project_id: 3,
            project_name: Some("Alpha".to_string()),
            description: "Weekly Planning".to_string(),
            start_time: datetime!(2024-01-02 09:00),
            end_time: datetime!(2024-01-02 10:30),
            duration: 90,
            created_at: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(EntryFilter::default().matches(&entry()));
    }

    #[test]
    fn project_id_is_string_compared() {
        let mut filter = EntryFilter::default();
        filter.project_id = TextInput::from_str("3");
        assert!(filter.matches(&entry()));

        filter.project_id = TextInput::from_str("30");
        assert!(!filter.matches(&entry()));
    }

    #[test]
    fn description_is_case_insensitive_substring() {
        let mut filter = EntryFilter::default();
        filter.description = TextInput::from_str("plan");
        assert!(filter.matches(&entry()));

        filter.description = TextInput::from_str("standup");
        assert!(!filter.matches(&entry()));
    }

    #[test]
    fn duration_range_is_inclusive() {
        let mut filter = EntryFilter::default();
        filter.min_duration = TextInput::from_str("90");
        filter.max_duration = TextInput::from_str("90");
        assert!(filter.matches(&entry()));

        filter.min_duration = TextInput::from_str("91");
        assert!(!filter.matches(&entry()));
    }

    #[test]
    fn date_bounds_compare_start_and_end() {
        let mut filter = EntryFilter::default();
        filter.start_date = TextInput::from_str("2024-01-02T09:00");
        filter.end_date = TextInput::from_str("2024-01-02T10:30");
        assert!(filter.matches(&entry()));

        filter.start_date = TextInput::from_str("2024-01-02T09:01");
        assert!(!filter.matches(&entry()));

        filter.start_date.clear();
        filter.end_date = TextInput::from_str("2024-01-02T10:29");
        assert!(!filter.matches(&entry()));
    }

    #[test]
    fn unparsable_fields_are_ignored() {
        let mut filter = EntryFilter::default();
        filter.min_duration = TextInput::from_str("lots");
        filter.start_date = TextInput::from_str("yesterday");
        assert!(filter.matches(&entry()));
    }

    #[test]
    fn predicates_and_together_regardless_of_which_are_set() {
        // Setting the same two predicates in either order yields the same
        // conjunction: match requires both.
        let mut a = EntryFilter::default();
        a.description = TextInput::from_str("plan");
        a.min_duration = TextInput::from_str("100");

        let mut b = EntryFilter::default();
        b.min_duration = TextInput::from_str("100");
        b.description = TextInput::from_str("plan");

        assert_eq!(a.matches(&entry()), b.matches(&entry()));
        assert!(!a.matches(&entry()));

        a.min_duration = TextInput::from_str("90");
        assert!(a.matches(&entry()));
    }
}
