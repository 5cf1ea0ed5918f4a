use super::*;

impl App {
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.clear_status();
    }

    /// Tab order on the projects screen: Name → Description → table → back.
    pub fn projects_focus_forward(&mut self) {
        match self.projects_focus {
            PaneFocus::Form => match self.project_form.focused {
                ProjectField::Name => self.project_form.focused = ProjectField::Description,
                ProjectField::Description => self.projects_focus = PaneFocus::Table,
            },
            _ => {
                self.projects_focus = PaneFocus::Form;
                self.project_form.focused = ProjectField::Name;
            }
        }
    }

    pub fn projects_focus_backward(&mut self) {
        match self.projects_focus {
            PaneFocus::Form => match self.project_form.focused {
                ProjectField::Name => self.projects_focus = PaneFocus::Table,
                ProjectField::Description => self.project_form.focused = ProjectField::Name,
            },
            _ => {
                self.projects_focus = PaneFocus::Form;
                self.project_form.focused = ProjectField::Description;
            }
        }
    }

    /// Tab order on the entries screen: create form fields, then the six
    /// filter fields, then the table, then around again.
    pub fn entries_focus_forward(&mut self) {
        match self.entries_focus {
            PaneFocus::Form => {
                if self.entry_form.focused == EntryField::End {
                    self.entries_focus = PaneFocus::Filter;
                    self.filter.focused = FilterField::Project;
                } else {
                    self.entry_form.focused = self.entry_form.focused.next();
                }
            }
            PaneFocus::Filter => {
                if self.filter.focused == FilterField::EndDate {
                    self.entries_focus = PaneFocus::Table;
                } else {
                    self.filter.focused = self.filter.focused.next();
                }
            }
            PaneFocus::Table => {
                self.entries_focus = PaneFocus::Form;
                self.entry_form.focused = EntryField::Project;
            }
        }
    }

    pub fn entries_focus_backward(&mut self) {
        match self.entries_focus {
            PaneFocus::Form => {
                if self.entry_form.focused == EntryField::Project {
                    self.entries_focus = PaneFocus::Table;
                } else {
                    self.entry_form.focused = self.entry_form.focused.prev();
                }
            }
            PaneFocus::Filter => {
                if self.filter.focused == FilterField::Project {
                    self.entries_focus = PaneFocus::Form;
                    self.entry_form.focused = EntryField::End;
                } else {
                    self.filter.focused = self.filter.focused.prev();
                }
            }
            PaneFocus::Table => {
                self.entries_focus = PaneFocus::Filter;
                self.filter.focused = FilterField::EndDate;
            }
        }
    }

    pub fn projects_select_next(&mut self) {
        if self.selected_project_row + 1 < self.projects.len() {
            self.selected_project_row += 1;
        }
    }

    pub fn projects_select_previous(&mut self) {
        self.selected_project_row = self.selected_project_row.saturating_sub(1);
    }

    pub fn entries_select_next(&mut self) {
        if self.selected_entry_row + 1 < self.filtered_entries().len() {
            self.selected_entry_row += 1;
        }
    }

    pub fn entries_select_previous(&mut self) {
        self.selected_entry_row = self.selected_entry_row.saturating_sub(1);
    }

    pub fn week_previous(&mut self) {
        self.week_start -= time::Duration::days(7);
    }

    pub fn week_next(&mut self) {
        self.week_start += time::Duration::days(7);
    }

    pub fn week_current(&mut self) {
        self.week_start = crate::time_utils::week_start(crate::time_utils::now_local().date());
    }

    pub fn calendar_move_day(&mut self, delta: i64) {
        let day = self.calendar_day as i64 + delta;
        self.calendar_day = day.clamp(0, 6) as usize;
    }

    pub fn calendar_move_hour(&mut self, delta: i64) {
        let hour = self.calendar_hour as i64 + delta;
        self.calendar_hour = hour.clamp(0, 23) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_tab_cycle_visits_form_filter_table() {
        let mut app = App::new();
        app.current_view = View::Entries;

        // 4 form fields + 6 filter fields + table = 11 stops round trip.
        for _ in 0..11 {
            app.entries_focus_forward();
        }
        assert_eq!(app.entries_focus, PaneFocus::Form);
        assert_eq!(app.entry_form.focused, EntryField::Project);
    }

    #[test]
    fn calendar_cursor_clamps_to_grid() {
        let mut app = App::new();
        app.calendar_day = 0;
        app.calendar_hour = 0;
        app.calendar_move_day(-1);
        app.calendar_move_hour(-1);
        assert_eq!(app.calendar_day, 0);
        assert_eq!(app.calendar_hour, 0);

        app.calendar_move_day(10);
        app.calendar_move_hour(30);
        assert_eq!(app.calendar_day, 6);
        assert_eq!(app.calendar_hour, 23);
    }
}
