#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Projects,
    Entries,
    Calendar,
}

/// Which pane of a screen owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneFocus {
    Form,
    Filter,
    Table,
}

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.chars().count(),
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProjectField {
    #[default]
    Name,
    Description,
}

impl ProjectField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Description => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields, so next and prev coincide.
        self.next()
    }
}

/// Draft of a project create/edit form.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: TextInput,
    pub description: TextInput,
    pub focused: ProjectField,
}

impl ProjectDraft {
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused {
            ProjectField::Name => &mut self.name,
            ProjectField::Description => &mut self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EntryField {
    #[default]
    Project,
    Description,
    Start,
    End,
}

impl EntryField {
    pub fn next(self) -> Self {
        match self {
            Self::Project => Self::Description,
            Self::Description => Self::Start,
            Self::Start => Self::End,
            Self::End => Self::Project,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Project => Self::End,
            Self::Description => Self::Project,
            Self::Start => Self::Description,
            Self::End => Self::Start,
        }
    }
}

/// Draft of a time-entry create/edit form. The project is picked by
/// position in the fetched project list; start/end hold the
/// `YYYY-MM-DDTHH:MM` wire shape as typed.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub project_idx: Option<usize>,
    pub description: TextInput,
    pub start_input: TextInput,
    pub end_input: TextInput,
    pub focused: EntryField,
}

impl EntryDraft {
    /// The text input under the cursor, if the focused field is textual.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            EntryField::Project => None,
            EntryField::Description => Some(&mut self.description),
            EntryField::Start => Some(&mut self.start_input),
            EntryField::End => Some(&mut self.end_input),
        }
    }
}

/// Explicit lifecycle of the one mutable row a screen may have. Holding a
/// single value per screen makes edit exclusivity structural, and the
/// `Saving`/`Deleting` arms double as in-flight guards against repeated
/// submits.
#[derive(Debug, Clone, Default)]
pub enum RowState<D> {
    #[default]
    Viewing,
    Editing {
        id: i64,
        draft: D,
    },
    Saving {
        id: i64,
    },
    Deleting {
        id: i64,
    },
}

impl<D> RowState<D> {
    pub fn is_viewing(&self) -> bool {
        matches!(self, Self::Viewing)
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The row with a request in flight, if any.
    pub fn busy_id(&self) -> Option<i64> {
        match self {
            Self::Saving { id } | Self::Deleting { id } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ModalMode {
    Details,
    Editing(EntryDraft),
}

/// Detail/edit/delete modal opened from a calendar block.
#[derive(Debug, Clone)]
pub struct EntryModal {
    pub entry_id: i64,
    pub mode: ModalMode,
    pub in_flight: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::from_str("ac");
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.value, "abc");
        assert_eq!(input.cursor, 2);

        input.backspace();
        assert_eq!(input.value, "ac");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn text_input_handles_multibyte() {
        let mut input = TextInput::from_str("på");
        input.insert_char('!');
        assert_eq!(input.value, "på!");
        input.backspace();
        input.backspace();
        assert_eq!(input.value, "p");
    }

    #[test]
    fn row_state_reports_busy_ids() {
        let state: RowState<EntryDraft> = RowState::Saving { id: 7 };
        assert_eq!(state.busy_id(), Some(7));
        assert_eq!(state.editing_id(), None);
        assert!(!state.is_viewing());
    }
}
