/// Symbol written to the save file for a completed task.
pub const DONE_SYMBOL: &str = "O";
/// Symbol written to the save file for a pending task.
pub const NOT_DONE_SYMBOL: &str = "X";

/// A single entry in the task list.
///
/// Every task shares a description and a completion flag; the variant
/// payload carries the date fields specific to each kind. Dates are opaque
/// text: "tomorrow" is as valid as "2026-08-29".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub detail: TaskDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDetail {
    Todo,
    Deadline { due: String },
    Event { start: String, end: String },
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            detail: TaskDetail::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, due: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            detail: TaskDetail::Deadline { due: due.into() },
        }
    }

    pub fn event(
        description: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            done: false,
            detail: TaskDetail::Event {
                start: start.into(),
                end: end.into(),
            },
        }
    }

    /// One-letter type tag shared by the list display and the save file.
    pub fn type_symbol(&self) -> &'static str {
        match self.detail {
            TaskDetail::Todo => "T",
            TaskDetail::Deadline { .. } => "D",
            TaskDetail::Event { .. } => "E",
        }
    }

    pub fn status_symbol(&self) -> &'static str {
        if self.done { DONE_SYMBOL } else { NOT_DONE_SYMBOL }
    }

    /// The line shown for this task in `list` and `find` output.
    pub fn display_line(&self) -> String {
        let header = format!(
            "[{}][{}] {}",
            self.type_symbol(),
            self.status_symbol(),
            self.description
        );
        match &self.detail {
            TaskDetail::Todo => header,
            TaskDetail::Deadline { due } => format!("{header} (by: {due})"),
            TaskDetail::Event { start, end } => {
                format!("{header} (from: {start} to: {end})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tasks_start_not_done() {
        assert!(!Task::todo("read book").done);
        assert!(!Task::deadline("report", "Friday").done);
        assert!(!Task::event("meeting", "2pm", "4pm").done);
    }

    #[test]
    fn type_symbols_match_variant() {
        assert_eq!(Task::todo("a").type_symbol(), "T");
        assert_eq!(Task::deadline("a", "b").type_symbol(), "D");
        assert_eq!(Task::event("a", "b", "c").type_symbol(), "E");
    }

    #[test]
    fn display_line_includes_dates() {
        assert_eq!(Task::todo("read book").display_line(), "[T][X] read book");

        let mut deadline = Task::deadline("report", "Friday");
        deadline.done = true;
        assert_eq!(deadline.display_line(), "[D][O] report (by: Friday)");

        assert_eq!(
            Task::event("go out", "2pm", "4pm").display_line(),
            "[E][X] go out (from: 2pm to: 4pm)"
        );
    }
}
