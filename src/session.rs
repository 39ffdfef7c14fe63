use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::dispatch::dispatch;
use crate::parser::{self, Instruction};
use crate::storage::Storage;
use crate::store::TaskStore;

/// Every user-facing string in one immutable table, built once at startup
/// and passed by reference into the session and dispatcher. Keeping the text
/// out of the core logic keeps the components testable without fixtures.
#[derive(Debug, Clone)]
pub struct Messages {
    pub greeting: &'static str,
    pub resume: &'static str,
    pub help: &'static str,
    pub farewell: &'static str,
    pub list_header: &'static str,
    pub find_header: &'static str,
    pub no_matches: &'static str,
    pub added: &'static str,
    pub deleted: &'static str,
    pub marked_done: &'static str,
    pub marked_not_done: &'static str,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            greeting: "Hello! I'm taskline. What do you need to get done?",
            resume: "Welcome back! Your list is right where you left it.",
            help: "Commands: list | todo <desc> | deadline <desc> /by <date> | \
                   event <desc> /from <start> /to <end> | mark <n> | unmark <n> | \
                   delete <n> | find <keyword> | bye",
            farewell: "Bye! Your list is saved for next time.",
            list_header: "Here is everything on your list:",
            find_header: "Here are the matching tasks:",
            no_matches: "Nothing on your list matches that.",
            added: "Added:",
            deleted: "Removed:",
            marked_done: "Marked as done:",
            marked_not_done: "Marked as not done:",
        }
    }
}

impl Messages {
    pub fn task_count(&self, len: usize) -> String {
        format!("You now have {len} task(s) on the list.")
    }
}

/// Runs the interactive loop until `bye` or end of input.
///
/// One command is fully parsed, applied, and persisted before the next line
/// is read. Every parse or command failure becomes a visible line and the
/// loop keeps going; only output errors (a closed sink) end the session
/// early.
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    store: &mut TaskStore,
    storage: &Storage,
    messages: &Messages,
) -> std::io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            // End of input counts as a goodbye.
            break;
        }

        let instruction = match parser::parse(&line) {
            Ok(Instruction::Bye) => break,
            Ok(instruction) => instruction,
            Err(error) => {
                writeln!(output, "{error}")?;
                continue;
            }
        };

        debug!("dispatching {instruction:?}");
        match dispatch(instruction, store, storage, messages) {
            Ok(reply) => {
                writeln!(output, "{}", reply.text)?;
                if let Some(warning) = reply.persist_warning {
                    warn!("task applied but not saved: {warning}");
                    writeln!(output, "warning: could not save your list: {warning}")?;
                }
            }
            Err(error) => writeln!(output, "{error}")?,
        }
    }
    writeln!(output, "{}", messages.farewell)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_script(script: &str, store: &mut TaskStore) -> (String, tempfile::TempDir) {
        let dir = tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().join("tasks.txt"));
        storage.ensure_exists().expect("bootstrap");

        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        run_session(
            &mut input,
            &mut output,
            store,
            &storage,
            &Messages::default(),
        )
        .expect("session runs");
        (
            String::from_utf8(output).expect("utf-8 output"),
            dir,
        )
    }

    #[test]
    fn bye_ends_the_session_with_a_farewell() {
        let mut store = TaskStore::new();
        let (output, _dir) = run_script("bye\ntodo never reached\n", &mut store);
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("Bye!"));
        assert!(store.is_empty());
    }

    #[test]
    fn end_of_input_also_ends_the_session() {
        let mut store = TaskStore::new();
        let (output, _dir) = run_script("todo read book\n", &mut store);
        assert!(output.contains("Added:"));
        assert!(output.ends_with("Bye! Your list is saved for next time.\n"));
    }

    #[test]
    fn errors_are_reported_and_the_loop_continues() {
        let mut store = TaskStore::new();
        let script = "blah\nlist\ndelete 1\ntodo read book\nlist\nbye\n";
        let (output, _dir) = run_script(script, &mut store);

        assert!(output.contains("not a command I know"));
        assert!(output.contains("the list is empty"));
        assert!(output.contains("there is no task 1"));
        assert!(output.contains("1.[T][X] read book"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn a_full_conversation_mutates_store_and_disk() {
        let mut store = TaskStore::new();
        let script = "todo read book\n\
                      deadline hand in report /by Friday\n\
                      event team lunch /from 12pm /to 1pm\n\
                      mark 2\n\
                      delete 1\n\
                      bye\n";
        let (output, dir) = run_script(script, &mut store);

        assert!(output.contains("Marked as done:"));
        assert!(output.contains("Removed:"));
        assert_eq!(store.len(), 2);

        let saved = std::fs::read_to_string(dir.path().join("tasks.txt")).expect("save file");
        assert_eq!(saved, "D|O|hand in report|Friday\nE|X|team lunch|12pm|1pm\n");
    }
}
