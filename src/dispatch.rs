use thiserror::Error;

use crate::models::Task;
use crate::parser::{Instruction, ParseError};
use crate::session::Messages;
use crate::storage::{Storage, StorageError};
use crate::store::{StoreError, TaskStore};

/// What the user gets back from one command.
///
/// `persist_warning` carries a save-file failure that happened after the
/// in-memory mutation succeeded. The store is the source of truth for the
/// running session, so the mutation is kept and the failure is surfaced as a
/// warning instead of being rolled back.
#[derive(Debug)]
pub struct Reply {
    pub text: String,
    pub persist_warning: Option<StorageError>,
}

impl Reply {
    fn plain(text: String) -> Self {
        Self {
            text,
            persist_warning: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("the list is empty; there is nothing to show yet")]
    EmptyList,
}

/// Applies one instruction to the store, following the same shape for every
/// mutating command: validate, apply, format the reply, then persist.
/// Validation or apply failures skip the remaining phases.
pub fn dispatch(
    instruction: Instruction,
    store: &mut TaskStore,
    storage: &Storage,
    messages: &Messages,
) -> Result<Reply, CommandError> {
    match instruction {
        Instruction::List => {
            if store.is_empty() {
                return Err(CommandError::EmptyList);
            }
            let mut text = messages.list_header.to_string();
            for (index, task) in store.tasks().iter().enumerate() {
                text.push_str(&format!("\n{}.{}", index + 1, task.display_line()));
            }
            Ok(Reply::plain(text))
        }
        Instruction::Todo { description } => {
            Ok(add_task(Task::todo(description), store, storage, messages))
        }
        Instruction::Deadline { description, due } => Ok(add_task(
            Task::deadline(description, due),
            store,
            storage,
            messages,
        )),
        Instruction::Event {
            description,
            start,
            end,
        } => Ok(add_task(
            Task::event(description, start, end),
            store,
            storage,
            messages,
        )),
        Instruction::Delete { ordinal } => {
            let task = store.delete(ordinal)?;
            let text = format!(
                "{}\n  {}\n{}",
                messages.deleted,
                task.display_line(),
                messages.task_count(store.len())
            );
            let persist_warning = storage.store_all(store.tasks()).err();
            Ok(Reply {
                text,
                persist_warning,
            })
        }
        Instruction::Mark { ordinal } => set_status(ordinal, true, store, storage, messages),
        Instruction::Unmark { ordinal } => set_status(ordinal, false, store, storage, messages),
        Instruction::Find { keyword } => {
            let mut lines = String::new();
            for (ordinal, task) in store.find(&keyword) {
                lines.push_str(&format!("\n{}.{}", ordinal, task.display_line()));
            }
            if lines.is_empty() {
                Ok(Reply::plain(messages.no_matches.to_string()))
            } else {
                Ok(Reply::plain(format!("{}{}", messages.find_header, lines)))
            }
        }
        // The session loop intercepts bye before dispatch; answering with the
        // farewell keeps this match total without a panic path.
        Instruction::Bye => Ok(Reply::plain(messages.farewell.to_string())),
    }
}

fn add_task(task: Task, store: &mut TaskStore, storage: &Storage, messages: &Messages) -> Reply {
    store.add(task.clone());
    let text = format!(
        "{}\n  {}\n{}",
        messages.added,
        task.display_line(),
        messages.task_count(store.len())
    );
    let persist_warning = storage.append_one(&task).err();
    Reply {
        text,
        persist_warning,
    }
}

fn set_status(
    ordinal: usize,
    done: bool,
    store: &mut TaskStore,
    storage: &Storage,
    messages: &Messages,
) -> Result<Reply, CommandError> {
    let line = store.set_done(ordinal, done)?.display_line();
    let header = if done {
        messages.marked_done
    } else {
        messages.marked_not_done
    };
    let text = format!("{header}\n  {line}");
    let persist_warning = storage.store_all(store.tasks()).err();
    Ok(Reply {
        text,
        persist_warning,
    })
}
