use thiserror::Error;

/// Marker separating a deadline's description from its due date.
pub const BY_DELIMITER: &str = "/by";
/// Marker separating an event's description from its start date.
pub const FROM_DELIMITER: &str = "/from";
/// Marker separating an event's start date from its end date.
pub const TO_DELIMITER: &str = "/to";

/// A fully parsed command, ready for the dispatcher.
///
/// Ordinals are 1-indexed as typed by the user. The parser only checks that
/// an ordinal is a positive integer; whether it refers to an existing task
/// depends on the live list and is checked by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    List,
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        due: String,
    },
    Event {
        description: String,
        start: String,
        end: String,
    },
    Delete {
        ordinal: usize,
    },
    Mark {
        ordinal: usize,
    },
    Unmark {
        ordinal: usize,
    },
    Find {
        keyword: String,
    },
    Bye,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("you didn't type anything")]
    EmptyInput,
    #[error("`{0}` is not a command I know")]
    UnrecognizedInstruction(String),
    #[error("`{0}` does not take any arguments")]
    UnexpectedArguments(String),
    #[error("`{0}` needs more details after it")]
    MissingArguments(String),
    #[error("the {0} is missing")]
    MissingField(&'static str),
    #[error("expected a `{0}` somewhere in there")]
    MissingDelimiter(&'static str),
    #[error("`{0}` is not a valid task number")]
    InvalidOrdinalFormat(String),
}

/// Parses one raw input line into an [`Instruction`].
///
/// Never returns a partial instruction: any malformed input fails with the
/// specific [`ParseError`] describing what was wrong.
pub fn parse(raw: &str) -> Result<Instruction, ParseError> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (prefix, rest) = match line.split_once(' ') {
        Some((prefix, rest)) => (prefix, rest),
        None => (line, ""),
    };

    // list and bye are complete on their own; extra text is an error rather
    // than silently dropped.
    match prefix {
        "list" | "bye" => {
            return if rest.trim().is_empty() {
                Ok(match prefix {
                    "list" => Instruction::List,
                    _ => Instruction::Bye,
                })
            } else {
                Err(ParseError::UnexpectedArguments(prefix.to_string()))
            };
        }
        "todo" | "deadline" | "event" | "delete" | "mark" | "unmark" | "find" => {}
        other => return Err(ParseError::UnrecognizedInstruction(other.to_string())),
    }

    let args = rest.trim();
    if args.is_empty() {
        return Err(ParseError::MissingArguments(prefix.to_string()));
    }

    match prefix {
        "todo" => Ok(Instruction::Todo {
            description: args.to_string(),
        }),
        "find" => Ok(Instruction::Find {
            keyword: args.to_string(),
        }),
        "delete" => Ok(Instruction::Delete {
            ordinal: parse_ordinal(args)?,
        }),
        "mark" => Ok(Instruction::Mark {
            ordinal: parse_ordinal(args)?,
        }),
        "unmark" => Ok(Instruction::Unmark {
            ordinal: parse_ordinal(args)?,
        }),
        "deadline" => parse_deadline(args),
        _ => parse_event(args),
    }
}

fn parse_ordinal(args: &str) -> Result<usize, ParseError> {
    match args.parse::<usize>() {
        Ok(ordinal) if ordinal > 0 => Ok(ordinal),
        _ => Err(ParseError::InvalidOrdinalFormat(args.to_string())),
    }
}

fn parse_deadline(args: &str) -> Result<Instruction, ParseError> {
    let (description, due) = args
        .split_once(BY_DELIMITER)
        .ok_or(ParseError::MissingDelimiter(BY_DELIMITER))?;
    let description = non_empty(description, "task description")?;
    let due = non_empty(due, "due date")?;
    Ok(Instruction::Deadline { description, due })
}

// The description is everything before the first /from, the start date sits
// between /from and the first /to after it, the end date is the remainder.
fn parse_event(args: &str) -> Result<Instruction, ParseError> {
    let (description, dates) = args
        .split_once(FROM_DELIMITER)
        .ok_or(ParseError::MissingDelimiter(FROM_DELIMITER))?;
    let (start, end) = dates
        .split_once(TO_DELIMITER)
        .ok_or(ParseError::MissingDelimiter(TO_DELIMITER))?;
    let description = non_empty(description, "task description")?;
    let start = non_empty(start, "start date")?;
    let end = non_empty(end, "end date")?;
    Ok(Instruction::Event {
        description,
        start,
        end,
    })
}

fn non_empty(segment: &str, field: &'static str) -> Result<String, ParseError> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        Err(ParseError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
