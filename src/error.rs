use crate::key::Key;
use std::fmt::Display;

#[cfg(feature = "color")]
use colored::Colorize;

mod exit_code {
    pub const BAD: u8 = 101;
}

type Name = String;
type Value = String;
type Count = usize;
type SomeError = Box<dyn std::error::Error>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: ErrorContext,
}

impl Error {
    /// Creates a new error.
    pub fn new(kind: ErrorKind, context: ErrorContext) -> Self {
        Self { kind, context }
    }

    pub(crate) fn ambiguous_alias(first: &Key, second: &Key) -> Self {
        Self::new(
            ErrorKind::AmbiguousAlias,
            ErrorContext::AmbiguousAlias(first.clone(), second.clone()),
        )
    }

    pub(crate) fn unknown_arguments(names: Vec<Name>) -> Self {
        Self::new(
            ErrorKind::UnknownArguments,
            ErrorContext::UnknownArguments(names),
        )
    }

    // Returns the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the exit code a command-line program should terminate with.
    ///
    /// Every error this crate produces is a usage error.
    pub fn code(&self) -> u8 {
        exit_code::BAD
    }

    /// References the structured details for the given error.
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }
}

#[derive(Debug)]
pub enum ErrorContext {
    AmbiguousAlias(Key, Key),
    UnknownArguments(Vec<Name>),
    FailedArg(Key),
    UnexpectedValue(Key, Value),
    DuplicateValue(Key, Count),
    FailedCast(Key, Value, SomeError),
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum ErrorKind {
    AmbiguousAlias,
    UnknownArguments,
    MissingRequired,
    ExpectingValue,
    UnexpectedValue,
    DuplicateValue,
    BadType,
}

impl std::error::Error for Error {}

/// Renders a switch the way a user would have typed it.
fn arg_str(key: &Key) -> String {
    match key {
        Key::Default => key.to_string(),
        Key::Named(n) => match n.chars().count() {
            1 => format!("-{}", n),
            _ => format!("--{}", n),
        },
    }
}

#[cfg(feature = "color")]
fn arg(key: &Key) -> String {
    arg_str(key).blue().to_string()
}

#[cfg(not(feature = "color"))]
fn arg(key: &Key) -> String {
    arg_str(key)
}

#[cfg(feature = "color")]
fn word(s: &str) -> String {
    s.yellow().to_string()
}

#[cfg(not(feature = "color"))]
fn word(s: &str) -> String {
    s.to_string()
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self.context() {
            ErrorContext::AmbiguousAlias(first, second) => {
                write!(
                    f,
                    "arguments \"{}\" and \"{}\" refer to the same option and cannot be supplied together",
                    arg(first),
                    arg(second)
                )
            }
            ErrorContext::UnknownArguments(names) => {
                let list = names
                    .iter()
                    .map(|n| format!("\"{}\"", word(n)))
                    .collect::<Vec<String>>()
                    .join(", ");
                match names.len() {
                    1 => write!(f, "unknown argument {}", list),
                    _ => write!(f, "unknown arguments {}", list),
                }
            }
            ErrorContext::FailedArg(a) => match self.kind() {
                ErrorKind::MissingRequired => {
                    write!(f, "missing required argument \"{}\"", arg(a))
                }
                ErrorKind::ExpectingValue => {
                    write!(
                        f,
                        "option \"{}\" accepts one value but zero were supplied",
                        arg(a)
                    )
                }
                _ => panic!("reached unreachable error kind for a failed argument error context"),
            },
            ErrorContext::UnexpectedValue(a, val) => {
                write!(
                    f,
                    "flag \"{}\" cannot accept a value but was given \"{}\"",
                    arg(a),
                    word(val)
                )
            }
            ErrorContext::DuplicateValue(a, count) => {
                write!(
                    f,
                    "option \"{}\" accepts one value but {} were supplied",
                    arg(a),
                    count
                )
            }
            ErrorContext::FailedCast(a, val, err) => {
                write!(
                    f,
                    "argument \"{}\" failed to process value \"{}\": {}",
                    arg(a),
                    word(val),
                    err
                )
            }
        }
    }
}
