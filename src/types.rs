use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::FswatchError;

/// A set of filesystem operation kinds.
///
/// Single kinds are the associated constants; they combine with `|` and
/// membership is tested with [`Op::intersects`] / [`Op::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Op(u32);

impl Op {
    pub const EMPTY: Op = Op(0);
    pub const CREATE: Op = Op(1 << 0);
    pub const WRITE: Op = Op(1 << 1);
    pub const REMOVE: Op = Op(1 << 2);
    pub const RENAME: Op = Op(1 << 3);
    pub const CHMOD: Op = Op(1 << 4);

    /// Known kinds and their names, sorted by name.
    const NAMES: [(Op, &'static str); 5] = [
        (Op::CHMOD, "chmod"),
        (Op::CREATE, "create"),
        (Op::REMOVE, "remove"),
        (Op::RENAME, "rename"),
        (Op::WRITE, "write"),
    ];

    pub const fn from_bits(bits: u32) -> Op {
        Op(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersects(self, other: Op) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Op) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the known kinds present in this set, ascending and without
    /// duplicates. Unknown bits are ignored.
    pub fn names(self) -> Vec<&'static str> {
        Op::NAMES
            .iter()
            .filter(|(op, _)| self.contains(*op))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for Op {
    type Output = Op;

    fn bitor(self, rhs: Op) -> Op {
        Op(self.0 | rhs.0)
    }
}

impl BitOrAssign for Op {
    fn bitor_assign(&mut self, rhs: Op) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Op {
    type Output = Op;

    fn bitand(self, rhs: Op) -> Op {
        Op(self.0 & rhs.0)
    }
}

impl FromStr for Op {
    type Err = FswatchError;

    /// Parse a single kind name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Op::CREATE),
            "write" => Ok(Op::WRITE),
            "remove" => Ok(Op::REMOVE),
            "rename" => Ok(Op::RENAME),
            "chmod" => Ok(Op::CHMOD),
            _ => Err(FswatchError::UnknownEventType(s.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&names.join("|").to_uppercase())
    }
}

/// Render an operation set as the event list carried by a [`Trigger`].
pub fn event_list(op: Op) -> Vec<String> {
    op.names().into_iter().map(str::to_string).collect()
}

/// Unit of work handed to the command runner: the affected path and the
/// operation kinds observed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub path: String,
    pub events: Vec<String>,
}

impl Trigger {
    pub fn new(path: impl Into<String>, events: Vec<String>) -> Self {
        Self {
            path: path.into(),
            events,
        }
    }

    /// Build a trigger from a raw operation set.
    pub fn from_op(path: impl Into<String>, op: Op) -> Self {
        Self::new(path, event_list(op))
    }
}

/// How the listener hands triggers to the runner.
///
/// - `Channel`: the listener sends into its own channel and the runner reads
///   from it in a separate task (default).
/// - `Direct`: the listener calls the runner inline for every trigger, so a
///   saturated runner slows down event filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Channel,
    Direct,
}

impl Default for DispatchMode {
    fn default() -> Self {
        DispatchMode::Channel
    }
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "channel" => Ok(DispatchMode::Channel),
            "direct" => Ok(DispatchMode::Direct),
            other => Err(format!(
                "invalid dispatch mode: {other} (expected \"channel\" or \"direct\")"
            )),
        }
    }
}
