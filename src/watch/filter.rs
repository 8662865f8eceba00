// src/watch/filter.rs

//! Operation-kind filtering for raw watch events.

use crate::errors::Result;
use crate::types::Op;

/// Decides whether a raw event's operation set is interesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFilter {
    /// Every event passes, including ones with no recognised operation.
    PassAll,
    /// Events pass when they carry at least one of these kinds.
    AllowList(Op),
}

impl OpFilter {
    /// Build a filter from user-supplied kind names.
    ///
    /// No names means "watch everything".
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Ok(OpFilter::PassAll);
        }
        Self::from_names(names)
    }

    /// Build an allow-list filter. Names are case-insensitive; the first
    /// unknown name aborts construction.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut allowed = Op::EMPTY;
        for name in names {
            allowed |= name.as_ref().parse::<Op>()?;
        }
        Ok(OpFilter::AllowList(allowed))
    }

    /// Returns whether an event with operation set `op` should be passed on.
    pub fn pass(&self, op: Op) -> bool {
        match self {
            OpFilter::PassAll => true,
            OpFilter::AllowList(allowed) => op.intersects(*allowed),
        }
    }
}

impl Default for OpFilter {
    fn default() -> Self {
        OpFilter::PassAll
    }
}
