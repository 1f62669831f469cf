use crate::model::DutyId;
use chrono::Duration;
use std::fmt;
use thiserror::Error;

/// Options d'assignation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOptions {
    pub min_rest_hours: u32,
}

impl AssignOptions {
    pub fn min_rest(&self) -> Duration {
        Duration::hours(i64::from(self.min_rest_hours))
    }
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self { min_rest_hours: 8 }
    }
}

/// Motif de refus d'une assignation. L'absence de conflit est `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    Overlap,
    InsufficientRest,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::Overlap => "OVERLAP",
            ConflictKind::InsufficientRest => "INSUFFICIENT_REST",
        }
    }

    /// Message lisible destiné au canal de notification.
    pub fn message(&self, opts: AssignOptions) -> String {
        match self {
            ConflictKind::Overlap => "Overlapping duties are not allowed".to_string(),
            ConflictKind::InsufficientRest => format!(
                "Minimum {}-hour rest period required between duties",
                opts.min_rest_hours
            ),
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate duty id in universe: {0}")]
    DuplicateDuty(DutyId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("{message}")]
    Conflict {
        id: DutyId,
        kind: ConflictKind,
        message: String,
    },
    #[error("unknown duty: {0}")]
    UnknownDuty(DutyId),
    #[error("duty already assigned: {0}")]
    AlreadyAssigned(DutyId),
}

impl AssignError {
    pub fn conflict_kind(&self) -> Option<ConflictKind> {
        match self {
            AssignError::Conflict { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
