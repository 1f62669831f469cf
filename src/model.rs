use chrono::{DateTime, Duration, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifiant fort pour Duty (entier stable, unique dans l'univers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct DutyId(u32);

impl DutyId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for DutyId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DutyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DutyError {
    #[error("duty {0}: end must be strictly after start")]
    InvalidTimeRange(DutyId),
}

/// Enregistrement brut tel que fourni par le chargeur de données.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DutyRecord {
    pub id: DutyId,
    pub name: String,
    pub depot: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Service (duty) immuable, intervalle UTC [start, end).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "DutyRecord", into = "DutyRecord")
)]
pub struct Duty {
    id: DutyId,
    name: String,
    depot: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Duty {
    /// Crée un duty en validant que `end > start`.
    pub fn new<N: Into<String>, D: Into<String>>(
        id: DutyId,
        name: N,
        depot: D,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, DutyError> {
        if end <= start {
            return Err(DutyError::InvalidTimeRange(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            depot: depot.into(),
            start,
            end,
        })
    }

    pub fn id(&self) -> DutyId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn depot(&self) -> &str {
        &self.depot
    }
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Durée du service.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl TryFrom<DutyRecord> for Duty {
    type Error = DutyError;

    fn try_from(record: DutyRecord) -> Result<Self, Self::Error> {
        Duty::new(record.id, record.name, record.depot, record.start, record.end)
    }
}

impl From<Duty> for DutyRecord {
    fn from(duty: Duty) -> Self {
        Self {
            id: duty.id,
            name: duty.name,
            depot: duty.depot,
            start: duty.start,
            end: duty.end,
        }
    }
}
