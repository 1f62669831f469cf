mod assignment;
mod conflicts;
mod types;
mod util;

pub use conflicts::{classify, classify_default, overlaps, rest_gap};
pub use types::{AssignError, AssignOptions, ConflictKind, StoreError};

use crate::model::{Duty, DutyId};
use crate::notification::{Notifier, SilentNotifier};
use chrono::Duration;
use std::collections::HashSet;

/// DutyStore : encapsule les deux pools (disponibles / assignés) d'un conducteur.
///
/// Un service appartient toujours à exactement un des deux pools.
#[derive(Debug)]
pub struct DutyStore<N: Notifier = SilentNotifier> {
    available: Vec<Duty>,
    assigned: Vec<Duty>,
    opts: AssignOptions,
    notifier: N,
}

impl DutyStore<SilentNotifier> {
    /// Place tout l'univers dans le pool disponible, dans l'ordre fourni.
    pub fn new(duties: Vec<Duty>) -> Result<Self, StoreError> {
        Self::with_notifier(duties, SilentNotifier)
    }
}

impl<N: Notifier> DutyStore<N> {
    pub fn with_notifier(duties: Vec<Duty>, notifier: N) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(duties.len());
        if let Some(dup) = duties.iter().find(|d| !seen.insert(d.id())) {
            return Err(StoreError::DuplicateDuty(dup.id()));
        }
        Ok(Self {
            available: duties,
            assigned: Vec::new(),
            opts: AssignOptions::default(),
            notifier,
        })
    }

    pub fn with_options(mut self, opts: AssignOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn options(&self) -> AssignOptions {
        self.opts
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn available(&self) -> &[Duty] {
        &self.available
    }

    pub fn assigned(&self) -> &[Duty] {
        &self.assigned
    }

    pub fn get(&self, id: DutyId) -> Option<&Duty> {
        self.available
            .iter()
            .chain(self.assigned.iter())
            .find(|d| d.id() == id)
    }

    pub fn is_assigned(&self, id: DutyId) -> bool {
        util::find_duty_index(&self.assigned, id).is_some()
    }

    /// Taille de l'univers (les deux pools confondus).
    pub fn len(&self) -> usize {
        self.available.len() + self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_assigned_time(&self) -> Duration {
        self.assigned
            .iter()
            .fold(Duration::zero(), |acc, d| acc + d.duration())
    }

    /// Classe un service de l'univers contre le pool assigné, sans rien modifier.
    pub fn check(&self, id: DutyId) -> Result<Option<ConflictKind>, AssignError> {
        let duty = self.get(id).ok_or(AssignError::UnknownDuty(id))?;
        Ok(classify(duty, &self.assigned, self.opts))
    }

    pub fn assign(&mut self, id: DutyId) -> Result<(), AssignError> {
        assignment::assign(self, id)
    }

    pub fn unassign(&mut self, id: DutyId) -> bool {
        assignment::unassign(self, id)
    }
}
