#![forbid(unsafe_code)]
//! Dutyroster — affectation de services (duties) à un conducteur unique.
//!
//! - Aucun chevauchement entre services assignés (intervalles demi-ouverts).
//! - Repos minimal entre deux services (8 h par défaut, bornes incluses).
//! - Deux pools disjoints : disponibles / assignés.
//! - Tout en UTC ; parsing ISO-8601 ; affichage local en dehors de la lib.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod notification;
pub mod scheduler;

pub use model::{Duty, DutyError, DutyId, DutyRecord};
pub use notification::{Notifier, RecordingNotifier, SilentNotifier, StderrNotifier};
pub use scheduler::{
    classify, classify_default, overlaps, rest_gap, AssignError, AssignOptions, ConflictKind,
    DutyStore, StoreError,
};
