use super::{util, AssignOptions, ConflictKind};
use crate::model::Duty;
use chrono::Duration;

/// Classe un candidat par rapport aux services déjà assignés.
///
/// Le test de chevauchement parcourt tous les services existants avant que
/// le test de repos ne commence : un chevauchement l'emporte toujours.
pub fn classify(candidate: &Duty, existing: &[Duty], opts: AssignOptions) -> Option<ConflictKind> {
    if existing.iter().any(|e| util::overlaps(candidate, e)) {
        return Some(ConflictKind::Overlap);
    }

    let min_rest = opts.min_rest();
    if existing
        .iter()
        .any(|e| util::violates_rest(candidate, e, min_rest))
    {
        return Some(ConflictKind::InsufficientRest);
    }

    None
}

/// `classify` avec le repos par défaut (8 h).
pub fn classify_default(candidate: &Duty, existing: &[Duty]) -> Option<ConflictKind> {
    classify(candidate, existing, AssignOptions::default())
}

pub fn overlaps(a: &Duty, b: &Duty) -> bool {
    util::overlaps(a, b)
}

/// Écart entre deux services disjoints ; `None` s'ils se chevauchent.
pub fn rest_gap(a: &Duty, b: &Duty) -> Option<Duration> {
    if a.end() <= b.start() {
        Some(b.start() - a.end())
    } else if b.end() <= a.start() {
        Some(a.start() - b.end())
    } else {
        None
    }
}
