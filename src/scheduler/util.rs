use crate::model::{Duty, DutyId};
use chrono::Duration;

/// Chevauchement au sens demi-ouvert : deux services bout à bout ne se chevauchent pas.
pub(super) fn overlaps(candidate: &Duty, existing: &Duty) -> bool {
    let (cs, ce) = (candidate.start(), candidate.end());
    let (es, ee) = (existing.start(), existing.end());
    (cs >= es && cs < ee) || (ce > es && ce <= ee) || (cs <= es && ce >= ee)
}

/// Repos insuffisant de part et d'autre du candidat.
///
/// Une borne qui déborde de la plage de `DateTime` rend la fenêtre non bornée.
pub(super) fn violates_rest(candidate: &Duty, existing: &Duty, min_rest: Duration) -> bool {
    let (cs, ce) = (candidate.start(), candidate.end());
    let (es, ee) = (existing.start(), existing.end());
    let starts_too_soon = es > ce
        && ce
            .checked_add_signed(min_rest)
            .map_or(true, |limit| es <= limit);
    let ended_too_late = ee <= cs
        && cs
            .checked_sub_signed(min_rest)
            .map_or(true, |limit| ee > limit);
    starts_too_soon || ended_too_late
}

pub(super) fn find_duty_index(duties: &[Duty], id: DutyId) -> Option<usize> {
    duties.iter().position(|d| d.id() == id)
}
