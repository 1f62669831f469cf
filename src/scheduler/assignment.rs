use super::{conflicts, util, AssignError, DutyStore};
use crate::model::DutyId;
use crate::notification::Notifier;

pub(super) fn assign<N: Notifier>(store: &mut DutyStore<N>, id: DutyId) -> Result<(), AssignError> {
    let Some(pos) = util::find_duty_index(&store.available, id) else {
        if util::find_duty_index(&store.assigned, id).is_some() {
            return Err(AssignError::AlreadyAssigned(id));
        }
        return Err(AssignError::UnknownDuty(id));
    };

    if let Some(kind) = conflicts::classify(&store.available[pos], &store.assigned, store.opts) {
        let message = kind.message(store.opts);
        #[cfg(feature = "logging")]
        tracing::info!(duty = %id, kind = kind.as_str(), "assignment rejected");
        store.notifier.notify(&message);
        return Err(AssignError::Conflict { id, kind, message });
    }

    let duty = store.available.remove(pos);
    store.assigned.push(duty);
    #[cfg(feature = "logging")]
    tracing::debug!(duty = %id, assigned = store.assigned.len(), "duty assigned");
    Ok(())
}

/// Toujours permis. Retourne `false` si le service n'était pas assigné.
pub(super) fn unassign<N: Notifier>(store: &mut DutyStore<N>, id: DutyId) -> bool {
    let Some(pos) = util::find_duty_index(&store.assigned, id) else {
        return false;
    };

    let duty = store.assigned.remove(pos);
    store.available.push(duty);
    store.available.sort_by_key(|d| d.id());
    #[cfg(feature = "logging")]
    tracing::debug!(duty = %id, available = store.available.len(), "duty unassigned");
    true
}
