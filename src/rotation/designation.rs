use super::types::RotationError;
use crate::model::Member;

/// Choisit le prochain membre parmi `candidates` (ordre du roster conservé).
///
/// 1. Le premier membre jamais assigné, s'il y en a un.
/// 2. Sinon, parmi les membres au `count` minimal, celui assigné le plus
///    anciennement ; à égalité, le premier dans l'ordre du roster.
pub(super) fn designate<'a>(candidates: &[&'a Member]) -> Result<&'a Member, RotationError> {
    if let Some(fresh) = candidates.iter().copied().find(|m| m.never_assigned()) {
        return Ok(fresh);
    }

    let min_count = candidates
        .iter()
        .map(|m| m.count)
        .min()
        .ok_or(RotationError::NoCandidate)?;

    // min_by_key garde le premier minimum : tri stable sur l'ordre du roster
    candidates
        .iter()
        .copied()
        .filter(|m| m.count == min_count)
        .min_by_key(|m| m.last_assigned)
        .ok_or(RotationError::NoCandidate)
}
