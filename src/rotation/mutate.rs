use super::{designation::designate, types::RotationError};
use crate::model::{Member, MemberId, Rotation};
use chrono::{DateTime, Utc};

pub(super) fn add_member(rotation: &Rotation, id: &str) -> Result<Rotation, RotationError> {
    if id.trim().is_empty() {
        return Err(RotationError::InvalidMemberId);
    }
    if rotation.find_member(id).is_some() {
        return Err(RotationError::DuplicateMember(id.to_string()));
    }

    // un cran derrière le membre le plus avancé, jamais négatif
    let count = rotation
        .members
        .iter()
        .map(|m| m.count)
        .max()
        .map_or(0, |max| max.saturating_sub(1));

    #[cfg(feature = "logging")]
    tracing::debug!(member = id, count, "member added");

    let mut next = rotation.clone();
    next.members.push(Member::new(id, count));
    Ok(next)
}

pub(super) fn assign_next(rotation: &Rotation, now: DateTime<Utc>) -> Result<Rotation, RotationError> {
    let candidates: Vec<&Member> = rotation.members.iter().collect();
    let target = designate(&candidates)?.id.clone();

    let mut next = assign(rotation.clone(), &target, now)?;
    next.skipped_member_ids.clear();
    Ok(next)
}

pub(super) fn skip_and_assign_next(
    rotation: &Rotation,
    now: DateTime<Utc>,
) -> Result<Rotation, RotationError> {
    let current = rotation
        .current_member
        .as_ref()
        .ok_or(RotationError::NoCurrentMember)?;
    if rotation.skipped_member_ids.len() + 1 >= rotation.members.len() {
        return Err(RotationError::NoRemainingCandidate);
    }

    let mut next = rotation.clone();
    revert_member(&mut next.members, &current.id);
    if !next.skipped_member_ids.contains(&current.id) {
        next.skipped_member_ids.push(current.id.clone());
    }

    #[cfg(feature = "logging")]
    tracing::debug!(member = %current.id, skipped = next.skipped_member_ids.len(), "member skipped");

    let target = {
        let candidates: Vec<&Member> = next
            .members
            .iter()
            .filter(|m| !next.skipped_member_ids.contains(&m.id))
            .collect();
        designate(&candidates)?.id.clone()
    };
    assign(next, &target, now)
}

pub(super) fn revert_assignment(rotation: &Rotation) -> Result<Rotation, RotationError> {
    let current = rotation
        .current_member
        .as_ref()
        .ok_or(RotationError::NoPriorState)?;
    let prev = rotation
        .prev_member
        .clone()
        .ok_or(RotationError::NoPriorState)?;

    #[cfg(feature = "logging")]
    tracing::debug!(reverted = %current.id, restored = %prev.id, "assignment reverted");

    let mut next = rotation.clone();
    revert_member(&mut next.members, &current.id);
    next.current_member = Some(prev);
    next.prev_member = None;
    Ok(next)
}

/// Assigne `target` : l'ancien courant devient `prev_member`.
fn assign(mut next: Rotation, target: &MemberId, now: DateTime<Utc>) -> Result<Rotation, RotationError> {
    let member = next
        .members
        .iter_mut()
        .find(|m| &m.id == target)
        .ok_or(RotationError::NoCandidate)?;
    member.count = member
        .count
        .checked_add(1)
        .ok_or_else(|| RotationError::CountOverflow(member.id.to_string()))?;
    member.prev_assigned = member.last_assigned;
    member.last_assigned = Some(now);
    let assigned = member.clone();

    #[cfg(feature = "logging")]
    tracing::debug!(member = %assigned.id, count = assigned.count, "member assigned");

    next.prev_member = next.current_member.replace(assigned);
    Ok(next)
}

/// Annule la dernière assignation de `id` ; l'annulation elle-même n'est pas annulable.
fn revert_member(members: &mut [Member], id: &MemberId) {
    if let Some(member) = members.iter_mut().find(|m| &m.id == id) {
        member.count = member.count.saturating_sub(1);
        member.last_assigned = member.prev_assigned.take();
    }
}
