//! Moteur de rotation : transitions pures sur un [`Rotation`].
//!
//! Chaque opération prend l'enregistrement par référence et en renvoie un
//! nouveau ; en cas d'erreur, la valeur de l'appelant reste le dernier état valide.

mod designation;
mod mutate;
mod types;

pub use types::RotationError;

use crate::model::Rotation;
use chrono::{DateTime, Utc};

/// Enregistrement vide : aucun membre, aucun historique, aucun skip.
pub fn initial_state() -> Rotation {
    Rotation::default()
}

/// Ajoute un membre en fin de roster.
pub fn add_member<S: AsRef<str>>(rotation: &Rotation, id: S) -> Result<Rotation, RotationError> {
    mutate::add_member(rotation, id.as_ref())
}

/// Désigne et assigne le prochain membre, puis vide l'ensemble des skips.
pub fn assign_next(rotation: &Rotation, now: DateTime<Utc>) -> Result<Rotation, RotationError> {
    mutate::assign_next(rotation, now)
}

/// Annule l'assignation du membre courant, le marque comme sauté pour ce
/// cycle et désigne un remplaçant parmi les membres non sautés.
pub fn skip_and_assign_next(
    rotation: &Rotation,
    now: DateTime<Utc>,
) -> Result<Rotation, RotationError> {
    mutate::skip_and_assign_next(rotation, now)
}

/// Annule la dernière assignation (un seul niveau).
pub fn revert_assignment(rotation: &Rotation) -> Result<Rotation, RotationError> {
    mutate::revert_assignment(rotation)
}

impl Rotation {
    pub fn with_member<S: AsRef<str>>(&self, id: S) -> Result<Rotation, RotationError> {
        add_member(self, id)
    }

    pub fn assign_next(&self, now: DateTime<Utc>) -> Result<Rotation, RotationError> {
        assign_next(self, now)
    }

    pub fn skip_and_assign_next(&self, now: DateTime<Utc>) -> Result<Rotation, RotationError> {
        skip_and_assign_next(self, now)
    }

    pub fn revert_assignment(&self) -> Result<Rotation, RotationError> {
        revert_assignment(self)
    }
}
