#![forbid(unsafe_code)]
//! Rotator — rotation équitable (round-robin) d'un roster de membres.
//!
//! - Désignation : d'abord les jamais-assignés, puis le plus petit compteur,
//!   puis l'assignation la plus ancienne.
//! - Skip pour le cycle en cours, annulation sur un seul niveau.
//! - Transitions pures : aucune I/O dans le moteur, horodatage injecté (UTC).

pub mod model;
pub mod rotation;

#[cfg(feature = "serde")]
pub mod io;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{Member, MemberId, MemberStatus, Rotation};
pub use rotation::{
    add_member, assign_next, initial_state, revert_assignment, skip_and_assign_next,
    RotationError,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
