use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotationError {
    #[error("duplicated member id: {0}")]
    DuplicateMember(String),
    #[error("member id cannot be empty")]
    InvalidMemberId,
    #[error("no member has been assigned yet")]
    NoCurrentMember,
    #[error("there is no previous state to revert to")]
    NoPriorState,
    #[error("assignment count overflow for member: {0}")]
    CountOverflow(String),
    #[error("no one is remaining to assign next")]
    NoRemainingCandidate,
    /// Ne devrait jamais remonter si les préconditions sont respectées.
    #[error("no candidate to designate (empty roster)")]
    NoCandidate,
}
