use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifiant fort pour Member (fourni par l'appelant, clé primaire)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant de la rotation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Member {
    pub id: MemberId,
    /// Nombre d'assignations (annulations déduites).
    #[cfg_attr(feature = "serde", serde(deserialize_with = "count::deserialize"))]
    pub count: u32,
    /// `None` = jamais assigné.
    #[cfg_attr(feature = "serde", serde(default, with = "millis"))]
    pub last_assigned: Option<DateTime<Utc>>,
    /// Valeur de `last_assigned` avant la dernière assignation (sert à l'annulation).
    #[cfg_attr(feature = "serde", serde(default, with = "millis"))]
    pub prev_assigned: Option<DateTime<Utc>>,
}

impl Member {
    pub fn new<S: AsRef<str>>(id: S, count: u32) -> Self {
        Self {
            id: MemberId::new(id),
            count,
            last_assigned: None,
            prev_assigned: None,
        }
    }

    pub fn never_assigned(&self) -> bool {
        self.last_assigned.is_none()
    }
}

/// État d'affichage d'un membre dans la table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Current,
    Skipped,
    Idle,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Current => "current",
            MemberStatus::Skipped => "skipped",
            MemberStatus::Idle => "",
        }
    }
}

/// Enregistrement complet de la rotation.
///
/// Valeur immuable : chaque transition du moteur (`crate::rotation`) renvoie
/// un nouvel enregistrement et laisse l'ancien intact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Rotation {
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) members: Vec<Member>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) current_member: Option<Member>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) prev_member: Option<Member>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) skipped_member_ids: Vec<MemberId>,
}

impl Rotation {
    pub fn members(&self) -> &[Member] {
        &self.members
    }
    pub fn current_member(&self) -> Option<&Member> {
        self.current_member.as_ref()
    }
    pub fn prev_member(&self) -> Option<&Member> {
        self.prev_member.as_ref()
    }
    pub fn skipped_member_ids(&self) -> &[MemberId] {
        &self.skipped_member_ids
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn find_member<'a>(&'a self, id: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.id.as_str() == id)
    }

    pub fn is_skipped(&self, id: &str) -> bool {
        self.skipped_member_ids.iter().any(|s| s.as_str() == id)
    }

    /// Le membre courant prime sur le skip.
    pub fn status_of(&self, member: &Member) -> MemberStatus {
        if self.current_member.as_ref().map(|c| &c.id) == Some(&member.id) {
            MemberStatus::Current
        } else if self.is_skipped(member.id.as_str()) {
            MemberStatus::Skipped
        } else {
            MemberStatus::Idle
        }
    }

    /// Vérifie les invariants d'un enregistrement venant de l'extérieur (fichier, etc.).
    pub fn validate(&self) -> Result<(), String> {
        for (idx, member) in self.members.iter().enumerate() {
            if member.id.as_str().trim().is_empty() {
                return Err("member id cannot be empty".to_string());
            }
            if self.members[..idx].iter().any(|m| m.id == member.id) {
                return Err(format!("duplicated member id: {}", member.id));
            }
        }
        for (idx, skipped) in self.skipped_member_ids.iter().enumerate() {
            if self.find_member(skipped.as_str()).is_none() {
                return Err(format!("skipped id is not a member: {skipped}"));
            }
            if self.skipped_member_ids[..idx].contains(skipped) {
                return Err(format!("skipped id listed twice: {skipped}"));
            }
        }
        if !self.members.is_empty() && self.skipped_member_ids.len() >= self.members.len() {
            return Err("every member is skipped".to_string());
        }
        for snapshot in [&self.current_member, &self.prev_member].into_iter().flatten() {
            if self.find_member(snapshot.id.as_str()).is_none() {
                return Err(format!("unknown member in history: {}", snapshot.id));
            }
        }
        if self.current_member.is_none() && self.prev_member.is_some() {
            return Err("previous member without current member".to_string());
        }
        Ok(())
    }
}

/// Horodatages en millisecondes depuis l'epoch ; `null`, absent ou `0` (ancien format) => `None`.
#[cfg(feature = "serde")]
mod millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(0) => Ok(None),
            Some(ms) => DateTime::from_timestamp_millis(ms)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        }
    }
}

/// Compteur lu en entier signé : l'ancien format pouvait écrire `-1`, ramené à 0.
#[cfg(feature = "serde")]
mod count {
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Ok(0);
        }
        u32::try_from(raw).map_err(|_| de::Error::custom(format!("count out of range: {raw}")))
    }
}
