use crate::model::Rotation;
use anyhow::{anyhow, Context};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge une rotation depuis un support.
    fn load(&self) -> anyhow::Result<Rotation>;
    /// Sauvegarde de manière atomique.
    fn save(&self, rotation: &Rotation) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }
}

impl Storage for JsonStorage {
    /// Fichier absent => état initial ; fichier illisible => erreur.
    fn load(&self) -> anyhow::Result<Rotation> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Rotation::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let rotation: Rotation = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        rotation
            .validate()
            .map_err(|msg| anyhow!(msg))
            .with_context(|| format!("invalid rotation in {}", self.path.display()))?;
        Ok(rotation)
    }

    fn save(&self, rotation: &Rotation) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(rotation)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::{add_member, assign_next};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_initial_state() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("rotation.json")).unwrap();
        assert_eq!(storage.load().unwrap(), Rotation::default());
    }

    #[test]
    fn save_then_load_keeps_the_record() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("rotation.json")).unwrap();
        let r = add_member(&Rotation::default(), "foo").unwrap();
        let r = add_member(&r, "bar").unwrap();
        let r = assign_next(&r, Utc.timestamp_millis_opt(1_600_000_000_123).unwrap()).unwrap();

        storage.save(&r).unwrap();
        assert_eq!(storage.load().unwrap(), r);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotation.json");
        fs::write(&path, "{ not json").unwrap();
        let storage = JsonStorage::open(&path).unwrap();
        assert!(storage.load().is_err());
    }

    #[test]
    fn inconsistent_record_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotation.json");
        fs::write(
            &path,
            r#"{"members":[{"id":"foo","count":0}],"skippedMemberIds":["bar"]}"#,
        )
        .unwrap();
        let storage = JsonStorage::open(&path).unwrap();
        let err = storage.load().unwrap_err();
        assert!(format!("{err:#}").contains("skipped id is not a member: bar"));
    }
}
