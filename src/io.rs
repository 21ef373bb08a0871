use crate::model::{Member, Rotation};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

/// Horodatage RFC3339 pour l'affichage, `-` si jamais assigné.
pub fn format_last_assigned(member: &Member) -> String {
    member
        .last_assigned
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

/// Table texte compacte : `id | count | last assigned | status`
pub fn render_table(rotation: &Rotation) -> Vec<String> {
    rotation
        .members()
        .iter()
        .map(|m| {
            format!(
                "{} | {} | {} | {}",
                m.id,
                m.count,
                format_last_assigned(m),
                rotation.status_of(m).as_str()
            )
            .trim_end_matches([' ', '|'])
            .to_string()
        })
        .collect()
}

/// Export JSON de la rotation (jolie mise en forme, champs en camelCase)
pub fn export_rotation_json<P: AsRef<Path>>(path: P, rotation: &Rotation) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(rotation)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des membres: header `id,count,last_assigned,status`
pub fn export_members_csv<P: AsRef<Path>>(path: P, rotation: &Rotation) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "count", "last_assigned", "status"])?;
    for m in rotation.members() {
        let count = m.count.to_string();
        let last = m.last_assigned.map(|dt| dt.to_rfc3339()).unwrap_or_default();
        w.write_record([
            m.id.as_str(),
            count.as_str(),
            last.as_str(),
            rotation.status_of(m).as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::{add_member, assign_next, skip_and_assign_next};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample() -> Rotation {
        let r = add_member(&Rotation::default(), "foo").unwrap();
        let r = add_member(&r, "bar").unwrap();
        let r = add_member(&r, "baz").unwrap();
        let r = assign_next(&r, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()).unwrap();
        skip_and_assign_next(&r, Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn table_marks_current_and_skipped() {
        let lines = render_table(&sample());
        assert_eq!(
            lines,
            vec![
                "foo | 0 | - | skipped".to_string(),
                "bar | 1 | 2024-01-02T09:00:00+00:00 | current".to_string(),
                "baz | 0 | -".to_string(),
            ]
        );
    }

    #[test]
    fn json_export_reads_back_as_the_same_rotation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotation.json");
        let rotation = sample();
        export_rotation_json(&path, &rotation).unwrap();
        let back: Rotation = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, rotation);
    }

    #[test]
    fn csv_export_has_one_row_per_member() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("members.csv");
        export_members_csv(&path, &sample()).unwrap();
        let out = fs::read_to_string(&path).unwrap();
        insta::assert_snapshot!(out.trim_end(), @r"
        id,count,last_assigned,status
        foo,0,,skipped
        bar,1,2024-01-02T09:00:00+00:00,current
        baz,0,,
        ");
    }
}
