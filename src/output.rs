use dk_api::PlayerSalaryDocument;
use std::io::Write;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

const COLUMNS: [&str; 10] = [
    "draftable_id",
    "player_id",
    "player_dk_id",
    "first_name",
    "last_name",
    "display_name",
    "position",
    "team_abbreviation",
    "roster_slot_id",
    "salary",
];

pub fn write<W: Write>(
    out: &mut W,
    format: OutputFormat,
    salaries: &[PlayerSalaryDocument],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => write_tsv(out, salaries)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, salaries)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_tsv<W: Write>(out: &mut W, salaries: &[PlayerSalaryDocument]) -> std::io::Result<()> {
    writeln!(out, "{}", COLUMNS.join("\t"))?;
    for s in salaries {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            s.draftable_id,
            s.player_id,
            s.player_dk_id,
            field(&s.first_name),
            field(&s.last_name),
            field(&s.display_name),
            field(&s.position),
            field(&s.team_abbreviation),
            s.roster_slot_id,
            s.salary
        )?;
    }
    Ok(())
}

/// Tabs and newlines would break the row.
fn field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hurts() -> PlayerSalaryDocument {
        PlayerSalaryDocument {
            draftable_id: 19725634,
            player_id: 795896,
            player_dk_id: 14102,
            first_name: "Jalen".into(),
            last_name: "Hurts".into(),
            display_name: "Jalen Hurts".into(),
            position: "QB".into(),
            team_abbreviation: "PHI".into(),
            roster_slot_id: 66,
            salary: 6800,
        }
    }

    #[test]
    fn tsv_has_header_and_one_row_per_player() {
        let mut buf = Vec::new();
        write(&mut buf, OutputFormat::Tsv, &[hurts()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("draftable_id\tplayer_id"));
        assert_eq!(lines[1], "19725634\t795896\t14102\tJalen\tHurts\tJalen Hurts\tQB\tPHI\t66\t6800");
    }

    #[test]
    fn json_is_an_array_of_records() {
        let mut buf = Vec::new();
        write(&mut buf, OutputFormat::Json, &[hurts()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["display_name"], "Jalen Hurts");
        assert_eq!(value[0]["salary"], 6800);
    }

    #[test]
    fn tabs_in_names_are_flattened() {
        assert_eq!(field("A\tB"), "A B");
    }
}
