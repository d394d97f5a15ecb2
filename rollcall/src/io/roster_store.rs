//! Roster load/save over the flat comma-delimited record format.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::core::participant::Participant;

/// Load participants from `path`, one record per line.
///
/// Blank lines are skipped. A line with the wrong field count or a numeric
/// field that is not a non-negative integer aborts the load with an error
/// naming the file, the line number, and the offending line. A file with no
/// parsable records is an error.
pub fn load_roster(path: &Path) -> Result<Vec<Participant>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read roster {}", path.display()))?;

    let mut roster = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let participant = parse_line(line)
            .with_context(|| format!("{}:{}: malformed record {:?}", path.display(), number + 1, line))?;
        roster.push(participant);
    }
    if roster.is_empty() {
        bail!("roster {} contains no participants", path.display());
    }
    debug!(path = %path.display(), count = roster.len(), "roster loaded");
    Ok(roster)
}

/// Write participants back to `path` in roster order, one record per line.
///
/// The write is atomic (temp file + rename). With `backup` set, the previous
/// file contents are copied to `<path>.bak` first.
pub fn save_roster(path: &Path, roster: &[Participant], backup: bool) -> Result<()> {
    let mut buf = String::new();
    for participant in roster {
        buf.push_str(&participant.to_line());
        buf.push('\n');
    }

    if backup && path.exists() {
        let backup_path = sibling_with_suffix(path, ".bak");
        fs::copy(path, &backup_path)
            .with_context(|| format!("back up roster to {}", backup_path.display()))?;
    }

    let tmp_path = sibling_with_suffix(path, ".tmp");
    fs::write(&tmp_path, &buf)
        .with_context(|| format!("write temp roster {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("replace roster {}", path.display()))?;
    debug!(path = %path.display(), count = roster.len(), "roster saved");
    Ok(())
}

fn parse_line(line: &str) -> Result<Participant> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 5 {
        bail!("expected 5 comma-separated fields, got {}", fields.len());
    }
    Ok(Participant {
        name: fields[0].to_string(),
        polled: parse_count(fields[1], "polled")?,
        correct: parse_count(fields[2], "correct")?,
        attempted: parse_count(fields[3], "attempted")?,
        excused: parse_count(fields[4], "excused")?,
    })
}

fn parse_count(field: &str, column: &str) -> Result<u32> {
    field
        .trim()
        .parse::<u32>()
        .with_context(|| format!("{column} column is not a non-negative integer: {field:?}"))
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
