use chrono::Utc;
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::leaderboard::{PlayerRow, TeamRow};
use crate::run_context::RunContext;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

// Single-line marker so the site frontend knows how fresh the boards are.
pub fn write_timestamp(ctx: &RunContext) -> Result<(), ReportError> {
    let utc_ts = Utc::now().format("%Y-%m-%d %H:%M:%S");
    fs::write(&ctx.timestamp_path, format!("Last Updated: {}", utc_ts))?;
    Ok(())
}

// One dated CSV pair per run in the archive directory. A run with no scored
// players writes nothing at all.
pub fn write_leaderboards(ctx: &RunContext, players: &[PlayerRow], teams: &[TeamRow]) -> Result<(), ReportError> {
    if players.is_empty() {
        log::warn!("No valid player data found.");
        return Ok(());
    }

    fs::create_dir_all(&ctx.archive_dir)?;
    let stamp = Utc::now().format("%Y%m%d");

    write_csv(
        &ctx.archive_dir.join(format!("nitromath_season_leaderboard_{}.csv", stamp)),
        players,
    )?;
    write_csv(
        &ctx.archive_dir.join(format!("nitromath_team_leaderboard_{}.csv", stamp)),
        teams,
    )?;

    Ok(())
}

// The header row comes from the row struct's serialize field names.
fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ReportError> {
    let mut writer = Writer::from_path(path)?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_context(dir: &Path) -> RunContext {
        RunContext {
            base_url: "https://www.nitromath.com".to_string(),
            max_attempts: 1,
            retry_delay: Duration::ZERO,
            fetch_timeout: Duration::ZERO,
            timestamp_path: dir.join("timestamp.txt"),
            archive_dir: dir.join("csv_archive"),
        }
    }

    fn player(username: &str, points: i64) -> PlayerRow {
        PlayerRow {
            username: username.to_string(),
            profile_link: format!("https://www.nitromath.com/racer/{}", username),
            display_name: username.to_string(),
            races: 2,
            points,
            title: "N/A".to_string(),
            team: "X3".to_string(),
        }
    }

    #[test]
    fn timestamp_is_a_single_labeled_line() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());

        write_timestamp(&ctx).unwrap();

        let content = fs::read_to_string(&ctx.timestamp_path).unwrap();
        assert!(content.starts_with("Last Updated: "));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn writes_dated_csv_pair_with_expected_headers() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());

        let players = vec![player("u1", 9), player("u2", 4)];
        let teams = vec![TeamRow {
            team: "X3".to_string(),
            total_points: 13,
            races: 4,
            members: 2,
        }];

        write_leaderboards(&ctx, &players, &teams).unwrap();

        let stamp = Utc::now().format("%Y%m%d");
        let season = fs::read_to_string(
            ctx.archive_dir.join(format!("nitromath_season_leaderboard_{}.csv", stamp)),
        ).unwrap();
        let team = fs::read_to_string(
            ctx.archive_dir.join(format!("nitromath_team_leaderboard_{}.csv", stamp)),
        ).unwrap();

        let mut season_lines = season.lines();
        assert_eq!(
            season_lines.next().unwrap(),
            "Username,ProfileLink,DisplayName,Races,Points,Title,Team"
        );
        assert!(season_lines.next().unwrap().starts_with("u1,"));
        assert!(season_lines.next().unwrap().starts_with("u2,"));

        assert_eq!(team.lines().next().unwrap(), "Team,TotalPoints,Races,Members");
        assert!(team.contains("X3,13,4,2"));
    }

    #[test]
    fn empty_player_set_writes_no_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());

        write_leaderboards(&ctx, &[], &[]).unwrap();

        assert!(!ctx.archive_dir.exists());
    }

    #[test]
    fn timestamp_write_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        ctx.timestamp_path = dir.path().join("missing").join("timestamp.txt");

        assert!(write_timestamp(&ctx).is_err());
    }
}
