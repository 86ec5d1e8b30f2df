use serde::*;

use crate::fetch::{BoardStat, TeamRecord};
use crate::run_context::RunContext;

// The single aggregate bucket we care about out of the per-board stats list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeasonStat {
    pub answered: i64,
    pub played: i64,
    pub errs: i64,
}

// First entry on the "season" board wins; a team without one just scores zero.
pub fn season_stat(stats: &[BoardStat]) -> SeasonStat {
    for stat in stats {
        if stat.board == "season" {
            return SeasonStat {
                answered: stat.answered,
                played: stat.played,
                errs: stat.errs,
            };
        }
    }

    SeasonStat::default()
}

// Points are answered minus errors, but only once you've actually raced.
// A zero-race entry scores zero no matter what its counters claim, so nobody
// gets credited for attempts that never happened. Same formula at player and
// team level.
pub fn points(answered: i64, errs: i64, played: i64) -> i64 {
    if played > 0 { answered - errs } else { 0 }
}

// Field names double as the CSV header, in column order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    #[serde(rename(serialize = "Username"))]
    pub username: String,
    #[serde(rename(serialize = "ProfileLink"))]
    pub profile_link: String,
    #[serde(rename(serialize = "DisplayName"))]
    pub display_name: String,
    #[serde(rename(serialize = "Races"))]
    pub races: i64,
    #[serde(rename(serialize = "Points"))]
    pub points: i64,
    #[serde(rename(serialize = "Title"))]
    pub title: String,
    #[serde(rename(serialize = "Team"))]
    pub team: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamRow {
    #[serde(rename(serialize = "Team"))]
    pub team: String,
    #[serde(rename(serialize = "TotalPoints"))]
    pub total_points: i64,
    #[serde(rename(serialize = "Races"))]
    pub races: i64,
    #[serde(rename(serialize = "Members"))]
    pub members: i64,
}

// One team's contribution to both leaderboards. None when the season list is
// empty, which drops the team from both outputs.
// Players with a null points field never recorded a season score and are skipped.
pub fn team_rows(ctx: &RunContext, tag: &str, record: &TeamRecord) -> Option<(TeamRow, Vec<PlayerRow>)> {
    if record.season.is_empty() { return None; }

    let season = season_stat(&record.stats);

    let team = TeamRow {
        team: tag.to_string(),
        total_points: points(season.answered, season.errs, season.played),
        races: season.played,
        members: record.info.members,
    };

    let mut players = Vec::new();
    for entry in &record.season {
        if entry.points.is_none() { continue; }

        players.push(PlayerRow {
            username: entry.username.clone(),
            profile_link: ctx.profile_url(&entry.username),
            display_name: entry.display_name.clone(),
            races: entry.played,
            points: points(entry.answered, entry.errs, entry.played),
            title: entry.title.clone().unwrap_or_else(|| "N/A".to_string()),
            team: tag.to_string(),
        });
    }

    Some((team, players))
}

// Single pure pass over every fetched team, in tag order, then one stable sort
// per output. Ties keep encounter order: tag order first, season-list order within
// a team.
pub fn build_leaderboards(ctx: &RunContext, results: &[(&str, TeamRecord)]) -> (Vec<PlayerRow>, Vec<TeamRow>) {
    let mut all_players: Vec<PlayerRow> = Vec::new();
    let mut team_summary: Vec<TeamRow> = Vec::new();

    for (tag, record) in results {
        match team_rows(ctx, tag, record) {
            Some((team, players)) => {
                team_summary.push(team);
                all_players.extend(players);
            }
            None => log::info!("[{}] no data", tag),
        }
    }

    all_players.sort_by(|a, b| b.points.cmp(&a.points));
    team_summary.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    (all_players, team_summary)
}
