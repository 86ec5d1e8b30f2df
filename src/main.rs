mod fetch;
mod leaderboard;
mod report;
mod run_context;

use fetch::*;
use leaderboard::*;
use report::*;
use run_context::*;

/*
    One pass over every team tag: fetch each team's season data, build the player
    and team leaderboards, then write the dated CSV pair plus the timestamp marker.
    Retries, paths and the API base URL are all tuned through RunContext.
*/

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ctx = RunContext::default();
    let fetcher = TeamFetcher::new(&ctx);

    // Teams that come back empty stay in the list; the aggregation pass skips them.
    let mut results: Vec<(&str, TeamRecord)> = Vec::new();
    for tag in dedup_tags(TEAM_TAGS) {
        results.push((tag, fetcher.fetch_team(&ctx, tag)));
    }

    let (players, teams) = build_leaderboards(&ctx, &results);

    write_timestamp(&ctx).expect("Failed to write timestamp marker");
    write_leaderboards(&ctx, &players, &teams).expect("Failed to write leaderboards");
}
