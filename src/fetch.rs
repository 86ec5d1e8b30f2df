use serde::*;
use serde_aux::field_attributes::{
    deserialize_number_from_string,
    deserialize_option_number_from_string,
};
use std::fmt;
use std::thread;
use std::time::Duration;

use crate::run_context::RunContext;

// The API wraps everything in a status envelope. Anything but "OK" means the team
// has nothing for us, so `results` defaults to empty containers.
#[derive(Deserialize, Debug)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub results: TeamRecord,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TeamRecord {
    #[serde(default)]
    pub season: Vec<PlayerEntry>,
    #[serde(default)]
    pub stats: Vec<BoardStat>,
    #[serde(default)]
    pub info: TeamInfo,
}

// Numeric fields come back as numbers or strings depending on the endpoint's mood,
// hence serde-aux on every count.
#[derive(Deserialize, Debug, Clone)]
pub struct PlayerEntry {
    #[serde(default)]
    pub username: String,
    #[serde(rename(deserialize = "displayName"), default = "unknown_display_name")]
    pub display_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub points: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub answered: i64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub played: i64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub errs: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BoardStat {
    #[serde(default)]
    pub board: String,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub answered: i64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub played: i64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub errs: i64,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TeamInfo {
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub members: i64,
}

fn unknown_display_name() -> String { "Unknown".to_string() }

// How a single fetch attempt can go wrong. Only Transient is worth retrying:
// a timeout will just time out again, and a non-OK status is the API's final answer.
#[derive(Debug)]
pub enum FetchFailure {
    Timeout,
    BadStatus(String),
    Transient(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Timeout => write!(f, "load timed out"),
            FetchFailure::BadStatus(status) => write!(f, "status: {}", status),
            FetchFailure::Transient(msg) => write!(f, "error: {}", msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn is_retryable(&self, failure: &FetchFailure) -> bool {
        matches!(failure, FetchFailure::Transient(_))
    }
}

// Drives one team's fetch to completion. Never fails past this boundary: every
// failure path collapses into an empty TeamRecord so the caller treats "no data"
// uniformly regardless of cause. The attempt function is injected so the decision
// table is testable without a network.
pub fn fetch_with_retry<F>(policy: &RetryPolicy, tag: &str, mut attempt: F) -> TeamRecord
where
    F: FnMut() -> Result<TeamRecord, FetchFailure>,
{
    for n in 1..=policy.max_attempts {
        log::info!("[{}] fetching (attempt {})", tag, n);

        match attempt() {
            Ok(record) => return record,
            Err(failure) if !policy.is_retryable(&failure) => {
                log::warn!("[{}] {}", tag, failure);
                return TeamRecord::default();
            }
            Err(failure) => {
                if n < policy.max_attempts {
                    log::warn!("[{}] {}, retrying in {}s", tag, failure, policy.delay.as_secs());
                    thread::sleep(policy.delay);
                } else {
                    log::warn!("[{}] {}, giving up after {} attempts", tag, failure, policy.max_attempts);
                }
            }
        }
    }

    TeamRecord::default()
}

pub struct TeamFetcher {
    client: reqwest::blocking::Client,
    policy: RetryPolicy,
}

impl TeamFetcher {
    pub fn new(ctx: &RunContext) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent("nitromath-leaderboard/0.2")
            .timeout(ctx.fetch_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            policy: RetryPolicy {
                max_attempts: ctx.max_attempts,
                delay: ctx.retry_delay,
            },
        }
    }

    pub fn fetch_team(&self, ctx: &RunContext, tag: &str) -> TeamRecord {
        let url = ctx.team_url(tag);
        fetch_with_retry(&self.policy, tag, || self.attempt(&url))
    }

    fn attempt(&self, url: &str) -> Result<TeamRecord, FetchFailure> {
        let response = self.client.get(url).send().map_err(classify)?;
        let payload: ApiResponse = response.json().map_err(classify)?;

        if payload.status != "OK" {
            return Err(FetchFailure::BadStatus(payload.status));
        }

        Ok(payload.results)
    }
}

fn classify(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transient(e.to_string())
    }
}
