//! Global search across projects, talents and jobs.
//!
//! One free-text query fans out to the three collections concurrently. Each
//! branch settles independently and a failing branch contributes an empty
//! list, so a search always produces a (possibly partial) result.

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{Client, ResourceQuery};
use crate::error::Result;
use crate::types::{Job, Project, Talent};

/// Queries shorter than this (after trimming) are not sent.
pub const MIN_QUERY_CHARS: usize = 2;

/// Side-by-side search results, one list per collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedSearchResult {
    pub projects: Vec<Project>,
    pub talents: Vec<Talent>,
    pub jobs: Vec<Job>,
}

impl AggregatedSearchResult {
    /// Whether all three lists are empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.talents.is_empty() && self.jobs.is_empty()
    }
}

/// Failure-tolerant multi-resource search.
#[derive(Debug, Clone)]
pub struct SearchAggregator {
    client: Client,
}

impl SearchAggregator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Search all three collections for `query`.
    ///
    /// Absent or too-short queries return an empty result without touching
    /// the network. Never fails.
    pub async fn search<'q>(&self, query: impl Into<Option<&'q str>>) -> AggregatedSearchResult {
        let Some(text) = query
            .into()
            .map(str::trim)
            .filter(|q| q.chars().count() >= MIN_QUERY_CHARS)
        else {
            debug!(name: "search.skipped", "Query too short, skipping search");
            return AggregatedSearchResult::default();
        };

        let filters = ResourceQuery::search(text);
        let (projects_api, talents_api, jobs_api) = (
            self.client.projects(),
            self.client.talents(),
            self.client.jobs(),
        );
        let (projects, talents, jobs) = futures::join!(
            projects_api.list(&filters),
            talents_api.list(&filters),
            jobs_api.list(&filters),
        );

        let result = AggregatedSearchResult {
            projects: or_empty("projects", projects),
            talents: or_empty("talents", talents),
            jobs: or_empty("jobs", jobs),
        };
        debug!(
            name: "search.completed",
            projects = result.projects.len(),
            talents = result.talents.len(),
            jobs = result.jobs.len(),
            "Search completed"
        );
        result
    }
}

fn or_empty<T>(branch: &'static str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(name: "search.branch.failed", branch, error = %e, "Search branch failed");
        Vec::new()
    })
}
