//! Browsing resources: jobs, talents and projects.

use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use super::client::{Access, Client, NoBody, Operation};
use super::normalize::JobsPayload;
use super::query::ResourceQuery;
use crate::error::Result;
use crate::types::{Job, NewJob, Project, ProjectInput, Talent};

// =============================================================================
// Jobs API
// =============================================================================

/// Jobs API client.
#[derive(Debug)]
pub struct JobsApi<'a> {
    client: &'a Client,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List jobs matching `query`.
    ///
    /// Accepts both a bare array and a `{ "jobs": [...] }` wrapper; a body
    /// in neither shape yields an empty list.
    pub async fn list(&self, query: &ResourceQuery) -> Result<Vec<Job>> {
        self.list_payload(query).await.map(JobsPayload::into_jobs)
    }

    /// List jobs and report which response shape the server used.
    pub async fn list_payload(&self, query: &ResourceQuery) -> Result<JobsPayload> {
        let body: Value = self
            .client
            .call(
                Operation::FetchJobs,
                Method::GET,
                self.client.url(&["jobs"], Some(query)),
                Access::Public,
                None::<&NoBody>,
            )
            .await?;
        let payload = JobsPayload::classify(body);
        if payload == JobsPayload::Unrecognized {
            warn!(name: "api.jobs.unrecognized", "Jobs response in neither list nor wrapped shape");
        }
        Ok(payload)
    }

    /// Publish a job offer.
    pub async fn create(&self, job: &NewJob) -> Result<Job> {
        self.client
            .call(
                Operation::CreateJob,
                Method::POST,
                self.client.url(&["jobs"], None),
                Access::Authenticated,
                Some(job),
            )
            .await
    }
}

// =============================================================================
// Talents API
// =============================================================================

/// Talents API client.
#[derive(Debug)]
pub struct TalentsApi<'a> {
    client: &'a Client,
}

impl<'a> TalentsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List talents matching `query`.
    pub async fn list(&self, query: &ResourceQuery) -> Result<Vec<Talent>> {
        self.client
            .call(
                Operation::FetchTalents,
                Method::GET,
                self.client.url(&["talents"], Some(query)),
                Access::Public,
                None::<&NoBody>,
            )
            .await
    }
}

// =============================================================================
// Projects API
// =============================================================================

/// Projects API client.
#[derive(Debug)]
pub struct ProjectsApi<'a> {
    client: &'a Client,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List projects matching `query`.
    pub async fn list(&self, query: &ResourceQuery) -> Result<Vec<Project>> {
        self.client
            .call(
                Operation::FetchProjects,
                Method::GET,
                self.client.url(&["projects"], Some(query)),
                Access::Public,
                None::<&NoBody>,
            )
            .await
    }

    /// Free-text project search, `GET /projects?search=<text>`.
    pub async fn search(&self, text: &str) -> Result<Vec<Project>> {
        self.list(&ResourceQuery::search(text)).await
    }

    /// Get a project by ID.
    pub async fn get(&self, id: &str) -> Result<Project> {
        self.client
            .call(
                Operation::FetchProject,
                Method::GET,
                self.client.url(&["projects", id], None),
                Access::Public,
                None::<&NoBody>,
            )
            .await
    }

    /// Create a project owned by the current user.
    pub async fn create(&self, project: &ProjectInput) -> Result<Project> {
        self.client
            .call(
                Operation::CreateProject,
                Method::POST,
                self.client.url(&["projects"], None),
                Access::Authenticated,
                Some(project),
            )
            .await
    }

    /// Replace a project's editable fields.
    pub async fn update(&self, id: &str, project: &ProjectInput) -> Result<Project> {
        self.client
            .call(
                Operation::UpdateProject,
                Method::PUT,
                self.client.url(&["projects", id], None),
                Access::Authenticated,
                Some(project),
            )
            .await
    }

    /// Delete a project.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .call_empty(
                Operation::DeleteProject,
                Method::DELETE,
                self.client.url(&["projects", id], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }
}
