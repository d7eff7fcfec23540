//! HTTP client for the marketplace REST API.

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::account::{ApplicationsApi, AuthApi, MessagesApi, NotificationsApi};
use super::marketplace::{JobsApi, ProjectsApi, TalentsApi};
use super::query::ResourceQuery;
use crate::error::{Error, Result};
use crate::session::SessionStore;

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Public,
    Authenticated,
}

/// Every gateway operation, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchJobs,
    CreateJob,
    FetchTalents,
    FetchProjects,
    FetchProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateApplication,
    FetchMyApplications,
    FetchJobApplications,
    FetchApplicationStats,
    UpdateApplicationStatus,
    FetchConversations,
    FetchMessages,
    SendMessage,
    MarkMessageRead,
    FetchNotifications,
    FetchUnreadCount,
    CreateNotification,
    MarkNotificationRead,
    MarkAllNotificationsRead,
    DeleteNotification,
    FetchUser,
    UpdateProfile,
}

impl Operation {
    /// Fixed message reported when the server rejects this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::FetchJobs => "Failed to fetch jobs",
            Self::CreateJob => "Failed to create job",
            Self::FetchTalents => "Failed to fetch talents",
            Self::FetchProjects => "Failed to fetch projects",
            Self::FetchProject => "Failed to fetch project",
            Self::CreateProject => "Failed to create project",
            Self::UpdateProject => "Failed to update project",
            Self::DeleteProject => "Failed to delete project",
            Self::CreateApplication => "Failed to submit application",
            Self::FetchMyApplications => "Failed to fetch applications",
            Self::FetchJobApplications => "Failed to fetch job applications",
            Self::FetchApplicationStats => "Failed to fetch application stats",
            Self::UpdateApplicationStatus => "Failed to update application status",
            Self::FetchConversations => "Failed to fetch conversations",
            Self::FetchMessages => "Failed to fetch messages",
            Self::SendMessage => "Failed to send message",
            Self::MarkMessageRead => "Failed to mark message as read",
            Self::FetchNotifications => "Failed to fetch notifications",
            Self::FetchUnreadCount => "Failed to fetch unread count",
            Self::CreateNotification => "Failed to create notification",
            Self::MarkNotificationRead => "Failed to mark notification as read",
            Self::MarkAllNotificationsRead => "Failed to mark all notifications as read",
            Self::DeleteNotification => "Failed to delete notification",
            Self::FetchUser => "Failed to fetch user",
            Self::UpdateProfile => "Failed to update profile",
        }
    }
}

/// HTTP client for the marketplace API.
///
/// Reads the bearer token from the [`SessionStore`] it was built with on
/// every authenticated call, so a login or logout takes effect on the next
/// request without rebuilding the client.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use talentboard::api::{Client, ResourceQuery};
/// use talentboard::session::{MemoryStorage, SessionStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = SessionStore::load(Arc::new(MemoryStorage::new()));
/// let client = Client::new("http://localhost:5000/api", session)?;
///
/// let jobs = client
///     .jobs()
///     .list(&ResourceQuery::new().filter("location", "Lyon, FR"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    session: SessionStore,
}

impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of every endpoint (e.g., "http://localhost:5000/api")
    /// * `session` - Session providing the bearer token
    pub fn new(base_url: impl AsRef<str>, session: SessionStore) -> Result<Self> {
        Self::with_client(base_url, session, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        session: SessionStore,
        http: reqwest::Client,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session this client authenticates with.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the Jobs API.
    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }

    /// Access the Talents API.
    pub fn talents(&self) -> TalentsApi<'_> {
        TalentsApi::new(self)
    }

    /// Access the Projects API.
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    /// Access the Applications API.
    pub fn applications(&self) -> ApplicationsApi<'_> {
        ApplicationsApi::new(self)
    }

    /// Access the Messages API.
    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi::new(self)
    }

    /// Access the Notifications API.
    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    /// Access the Auth/Profile API.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Endpoint URL: `segments` appended below the base path, each one
    /// percent-encoded, followed by the retained query filters.
    pub(crate) fn url(&self, segments: &[&str], query: Option<&ResourceQuery>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(query) = query.filter(|q| !q.is_unfiltered()) {
            url.query_pairs_mut().extend_pairs(query.retained());
        }
        url
    }

    fn request(&self, method: Method, url: Url, access: Access) -> RequestBuilder {
        let builder = self.http.request(method, url);
        if access == Access::Public {
            return builder;
        }
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => {
                warn!(
                    name: "api.request.anonymous",
                    "Authenticated endpoint called without a session token"
                );
                builder
            }
        }
    }

    async fn send(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> Result<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            warn!(name: "api.transport.failed", ?operation, error = %e, "Request not delivered");
            Error::TransportUnavailable(e)
        })?;

        let status = response.status();
        debug!(
            name: "api.request",
            ?operation,
            url = %response.url(),
            status = status.as_u16(),
            "Request completed"
        );
        if status.is_success() {
            Ok(response)
        } else {
            warn!(
                name: "api.request.failed",
                ?operation,
                status = status.as_u16(),
                "{}",
                operation.failure_message()
            );
            Err(Error::RequestFailed {
                operation,
                status: status.as_u16(),
            })
        }
    }

    /// Issue a request and decode the JSON body.
    pub(crate) async fn call<T, B>(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        access: Access,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, url, access);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(operation, builder).await?;
        response.json().await.map_err(Error::Decode)
    }

    /// Issue a request whose response body is irrelevant.
    pub(crate) async fn call_empty<B>(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        access: Access,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, url, access);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(operation, builder).await?;
        Ok(())
    }
}

/// Placeholder body type for requests without a payload.
pub(crate) type NoBody = ();
