//! Resources tied to the signed-in user: applications, messages,
//! notifications and the profile.
//!
//! Everything here is authenticated except [`AuthApi::user`].

use reqwest::Method;

use super::client::{Access, Client, NoBody, Operation};
use crate::error::Result;
use crate::types::{
    Application, ApplicationStats, ApplicationStatusUpdate, Conversation, Message,
    NewApplication, NewMessage, NewNotification, Notification, ProfileUpdate, UnreadCount,
    UserProfile,
};

// =============================================================================
// Applications API
// =============================================================================

/// Applications API client.
#[derive(Debug)]
pub struct ApplicationsApi<'a> {
    client: &'a Client,
}

impl<'a> ApplicationsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Apply to a job.
    pub async fn apply(&self, application: &NewApplication) -> Result<Application> {
        self.client
            .call(
                Operation::CreateApplication,
                Method::POST,
                self.client.url(&["applications"], None),
                Access::Authenticated,
                Some(application),
            )
            .await
    }

    /// Applications submitted by the current user.
    pub async fn mine(&self) -> Result<Vec<Application>> {
        self.client
            .call(
                Operation::FetchMyApplications,
                Method::GET,
                self.client.url(&["applications", "my"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Applications received for one of the current user's jobs.
    pub async fn for_job(&self, job_id: &str) -> Result<Vec<Application>> {
        self.client
            .call(
                Operation::FetchJobApplications,
                Method::GET,
                self.client.url(&["applications", "job", job_id], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Per-status counters for the current user's applications.
    pub async fn stats(&self) -> Result<ApplicationStats> {
        self.client
            .call(
                Operation::FetchApplicationStats,
                Method::GET,
                self.client.url(&["applications", "stats", "my"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Move an application to `status` (e.g. "accepted").
    pub async fn update_status(&self, id: &str, status: impl Into<String>) -> Result<Application> {
        let body = ApplicationStatusUpdate {
            status: status.into(),
        };
        self.client
            .call(
                Operation::UpdateApplicationStatus,
                Method::PUT,
                self.client.url(&["applications", id, "status"], None),
                Access::Authenticated,
                Some(&body),
            )
            .await
    }
}

// =============================================================================
// Messages API
// =============================================================================

/// Messages API client.
#[derive(Debug)]
pub struct MessagesApi<'a> {
    client: &'a Client,
}

impl<'a> MessagesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Conversation summaries for the current user.
    pub async fn conversations(&self) -> Result<Vec<Conversation>> {
        self.client
            .call(
                Operation::FetchConversations,
                Method::GET,
                self.client.url(&["messages"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Messages exchanged with `user_id`.
    pub async fn thread(&self, user_id: &str) -> Result<Vec<Message>> {
        self.client
            .call(
                Operation::FetchMessages,
                Method::GET,
                self.client.url(&["messages", user_id], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Send a direct message.
    pub async fn send(&self, message: &NewMessage) -> Result<Message> {
        self.client
            .call(
                Operation::SendMessage,
                Method::POST,
                self.client.url(&["messages"], None),
                Access::Authenticated,
                Some(message),
            )
            .await
    }

    /// Mark a message as read.
    pub async fn mark_read(&self, id: &str) -> Result<()> {
        self.client
            .call_empty(
                Operation::MarkMessageRead,
                Method::PUT,
                self.client.url(&["messages", id, "read"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }
}

// =============================================================================
// Notifications API
// =============================================================================

/// Notifications API client.
#[derive(Debug)]
pub struct NotificationsApi<'a> {
    client: &'a Client,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Notifications for the current user.
    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.client
            .call(
                Operation::FetchNotifications,
                Method::GET,
                self.client.url(&["notifications"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self) -> Result<u64> {
        let count: UnreadCount = self
            .client
            .call(
                Operation::FetchUnreadCount,
                Method::GET,
                self.client.url(&["notifications", "unread-count"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await?;
        Ok(count.count)
    }

    /// Create a notification for another user.
    pub async fn create(&self, notification: &NewNotification) -> Result<Notification> {
        self.client
            .call(
                Operation::CreateNotification,
                Method::POST,
                self.client.url(&["notifications"], None),
                Access::Authenticated,
                Some(notification),
            )
            .await
    }

    /// Mark one notification as read.
    pub async fn mark_read(&self, id: &str) -> Result<()> {
        self.client
            .call_empty(
                Operation::MarkNotificationRead,
                Method::PUT,
                self.client.url(&["notifications", id, "read"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Mark every notification as read.
    pub async fn mark_all_read(&self) -> Result<()> {
        self.client
            .call_empty(
                Operation::MarkAllNotificationsRead,
                Method::PUT,
                self.client.url(&["notifications", "read-all"], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }

    /// Delete a notification.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .call_empty(
                Operation::DeleteNotification,
                Method::DELETE,
                self.client.url(&["notifications", id], None),
                Access::Authenticated,
                None::<&NoBody>,
            )
            .await
    }
}

// =============================================================================
// Auth API
// =============================================================================

/// Auth/Profile API client.
#[derive(Debug)]
pub struct AuthApi<'a> {
    client: &'a Client,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Public profile of a user.
    pub async fn user(&self, id: &str) -> Result<UserProfile> {
        self.client
            .call(
                Operation::FetchUser,
                Method::GET,
                self.client.url(&["auth", "user", id], None),
                Access::Public,
                None::<&NoBody>,
            )
            .await
    }

    /// Update the current user's profile.
    ///
    /// Returns the server's view of the profile; the session is not touched.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.client
            .call(
                Operation::UpdateProfile,
                Method::PUT,
                self.client.url(&["auth", "profile"], None),
                Access::Authenticated,
                Some(update),
            )
            .await
    }
}
