//! Request gateway for the marketplace REST API.
//!
//! [`Client`] owns URL construction, bearer injection and failure
//! classification; per-resource accessors (`client.jobs()`,
//! `client.messages()`, ...) expose typed operations on top of it.

mod account;
mod client;
mod marketplace;
mod normalize;
mod query;

pub use account::{ApplicationsApi, AuthApi, MessagesApi, NotificationsApi};
pub use client::{Client, Operation};
pub use marketplace::{JobsApi, ProjectsApi, TalentsApi};
pub use normalize::JobsPayload;
pub use query::{ALL_SENTINEL, FilterValue, ResourceQuery};
