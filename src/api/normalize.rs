//! Response shape normalization for the jobs collection.
//!
//! `GET /jobs` answers either with a bare array or with `{ "jobs": [...] }`
//! depending on the call site. The payload is classified once here so that
//! everything downstream only sees a `Vec<Job>`.

use serde_json::Value;

use crate::types::Job;

/// Field holding the list in the wrapped shape.
const JOBS_FIELD: &str = "jobs";

/// Shape of a jobs list response.
#[derive(Debug, Clone, PartialEq)]
pub enum JobsPayload {
    /// `[ ... ]`
    Bare(Vec<Job>),
    /// `{ "jobs": [ ... ], ... }`
    Wrapped(Vec<Job>),
    /// Neither an array nor an object with a `jobs` array.
    Unrecognized,
}

impl JobsPayload {
    /// Classify a decoded response body.
    ///
    /// Only the outer shape is checked. Elements that are not JSON objects
    /// are skipped; object fields are read leniently (see [`Job`]).
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Array(items) => Self::Bare(decode_jobs(items)),
            Value::Object(mut map) => match map.remove(JOBS_FIELD) {
                Some(Value::Array(items)) => Self::Wrapped(decode_jobs(items)),
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }

    /// Canonical list; unrecognized payloads yield an empty list.
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            Self::Bare(jobs) | Self::Wrapped(jobs) => jobs,
            Self::Unrecognized => Vec::new(),
        }
    }
}

fn decode_jobs(items: Vec<Value>) -> Vec<Job> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}
