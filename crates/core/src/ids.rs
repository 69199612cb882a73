// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity types used throughout the job execution runtime.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

crate::define_id! {
    /// Unique identifier for a job instance.
    pub struct JobId("job-");
}

crate::define_id! {
    /// Identifies one leased execution session of a job.
    ///
    /// Exactly one worker may append events under a given `AttemptId`; the
    /// event store rejects `append` calls from an attempt whose lease expired.
    pub struct AttemptId("atp-");
}

crate::define_id! {
    /// Identifies an agent instance (the thing a job runs on behalf of).
    pub struct AgentInstanceId("agt-");
}

crate::define_id! {
    /// Identifies a message delivered to an agent's inbox.
    pub struct MessageId("msg-");
}

/// Identifies the tenant a job or agent instance belongs to.
///
/// Tenants are externally assigned, so this wraps a plain string rather
/// than using [`crate::define_id`]'s random generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub SmolStr);

impl TenantId {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Identifies a worker process. Workers pick their own identity (hostname,
/// pod name, or an operator-supplied string) rather than having one
/// generated for them, so this is a plain string wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub SmolStr);

impl WorkerId {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for WorkerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Identifies a node within a single [`crate::task_graph::TaskGraph`].
///
/// Node ids are chosen by the Planner and only need to be unique within
/// their own graph, so this is a plain string wrapper with the ordering
/// the Step Executor relies on for its topological tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub SmolStr);

impl NodeId {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A string naming an external awaited signal, chosen by the node when it parks.
///
/// The event store and signal dispatcher compare these for exact equality;
/// a mismatched key must never unpark a waiting job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationKey(pub SmolStr);

impl CorrelationKey {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CorrelationKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
