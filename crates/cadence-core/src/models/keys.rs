//! Document addressing: who owns a plan and which plan a document belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Scope used when none is configured.
pub const DEFAULT_SCOPE: &str = "cadence";

/// Identifier of a plan (and of its tracking document).
pub type PlanId = u64;

/// The collection of plans owned by one user within an application scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserScope {
    pub scope: String,
    pub user: String,
}

impl UserScope {
    /// Establishes the identity documents are read and written under.
    ///
    /// There is no anonymous fallback: a blank user is an
    /// [`TrackerError::Auth`] error, as is a blank scope.
    pub fn new(scope: impl Into<String>, user: impl Into<String>) -> Result<Self> {
        let scope = scope.into().trim().to_string();
        let user = user.into().trim().to_string();

        if user.is_empty() {
            return Err(TrackerError::Auth {
                reason: "no user identity was provided".to_string(),
            });
        }
        if scope.is_empty() {
            return Err(TrackerError::Auth {
                reason: "no application scope was provided".to_string(),
            });
        }

        Ok(Self { scope, user })
    }

    /// Key of one plan's documents inside this collection.
    pub fn plan(&self, plan: PlanId) -> DocumentKey {
        DocumentKey {
            scope: self.scope.clone(),
            user: self.user.clone(),
            plan,
        }
    }
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.user)
    }
}

/// Compound key shared by a plan document and its tracking document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    pub scope: String,
    pub user: String,
    pub plan: PlanId,
}

impl DocumentKey {
    /// The collection this document lives in.
    pub fn owner(&self) -> UserScope {
        UserScope {
            scope: self.scope.clone(),
            user: self.user.clone(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.scope, self.user, self.plan)
    }
}

/// A plan as listed in its owner's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: PlanId,
    pub name: String,
    pub sessions: usize,
}
