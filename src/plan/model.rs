//! In-memory model of a Terraform plan document.
//!
//! These types map the subset of `terraform show -json` output that the
//! summarizer consumes: the list of resource changes, each with its resource
//! type, owning module, and ordered action tokens. Unrelated document fields
//! are ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Module label used for resources that live at the root of the
/// configuration (no `module_address` in the plan document).
pub const ROOT_MODULE: &str = "root";

/// A single planned action token.
///
/// Terraform emits the tokens create/update/delete/no-op/read; anything else
/// is preserved verbatim so unknown tokens flow through classification and
/// rendering without being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Resource will be created.
    Create,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed.
    Delete,
    /// No operation planned.
    NoOp,
    /// Resource will be read (data source).
    Read,
    /// Unrecognized action token, preserved verbatim.
    Other(String),
}

impl Action {
    /// Returns the token spelling as it appears in the plan document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::NoOp => "no-op",
            Self::Read => "read",
            Self::Other(token) => token,
        }
    }
}

impl From<String> for Action {
    fn from(token: String) -> Self {
        match token.as_str() {
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "no-op" => Self::NoOp,
            "read" => Self::Read,
            _ => Self::Other(token),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The ordered action-token sequence of one resource change, used as a
/// grouping key.
///
/// Token order is preserved as given by the plan document: [create, delete]
/// and [delete, create] are distinct keys even though both render as
/// "replace". Ordering between keys is lexical over the token spellings,
/// which keeps `BTreeMap` iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ActionKey(Vec<Action>);

impl ActionKey {
    /// Creates a key from an ordered token sequence.
    #[must_use]
    pub fn new(actions: impl Into<Vec<Action>>) -> Self {
        Self(actions.into())
    }

    /// Returns the tokens in plan-document order.
    #[must_use]
    pub fn tokens(&self) -> &[Action] {
        &self.0
    }

    /// Returns the canonical string key: tokens joined by underscore.
    ///
    /// This encoding is stable across output formats and is used as the map
    /// key in JSON reports (e.g. `create_delete`).
    #[must_use]
    pub fn canonical(&self) -> String {
        self.0
            .iter()
            .map(Action::as_str)
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// The `change` object of a resource-change entry.
///
/// The action list is mandatory: an entry without it is a malformed
/// document and is rejected during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    /// Ordered action tokens describing the planned operation.
    pub actions: Vec<Action>,
}

/// One planned mutation to an infrastructure resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Terraform resource type (e.g. `aws_s3_bucket`).
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Address of the owning module; absent for root resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_address: Option<String>,
    /// The planned change.
    pub change: Change,
}

impl ResourceChange {
    /// Returns the owning module address, or [`ROOT_MODULE`] when absent.
    #[must_use]
    pub fn module_or_root(&self) -> &str {
        self.module_address.as_deref().unwrap_or(ROOT_MODULE)
    }

    /// Returns this change's action tokens as a grouping key.
    #[must_use]
    pub fn action_key(&self) -> ActionKey {
        ActionKey::new(self.change.actions.clone())
    }
}

/// A fully-materialized Terraform plan.
///
/// A plan with zero entries is valid and represents "no changes".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    /// Terraform version that produced the document, when present.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// All planned resource changes. Terraform omits this field entirely
    /// when the plan is empty.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
}

impl Plan {
    /// Creates a plan from a list of resource changes.
    #[must_use]
    pub fn new(resource_changes: Vec<ResourceChange>) -> Self {
        Self {
            terraform_version: None,
            resource_changes,
        }
    }

    /// Returns the number of planned changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resource_changes.len()
    }

    /// Returns true if the plan contains no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource_changes.is_empty()
    }
}
