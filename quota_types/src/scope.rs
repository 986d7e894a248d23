//! Addressing of quota policies: the user, table or namespace a policy
//! applies to.

use std::fmt::{Display, Formatter};

use snafu::Snafu;

/// Error returned when a combination of user, table and namespace does not
/// form a legal quota scope.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[allow(missing_docs)]
pub enum InvalidScopeError {
    #[snafu(display(
        "a quota cannot be scoped to table {table} and namespace {namespace} at the same time"
    ))]
    TableAndNamespace { table: TableName, namespace: String },

    #[snafu(display("a space quota requires exactly one of a table or a namespace"))]
    SpaceLimitTarget,
}

/// The name of a table in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName(String);

impl TableName {
    /// Create a new table name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The table name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The entity a scope is pinned to, when it is not cluster-wide.
///
/// A scope can never name a table and a namespace at the same time, so the
/// two are a tagged choice rather than a pair of optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeTarget {
    /// The scope applies to a single table.
    Table(TableName),
    /// The scope applies to every table in a namespace.
    Namespace(String),
}

impl Display for ScopeTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(table) => write!(f, "TABLE => {table}"),
            Self::Namespace(namespace) => write!(f, "NAMESPACE => {namespace}"),
        }
    }
}

/// Who or what a quota policy applies to.
///
/// A scope optionally names a user and optionally names a [`ScopeTarget`].
/// Both absent means the policy is cluster-wide (legal for throttles and
/// the global bypass, never for space limits).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    user: Option<String>,
    target: Option<ScopeTarget>,
}

impl Scope {
    /// Validate a raw `(user, table, namespace)` triple.
    ///
    /// This is the single structural check shared by every policy kind:
    /// a table and a namespace may never be supplied together. Stricter,
    /// kind-specific rules (the space-limit XOR) live with the kinds
    /// themselves.
    pub fn new(
        user: Option<String>,
        table: Option<TableName>,
        namespace: Option<String>,
    ) -> Result<Self, InvalidScopeError> {
        let target = match (table, namespace) {
            (Some(table), Some(namespace)) => {
                return TableAndNamespaceSnafu { table, namespace }.fail();
            }
            (Some(table), None) => Some(ScopeTarget::Table(table)),
            (None, Some(namespace)) => Some(ScopeTarget::Namespace(namespace)),
            (None, None) => None,
        };
        Ok(Self { user, target })
    }

    /// A scope covering all users and all tables.
    pub fn cluster() -> Self {
        Self {
            user: None,
            target: None,
        }
    }

    /// A scope covering everything a single user does.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            target: None,
        }
    }

    /// A scope covering what a single user does on a single table.
    pub fn for_user_on_table(user: impl Into<String>, table: impl Into<TableName>) -> Self {
        Self {
            user: Some(user.into()),
            target: Some(ScopeTarget::Table(table.into())),
        }
    }

    /// A scope covering what a single user does in a namespace.
    pub fn for_user_on_namespace(user: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            target: Some(ScopeTarget::Namespace(namespace.into())),
        }
    }

    /// A scope covering a single table, regardless of user.
    pub fn for_table(table: impl Into<TableName>) -> Self {
        Self {
            user: None,
            target: Some(ScopeTarget::Table(table.into())),
        }
    }

    /// A scope covering a namespace, regardless of user.
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            user: None,
            target: Some(ScopeTarget::Namespace(namespace.into())),
        }
    }

    /// The user this scope names, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The table or namespace this scope names, if any.
    pub fn target(&self) -> Option<&ScopeTarget> {
        self.target.as_ref()
    }

    /// The table this scope names, if any.
    pub fn table(&self) -> Option<&TableName> {
        match &self.target {
            Some(ScopeTarget::Table(table)) => Some(table),
            _ => None,
        }
    }

    /// The namespace this scope names, if any.
    pub fn namespace(&self) -> Option<&str> {
        match &self.target {
            Some(ScopeTarget::Namespace(namespace)) => Some(namespace),
            _ => None,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.user, &self.target) {
            (None, None) => write!(f, "CLUSTER"),
            (Some(user), None) => write!(f, "USER => {user}"),
            (None, Some(target)) => target.fmt(f),
            (Some(user), Some(target)) => write!(f, "USER => {user}, {target}"),
        }
    }
}
