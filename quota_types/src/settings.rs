//! The quota policy variants and their conversions to and from the wire
//! representation.

use std::fmt::{Display, Formatter};

use quota_wire::v1 as proto;
use snafu::Snafu;

use crate::{InvalidScopeError, Scope, ScopeTarget, TableName};

/// Error returned when a stored quota record carries an enumeration value
/// this build does not recognise.
///
/// Records are written by the master and may be newer than this client;
/// the raw value is preserved in the error so the operator can tell what
/// was stored. The record itself is not damaged and no partial settings
/// value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("unrecognised {field} value {value} in quota record"))]
pub struct ProtoFieldError {
    field: &'static str,
    value: i32,
}

/// The kind of operation a throttle bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ThrottleType {
    RequestNumber,
    RequestSize,
    WriteNumber,
    WriteSize,
    ReadNumber,
    ReadSize,
}

impl From<ThrottleType> for proto::ThrottleType {
    fn from(kind: ThrottleType) -> Self {
        match kind {
            ThrottleType::RequestNumber => Self::RequestNumber,
            ThrottleType::RequestSize => Self::RequestSize,
            ThrottleType::WriteNumber => Self::WriteNumber,
            ThrottleType::WriteSize => Self::WriteSize,
            ThrottleType::ReadNumber => Self::ReadNumber,
            ThrottleType::ReadSize => Self::ReadSize,
        }
    }
}

impl From<proto::ThrottleType> for ThrottleType {
    fn from(kind: proto::ThrottleType) -> Self {
        match kind {
            proto::ThrottleType::RequestNumber => Self::RequestNumber,
            proto::ThrottleType::RequestSize => Self::RequestSize,
            proto::ThrottleType::WriteNumber => Self::WriteNumber,
            proto::ThrottleType::WriteSize => Self::WriteSize,
            proto::ThrottleType::ReadNumber => Self::ReadNumber,
            proto::ThrottleType::ReadSize => Self::ReadSize,
        }
    }
}

impl Display for ThrottleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RequestNumber => "REQUEST_NUMBER",
            Self::RequestSize => "REQUEST_SIZE",
            Self::WriteNumber => "WRITE_NUMBER",
            Self::WriteSize => "WRITE_SIZE",
            Self::ReadNumber => "READ_NUMBER",
            Self::ReadSize => "READ_SIZE",
        };
        f.write_str(name)
    }
}

/// The time window over which a timed quota is accounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl From<TimeUnit> for proto::TimeUnit {
    fn from(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Nanoseconds => Self::Nanoseconds,
            TimeUnit::Microseconds => Self::Microseconds,
            TimeUnit::Milliseconds => Self::Milliseconds,
            TimeUnit::Seconds => Self::Seconds,
            TimeUnit::Minutes => Self::Minutes,
            TimeUnit::Hours => Self::Hours,
            TimeUnit::Days => Self::Days,
        }
    }
}

impl From<proto::TimeUnit> for TimeUnit {
    fn from(unit: proto::TimeUnit) -> Self {
        match unit {
            proto::TimeUnit::Nanoseconds => Self::Nanoseconds,
            proto::TimeUnit::Microseconds => Self::Microseconds,
            proto::TimeUnit::Milliseconds => Self::Milliseconds,
            proto::TimeUnit::Seconds => Self::Seconds,
            proto::TimeUnit::Minutes => Self::Minutes,
            proto::TimeUnit::Hours => Self::Hours,
            proto::TimeUnit::Days => Self::Days,
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Nanoseconds => "NANOSECONDS",
            Self::Microseconds => "MICROSECONDS",
            Self::Milliseconds => "MILLISECONDS",
            Self::Seconds => "SECONDS",
            Self::Minutes => "MINUTES",
            Self::Hours => "HOURS",
            Self::Days => "DAYS",
        };
        f.write_str(name)
    }
}

/// The enforcement action the master takes when a space quota is violated.
///
/// Enforcement itself happens on the master; this layer only records the
/// chosen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceViolationPolicy {
    /// Disable the table entirely.
    Disable,
    /// Reject user writes and compactions.
    NoWritesCompactions,
    /// Reject user writes.
    NoWrites,
    /// Reject only inserts.
    NoInserts,
}

impl From<SpaceViolationPolicy> for proto::SpaceViolationPolicy {
    fn from(policy: SpaceViolationPolicy) -> Self {
        match policy {
            SpaceViolationPolicy::Disable => Self::Disable,
            SpaceViolationPolicy::NoWritesCompactions => Self::NoWritesCompactions,
            SpaceViolationPolicy::NoWrites => Self::NoWrites,
            SpaceViolationPolicy::NoInserts => Self::NoInserts,
        }
    }
}

impl From<proto::SpaceViolationPolicy> for SpaceViolationPolicy {
    fn from(policy: proto::SpaceViolationPolicy) -> Self {
        match policy {
            proto::SpaceViolationPolicy::Disable => Self::Disable,
            proto::SpaceViolationPolicy::NoWritesCompactions => Self::NoWritesCompactions,
            proto::SpaceViolationPolicy::NoWrites => Self::NoWrites,
            proto::SpaceViolationPolicy::NoInserts => Self::NoInserts,
        }
    }
}

impl Display for SpaceViolationPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Disable => "DISABLE",
            Self::NoWritesCompactions => "NO_WRITES_COMPACTIONS",
            Self::NoWrites => "NO_WRITES",
            Self::NoInserts => "NO_INSERTS",
        };
        f.write_str(name)
    }
}

/// A rate threshold: at most `soft_limit` operations or bytes per
/// `time_unit`.
///
/// The wire form also carries an accounting scope (per machine or per
/// cluster); this layer always writes machine-level accounting, so the
/// field is a constant rather than part of the domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimedQuota {
    /// The allowed number of requests or bytes per `time_unit`.
    ///
    /// The magnitude is not validated here; interpretation belongs to the
    /// enforcement layer.
    pub soft_limit: u64,
    /// The accounting window.
    pub time_unit: TimeUnit,
}

impl TimedQuota {
    /// Create a new timed quota.
    pub fn new(soft_limit: u64, time_unit: TimeUnit) -> Self {
        Self {
            soft_limit,
            time_unit,
        }
    }
}

impl From<TimedQuota> for proto::TimedQuota {
    fn from(quota: TimedQuota) -> Self {
        Self {
            time_unit: proto::TimeUnit::from(quota.time_unit).into(),
            soft_limit: quota.soft_limit,
            // Accounting is always machine level in this layer.
            scope: proto::QuotaScope::Machine.into(),
        }
    }
}

impl TryFrom<proto::TimedQuota> for TimedQuota {
    type Error = ProtoFieldError;

    fn try_from(quota: proto::TimedQuota) -> Result<Self, Self::Error> {
        let unit = proto::TimeUnit::try_from(quota.time_unit).map_err(|_| ProtoFieldError {
            field: "time_unit",
            value: quota.time_unit,
        })?;
        Ok(Self {
            soft_limit: quota.soft_limit,
            time_unit: unit.into(),
        })
    }
}

/// A rate-throttle policy for a [`Scope`].
///
/// `kind` and `quota` both absent encodes the intent to remove any
/// throttle installed for the scope. Supplying one without the other is
/// representable on the wire and accepted here; what the master enforces
/// in that case is its own business, so the combination is passed through
/// rather than rejected or repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleSettings {
    /// Who the throttle applies to.
    pub scope: Scope,
    /// What kind of operation is throttled.
    pub kind: Option<ThrottleType>,
    /// The rate threshold.
    pub quota: Option<TimedQuota>,
}

impl ThrottleSettings {
    /// `true` if this value encodes the removal of a throttle rather than
    /// the installation of one.
    pub fn is_remove(&self) -> bool {
        self.kind.is_none() && self.quota.is_none()
    }
}

impl Display for ThrottleSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TYPE => THROTTLE")?;
        if let Some(kind) = self.kind {
            write!(f, ", THROTTLE_TYPE => {kind}")?;
        }
        if let Some(quota) = self.quota {
            write!(f, ", LIMIT => {}/{}", quota.soft_limit, quota.time_unit)?;
        }
        Ok(())
    }
}

/// A per-user exemption from cluster-global quotas.
///
/// Only the user part of the scope is meaningful; the builder accepts a
/// user alone. Decoding keeps whatever scope the record was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalBypassSettings {
    /// The user being exempted.
    pub scope: Scope,
    /// Whether the exemption is active.
    pub bypass: bool,
}

impl Display for GlobalBypassSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GLOBAL_BYPASS => {}", self.bypass)
    }
}

/// A storage-size cap on a table or a namespace.
///
/// Unlike throttles, a space limit always names exactly one table or one
/// namespace; a user-scoped or cluster-wide space limit is meaningless.
/// The target is therefore a [`ScopeTarget`] rather than a full [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceLimitSettings {
    /// The table or namespace being capped.
    pub target: ScopeTarget,
    /// The size limit, in bytes. Stored verbatim, no range check.
    pub soft_limit: u64,
    /// What the master does once the limit is exceeded.
    pub violation_policy: SpaceViolationPolicy,
}

impl SpaceLimitSettings {
    /// Cap the space used by a single table.
    pub fn table(
        table: impl Into<TableName>,
        soft_limit: u64,
        violation_policy: SpaceViolationPolicy,
    ) -> Self {
        Self {
            target: ScopeTarget::Table(table.into()),
            soft_limit,
            violation_policy,
        }
    }

    /// Cap the space used by all tables in a namespace.
    pub fn namespace(
        namespace: impl Into<String>,
        soft_limit: u64,
        violation_policy: SpaceViolationPolicy,
    ) -> Self {
        Self {
            target: ScopeTarget::Namespace(namespace.into()),
            soft_limit,
            violation_policy,
        }
    }

    /// Build a space limit from raw optional parts, enforcing the strict
    /// rule that exactly one of table and namespace is supplied.
    pub fn from_parts(
        table: Option<TableName>,
        namespace: Option<String>,
        soft_limit: u64,
        violation_policy: SpaceViolationPolicy,
    ) -> Result<Self, InvalidScopeError> {
        let target = match (table, namespace) {
            (Some(table), None) => ScopeTarget::Table(table),
            (None, Some(namespace)) => ScopeTarget::Namespace(namespace),
            _ => return Err(InvalidScopeError::SpaceLimitTarget),
        };
        Ok(Self {
            target,
            soft_limit,
            violation_policy,
        })
    }

    pub(crate) fn from_space_quota(
        target: ScopeTarget,
        space: proto::SpaceQuota,
    ) -> Result<Self, ProtoFieldError> {
        let violation_policy = proto::SpaceViolationPolicy::try_from(space.violation_policy)
            .map_err(|_| ProtoFieldError {
                field: "violation_policy",
                value: space.violation_policy,
            })?;
        Ok(Self {
            target,
            soft_limit: space.soft_limit,
            violation_policy: violation_policy.into(),
        })
    }
}

impl Display for SpaceLimitSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TYPE => SPACE, {}, LIMIT => {}, VIOLATION_POLICY => {}",
            self.target, self.soft_limit, self.violation_policy
        )
    }
}

/// A single quota policy, fully formed at construction and immutable.
///
/// Every value is produced either by one of the factory constructors or
/// by [`decode::from_quotas`](crate::decode::from_quotas), and is handed
/// to the RPC layer via
/// [`into_set_quota_request`](Self::into_set_quota_request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaSettings {
    /// A rate throttle.
    Throttle(ThrottleSettings),
    /// A per-user global-quota bypass.
    GlobalBypass(GlobalBypassSettings),
    /// A table or namespace space cap.
    SpaceLimit(SpaceLimitSettings),
}

impl Display for QuotaSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Throttle(settings) => settings.fmt(f),
            Self::GlobalBypass(settings) => settings.fmt(f),
            Self::SpaceLimit(settings) => settings.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn throttle_type_round_trips_through_proto() {
        let kinds = [
            ThrottleType::RequestNumber,
            ThrottleType::RequestSize,
            ThrottleType::WriteNumber,
            ThrottleType::WriteSize,
            ThrottleType::ReadNumber,
            ThrottleType::ReadSize,
        ];

        for kind in kinds {
            let wire = proto::ThrottleType::from(kind);
            assert_eq!(ThrottleType::from(wire), kind);
        }

        // Adding a new throttle type? Add it to the test cases too and
        // then add it to this match (that forces a compile-time error and
        // makes you read this message).
        match kinds[0] {
            ThrottleType::RequestNumber => {}
            ThrottleType::RequestSize => {}
            ThrottleType::WriteNumber => {}
            ThrottleType::WriteSize => {}
            ThrottleType::ReadNumber => {}
            ThrottleType::ReadSize => {}
        }
    }

    #[test]
    fn timed_quota_encodes_machine_accounting() {
        let quota = TimedQuota::new(100, TimeUnit::Seconds);
        let wire = proto::TimedQuota::from(quota);

        assert_eq!(wire.soft_limit, 100);
        assert_eq!(wire.time_unit, proto::TimeUnit::Seconds as i32);
        assert_eq!(wire.scope, proto::QuotaScope::Machine as i32);

        assert_eq!(TimedQuota::try_from(wire).unwrap(), quota);
    }

    #[test]
    fn timed_quota_rejects_unknown_time_unit() {
        let wire = proto::TimedQuota {
            time_unit: 99,
            soft_limit: 1,
            scope: proto::QuotaScope::Machine as i32,
        };

        let err = TimedQuota::try_from(wire).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognised time_unit value 99 in quota record"
        );
    }

    #[test]
    fn space_limit_from_parts_requires_exactly_one_target() {
        assert_matches!(
            SpaceLimitSettings::from_parts(None, None, 1024, SpaceViolationPolicy::NoWrites),
            Err(InvalidScopeError::SpaceLimitTarget)
        );
        assert_matches!(
            SpaceLimitSettings::from_parts(
                Some("t1".into()),
                Some("ns1".into()),
                1024,
                SpaceViolationPolicy::NoWrites
            ),
            Err(InvalidScopeError::SpaceLimitTarget)
        );

        assert_eq!(
            SpaceLimitSettings::from_parts(
                Some("t1".into()),
                None,
                1024,
                SpaceViolationPolicy::NoWrites
            )
            .unwrap(),
            SpaceLimitSettings::table("t1", 1024, SpaceViolationPolicy::NoWrites)
        );
        assert_eq!(
            SpaceLimitSettings::from_parts(
                None,
                Some("ns1".into()),
                1024,
                SpaceViolationPolicy::NoWrites
            )
            .unwrap(),
            SpaceLimitSettings::namespace("ns1", 1024, SpaceViolationPolicy::NoWrites)
        );
    }

    #[test]
    fn display_forms() {
        let throttle = ThrottleSettings {
            scope: Scope::for_user("alice"),
            kind: Some(ThrottleType::RequestNumber),
            quota: Some(TimedQuota::new(100, TimeUnit::Seconds)),
        };
        assert_eq!(
            throttle.to_string(),
            "TYPE => THROTTLE, THROTTLE_TYPE => REQUEST_NUMBER, LIMIT => 100/SECONDS"
        );

        let remove = ThrottleSettings {
            scope: Scope::for_user("alice"),
            kind: None,
            quota: None,
        };
        assert!(remove.is_remove());
        assert_eq!(remove.to_string(), "TYPE => THROTTLE");

        assert_eq!(
            GlobalBypassSettings {
                scope: Scope::for_user("alice"),
                bypass: true,
            }
            .to_string(),
            "GLOBAL_BYPASS => true"
        );

        assert_eq!(
            SpaceLimitSettings::namespace("ns1", 2048, SpaceViolationPolicy::NoInserts).to_string(),
            "TYPE => SPACE, NAMESPACE => ns1, LIMIT => 2048, VIOLATION_POLICY => NO_INSERTS"
        );
    }
}
