//! Constructors for quota policies.
//!
//! These mirror the operations an administrator can express: throttle or
//! unthrottle a user, table or namespace, grant a user a global-quota
//! bypass, or cap the space used by a table or namespace. Each returns a
//! fully formed [`QuotaSettings`] value ready to be turned into a
//! mutation request.

use crate::{
    GlobalBypassSettings, QuotaSettings, Scope, SpaceLimitSettings, SpaceViolationPolicy,
    TableName, ThrottleSettings, ThrottleType, TimeUnit, TimedQuota,
};

/// Throttle an arbitrary scope.
///
/// `kind` and `time_unit` both `None` encodes the removal of the scope's
/// throttle; both `Some` installs one. Supplying only one of the two is
/// accepted and passed through unchanged: the resulting wire record is
/// representable and its enforcement meaning belongs to the master, so it
/// is deliberately not rejected here. `soft_limit` is only carried when a
/// time unit is present.
pub fn throttle(
    scope: Scope,
    kind: Option<ThrottleType>,
    soft_limit: u64,
    time_unit: Option<TimeUnit>,
) -> QuotaSettings {
    let quota = time_unit.map(|unit| TimedQuota::new(soft_limit, unit));
    QuotaSettings::Throttle(ThrottleSettings { scope, kind, quota })
}

/// Throttle everything a user does.
pub fn throttle_user(
    user: impl Into<String>,
    kind: ThrottleType,
    soft_limit: u64,
    time_unit: TimeUnit,
) -> QuotaSettings {
    throttle(
        Scope::for_user(user),
        Some(kind),
        soft_limit,
        Some(time_unit),
    )
}

/// Throttle what a user does on one table.
pub fn throttle_user_on_table(
    user: impl Into<String>,
    table: impl Into<TableName>,
    kind: ThrottleType,
    soft_limit: u64,
    time_unit: TimeUnit,
) -> QuotaSettings {
    throttle(
        Scope::for_user_on_table(user, table),
        Some(kind),
        soft_limit,
        Some(time_unit),
    )
}

/// Throttle what a user does in one namespace.
pub fn throttle_user_on_namespace(
    user: impl Into<String>,
    namespace: impl Into<String>,
    kind: ThrottleType,
    soft_limit: u64,
    time_unit: TimeUnit,
) -> QuotaSettings {
    throttle(
        Scope::for_user_on_namespace(user, namespace),
        Some(kind),
        soft_limit,
        Some(time_unit),
    )
}

/// Throttle a table for all users.
pub fn throttle_table(
    table: impl Into<TableName>,
    kind: ThrottleType,
    soft_limit: u64,
    time_unit: TimeUnit,
) -> QuotaSettings {
    throttle(
        Scope::for_table(table),
        Some(kind),
        soft_limit,
        Some(time_unit),
    )
}

/// Throttle a namespace for all users.
pub fn throttle_namespace(
    namespace: impl Into<String>,
    kind: ThrottleType,
    soft_limit: u64,
    time_unit: TimeUnit,
) -> QuotaSettings {
    throttle(
        Scope::for_namespace(namespace),
        Some(kind),
        soft_limit,
        Some(time_unit),
    )
}

/// Remove the throttle for a user.
pub fn unthrottle_user(user: impl Into<String>) -> QuotaSettings {
    throttle(Scope::for_user(user), None, 0, None)
}

/// Remove the throttle for a user on a table.
pub fn unthrottle_user_on_table(
    user: impl Into<String>,
    table: impl Into<TableName>,
) -> QuotaSettings {
    throttle(Scope::for_user_on_table(user, table), None, 0, None)
}

/// Remove the throttle for a user on a namespace.
pub fn unthrottle_user_on_namespace(
    user: impl Into<String>,
    namespace: impl Into<String>,
) -> QuotaSettings {
    throttle(Scope::for_user_on_namespace(user, namespace), None, 0, None)
}

/// Remove the throttle for a table.
pub fn unthrottle_table(table: impl Into<TableName>) -> QuotaSettings {
    throttle(Scope::for_table(table), None, 0, None)
}

/// Remove the throttle for a namespace.
pub fn unthrottle_namespace(namespace: impl Into<String>) -> QuotaSettings {
    throttle(Scope::for_namespace(namespace), None, 0, None)
}

/// Set or clear the global-quota bypass for a user.
///
/// The bypass is only ever user-scoped; there is no table or namespace
/// form.
pub fn bypass_globals(user: impl Into<String>, bypass: bool) -> QuotaSettings {
    QuotaSettings::GlobalBypass(GlobalBypassSettings {
        scope: Scope::for_user(user),
        bypass,
    })
}

/// Cap the space used by a table. `soft_limit` is in bytes and stored
/// verbatim.
pub fn limit_table_space(
    table: impl Into<TableName>,
    soft_limit: u64,
    violation_policy: SpaceViolationPolicy,
) -> QuotaSettings {
    QuotaSettings::SpaceLimit(SpaceLimitSettings::table(table, soft_limit, violation_policy))
}

/// Cap the space used by all tables in a namespace. `soft_limit` is in
/// bytes and stored verbatim.
pub fn limit_namespace_space(
    namespace: impl Into<String>,
    soft_limit: u64,
    violation_policy: SpaceViolationPolicy,
) -> QuotaSettings {
    QuotaSettings::SpaceLimit(SpaceLimitSettings::namespace(
        namespace,
        soft_limit,
        violation_policy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn throttle_builders_carry_scope_kind_and_quota() {
        let settings = throttle_user_on_table(
            "alice",
            "t1",
            ThrottleType::WriteSize,
            1024,
            TimeUnit::Minutes,
        );
        assert_eq!(
            settings,
            QuotaSettings::Throttle(ThrottleSettings {
                scope: Scope::for_user_on_table("alice", "t1"),
                kind: Some(ThrottleType::WriteSize),
                quota: Some(TimedQuota::new(1024, TimeUnit::Minutes)),
            })
        );
    }

    #[test]
    fn unthrottle_builders_carry_neither_kind_nor_quota() {
        for settings in [
            unthrottle_user("alice"),
            unthrottle_user_on_table("alice", "t1"),
            unthrottle_user_on_namespace("alice", "ns1"),
            unthrottle_table("t1"),
            unthrottle_namespace("ns1"),
        ] {
            assert_matches!(settings, QuotaSettings::Throttle(t) => {
                assert!(t.is_remove());
            });
        }
    }

    #[test]
    fn limit_magnitude_is_not_validated() {
        // Zero is stored as-is; interpretation is the master's concern.
        let settings = throttle_user("alice", ThrottleType::RequestNumber, 0, TimeUnit::Seconds);
        assert_matches!(settings, QuotaSettings::Throttle(t) => {
            assert_eq!(t.quota, Some(TimedQuota::new(0, TimeUnit::Seconds)));
        });
    }

    #[test]
    fn bypass_is_user_scoped() {
        assert_eq!(
            bypass_globals("alice", true),
            QuotaSettings::GlobalBypass(GlobalBypassSettings {
                scope: Scope::for_user("alice"),
                bypass: true,
            })
        );
    }

    #[test]
    fn space_builders_pin_exactly_one_target() {
        assert_eq!(
            limit_table_space("t1", 1 << 30, SpaceViolationPolicy::NoWrites),
            QuotaSettings::SpaceLimit(SpaceLimitSettings::table(
                "t1",
                1 << 30,
                SpaceViolationPolicy::NoWrites
            ))
        );
        assert_eq!(
            limit_namespace_space("ns1", 1 << 30, SpaceViolationPolicy::Disable),
            QuotaSettings::SpaceLimit(SpaceLimitSettings::namespace(
                "ns1",
                1 << 30,
                SpaceViolationPolicy::Disable
            ))
        );
    }
}
