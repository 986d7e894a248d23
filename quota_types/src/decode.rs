//! Decoding of stored composite quota records into [`QuotaSettings`]
//! values.
//!
//! A stored record bundles up to three sections (throttle, global bypass,
//! space) for one subject; decoding flattens it into one settings value
//! per active policy, in a fixed order: throttle entries first (in wire
//! field order), then the bypass, then the space limit.

use observability_deps::tracing::trace;
use quota_wire::v1 as proto;
use snafu::Snafu;

use crate::{
    GlobalBypassSettings, InvalidScopeError, ProtoFieldError, QuotaSettings, Scope, TableName,
    ThrottleSettings, ThrottleType, TimedQuota,
};

/// Error decoding a stored quota record.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[allow(missing_docs)]
pub enum Error {
    #[snafu(context(false))]
    InvalidScope { source: InvalidScopeError },

    #[snafu(context(false))]
    ProtoField { source: ProtoFieldError },
}

/// Result type for decode operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Decode the composite record stored for `scope` into the policies it
/// encodes.
///
/// An empty record yields an empty vector; that is not an error. The only
/// failure modes are a space section stored under a scope that names no
/// table or namespace, and unrecognised enumeration values in the record.
pub fn from_quotas(scope: &Scope, quotas: proto::Quotas) -> Result<Vec<QuotaSettings>> {
    let mut settings = Vec::new();

    if let Some(throttle) = quotas.throttle {
        decode_throttle(scope, throttle, &mut settings)?;
    }

    // The bypass is an explicit opt-in: absent and stored-false both mean
    // no policy.
    if quotas.bypass_globals == Some(true) {
        settings.push(QuotaSettings::GlobalBypass(GlobalBypassSettings {
            scope: scope.clone(),
            bypass: true,
        }));
    }

    if let Some(space) = quotas.space {
        settings.push(decode_space(scope, space)?);
    }

    trace!(policies = settings.len(), %scope, "decoded quota record");
    Ok(settings)
}

/// Decode the record stored for a user.
pub fn from_user_quotas(
    user: impl Into<String>,
    quotas: proto::Quotas,
) -> Result<Vec<QuotaSettings>> {
    from_quotas(&Scope::for_user(user), quotas)
}

/// Decode the record stored for a user on a table.
pub fn from_user_table_quotas(
    user: impl Into<String>,
    table: impl Into<TableName>,
    quotas: proto::Quotas,
) -> Result<Vec<QuotaSettings>> {
    from_quotas(&Scope::for_user_on_table(user, table), quotas)
}

/// Decode the record stored for a user on a namespace.
pub fn from_user_namespace_quotas(
    user: impl Into<String>,
    namespace: impl Into<String>,
    quotas: proto::Quotas,
) -> Result<Vec<QuotaSettings>> {
    from_quotas(&Scope::for_user_on_namespace(user, namespace), quotas)
}

/// Decode the record stored for a table.
pub fn from_table_quotas(
    table: impl Into<TableName>,
    quotas: proto::Quotas,
) -> Result<Vec<QuotaSettings>> {
    from_quotas(&Scope::for_table(table), quotas)
}

/// Decode the record stored for a namespace.
pub fn from_namespace_quotas(
    namespace: impl Into<String>,
    quotas: proto::Quotas,
) -> Result<Vec<QuotaSettings>> {
    from_quotas(&Scope::for_namespace(namespace), quotas)
}

fn decode_throttle(
    scope: &Scope,
    throttle: proto::Throttle,
    out: &mut Vec<QuotaSettings>,
) -> Result<()> {
    // One settings value per populated field, in wire field order.
    let fields = [
        (ThrottleType::RequestNumber, throttle.req_num),
        (ThrottleType::RequestSize, throttle.req_size),
        (ThrottleType::WriteNumber, throttle.write_num),
        (ThrottleType::WriteSize, throttle.write_size),
        (ThrottleType::ReadNumber, throttle.read_num),
        (ThrottleType::ReadSize, throttle.read_size),
    ];

    for (kind, quota) in fields {
        if let Some(quota) = quota {
            out.push(QuotaSettings::Throttle(ThrottleSettings {
                scope: scope.clone(),
                kind: Some(kind),
                quota: Some(TimedQuota::try_from(quota)?),
            }));
        }
    }
    Ok(())
}

fn decode_space(scope: &Scope, space: proto::SpaceQuota) -> Result<QuotaSettings> {
    let Some(target) = scope.target().cloned() else {
        return Err(InvalidScopeError::SpaceLimitTarget.into());
    };
    let settings = crate::SpaceLimitSettings::from_space_quota(target, space)?;
    Ok(QuotaSettings::SpaceLimit(settings))
}
