//! Version 1 of the quota wire schema.
//!
//! A stored quota record is a [`Quotas`] message keyed by the subject it
//! applies to (user, table or namespace); the addressing itself lives in
//! the storage key and in [`SetQuotaRequest`], not in the record.

/// The kind of operation a throttle applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ThrottleType {
    RequestNumber = 1,
    RequestSize = 2,
    WriteNumber = 3,
    WriteSize = 4,
    ReadNumber = 5,
    ReadSize = 6,
}

/// Time window over which a timed quota is accounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TimeUnit {
    Nanoseconds = 1,
    Microseconds = 2,
    Milliseconds = 3,
    Seconds = 4,
    Minutes = 5,
    Hours = 6,
    Days = 7,
}

/// Whether a timed quota is accounted per machine or across the cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum QuotaScope {
    Cluster = 1,
    Machine = 2,
}

/// Enforcement action taken when a space quota is violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SpaceViolationPolicy {
    /// Disable the table entirely.
    Disable = 1,
    /// Reject user writes and compactions.
    NoWritesCompactions = 2,
    /// Reject user writes.
    NoWrites = 3,
    /// Reject only inserts.
    NoInserts = 4,
}

/// A rate threshold: at most `soft_limit` units per `time_unit`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimedQuota {
    #[prost(enumeration = "TimeUnit", tag = "1")]
    pub time_unit: i32,
    #[prost(uint64, tag = "2")]
    pub soft_limit: u64,
    #[prost(enumeration = "QuotaScope", tag = "3")]
    pub scope: i32,
}

/// The throttle section of a stored quota record, one optional timed quota
/// per throttle type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Throttle {
    #[prost(message, optional, tag = "1")]
    pub req_num: Option<TimedQuota>,
    #[prost(message, optional, tag = "2")]
    pub req_size: Option<TimedQuota>,
    #[prost(message, optional, tag = "3")]
    pub write_num: Option<TimedQuota>,
    #[prost(message, optional, tag = "4")]
    pub write_size: Option<TimedQuota>,
    #[prost(message, optional, tag = "5")]
    pub read_num: Option<TimedQuota>,
    #[prost(message, optional, tag = "6")]
    pub read_size: Option<TimedQuota>,
}

/// A throttle directive inside a [`SetQuotaRequest`].
///
/// Both fields absent means "remove the throttle for this subject".
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ThrottleRequest {
    #[prost(enumeration = "ThrottleType", optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub timed_quota: Option<TimedQuota>,
}

/// The space section of a stored quota record.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpaceQuota {
    /// Maximum size, in bytes, the subject may consume.
    #[prost(uint64, tag = "1")]
    pub soft_limit: u64,
    #[prost(enumeration = "SpaceViolationPolicy", tag = "2")]
    pub violation_policy: i32,
}

/// A space-limit directive inside a [`SetQuotaRequest`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpaceLimitRequest {
    #[prost(message, optional, tag = "1")]
    pub quota: Option<SpaceQuota>,
}

/// A stored composite quota record: every section is optional and an empty
/// record is valid (it simply carries no policies).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Quotas {
    #[prost(bool, optional, tag = "1")]
    pub bypass_globals: Option<bool>,
    #[prost(message, optional, tag = "2")]
    pub throttle: Option<Throttle>,
    #[prost(message, optional, tag = "3")]
    pub space: Option<SpaceQuota>,
}

/// The mutation request sent to the master to install or remove a single
/// quota policy.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetQuotaRequest {
    #[prost(string, optional, tag = "1")]
    pub user_name: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub namespace: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub table_name: Option<String>,
    #[prost(bool, optional, tag = "4")]
    pub bypass_globals: Option<bool>,
    #[prost(message, optional, tag = "5")]
    pub throttle: Option<ThrottleRequest>,
    #[prost(message, optional, tag = "6")]
    pub space_limit: Option<SpaceLimitRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{Bytes, BytesMut};
    use prost::Message;

    #[test]
    fn quotas_record_round_trips_through_encoding() {
        let record = Quotas {
            bypass_globals: Some(true),
            throttle: Some(Throttle {
                req_num: Some(TimedQuota {
                    time_unit: TimeUnit::Seconds.into(),
                    soft_limit: 100,
                    scope: QuotaScope::Machine.into(),
                }),
                write_size: Some(TimedQuota {
                    time_unit: TimeUnit::Minutes.into(),
                    soft_limit: 1024,
                    scope: QuotaScope::Machine.into(),
                }),
                ..Default::default()
            }),
            space: Some(SpaceQuota {
                soft_limit: 1 << 30,
                violation_policy: SpaceViolationPolicy::NoWrites.into(),
            }),
        };

        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let decoded = Quotas::decode(Bytes::from(buf)).unwrap();

        assert_eq!(decoded, record);
    }

    #[test]
    fn empty_record_is_valid() {
        let decoded = Quotas::decode(Bytes::new()).unwrap();
        assert_eq!(decoded, Quotas::default());
        assert_eq!(decoded.bypass_globals, None);
    }

    #[test]
    fn unknown_enumeration_values_are_preserved() {
        // A record written by a newer server may carry enumeration values
        // this build does not know. Decoding must not reject them; typed
        // interpretation happens in quota_types.
        let quota = TimedQuota {
            time_unit: 42,
            soft_limit: 1,
            scope: QuotaScope::Machine.into(),
        };
        let decoded = TimedQuota::decode(quota.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.time_unit, 42);
        assert!(TimeUnit::try_from(decoded.time_unit).is_err());
    }
}
