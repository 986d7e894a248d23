//! Population of the set-quota mutation request from a settings value.

use quota_wire::v1 as proto;

use crate::{QuotaSettings, Scope, ScopeTarget};

impl QuotaSettings {
    /// Build the mutation request that installs (or removes) this policy.
    ///
    /// Only the fields relevant to the variant are populated; dispatching
    /// the request to the master is the RPC layer's job.
    pub fn into_set_quota_request(self) -> proto::SetQuotaRequest {
        let mut request = proto::SetQuotaRequest::default();

        match self {
            Self::Throttle(throttle) => {
                apply_scope(&mut request, &throttle.scope);
                request.throttle = Some(proto::ThrottleRequest {
                    r#type: throttle
                        .kind
                        .map(|kind| proto::ThrottleType::from(kind).into()),
                    timed_quota: throttle.quota.map(Into::into),
                });
            }
            Self::GlobalBypass(bypass) => {
                apply_scope(&mut request, &bypass.scope);
                request.bypass_globals = Some(bypass.bypass);
            }
            Self::SpaceLimit(space) => {
                match &space.target {
                    ScopeTarget::Table(table) => {
                        request.table_name = Some(table.as_str().to_owned());
                    }
                    ScopeTarget::Namespace(namespace) => {
                        request.namespace = Some(namespace.clone());
                    }
                }
                request.space_limit = Some(proto::SpaceLimitRequest {
                    quota: Some(proto::SpaceQuota {
                        soft_limit: space.soft_limit,
                        violation_policy: proto::SpaceViolationPolicy::from(space.violation_policy)
                            .into(),
                    }),
                });
            }
        }

        request
    }
}

fn apply_scope(request: &mut proto::SetQuotaRequest, scope: &Scope) {
    request.user_name = scope.user().map(str::to_owned);
    match scope.target() {
        Some(ScopeTarget::Table(table)) => request.table_name = Some(table.as_str().to_owned()),
        Some(ScopeTarget::Namespace(namespace)) => request.namespace = Some(namespace.clone()),
        None => {}
    }
}
