//! 访问控制引擎门面
//!
//! 把三个解析/评估服务和标准守卫集合装配成传输层可用的单一入口：
//! `authorize(policy, principal, args)`。守卫集合在构造时固定，
//! 评估顺序确定，保证拒绝日志可复现。

use std::sync::Arc;

use chardb_common::Principal;
use chardb_config::AuthzConfig;
use chardb_errors::AppResult;
use chardb_ports::{CommunityQueries, MembershipQueries, OwnershipQueries};
use serde_json::Value;

use crate::combinator::GuardSet;
use crate::community::CommunityResolver;
use crate::guard::{
    AccessContext, AuthenticatedGuard, CharacterEditGuard, CommunityPermissionGuard,
    GlobalPermissionGuard, OwnershipGuard, SelfGuard, UnauthenticatedGuard,
};
use crate::ownership::OwnershipService;
use crate::permission::PermissionService;

/// 访问控制引擎
#[derive(Clone)]
pub struct AccessControl {
    guards: GuardSet,
}

impl AccessControl {
    /// 以默认配置装配引擎
    pub fn new(
        communities: Arc<dyn CommunityQueries>,
        ownership: Arc<dyn OwnershipQueries>,
        memberships: Arc<dyn MembershipQueries>,
    ) -> Self {
        Self::with_config(communities, ownership, memberships, &AuthzConfig::default())
    }

    /// 以外部配置装配引擎
    pub fn with_config(
        communities: Arc<dyn CommunityQueries>,
        ownership: Arc<dyn OwnershipQueries>,
        memberships: Arc<dyn MembershipQueries>,
        config: &AuthzConfig,
    ) -> Self {
        let resolver =
            CommunityResolver::new(communities).with_max_hops(config.max_resolution_hops);
        let ownership = OwnershipService::new(ownership);
        let permissions = PermissionService::new(memberships);

        // 标准策略集合，顺序固定
        let guards = GuardSet::new()
            .with(Arc::new(UnauthenticatedGuard))
            .with(Arc::new(AuthenticatedGuard))
            .with(Arc::new(GlobalPermissionGuard::new(permissions.clone())))
            .with(Arc::new(CommunityPermissionGuard::new(
                resolver.clone(),
                permissions.clone(),
            )))
            .with(Arc::new(OwnershipGuard::new(ownership.clone())))
            .with(Arc::new(SelfGuard))
            .with(Arc::new(CharacterEditGuard::new(
                ownership,
                resolver,
                permissions,
            )));

        Self { guards }
    }

    /// 评估一次操作的访问决策
    ///
    /// 任一守卫放行即 `Ok(())`；全部弃权/不放行时返回
    /// `Unauthenticated`（无可用主体）或 `Forbidden`（有主体）。
    pub async fn authorize(
        &self,
        policy: &crate::policy::OperationPolicy,
        principal: Option<&Principal>,
        args: &Value,
    ) -> AppResult<()> {
        let ctx = AccessContext::new(principal, policy, args);
        self.guards.evaluate(&ctx).await
    }
}
