//! 守卫策略
//!
//! 每个守卫是对 (主体, 策略描述符, 操作参数) 的独立谓词。
//! 硬性契约：策略描述符未声明本守卫关心的元数据时，守卫必须弃权
//! （返回 false），既不拒绝也不放行，把决定权留给 OR 组合中的其他
//! 分支。守卫内部的任何查询失败同样记为 false，绝不中断其余分支。

use async_trait::async_trait;
use chardb_common::{Principal, UserId};
use serde_json::Value;
use tracing::{debug, warn};

use crate::community::CommunityResolver;
use crate::ownership::OwnershipService;
use crate::permission::PermissionService;
use crate::policy::OperationPolicy;

/// 单次访问决策的评估上下文
#[derive(Clone, Copy)]
pub struct AccessContext<'a> {
    pub principal: Option<&'a Principal>,
    pub policy: &'a OperationPolicy,
    pub args: &'a Value,
}

impl<'a> AccessContext<'a> {
    pub fn new(
        principal: Option<&'a Principal>,
        policy: &'a OperationPolicy,
        args: &'a Value,
    ) -> Self {
        Self {
            principal,
            policy,
            args,
        }
    }

    /// 已认证主体的用户 ID（未认证或无主体时为 `None`）
    fn authenticated_user(&self) -> Option<&'a Principal> {
        self.principal.filter(|p| p.is_authenticated)
    }
}

/// 守卫：访问决策的一条独立授权路径
#[async_trait]
pub trait Guard: Send + Sync {
    /// 诊断用名称（出现在拒绝日志里）
    fn name(&self) -> &'static str;

    /// 本守卫是否放行该请求；弃权与不放行都返回 false
    async fn allows(&self, ctx: &AccessContext<'_>) -> bool;
}

/// 仅要求登录的守卫
///
/// 仅当策略声明 `require_authenticated` 时适用，否则弃权 ——
/// 一个没有任何声明要求的操作不应因为请求方登录了就放行。
pub struct AuthenticatedGuard;

#[async_trait]
impl Guard for AuthenticatedGuard {
    fn name(&self) -> &'static str {
        "authenticated"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        ctx.policy.require_authenticated && ctx.authenticated_user().is_some()
    }
}

/// 公开操作守卫：策略带 allow_unauthenticated 标志即放行，完全忽略认证状态
pub struct UnauthenticatedGuard;

#[async_trait]
impl Guard for UnauthenticatedGuard {
    fn name(&self) -> &'static str {
        "allow-unauthenticated"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        ctx.policy.allow_unauthenticated
    }
}

/// 全局权限守卫
pub struct GlobalPermissionGuard {
    permissions: PermissionService,
}

impl GlobalPermissionGuard {
    pub fn new(permissions: PermissionService) -> Self {
        Self { permissions }
    }
}

#[async_trait]
impl Guard for GlobalPermissionGuard {
    fn name(&self) -> &'static str {
        "global-permission"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        let Some(required) = ctx.policy.required_global else {
            return false;
        };
        let Some(principal) = ctx.authenticated_user() else {
            return false;
        };
        self.permissions.has_global_permission(principal, required)
    }
}

/// 社区权限守卫：先推导社区，再评估主体在该社区的角色权限
pub struct CommunityPermissionGuard {
    resolver: CommunityResolver,
    permissions: PermissionService,
}

impl CommunityPermissionGuard {
    pub fn new(resolver: CommunityResolver, permissions: PermissionService) -> Self {
        Self {
            resolver,
            permissions,
        }
    }
}

#[async_trait]
impl Guard for CommunityPermissionGuard {
    fn name(&self) -> &'static str {
        "community-permission"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        let Some(requirement) = &ctx.policy.required_community else {
            return false;
        };
        let Some(principal) = ctx.authenticated_user() else {
            return false;
        };

        let community = match self.resolver.resolve(&requirement.community, ctx.args).await {
            Ok(community) => community,
            Err(err) => {
                // 推导失败只意味着本分支不通过
                debug!(error = %err, "community resolution failed");
                return false;
            }
        };

        match self
            .permissions
            .has_community_permission(&principal.id, &community, requirement.permission)
            .await
        {
            Ok(granted) => granted,
            Err(err) => {
                warn!(error = %err, %community, "membership lookup failed");
                false
            }
        }
    }
}

/// 所有权守卫
pub struct OwnershipGuard {
    ownership: OwnershipService,
}

impl OwnershipGuard {
    pub fn new(ownership: OwnershipService) -> Self {
        Self { ownership }
    }
}

#[async_trait]
impl Guard for OwnershipGuard {
    fn name(&self) -> &'static str {
        "ownership"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        let Some(spec) = &ctx.policy.ownership else {
            return false;
        };
        let Some(principal) = ctx.authenticated_user() else {
            return false;
        };
        let Some(id) = spec.path.uuid_at(ctx.args) else {
            return false;
        };

        let entity = spec.entity.with_id(id);
        match self.ownership.is_owner_of(&principal.id, &entity).await {
            Ok(owned) => owned,
            Err(err) => {
                warn!(error = %err, "ownership lookup failed");
                false
            }
        }
    }
}

/// 自助操作守卫：目标用户 ID 参数等于主体自身
pub struct SelfGuard;

#[async_trait]
impl Guard for SelfGuard {
    fn name(&self) -> &'static str {
        "self"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        let Some(path) = &ctx.policy.self_user else {
            return false;
        };
        let Some(principal) = ctx.authenticated_user() else {
            return false;
        };
        let Some(target) = path.uuid_at(ctx.args) else {
            return false;
        };
        principal.id == UserId::from_uuid(target)
    }
}

/// 角色卡编辑复合守卫
///
/// 拥有目标角色卡，或在其所属社区持有 CanEditCharacter，任一满足即放行。
/// 对应权限集中 CanEditOwnCharacter 与 CanEditCharacter 的区分。
pub struct CharacterEditGuard {
    ownership: OwnershipService,
    resolver: CommunityResolver,
    permissions: PermissionService,
}

impl CharacterEditGuard {
    pub fn new(
        ownership: OwnershipService,
        resolver: CommunityResolver,
        permissions: PermissionService,
    ) -> Self {
        Self {
            ownership,
            resolver,
            permissions,
        }
    }
}

#[async_trait]
impl Guard for CharacterEditGuard {
    fn name(&self) -> &'static str {
        "character-edit"
    }

    async fn allows(&self, ctx: &AccessContext<'_>) -> bool {
        use chardb_common::CommunityPermission;

        use crate::community::{CommunityPathSpec, CommunitySource};
        use crate::ownership::OwnedEntityKind;

        let Some(path) = &ctx.policy.character_edit else {
            return false;
        };
        let Some(principal) = ctx.authenticated_user() else {
            return false;
        };
        let Some(id) = path.uuid_at(ctx.args) else {
            return false;
        };

        // 分支一：本人拥有该角色卡
        let entity = OwnedEntityKind::Character.with_id(id);
        match self.ownership.is_owner_of(&principal.id, &entity).await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(err) => {
                warn!(error = %err, "character ownership lookup failed");
            }
        }

        // 分支二：在角色卡所属社区持有编辑权限
        let spec = CommunityPathSpec {
            source: CommunitySource::Character,
            path: path.clone(),
        };
        let community = match self.resolver.resolve(&spec, ctx.args).await {
            Ok(community) => community,
            Err(err) => {
                debug!(error = %err, "character community resolution failed");
                return false;
            }
        };
        match self
            .permissions
            .has_community_permission(&principal.id, &community, CommunityPermission::CanEditCharacter)
            .await
        {
            Ok(granted) => granted,
            Err(err) => {
                warn!(error = %err, %community, "membership lookup failed");
                false
            }
        }
    }
}
