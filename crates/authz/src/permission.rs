//! 权限评估服务
//!
//! 全局权限直接读主体标志位；社区权限对主体在目标社区持有的
//! 全部角色做 OR（任一角色授予即通过，零角色即不通过）。

use std::sync::Arc;

use chardb_common::{CommunityId, CommunityPermission, GlobalPermission, Principal, UserId};
use chardb_errors::AppResult;
use chardb_ports::MembershipQueries;

/// 权限评估服务
#[derive(Clone)]
pub struct PermissionService {
    memberships: Arc<dyn MembershipQueries>,
}

impl PermissionService {
    pub fn new(memberships: Arc<dyn MembershipQueries>) -> Self {
        Self { memberships }
    }

    /// 主体是否持有全局权限
    pub fn has_global_permission(
        &self,
        principal: &Principal,
        permission: GlobalPermission,
    ) -> bool {
        match permission {
            GlobalPermission::IsAdmin => principal.is_authenticated && principal.is_admin,
        }
    }

    /// 主体在社区内是否持有权限（对所持角色 OR）
    pub async fn has_community_permission(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
        permission: CommunityPermission,
    ) -> AppResult<bool> {
        let roles = self
            .memberships
            .roles_in_community(user_id, community_id)
            .await?;
        Ok(roles.iter().any(|role| role.grants(permission)))
    }
}
