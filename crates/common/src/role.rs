//! 角色实体
//!
//! 一个角色只属于一个社区；用户在同一社区可以持有多个角色，
//! 其在该社区的有效权限是所持角色授权集合的并集。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CommunityId, CommunityPermission, RoleId};

/// 社区角色
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub community_id: CommunityId,
    pub name: String,
    pub permissions: HashSet<CommunityPermission>,
}

impl Role {
    pub fn new(
        community_id: CommunityId,
        name: impl Into<String>,
        permissions: impl IntoIterator<Item = CommunityPermission>,
    ) -> Self {
        Self {
            id: RoleId::new(),
            community_id,
            name: name.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// 该角色是否授予指定社区权限
    pub fn grants(&self, permission: CommunityPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_grants_contained_permission() {
        let role = Role::new(
            CommunityId::new(),
            "moderator",
            [
                CommunityPermission::CanEditSpecies,
                CommunityPermission::CanModerateComments,
            ],
        );

        assert!(role.grants(CommunityPermission::CanEditSpecies));
        assert!(!role.grants(CommunityPermission::CanEditCharacter));
    }

    #[test]
    fn test_role_with_empty_grant_set() {
        let role = Role::new(CommunityId::new(), "member", []);
        assert!(!role.grants(CommunityPermission::CanCreateCharacter));
    }
}
