//! 操作访问策略描述符
//!
//! 注册操作时附加的纯数据，由守卫集合在请求时消费，不做任何反射。
//! 描述符的每个字段对应一条可独立放行的授权路径；未声明的字段
//! 意味着对应守卫对该操作弃权。

use chardb_common::{CommunityPermission, GlobalPermission};

use crate::args::ArgPath;
use crate::community::CommunityPathSpec;
use crate::ownership::OwnedEntityKind;

/// 社区权限要求：需要的权限 + 社区推导方式
#[derive(Debug, Clone)]
pub struct CommunityRequirement {
    pub permission: CommunityPermission,
    pub community: CommunityPathSpec,
}

/// 所有权要求：哪个参数里的哪种实体算"我的"
#[derive(Debug, Clone)]
pub struct OwnershipSpec {
    pub entity: OwnedEntityKind,
    pub path: ArgPath,
}

/// 操作的访问策略
///
/// 默认值（全字段未声明）表示一个既不公开、也没有任何授权路径的
/// 操作 —— 对任何主体都会被拒绝。
#[derive(Debug, Clone, Default)]
pub struct OperationPolicy {
    /// 仅要求登录即可访问
    pub require_authenticated: bool,
    /// 显式允许未认证访问（公开操作）
    pub allow_unauthenticated: bool,
    /// 要求的全局权限
    pub required_global: Option<GlobalPermission>,
    /// 要求的社区权限及社区推导方式
    pub required_community: Option<CommunityRequirement>,
    /// 所有权要求
    pub ownership: Option<OwnershipSpec>,
    /// 自助操作的目标用户 ID 参数路径
    pub self_user: Option<ArgPath>,
    /// 角色卡编辑操作的角色卡 ID 参数路径
    pub character_edit: Option<ArgPath>,
}

impl OperationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// 公开操作（无需认证）
    pub fn public() -> Self {
        Self {
            allow_unauthenticated: true,
            ..Self::default()
        }
    }

    /// 仅要求登录的操作
    pub fn authenticated() -> Self {
        Self {
            require_authenticated: true,
            ..Self::default()
        }
    }

    pub fn with_global(mut self, permission: GlobalPermission) -> Self {
        self.required_global = Some(permission);
        self
    }

    pub fn with_community_permission(
        mut self,
        permission: CommunityPermission,
        community: CommunityPathSpec,
    ) -> Self {
        self.required_community = Some(CommunityRequirement {
            permission,
            community,
        });
        self
    }

    pub fn with_ownership(mut self, entity: OwnedEntityKind, path: impl Into<ArgPath>) -> Self {
        self.ownership = Some(OwnershipSpec {
            entity,
            path: path.into(),
        });
        self
    }

    pub fn with_self_user(mut self, path: impl Into<ArgPath>) -> Self {
        self.self_user = Some(path.into());
        self
    }

    pub fn with_character_edit(mut self, path: impl Into<ArgPath>) -> Self {
        self.character_edit = Some(path.into());
        self
    }
}
