//! 请求主体
//!
//! 由上游认证层（token 校验）附加到请求上下文，在请求生命周期内不可变。

use serde::{Deserialize, Serialize};

use crate::UserId;

/// 请求主体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub is_authenticated: bool,
    pub is_admin: bool,
}

impl Principal {
    /// 已认证的普通用户
    pub fn authenticated(id: UserId) -> Self {
        Self {
            id,
            is_authenticated: true,
            is_admin: false,
        }
    }

    /// 已认证的平台管理员
    pub fn admin(id: UserId) -> Self {
        Self {
            id,
            is_authenticated: true,
            is_admin: true,
        }
    }
}
