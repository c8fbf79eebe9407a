//! 权限定义
//!
//! 全局权限与社区权限是两个独立的枚举：全局权限与任何社区无关，
//! 社区权限只在某个社区的角色授权范围内生效。

use serde::{Deserialize, Serialize};

/// 全局权限（与社区无关）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalPermission {
    /// 平台管理员
    IsAdmin,
}

/// 社区权限（由社区内角色授予）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommunityPermission {
    /// 编辑社区基础信息
    CanEditCommunity,
    /// 管理社区角色与成员
    CanManageRoles,
    /// 管理社区邀请
    CanManageInvitations,
    /// 创建物种
    CanCreateSpecies,
    /// 编辑物种及其变体/特征/枚举值配置
    CanEditSpecies,
    /// 创建角色卡
    CanCreateCharacter,
    /// 编辑社区内任意角色卡
    CanEditCharacter,
    /// 编辑自己拥有的角色卡
    CanEditOwnCharacter,
    /// 管理媒体与画廊
    CanManageMedia,
    /// 审核评论
    CanModerateComments,
}
