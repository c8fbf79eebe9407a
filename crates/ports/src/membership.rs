//! 成员关系查询接口

use async_trait::async_trait;
use chardb_common::{CommunityId, Role, UserId};
use chardb_errors::AppResult;

/// 用户在社区内的角色查询
#[async_trait]
pub trait MembershipQueries: Send + Sync {
    /// 用户在指定社区持有的全部角色（无成员关系时为空集）
    async fn roles_in_community(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
    ) -> AppResult<Vec<Role>>;
}
