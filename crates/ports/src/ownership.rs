//! 所有权查询接口
//!
//! 每种实体一个固定的所有者字段。实体不存在时返回 `Ok(None)`。

use async_trait::async_trait;
use chardb_common::{
    CharacterId, CommentId, GalleryId, ImageId, InvitationId, MediaId, UserId,
};
use chardb_errors::AppResult;
use serde::{Deserialize, Serialize};

/// 邀请的双方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationParties {
    pub inviter_id: UserId,
    pub invitee_id: UserId,
}

/// 实体所有者字段查询
#[async_trait]
pub trait OwnershipQueries: Send + Sync {
    /// character.owner_id
    async fn character_owner(&self, id: &CharacterId) -> AppResult<Option<UserId>>;

    /// media.owner_id
    async fn media_owner(&self, id: &MediaId) -> AppResult<Option<UserId>>;

    /// gallery.owner_id
    async fn gallery_owner(&self, id: &GalleryId) -> AppResult<Option<UserId>>;

    /// image.uploader_id
    async fn image_uploader(&self, id: &ImageId) -> AppResult<Option<UserId>>;

    /// comment.author_id
    async fn comment_author(&self, id: &CommentId) -> AppResult<Option<UserId>>;

    /// invitation.(inviter_id, invitee_id)
    async fn invitation_parties(&self, id: &InvitationId) -> AppResult<Option<InvitationParties>>;
}
