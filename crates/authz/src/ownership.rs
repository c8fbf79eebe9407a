//! 所有权解析服务
//!
//! "主体 X 是否拥有实体 Y" 的多态解析。实体种类是穷尽枚举，
//! 每个变体在编译期绑定到对应的所有者字段查询，不存在运行时的
//! 未知类型分支。实体不存在一律视为"非所有者"，绝不报错。

use std::sync::Arc;

use chardb_common::{
    CharacterId, CommentId, GalleryId, ImageId, InvitationId, MediaId, UserId,
};
use chardb_errors::AppResult;
use chardb_ports::OwnershipQueries;
use uuid::Uuid;

/// 可判定所有权的实体种类（策略描述符中使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedEntityKind {
    Character,
    Media,
    Gallery,
    Image,
    Comment,
    /// 邀请的受邀人
    InviteeOfInvitation,
    /// 邀请的发起人或受邀人（两个字段任一匹配即算拥有）
    InviterOrInviteeOfInvitation,
}

impl OwnedEntityKind {
    /// 与参数中提取的 uuid 组合成具体实体引用
    pub fn with_id(self, id: Uuid) -> OwnedEntity {
        match self {
            Self::Character => OwnedEntity::Character(CharacterId::from_uuid(id)),
            Self::Media => OwnedEntity::Media(MediaId::from_uuid(id)),
            Self::Gallery => OwnedEntity::Gallery(GalleryId::from_uuid(id)),
            Self::Image => OwnedEntity::Image(ImageId::from_uuid(id)),
            Self::Comment => OwnedEntity::Comment(CommentId::from_uuid(id)),
            Self::InviteeOfInvitation => {
                OwnedEntity::InviteeOfInvitation(InvitationId::from_uuid(id))
            }
            Self::InviterOrInviteeOfInvitation => {
                OwnedEntity::InviterOrInviteeOfInvitation(InvitationId::from_uuid(id))
            }
        }
    }
}

/// 具体实体引用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedEntity {
    Character(CharacterId),
    Media(MediaId),
    Gallery(GalleryId),
    Image(ImageId),
    Comment(CommentId),
    InviteeOfInvitation(InvitationId),
    InviterOrInviteeOfInvitation(InvitationId),
}

/// 所有权解析服务
#[derive(Clone)]
pub struct OwnershipService {
    store: Arc<dyn OwnershipQueries>,
}

impl OwnershipService {
    pub fn new(store: Arc<dyn OwnershipQueries>) -> Self {
        Self { store }
    }

    /// 主体是否拥有该实体；实体缺失 ⇒ `Ok(false)`
    pub async fn is_owner_of(&self, user_id: &UserId, entity: &OwnedEntity) -> AppResult<bool> {
        if let OwnedEntity::InviterOrInviteeOfInvitation(id) = entity {
            // 唯一的"两字段 OR"所有权
            return Ok(self
                .store
                .invitation_parties(id)
                .await?
                .is_some_and(|p| p.inviter_id == *user_id || p.invitee_id == *user_id));
        }

        Ok(self.owner_of(entity).await?.is_some_and(|owner| owner == *user_id))
    }

    /// 实体的所有者；实体缺失 ⇒ `Ok(None)`
    ///
    /// `InviterOrInviteeOfInvitation` 以发起人为主所有者；
    /// 两字段任一匹配的判定走 [`Self::is_owner_of`]。
    pub async fn owner_of(&self, entity: &OwnedEntity) -> AppResult<Option<UserId>> {
        match entity {
            OwnedEntity::Character(id) => self.store.character_owner(id).await,
            OwnedEntity::Media(id) => self.store.media_owner(id).await,
            OwnedEntity::Gallery(id) => self.store.gallery_owner(id).await,
            OwnedEntity::Image(id) => self.store.image_uploader(id).await,
            OwnedEntity::Comment(id) => self.store.comment_author(id).await,
            OwnedEntity::InviteeOfInvitation(id) => Ok(self
                .store
                .invitation_parties(id)
                .await?
                .map(|p| p.invitee_id)),
            OwnedEntity::InviterOrInviteeOfInvitation(id) => Ok(self
                .store
                .invitation_parties(id)
                .await?
                .map(|p| p.inviter_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chardb_adapter_memory::MemoryStore;

    use super::*;

    fn service(store: Arc<MemoryStore>) -> OwnershipService {
        OwnershipService::new(store)
    }

    #[tokio::test]
    async fn test_character_ownership() {
        let store = Arc::new(MemoryStore::new());
        let owner = UserId::new();
        let other = UserId::new();
        let character = CharacterId::new();
        store.insert_character(character, owner, chardb_common::CommunityId::new());

        let service = service(store);
        let entity = OwnedEntity::Character(character);

        assert!(service.is_owner_of(&owner, &entity).await.unwrap());
        assert!(!service.is_owner_of(&other, &entity).await.unwrap());
        assert_eq!(service.owner_of(&entity).await.unwrap(), Some(owner));
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_owner_never_error() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);
        let user = UserId::new();

        let entities = [
            OwnedEntity::Character(CharacterId::new()),
            OwnedEntity::Media(MediaId::new()),
            OwnedEntity::Gallery(GalleryId::new()),
            OwnedEntity::Image(ImageId::new()),
            OwnedEntity::Comment(CommentId::new()),
            OwnedEntity::InviteeOfInvitation(InvitationId::new()),
            OwnedEntity::InviterOrInviteeOfInvitation(InvitationId::new()),
        ];

        for entity in &entities {
            assert!(!service.is_owner_of(&user, entity).await.unwrap());
            assert!(service.owner_of(entity).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_invitation_invitee_only() {
        let store = Arc::new(MemoryStore::new());
        let inviter = UserId::new();
        let invitee = UserId::new();
        let invitation = InvitationId::new();
        store.insert_invitation(invitation, inviter, invitee);

        let service = service(store);
        let entity = OwnedEntity::InviteeOfInvitation(invitation);

        assert!(service.is_owner_of(&invitee, &entity).await.unwrap());
        assert!(!service.is_owner_of(&inviter, &entity).await.unwrap());
    }

    #[tokio::test]
    async fn test_invitation_inviter_or_invitee() {
        let store = Arc::new(MemoryStore::new());
        let inviter = UserId::new();
        let invitee = UserId::new();
        let stranger = UserId::new();
        let invitation = InvitationId::new();
        store.insert_invitation(invitation, inviter, invitee);

        let service = service(store);
        let entity = OwnedEntity::InviterOrInviteeOfInvitation(invitation);

        assert!(service.is_owner_of(&inviter, &entity).await.unwrap());
        assert!(service.is_owner_of(&invitee, &entity).await.unwrap());
        assert!(!service.is_owner_of(&stranger, &entity).await.unwrap());
    }

    #[tokio::test]
    async fn test_kind_with_id_builds_matching_entity() {
        let uuid = uuid::Uuid::now_v7();
        assert_eq!(
            OwnedEntityKind::Gallery.with_id(uuid),
            OwnedEntity::Gallery(GalleryId::from_uuid(uuid))
        );
    }
}
