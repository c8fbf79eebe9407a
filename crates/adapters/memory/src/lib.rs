//! chardb-adapter-memory - 内存查询适配器
//!
//! 用 HashMap 实现全部查询端口，供引擎测试与原型嵌入使用。
//! 写入方法只在装配测试数据时调用；引擎侧只读。

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chardb_common::{
    CharacterId, CommentId, CommunityId, EnumValueId, EnumValueSettingId, GalleryId, ImageId,
    InvitationId, MediaId, Role, RoleId, SpeciesId, SpeciesVariantId, TraitId, UserId,
};
use chardb_errors::{AppError, AppResult};
use chardb_ports::{
    CommunityQueries, InvitationParties, MembershipQueries, OwnershipQueries,
};

#[derive(Debug, Clone, Copy)]
struct CharacterRecord {
    owner_id: UserId,
    community_id: CommunityId,
}

#[derive(Default)]
struct StoreData {
    communities: HashSet<CommunityId>,
    species: HashMap<SpeciesId, CommunityId>,
    traits: HashMap<TraitId, SpeciesId>,
    enum_values: HashMap<EnumValueId, TraitId>,
    variants: HashMap<SpeciesVariantId, SpeciesId>,
    enum_value_settings: HashMap<EnumValueSettingId, SpeciesVariantId>,
    characters: HashMap<CharacterId, CharacterRecord>,
    media: HashMap<MediaId, UserId>,
    galleries: HashMap<GalleryId, UserId>,
    images: HashMap<ImageId, UserId>,
    comments: HashMap<CommentId, UserId>,
    invitations: HashMap<InvitationId, InvitationParties>,
    roles: HashMap<RoleId, Role>,
    memberships: HashMap<UserId, Vec<RoleId>>,
}

/// 内存存储
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> AppResult<T> {
        let data = self
            .data
            .read()
            .map_err(|_| AppError::internal("memory store lock poisoned"))?;
        Ok(f(&data))
    }

    fn write(&self, f: impl FnOnce(&mut StoreData)) {
        if let Ok(mut data) = self.data.write() {
            f(&mut data);
        }
    }

    pub fn insert_community(&self, id: CommunityId) {
        self.write(|d| {
            d.communities.insert(id);
        });
    }

    pub fn insert_species(&self, id: SpeciesId, community_id: CommunityId) {
        self.write(|d| {
            d.species.insert(id, community_id);
        });
    }

    pub fn insert_trait(&self, id: TraitId, species_id: SpeciesId) {
        self.write(|d| {
            d.traits.insert(id, species_id);
        });
    }

    pub fn insert_enum_value(&self, id: EnumValueId, trait_id: TraitId) {
        self.write(|d| {
            d.enum_values.insert(id, trait_id);
        });
    }

    pub fn insert_variant(&self, id: SpeciesVariantId, species_id: SpeciesId) {
        self.write(|d| {
            d.variants.insert(id, species_id);
        });
    }

    pub fn insert_enum_value_setting(&self, id: EnumValueSettingId, variant_id: SpeciesVariantId) {
        self.write(|d| {
            d.enum_value_settings.insert(id, variant_id);
        });
    }

    pub fn insert_character(&self, id: CharacterId, owner_id: UserId, community_id: CommunityId) {
        self.write(|d| {
            d.characters.insert(
                id,
                CharacterRecord {
                    owner_id,
                    community_id,
                },
            );
        });
    }

    pub fn insert_media(&self, id: MediaId, owner_id: UserId) {
        self.write(|d| {
            d.media.insert(id, owner_id);
        });
    }

    pub fn insert_gallery(&self, id: GalleryId, owner_id: UserId) {
        self.write(|d| {
            d.galleries.insert(id, owner_id);
        });
    }

    pub fn insert_image(&self, id: ImageId, uploader_id: UserId) {
        self.write(|d| {
            d.images.insert(id, uploader_id);
        });
    }

    pub fn insert_comment(&self, id: CommentId, author_id: UserId) {
        self.write(|d| {
            d.comments.insert(id, author_id);
        });
    }

    pub fn insert_invitation(&self, id: InvitationId, inviter_id: UserId, invitee_id: UserId) {
        self.write(|d| {
            d.invitations.insert(
                id,
                InvitationParties {
                    inviter_id,
                    invitee_id,
                },
            );
        });
    }

    pub fn insert_role(&self, role: Role) {
        self.write(|d| {
            d.roles.insert(role.id, role);
        });
    }

    pub fn assign_role(&self, user_id: UserId, role_id: RoleId) {
        self.write(|d| {
            d.memberships.entry(user_id).or_default().push(role_id);
        });
    }
}

#[async_trait]
impl CommunityQueries for MemoryStore {
    async fn community_exists(&self, id: &CommunityId) -> AppResult<bool> {
        self.read(|d| d.communities.contains(id))
    }

    async fn species_community(&self, id: &SpeciesId) -> AppResult<Option<CommunityId>> {
        self.read(|d| d.species.get(id).copied())
    }

    async fn trait_species(&self, id: &TraitId) -> AppResult<Option<SpeciesId>> {
        self.read(|d| d.traits.get(id).copied())
    }

    async fn enum_value_trait(&self, id: &EnumValueId) -> AppResult<Option<TraitId>> {
        self.read(|d| d.enum_values.get(id).copied())
    }

    async fn variant_species(&self, id: &SpeciesVariantId) -> AppResult<Option<SpeciesId>> {
        self.read(|d| d.variants.get(id).copied())
    }

    async fn enum_value_setting_variant(
        &self,
        id: &EnumValueSettingId,
    ) -> AppResult<Option<SpeciesVariantId>> {
        self.read(|d| d.enum_value_settings.get(id).copied())
    }

    async fn character_community(&self, id: &CharacterId) -> AppResult<Option<CommunityId>> {
        self.read(|d| d.characters.get(id).map(|c| c.community_id))
    }
}

#[async_trait]
impl OwnershipQueries for MemoryStore {
    async fn character_owner(&self, id: &CharacterId) -> AppResult<Option<UserId>> {
        self.read(|d| d.characters.get(id).map(|c| c.owner_id))
    }

    async fn media_owner(&self, id: &MediaId) -> AppResult<Option<UserId>> {
        self.read(|d| d.media.get(id).copied())
    }

    async fn gallery_owner(&self, id: &GalleryId) -> AppResult<Option<UserId>> {
        self.read(|d| d.galleries.get(id).copied())
    }

    async fn image_uploader(&self, id: &ImageId) -> AppResult<Option<UserId>> {
        self.read(|d| d.images.get(id).copied())
    }

    async fn comment_author(&self, id: &CommentId) -> AppResult<Option<UserId>> {
        self.read(|d| d.comments.get(id).copied())
    }

    async fn invitation_parties(&self, id: &InvitationId) -> AppResult<Option<InvitationParties>> {
        self.read(|d| d.invitations.get(id).cloned())
    }
}

#[async_trait]
impl MembershipQueries for MemoryStore {
    async fn roles_in_community(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
    ) -> AppResult<Vec<Role>> {
        self.read(|d| {
            d.memberships
                .get(user_id)
                .map(|role_ids| {
                    role_ids
                        .iter()
                        .filter_map(|id| d.roles.get(id))
                        .filter(|role| role.community_id == *community_id)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use chardb_common::CommunityPermission;

    use super::*;

    #[tokio::test]
    async fn test_community_chain_lookups() {
        let store = MemoryStore::new();
        let community = CommunityId::new();
        let species = SpeciesId::new();
        store.insert_community(community);
        store.insert_species(species, community);

        assert!(store.community_exists(&community).await.unwrap());
        assert_eq!(
            store.species_community(&species).await.unwrap(),
            Some(community)
        );
        assert_eq!(
            store.species_community(&SpeciesId::new()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_roles_in_community_filters_by_community() {
        let store = MemoryStore::new();
        let user = UserId::new();
        let home = CommunityId::new();
        let elsewhere = CommunityId::new();

        let here = Role::new(home, "editor", [CommunityPermission::CanEditSpecies]);
        let there = Role::new(elsewhere, "editor", [CommunityPermission::CanEditSpecies]);
        store.insert_role(here.clone());
        store.insert_role(there.clone());
        store.assign_role(user, here.id);
        store.assign_role(user, there.id);

        let roles = store.roles_in_community(&user, &home).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].community_id, home);
    }

    #[tokio::test]
    async fn test_ownership_lookups_absent_entities() {
        let store = MemoryStore::new();
        assert_eq!(store.media_owner(&MediaId::new()).await.unwrap(), None);
        assert_eq!(
            store
                .invitation_parties(&InvitationId::new())
                .await
                .unwrap(),
            None
        );
    }
}
