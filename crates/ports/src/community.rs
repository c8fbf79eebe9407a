//! 社区推导查询接口
//!
//! 每个方法对应一次单跳查询；社区解析器按固定路由表把它们串接成链。
//! 实体不存在时返回 `Ok(None)`，不是错误。

use async_trait::async_trait;
use chardb_common::{
    CharacterId, CommunityId, EnumValueId, EnumValueSettingId, SpeciesId, SpeciesVariantId,
    TraitId,
};
use chardb_errors::AppResult;

/// 社区链路单跳查询
#[async_trait]
pub trait CommunityQueries: Send + Sync {
    /// 社区是否存在
    async fn community_exists(&self, id: &CommunityId) -> AppResult<bool>;

    /// 物种 → 所属社区
    async fn species_community(&self, id: &SpeciesId) -> AppResult<Option<CommunityId>>;

    /// 特征 → 所属物种
    async fn trait_species(&self, id: &TraitId) -> AppResult<Option<SpeciesId>>;

    /// 枚举值 → 所属特征
    async fn enum_value_trait(&self, id: &EnumValueId) -> AppResult<Option<TraitId>>;

    /// 物种变体 → 所属物种
    async fn variant_species(&self, id: &SpeciesVariantId) -> AppResult<Option<SpeciesId>>;

    /// 枚举值设置 → 所属物种变体
    async fn enum_value_setting_variant(
        &self,
        id: &EnumValueSettingId,
    ) -> AppResult<Option<SpeciesVariantId>>;

    /// 角色卡 → 所属社区
    async fn character_community(&self, id: &CharacterId) -> AppResult<Option<CommunityId>>;
}
