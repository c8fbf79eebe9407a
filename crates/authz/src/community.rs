//! 社区解析服务
//!
//! 从操作参数中声明的 ID 出发，沿固定路由表逐跳查询，直到得出
//! 请求涉及的社区。每种入口（[`CommunitySource`]）对应一条由类型
//! 保证的跳转链，不存在运行时的未知键。
//!
//! 解析只读且幂等：相同 (spec, args) 永远得到相同结果。
//! 任一跳不可解析即失败关闭（对应守卫分支视为 false）。

use std::sync::Arc;

use chardb_common::{
    CharacterId, CommunityId, EnumValueId, EnumValueSettingId, SpeciesId, SpeciesVariantId,
    TraitId,
};
use chardb_errors::AppError;
use chardb_ports::CommunityQueries;
use serde_json::Value;
use thiserror::Error;

use crate::args::ArgPath;

/// 社区推导失败
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Argument path not found: {0}")]
    MissingArgument(String),

    #[error("Malformed id at {path}")]
    MalformedId { path: String },

    #[error("Entity not found while resolving community: {0}")]
    MissingEntity(&'static str),

    #[error("Community resolution exceeded hop budget of {limit}")]
    HopBudgetExceeded { limit: usize },

    #[error(transparent)]
    Store(#[from] AppError),
}

/// 社区推导入口：操作参数里的 ID 指向哪种实体
///
/// 每个变体对应一条固定的跳转链，终点都是社区。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunitySource {
    /// 参数即社区 ID（仍校验社区存在）
    Community,
    /// 物种 → 社区
    Species,
    /// 特征 → 物种 → 社区
    Trait,
    /// 枚举值 → 特征 → 物种 → 社区
    EnumValue,
    /// 物种变体 → 物种 → 社区
    SpeciesVariant,
    /// 枚举值设置 → 物种变体 → 物种 → 社区
    EnumValueSetting,
    /// 角色卡 → 社区
    Character,
}

/// 社区推导规格：入口类型 + 参数路径
#[derive(Debug, Clone)]
pub struct CommunityPathSpec {
    pub source: CommunitySource,
    pub path: ArgPath,
}

impl CommunityPathSpec {
    pub fn new(source: CommunitySource, path: impl Into<String>) -> Self {
        Self {
            source,
            path: ArgPath::new(path),
        }
    }
}

/// 单次解析的跳数预算
struct HopBudget {
    used: usize,
    limit: usize,
}

impl HopBudget {
    fn new(limit: usize) -> Self {
        Self { used: 0, limit }
    }

    fn spend(&mut self) -> Result<(), ResolutionError> {
        if self.used >= self.limit {
            return Err(ResolutionError::HopBudgetExceeded { limit: self.limit });
        }
        self.used += 1;
        Ok(())
    }
}

/// 社区解析服务
#[derive(Clone)]
pub struct CommunityResolver {
    store: Arc<dyn CommunityQueries>,
    max_hops: usize,
}

impl CommunityResolver {
    pub const DEFAULT_MAX_HOPS: usize = 8;

    pub fn new(store: Arc<dyn CommunityQueries>) -> Self {
        Self {
            store,
            max_hops: Self::DEFAULT_MAX_HOPS,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// 按规格从操作参数推导社区
    pub async fn resolve(
        &self,
        spec: &CommunityPathSpec,
        args: &Value,
    ) -> Result<CommunityId, ResolutionError> {
        let value = spec
            .path
            .lookup(args)
            .ok_or_else(|| ResolutionError::MissingArgument(spec.path.as_str().to_string()))?;
        let uuid = value
            .as_str()
            .and_then(|raw| uuid::Uuid::parse_str(raw).ok())
            .ok_or_else(|| ResolutionError::MalformedId {
                path: spec.path.as_str().to_string(),
            })?;

        let mut budget = HopBudget::new(self.max_hops);
        match spec.source {
            CommunitySource::Community => {
                let id = CommunityId::from_uuid(uuid);
                budget.spend()?;
                if self.store.community_exists(&id).await? {
                    Ok(id)
                } else {
                    Err(ResolutionError::MissingEntity("community"))
                }
            }
            CommunitySource::Species => {
                self.from_species(SpeciesId::from_uuid(uuid), &mut budget)
                    .await
            }
            CommunitySource::Trait => {
                self.from_trait(TraitId::from_uuid(uuid), &mut budget).await
            }
            CommunitySource::EnumValue => {
                self.from_enum_value(EnumValueId::from_uuid(uuid), &mut budget)
                    .await
            }
            CommunitySource::SpeciesVariant => {
                self.from_variant(SpeciesVariantId::from_uuid(uuid), &mut budget)
                    .await
            }
            CommunitySource::EnumValueSetting => {
                self.from_enum_value_setting(EnumValueSettingId::from_uuid(uuid), &mut budget)
                    .await
            }
            CommunitySource::Character => {
                budget.spend()?;
                self.store
                    .character_community(&CharacterId::from_uuid(uuid))
                    .await?
                    .ok_or(ResolutionError::MissingEntity("character"))
            }
        }
    }

    async fn from_species(
        &self,
        id: SpeciesId,
        budget: &mut HopBudget,
    ) -> Result<CommunityId, ResolutionError> {
        budget.spend()?;
        self.store
            .species_community(&id)
            .await?
            .ok_or(ResolutionError::MissingEntity("species"))
    }

    async fn from_trait(
        &self,
        id: TraitId,
        budget: &mut HopBudget,
    ) -> Result<CommunityId, ResolutionError> {
        budget.spend()?;
        let species = self
            .store
            .trait_species(&id)
            .await?
            .ok_or(ResolutionError::MissingEntity("trait"))?;
        self.from_species(species, budget).await
    }

    async fn from_enum_value(
        &self,
        id: EnumValueId,
        budget: &mut HopBudget,
    ) -> Result<CommunityId, ResolutionError> {
        budget.spend()?;
        let trait_id = self
            .store
            .enum_value_trait(&id)
            .await?
            .ok_or(ResolutionError::MissingEntity("enum value"))?;
        self.from_trait(trait_id, budget).await
    }

    async fn from_variant(
        &self,
        id: SpeciesVariantId,
        budget: &mut HopBudget,
    ) -> Result<CommunityId, ResolutionError> {
        budget.spend()?;
        let species = self
            .store
            .variant_species(&id)
            .await?
            .ok_or(ResolutionError::MissingEntity("species variant"))?;
        self.from_species(species, budget).await
    }

    async fn from_enum_value_setting(
        &self,
        id: EnumValueSettingId,
        budget: &mut HopBudget,
    ) -> Result<CommunityId, ResolutionError> {
        budget.spend()?;
        let variant = self
            .store
            .enum_value_setting_variant(&id)
            .await?
            .ok_or(ResolutionError::MissingEntity("enum value setting"))?;
        self.from_variant(variant, budget).await
    }
}
