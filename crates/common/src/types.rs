//! 通用 ID 类型定义
//!
//! 每种实体一个 uuid newtype，避免 ID 混用。

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
        #[display("{_0}")]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

id_type!(
    /// 用户 ID
    UserId
);
id_type!(
    /// 社区 ID
    CommunityId
);
id_type!(
    /// 角色（社区内职位）ID
    RoleId
);
id_type!(
    /// 角色卡 ID
    CharacterId
);
id_type!(
    /// 媒体 ID
    MediaId
);
id_type!(
    /// 画廊 ID
    GalleryId
);
id_type!(
    /// 图片 ID
    ImageId
);
id_type!(
    /// 评论 ID
    CommentId
);
id_type!(
    /// 邀请 ID
    InvitationId
);
id_type!(
    /// 物种 ID
    SpeciesId
);
id_type!(
    /// 物种变体 ID
    SpeciesVariantId
);
id_type!(
    /// 特征 ID
    TraitId
);
id_type!(
    /// 枚举值 ID
    EnumValueId
);
id_type!(
    /// 枚举值设置 ID
    EnumValueSettingId
);
