//! chardb-authz - 访问控制引擎
//!
//! 声明式、元数据驱动的授权层：
//!
//! - 从任意嵌套的操作参数中推导请求涉及的社区（[`CommunityResolver`]）
//! - 跨多种实体解析多态所有权（[`OwnershipService`]）
//! - 评估全局权限与社区范围的角色权限（[`PermissionService`]）
//! - 以 OR 语义组合多个独立的守卫策略（[`GuardSet`]），
//!   任一策略放行即放行，全部失败时抛出类型化拒绝
//!
//! 引擎只做只读查询，每个请求独立评估，不持有共享可变状态。

mod args;
mod combinator;
mod community;
mod engine;
mod guard;
mod ownership;
mod permission;
mod policy;

pub use args::ArgPath;
pub use combinator::GuardSet;
pub use community::{CommunityPathSpec, CommunityResolver, CommunitySource, ResolutionError};
pub use engine::AccessControl;
pub use guard::{
    AccessContext, AuthenticatedGuard, CharacterEditGuard, CommunityPermissionGuard,
    GlobalPermissionGuard, Guard, OwnershipGuard, SelfGuard, UnauthenticatedGuard,
};
pub use ownership::{OwnedEntity, OwnedEntityKind, OwnershipService};
pub use permission::PermissionService;
pub use policy::{CommunityRequirement, OperationPolicy, OwnershipSpec};
