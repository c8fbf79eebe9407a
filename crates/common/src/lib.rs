//! chardb-common - 通用类型库
//!
//! 所有 crate 共享的 ID 类型、主体（Principal）和角色/权限定义

pub mod permission;
pub mod principal;
pub mod role;
pub mod types;

pub use permission::*;
pub use principal::*;
pub use role::*;
pub use types::*;
