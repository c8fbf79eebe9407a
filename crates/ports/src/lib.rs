//! chardb-ports - 抽象 trait 层
//!
//! 定义访问控制引擎消费的持久化查询接口。
//! 所有查询均为只读，由具体适配器（数据库或内存）实现。

mod community;
mod membership;
mod ownership;

pub use community::*;
pub use membership::*;
pub use ownership::*;
