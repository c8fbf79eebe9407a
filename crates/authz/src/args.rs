//! 操作参数路径
//!
//! GraphQL 操作的参数以 JSON 文档形式进入引擎。[`ArgPath`] 是指向
//! 该文档内某个值的点分路径（如 `"input.speciesVariantId"`），
//! 在策略描述符中声明，评估时解引用。

use serde_json::Value;
use uuid::Uuid;

/// 指向操作参数 JSON 中某个值的点分路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgPath(String);

impl ArgPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 按路径取值；任一段缺失即 `None`
    pub fn lookup<'a>(&self, args: &'a Value) -> Option<&'a Value> {
        let mut current = args;
        for segment in self.0.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// 按路径取 uuid；路径缺失或值不是合法 uuid 字符串时为 `None`
    pub fn uuid_at(&self, args: &Value) -> Option<Uuid> {
        let raw = self.lookup(args)?.as_str()?;
        Uuid::parse_str(raw).ok()
    }
}

impl From<&str> for ArgPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
