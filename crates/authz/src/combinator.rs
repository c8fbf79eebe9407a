//! 守卫 OR 组合器
//!
//! 按注册顺序逐个评估守卫，任一放行即短路放行；全部不放行时
//! 转换成类型化拒绝：无可用主体 ⇒ `Unauthenticated`，有已认证
//! 主体 ⇒ `Forbidden`。空集合恒拒绝。
//!
//! 每个守卫对每个请求恰好评估一次，分支之间无共享可变状态；
//! 评估顺序不影响布尔结果，只影响日志里各分支的出现顺序。

use std::sync::Arc;

use chardb_errors::{AppError, AppResult};
use metrics::counter;
use tracing::debug;

use crate::guard::{AccessContext, Guard};

/// 守卫集合（OR 语义）
#[derive(Clone, Default)]
pub struct GuardSet {
    guards: Vec<Arc<dyn Guard>>,
}

impl GuardSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, guard: Arc<dyn Guard>) {
        self.guards.push(guard);
    }

    pub fn with(mut self, guard: Arc<dyn Guard>) -> Self {
        self.push(guard);
        self
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// 评估访问决策
    pub async fn evaluate(&self, ctx: &AccessContext<'_>) -> AppResult<()> {
        for guard in &self.guards {
            if guard.allows(ctx).await {
                debug!(guard = guard.name(), "access granted");
                counter!("authz_decisions_total", "outcome" => "granted").increment(1);
                return Ok(());
            }
            debug!(guard = guard.name(), "branch did not grant");
        }

        counter!("authz_decisions_total", "outcome" => "denied").increment(1);
        match ctx.principal {
            Some(principal) if principal.is_authenticated => {
                Err(AppError::forbidden("No authorization branch granted access"))
            }
            _ => Err(AppError::unauthenticated("Authentication required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chardb_common::{Principal, UserId};
    use serde_json::json;

    use super::*;
    use crate::policy::OperationPolicy;

    /// 固定结果的守卫
    struct Fixed(&'static str, bool);

    #[async_trait]
    impl Guard for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn allows(&self, _ctx: &AccessContext<'_>) -> bool {
            self.1
        }
    }

    fn ctx_parts() -> (OperationPolicy, serde_json::Value) {
        (OperationPolicy::new(), json!({}))
    }

    #[tokio::test]
    async fn test_empty_set_denies() {
        let (policy, args) = ctx_parts();
        let principal = Principal::authenticated(UserId::new());
        let ctx = AccessContext::new(Some(&principal), &policy, &args);

        let err = GuardSet::new().evaluate(&ctx).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_any_true_branch_grants_regardless_of_order() {
        let (policy, args) = ctx_parts();
        let principal = Principal::authenticated(UserId::new());
        let ctx = AccessContext::new(Some(&principal), &policy, &args);

        let front = GuardSet::new()
            .with(Arc::new(Fixed("yes", true)))
            .with(Arc::new(Fixed("no", false)));
        let back = GuardSet::new()
            .with(Arc::new(Fixed("no", false)))
            .with(Arc::new(Fixed("yes", true)));

        assert!(front.evaluate(&ctx).await.is_ok());
        assert!(back.evaluate(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn test_all_false_with_principal_is_forbidden() {
        let (policy, args) = ctx_parts();
        let principal = Principal::authenticated(UserId::new());
        let ctx = AccessContext::new(Some(&principal), &policy, &args);

        let set = GuardSet::new()
            .with(Arc::new(Fixed("a", false)))
            .with(Arc::new(Fixed("b", false)));

        let err = set.evaluate(&ctx).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_all_false_without_principal_is_unauthenticated() {
        let (policy, args) = ctx_parts();
        let ctx = AccessContext::new(None, &policy, &args);

        let set = GuardSet::new().with(Arc::new(Fixed("a", false)));
        let err = set.evaluate(&ctx).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_unauthenticated_principal_counts_as_no_principal() {
        let (policy, args) = ctx_parts();
        let principal = Principal {
            id: UserId::new(),
            is_authenticated: false,
            is_admin: false,
        };
        let ctx = AccessContext::new(Some(&principal), &policy, &args);

        let set = GuardSet::new().with(Arc::new(Fixed("a", false)));
        let err = set.evaluate(&ctx).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }
}
