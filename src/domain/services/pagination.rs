// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::engines::traits::{EngineError, PageAccessor};

/// 分页收敛结果
///
/// 循环的三种终态以显式变体表达，由重试外壳匹配消费，
/// 不以异常作为控制流。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationOutcome {
    /// 已加载数量达到期望值
    Converged(usize),
    /// 触发器不存在或不可用：这本书没有更多评论（预期的部分成功）
    Exhausted(usize),
    /// 触发加载后数量未严格增长：页面处于意外状态（可重试失败）
    Stalled { loaded: usize },
}

/// 分页收敛循环
///
/// 反复触发"加载更多"并重新计数已物化的评论条目，直到：
/// 数量达到 `target_count`（收敛）、触发器消失（耗尽）、
/// 或一轮迭代后数量未严格增长（停滞，快速失败）。
/// 严格增长规则保证循环有界，绝不无限循环。
///
/// # 参数
///
/// * `page` - 已定位到评论列表的页面访问器
/// * `target_count` - 期望的评论条目数量
/// * `settle` - 每次触发后等待新内容渲染的稳定间隔
pub async fn run_pagination<P: PageAccessor>(
    page: &P,
    target_count: usize,
    settle: Duration,
) -> Result<PaginationOutcome, EngineError> {
    let mut loaded = page.loaded_review_count().await?;

    loop {
        if loaded >= target_count {
            return Ok(PaginationOutcome::Converged(loaded));
        }

        if !page.trigger_load_more().await? {
            return Ok(PaginationOutcome::Exhausted(loaded));
        }

        sleep(settle).await;

        let reloaded = page.loaded_review_count().await?;
        if reloaded <= loaded {
            return Ok(PaginationOutcome::Stalled { loaded: reloaded });
        }

        debug!(loaded = reloaded, target = target_count, "more reviews materialized");
        loaded = reloaded;
    }
}
