// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::engines::traits::EngineError;

/// 抓取错误类型
///
/// 覆盖单次抓取尝试内的全部错误面。重试外壳对所有变体一视同仁：
/// 记录日志后以全新浏览器会话重新尝试，直到尝试次数耗尽。
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// 引擎错误（导航失败、元素等待超时、CDP故障等）
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// 分页停滞：点击"加载更多"后评论数量未再增长，页面处于意外状态
    #[error("pagination stalled at {loaded} loaded reviews")]
    Stalled { loaded: usize },

    /// 零产出：尝试完整执行但未提取到任何评论，通常是瞬时渲染故障
    #[error("attempt completed but extracted no reviews")]
    ZeroYield,

    /// 输出存储错误
    #[error("output store error: {0}")]
    Store(#[from] csv::Error),

    /// IO错误
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
