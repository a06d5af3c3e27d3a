// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::review::{BookMeta, ReviewItem};

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器协议错误
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// 元素在有界等待内未出现
    #[error("element `{selector}` not present within {waited_ms}ms")]
    ElementWait { selector: String, waited_ms: u64 },

    /// 浏览器会话启动失败
    #[error("browser session launch failed: {0}")]
    Launch(String),

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 页面访问器特质
///
/// 站点耦合的选择器逻辑全部封装在此能力之后：换一个目标站点
/// 只需替换实现，分页收敛与重试逻辑不受影响。
///
/// 实现约定：
/// - 所有元素定位都在有界等待内完成
/// - `trigger_load_more` 返回 `Ok(false)` 表示触发器不存在或不可用
///   （正常的"没有更多评论"），错误仅用于意外的页面状态
/// - 文本节点缺失的评论条目由 `review_items` 静默丢弃
#[async_trait]
pub trait PageAccessor: Send + Sync {
    /// 提取书籍元数据（标题、作者、类型、出版信息）
    async fn book_meta(&self) -> Result<BookMeta, EngineError>;

    /// 应用语言过滤器
    ///
    /// 这是一个服务端有状态的动作；失败的尝试总是以全新会话
    /// 重新导航，因此不会产生跨尝试污染。
    async fn apply_language_filter(&self) -> Result<(), EngineError>;

    /// 读取页面级评论总数计数器
    ///
    /// 必须在过滤器应用之后调用，以过滤后的集合为准。
    /// 计数器缺失时返回 `Ok(None)`。
    async fn total_reviews(&self) -> Result<Option<usize>, EngineError>;

    /// 当前已物化的评论条目数量
    async fn loaded_review_count(&self) -> Result<usize, EngineError>;

    /// 触发一次"加载更多"
    ///
    /// 直接点击被遮挡时回退到强制JavaScript点击。
    /// 返回 `Ok(false)` 表示触发器在有界等待内不存在或不可用。
    async fn trigger_load_more(&self) -> Result<bool, EngineError>;

    /// 提取最多 `limit` 条评论的字段
    async fn review_items(&self, limit: usize) -> Result<Vec<ReviewItem>, EngineError>;

    /// 释放浏览器会话
    ///
    /// 每次尝试结束时必须调用，无论成功或失败，
    /// 避免泄漏操作系统级浏览器进程。
    async fn close(&self) -> Result<(), EngineError>;
}

/// 页面来源特质
///
/// 为一个目标URL打开一个已就位的页面访问器。
/// 每次调用都创建全新的浏览器会话（每次尝试一个会话）。
#[async_trait]
pub trait PageSource: Send + Sync {
    type Page: PageAccessor;

    /// 启动会话、导航到目标并等待评论列表就位
    async fn open(&self, url: &str) -> Result<Self::Page, EngineError>;
}
