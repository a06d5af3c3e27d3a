// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reviewrs::config::settings::ScrapeSettings;
use reviewrs::domain::models::review::{BookMeta, ReviewItem};
use reviewrs::engines::traits::{EngineError, PageAccessor, PageSource};
use reviewrs::utils::retry_policy::RetryPolicy;

/// 单个目标的脚本化行为
#[derive(Clone)]
pub enum PageBehavior {
    /// 页面直接给出这些评论条目，无需分页
    Yields(Vec<ReviewItem>),
    /// 触发"加载更多"后计数永不增长（分页停滞）
    AlwaysStalls,
}

/// 脚本化的页面来源
///
/// 按URL查找行为脚本；记录会话的打开与释放次数，
/// 用于验证每条退出路径都归还了会话。
pub struct StubSource {
    behaviors: HashMap<String, PageBehavior>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn new(behaviors: HashMap<String, PageBehavior>) -> Self {
        Self {
            behaviors,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn single(url: &str, behavior: PageBehavior) -> Self {
        let mut behaviors = HashMap::new();
        behaviors.insert(url.to_string(), behavior);
        Self::new(behaviors)
    }
}

#[async_trait]
impl PageSource for StubSource {
    type Page = StubPage;

    async fn open(&self, url: &str) -> Result<StubPage, EngineError> {
        let behavior = self
            .behaviors
            .get(url)
            .cloned()
            .ok_or_else(|| EngineError::Other(format!("no behavior scripted for {url}")))?;

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(StubPage {
            behavior,
            closed: self.closed.clone(),
        })
    }
}

pub struct StubPage {
    behavior: PageBehavior,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl PageAccessor for StubPage {
    async fn book_meta(&self) -> Result<BookMeta, EngineError> {
        Ok(BookMeta {
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            genres: vec!["Fantasy".to_string()],
            first_published: "September 21, 1937".to_string(),
        })
    }

    async fn apply_language_filter(&self) -> Result<(), EngineError> {
        Ok(())
    }

    async fn total_reviews(&self) -> Result<Option<usize>, EngineError> {
        match &self.behavior {
            PageBehavior::Yields(items) => Ok(Some(items.len())),
            PageBehavior::AlwaysStalls => Ok(Some(100)),
        }
    }

    async fn loaded_review_count(&self) -> Result<usize, EngineError> {
        match &self.behavior {
            PageBehavior::Yields(items) => Ok(items.len()),
            PageBehavior::AlwaysStalls => Ok(1),
        }
    }

    async fn trigger_load_more(&self) -> Result<bool, EngineError> {
        match &self.behavior {
            PageBehavior::Yields(_) => Ok(false),
            PageBehavior::AlwaysStalls => Ok(true),
        }
    }

    async fn review_items(&self, limit: usize) -> Result<Vec<ReviewItem>, EngineError> {
        match &self.behavior {
            PageBehavior::Yields(items) => Ok(items.iter().take(limit).cloned().collect()),
            PageBehavior::AlwaysStalls => Ok(Vec::new()),
        }
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 测试用评论条目
pub fn item(text: &str, rating: u8, likes: u32) -> ReviewItem {
    ReviewItem {
        text: text.to_string(),
        date: "May 3, 2021".to_string(),
        rating,
        likes,
    }
}

/// 测试用抓取配置：等待时间压到最低
pub fn fast_scrape_settings(max_reviews: usize) -> ScrapeSettings {
    ScrapeSettings {
        max_reviews,
        element_wait_secs: 1,
        pre_click_wait_ms: 0,
        settle_wait_ms: 0,
    }
}

/// 测试用重试策略：毫秒级退避，无抖动
pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(2),
        backoff_multiplier: 1.0,
        jitter_factor: 0.0,
        enable_jitter: false,
    }
}
