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

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::config::settings::ScrapeSettings;
use crate::domain::models::review::ReviewRecord;
use crate::domain::models::target::TargetRef;
use crate::domain::services::pagination::{run_pagination, PaginationOutcome};
use crate::engines::traits::{PageAccessor, PageSource};
use crate::infrastructure::store::CsvStore;
use crate::utils::errors::ScrapeError;
use crate::utils::retry_policy::RetryPolicy;

/// 抓取工作器（重试外壳）
///
/// 将单个目标的完整抓取尝试（会话创建 → 导航 → 元数据提取 →
/// 过滤器应用 → 分页收敛 → 字段提取 → 持久化）包裹在有界的
/// 尝试次数内。任何一步失败都丢弃本次尝试的全部状态，
/// 退避后以全新浏览器会话重来。
pub struct ScrapeWorker<S: PageSource> {
    source: S,
    store: Arc<CsvStore>,
    policy: RetryPolicy,
    scrape: ScrapeSettings,
}

impl<S: PageSource> ScrapeWorker<S> {
    /// 创建新的抓取工作器实例
    pub fn new(source: S, store: Arc<CsvStore>, policy: RetryPolicy, scrape: ScrapeSettings) -> Self {
        Self {
            source,
            store,
            policy,
            scrape,
        }
    }

    /// 抓取一个目标，返回写入的记录条数
    ///
    /// 尝试次数耗尽后返回最后一次的错误；该目标不会写入任何记录，
    /// 调用方记录后继续处理下一个目标。
    #[instrument(skip(self, target), fields(url = %target))]
    pub async fn scrape_target(&self, target: &TargetRef) -> Result<usize, ScrapeError> {
        let mut last_error = None;

        for attempt in 1..=self.policy.max_attempts {
            match self.run_attempt(target).await {
                Ok(written) => {
                    info!(attempt, written, "target captured");
                    return Ok(written);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "scrape attempt failed");
                    last_error = Some(e);
                    if self.policy.should_retry(attempt) {
                        sleep(self.policy.backoff_for(attempt)).await;
                    }
                }
            }
        }

        // max_attempts >= 1, so at least one error was recorded
        Err(last_error.unwrap_or(ScrapeError::ZeroYield))
    }

    /// 执行一次完整尝试
    ///
    /// 会话在此处创建，并在每条退出路径上释放。
    async fn run_attempt(&self, target: &TargetRef) -> Result<usize, ScrapeError> {
        let page = self.source.open(target.as_str()).await?;

        let result = self.scrape_on_page(&page, target).await;

        if let Err(e) = page.close().await {
            warn!(error = %e, "browser session teardown failed");
        }

        result
    }

    async fn scrape_on_page(
        &self,
        page: &S::Page,
        target: &TargetRef,
    ) -> Result<usize, ScrapeError> {
        let meta = page.book_meta().await?;

        page.apply_language_filter().await?;

        // 总数计数器在过滤器应用之后读取，以过滤后的集合为准
        let total = page.total_reviews().await?;
        let wanted = total.map_or(self.scrape.max_reviews, |t| t.min(self.scrape.max_reviews));

        let outcome = run_pagination(page, wanted, self.scrape.settle_wait()).await?;
        match outcome {
            PaginationOutcome::Stalled { loaded } => return Err(ScrapeError::Stalled { loaded }),
            PaginationOutcome::Converged(loaded) => {
                info!(loaded, wanted, "pagination converged");
            }
            PaginationOutcome::Exhausted(loaded) => {
                info!(loaded, wanted, "all available reviews loaded");
            }
        }

        let items = page.review_items(wanted).await?;
        if items.is_empty() {
            return Err(ScrapeError::ZeroYield);
        }

        let records: Vec<ReviewRecord> = items
            .into_iter()
            .map(|item| ReviewRecord::new(&meta, target, item))
            .collect();
        self.store.append(&records)?;

        Ok(records.len())
    }
}
