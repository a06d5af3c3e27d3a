// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::models::target::TargetRef;
use crate::engines::traits::PageSource;
use crate::infrastructure::store::CsvStore;
use crate::utils::errors::ScrapeError;
use crate::workers::scrape_worker::ScrapeWorker;

/// 批量运行摘要
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// 成功捕获的目标数
    pub scraped: usize,
    /// 因已在输出存储中而跳过的目标数
    pub skipped: usize,
    /// 耗尽重试后放弃的目标数
    pub failed: usize,
}

/// 批量驱动器
///
/// 按清单顺序串行处理目标：运行开始时读取输出存储构建
/// 已捕获集合，跳过其中的目标，其余逐一交给重试外壳。
/// 单个目标失败不阻塞后续目标，也绝不中止整个批次。
pub struct BatchRunner<S: PageSource> {
    worker: ScrapeWorker<S>,
    store: Arc<CsvStore>,
}

impl<S: PageSource> BatchRunner<S> {
    pub fn new(worker: ScrapeWorker<S>, store: Arc<CsvStore>) -> Self {
        Self { worker, store }
    }

    /// 运行整个批次
    ///
    /// 重复执行同一批次是幂等的：已捕获的目标不会被重新抓取。
    pub async fn run(&self, targets: &[TargetRef]) -> Result<BatchSummary, ScrapeError> {
        let mut captured = self.store.existing_links()?;
        let started = Utc::now();
        let mut summary = BatchSummary::default();

        info!(targets = targets.len(), captured = captured.len(), "batch started");

        for target in targets {
            if captured.contains(target.as_str()) {
                debug!(url = %target, "already captured, skipping");
                summary.skipped += 1;
                continue;
            }

            match self.worker.scrape_target(target).await {
                Ok(written) => {
                    summary.scraped += 1;
                    captured.insert(target.as_str().to_string());
                    info!(url = %target, written, "target done");
                }
                Err(e) => {
                    summary.failed += 1;
                    error!(url = %target, error = %e, "target abandoned after exhausting retries");
                }
            }
        }

        let elapsed = Utc::now() - started;
        info!(
            scraped = summary.scraped,
            skipped = summary.skipped,
            failed = summary.failed,
            elapsed_secs = elapsed.num_seconds(),
            "batch finished"
        );

        Ok(summary)
    }
}
