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
use tracing::info;

use reviewrs::config::settings::Settings;
use reviewrs::engines::goodreads::GoodreadsSource;
use reviewrs::infrastructure::store::CsvStore;
use reviewrs::infrastructure::target_list;
use reviewrs::utils::retry_policy::RetryPolicy;
use reviewrs::utils::telemetry;
use reviewrs::workers::batch::BatchRunner;
use reviewrs::workers::scrape_worker::ScrapeWorker;

/// 主函数
///
/// 应用程序入口点。不接受命令行参数，所有运行参数来自配置。
/// 输入清单缺失是唯一的进程级致命条件。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting reviewrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Load target list (a missing input file terminates the run)
    let targets = target_list::load(&settings.input.path)?;
    info!(targets = targets.len(), "Target list loaded");

    // 4. Open the output store
    let store = Arc::new(CsvStore::new(&settings.output.path));

    // 5. Wire up the scrape pipeline
    let source = GoodreadsSource::new(settings.browser.clone(), settings.scrape.clone());
    let worker = ScrapeWorker::new(
        source,
        store.clone(),
        RetryPolicy::per_target(settings.retry.max_attempts),
        settings.scrape.clone(),
    );
    let runner = BatchRunner::new(worker, store);

    // 6. Run the batch sequentially
    let summary = runner.run(&targets).await?;
    info!(
        scraped = summary.scraped,
        skipped = summary.skipped,
        failed = summary.failed,
        "reviewrs finished"
    );

    Ok(())
}
