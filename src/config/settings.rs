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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含输入清单、输出存储、抓取行为、重试和浏览器等所有配置项。
/// 入口程序不接受命令行参数，全部运行参数经由此处加载。
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 输入配置
    pub input: InputSettings,
    /// 输出配置
    pub output: OutputSettings,
    /// 抓取配置
    pub scrape: ScrapeSettings,
    /// 重试配置
    pub retry: RetrySettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
}

/// 输入清单配置
#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    /// 目标清单文件路径（带 link 列的CSV文件）
    pub path: String,
}

/// 输出存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 评论输出文件路径（追加写入的CSV文件）
    pub path: String,
}

/// 抓取行为配置
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeSettings {
    /// 每本书期望抓取的评论数上限
    pub max_reviews: usize,
    /// 元素出现的有界等待时间（秒）
    pub element_wait_secs: u64,
    /// 点击"加载更多"前的短暂停顿（毫秒），等待页面动画结束
    pub pre_click_wait_ms: u64,
    /// 点击后等待新内容渲染的稳定间隔（毫秒）
    pub settle_wait_ms: u64,
}

impl ScrapeSettings {
    /// 元素等待上界
    pub fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_wait_secs)
    }

    /// 点击前停顿
    pub fn pre_click_wait(&self) -> Duration {
        Duration::from_millis(self.pre_click_wait_ms)
    }

    /// 点击后稳定间隔
    pub fn settle_wait(&self) -> Duration {
        Duration::from_millis(self.settle_wait_ms)
    }
}

/// 重试配置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// 单个目标的最大尝试次数
    pub max_attempts: u32,
}

/// 浏览器配置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 是否无头模式运行
    pub headless: bool,
    /// 是否禁用Chromium沙箱（容器环境需要）
    pub no_sandbox: bool,
    /// 浏览器User-Agent
    pub user_agent: String,
    /// CDP请求超时时间（秒）
    pub request_timeout_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("input.path", "targets.csv")?
            .set_default("output.path", "reviews.csv")?
            // Default scrape settings
            .set_default("scrape.max_reviews", 100)?
            .set_default("scrape.element_wait_secs", 10)?
            .set_default("scrape.pre_click_wait_ms", 1000)?
            .set_default("scrape.settle_wait_ms", 2000)?
            // Default retry settings
            .set_default("retry.max_attempts", 5)?
            // Default browser settings
            .set_default("browser.headless", true)?
            .set_default("browser.no_sandbox", true)?
            .set_default(
                "browser.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36",
            )?
            .set_default("browser.request_timeout_secs", 30)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("REVIEWRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
