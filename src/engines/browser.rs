// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chromiumoxide::element::Element;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::settings::BrowserSettings;
use crate::engines::traits::EngineError;

/// 元素存在性轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 启动一个新的浏览器会话
///
/// 每次抓取尝试独占一个会话：在尝试开始时启动，尝试结束时
/// 由调用方显式关闭。返回浏览器实例和事件处理任务句柄。
pub async fn launch_session(
    settings: &BrowserSettings,
) -> Result<(Browser, JoinHandle<()>), EngineError> {
    let mut builder = BrowserConfig::builder()
        .request_timeout(Duration::from_secs(settings.request_timeout_secs))
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage");

    if settings.no_sandbox {
        builder = builder.no_sandbox();
    }
    if !settings.headless {
        builder = builder.with_head();
    }

    let config = builder.build().map_err(EngineError::Launch)?;
    let (browser, mut handler) = Browser::launch(config).await?;

    // Drive browser events until the session ends
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    Ok((browser, handler_task))
}

/// 在有界等待内定位一个元素
///
/// 以固定间隔轮询，直到元素出现或超过等待上界。
pub async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element, EngineError> {
    let deadline = Instant::now() + timeout;
    loop {
        match page.find_element(selector).await {
            Ok(element) => return Ok(element),
            Err(_) if Instant::now() < deadline => sleep(POLL_INTERVAL).await,
            Err(_) => {
                return Err(EngineError::ElementWait {
                    selector: selector.to_string(),
                    waited_ms: timeout.as_millis() as u64,
                })
            }
        }
    }
}

/// 点击一个元素，被遮挡时回退到强制JavaScript点击
///
/// 先滚动到元素位置再点击；浮层拦截直接点击时，
/// 通过CDP执行 `querySelector(...).click()` 强制激活。
pub async fn click_with_fallback(
    page: &Page,
    element: &Element,
    selector: &str,
) -> Result<(), EngineError> {
    element.scroll_into_view().await?;

    if let Err(e) = element.click().await {
        debug!(selector, error = %e, "direct click failed, forcing JavaScript click");
        let script = format!(
            "document.querySelector('{}').click()",
            selector.replace('\'', "\\'")
        );
        page.evaluate(script.as_str()).await?;
    }

    Ok(())
}
