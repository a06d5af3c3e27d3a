// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use scraper::{Html, Selector};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::settings::{BrowserSettings, ScrapeSettings};
use crate::domain::models::review::{BookMeta, ReviewItem};
use crate::engines::browser::{click_with_fallback, launch_session, wait_for_element};
use crate::engines::traits::{EngineError, PageAccessor, PageSource};
use crate::utils::text_processing::extract_count;

// 站点耦合的选择器。目标站点改版时只需调整这里，
// 分页收敛与重试逻辑不受影响。
const BOOK_TITLE: &str = r#"h1.Text.H1Title[itemprop="name"] a"#;
const BOOK_AUTHOR: &str = "a.ContributorLink span.ContributorLink__name";
const GENRE_BUTTONS: &str = ".BookPageMetadataSection__genres .Button__labelWrapper";
const PUBLICATION_INFO: &str = r#"p[data-testid="publicationInfo"]"#;
const TOTAL_REVIEWS: &str = r#"span[data-testid="reviewsCount"]"#;
const REVIEW_CARD: &str = "article.ReviewCard";
const REVIEW_SECTION: &str = "section.ReviewText";
const REVIEW_TEXT: &str = "section.ReviewText span.Formatted";
const REVIEW_DATE: &str = "section.ReviewCard__row span.Text__body3 a";
const UNFILLED_STAR: &str = "span.RatingStars span.RatingStar--unfilled";
const LIKE_COUNT: &str = ".SocialFooter__statsContainer .Button__labelWrapper";
const LOAD_MORE: &str = ".Divider--largeMargin .Button--medium";
const FILTER_TOGGLE: &str = r#"button[aria-label="Review filters"]"#;
const FILTER_ENGLISH: &str = r#"div.ReviewFilters label[for="languageCode-en"]"#;

const PUBLICATION_PREFIX: &str = "First published";

/// 目标站点页面来源
///
/// 每次 `open` 启动全新的浏览器会话并导航到目标评论页。
pub struct GoodreadsSource {
    browser: BrowserSettings,
    scrape: ScrapeSettings,
}

impl GoodreadsSource {
    pub fn new(browser: BrowserSettings, scrape: ScrapeSettings) -> Self {
        Self { browser, scrape }
    }

    async fn prepare_page(&self, browser: &Browser, url: &str) -> Result<Page, EngineError> {
        let page = browser.new_page("about:blank").await?;
        page.set_user_agent(self.browser.user_agent.as_str())
            .await?;
        page.goto(url).await?;

        // The review list renders asynchronously after document load
        wait_for_element(&page, REVIEW_SECTION, self.scrape.element_wait()).await?;
        Ok(page)
    }
}

#[async_trait]
impl PageSource for GoodreadsSource {
    type Page = GoodreadsPage;

    async fn open(&self, url: &str) -> Result<GoodreadsPage, EngineError> {
        let (mut browser, handler) = launch_session(&self.browser).await?;

        match self.prepare_page(&browser, url).await {
            Ok(page) => Ok(GoodreadsPage {
                browser: Mutex::new(Some(browser)),
                handler,
                page,
                scrape: self.scrape.clone(),
            }),
            Err(e) => {
                // Navigation failed before the accessor exists, tear down here
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "browser teardown after failed navigation");
                }
                handler.abort();
                Err(e)
            }
        }
    }
}

/// 目标站点页面访问器
///
/// 独占持有一个浏览器会话和已定位到评论列表的页面。
pub struct GoodreadsPage {
    browser: Mutex<Option<Browser>>,
    handler: JoinHandle<()>,
    page: Page,
    scrape: ScrapeSettings,
}

#[async_trait]
impl PageAccessor for GoodreadsPage {
    async fn book_meta(&self) -> Result<BookMeta, EngineError> {
        let title_element =
            wait_for_element(&self.page, BOOK_TITLE, self.scrape.element_wait()).await?;
        let title = title_element.inner_text().await?.unwrap_or_default();

        let content = self.page.content().await?;
        Ok(parse_book_meta(&content, title))
    }

    async fn apply_language_filter(&self) -> Result<(), EngineError> {
        let toggle = wait_for_element(&self.page, FILTER_TOGGLE, self.scrape.element_wait()).await?;
        click_with_fallback(&self.page, &toggle, FILTER_TOGGLE).await?;

        let english =
            wait_for_element(&self.page, FILTER_ENGLISH, self.scrape.element_wait()).await?;
        click_with_fallback(&self.page, &english, FILTER_ENGLISH).await?;

        // The filter reloads the review list server-side
        sleep(self.scrape.settle_wait()).await;
        Ok(())
    }

    async fn total_reviews(&self) -> Result<Option<usize>, EngineError> {
        let content = self.page.content().await?;
        Ok(parse_total_reviews(&content))
    }

    async fn loaded_review_count(&self) -> Result<usize, EngineError> {
        let sections = self.page.find_elements(REVIEW_SECTION).await?;
        Ok(sections.len())
    }

    async fn trigger_load_more(&self) -> Result<bool, EngineError> {
        let button = match wait_for_element(&self.page, LOAD_MORE, self.scrape.element_wait()).await
        {
            Ok(button) => button,
            Err(EngineError::ElementWait { .. }) => {
                debug!("no load-more trigger present, all reviews loaded");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        // Let any scroll animation finish before the click lands
        sleep(self.scrape.pre_click_wait()).await;
        click_with_fallback(&self.page, &button, LOAD_MORE).await?;
        Ok(true)
    }

    async fn review_items(&self, limit: usize) -> Result<Vec<ReviewItem>, EngineError> {
        let content = self.page.content().await?;
        Ok(parse_review_items(&content, limit))
    }

    async fn close(&self) -> Result<(), EngineError> {
        let result = match self.browser.lock().await.take() {
            Some(mut browser) => browser
                .close()
                .await
                .map(|_| ())
                .map_err(EngineError::from),
            None => Ok(()),
        };
        // The handler task must end even when close itself failed
        self.handler.abort();
        result
    }
}

/// 从渲染后的文档解析书籍元数据
///
/// 标题经由CDP的有界等待单独取得；作者、类型和出版信息
/// 缺失时退化为空值，不使尝试失败。
fn parse_book_meta(content: &str, title: String) -> BookMeta {
    let document = Html::parse_document(content);

    let author_selector = Selector::parse(BOOK_AUTHOR).unwrap();
    let author = document
        .select(&author_selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let genre_selector = Selector::parse(GENRE_BUTTONS).unwrap();
    let genres: Vec<String> = document
        .select(&genre_selector)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    let publication_selector = Selector::parse(PUBLICATION_INFO).unwrap();
    let first_published = document
        .select(&publication_selector)
        .next()
        .map(|e| {
            let text = e.text().collect::<String>();
            text.trim()
                .strip_prefix(PUBLICATION_PREFIX)
                .map(str::trim)
                .unwrap_or(text.trim())
                .to_string()
        })
        .unwrap_or_default();

    BookMeta {
        title,
        author,
        genres,
        first_published,
    }
}

/// 从渲染后的文档读取评论总数计数器
fn parse_total_reviews(content: &str) -> Option<usize> {
    let document = Html::parse_document(content);
    let selector = Selector::parse(TOTAL_REVIEWS).unwrap();

    document
        .select(&selector)
        .next()
        .map(|e| extract_count(&e.text().collect::<String>()) as usize)
}

/// 从渲染后的文档提取评论条目字段
///
/// 文本节点缺失的条目被静默跳过，不计入结果。
/// 星级评分为 5 减去未填充星标数量；点赞元素缺失时记0。
fn parse_review_items(content: &str, limit: usize) -> Vec<ReviewItem> {
    let document = Html::parse_document(content);

    let card_selector = Selector::parse(REVIEW_CARD).unwrap();
    let text_selector = Selector::parse(REVIEW_TEXT).unwrap();
    let date_selector = Selector::parse(REVIEW_DATE).unwrap();
    let star_selector = Selector::parse(UNFILLED_STAR).unwrap();
    let like_selector = Selector::parse(LIKE_COUNT).unwrap();

    let mut items = Vec::new();
    for card in document.select(&card_selector) {
        if items.len() >= limit {
            break;
        }

        let text = match card.select(&text_selector).next() {
            Some(node) => node.text().collect::<String>(),
            None => {
                debug!("review item without text node, skipping");
                continue;
            }
        };

        let date = card
            .select(&date_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let unfilled = card.select(&star_selector).count();
        let rating = 5u8.saturating_sub(unfilled.min(5) as u8);

        let likes = card
            .select(&like_selector)
            .next()
            .map(|e| extract_count(&e.text().collect::<String>()))
            .unwrap_or(0);

        items.push(ReviewItem {
            text,
            date,
            rating,
            likes,
        });
    }

    items
}
