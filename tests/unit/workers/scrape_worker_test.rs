// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::tempdir;

use reviewrs::domain::models::target::TargetRef;
use reviewrs::infrastructure::store::CsvStore;
use reviewrs::utils::errors::ScrapeError;
use reviewrs::workers::scrape_worker::ScrapeWorker;

use crate::helpers::{fast_policy, fast_scrape_settings, item, PageBehavior, StubSource};

const URL: &str = "https://example.com/book/1/reviews";

#[tokio::test]
async fn test_successful_target_writes_records() {
    let dir = tempdir().unwrap();
    let store = Arc::new(CsvStore::new(dir.path().join("reviews.csv")));
    let source = StubSource::single(
        URL,
        PageBehavior::Yields(vec![item("great", 5, 2), item("decent", 3, 0)]),
    );
    let opened = source.opened.clone();
    let closed = source.closed.clone();

    let worker = ScrapeWorker::new(source, store.clone(), fast_policy(5), fast_scrape_settings(10));
    let written = worker
        .scrape_target(&TargetRef::parse(URL).unwrap())
        .await
        .unwrap();

    assert_eq!(written, 2);
    // 首次尝试即成功，会话创建一次并释放一次
    assert_eq!(opened.load(Ordering::SeqCst), 1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(store.existing_links().unwrap().contains(URL));
}

#[tokio::test]
async fn test_stalled_target_exhausts_attempts_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    let store = Arc::new(CsvStore::new(&path));
    let source = StubSource::single(URL, PageBehavior::AlwaysStalls);
    let opened = source.opened.clone();
    let closed = source.closed.clone();

    let worker = ScrapeWorker::new(source, store, fast_policy(3), fast_scrape_settings(10));
    let err = worker
        .scrape_target(&TargetRef::parse(URL).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Stalled { .. }));
    // 每次尝试都用全新会话，且每条退出路径都释放了会话
    assert_eq!(opened.load(Ordering::SeqCst), 3);
    assert_eq!(closed.load(Ordering::SeqCst), 3);
    // 失败的目标不产生任何记录
    assert!(!path.exists());
}

#[tokio::test]
async fn test_zero_yield_is_retried_then_terminal() {
    let dir = tempdir().unwrap();
    let store = Arc::new(CsvStore::new(dir.path().join("reviews.csv")));
    let source = StubSource::single(URL, PageBehavior::Yields(Vec::new()));
    let opened = source.opened.clone();

    let worker = ScrapeWorker::new(source, store, fast_policy(4), fast_scrape_settings(10));
    let err = worker
        .scrape_target(&TargetRef::parse(URL).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::ZeroYield));
    assert_eq!(opened.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_max_reviews_caps_written_records() {
    let dir = tempdir().unwrap();
    let store = Arc::new(CsvStore::new(dir.path().join("reviews.csv")));
    let source = StubSource::single(
        URL,
        PageBehavior::Yields(vec![
            item("one", 5, 0),
            item("two", 4, 0),
            item("three", 3, 0),
        ]),
    );

    let worker = ScrapeWorker::new(source, store, fast_policy(2), fast_scrape_settings(2));
    let written = worker
        .scrape_target(&TargetRef::parse(URL).unwrap())
        .await
        .unwrap();

    assert_eq!(written, 2);
}
