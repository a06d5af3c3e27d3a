// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 实现抓取的两层编排：
/// - scrape_worker：单目标重试外壳，每次尝试独占全新浏览器会话
/// - batch：批量驱动器，按清单顺序串行处理未捕获的目标
pub mod batch;
pub mod scrape_worker;
