// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供外部资源集成：
/// - store：追加写入的CSV输出存储，按来源URL去重
/// - target_list：带 link 列的CSV目标清单
pub mod store;
pub mod target_list;
