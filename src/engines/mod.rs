// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 实现基于无头浏览器的页面访问能力：
/// - traits：页面访问器与页面来源的抽象接口
/// - browser：chromiumoxide会话生命周期与交互辅助
/// - goodreads：面向目标站点标记结构的具体访问器
pub mod browser;
pub mod goodreads;
pub mod traits;
