// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置加载，配置来源优先级为：
/// 默认值 < 配置文件 < 环境变量
pub mod settings;
