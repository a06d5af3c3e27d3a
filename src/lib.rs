// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体和分页收敛等领域服务
pub mod domain;

/// 引擎模块
///
/// 实现基于无头浏览器的页面访问引擎
pub mod engines;

/// 基础设施模块
///
/// 提供外部资源集成，如目标清单和CSV输出存储
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现单目标重试外壳和批量驱动器
pub mod workers;
