// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 分页收敛服务（pagination）：有界的增量加载循环，
///   在目标数量、触发器耗尽或停滞三种终态间收敛
///
/// 领域服务只依赖页面访问器抽象，不接触任何站点耦合的
/// 选择器或浏览器细节。
pub mod pagination;
