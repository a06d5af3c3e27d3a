// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 书籍元数据（BookMeta）：一本书的标题、作者等页面级信息
/// - 评论条目（ReviewItem）：单条评论提取出的瞬时字段
/// - 评论记录（ReviewRecord）：写入输出存储的一行完整数据
/// - 目标引用（TargetRef）：待抓取的一个评论页URL
pub mod review;
pub mod target;
