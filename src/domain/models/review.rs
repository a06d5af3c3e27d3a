// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::target::TargetRef;
use crate::utils::text_processing::collapse_whitespace;

/// 书籍元数据
///
/// 一次抓取尝试中从页面头部提取的书籍级信息，
/// 同一本书的所有评论记录共享这份元数据。
#[derive(Debug, Clone)]
pub struct BookMeta {
    /// 书名
    pub title: String,
    /// 作者
    pub author: String,
    /// 类型标签列表
    pub genres: Vec<String>,
    /// 首次出版信息
    pub first_published: String,
}

/// 评论条目
///
/// 单条评论提取出的瞬时字段。文本节点缺失的条目在提取阶段
/// 即被丢弃，不会构造出此类型的值。
#[derive(Debug, Clone)]
pub struct ReviewItem {
    /// 评论正文（未清理）
    pub text: String,
    /// 评论日期文本，缺失时为空字符串
    pub date: String,
    /// 星级评分 (0-5)
    pub rating: u8,
    /// 点赞数，元素缺失时为0
    pub likes: u32,
}

/// 评论记录实体
///
/// 写入输出存储的一行数据，构造后不可变。
/// 字段重命名决定了CSV的固定表头。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// 书名
    #[serde(rename = "Book Title")]
    pub book_title: String,
    /// 作者
    #[serde(rename = "Author")]
    pub author: String,
    /// 类型标签，以 "; " 连接为文本
    #[serde(rename = "Genres")]
    pub genres: String,
    /// 首次出版信息
    #[serde(rename = "First Published")]
    pub first_published: String,
    /// 来源URL，输出存储的去重键
    #[serde(rename = "URL")]
    pub url: String,
    /// 评论正文，空白已折叠
    #[serde(rename = "Review Text")]
    pub review_text: String,
    /// 评论日期
    #[serde(rename = "Review Date")]
    pub review_date: String,
    /// 星级评分 (0-5)
    #[serde(rename = "Rating")]
    pub rating: u8,
    /// 点赞数
    #[serde(rename = "Likes")]
    pub likes: u32,
}

impl ReviewRecord {
    /// 由书籍元数据和单条评论构造一行输出记录
    ///
    /// 评论正文在此处折叠空白并去除首尾空格。
    pub fn new(meta: &BookMeta, target: &TargetRef, item: ReviewItem) -> Self {
        Self {
            book_title: meta.title.clone(),
            author: meta.author.clone(),
            genres: meta.genres.join("; "),
            first_published: meta.first_published.clone(),
            url: target.as_str().to_string(),
            review_text: collapse_whitespace(&item.text),
            review_date: item.date,
            rating: item.rating,
            likes: item.likes,
        }
    }
}
