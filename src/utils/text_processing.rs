// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 折叠空白字符
///
/// 将制表符、换行符和连续空格折叠为单个空格，并去除首尾空白。
/// 评论文本在写入输出存储前必须经过此处理。
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// 从页面文本中提取计数值
///
/// 页面上的计数通常形如 "1,234 likes" 或 "3,456 reviews"，
/// 取其中的全部数字字符；没有数字时返回0。
pub fn extract_count(text: &str) -> u32 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
