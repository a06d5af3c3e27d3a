// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use url::Url;

/// 目标引用
///
/// 标识一本书评论页的URL。批量运行开始时从输入清单读取，
/// 每个目标在一次运行中最多被消费一次。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef(String);

impl TargetRef {
    /// 解析并校验一个目标URL
    pub fn parse(link: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(link.trim())?;
        Ok(Self(url.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
