// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::domain::models::target::TargetRef;
use crate::utils::errors::ScrapeError;

#[derive(Debug, Deserialize)]
struct TargetRow {
    link: String,
}

/// 读取目标清单
///
/// 输入是一个带 `link` 列的CSV文件。无法解析为URL的行
/// 记录警告后跳过；输入文件本身缺失是整个运行中唯一的
/// 进程级致命条件，错误向上传播。
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<TargetRef>, ScrapeError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let mut targets = Vec::new();
    for row in reader.deserialize::<TargetRow>() {
        let row = row?;
        match TargetRef::parse(&row.link) {
            Ok(target) => targets.push(target),
            Err(e) => {
                warn!(link = %row.link, error = %e, "skipping malformed target link");
            }
        }
    }

    Ok(targets)
}
