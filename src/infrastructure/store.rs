// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::models::review::ReviewRecord;
use crate::utils::errors::ScrapeError;

/// CSV输出存储
///
/// 追加写入的记录集合，以来源URL为去重键。没有更新和删除操作，
/// 只有存在性检查和追加。表头仅在文件创建时写入一次，
/// 后续运行直接追加，不重写表头。
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 读取已捕获的来源URL集合
    ///
    /// 文件不存在时返回空集合（首次运行）。
    pub fn existing_links(&self) -> Result<HashSet<String>, ScrapeError> {
        if !self.path.exists() {
            return Ok(HashSet::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut links = HashSet::new();
        for record in reader.deserialize::<ReviewRecord>() {
            links.insert(record?.url);
        }

        debug!(captured = links.len(), "existing output store loaded");
        Ok(links)
    }

    /// 追加一批评论记录
    ///
    /// 文件尚不存在时先写入固定表头。写入完成后立即刷新。
    pub fn append(&self, records: &[ReviewRecord]) -> Result<(), ScrapeError> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }
}
