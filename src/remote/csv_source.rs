// ==========================================
// 多渠道采购单跟踪系统 - CSV 行来源
// ==========================================
// 职责: 快照 CSV 导出文件 → 原始行（测试/离线运行用）
// 红线: 首行为表头;全空行此处不过滤（由摄取层计数丢弃）;
//       只读来源,动作提交一律拒绝
// ==========================================

use crate::ingest::error::{IngestError, IngestResult};
use crate::remote::payload::{ActionRequest, ActionResponse};
use crate::remote::store::{RemoteError, RemoteResult, RemoteStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// 读取 CSV 导出文件为原始行集
///
/// # 规则
/// - 首行为表头,行值按表头列名对应
/// - 行长与表头不一致时,缺列按空串、多列截断
pub fn load_raw_rows<P: AsRef<Path>>(path: P) -> IngestResult<Vec<HashMap<String, String>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }
    if path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()) != Some("csv".into()) {
        return Err(IngestError::UnsupportedFormat(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::CsvParseError(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() {
        return Err(IngestError::EmptySnapshot);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or_default();
            row.insert(header.clone(), value.to_string());
        }
        rows.push(row);
    }

    info!(path = %path.display(), rows = rows.len(), "CSV 快照读取完成");
    Ok(rows)
}

// ==========================================
// CsvRowSource - 只读 CSV 行存储
// ==========================================
// 用途: 离线回放一份快照导出;提交动作一律 ReadOnly 错误
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RemoteStore for CsvRowSource {
    async fn fetch_rows(&self) -> RemoteResult<Vec<HashMap<String, String>>> {
        load_raw_rows(&self.path).map_err(|e| RemoteError::Network(e.to_string()))
    }

    async fn submit(&self, request: &ActionRequest) -> RemoteResult<ActionResponse> {
        Err(RemoteError::ReadOnly(format!(
            "CSV 来源无法提交动作: {}",
            request.target()
        )))
    }
}
