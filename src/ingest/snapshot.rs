// ==========================================
// 多渠道采购单跟踪系统 - 行快照
// ==========================================
// 职责: 一次读取的全部标准化行 + 指纹,派生层的唯一输入单元
// 红线: 快照构建后不可变;一次派生只依据一个快照,
//       不同时点的行混用由此结构从形态上杜绝
// ==========================================

use crate::ingest::error::{IngestError, IngestResult};
use crate::ingest::row_mapper::{IngestReport, OrderRowRecord, RowMapper};
use crate::ingest::schema::HeaderIndex;
use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::info;
use uuid::Uuid;

// ==========================================
// RowSnapshot - 标准化行快照
// ==========================================
// 指纹对标准化行序列计算,行不变则指纹不变（派生层据此去重）
#[derive(Debug, Clone)]
pub struct RowSnapshot {
    pub snapshot_id: String,        // 快照标识（UUID）
    pub fetched_at: DateTime<Utc>,  // 读取时间
    pub records: Vec<OrderRowRecord>,
    pub report: IngestReport,
    fingerprint: u64,
}

impl RowSnapshot {
    /// 从原始行构建快照（表头解析一次 + 逐行映射 + 指纹）
    ///
    /// # 规则
    /// - 空行集构建出空快照（合法,派生结果为空态）
    /// - 非空但没有任何列能识别时报 HeaderUnrecognized
    pub fn from_raw_rows(rows: Vec<HashMap<String, String>>) -> IngestResult<Self> {
        let (records, report) = if rows.is_empty() {
            (Vec::new(), IngestReport::default())
        } else {
            let headers: Vec<&str> = rows[0].keys().map(|k| k.as_str()).collect();
            let index = HeaderIndex::resolve(headers);
            if index.resolved_count() == 0 {
                let sample = rows[0]
                    .keys()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(IngestError::HeaderUnrecognized(sample));
            }
            RowMapper::new(index).map_all(&rows)
        };

        let snapshot = Self {
            snapshot_id: Uuid::new_v4().to_string(),
            fetched_at: Utc::now(),
            fingerprint: compute_fingerprint(&records),
            records,
            report,
        };
        info!(
            snapshot_id = %snapshot.snapshot_id,
            "快照标准化完成: {}",
            snapshot.report.summary_text()
        );
        Ok(snapshot)
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 行序列指纹（序列化字节哈希,行序敏感）
fn compute_fingerprint(records: &[OrderRowRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();
    match serde_json::to_vec(records) {
        Ok(bytes) => bytes.hash(&mut hasher),
        // 纯数据结构序列化不应失败;兜底只哈希行数
        Err(_) => records.len().hash(&mut hasher),
    }
    hasher.finish()
}
