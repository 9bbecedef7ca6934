// ==========================================
// 多渠道采购单跟踪系统 - 摄取层
// ==========================================
// 职责: 远端快照行的标准化（表头解析、类型转换、质量报告）
// 红线: 纯转换,无 I/O;单字段坏值永不中断批次
// ==========================================

// 模块声明
pub mod error;
pub mod parse;
pub mod row_mapper;
pub mod schema;
pub mod snapshot;

// 重导出核心类型
pub use error::{IngestError, IngestResult};
pub use row_mapper::{IngestReport, IngestWarning, OrderRowRecord, RowMapper};
pub use schema::{normalize_header, HeaderIndex};
pub use snapshot::RowSnapshot;
