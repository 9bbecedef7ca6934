// ==========================================
// 多渠道采购单跟踪系统 - 摄取模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 单字段解析失败永不报错（默认值 + 告警）,
//       此处只收录文件级/批次级失败
// ==========================================

use thiserror::Error;

/// 摄取模块错误类型
#[derive(Error, Debug)]
pub enum IngestError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 批次级错误 =====
    #[error("表头无法识别: 没有任何列能对应到已知字段（前3列: {0}）")]
    HeaderUnrecognized(String),

    #[error("快照为空: 没有表头行")]
    EmptySnapshot,

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type IngestResult<T> = Result<T, IngestError>;
