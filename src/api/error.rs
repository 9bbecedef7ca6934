// ==========================================
// 多渠道采购单跟踪系统 - API层错误类型
// ==========================================
// 职责: 面向调用方的错误类型,下层错误在此转换为可解释消息
// 红线: 动作被拒必须带原因;远端失败原样转述,核心不重试;
//       本子系统没有任何错误会中止进程
// ==========================================

use crate::ingest::error::IngestError;
use crate::remote::store::RemoteError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入/查找错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("尚未刷新: 还没有任何派生态, 先调用 refresh")]
    NotRefreshed,

    // ==========================================
    // 动作判定错误
    // ==========================================
    #[error("动作不可用: po={po_number}, action={action}, 原因: {reason}")]
    ActionNotEligible {
        po_number: String,
        action: String,
        reason: String,
    },

    #[error("关联缺失: po={po_number}, 缺少{kind}")]
    MissingLinkage { po_number: String, kind: String },

    // ==========================================
    // 边界错误
    // ==========================================
    #[error("快照摄取失败: {0}")]
    IngestFailure(String),

    #[error("远端失败: {0}")]
    RemoteFailure(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 远端错误转述给调用方,重试与否由调用方决定
impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        ApiError::RemoteFailure(err.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        ApiError::IngestFailure(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
