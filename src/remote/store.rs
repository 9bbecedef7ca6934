// ==========================================
// 多渠道采购单跟踪系统 - 远端行存储契约
// ==========================================
// 职责: 行存储读写的 async trait 与远端错误类型
// 红线: fetch_rows 返回一次完整读取的行集（同一时点),
//       submit 只提交一次;重试/超时由调用方负责
// ==========================================

use crate::remote::payload::{ActionRequest, ActionResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// 远端边界错误类型
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("网络错误: {0}")]
    Network(String),

    #[error("远端应答无法解析: {0}")]
    Protocol(String),

    #[error("该行存储不支持动作提交: {0}")]
    ReadOnly(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type RemoteResult<T> = Result<T, RemoteError>;

// ==========================================
// RemoteStore - 远端行存储
// ==========================================
// 实现方: 生产环境为电子表格后端服务的 HTTP 客户端,
// 测试/离线为 CSV 导出或内存桩
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// 拉取全量快照行（一次读取 = 一个一致时点）
    async fn fetch_rows(&self) -> RemoteResult<Vec<HashMap<String, String>>>;

    /// 提交一个动作请求,返回远端应答
    ///
    /// 远端受理失败（status = "error"）不算 Err;
    /// Err 只表示网络/协议层面失败。
    async fn submit(&self, request: &ActionRequest) -> RemoteResult<ActionResponse>;
}
