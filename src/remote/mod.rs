// ==========================================
// 多渠道采购单跟踪系统 - 远端边界层
// ==========================================
// 职责: 远端行存储的读写契约（拉取快照行、提交动作载荷）
// 红线: 核心从不自动重试;挂起只发生在此边界;
//       提交一次即返回,超时/重试策略归调用方
// ==========================================

// 模块声明
pub mod csv_source;
pub mod payload;
pub mod store;

// 重导出核心类型
pub use csv_source::CsvRowSource;
pub use payload::{ActionRequest, ActionResponse, PushItemPayload};
pub use store::{RemoteError, RemoteResult, RemoteStore};
