// ==========================================
// 多渠道采购单跟踪系统 - API 层
// ==========================================
// 职责: 读取-派生-动作的业务接口,供展示层调用
// ==========================================

pub mod error;
pub mod tracking_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use tracking_api::TrackingApi;
