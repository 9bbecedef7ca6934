// ==========================================
// 多渠道采购单跟踪系统 - 核心库
// ==========================================
// 系统定位: 状态派生与聚合引擎（函数式核心 + 命令式外壳）
// 技术栈: Rust + tokio（仅边界） + tracing
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 摄取层 - 快照标准化
pub mod ingest;

// 引擎层 - 派生规则
pub mod engine;

// 配置层 - 渠道参数
pub mod config;

// 远端边界 - 行存储契约
pub mod remote;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PoStatus, SoStatus};

// 领域实体
pub use domain::{
    ActionEligibility, ActionKind, ActionLog, OrderItem, PrimaryAction, PurchaseOrder, SalesOrder,
    ShortfallRecord, StockLevels,
};

// 摄取
pub use ingest::{IngestReport, OrderRowRecord, RowSnapshot};

// 引擎
pub use engine::{DerivationService, DerivedState};

// 配置
pub use config::{ChannelConfig, ChannelRegistry};

// 远端边界
pub use remote::{ActionRequest, ActionResponse, RemoteStore};

// API
pub use api::{ApiError, ApiResult, TrackingApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "多渠道采购单跟踪系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
