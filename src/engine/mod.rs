// ==========================================
// 多渠道采购单跟踪系统 - 派生引擎层
// ==========================================
// 职责: 状态规则、聚合、可用性判定、缺货分析的纯逻辑
// 红线: 无状态持久化、无 I/O;同一快照输入必得同一输出
// ==========================================

// 模块声明
pub mod derivation;
pub mod eligibility;
pub mod po_builder;
pub mod shortfall;
pub mod so_builder;
pub mod so_status;
pub mod status_rules;

// 重导出核心入口
pub use derivation::{DerivationService, DerivedState};
pub use po_builder::build_purchase_orders;
pub use shortfall::analyze_shortfall;
pub use so_builder::build_sales_orders;
pub use so_status::item_pipeline_status;
pub use status_rules::{resolve_status, ItemProfile};
