// ==========================================
// 多渠道采购单跟踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、状态枚举、业务规则接口
// 红线: 不含快照访问逻辑,不含派生引擎逻辑
// ==========================================

pub mod action;
pub mod item;
pub mod purchase_order;
pub mod sales_order;
pub mod shortfall;
pub mod types;

// 重导出核心类型
pub use action::{ActionEligibility, ActionKind, ActionLog, PrimaryAction};
pub use item::OrderItem;
pub use purchase_order::PurchaseOrder;
pub use sales_order::SalesOrder;
pub use shortfall::{ShortfallRecord, StockLevels};
pub use types::{normalize_status_text, PoStatus, SoStatus};
