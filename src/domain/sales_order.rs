// ==========================================
// 多渠道采购单跟踪系统 - 销售单领域模型
// ==========================================
// 职责: 履约侧销售单视图（按 EE_reference_code 归组的只读聚合）
// 红线: 销售单不落库不缓存,每次读取由当前快照重算
// ==========================================

use crate::domain::types::SoStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SalesOrder - 销售单聚合视图
// ==========================================
// 用途: 跟踪页展示;一个履约参考码可横跨多张采购单
// 生成: engine::so_builder 扫描全部采购单行项目归组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    // ===== 主键 =====
    pub external_reference_code: String, // 履约侧参考码（归组键）

    // ===== 溯源 =====
    pub po_reference: String, // 贡献采购单号（去重,按首次贡献顺序逗号连接）

    // ===== 订单级字段（首个非空值保留）=====
    pub channel: String,    // 渠道名
    pub store_code: String, // 门店/仓库编码

    // ===== 聚合指标 =====
    pub qty: i64,        // 有效数量合计（履约回报优先）
    pub amount: f64,     // 金额合计（Σ 有效数量 × unit_cost）
    pub box_count: i64,  // 箱数合计（跨行累加）
    pub item_count: usize, // 行项目数

    // ===== 管线状态（组内最高等级）=====
    pub status: SoStatus,

    // ===== 履约里程碑（首个非空值保留）=====
    pub carrier: String,                       // 承运商
    pub awb: String,                           // 运单号
    pub invoice_number: String,                // 发票号
    pub batch_created_at: Option<DateTime<Utc>>, // 拣配批次创建时间
    pub manifest_date: Option<NaiveDate>,      // 交接清单日期
    pub delivered_date: Option<NaiveDate>,     // 妥投日期

    // ===== 对账标记 =====
    pub has_qty_mismatch: bool, // 组内存在下单量与履约回报量不一致的行
}
