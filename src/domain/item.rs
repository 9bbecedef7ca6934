// ==========================================
// 多渠道采购单跟踪系统 - 行项目领域模型
// ==========================================
// 职责: 采购单行项目（渠道视角 + 履约系统回写字段）
// 红线: 快照只读,派生层不回写任何字段
// ==========================================

use crate::domain::types::normalize_status_text;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// OrderItem - 采购单行项目
// ==========================================
// 用途: 行存储快照一行对应一个行项目,聚合层按 po_number 归组
// 字段来源: 渠道下单字段 + 履约系统（EasyEcom）回写字段 + 物流回写字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItem {
    // ===== 渠道下单字段 =====
    pub article_code: String,  // 渠道物料编码（Item Code,必填）
    pub master_sku: String,    // 主 SKU（库存口径,可为空）
    pub item_name: String,     // 品名
    pub qty: i64,              // 下单数量（计划口径）
    pub fulfillable_qty: i64,  // 可履约数量
    pub unit_cost: f64,        // 不含税单价
    pub mrp: f64,              // 最高零售价（MRP）
    pub item_status: String,   // 行项目工作流状态（自由文本,Cancelled 特权值）

    // ===== 履约系统回写字段 =====
    pub external_reference_code: String, // 履约侧参考码（EE_reference_code,空=未推送）
    pub ee_order_ref_id: String,         // 履约侧订单号（等价推送标记）
    pub external_order_status: String,   // 履约侧行状态（自由文本）
    pub external_batch_created_at: Option<DateTime<Utc>>, // 拣配批次创建时间
    pub item_quantity: i64,              // 履约侧回报数量（0=未回报）
    pub invoice_number: String,          // 发票号
    pub box_count: i64,                  // 箱数（Box Data）

    // ===== 物流回写字段 =====
    pub carrier: String,                 // 承运商
    pub awb: String,                     // 运单号（AWB）
    pub tracking_status: String,         // 物流跟踪状态（自由文本）
    pub manifest_date: Option<NaiveDate>, // 交接清单日期
    pub delivered_date: Option<NaiveDate>, // 妥投日期
    pub rto_status: String,              // 退回状态（RTO,非空=已退回）

    // ===== 数量分解字段 =====
    pub cancelled_quantity: i64, // 已取消数量
    pub shipped_quantity: i64,   // 已发货数量
    pub returned_quantity: i64,  // 已退回数量
}

impl OrderItem {
    /// 行项目是否已取消（状态文本标准化后比较）
    pub fn is_cancelled(&self) -> bool {
        normalize_status_text(&self.item_status) == "cancelled"
    }

    /// 行项目是否已推送到履约系统
    ///
    /// 任一履约侧标识非空即视为已推送（参考码与订单号由不同
    /// 回写路径产生,历史数据可能只有其一）。
    pub fn is_pushed(&self) -> bool {
        !self.external_reference_code.trim().is_empty()
            || !self.ee_order_ref_id.trim().is_empty()
    }

    /// 有效数量: 履约侧回报数量优先,未回报时回退下单数量
    pub fn effective_qty(&self) -> i64 {
        if self.item_quantity > 0 {
            self.item_quantity
        } else {
            self.qty
        }
    }

    /// 行金额（下单口径,含已取消行）
    pub fn line_amount(&self) -> f64 {
        self.qty as f64 * self.unit_cost
    }
}
