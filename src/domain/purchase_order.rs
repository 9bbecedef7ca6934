// ==========================================
// 多渠道采购单跟踪系统 - 采购单领域模型
// ==========================================
// 职责: 采购单聚合根（行项目归组结果 + 重算后状态）
// 红线: 采购单永不删除,取消仅是状态;status 由规则表重算,
//       raw_status 只作输入信号保留
// ==========================================

use crate::domain::item::OrderItem;
use crate::domain::types::PoStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PurchaseOrder - 采购单聚合
// ==========================================
// 用途: 聚合层输出,API 层只读展示与动作判定输入
// 生成: engine::po_builder 按 po_number 归组行记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    // ===== 主键 =====
    pub po_number: String, // 采购单号（渠道侧唯一）

    // ===== 订单级字段（首个非空值保留）=====
    pub channel: String,               // 渠道名（Channel Name）
    pub store_code: String,            // 门店/仓库编码
    pub order_date: Option<NaiveDate>, // 下单日期
    pub po_pdf_url: String,            // 采购单 PDF 链接
    pub invoice_pdf_url: String,       // 发票 PDF 链接
    pub external_contact_id: String,   // 开票系统联系人关联（空=未同步）
    pub external_customer_id: String,  // 履约系统客户关联（空=未映射）

    // ===== 状态 =====
    pub raw_status: String,           // 上游工作流状态原文（输入信号）
    pub status: PoStatus,             // 重算后展示状态
    pub status_reasons: Vec<String>,  // 状态判定理由（命中规则描述）

    // ===== 聚合指标（含已取消行）=====
    pub qty: i64,    // 总下单数量
    pub amount: f64, // 总金额（Σ qty × unit_cost）

    // ===== 行项目（保持快照行序）=====
    pub items: Vec<OrderItem>,
}

impl PurchaseOrder {
    /// 活跃行项目（未取消）
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|it| !it.is_cancelled())
    }

    /// 活跃数量（已取消行不计）
    pub fn active_qty(&self) -> i64 {
        self.active_items().map(|it| it.qty).sum()
    }

    /// 是否已同步开票系统联系人
    pub fn has_contact_linkage(&self) -> bool {
        !self.external_contact_id.trim().is_empty()
    }

    /// 是否已映射履约系统客户
    pub fn has_customer_linkage(&self) -> bool {
        !self.external_customer_id.trim().is_empty()
    }
}
