// ==========================================
// 多渠道采购单跟踪系统 - 销售单聚合器
// ==========================================
// 职责: 全部采购单行项目 → 按履约参考码归组的销售单列表
// 红线: 一个参考码可横跨多张采购单;组状态取组内最高等级,
//       并入新行只升不降;箱数跨行累加,永不覆盖
// ==========================================

use crate::domain::item::OrderItem;
use crate::domain::purchase_order::PurchaseOrder;
use crate::domain::sales_order::SalesOrder;
use crate::domain::types::SoStatus;
use crate::engine::so_status;
use std::collections::HashMap;
use tracing::debug;

// 组内累加器: po_reference 需要去重且保持首次贡献顺序,
// 收尾时才拼接成串
struct SoAccumulator {
    so: SalesOrder,
    po_refs: Vec<String>,
}

impl SoAccumulator {
    fn new(reference_code: &str) -> Self {
        Self {
            so: SalesOrder {
                external_reference_code: reference_code.to_string(),
                po_reference: String::new(),
                channel: String::new(),
                store_code: String::new(),
                qty: 0,
                amount: 0.0,
                box_count: 0,
                item_count: 0,
                status: SoStatus::Processing,
                carrier: String::new(),
                awb: String::new(),
                invoice_number: String::new(),
                batch_created_at: None,
                manifest_date: None,
                delivered_date: None,
                has_qty_mismatch: false,
            },
            po_refs: Vec::new(),
        }
    }

    fn merge(&mut self, po: &PurchaseOrder, item: &OrderItem) {
        let so = &mut self.so;

        let effective = item.effective_qty();
        so.qty += effective;
        so.amount += effective as f64 * item.unit_cost;
        so.box_count += item.box_count;
        so.item_count += 1;

        // 组状态只升不降
        so.status = so.status.max(so_status::item_pipeline_status(item));

        merge_scalar(&mut so.channel, &po.channel);
        merge_scalar(&mut so.store_code, &po.store_code);
        merge_scalar(&mut so.carrier, &item.carrier);
        merge_scalar(&mut so.awb, &item.awb);
        merge_scalar(&mut so.invoice_number, &item.invoice_number);
        if so.batch_created_at.is_none() {
            so.batch_created_at = item.external_batch_created_at;
        }
        if so.manifest_date.is_none() {
            so.manifest_date = item.manifest_date;
        }
        if so.delivered_date.is_none() {
            so.delivered_date = item.delivered_date;
        }

        // 下单量与履约回报量都非零且不一致时标记,供人工对账
        if item.qty > 0 && item.item_quantity > 0 && item.qty != item.item_quantity {
            so.has_qty_mismatch = true;
        }

        if !self.po_refs.iter().any(|p| p == &po.po_number) {
            self.po_refs.push(po.po_number.clone());
        }
    }

    fn finish(mut self) -> SalesOrder {
        self.so.po_reference = self.po_refs.join(", ");
        self.so
    }
}

fn merge_scalar(slot: &mut String, candidate: &str) {
    if slot.trim().is_empty() && !candidate.trim().is_empty() {
        *slot = candidate.to_string();
    }
}

/// 归组构建销售单
///
/// # 规则
/// - 仅收录履约参考码非空的行项目,按参考码归组
/// - qty/amount 用有效数量（履约回报优先,回退下单量）
/// - 组首见顺序即输出顺序
pub fn build_sales_orders(orders: &[PurchaseOrder]) -> Vec<SalesOrder> {
    let mut groups: Vec<SoAccumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for po in orders {
        for item in &po.items {
            let code = item.external_reference_code.trim();
            if code.is_empty() {
                continue;
            }
            let pos = match index.get(code) {
                Some(&pos) => pos,
                None => {
                    index.insert(code.to_string(), groups.len());
                    groups.push(SoAccumulator::new(code));
                    groups.len() - 1
                }
            };
            groups[pos].merge(po, item);
        }
    }

    let sales_orders: Vec<SalesOrder> = groups.into_iter().map(SoAccumulator::finish).collect();
    debug!(groups = sales_orders.len(), "销售单归组完成");
    sales_orders
}
