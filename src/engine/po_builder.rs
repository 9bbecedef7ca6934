// ==========================================
// 多渠道采购单跟踪系统 - 采购单聚合器
// ==========================================
// 职责: 标准化行记录 → 按 po_number 归组的采购单列表
// 红线: 首见顺序保留;qty/amount 含已取消行;
//       订单级标量首个非空值保留,后来者不覆盖;
//       归组完成后状态一律经规则表重算
// ==========================================

use crate::domain::purchase_order::PurchaseOrder;
use crate::engine::status_rules;
use crate::ingest::row_mapper::OrderRowRecord;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// 订单级标量合并: 首个非空值保留
fn merge_scalar(slot: &mut String, candidate: &str) {
    if slot.trim().is_empty() && !candidate.trim().is_empty() {
        *slot = candidate.to_string();
    }
}

fn merge_date(slot: &mut Option<NaiveDate>, candidate: Option<NaiveDate>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

/// 归组构建采购单
///
/// # 规则
/// - 首行建单（拷贝订单级字段）,后续行并入: 追加行项目,
///   qty += 行数量, amount += 行数量 × 单价（取消行同样累加）
/// - 并入时订单级字段按首个非空值合并
/// - 全部归组后逐单重算展示状态
pub fn build_purchase_orders(records: &[OrderRowRecord]) -> Vec<PurchaseOrder> {
    let mut orders: Vec<PurchaseOrder> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for rec in records {
        // 行映射器已丢弃缺单号的行,这里只防御跳过
        if rec.po_number.trim().is_empty() {
            continue;
        }

        match index.get(&rec.po_number) {
            None => {
                index.insert(rec.po_number.clone(), orders.len());
                orders.push(new_order(rec));
            }
            Some(&pos) => merge_row(&mut orders[pos], rec),
        }
    }

    for po in &mut orders {
        let (status, reasons) = status_rules::resolve_status(&po.raw_status, &po.items);
        po.status = status;
        po.status_reasons = reasons;
    }

    debug!(rows = records.len(), orders = orders.len(), "采购单归组完成");
    orders
}

fn new_order(rec: &OrderRowRecord) -> PurchaseOrder {
    let item = rec.item.clone();
    PurchaseOrder {
        po_number: rec.po_number.clone(),
        channel: rec.channel.clone(),
        store_code: rec.store_code.clone(),
        order_date: rec.order_date,
        po_pdf_url: rec.po_pdf_url.clone(),
        invoice_pdf_url: rec.invoice_pdf_url.clone(),
        external_contact_id: rec.external_contact_id.clone(),
        external_customer_id: rec.external_customer_id.clone(),
        raw_status: rec.raw_status.clone(),
        status: crate::domain::types::PoStatus::NewPo, // 占位,归组后统一重算
        status_reasons: Vec::new(),
        qty: item.qty,
        amount: item.line_amount(),
        items: vec![item],
    }
}

fn merge_row(po: &mut PurchaseOrder, rec: &OrderRowRecord) {
    merge_scalar(&mut po.channel, &rec.channel);
    merge_scalar(&mut po.store_code, &rec.store_code);
    merge_scalar(&mut po.po_pdf_url, &rec.po_pdf_url);
    merge_scalar(&mut po.invoice_pdf_url, &rec.invoice_pdf_url);
    merge_scalar(&mut po.external_contact_id, &rec.external_contact_id);
    merge_scalar(&mut po.external_customer_id, &rec.external_customer_id);
    merge_scalar(&mut po.raw_status, &rec.raw_status);
    merge_date(&mut po.order_date, rec.order_date);

    po.qty += rec.item.qty;
    po.amount += rec.item.line_amount();
    po.items.push(rec.item.clone());
}
