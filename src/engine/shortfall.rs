// ==========================================
// 多渠道采购单跟踪系统 - 缺货分析器
// ==========================================
// 职责: 未推送需求按主 SKU 汇总,与库存对比产出缺口
// 红线: 库存无记录按 0 处理,绝不报错;
//       缺口非负;缺口为 0 不产出
// ==========================================

use crate::domain::purchase_order::PurchaseOrder;
use crate::domain::shortfall::{ShortfallRecord, StockLevels};
use crate::domain::types::normalize_status_text;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

// 需求口径: 行项目状态为新建/已确认,未取消,且尚未推送
fn counts_as_demand(status: &str) -> bool {
    matches!(normalize_status_text(status).as_str(), "new" | "confirmed")
}

struct DemandAcc {
    total_required: i64,
    channel_demand: BTreeMap<String, i64>,
}

/// 缺货分析
///
/// # 规则
/// - demand[master_sku] += qty,同时按渠道细分
/// - 缺主 SKU 的行无法对库存,跳过（trace 日志）
/// - shortfall = max(0, 需求 − 库存);仅产出 shortfall > 0
/// - 输出按缺口降序,同缺口按 SKU 升序（结果可复现）
pub fn analyze_shortfall(orders: &[PurchaseOrder], stock: &StockLevels) -> Vec<ShortfallRecord> {
    let mut demand: HashMap<String, DemandAcc> = HashMap::new();

    for po in orders {
        for item in &po.items {
            if !counts_as_demand(&item.item_status) || item.is_cancelled() || item.is_pushed() {
                continue;
            }
            let sku = item.master_sku.trim();
            if sku.is_empty() {
                trace!(
                    po_number = %po.po_number,
                    article_code = %item.article_code,
                    "行项目缺主 SKU, 不计入缺货需求"
                );
                continue;
            }

            let acc = demand.entry(sku.to_string()).or_insert_with(|| DemandAcc {
                total_required: 0,
                channel_demand: BTreeMap::new(),
            });
            acc.total_required += item.qty;
            *acc.channel_demand.entry(po.channel.clone()).or_insert(0) += item.qty;
        }
    }

    let mut records: Vec<ShortfallRecord> = demand
        .into_iter()
        .filter_map(|(sku, acc)| {
            let on_hand = stock.get(&sku).copied().unwrap_or(0);
            let shortfall = (acc.total_required - on_hand).max(0);
            (shortfall > 0).then(|| ShortfallRecord {
                master_sku: sku,
                total_required: acc.total_required,
                channel_demand: acc.channel_demand,
                stock: on_hand,
                shortfall,
            })
        })
        .collect();

    records.sort_by(|a, b| {
        b.shortfall
            .cmp(&a.shortfall)
            .then_with(|| a.master_sku.cmp(&b.master_sku))
    });

    debug!(skus = records.len(), "缺货分析完成");
    records
}
