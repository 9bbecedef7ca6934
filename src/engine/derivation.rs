// ==========================================
// 多渠道采购单跟踪系统 - 派生服务
// ==========================================
// 职责: 行快照 + 库存 → 完整派生态（采购单/销售单/缺货）
// 红线: 无 I/O,不改共享态;一次派生只依据一个快照;
//       同指纹输入直接返回缓存克隆,不重算
// ==========================================

use crate::domain::purchase_order::PurchaseOrder;
use crate::domain::sales_order::SalesOrder;
use crate::domain::shortfall::{ShortfallRecord, StockLevels};
use crate::engine::{po_builder, shortfall, so_builder};
use crate::ingest::snapshot::RowSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;
use tracing::{debug, info};

// ==========================================
// DerivedState - 派生态
// ==========================================
// 一次派生的全部输出,整体替换,从不增量修补
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedState {
    pub purchase_orders: Vec<PurchaseOrder>,
    pub sales_orders: Vec<SalesOrder>,
    pub shortfalls: Vec<ShortfallRecord>,
    pub snapshot_id: String,        // 来源快照标识
    pub snapshot_fingerprint: u64,  // 来源快照指纹
    pub derived_at: DateTime<Utc>,  // 派生时刻（缓存命中时保持原值）
}

impl DerivedState {
    pub fn find_po(&self, po_number: &str) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|p| p.po_number == po_number)
    }

    pub fn find_so(&self, reference_code: &str) -> Option<&SalesOrder> {
        self.sales_orders
            .iter()
            .find(|s| s.external_reference_code == reference_code)
    }
}

// ==========================================
// DerivationService - 派生服务
// ==========================================
// 缓存键: (快照指纹, 库存指纹)
pub struct DerivationService {
    cache: Option<(u64, u64, DerivedState)>,
}

impl DerivationService {
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// 全量派生（主入口）
    ///
    /// # 规则
    /// - 快照与库存指纹均未变 → 返回上次结果的克隆
    /// - 任一变化 → 全量重算并更新缓存
    pub fn derive(&mut self, snapshot: &RowSnapshot, stock: &StockLevels) -> DerivedState {
        let snap_fp = snapshot.fingerprint();
        let stock_fp = stock_fingerprint(stock);

        if let Some((cached_snap, cached_stock, state)) = &self.cache {
            if *cached_snap == snap_fp && *cached_stock == stock_fp {
                debug!(fingerprint = snap_fp, "派生缓存命中, 跳过重算");
                return state.clone();
            }
        }

        let started = Instant::now();

        // === 步骤 1: 采购单归组 + 状态重算 ===
        let purchase_orders = po_builder::build_purchase_orders(&snapshot.records);

        // === 步骤 2: 销售单归组 ===
        let sales_orders = so_builder::build_sales_orders(&purchase_orders);

        // === 步骤 3: 缺货分析 ===
        let shortfalls = shortfall::analyze_shortfall(&purchase_orders, stock);

        let state = DerivedState {
            purchase_orders,
            sales_orders,
            shortfalls,
            snapshot_id: snapshot.snapshot_id.clone(),
            snapshot_fingerprint: snap_fp,
            derived_at: Utc::now(),
        };

        info!(
            rows = snapshot.len(),
            purchase_orders = state.purchase_orders.len(),
            sales_orders = state.sales_orders.len(),
            shortfall_skus = state.shortfalls.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "派生完成"
        );

        self.cache = Some((snap_fp, stock_fp, state.clone()));
        state
    }
}

impl Default for DerivationService {
    fn default() -> Self {
        Self::new()
    }
}

// 库存指纹: 按 SKU 排序后哈希,遍历顺序无关
fn stock_fingerprint(stock: &StockLevels) -> u64 {
    let mut entries: Vec<(&String, &i64)> = stock.iter().collect();
    entries.sort();
    let mut hasher = DefaultHasher::new();
    for (sku, qty) in entries {
        sku.hash(&mut hasher);
        qty.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw_row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn snapshot() -> RowSnapshot {
        let rows = vec![
            raw_row(&[
                ("PO Number", "PO-1"),
                ("Status", "New"),
                ("Channel Name", "Blinkit"),
                ("Item Code", "ART-1"),
                ("Master SKU", "SKU-1"),
                ("Qty", "10"),
                ("Unit Cost (Tax Exclusive)", "5"),
                ("EE_reference_code", ""),
            ]),
            raw_row(&[
                ("PO Number", "PO-2"),
                ("Status", "Confirmed"),
                ("Channel Name", "Zepto"),
                ("Item Code", "ART-2"),
                ("Master SKU", "SKU-1"),
                ("Qty", "15"),
                ("Unit Cost (Tax Exclusive)", "4"),
                ("EE_reference_code", "EE-100"),
            ]),
        ];
        RowSnapshot::from_raw_rows(rows).unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let snap = snapshot();
        let mut stock = StockLevels::new();
        stock.insert("SKU-1".to_string(), 4);

        let state = DerivationService::new().derive(&snap, &stock);
        assert_eq!(state.purchase_orders.len(), 2);
        assert_eq!(state.sales_orders.len(), 1);
        // 仅 PO-1 的未推送行计入需求: 10 − 4 = 6
        assert_eq!(state.shortfalls.len(), 1);
        assert_eq!(state.shortfalls[0].shortfall, 6);
        assert_eq!(state.snapshot_id, snap.snapshot_id);
    }

    #[test]
    fn test_memoized_on_same_fingerprints() {
        let snap = snapshot();
        let stock = StockLevels::new();
        let mut service = DerivationService::new();

        let first = service.derive(&snap, &stock);
        let second = service.derive(&snap, &stock);
        // 缓存命中时 derived_at 保持首次值
        assert_eq!(first.derived_at, second.derived_at);
        assert_eq!(first.snapshot_fingerprint, second.snapshot_fingerprint);
    }

    #[test]
    fn test_stock_change_invalidates_cache() {
        let snap = snapshot();
        let mut service = DerivationService::new();

        let first = service.derive(&snap, &StockLevels::new());
        let mut stock = StockLevels::new();
        stock.insert("SKU-1".to_string(), 100);
        let second = service.derive(&snap, &stock);

        assert_ne!(first.derived_at, second.derived_at);
        // 库存充足后缺货清空
        assert!(second.shortfalls.is_empty());
    }

    #[test]
    fn test_stock_fingerprint_order_independent() {
        let mut a = StockLevels::new();
        a.insert("SKU-1".to_string(), 1);
        a.insert("SKU-2".to_string(), 2);
        let mut b = StockLevels::new();
        b.insert("SKU-2".to_string(), 2);
        b.insert("SKU-1".to_string(), 1);
        assert_eq!(stock_fingerprint(&a), stock_fingerprint(&b));
    }
}
