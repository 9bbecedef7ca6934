// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 快照标准化 → 采购单/销售单归组 → 缺货分析的全链路验证
// 场景: 混合状态行集、跨单归组、输入乱序、缓存命中
// ==========================================

mod helpers;

use channel_po_tracking::domain::shortfall::StockLevels;
use channel_po_tracking::domain::types::{PoStatus, SoStatus};
use channel_po_tracking::engine::DerivationService;
use helpers::test_data_builder::{snapshot_of, stock_of, RowBuilder};

#[test]
fn test_mixed_status_po_resolution() {
    // 取消行被排除在推送完成度检查之外
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").qty(10),
        RowBuilder::new("PO-1", "ART-2").qty(5).item_status("Cancelled"),
    ]);
    let state = DerivationService::new().derive(&snapshot, &StockLevels::new());

    let po = state.find_po("PO-1").unwrap();
    assert_eq!(po.status, PoStatus::NewPo);
    assert_eq!(po.qty, 15);
    assert_eq!(po.active_qty(), 10);
}

#[test]
fn test_fully_pushed_beats_confirmed_text() {
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").status("Confirmed").pushed("EE-1"),
        RowBuilder::new("PO-1", "ART-2").status("Confirmed").pushed("EE-2"),
    ]);
    let state = DerivationService::new().derive(&snapshot, &StockLevels::new());

    // 规则 3（推送完成）先于规则 5（Confirmed 文本）
    assert_eq!(state.find_po("PO-1").unwrap().status, PoStatus::Pushed);
}

#[test]
fn test_partial_push_across_items() {
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").pushed("EE-1"),
        RowBuilder::new("PO-1", "ART-2"),
    ]);
    let state = DerivationService::new().derive(&snapshot, &StockLevels::new());
    assert_eq!(
        state.find_po("PO-1").unwrap().status,
        PoStatus::PartiallyProcessed
    );
}

#[test]
fn test_sales_order_spans_purchase_orders() {
    // EE-100 横跨 PO-1(Confirmed 级) 与 PO-2(Shipped 级)
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1")
            .status("Confirmed")
            .pushed("EE-100")
            .set("EE_item_item_status", "Confirmed"),
        RowBuilder::new("PO-2", "ART-2")
            .status("Confirmed")
            .pushed("EE-100")
            .tracking("Shipped"),
    ]);
    let state = DerivationService::new().derive(&snapshot, &StockLevels::new());

    assert_eq!(state.sales_orders.len(), 1);
    let so = state.find_so("EE-100").unwrap();
    assert_eq!(so.po_reference, "PO-1, PO-2");
    // 组状态取最高等级: SHIPPED(7) > CONFIRMED(2)
    assert_eq!(so.status, SoStatus::Shipped);
}

#[test]
fn test_sales_order_rank_monotonic_under_merge_order() {
    // 低等级行后并入不回退组状态
    let forward = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").pushed("EE-1").awb("AWB-9"),
        RowBuilder::new("PO-1", "ART-2").pushed("EE-1"),
    ]);
    let backward = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-2").pushed("EE-1"),
        RowBuilder::new("PO-1", "ART-1").pushed("EE-1").awb("AWB-9"),
    ]);

    let mut service = DerivationService::new();
    let a = service.derive(&forward, &StockLevels::new());
    let b = DerivationService::new().derive(&backward, &StockLevels::new());
    assert_eq!(a.find_so("EE-1").unwrap().status, SoStatus::LabelGenerated);
    assert_eq!(b.find_so("EE-1").unwrap().status, SoStatus::LabelGenerated);
}

#[test]
fn test_shortfall_cross_channel_scenario() {
    // SKU-1 两渠道未推送需求 10 + 15,库存 12 → 缺口 13
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").master_sku("SKU-1").qty(10).channel("Blinkit"),
        RowBuilder::new("PO-2", "ART-2").master_sku("SKU-1").qty(15).channel("Zepto"),
    ]);
    let state =
        DerivationService::new().derive(&snapshot, &stock_of(&[("SKU-1", 12)]));

    assert_eq!(state.shortfalls.len(), 1);
    let rec = &state.shortfalls[0];
    assert_eq!(rec.total_required, 25);
    assert_eq!(rec.shortfall, 13);
    assert_eq!(rec.channel_demand.len(), 2);
    assert_eq!(rec.channel_demand["Blinkit"], 10);
    assert_eq!(rec.channel_demand["Zepto"], 15);
}

#[test]
fn test_pushed_demand_not_counted() {
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").master_sku("SKU-1").qty(10).pushed("EE-1"),
        RowBuilder::new("PO-2", "ART-2").master_sku("SKU-1").qty(4),
    ]);
    let state = DerivationService::new().derive(&snapshot, &StockLevels::new());
    assert_eq!(state.shortfalls[0].total_required, 4);
}

#[test]
fn test_input_permutation_invariance() {
    let rows = vec![
        RowBuilder::new("PO-1", "ART-1").qty(5).unit_cost(2.0),
        RowBuilder::new("PO-2", "ART-2").qty(7).unit_cost(3.0).pushed("EE-1"),
        RowBuilder::new("PO-1", "ART-3").qty(3).unit_cost(4.0),
    ];
    let mut reversed = rows.clone();
    reversed.reverse();

    let a = DerivationService::new().derive(&snapshot_of(rows), &StockLevels::new());
    let b = DerivationService::new().derive(&snapshot_of(reversed), &StockLevels::new());

    for po_number in ["PO-1", "PO-2"] {
        let pa = a.find_po(po_number).unwrap();
        let pb = b.find_po(po_number).unwrap();
        assert_eq!(pa.qty, pb.qty);
        assert!((pa.amount - pb.amount).abs() < 1e-9);
        assert_eq!(pa.status, pb.status);
    }
}

#[test]
fn test_derivation_idempotent_and_cached() {
    let snapshot = snapshot_of(vec![RowBuilder::new("PO-1", "ART-1")]);
    let stock = StockLevels::new();
    let mut service = DerivationService::new();

    let first = service.derive(&snapshot, &stock);
    let second = service.derive(&snapshot, &stock);
    // 同指纹直接复用上次结果
    assert_eq!(first.derived_at, second.derived_at);
    assert_eq!(
        first.purchase_orders[0].status,
        second.purchase_orders[0].status
    );
}

#[test]
fn test_box_data_pending_group() {
    // 已开票但箱数未回传 → BOX_DATA_PENDING;箱数回传后 → INVOICED
    let pending = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").pushed("EE-1").invoice("INV-1"),
    ]);
    let state = DerivationService::new().derive(&pending, &StockLevels::new());
    assert_eq!(state.find_so("EE-1").unwrap().status, SoStatus::BoxDataPending);

    let boxed = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").pushed("EE-1").invoice("INV-1").boxes(3),
    ]);
    let state = DerivationService::new().derive(&boxed, &StockLevels::new());
    let so = state.find_so("EE-1").unwrap();
    assert_eq!(so.status, SoStatus::Invoiced);
    assert_eq!(so.box_count, 3);
}

#[test]
fn test_all_items_cancelled_po_is_cancelled() {
    let snapshot = snapshot_of(vec![
        RowBuilder::new("PO-1", "ART-1").item_status("Cancelled"),
        RowBuilder::new("PO-1", "ART-2").item_status("CANCELLED"),
    ]);
    let state = DerivationService::new().derive(&snapshot, &StockLevels::new());
    // 原始状态仍是 New,但活跃行为零 → CANCELLED
    assert_eq!(state.find_po("PO-1").unwrap().status, PoStatus::Cancelled);
    // 取消单不贡献缺货需求
    assert!(state.shortfalls.is_empty());
}
