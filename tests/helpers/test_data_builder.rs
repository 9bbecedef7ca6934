// ==========================================
// 测试数据构建器
// ==========================================
// 职责: 快照原始行/库存表的链式构建,集成测试共用
// ==========================================

#![allow(dead_code)]

use channel_po_tracking::domain::shortfall::StockLevels;
use channel_po_tracking::ingest::snapshot::RowSnapshot;
use std::collections::HashMap;

/// 单行构建器: 以合法默认值起步,按需覆盖
#[derive(Clone)]
pub struct RowBuilder {
    cells: HashMap<String, String>,
}

impl RowBuilder {
    pub fn new(po_number: &str, article_code: &str) -> Self {
        let mut cells = HashMap::new();
        cells.insert("PO Number".to_string(), po_number.to_string());
        cells.insert("Status".to_string(), "New".to_string());
        cells.insert("Channel Name".to_string(), "Blinkit".to_string());
        cells.insert("Store Code".to_string(), "BLR-01".to_string());
        cells.insert("Item Code".to_string(), article_code.to_string());
        cells.insert("Master SKU".to_string(), format!("SKU-{}", article_code));
        cells.insert("Qty".to_string(), "10".to_string());
        cells.insert("Unit Cost (Tax Exclusive)".to_string(), "20".to_string());
        cells.insert("EE_reference_code".to_string(), String::new());
        cells.insert("Contact ID".to_string(), "ZC-1".to_string());
        cells.insert("Customer ID".to_string(), "CU-1".to_string());
        // 可选列整批声明在表头里,值默认空（表头按首行解析）
        for optional in [
            "Item Status",
            "EE_item_item_status",
            "EE Order Ref ID",
            "EE Item Quantity",
            "Invoice Number",
            "Box Data",
            "Carrier",
            "AWB",
            "Tracking Status",
            "Manifest Date",
            "Delivered Date",
            "RTO Status",
        ] {
            cells.insert(optional.to_string(), String::new());
        }
        Self { cells }
    }

    pub fn set(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_string(), value.to_string());
        self
    }

    pub fn status(self, status: &str) -> Self {
        self.set("Status", status)
    }

    pub fn channel(self, channel: &str) -> Self {
        self.set("Channel Name", channel)
    }

    pub fn qty(self, qty: i64) -> Self {
        self.set("Qty", &qty.to_string())
    }

    pub fn unit_cost(self, cost: f64) -> Self {
        self.set("Unit Cost (Tax Exclusive)", &cost.to_string())
    }

    pub fn master_sku(self, sku: &str) -> Self {
        self.set("Master SKU", sku)
    }

    pub fn item_status(self, status: &str) -> Self {
        self.set("Item Status", status)
    }

    pub fn pushed(self, reference_code: &str) -> Self {
        self.set("EE_reference_code", reference_code)
    }

    pub fn invoice(self, number: &str) -> Self {
        self.set("Invoice Number", number)
    }

    pub fn boxes(self, count: i64) -> Self {
        self.set("Box Data", &count.to_string())
    }

    pub fn awb(self, awb: &str) -> Self {
        self.set("AWB", awb)
    }

    pub fn tracking(self, status: &str) -> Self {
        self.set("Tracking Status", status)
    }

    pub fn no_linkage(self) -> Self {
        self.set("Contact ID", "").set("Customer ID", "")
    }

    pub fn build(self) -> HashMap<String, String> {
        self.cells
    }
}

/// 行集 → 快照（表头由首行键集合给出）
pub fn snapshot_of(rows: Vec<RowBuilder>) -> RowSnapshot {
    let raw: Vec<HashMap<String, String>> = rows.into_iter().map(RowBuilder::build).collect();
    RowSnapshot::from_raw_rows(raw).expect("测试行集必须可标准化")
}

/// 库存表构建
pub fn stock_of(entries: &[(&str, i64)]) -> StockLevels {
    entries
        .iter()
        .map(|(sku, qty)| (sku.to_string(), *qty))
        .collect()
}
