// ==========================================
// 多渠道采购单跟踪系统 - 快照列模式表
// ==========================================
// 职责: 标准字段 ↔ 快照表头别名的声明式映射
// 红线: 表头匹配不区分大小写与空白;别名解析每批次只做一次,
//       字段读取阶段不再做任何大小写折叠
// ==========================================

use std::collections::HashMap;

// ==========================================
// 标准字段名
// ==========================================
// 用途: HeaderIndex 查询键,行映射器按此取值
pub mod fields {
    // 订单级
    pub const PO_NUMBER: &str = "po_number";
    pub const STATUS: &str = "status";
    pub const CHANNEL: &str = "channel";
    pub const STORE_CODE: &str = "store_code";
    pub const ORDER_DATE: &str = "order_date";
    pub const PO_PDF_URL: &str = "po_pdf_url";
    pub const INVOICE_PDF_URL: &str = "invoice_pdf_url";
    pub const CONTACT_ID: &str = "contact_id";
    pub const CUSTOMER_ID: &str = "customer_id";

    // 行项目级
    pub const ARTICLE_CODE: &str = "article_code";
    pub const MASTER_SKU: &str = "master_sku";
    pub const ITEM_NAME: &str = "item_name";
    pub const ITEM_STATUS: &str = "item_status";
    pub const QTY: &str = "qty";
    pub const FULFILLABLE_QTY: &str = "fulfillable_qty";
    pub const UNIT_COST: &str = "unit_cost";
    pub const MRP: &str = "mrp";

    // 履约系统回写
    pub const EE_REFERENCE_CODE: &str = "ee_reference_code";
    pub const EE_ITEM_STATUS: &str = "ee_item_status";
    pub const EE_ORDER_REF_ID: &str = "ee_order_ref_id";
    pub const EE_BATCH_CREATED_AT: &str = "ee_batch_created_at";
    pub const EE_ITEM_QUANTITY: &str = "ee_item_quantity";
    pub const BOX_COUNT: &str = "box_count";
    pub const INVOICE_NUMBER: &str = "invoice_number";

    // 物流回写
    pub const CARRIER: &str = "carrier";
    pub const AWB: &str = "awb";
    pub const TRACKING_STATUS: &str = "tracking_status";
    pub const MANIFEST_DATE: &str = "manifest_date";
    pub const DELIVERED_DATE: &str = "delivered_date";
    pub const RTO_STATUS: &str = "rto_status";

    // 数量分解
    pub const CANCELLED_QUANTITY: &str = "cancelled_quantity";
    pub const SHIPPED_QUANTITY: &str = "shipped_quantity";
    pub const RETURNED_QUANTITY: &str = "returned_quantity";
}

// ==========================================
// 模式表（数据,不是控制流）
// ==========================================
// 每行: (标准字段, 接受的表头别名列表)
// 别名以标准化形态比较（小写 + 空白压缩）,此处书写原样即可
const SCHEMA: &[(&str, &[&str])] = &[
    // ===== 订单级 =====
    (fields::PO_NUMBER, &["PO Number", "PO No", "PO No."]),
    (fields::STATUS, &["Status", "PO Status"]),
    (fields::CHANNEL, &["Channel Name", "Channel"]),
    (fields::STORE_CODE, &["Store Code", "Facility Code"]),
    (fields::ORDER_DATE, &["Order Date", "PO Date"]),
    (fields::PO_PDF_URL, &["PO PDF", "PO PDF Link"]),
    (fields::INVOICE_PDF_URL, &["Invoice PDF", "Invoice PDF Link"]),
    (fields::CONTACT_ID, &["Contact ID", "Zoho Contact ID"]),
    (fields::CUSTOMER_ID, &["Customer ID", "EE Customer ID"]),
    // ===== 行项目级 =====
    (fields::ARTICLE_CODE, &["Item Code", "Article Code", "SKU"]),
    (fields::MASTER_SKU, &["Master SKU", "MSKU"]),
    (fields::ITEM_NAME, &["Item Name", "Product Name"]),
    (fields::ITEM_STATUS, &["Item Status", "Line Status"]),
    (fields::QTY, &["Qty", "Quantity"]),
    (fields::FULFILLABLE_QTY, &["Fulfillable qty", "Fulfillable Quantity"]),
    (
        fields::UNIT_COST,
        &["Unit Cost (Tax Exclusive)", "Unit Cost", "Cost Price"],
    ),
    (fields::MRP, &["MRP", "M.R.P."]),
    // ===== 履约系统回写 =====
    (fields::EE_REFERENCE_CODE, &["EE_reference_code", "EE Reference Code"]),
    (fields::EE_ITEM_STATUS, &["EE_item_item_status", "EE Item Status"]),
    (fields::EE_ORDER_REF_ID, &["EE Order Ref ID", "EE Order Ref"]),
    (fields::EE_BATCH_CREATED_AT, &["EE Batch Created At", "Batch Created At"]),
    (fields::EE_ITEM_QUANTITY, &["EE Item Quantity", "Item Quantity"]),
    (fields::BOX_COUNT, &["Box Data", "Box Count", "Boxes"]),
    (fields::INVOICE_NUMBER, &["Invoice Number", "Invoice No"]),
    // ===== 物流回写 =====
    (fields::CARRIER, &["Carrier", "Courier"]),
    (fields::AWB, &["AWB", "AWB Number", "Airway Bill"]),
    (fields::TRACKING_STATUS, &["Tracking Status"]),
    (fields::MANIFEST_DATE, &["Manifest Date"]),
    (fields::DELIVERED_DATE, &["Delivered Date", "Delivery Date"]),
    (fields::RTO_STATUS, &["RTO Status"]),
    // ===== 数量分解 =====
    (fields::CANCELLED_QUANTITY, &["Cancelled Quantity", "Cancelled Qty"]),
    (fields::SHIPPED_QUANTITY, &["Shipped Quantity", "Shipped Qty"]),
    (fields::RETURNED_QUANTITY, &["Returned Quantity", "Returned Qty"]),
];

/// 表头标准化（小写 + 空白压缩）
///
/// "PO  Number " 与 "po number" 标准化后相同。
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ==========================================
// HeaderIndex - 批次表头索引
// ==========================================
// 用途: 一批快照行共享一套表头;解析一次后,
//       行映射器按标准字段名 O(1) 取实际列名
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    // 标准字段 → 本批次实际列名（保留原始写法,行映射直接取值）
    index: HashMap<&'static str, String>,
    // 未识别的列（报告用,不参与映射）
    unrecognized: Vec<String>,
}

impl HeaderIndex {
    /// 从一批行的表头解析索引
    ///
    /// # 规则
    /// - 表头与别名均标准化后比较
    /// - 同一标准字段命中多列时先到先得（后续列记入未识别）
    pub fn resolve<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // 别名 → 标准字段,整表构建一次
        let mut alias_map: HashMap<String, &'static str> = HashMap::new();
        for (field, aliases) in SCHEMA {
            for alias in *aliases {
                alias_map.insert(normalize_header(alias), field);
            }
        }

        let mut index: HashMap<&'static str, String> = HashMap::new();
        let mut unrecognized = Vec::new();
        for header in headers {
            match alias_map.get(&normalize_header(header)) {
                Some(field) if !index.contains_key(field) => {
                    index.insert(field, header.to_string());
                }
                _ => unrecognized.push(header.to_string()),
            }
        }

        Self { index, unrecognized }
    }

    /// 读取某行的标准字段值（trim 后;空串视为缺失）
    pub fn get<'r>(&self, row: &'r HashMap<String, String>, field: &str) -> Option<&'r str> {
        self.index
            .get(field)
            .and_then(|col| row.get(col))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 本批次是否识别到该标准字段的列
    pub fn has(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// 识别到的标准字段数
    pub fn resolved_count(&self) -> usize {
        self.index.len()
    }

    /// 未识别的原始列名
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  PO   Number "), "po number");
        assert_eq!(normalize_header("EE_reference_code"), "ee_reference_code");
    }

    #[test]
    fn test_resolve_case_and_space_insensitive() {
        let idx = HeaderIndex::resolve(vec!["po  NUMBER", "qty", "Unit cost (tax exclusive)"]);
        assert!(idx.has(fields::PO_NUMBER));
        assert!(idx.has(fields::QTY));
        assert!(idx.has(fields::UNIT_COST));
        assert!(!idx.has(fields::AWB));
        assert_eq!(idx.resolved_count(), 3);
    }

    #[test]
    fn test_get_returns_trimmed_non_empty() {
        let idx = HeaderIndex::resolve(vec!["PO Number", "Master SKU"]);
        let mut row = HashMap::new();
        row.insert("PO Number".to_string(), "  PO-7 ".to_string());
        row.insert("Master SKU".to_string(), "   ".to_string());

        assert_eq!(idx.get(&row, fields::PO_NUMBER), Some("PO-7"));
        // 纯空白按缺失处理
        assert_eq!(idx.get(&row, fields::MASTER_SKU), None);
    }

    #[test]
    fn test_duplicate_column_first_wins() {
        let idx = HeaderIndex::resolve(vec!["Qty", "Quantity", "Unknown Col"]);
        let mut row = HashMap::new();
        row.insert("Qty".to_string(), "3".to_string());
        row.insert("Quantity".to_string(), "99".to_string());

        assert_eq!(idx.get(&row, fields::QTY), Some("3"));
        // 重复命中列与未知列都记入未识别
        assert_eq!(idx.unrecognized().len(), 2);
    }

    #[test]
    fn test_alias_resolution() {
        let idx = HeaderIndex::resolve(vec!["Courier", "Airway Bill", "Boxes"]);
        let mut row = HashMap::new();
        row.insert("Courier".to_string(), "Delhivery".to_string());
        row.insert("Airway Bill".to_string(), "AWB-1".to_string());
        row.insert("Boxes".to_string(), "4".to_string());

        assert_eq!(idx.get(&row, fields::CARRIER), Some("Delhivery"));
        assert_eq!(idx.get(&row, fields::AWB), Some("AWB-1"));
        assert_eq!(idx.get(&row, fields::BOX_COUNT), Some("4"));
    }
}
