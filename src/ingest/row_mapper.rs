// ==========================================
// 多渠道采购单跟踪系统 - 行映射器
// ==========================================
// 职责: 原始快照行（列名→单元格）→ OrderRowRecord
// 红线: 单字段坏值绝不中断批次;数值默认 0,字符串默认空,
//       日期失败为 None,全部坏值进 IngestReport 告警
// ==========================================

use crate::domain::item::OrderItem;
use crate::ingest::parse;
use crate::ingest::schema::{fields, HeaderIndex};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

// ==========================================
// OrderRowRecord - 标准化行记录
// ==========================================
// 用途: 摄取管道中间产物（快照行 → 此结构 → 聚合层归组）
// 生命周期: 仅在一次派生流程内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRowRecord {
    pub row_number: usize, // 快照行号（1 起,不含表头）

    // ===== 订单级字段 =====
    pub po_number: String,
    pub raw_status: String,
    pub channel: String,
    pub store_code: String,
    pub order_date: Option<NaiveDate>,
    pub po_pdf_url: String,
    pub invoice_pdf_url: String,
    pub external_contact_id: String,
    pub external_customer_id: String,

    // ===== 行项目 =====
    pub item: OrderItem,
}

// ==========================================
// IngestWarning / IngestReport - 摄取质量报告
// ==========================================
// 用途: 告警只记录不拦截,上层展示给操作员
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestWarning {
    pub row_number: usize, // 0 = 批次级告警
    pub field: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub total_rows: usize,         // 输入行数
    pub accepted: usize,           // 接受行数
    pub dropped_blank: usize,      // 全空行丢弃数
    pub dropped_missing_po: usize, // 缺采购单号丢弃数
    pub warnings: Vec<IngestWarning>,
    pub unrecognized_columns: Vec<String>, // 未识别的表头
}

impl IngestReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn warn(&mut self, row_number: usize, field: &str, value: &str, message: &str) {
        self.warnings.push(IngestWarning {
            row_number,
            field: field.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        });
    }

    /// 生成简短摘要文本
    pub fn summary_text(&self) -> String {
        format!(
            "总行数{}, 接受{}, 空行{}, 缺单号{}, 告警{}条",
            self.total_rows,
            self.accepted,
            self.dropped_blank,
            self.dropped_missing_po,
            self.warnings.len()
        )
    }
}

// ==========================================
// RowMapper - 行映射器
// ==========================================
// 表头索引随批次构建一次,逐行映射共用
pub struct RowMapper {
    index: HeaderIndex,
}

impl RowMapper {
    pub fn new(index: HeaderIndex) -> Self {
        Self { index }
    }

    /// 映射整个批次
    ///
    /// # 规则
    /// - 全空行丢弃（计数）
    /// - 缺采购单号的行丢弃（计数 + debug 日志,不报错）
    /// - 重复 (po_number, article_code) 组合记告警,行仍接受
    pub fn map_all(&self, rows: &[HashMap<String, String>]) -> (Vec<OrderRowRecord>, IngestReport) {
        let mut report = IngestReport {
            total_rows: rows.len(),
            unrecognized_columns: self.index.unrecognized().to_vec(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(rows.len());
        let mut seen_lines: HashSet<(String, String)> = HashSet::new();

        for (i, row) in rows.iter().enumerate() {
            let row_number = i + 1;

            if row.values().all(|v| v.trim().is_empty()) {
                report.dropped_blank += 1;
                continue;
            }

            let po_number = match self.index.get(row, fields::PO_NUMBER) {
                Some(v) => v.to_string(),
                None => {
                    report.dropped_missing_po += 1;
                    debug!(row_number, "快照行缺采购单号, 丢弃");
                    continue;
                }
            };

            let record = self.map_row(row, row_number, po_number, &mut report);

            if !record.item.article_code.is_empty() {
                let key = (record.po_number.clone(), record.item.article_code.clone());
                if !seen_lines.insert(key) {
                    report.warn(
                        row_number,
                        fields::ARTICLE_CODE,
                        &record.item.article_code,
                        "重复行: 同一采购单下同一物料编码再次出现, 数量将累加",
                    );
                }
            }

            records.push(record);
            report.accepted += 1;
        }

        (records, report)
    }

    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
        po_number: String,
        report: &mut IngestReport,
    ) -> OrderRowRecord {
        let raw_status = self.read_string(row, fields::STATUS);
        // 行项目状态: 专用列优先,缺省沿用该行的工作流状态列
        let item_status = match self.index.get(row, fields::ITEM_STATUS) {
            Some(v) => v.to_string(),
            None => raw_status.clone(),
        };

        let article_code = self.read_string(row, fields::ARTICLE_CODE);
        if article_code.is_empty() {
            report.warn(row_number, fields::ARTICLE_CODE, "", "行项目缺物料编码");
        }

        let item = OrderItem {
            article_code,
            master_sku: self.read_string(row, fields::MASTER_SKU),
            item_name: self.read_string(row, fields::ITEM_NAME),
            qty: self.read_qty(row, fields::QTY, row_number, report),
            fulfillable_qty: self.read_qty(row, fields::FULFILLABLE_QTY, row_number, report),
            unit_cost: self.read_f64(row, fields::UNIT_COST, row_number, report),
            mrp: self.read_f64(row, fields::MRP, row_number, report),
            item_status,
            external_reference_code: self.read_string(row, fields::EE_REFERENCE_CODE),
            ee_order_ref_id: self.read_string(row, fields::EE_ORDER_REF_ID),
            external_order_status: self.read_string(row, fields::EE_ITEM_STATUS),
            external_batch_created_at: self.read_datetime(
                row,
                fields::EE_BATCH_CREATED_AT,
                row_number,
                report,
            ),
            item_quantity: self.read_qty(row, fields::EE_ITEM_QUANTITY, row_number, report),
            invoice_number: self.read_string(row, fields::INVOICE_NUMBER),
            box_count: self.read_qty(row, fields::BOX_COUNT, row_number, report),
            carrier: self.read_string(row, fields::CARRIER),
            awb: self.read_string(row, fields::AWB),
            tracking_status: self.read_string(row, fields::TRACKING_STATUS),
            manifest_date: self.read_date(row, fields::MANIFEST_DATE, row_number, report),
            delivered_date: self.read_date(row, fields::DELIVERED_DATE, row_number, report),
            rto_status: self.read_string(row, fields::RTO_STATUS),
            cancelled_quantity: self.read_qty(row, fields::CANCELLED_QUANTITY, row_number, report),
            shipped_quantity: self.read_qty(row, fields::SHIPPED_QUANTITY, row_number, report),
            returned_quantity: self.read_qty(row, fields::RETURNED_QUANTITY, row_number, report),
        };

        OrderRowRecord {
            row_number,
            po_number,
            raw_status,
            channel: self.read_string(row, fields::CHANNEL),
            store_code: self.read_string(row, fields::STORE_CODE),
            order_date: self.read_date(row, fields::ORDER_DATE, row_number, report),
            po_pdf_url: self.read_string(row, fields::PO_PDF_URL),
            invoice_pdf_url: self.read_string(row, fields::INVOICE_PDF_URL),
            external_contact_id: self.read_string(row, fields::CONTACT_ID),
            external_customer_id: self.read_string(row, fields::CUSTOMER_ID),
            item,
        }
    }

    // ===== 字段读取辅助（默认值 + 告警）=====

    fn read_string(&self, row: &HashMap<String, String>, field: &str) -> String {
        self.index.get(row, field).unwrap_or_default().to_string()
    }

    /// 数量字段: 默认 0,负值钳制为 0
    fn read_qty(
        &self,
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
        report: &mut IngestReport,
    ) -> i64 {
        match self.index.get(row, field) {
            None => 0,
            Some(raw) => match parse::parse_i64(raw) {
                Some(v) if v < 0 => {
                    report.warn(row_number, field, raw, "数量为负, 按 0 处理");
                    0
                }
                Some(v) => v,
                None => {
                    report.warn(row_number, field, raw, "无法解析为整数, 按 0 处理");
                    0
                }
            },
        }
    }

    fn read_f64(
        &self,
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
        report: &mut IngestReport,
    ) -> f64 {
        match self.index.get(row, field) {
            None => 0.0,
            Some(raw) => match parse::parse_f64(raw) {
                Some(v) => v,
                None => {
                    report.warn(row_number, field, raw, "无法解析为数值, 按 0 处理");
                    0.0
                }
            },
        }
    }

    fn read_date(
        &self,
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
        report: &mut IngestReport,
    ) -> Option<NaiveDate> {
        let raw = self.index.get(row, field)?;
        match parse::parse_date(raw) {
            Some(d) => Some(d),
            None => {
                report.warn(row_number, field, raw, "日期格式无法识别, 按未知处理");
                None
            }
        }
    }

    fn read_datetime(
        &self,
        row: &HashMap<String, String>,
        field: &str,
        row_number: usize,
        report: &mut IngestReport,
    ) -> Option<chrono::DateTime<chrono::Utc>> {
        let raw = self.index.get(row, field)?;
        match parse::parse_datetime(raw) {
            Some(dt) => Some(dt),
            None => {
                report.warn(row_number, field, raw, "时间格式无法识别, 按未知处理");
                None
            }
        }
    }
}
