// ==========================================
// 多渠道采购单跟踪系统 - 跟踪 API
// ==========================================
// 职责: 读取-派生-动作的命令式外壳;派生核心保持纯函数
// 红线: 动作提交前必须过可用性判定;每次提交记一条审计日志;
//       提交只发一次,远端受理失败原样转述,核心不重试
// ==========================================

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::channel_config::ChannelRegistry;
use crate::domain::action::{ActionEligibility, ActionKind, ActionLog};
use crate::domain::purchase_order::PurchaseOrder;
use crate::domain::sales_order::SalesOrder;
use crate::domain::shortfall::{ShortfallRecord, StockLevels};
use crate::domain::types::PoStatus;
use crate::engine::derivation::{DerivationService, DerivedState};
use crate::engine::eligibility;
use crate::ingest::row_mapper::IngestReport;
use crate::ingest::snapshot::RowSnapshot;
use crate::remote::payload::{ActionRequest, ActionResponse, PushItemPayload};
use crate::remote::store::RemoteStore;

// 内部可变态: 快照/库存/派生态/审计日志,一把锁整体保护
struct Inner {
    service: DerivationService,
    snapshot: Option<RowSnapshot>,
    stock: StockLevels,
    state: Option<DerivedState>,
    action_logs: Vec<ActionLog>,
}

// ==========================================
// TrackingApi - 跟踪 API
// ==========================================
// 泛型于远端行存储实现,测试可注入内存桩
pub struct TrackingApi<S: RemoteStore> {
    store: Arc<S>,
    channels: ChannelRegistry,
    inner: Mutex<Inner>,
}

impl<S: RemoteStore> TrackingApi<S> {
    pub fn new(store: Arc<S>, channels: ChannelRegistry) -> Self {
        Self {
            store,
            channels,
            inner: Mutex::new(Inner {
                service: DerivationService::new(),
                snapshot: None,
                stock: StockLevels::new(),
                state: None,
                action_logs: Vec::new(),
            }),
        }
    }

    // ==========================================
    // 刷新与查询
    // ==========================================

    /// 刷新: 拉取全量快照行 → 标准化 → 派生
    ///
    /// 一次刷新只依据一次完整读取;动作提交后派生态会过时,
    /// 由调用方择机再刷新自纠。
    pub async fn refresh(&self) -> ApiResult<IngestReport> {
        let rows = self.store.fetch_rows().await?;
        let snapshot = RowSnapshot::from_raw_rows(rows)?;
        let report = snapshot.report.clone();

        let mut inner = self.lock();
        let stock = inner.stock.clone();
        let state = inner.service.derive(&snapshot, &stock);
        info!(
            snapshot_id = %snapshot.snapshot_id,
            purchase_orders = state.purchase_orders.len(),
            "刷新完成"
        );
        inner.snapshot = Some(snapshot);
        inner.state = Some(state);
        Ok(report)
    }

    /// 更新库存水平并基于当前快照重新派生
    pub fn update_stock(&self, stock: StockLevels) {
        let mut inner = self.lock();
        inner.stock = stock;
        if let Some(snapshot) = inner.snapshot.take() {
            let current = inner.stock.clone();
            let state = inner.service.derive(&snapshot, &current);
            inner.snapshot = Some(snapshot);
            inner.state = Some(state);
        }
    }

    /// 当前派生态（整体克隆,调用方拿到的是值快照）
    pub fn state(&self) -> ApiResult<DerivedState> {
        self.lock().state.clone().ok_or(ApiError::NotRefreshed)
    }

    pub fn purchase_orders(&self) -> ApiResult<Vec<PurchaseOrder>> {
        Ok(self.state()?.purchase_orders)
    }

    pub fn sales_orders(&self) -> ApiResult<Vec<SalesOrder>> {
        Ok(self.state()?.sales_orders)
    }

    pub fn shortfalls(&self) -> ApiResult<Vec<ShortfallRecord>> {
        Ok(self.state()?.shortfalls)
    }

    /// 单张采购单的动作可用性
    pub fn eligibility(
        &self,
        po_number: &str,
        has_staged_items: bool,
    ) -> ApiResult<ActionEligibility> {
        let po = self.find_po(po_number)?;
        let config = self.channels.get(&po.channel);
        Ok(eligibility::evaluate(&po, &config, has_staged_items))
    }

    /// 远端动作审计日志（按提交顺序）
    pub fn action_logs(&self) -> Vec<ActionLog> {
        self.lock().action_logs.clone()
    }

    // ==========================================
    // 动作提交
    // ==========================================

    /// 推送采购单到履约系统
    ///
    /// # 参数
    /// - article_codes: None = 推送全部未推送活跃行;
    ///   Some = 只推送选中行（部分推送）
    pub async fn push_po(
        &self,
        po_number: &str,
        article_codes: Option<&[String]>,
    ) -> ApiResult<ActionResponse> {
        let po = self.find_po(po_number)?;
        self.ensure_pushable(&po)?;

        // 待推送行: 活跃且未推送,可选按勾选过滤
        let candidates: Vec<&crate::domain::item::OrderItem> = po
            .active_items()
            .filter(|it| !it.is_pushed())
            .filter(|it| match article_codes {
                Some(codes) => codes.iter().any(|c| c == &it.article_code),
                None => true,
            })
            .collect();
        if candidates.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "采购单 {} 没有可推送的行项目",
                po_number
            )));
        }

        let unpushed_total = po.active_items().filter(|it| !it.is_pushed()).count();
        let already_pushed = po.active_items().any(|it| it.is_pushed());
        let is_partial = already_pushed || candidates.len() < unpushed_total;

        let request = ActionRequest::PushToEasyEcom {
            po_number: po.po_number.clone(),
            items: candidates
                .iter()
                .map(|it| PushItemPayload {
                    article_code: it.article_code.clone(),
                    qty: it.qty,
                    unit_cost: it.unit_cost,
                })
                .collect(),
            is_partial,
        };
        self.submit_logged(ActionKind::PushToEasyEcom, request).await
    }

    /// 标记采购单低于渠道起订金额
    pub async fn mark_below_threshold(&self, po_number: &str) -> ApiResult<ActionResponse> {
        let po = self.find_po(po_number)?;
        let config = self.channels.get(&po.channel);
        let e = eligibility::evaluate(&po, &config, false);
        if !e.can_mark_below_threshold {
            return Err(ApiError::ActionNotEligible {
                po_number: po_number.to_string(),
                action: "updatePOStatus".to_string(),
                reason: format!(
                    "状态 {} 或金额 {:.2} 不满足标记条件(起订 {:.2})",
                    po.status, po.amount, config.min_order_threshold
                ),
            });
        }

        let request = ActionRequest::UpdatePoStatus {
            po_number: po.po_number.clone(),
            status: PoStatus::BelowThreshold.to_wire_str().to_string(),
        };
        self.submit_logged(ActionKind::MarkBelowThreshold, request).await
    }

    /// 更新采购单工作流状态（确认 / 等待确认 / 取消）
    pub async fn update_status(
        &self,
        po_number: &str,
        target: PoStatus,
    ) -> ApiResult<ActionResponse> {
        let po = self.find_po(po_number)?;
        let config = self.channels.get(&po.channel);
        let e = eligibility::evaluate(&po, &config, false);

        let allowed = match target {
            PoStatus::ConfirmedToSend | PoStatus::WaitingForConfirmation => e.can_confirm,
            PoStatus::Cancelled => e.can_cancel,
            _ => {
                return Err(ApiError::InvalidInput(format!(
                    "不支持的目标状态: {}",
                    target
                )))
            }
        };
        if !allowed {
            return Err(ApiError::ActionNotEligible {
                po_number: po_number.to_string(),
                action: "updatePOStatus".to_string(),
                reason: format!("当前状态 {} 不允许转换到 {}", po.status, target),
            });
        }

        let request = ActionRequest::UpdatePoStatus {
            po_number: po.po_number.clone(),
            status: target.to_wire_str().to_string(),
        };
        self.submit_logged(ActionKind::UpdatePoStatus, request).await
    }

    /// 取消单个行项目
    pub async fn cancel_line_item(
        &self,
        po_number: &str,
        article_code: &str,
    ) -> ApiResult<ActionResponse> {
        let po = self.find_po(po_number)?;
        let config = self.channels.get(&po.channel);
        let e = eligibility::evaluate(&po, &config, false);
        if !e.can_cancel {
            return Err(ApiError::ActionNotEligible {
                po_number: po_number.to_string(),
                action: "cancelLineItem".to_string(),
                reason: format!("状态 {} 不允许取消", po.status),
            });
        }

        let item = po
            .items
            .iter()
            .find(|it| it.article_code == article_code)
            .ok_or_else(|| {
                ApiError::NotFound(format!("行项目 {}/{} 不存在", po_number, article_code))
            })?;
        if item.is_cancelled() {
            return Err(ApiError::InvalidInput(format!(
                "行项目 {}/{} 已经取消",
                po_number, article_code
            )));
        }
        if item.is_pushed() {
            return Err(ApiError::ActionNotEligible {
                po_number: po_number.to_string(),
                action: "cancelLineItem".to_string(),
                reason: "行项目已推送, 外部状态不可逆".to_string(),
            });
        }

        let request = ActionRequest::CancelLineItem {
            po_number: po.po_number.clone(),
            article_code: article_code.to_string(),
        };
        self.submit_logged(ActionKind::CancelLineItem, request).await
    }

    /// 为销售单创建开票系统发票
    pub async fn create_invoice(&self, ee_reference_code: &str) -> ApiResult<ActionResponse> {
        let so = self.find_so(ee_reference_code)?;
        if !so.invoice_number.trim().is_empty() {
            return Err(ApiError::ActionNotEligible {
                po_number: so.po_reference.clone(),
                action: "createZohoInvoice".to_string(),
                reason: format!("销售单已有发票 {}", so.invoice_number),
            });
        }

        let request = ActionRequest::CreateZohoInvoice {
            ee_reference_code: ee_reference_code.to_string(),
        };
        self.submit_logged(ActionKind::CreateZohoInvoice, request).await
    }

    /// 推送销售单到物流聚合商（生成面单,应答可带 awb）
    pub async fn push_to_nimbus(&self, ee_reference_code: &str) -> ApiResult<ActionResponse> {
        let so = self.find_so(ee_reference_code)?;
        if so.invoice_number.trim().is_empty() {
            return Err(ApiError::ActionNotEligible {
                po_number: so.po_reference.clone(),
                action: "pushToNimbus".to_string(),
                reason: "未开票的销售单不能生成面单".to_string(),
            });
        }
        if so.box_count == 0 {
            return Err(ApiError::ActionNotEligible {
                po_number: so.po_reference.clone(),
                action: "pushToNimbus".to_string(),
                reason: "箱数缺失, 装箱数据未回传".to_string(),
            });
        }
        if !so.awb.trim().is_empty() {
            return Err(ApiError::ActionNotEligible {
                po_number: so.po_reference.clone(),
                action: "pushToNimbus".to_string(),
                reason: format!("运单号已存在: {}", so.awb),
            });
        }

        let request = ActionRequest::PushToNimbus {
            ee_reference_code: ee_reference_code.to_string(),
        };
        self.submit_logged(ActionKind::PushToNimbus, request).await
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // 锁内无 await 也无 panic 路径;中毒时继续使用内部值
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn find_po(&self, po_number: &str) -> ApiResult<PurchaseOrder> {
        let state = self.state()?;
        state
            .find_po(po_number)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("采购单 {} 不存在", po_number)))
    }

    fn find_so(&self, reference_code: &str) -> ApiResult<SalesOrder> {
        let state = self.state()?;
        state
            .find_so(reference_code)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("销售单 {} 不存在", reference_code)))
    }

    // 推送前置: 状态开放或部分已推送,且身份关联齐备
    fn ensure_pushable(&self, po: &PurchaseOrder) -> ApiResult<()> {
        if !po.has_contact_linkage() {
            return Err(ApiError::MissingLinkage {
                po_number: po.po_number.clone(),
                kind: "开票联系人".to_string(),
            });
        }
        if !po.has_customer_linkage() {
            return Err(ApiError::MissingLinkage {
                po_number: po.po_number.clone(),
                kind: "履约客户".to_string(),
            });
        }
        if !po.status.is_open() && po.status != PoStatus::PartiallyProcessed {
            return Err(ApiError::ActionNotEligible {
                po_number: po.po_number.clone(),
                action: "pushToEasyEcom".to_string(),
                reason: format!("状态 {} 不允许推送", po.status),
            });
        }
        Ok(())
    }

    // 提交一次 + 审计日志;锁不跨 await 持有
    async fn submit_logged(
        &self,
        kind: ActionKind,
        request: ActionRequest,
    ) -> ApiResult<ActionResponse> {
        let log = ActionLog::new(kind, request.target()).with_payload(&request);

        let result = self.store.submit(&request).await;
        let (log, outcome) = match result {
            Ok(resp) => {
                if resp.is_success() {
                    info!(kind = kind.as_str(), target = request.target(), "动作提交成功");
                    (log.succeeded(&resp.message_text()), Ok(resp))
                } else {
                    warn!(
                        kind = kind.as_str(),
                        target = request.target(),
                        message = %resp.message_text(),
                        "动作被远端拒绝"
                    );
                    (log.failed(&resp.message_text()), Ok(resp))
                }
            }
            Err(err) => {
                warn!(kind = kind.as_str(), target = request.target(), error = %err, "动作提交失败");
                let message = err.to_string();
                (log.failed(&message), Err(ApiError::from(err)))
            }
        };

        self.lock().action_logs.push(log);
        outcome
    }
}
