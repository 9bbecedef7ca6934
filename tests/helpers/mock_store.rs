// ==========================================
// 内存远端行存储桩
// ==========================================
// 职责: 脚本化 fetch_rows/submit 应答,记录全部提交请求
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use channel_po_tracking::remote::payload::{ActionRequest, ActionResponse};
use channel_po_tracking::remote::store::{RemoteError, RemoteResult, RemoteStore};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct MockRemoteStore {
    rows: Mutex<Vec<HashMap<String, String>>>,
    fail_submit: Mutex<Option<String>>,
    submitted: Mutex<Vec<ActionRequest>>,
}

impl MockRemoteStore {
    pub fn new(rows: Vec<HashMap<String, String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_submit: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// 替换行集（模拟远端状态变化,下次刷新生效）
    pub fn set_rows(&self, rows: Vec<HashMap<String, String>>) {
        *self.rows.lock().unwrap() = rows;
    }

    /// 让后续 submit 返回网络错误
    pub fn fail_next_submits(&self, message: &str) {
        *self.fail_submit.lock().unwrap() = Some(message.to_string());
    }

    pub fn submitted(&self) -> Vec<ActionRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn fetch_rows(&self) -> RemoteResult<Vec<HashMap<String, String>>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn submit(&self, request: &ActionRequest) -> RemoteResult<ActionResponse> {
        self.submitted.lock().unwrap().push(request.clone());
        if let Some(message) = self.fail_submit.lock().unwrap().clone() {
            return Err(RemoteError::Network(message));
        }
        let mut extra = HashMap::new();
        if matches!(request, ActionRequest::PushToNimbus { .. }) {
            extra.insert("awb".to_string(), serde_json::json!("AWB-MOCK-1"));
        }
        Ok(ActionResponse {
            status: "success".to_string(),
            message: Some("ok".to_string()),
            extra,
        })
    }
}
