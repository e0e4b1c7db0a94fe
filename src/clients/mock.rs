//! 测试用 Mock 客户端
//!
//! 提供可配置的 `ScreeningApi` / `WebhookSink` 实现：
//! 预置固定响应、注入指定批次的失败、记录全部调用，供断言使用。

use crate::clients::{ScreeningApi, WebhookSink};
use crate::error::{AppError, AppResult, DispatchError};
use crate::models::{Document, MatchRecord, WebhookPayload};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Semaphore;

/// 生成一条测试用匹配记录
pub fn sample_match(name: &str, score: f64) -> MatchRecord {
    MatchRecord {
        id: None,
        name: name.to_string(),
        file: format!("{}.pdf", name),
        match_score: score,
        email: Some(format!("{}@example.com", name)),
        phone: "13800000000".to_string(),
        education: "本科".to_string(),
        skills: "Rust, Tokio".to_string(),
    }
}

/// 分析服务的 Mock 实现
///
/// 记录每次调用，便于验证批次数量、顺序与内容
#[derive(Default)]
pub struct MockScreeningClient {
    /// 每次批量上传收到的文件名列表（按调用顺序）
    upload_calls: Arc<RwLock<Vec<Vec<String>>>>,
    /// 指定哪几次上传调用失败（从 1 开始计数）
    failing_uploads: RwLock<HashSet<usize>>,
    /// 匹配调用记录（jd_text, top_k）
    match_calls: Arc<RwLock<Vec<(String, usize)>>>,
    /// 匹配调用的预置返回
    matches: RwLock<Vec<MatchRecord>>,
    /// 匹配调用是否直接失败
    match_error: AtomicBool,
    /// reset 调用次数
    reset_calls: Arc<RwLock<usize>>,
    /// 预置的文本提取结果
    extracted_text: RwLock<String>,
    /// 预置的 JD 生成结果
    generated_jd: RwLock<String>,
    /// 上传闸门：设置后每次上传都要先取得一个许可（用于重入测试）
    upload_gate: RwLock<Option<Arc<Semaphore>>>,
}

impl MockScreeningClient {
    /// 创建空的 Mock 客户端
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置匹配结果（builder 风格）
    pub fn with_matches(self, matches: Vec<MatchRecord>) -> Self {
        *self.matches.write().unwrap() = matches;
        self
    }

    /// 指定失败的上传批次（从 1 开始）
    pub fn with_failing_uploads(self, chunks: impl IntoIterator<Item = usize>) -> Self {
        *self.failing_uploads.write().unwrap() = chunks.into_iter().collect();
        self
    }

    /// 让匹配调用直接失败
    pub fn with_match_error(self) -> Self {
        self.match_error.store(true, Ordering::SeqCst);
        self
    }

    /// 设置上传闸门
    pub fn with_upload_gate(self, gate: Arc<Semaphore>) -> Self {
        *self.upload_gate.write().unwrap() = Some(gate);
        self
    }

    /// 预置文本提取结果
    pub fn with_extracted_text(self, text: impl Into<String>) -> Self {
        *self.extracted_text.write().unwrap() = text.into();
        self
    }

    /// 预置 JD 生成结果
    pub fn with_generated_jd(self, jd: impl Into<String>) -> Self {
        *self.generated_jd.write().unwrap() = jd.into();
        self
    }

    // ========== 调用记录访问 ==========

    /// 上传被调用的次数
    pub fn upload_call_count(&self) -> usize {
        self.upload_calls.read().unwrap().len()
    }

    /// 按调用顺序返回每个批次的文件名
    pub fn upload_calls(&self) -> Vec<Vec<String>> {
        self.upload_calls.read().unwrap().clone()
    }

    /// 匹配被调用的次数
    pub fn match_call_count(&self) -> usize {
        self.match_calls.read().unwrap().len()
    }

    /// 匹配调用记录
    pub fn match_calls(&self) -> Vec<(String, usize)> {
        self.match_calls.read().unwrap().clone()
    }

    /// reset 被调用的次数
    pub fn reset_call_count(&self) -> usize {
        *self.reset_calls.read().unwrap()
    }
}

#[async_trait]
impl ScreeningApi for MockScreeningClient {
    async fn upload_batch(&self, documents: &[Document]) -> AppResult<()> {
        // 闸门许可要在记录调用之前拿到，守住"被拒绝的请求不产生远端调用"的断言
        let gate = self.upload_gate.read().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("上传闸门已关闭").forget();
        }

        let call_index = {
            let mut calls = self.upload_calls.write().unwrap();
            calls.push(documents.iter().map(|d| d.name.clone()).collect());
            calls.len()
        };

        if self.failing_uploads.read().unwrap().contains(&call_index) {
            return Err(AppError::api_bad_status("/resume/upload-batch", 500));
        }
        Ok(())
    }

    async fn match_resumes(&self, jd_text: &str, top_k: usize) -> AppResult<Vec<MatchRecord>> {
        self.match_calls
            .write()
            .unwrap()
            .push((jd_text.to_string(), top_k));

        if self.match_error.load(Ordering::SeqCst) {
            return Err(AppError::api_bad_status("/resume/match", 500));
        }
        Ok(self.matches.read().unwrap().clone())
    }

    async fn extract_text(&self, _document: &Document) -> AppResult<String> {
        Ok(self.extracted_text.read().unwrap().clone())
    }

    async fn generate_jd(&self, _role: &str, _experience: &str, _skills: &str) -> AppResult<String> {
        Ok(self.generated_jd.read().unwrap().clone())
    }

    async fn reset(&self) -> AppResult<()> {
        *self.reset_calls.write().unwrap() += 1;
        Ok(())
    }
}

/// Webhook 的 Mock 实现
#[derive(Default)]
pub struct MockWebhookSink {
    deliveries: Arc<RwLock<Vec<WebhookPayload>>>,
    fail: AtomicBool,
}

impl MockWebhookSink {
    /// 创建空的 Mock Webhook
    pub fn new() -> Self {
        Self::default()
    }

    /// 让投递失败
    pub fn with_failure(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// 投递次数
    pub fn delivery_count(&self) -> usize {
        self.deliveries.read().unwrap().len()
    }

    /// 收到的全部载荷
    pub fn deliveries(&self) -> Vec<WebhookPayload> {
        self.deliveries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebhookSink for MockWebhookSink {
    async fn deliver(&self, payload: &WebhookPayload) -> AppResult<()> {
        self.deliveries.write().unwrap().push(payload.clone());

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Dispatch(DispatchError::Rejected {
                url: "webhook".to_string(),
                status: 500,
            }));
        }
        Ok(())
    }
}
