//! 结果推送服务 - 业务能力层
//!
//! 把最终排名异步推送到外部 Webhook，不阻塞筛选流程本身

use crate::clients::WebhookSink;
use crate::models::{DispatchedMatch, MatchRecord, WebhookPayload};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 生成本次推送的 RunID
///
/// 当天时间到毫秒（如 14:30:05.123）。同一毫秒内的两次运行会撞号，
/// 该标识只用于日志关联，不作为身份
fn generate_run_id() -> String {
    chrono::Utc::now().format("%H:%M:%S%.3f").to_string()
}

/// 构建推送载荷
///
/// 每条记录浅拷贝后附加同一个 RunID，原始记录不被修改
pub fn build_payload(
    jd_text: &str,
    matches: &[MatchRecord],
    top_k: usize,
    run_id: &str,
) -> WebhookPayload {
    WebhookPayload {
        jd_text: jd_text.to_string(),
        top_k,
        matches: matches
            .iter()
            .map(|record| DispatchedMatch::from_record(record, run_id))
            .collect(),
    }
}

/// 结果推送服务
pub struct NotificationDispatcher {
    sink: Arc<dyn WebhookSink>,
}

impl NotificationDispatcher {
    /// 创建新的推送服务
    pub fn new(sink: Arc<dyn WebhookSink>) -> Self {
        Self { sink }
    }

    /// 异步推送筛选结果（fire-and-forget）
    ///
    /// 只在 matches 非空时调用。工作流不等待返回的 JoinHandle
    /// （测试可以等待它）；推送结果只进日志，失败不回流到工作流状态
    pub fn dispatch(&self, jd_text: &str, matches: &[MatchRecord], top_k: usize) -> JoinHandle<()> {
        let run_id = generate_run_id();
        let payload = build_payload(jd_text, matches, top_k, &run_id);
        let sink = Arc::clone(&self.sink);

        info!(
            "[Run {}] 📤 正在异步推送 {} 条结果到 Webhook...",
            run_id,
            payload.matches.len()
        );

        tokio::spawn(async move {
            match sink.deliver(&payload).await {
                Ok(()) => info!("[Run {}] ✓ Webhook 推送成功", run_id),
                Err(e) => error!("[Run {}] ❌ Webhook 推送失败: {}", run_id, e),
            }
        })
    }
}
