/// Webhook 推送客户端
///
/// 只负责把一份载荷投递到配置的外部通知端点
use crate::clients::WebhookSink;
use crate::config::Config;
use crate::error::{AppError, AppResult, DispatchError};
use crate::models::WebhookPayload;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Webhook 客户端
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// 创建新的 Webhook 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("HTTP客户端构建失败: {}", e)))?;

        Ok(Self {
            http,
            url: config.webhook_url.clone(),
        })
    }
}

#[async_trait]
impl WebhookSink for WebhookClient {
    async fn deliver(&self, payload: &WebhookPayload) -> AppResult<()> {
        debug!(
            "投递 {} 条候选人记录 -> {}",
            payload.matches.len(),
            self.url
        );

        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::dispatch_failed(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Dispatch(DispatchError::Rejected {
                url: self.url.clone(),
                status: status.as_u16(),
            }));
        }

        Ok(())
    }
}
