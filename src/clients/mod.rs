//! 客户端层（Clients Layer）
//!
//! 封装全部远端边界：简历分析服务与结果推送 Webhook。
//! 两个边界都以 trait 抽象，上层流程只依赖能力，
//! 测试中可以换成记录调用的 Mock 实现。

pub mod mock;
pub mod screening_client;
pub mod webhook_client;

use crate::error::AppResult;
use crate::models::{Document, MatchRecord, WebhookPayload};
use async_trait::async_trait;

/// 简历分析服务的能力边界
#[async_trait]
pub trait ScreeningApi: Send + Sync {
    /// 批量上传一组简历
    ///
    /// 一次调用即一个批次；对客户端而言批次是原子的，
    /// 整体成功或整体失败，不消费逐文件明细
    async fn upload_batch(&self, documents: &[Document]) -> AppResult<()>;

    /// 按 JD 匹配简历，返回按得分降序排好的候选人列表
    async fn match_resumes(&self, jd_text: &str, top_k: usize) -> AppResult<Vec<MatchRecord>>;

    /// 从单个文件提取纯文本（用于非纯文本的 JD 文件）
    async fn extract_text(&self, document: &Document) -> AppResult<String>;

    /// 根据岗位、经验、技能生成 JD 文本
    async fn generate_jd(&self, role: &str, experience: &str, skills: &str) -> AppResult<String>;

    /// 清空远端简历库
    async fn reset(&self) -> AppResult<()>;
}

/// 筛选结果的推送边界
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// 一次性投递完整载荷，非 2xx 视为投递失败
    async fn deliver(&self, payload: &WebhookPayload) -> AppResult<()>;
}

pub use mock::{MockScreeningClient, MockWebhookSink};
pub use screening_client::ScreeningClient;
pub use webhook_client::WebhookClient;
