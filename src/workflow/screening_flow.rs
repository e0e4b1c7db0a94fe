//! 筛选流程 - 流程层
//!
//! 核心职责：定义一次简历筛选的完整状态机
//!
//! 状态顺序：
//! 1. Idle → Uploading：入口守卫通过后置位 processing
//! 2. Uploading → Matching：全部批次跑完后无条件进入（批次失败不提前终止）
//! 3. Matching → Idle：结果落库、processing 清零
//! 4. Dispatching：匹配非空时脱离主流程异步推送，不影响终态

use crate::clients::{ScreeningApi, WebhookSink};
use crate::config::Config;
use crate::error::{AppError, AppResult, IntakeError};
use crate::models::{Document, MatchRecord, UploadStatus};
use crate::services::{BatchUploader, MatchRequester, NotificationDispatcher};
use crate::workflow::state::{ScreeningOutcome, WorkflowState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// 筛选流程
///
/// - 编排上传 → 匹配 → 推送三个阶段
/// - 单独持有工作流状态（锁只在状态读写时短暂持有，不跨 await）
/// - 不直接发 HTTP 请求，只依赖业务能力（services）
pub struct ScreeningFlow {
    uploader: BatchUploader,
    matcher: MatchRequester,
    dispatcher: NotificationDispatcher,
    api: Arc<dyn ScreeningApi>,
    state: Mutex<WorkflowState>,
}

impl ScreeningFlow {
    /// 创建新的筛选流程
    pub fn new(api: Arc<dyn ScreeningApi>, sink: Arc<dyn WebhookSink>, config: &Config) -> Self {
        Self {
            uploader: BatchUploader::new(api.clone(), config.batch_size),
            matcher: MatchRequester::new(api.clone()),
            dispatcher: NotificationDispatcher::new(sink),
            api,
            state: Mutex::new(WorkflowState::new(config.top_k)),
        }
    }

    /// 开始筛选 —— 工作流的唯一入口
    ///
    /// 入口守卫（同步拒绝，不产生状态变更，也不发出远端请求）：
    /// - 已有筛选在进行中
    /// - 简历列表为空
    /// - JD 文本为空白
    pub async fn start_screening(&self) -> AppResult<ScreeningOutcome> {
        // ========== 入口守卫 ==========
        let (documents, jd_text, top_k) = {
            let mut state = self.state.lock().unwrap();
            if state.processing {
                return Err(AppError::Intake(IntakeError::AlreadyProcessing));
            }
            if state.documents.is_empty() {
                return Err(AppError::Intake(IntakeError::NoDocuments));
            }
            if state.jd_text.trim().is_empty() {
                return Err(AppError::Intake(IntakeError::BlankJobDescription));
            }

            state.processing = true;
            state.matches = None;
            state.statuses = state
                .documents
                .iter()
                .map(|d| (d.name.clone(), UploadStatus::Pending))
                .collect();
            (state.documents.clone(), state.jd_text.clone(), state.top_k)
        };

        info!("🚀 开始筛选：{} 份简历，top_k = {}", documents.len(), top_k);

        // ========== 上传阶段 ==========
        let (_, upload_stats) = self
            .uploader
            .upload_all(&documents, |snapshot| {
                self.state.lock().unwrap().merge_statuses(snapshot);
            })
            .await;

        if upload_stats.failed > 0 {
            // 上传结果不影响匹配资格，失败批次只留在状态里
            warn!(
                "⚠️ 上传阶段有 {} 份简历失败（共 {} 批），继续进入匹配",
                upload_stats.failed, upload_stats.total_batches
            );
        }

        // ========== 匹配阶段 ==========
        let matches = match self.matcher.match_resumes(&jd_text, top_k).await {
            Ok(matches) => matches,
            Err(e) => {
                self.finish_processing();
                return Err(e);
            }
        };

        if matches.is_empty() {
            info!("没有找到匹配的候选人，建议放宽筛选条件或补充简历");
            self.finish_processing();
            return Ok(ScreeningOutcome::NoMatches);
        }

        // 先提交结果并结束 processing，推送不算在工作流时长内
        {
            let mut state = self.state.lock().unwrap();
            state.matches = Some(matches.clone());
            state.processing = false;
        }

        // ========== 推送阶段（脱离主流程） ==========
        let _ = self.dispatcher.dispatch(&jd_text, &matches, top_k);

        Ok(ScreeningOutcome::Matched(matches))
    }

    fn finish_processing(&self) {
        self.state.lock().unwrap().processing = false;
    }

    // ========== 摄入与维护操作 ==========

    /// 添加一份简历（筛选进行中不允许）
    pub fn add_document(&self, document: Document) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.processing {
            return Err(AppError::Intake(IntakeError::AlreadyProcessing));
        }
        // 状态在摄入时即建为 pending
        state
            .statuses
            .insert(document.name.clone(), UploadStatus::Pending);
        state.documents.push(document);
        Ok(())
    }

    /// 批量添加简历
    pub fn add_documents(&self, documents: Vec<Document>) -> AppResult<()> {
        for document in documents {
            self.add_document(document)?;
        }
        Ok(())
    }

    /// 按文件名移除简历（筛选进行中不允许；名字不存在则无事发生）
    pub fn remove_document(&self, name: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.processing {
            return Err(AppError::Intake(IntakeError::AlreadyProcessing));
        }
        state.documents.retain(|d| d.name != name);
        state.statuses.remove(name);
        Ok(())
    }

    /// 设置职位描述（筛选进行中不允许）
    pub fn set_job_description(&self, jd_text: impl Into<String>) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.processing {
            return Err(AppError::Intake(IntakeError::AlreadyProcessing));
        }
        state.jd_text = jd_text.into();
        Ok(())
    }

    /// 设置候选人入围数量（筛选进行中不允许）
    pub fn set_top_k(&self, top_k: usize) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.processing {
            return Err(AppError::Intake(IntakeError::AlreadyProcessing));
        }
        state.top_k = top_k;
        Ok(())
    }

    /// 整体重置：清空远端简历库与本地工作流状态（筛选进行中拒绝）
    pub async fn reset(&self) -> AppResult<()> {
        {
            let state = self.state.lock().unwrap();
            if state.processing {
                return Err(AppError::Intake(IntakeError::AlreadyProcessing));
            }
        }

        self.api.reset().await?;

        let mut state = self.state.lock().unwrap();
        state.documents.clear();
        state.statuses.clear();
        state.matches = None;

        info!("🗑️ 已清空远端简历库与本地状态");
        Ok(())
    }

    // ========== 只读访问 ==========

    /// 是否有筛选在进行中
    pub fn is_processing(&self) -> bool {
        self.state.lock().unwrap().processing
    }

    /// 当前全部上传状态的拷贝
    pub fn upload_statuses(&self) -> HashMap<String, UploadStatus> {
        self.state.lock().unwrap().statuses.clone()
    }

    /// 最近一次完成的匹配结果
    pub fn matches(&self) -> Option<Vec<MatchRecord>> {
        self.state.lock().unwrap().matches.clone()
    }

    /// 当前简历数量
    pub fn document_count(&self) -> usize {
        self.state.lock().unwrap().documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{sample_match, MockScreeningClient, MockWebhookSink};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn documents(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document::new(format!("resume_{:03}.pdf", i), vec![0u8; 8]))
            .collect()
    }

    fn test_config(batch_size: usize, top_k: usize) -> Config {
        Config {
            batch_size,
            top_k,
            ..Config::default()
        }
    }

    /// 等到条件成立为止（推送任务是脱离主流程的，需要让出执行权）
    async fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..1000 {
            if cond() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("等待条件超时");
    }

    #[tokio::test]
    async fn test_scenario_full_run_with_dispatch() {
        // 120 份简历、每批 50 -> 3 次上传调用；匹配返回 5 条 -> 推送 5 条同号记录
        let api = Arc::new(MockScreeningClient::new().with_matches(vec![
            sample_match("a", 0.9),
            sample_match("b", 0.8),
            sample_match("c", 0.7),
            sample_match("d", 0.6),
            sample_match("e", 0.5),
        ]));
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink.clone(), &test_config(50, 5));

        flow.add_documents(documents(120)).unwrap();
        flow.set_job_description("招聘 Rust 工程师").unwrap();

        let outcome = flow.start_screening().await.unwrap();

        let calls = api.upload_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls.iter().map(|c| c.len()).collect::<Vec<_>>(),
            vec![50, 50, 20]
        );
        assert_eq!(api.match_calls(), vec![("招聘 Rust 工程师".to_string(), 5)]);

        match outcome {
            ScreeningOutcome::Matched(records) => assert_eq!(records.len(), 5),
            other => panic!("意外的结果: {:?}", other),
        }
        assert_eq!(flow.matches().unwrap().len(), 5);
        // 返回时 processing 已经清零，推送在后台进行
        assert!(!flow.is_processing());

        wait_until(|| sink.delivery_count() == 1).await;
        let payload = &sink.deliveries()[0];
        assert_eq!(payload.matches.len(), 5);
        assert_eq!(payload.top_k, 5);
        let run_id = payload.matches[0].run_id.clone();
        assert!(payload.matches.iter().all(|m| m.run_id == run_id));
    }

    #[tokio::test]
    async fn test_scenario_empty_document_list_rejected() {
        let api = Arc::new(MockScreeningClient::new());
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink.clone(), &test_config(50, 5));
        flow.set_job_description("jd").unwrap();

        let result = flow.start_screening().await;
        assert!(matches!(
            result,
            Err(AppError::Intake(IntakeError::NoDocuments))
        ));
        // 拒绝发生在任何远端请求之前
        assert_eq!(api.upload_call_count(), 0);
        assert_eq!(api.match_call_count(), 0);
        assert!(!flow.is_processing());
    }

    #[tokio::test]
    async fn test_scenario_blank_jd_rejected() {
        let api = Arc::new(MockScreeningClient::new());
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink, &test_config(50, 5));
        flow.add_documents(documents(3)).unwrap();
        flow.set_job_description("   \n\t ").unwrap();

        let result = flow.start_screening().await;
        assert!(matches!(
            result,
            Err(AppError::Intake(IntakeError::BlankJobDescription))
        ));
        assert_eq!(api.upload_call_count(), 0);
    }

    #[tokio::test]
    async fn test_scenario_failed_middle_chunk_still_matches() {
        // 第 2/3 批失败：第 1、3 批 success，第 2 批 error，匹配照常发起
        let api = Arc::new(
            MockScreeningClient::new()
                .with_failing_uploads([2])
                .with_matches(vec![sample_match("a", 0.9)]),
        );
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink, &test_config(10, 5));

        flow.add_documents(documents(30)).unwrap();
        flow.set_job_description("jd").unwrap();

        let outcome = flow.start_screening().await.unwrap();
        assert!(matches!(outcome, ScreeningOutcome::Matched(_)));

        assert_eq!(api.upload_call_count(), 3);
        assert_eq!(api.match_call_count(), 1);

        let statuses = flow.upload_statuses();
        assert_eq!(statuses["resume_005.pdf"], UploadStatus::Success);
        assert_eq!(statuses["resume_015.pdf"], UploadStatus::Error);
        assert_eq!(statuses["resume_025.pdf"], UploadStatus::Success);
        assert!(statuses.values().all(|s| s.is_terminal()));
    }

    #[tokio::test]
    async fn test_scenario_empty_match_result_no_dispatch() {
        let api = Arc::new(MockScreeningClient::new()); // 预置结果为空
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink.clone(), &test_config(50, 5));

        flow.add_documents(documents(2)).unwrap();
        flow.set_job_description("jd").unwrap();

        let outcome = flow.start_screening().await.unwrap();
        assert_eq!(outcome, ScreeningOutcome::NoMatches);
        assert!(flow.matches().is_none());
        assert!(!flow.is_processing());

        // 让后台任务（如果错误地发起过）有机会跑完
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(sink.delivery_count(), 0);
    }

    #[tokio::test]
    async fn test_scenario_match_failure_aborts_without_dispatch() {
        let api = Arc::new(MockScreeningClient::new().with_match_error());
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink.clone(), &test_config(50, 5));

        flow.add_documents(documents(2)).unwrap();
        flow.set_job_description("jd").unwrap();

        let result = flow.start_screening().await;
        assert!(matches!(result, Err(AppError::Api(_))));
        assert!(flow.matches().is_none());
        assert!(!flow.is_processing());

        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(sink.delivery_count(), 0);
    }

    #[tokio::test]
    async fn test_reentrant_start_is_rejected_without_remote_calls() {
        let gate = Arc::new(Semaphore::new(0));
        let api = Arc::new(
            MockScreeningClient::new()
                .with_matches(vec![sample_match("a", 0.9)])
                .with_upload_gate(gate.clone()),
        );
        let sink = Arc::new(MockWebhookSink::new());
        let flow = Arc::new(ScreeningFlow::new(api.clone(), sink, &test_config(50, 5)));

        flow.add_documents(documents(3)).unwrap();
        flow.set_job_description("jd").unwrap();

        let first = {
            let flow = flow.clone();
            tokio::spawn(async move { flow.start_screening().await })
        };

        // 等第一次运行真正置位 processing（卡在上传闸门上）
        wait_until(|| flow.is_processing()).await;

        let second = flow.start_screening().await;
        assert!(matches!(
            second,
            Err(AppError::Intake(IntakeError::AlreadyProcessing))
        ));
        // 被拒绝的调用没有发出任何新的远端请求
        assert_eq!(api.upload_call_count(), 0);
        assert_eq!(api.match_call_count(), 0);

        // 进行中也不允许改动摄入数据
        assert!(flow.add_document(Document::new("late.pdf", vec![])).is_err());
        assert!(flow.remove_document("resume_000.pdf").is_err());

        gate.add_permits(10);
        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, ScreeningOutcome::Matched(_)));
        assert_eq!(api.upload_call_count(), 1);
        assert_eq!(api.match_call_count(), 1);
        assert!(!flow.is_processing());
    }

    #[tokio::test]
    async fn test_second_run_resets_statuses_and_matches() {
        let api = Arc::new(MockScreeningClient::new().with_matches(vec![sample_match("a", 0.9)]));
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink.clone(), &test_config(50, 5));

        flow.add_documents(documents(2)).unwrap();
        flow.set_job_description("jd").unwrap();

        flow.start_screening().await.unwrap();
        assert!(flow.matches().is_some());

        // 第二次运行重新从 pending 开始，两次推送两个不同的 RunID
        tokio::time::sleep(Duration::from_millis(5)).await;
        flow.start_screening().await.unwrap();

        wait_until(|| sink.delivery_count() == 2).await;
        let deliveries = sink.deliveries();
        assert_ne!(
            deliveries[0].matches[0].run_id,
            deliveries[1].matches[0].run_id
        );
    }

    #[tokio::test]
    async fn test_remove_document_before_run() {
        let api = Arc::new(MockScreeningClient::new().with_matches(vec![sample_match("a", 0.9)]));
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink, &test_config(50, 5));

        flow.add_documents(documents(3)).unwrap();
        flow.remove_document("resume_001.pdf").unwrap();
        assert_eq!(flow.document_count(), 2);

        flow.set_job_description("jd").unwrap();
        flow.start_screening().await.unwrap();

        let calls = api.upload_calls();
        assert_eq!(calls[0], vec!["resume_000.pdf", "resume_002.pdf"]);
    }

    #[tokio::test]
    async fn test_reset_clears_local_state_and_calls_remote() {
        let api = Arc::new(MockScreeningClient::new().with_matches(vec![sample_match("a", 0.9)]));
        let sink = Arc::new(MockWebhookSink::new());
        let flow = ScreeningFlow::new(api.clone(), sink, &test_config(50, 5));

        flow.add_documents(documents(2)).unwrap();
        flow.set_job_description("jd").unwrap();
        flow.start_screening().await.unwrap();

        flow.reset().await.unwrap();
        assert_eq!(api.reset_call_count(), 1);
        assert_eq!(flow.document_count(), 0);
        assert!(flow.matches().is_none());
        assert!(flow.upload_statuses().is_empty());
    }
}
