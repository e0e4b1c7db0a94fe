//! 筛选应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：启动日志、构造 HTTP 客户端、装配筛选流程
//! 2. **批量加载**：扫描并加载待筛选的简历（`Vec<Document>`）
//! 3. **JD 解析**：按配置优先级取得职位描述文本
//! 4. **驱动流程**：调用 ScreeningFlow 并输出排名与全局统计

use crate::clients::{ScreeningClient, WebhookClient};
use crate::config::Config;
use crate::models::{load_all_resume_files, MatchRecord, UploadStatus};
use crate::services::JdService;
use crate::utils::logging::{
    init_log_file, log_documents_loaded, log_startup, print_final_stats, truncate_text,
};
use crate::workflow::{ScreeningFlow, ScreeningOutcome};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: ScreeningFlow,
    jd_service: JdService,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(config.batch_size, config.top_k);

        let api = Arc::new(ScreeningClient::new(&config)?);
        let sink = Arc::new(WebhookClient::new(&config)?);

        let flow = ScreeningFlow::new(api.clone(), sink, &config);
        let jd_service = JdService::new(api);

        Ok(Self {
            config,
            flow,
            jd_service,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 可选：先清空远端简历库
        if self.config.reset_before_run {
            info!("🗑️ 正在清空远端简历库...");
            self.flow.reset().await?;
        }

        // 加载简历
        info!("\n📁 正在扫描待筛选的简历...");
        let documents = load_all_resume_files(&self.config.resume_folder).await?;

        if documents.is_empty() {
            warn!("⚠️ 没有找到待筛选的简历文件，程序结束");
            return Ok(());
        }
        log_documents_loaded(documents.len(), self.config.batch_size);

        // 解析 JD
        let jd_text = self.jd_service.resolve(&self.config).await?;
        info!("📝 JD 预览: {}", truncate_text(&jd_text, 80));

        // 驱动筛选流程
        self.flow.add_documents(documents)?;
        self.flow.set_job_description(jd_text)?;

        match self.flow.start_screening().await {
            Ok(ScreeningOutcome::Matched(records)) => {
                log_match_results(&records);
                let (success, failed) = self.upload_outcome();
                print_final_stats(success, failed, records.len(), &self.config.output_log_file);
            }
            Ok(ScreeningOutcome::NoMatches) => {
                warn!("⚠️ 没有找到匹配的候选人，请尝试放宽筛选条件或补充简历");
                let (success, failed) = self.upload_outcome();
                print_final_stats(success, failed, 0, &self.config.output_log_file);
            }
            Err(e) => {
                error!("❌ 筛选失败: {}", e);
                return Err(e.into());
            }
        }

        Ok(())
    }

    /// 统计上传终态数量（成功数, 失败数）
    fn upload_outcome(&self) -> (usize, usize) {
        let statuses = self.flow.upload_statuses();
        let success = statuses
            .values()
            .filter(|s| **s == UploadStatus::Success)
            .count();
        let failed = statuses
            .values()
            .filter(|s| **s == UploadStatus::Error)
            .count();
        (success, failed)
    }
}

// ========== 日志辅助函数 ==========

/// 输出候选人排名
fn log_match_results(records: &[MatchRecord]) {
    info!("\n{}", "=".repeat(60));
    info!("🏆 入围候选人（按匹配度降序）");
    info!("{}", "=".repeat(60));
    for (idx, record) in records.iter().enumerate() {
        info!(
            "#{} {} ({:.2}%) - {}",
            idx + 1,
            record.name,
            record.match_score * 100.0,
            record.file
        );
        if !record.skills.is_empty() {
            info!("    技能: {}", truncate_text(&record.skills, 60));
        }
    }
    info!("{}", "=".repeat(60));
}
