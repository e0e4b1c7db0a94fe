//! # Resume Screening
//!
//! 一个用于批量简历筛选的 Rust 客户端编排程序：
//! 把一批简历分批上传到远端分析服务，按职位描述请求匹配排名，
//! 再把最终结果异步推送到外部 Webhook，推送不阻塞筛选流程本身。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装远端边界，只暴露能力（trait）
//! - `ScreeningClient` - 简历分析服务的 HTTP 客户端
//! - `WebhookClient` - 结果推送的 HTTP 客户端
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务一项能力
//! - `BatchUploader` - 按批次顺序上传能力
//! - `MatchRequester` - 简历匹配能力
//! - `NotificationDispatcher` - 异步推送能力
//! - `JdService` - JD 文本获取能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义一次筛选的完整状态机
//! - `WorkflowState` - 工作流聚合状态（单一所有者）
//! - `ScreeningFlow` - 流程编排（上传 → 匹配 → 推送）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期，装载简历与 JD，输出统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ScreeningApi, ScreeningClient, WebhookClient, WebhookSink};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Document, MatchRecord, UploadStatus};
pub use orchestrator::App;
pub use workflow::{ScreeningFlow, ScreeningOutcome, WorkflowState};
