//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是整个应用的入口，负责资源装配与一次完整筛选的生命周期。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (装载简历/JD，输出统计)
//!     ↓
//! workflow::ScreeningFlow (上传 → 匹配 → 推送 状态机)
//!     ↓
//! services (能力层：uploader / matcher / notifier / jd)
//!     ↓
//! clients (远端边界：分析服务 / Webhook)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：App 管生命周期，ScreeningFlow 管状态机
//! 2. **资源隔离**：只有编排层构造 HTTP 客户端
//! 3. **向下依赖**：编排层 → workflow → services → clients
//! 4. **无业务逻辑**：只做装配、调度和统计输出

pub mod app;

pub use app::App;
