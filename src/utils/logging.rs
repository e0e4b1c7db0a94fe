/// 日志工具模块
///
/// 提供 tracing 初始化与日志格式化输出的辅助函数
use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 默认 info 级别，可用 RUST_LOG 覆盖；重复调用只生效一次
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n简历筛选日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `batch_size`: 每批上传数量
/// - `top_k`: 候选人入围数量
pub fn log_startup(batch_size: usize, top_k: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量简历筛选模式");
    info!("📦 每批上传数量: {}", batch_size);
    info!("🎯 候选人入围数量: {}", top_k);
    info!("{}", "=".repeat(60));
}

/// 记录简历加载信息
///
/// # 参数
/// - `total`: 简历总数
/// - `batch_size`: 每批上传数量
pub fn log_documents_loaded(total: usize, batch_size: usize) {
    info!("✓ 找到 {} 份待筛选的简历", total);
    info!("📋 将以每批 {} 份的方式顺序上传", batch_size);
    info!("💡 上一批出结果后再上传下一批\n");
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 上传成功数量
/// - `failed`: 上传失败数量
/// - `matched`: 入围候选人数量
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, matched: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 筛选完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 上传成功: {}/{}", success, success + failed);
    info!("❌ 上传失败: {}", failed);
    info!("🏆 入围候选人: {}", matched);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
