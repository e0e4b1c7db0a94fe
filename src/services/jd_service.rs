//! JD 获取服务 - 业务能力层
//!
//! 把三种 JD 来源统一解析成纯文本：
//! 直接文本 / JD 文件（.txt 直读，其他格式走远端文本提取）/ 岗位信息生成

use crate::clients::ScreeningApi;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::Document;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// JD 获取服务
pub struct JdService {
    api: Arc<dyn ScreeningApi>,
}

impl JdService {
    /// 创建新的 JD 服务
    pub fn new(api: Arc<dyn ScreeningApi>) -> Self {
        Self { api }
    }

    /// 按配置优先级解析 JD 文本：JD_TEXT > JD_FILE > 生成参数
    pub async fn resolve(&self, config: &Config) -> AppResult<String> {
        if !config.jd_text.trim().is_empty() {
            return Ok(config.jd_text.clone());
        }
        if !config.jd_file.is_empty() {
            return self.from_file(Path::new(&config.jd_file)).await;
        }
        if !config.jd_role.is_empty() {
            return self
                .generate(&config.jd_role, &config.jd_experience, &config.jd_skills)
                .await;
        }
        Err(AppError::Config(ConfigError::MissingJdSource))
    }

    /// 从文件读取 JD
    ///
    /// .txt 直接读取，其他格式（PDF/DOCX）交给远端服务提取文本
    pub async fn from_file(&self, path: &Path) -> AppResult<String> {
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }

        let is_plain_text = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);

        if is_plain_text {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
            return Ok(text);
        }

        info!("📄 正在通过远端服务提取 JD 文本: {}", path.display());

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        self.api.extract_text(&Document::new(name, content)).await
    }

    /// 根据岗位信息生成 JD 文本
    pub async fn generate(&self, role: &str, experience: &str, skills: &str) -> AppResult<String> {
        info!("🤖 正在根据岗位信息生成 JD（{}）...", role);

        let jd_text = self.api.generate_jd(role, experience, skills).await?;

        info!("✓ JD 生成完成（{} 字符）", jd_text.chars().count());
        Ok(jd_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockScreeningClient;

    #[tokio::test]
    async fn test_resolve_prefers_inline_text() {
        let api = Arc::new(MockScreeningClient::new());
        let service = JdService::new(api);

        let config = Config {
            jd_text: "直接给定的 JD".to_string(),
            jd_file: "ignored.pdf".to_string(),
            ..Config::default()
        };

        let jd = service.resolve(&config).await.unwrap();
        assert_eq!(jd, "直接给定的 JD");
    }

    #[tokio::test]
    async fn test_resolve_without_any_source_is_config_error() {
        let api = Arc::new(MockScreeningClient::new());
        let service = JdService::new(api);

        let result = service.resolve(&Config::default()).await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingJdSource))
        ));
    }

    #[tokio::test]
    async fn test_from_file_reads_plain_text_directly() {
        let path = std::env::temp_dir().join("jd_service_test.txt");
        std::fs::write(&path, "招聘 Rust 工程师").unwrap();

        let api = Arc::new(MockScreeningClient::new());
        let service = JdService::new(api.clone());

        let jd = service.from_file(&path).await.unwrap();
        assert_eq!(jd, "招聘 Rust 工程师");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_from_file_routes_binary_through_extraction() {
        let path = std::env::temp_dir().join("jd_service_test.pdf");
        std::fs::write(&path, b"%PDF-1.4 fake jd").unwrap();

        let api =
            Arc::new(MockScreeningClient::new().with_extracted_text("提取出来的 JD 文本"));
        let service = JdService::new(api);

        let jd = service.from_file(&path).await.unwrap();
        assert_eq!(jd, "提取出来的 JD 文本");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_resolve_generates_from_role_inputs() {
        let api = Arc::new(MockScreeningClient::new().with_generated_jd("生成的 JD"));
        let service = JdService::new(api);

        let config = Config {
            jd_role: "高级 Rust 工程师".to_string(),
            jd_experience: "5 年以上".to_string(),
            jd_skills: "Tokio, Axum".to_string(),
            ..Config::default()
        };

        let jd = service.resolve(&config).await.unwrap();
        assert_eq!(jd, "生成的 JD");
    }
}
