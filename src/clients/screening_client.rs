/// 简历分析服务 API 客户端
///
/// 封装所有与分析服务相关的 HTTP 调用逻辑
use crate::clients::ScreeningApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    Document, ExtractTextResponse, GenerateJdRequest, GenerateJdResponse, MatchRecord,
    MatchRequest, MatchResponse,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// 简历分析服务客户端
pub struct ScreeningClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScreeningClient {
    /// 创建新的分析服务客户端
    ///
    /// 超时取自配置（默认 300 秒）：远端的批量解析和匹配都可能很慢，
    /// 超时后按阶段失败处理
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("HTTP客户端构建失败: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 检查响应状态码，非 2xx 转为 API 错误
    fn check_status(endpoint: &str, response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api_bad_status(endpoint, status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl ScreeningApi for ScreeningClient {
    async fn upload_batch(&self, documents: &[Document]) -> AppResult<()> {
        let endpoint = self.endpoint("/resume/upload-batch");

        let mut form = Form::new();
        for document in documents {
            let part = Part::bytes(document.content.clone()).file_name(document.name.clone());
            form = form.part("files", part);
        }

        debug!("批量上传 {} 份简历 -> {}", documents.len(), endpoint);

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::check_status(&endpoint, response)?;
        Ok(())
    }

    async fn match_resumes(&self, jd_text: &str, top_k: usize) -> AppResult<Vec<MatchRecord>> {
        let endpoint = self.endpoint("/resume/match");
        let request = MatchRequest {
            jd_text: jd_text.to_string(),
            top_k,
        };

        let response = self
            .http
            .post(&endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let response = Self::check_status(&endpoint, response)?;

        let body: MatchResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_json_failed(&endpoint, e))?;

        debug!("匹配服务返回 {} 条记录", body.matches.len());
        Ok(body.matches)
    }

    async fn extract_text(&self, document: &Document) -> AppResult<String> {
        let endpoint = self.endpoint("/utils/extract-text");

        let part = Part::bytes(document.content.clone()).file_name(document.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let response = Self::check_status(&endpoint, response)?;

        let body: ExtractTextResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_json_failed(&endpoint, e))?;

        Ok(body.text)
    }

    async fn generate_jd(&self, role: &str, experience: &str, skills: &str) -> AppResult<String> {
        let endpoint = self.endpoint("/utils/generate-jd");
        let request = GenerateJdRequest {
            role: role.to_string(),
            experience: experience.to_string(),
            skills: skills.to_string(),
        };

        let response = self
            .http
            .post(&endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let response = Self::check_status(&endpoint, response)?;

        let body: GenerateJdResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_json_failed(&endpoint, e))?;

        Ok(body.jd_text)
    }

    async fn reset(&self) -> AppResult<()> {
        let endpoint = self.endpoint("/utils/reset");

        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::check_status(&endpoint, response)?;
        Ok(())
    }
}
