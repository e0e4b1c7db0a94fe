//! 简历匹配服务 - 业务能力层
//!
//! 只负责一次远端匹配调用；空结果与传输失败的区分交给上层

use crate::clients::ScreeningApi;
use crate::error::AppResult;
use crate::models::MatchRecord;
use std::sync::Arc;
use tracing::info;

/// 简历匹配服务
pub struct MatchRequester {
    api: Arc<dyn ScreeningApi>,
}

impl MatchRequester {
    /// 创建新的匹配服务
    pub fn new(api: Arc<dyn ScreeningApi>) -> Self {
        Self { api }
    }

    /// 按 JD 匹配简历
    ///
    /// # 参数
    /// - `jd_text`: 职位描述文本（非空由调用方保证）
    /// - `top_k`: 返回数量上限，只要求为正整数，本层不校验上限
    ///
    /// # 返回
    /// 按得分降序排好的候选人列表；空列表表示"无匹配"，不是错误
    pub async fn match_resumes(&self, jd_text: &str, top_k: usize) -> AppResult<Vec<MatchRecord>> {
        info!("🔍 正在匹配简历 (top_k = {})...", top_k);

        let matches = self.api.match_resumes(jd_text, top_k).await?;

        info!("✓ 匹配完成，返回 {} 条记录", matches.len());
        Ok(matches)
    }
}
