use serde::{Deserialize, Serialize};

/// 匹配服务返回的单条候选人记录
///
/// 字段名与远端服务的返回保持一致（PascalCase）；
/// 排名由数组位置决定（服务端按得分降序排好，客户端不再排序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 远端库中的记录ID（部分接口不返回）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Name")]
    pub name: String,

    /// 候选人来源文件名
    #[serde(rename = "File")]
    pub file: String,

    /// 匹配得分，0.0 - 1.0
    #[serde(rename = "MatchScore")]
    pub match_score: f64,

    #[serde(rename = "Email", default)]
    pub email: Option<String>,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "Education", default)]
    pub education: String,

    /// 逗号分隔的技能文本
    #[serde(rename = "Skills", default)]
    pub skills: String,
}

impl MatchRecord {
    /// 将逗号分隔的技能文本拆成数组（去掉首尾空白和空项）
    pub fn skills_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

// ========== 分析服务请求/响应 ==========

/// POST /resume/match 请求体
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequest {
    pub jd_text: String,
    pub top_k: usize,
}

/// POST /resume/match 响应体
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

/// POST /utils/extract-text 响应体
#[derive(Debug, Deserialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

/// POST /utils/generate-jd 请求体
#[derive(Debug, Clone, Serialize)]
pub struct GenerateJdRequest {
    pub role: String,
    pub experience: String,
    pub skills: String,
}

/// POST /utils/generate-jd 响应体
#[derive(Debug, Deserialize)]
pub struct GenerateJdResponse {
    pub jd_text: String,
}

// ========== Webhook 载荷 ==========

/// 推送给 Webhook 的单条候选人记录
///
/// `MatchRecord` 的浅拷贝附加 RunID，原记录不被修改；
/// Skills 拆成数组，省去对端的字符串处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchedMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "File")]
    pub file: String,

    #[serde(rename = "MatchScore")]
    pub match_score: f64,

    #[serde(rename = "Email", default)]
    pub email: Option<String>,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "Education", default)]
    pub education: String,

    #[serde(rename = "Skills", default)]
    pub skills: Vec<String>,

    /// 本次推送的调试关联标识
    #[serde(rename = "RunID")]
    pub run_id: String,
}

impl DispatchedMatch {
    /// 由匹配记录浅拷贝生成推送记录
    pub fn from_record(record: &MatchRecord, run_id: &str) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            file: record.file.clone(),
            match_score: record.match_score,
            email: record.email.clone(),
            phone: record.phone.clone(),
            education: record.education.clone(),
            skills: record.skills_list(),
            run_id: run_id.to_string(),
        }
    }
}

/// Webhook 推送的完整载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub jd_text: String,
    pub top_k: usize,
    pub matches: Vec<DispatchedMatch>,
}
