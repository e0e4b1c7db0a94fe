/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 简历分析服务的基础URL
    pub api_base_url: String,
    /// 筛选结果推送的 Webhook 地址
    pub webhook_url: String,
    /// 每批上传的简历数量
    pub batch_size: usize,
    /// 候选人入围数量（1-20）
    pub top_k: usize,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 简历文件存放目录
    pub resume_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- JD 来源配置 ---
    /// 直接给定的 JD 文本（优先级最高）
    pub jd_text: String,
    /// JD 文件路径（.txt 直接读取，其他格式走远端文本提取）
    pub jd_file: String,
    /// JD 生成参数：岗位
    pub jd_role: String,
    /// JD 生成参数：经验要求
    pub jd_experience: String,
    /// JD 生成参数：必备技能
    pub jd_skills: String,
    /// 运行前是否清空远端简历库
    pub reset_before_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            webhook_url: "http://localhost:5678/webhook-test/match-resumes".to_string(),
            batch_size: 50,
            top_k: 5,
            request_timeout_secs: 300,
            resume_folder: "resumes".to_string(),
            verbose_logging: false,
            output_log_file: "screening_output.txt".to_string(),
            jd_text: String::new(),
            jd_file: String::new(),
            jd_role: String::new(),
            jd_experience: String::new(),
            jd_skills: String::new(),
            reset_before_run: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            webhook_url: std::env::var("WEBHOOK_URL").unwrap_or(default.webhook_url),
            batch_size: std::env::var("BATCH_SIZE").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(default.batch_size),
            top_k: std::env::var("TOP_K").ok().and_then(|v| v.parse().ok()).map(|v: usize| v.clamp(1, 20)).unwrap_or(default.top_k),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            resume_folder: std::env::var("RESUME_FOLDER").unwrap_or(default.resume_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            jd_text: std::env::var("JD_TEXT").unwrap_or(default.jd_text),
            jd_file: std::env::var("JD_FILE").unwrap_or(default.jd_file),
            jd_role: std::env::var("JD_ROLE").unwrap_or(default.jd_role),
            jd_experience: std::env::var("JD_EXPERIENCE").unwrap_or(default.jd_experience),
            jd_skills: std::env::var("JD_SKILLS").unwrap_or(default.jd_skills),
            reset_before_run: std::env::var("RESET_BEFORE_RUN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reset_before_run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.request_timeout_secs, 300);
        assert!(config.jd_text.is_empty());
        assert!(!config.reset_before_run);
    }
}
