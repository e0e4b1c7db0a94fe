use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 筛选入口被拒绝
    #[error("筛选请求被拒绝: {0}")]
    Intake(#[from] IntakeError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// Webhook 推送错误
    #[error("推送错误: {0}")]
    Dispatch(#[from] DispatchError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 筛选入口拒绝原因
///
/// 同步返回，不产生任何状态变更，也不发出任何远端请求
#[derive(Debug, Error)]
pub enum IntakeError {
    /// 简历列表为空
    #[error("请先添加简历文件")]
    NoDocuments,
    /// JD 文本为空白
    #[error("请提供职位描述（JD）")]
    BlankJobDescription,
    /// 已有一次筛选在进行中
    #[error("当前已有筛选任务在进行中，请等待其完成")]
    AlreadyProcessing,
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非成功状态码
    #[error("API返回错误响应 ({endpoint}): HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Webhook 推送错误
///
/// 只记录日志，不向工作流上层传播
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 推送请求失败
    #[error("Webhook推送失败 ({url}): {source}")]
    DeliveryFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 推送被对端拒绝
    #[error("Webhook被拒绝 ({url}): HTTP {status}")]
    Rejected { url: String, status: u16 },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 没有配置任何 JD 来源
    #[error("未配置 JD 来源: 请设置 JD_TEXT、JD_FILE 或 JD_ROLE/JD_EXPERIENCE/JD_SKILLS")]
    MissingJdSource,
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建API错误响应错误
    pub fn api_bad_status(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadStatus {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建JSON解析失败错误
    pub fn api_json_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建推送失败错误
    pub fn dispatch_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Dispatch(DispatchError::DeliveryFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
