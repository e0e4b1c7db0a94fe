use serde::{Deserialize, Serialize};
use std::fmt;

/// 候选人简历文件
///
/// 摄入后内容不再变更；一次筛选运行期间由工作流持有
#[derive(Debug, Clone)]
pub struct Document {
    /// 展示用文件名（约定在一批内唯一，不强制）
    pub name: String,
    /// 文件原始字节
    pub content: Vec<u8>,
}

impl Document {
    /// 创建新的简历文件
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// 单个简历的上传状态
///
/// 生命周期：摄入时为 `Pending`，只在上传阶段内变迁，
/// 到达 `Success`/`Error` 终态后不再回退（工作流整体重置除外）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// 等待上传
    Pending,
    /// 所在批次正在上传
    Processing,
    /// 所在批次上传成功
    Success,
    /// 所在批次上传失败
    Error,
}

impl UploadStatus {
    /// 是否已到达终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Success | UploadStatus::Error)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UploadStatus::Pending => "pending",
            UploadStatus::Processing => "processing",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_status_terminal() {
        assert!(!UploadStatus::Pending.is_terminal());
        assert!(!UploadStatus::Processing.is_terminal());
        assert!(UploadStatus::Success.is_terminal());
        assert!(UploadStatus::Error.is_terminal());
    }

    #[test]
    fn test_upload_status_display() {
        assert_eq!(UploadStatus::Processing.to_string(), "processing");
        assert_eq!(UploadStatus::Error.to_string(), "error");
    }
}
