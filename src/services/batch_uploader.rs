//! 批量上传服务 - 业务能力层
//!
//! 只负责"把一组简历按批次顺序上传"，不关心匹配与推送

use crate::clients::ScreeningApi;
use crate::models::{Document, UploadStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// 上传阶段统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// 上传成功的简历数量
    pub success: usize,
    /// 上传失败的简历数量
    pub failed: usize,
    /// 总批次数
    pub total_batches: usize,
}

/// 批量上传服务
///
/// 职责：
/// - 把简历列表按原始顺序切成不超过 batch_size 的连续批次
/// - 批次严格串行，上一批出结果之前不发起下一批
/// - 单批失败把该批全部简历标记为 error，不中断后续批次
/// - 每次状态变化后通过回调发出合并快照（只更新触达的键）
pub struct BatchUploader {
    api: Arc<dyn ScreeningApi>,
    batch_size: usize,
}

impl BatchUploader {
    /// 创建新的批量上传服务
    pub fn new(api: Arc<dyn ScreeningApi>, batch_size: usize) -> Self {
        Self {
            api,
            // batch_size 为 0 会让 chunks() panic
            batch_size: batch_size.max(1),
        }
    }

    /// 顺序上传全部简历，返回每份简历的终态与整体统计
    pub async fn upload_all<F>(
        &self,
        documents: &[Document],
        mut on_status: F,
    ) -> (HashMap<String, UploadStatus>, UploadStats)
    where
        F: FnMut(&HashMap<String, UploadStatus>),
    {
        let mut statuses: HashMap<String, UploadStatus> = documents
            .iter()
            .map(|d| (d.name.clone(), UploadStatus::Pending))
            .collect();

        let total_batches = (documents.len() + self.batch_size - 1) / self.batch_size;
        let mut stats = UploadStats {
            total_batches,
            ..Default::default()
        };

        for (idx, chunk) in documents.chunks(self.batch_size).enumerate() {
            let batch_num = idx + 1;
            info!(
                "📦 正在上传第 {}/{} 批（{} 份简历）",
                batch_num,
                total_batches,
                chunk.len()
            );

            for document in chunk {
                statuses.insert(document.name.clone(), UploadStatus::Processing);
            }
            on_status(&statuses);

            match self.api.upload_batch(chunk).await {
                Ok(()) => {
                    for document in chunk {
                        statuses.insert(document.name.clone(), UploadStatus::Success);
                    }
                    stats.success += chunk.len();
                    info!("✓ 第 {} 批上传成功", batch_num);
                }
                Err(e) => {
                    // 批次对客户端是原子的：失败时本批全部标记 error，继续下一批
                    for document in chunk {
                        statuses.insert(document.name.clone(), UploadStatus::Error);
                    }
                    stats.failed += chunk.len();
                    warn!("⚠️ 第 {} 批上传失败: {}", batch_num, e);
                }
            }
            on_status(&statuses);
        }

        (statuses, stats)
    }
}
