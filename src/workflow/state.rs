//! 筛选工作流的共享状态
//!
//! 所有工作流字段集中在一个聚合里，由流程层单独持有，
//! 保证"同一时刻只有一次筛选在进行"这一不变量

use crate::models::{Document, MatchRecord, UploadStatus};
use std::collections::HashMap;

/// 一次筛选工作流的聚合状态
///
/// - `processing` 从上传开始到匹配阶段结束（成功或失败）为 true，
///   推送阶段不延长它
/// - `matches` 为 None 表示没有完成的运行或运行无结果；
///   有值时一定是非空且按得分降序的列表
#[derive(Debug, Default)]
pub struct WorkflowState {
    /// 待筛选的简历列表
    pub documents: Vec<Document>,
    /// 文件名 -> 上传状态
    pub statuses: HashMap<String, UploadStatus>,
    /// 职位描述文本
    pub jd_text: String,
    /// 候选人入围数量
    pub top_k: usize,
    /// 最近一次完成的匹配结果
    pub matches: Option<Vec<MatchRecord>>,
    /// 是否有筛选在进行中
    pub processing: bool,
}

impl WorkflowState {
    /// 创建新的工作流状态
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            ..Default::default()
        }
    }

    /// 合并一份状态快照（只覆盖触达的键，其余保留）
    pub fn merge_statuses(&mut self, snapshot: &HashMap<String, UploadStatus>) {
        for (name, status) in snapshot {
            self.statuses.insert(name.clone(), *status);
        }
    }
}

/// 一次筛选的最终结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScreeningOutcome {
    /// 找到匹配的候选人（非空、按得分降序）
    Matched(Vec<MatchRecord>),
    /// 匹配成功但没有候选人入围，建议放宽筛选条件
    NoMatches,
}
