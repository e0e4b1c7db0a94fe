use crate::models::Document;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 支持的简历文件扩展名
const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "txt"];

/// 读取单个简历文件为 Document 对象
pub async fn load_resume_file(path: &Path) -> Result<Document> {
    let content = fs::read(path)
        .await
        .with_context(|| format!("无法读取简历文件: {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Document::new(name, content))
}

/// 从文件夹中加载所有简历文件
pub async fn load_all_resume_files(folder_path: &str) -> Result<Vec<Document>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut documents = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_resume = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| RESUME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if is_resume {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_resume_file(&path).await {
                Ok(document) => {
                    tracing::info!("成功加载 {} ({} 字节)", document.name, document.content.len());
                    documents.push(document);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_all_from_missing_folder() {
        let result = load_all_resume_files("definitely_missing_folder_42").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_all_filters_by_extension() {
        let dir = std::env::temp_dir().join("resume_loader_test_ext");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.pdf"), b"%PDF-1.4 fake").unwrap();
        std::fs::write(dir.join("b.txt"), b"plain resume").unwrap();
        std::fs::write(dir.join("notes.md"), b"not a resume").unwrap();

        let documents = load_all_resume_files(dir.to_str().unwrap()).await.unwrap();
        let mut names: Vec<_> = documents.iter().map(|d| d.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["a.pdf", "b.txt"]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
