//! 上传文件的暂存与提交
//!
//! 文件先写入 `<upload_dir>/.staging/<stored_name>`，流结束后再原子重命名到
//! `<upload_dir>/<stored_name>`。未提交的暂存文件在 drop 时删除，
//! 存储目录里因此只会出现完整的文件。

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::{Result, UploadError};
use crate::models::uploads::entities::FileDescriptor;

/// 暂存目录名
pub const STAGING_DIR: &str = ".staging";

/// 生成唯一的存储文件名（32 位十六进制）
pub fn generate_stored_name() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 确保存储目录及其暂存目录存在
pub async fn ensure_dirs(upload_dir: &Path) -> Result<()> {
    fs::create_dir_all(upload_dir.join(STAGING_DIR))
        .await
        .map_err(|e| {
            UploadError::file_operation(format!(
                "Failed to create upload directory {}: {e}",
                upload_dir.display()
            ))
        })
}

/// 正在写入的暂存文件
pub struct StagedFile {
    file: Option<fs::File>,
    staging_path: PathBuf,
    stored_name: String,
    original_name: String,
    mime_type: String,
    size: usize,
    committed: bool,
}

impl StagedFile {
    pub async fn create(
        upload_dir: &Path,
        original_name: String,
        mime_type: String,
    ) -> Result<Self> {
        let stored_name = generate_stored_name();
        let staging_path = upload_dir.join(STAGING_DIR).join(&stored_name);

        // create_new 保证不会覆盖已有文件
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging_path)
            .await?;

        Ok(Self {
            file: Some(file),
            staging_path,
            stored_name,
            original_name,
            mime_type,
            size: 0,
            committed: false,
        })
    }

    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// 追加一段数据，超过 `max_size` 时返回 413
    pub async fn write_chunk(&mut self, chunk: &[u8], max_size: usize) -> Result<()> {
        let new_size = self.size + chunk.len();
        if new_size > max_size {
            return Err(UploadError::payload_too_large(format!(
                "File size exceeds the limit of {max_size} bytes"
            )));
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| UploadError::file_operation("Staged file is already closed"))?;
        file.write_all(chunk).await?;
        self.size = new_size;
        Ok(())
    }

    /// 刷盘并移入存储目录
    ///
    /// 返回的 [`CommittedFile`] 在 drop 时删除文件，记录写入成功后调用 `keep` 保留。
    pub async fn commit(mut self, upload_dir: &Path) -> Result<CommittedFile> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }

        let final_path = upload_dir.join(&self.stored_name);
        fs::rename(&self.staging_path, &final_path).await?;
        self.committed = true;

        Ok(CommittedFile {
            descriptor: FileDescriptor {
                stored_name: std::mem::take(&mut self.stored_name),
                original_name: std::mem::take(&mut self.original_name),
                mime_type: std::mem::take(&mut self.mime_type),
                size_bytes: self.size as i64,
                path: final_path.to_string_lossy().into_owned(),
            },
            kept: false,
        })
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        drop(self.file.take());
        if remove_quietly(&self.staging_path) {
            tracing::debug!("Discarded staged upload {}", self.stored_name);
        }
    }
}

/// 已进入存储目录、但还没有对应记录的文件
///
/// 请求在写入记录前失败或被取消（客户端断开、超时）时，drop 会删除文件，
/// 存储目录里不会留下没有记录的文件。
pub struct CommittedFile {
    descriptor: FileDescriptor,
    kept: bool,
}

impl CommittedFile {
    pub fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    /// 记录已写入，保留文件
    pub fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for CommittedFile {
    fn drop(&mut self) {
        if self.kept {
            return;
        }
        if remove_quietly(Path::new(&self.descriptor.path)) {
            tracing::warn!(
                "Removed {} because its record was never written",
                self.descriptor.stored_name
            );
        }
    }
}

// drop 中没有 await，只能同步删除；单次 unlink 不会长时间占用 worker
fn remove_quietly(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::error!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn staging_entries(dir: &Path) -> usize {
        let mut entries = fs::read_dir(dir.join(STAGING_DIR)).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[test]
    fn test_stored_names_are_unique_hex() {
        let a = generate_stored_name();
        let b = generate_stored_name();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[actix_web::test]
    async fn test_commit_moves_file_into_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        ensure_dirs(dir.path()).await.unwrap();

        let mut staged =
            StagedFile::create(dir.path(), "notes.txt".into(), "text/plain".into())
                .await
                .unwrap();
        staged.write_chunk(b"hello ", 64).await.unwrap();
        staged.write_chunk(b"world", 64).await.unwrap();
        assert_eq!(staged.size(), 11);

        let committed = staged.commit(dir.path()).await.unwrap();
        let descriptor = committed.descriptor().clone();
        committed.keep();
        assert_eq!(descriptor.original_name, "notes.txt");
        assert_eq!(descriptor.mime_type, "text/plain");
        assert_eq!(descriptor.size_bytes, 11);
        assert_eq!(
            PathBuf::from(&descriptor.path),
            dir.path().join(&descriptor.stored_name)
        );
        assert_eq!(fs::read(&descriptor.path).await.unwrap(), b"hello world");
        assert_eq!(staging_entries(dir.path()).await, 0);
    }

    #[actix_web::test]
    async fn test_oversized_chunk_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        ensure_dirs(dir.path()).await.unwrap();

        let mut staged = StagedFile::create(dir.path(), "big.bin".into(), "x/y".into())
            .await
            .unwrap();
        staged.write_chunk(b"1234", 6).await.unwrap();
        let err = staged.write_chunk(b"567", 6).await.unwrap_err();
        assert_eq!(err.code(), "E006");
        assert_eq!(staged.size(), 4);
    }

    #[actix_web::test]
    async fn test_dropped_stage_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        ensure_dirs(dir.path()).await.unwrap();

        let mut staged = StagedFile::create(dir.path(), "a.txt".into(), "text/plain".into())
            .await
            .unwrap();
        staged.write_chunk(b"partial", 64).await.unwrap();
        assert_eq!(staging_entries(dir.path()).await, 1);

        drop(staged);
        assert_eq!(staging_entries(dir.path()).await, 0);
    }

    #[actix_web::test]
    async fn test_committed_file_removed_unless_kept() {
        let dir = tempfile::tempdir().unwrap();
        ensure_dirs(dir.path()).await.unwrap();

        let mut staged = StagedFile::create(dir.path(), "a.txt".into(), "text/plain".into())
            .await
            .unwrap();
        staged.write_chunk(b"orphan", 64).await.unwrap();
        let committed = staged.commit(dir.path()).await.unwrap();
        let path = PathBuf::from(&committed.descriptor().path);
        assert!(path.exists());

        drop(committed);
        assert!(!path.exists());
        assert_eq!(staging_entries(dir.path()).await, 0);
    }
}
