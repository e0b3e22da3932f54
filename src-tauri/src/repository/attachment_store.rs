//! Attachment Storage
//!
//! Copies picked PDFs into app storage under their content hash, so the
//! same file uploaded twice is stored once.

use std::path::{Path, PathBuf};

use site_content::{AttachmentLimits, AttachmentRef};

use crate::domain::{DomainError, DomainResult, StoredAttachment};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Whether `bytes` (read from `path`) look like a PDF document
pub fn is_pdf(path: &Path, bytes: &[u8]) -> bool {
    let guessed = mime_guess::from_path(path).first_or_octet_stream();
    guessed.essence_str() == "application/pdf" && bytes.starts_with(PDF_MAGIC)
}

pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and copy one picked file; the returned record has no id yet
    pub async fn store(
        &self,
        file: &AttachmentRef,
        limits: AttachmentLimits,
    ) -> DomainResult<StoredAttachment> {
        let bytes = read_checked(file, limits).await?;
        self.persist(file, &bytes).await
    }

    /// Store every file, or none: all files are checked before any is copied
    pub async fn store_all(
        &self,
        files: &[AttachmentRef],
        limits: AttachmentLimits,
    ) -> DomainResult<Vec<StoredAttachment>> {
        let mut checked = Vec::with_capacity(files.len());
        for file in files {
            checked.push(read_checked(file, limits).await?);
        }

        let mut stored = Vec::with_capacity(files.len());
        for (file, bytes) in files.iter().zip(&checked) {
            stored.push(self.persist(file, bytes).await?);
        }
        Ok(stored)
    }

    async fn persist(&self, file: &AttachmentRef, bytes: &[u8]) -> DomainResult<StoredAttachment> {
        let content_hash = blake3::hash(bytes).to_hex().to_string();
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(DomainError::internal)?;
        let target = self.root.join(format!("{}.pdf", content_hash));
        if !tokio::fs::try_exists(&target).await.unwrap_or(false) {
            tokio::fs::write(&target, bytes)
                .await
                .map_err(DomainError::internal)?;
        }

        Ok(StoredAttachment {
            id: 0,
            file_name: file.file_name.clone(),
            size_bytes: bytes.len() as u64,
            content_hash,
            stored_path: target.to_string_lossy().into_owned(),
        })
    }
}

fn too_large(file: &AttachmentRef, limits: AttachmentLimits) -> DomainError {
    DomainError::invalid(
        "attachments",
        format!("{} exceeds {} bytes", file.file_name, limits.max_bytes),
    )
}

/// Read a picked file once it is known to fit the limits, then check its type
async fn read_checked(file: &AttachmentRef, limits: AttachmentLimits) -> DomainResult<Vec<u8>> {
    let source = Path::new(&file.path);
    let unreadable = |e: std::io::Error| {
        DomainError::invalid("attachments", format!("cannot read {}: {}", file.file_name, e))
    };

    // size reported by the picker may be stale
    let on_disk = tokio::fs::metadata(source).await.map_err(unreadable)?.len();
    if on_disk > limits.max_bytes {
        return Err(too_large(file, limits));
    }

    let bytes = tokio::fs::read(source).await.map_err(unreadable)?;
    // the file may have grown since the metadata call
    if bytes.len() as u64 > limits.max_bytes {
        return Err(too_large(file, limits));
    }
    if !is_pdf(source, &bytes) {
        return Err(DomainError::invalid(
            "attachments",
            format!("{} is not a PDF", file.file_name),
        ));
    }
    Ok(bytes)
}
