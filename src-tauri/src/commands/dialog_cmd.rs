use site_content::{ApiError, AttachmentRef};
use tauri::{command, AppHandle, Runtime};
use tauri_plugin_dialog::DialogExt;

/// Native multi-file picker restricted to PDFs
#[command]
pub async fn pick_attachments<R: Runtime>(app: AppHandle<R>) -> Result<Vec<AttachmentRef>, ApiError> {
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        let picked = app
            .dialog()
            .file()
            .add_filter("PDF documents", &["pdf"])
            .blocking_pick_files()
            .unwrap_or_default();

        let mut refs = Vec::with_capacity(picked.len());
        for file in picked {
            let path = file
                .into_path()
                .map_err(|e| ApiError::Server(format!("unusable file path: {}", e)))?;
            let size_bytes = std::fs::metadata(&path)
                .map(|meta| meta.len())
                .map_err(|e| ApiError::Server(format!("cannot stat {}: {}", path.display(), e)))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            refs.push(AttachmentRef {
                path: path.to_string_lossy().into_owned(),
                file_name,
                size_bytes,
            });
        }
        Ok(refs)
    }
    #[cfg(any(target_os = "android", target_os = "ios"))]
    {
        // Not supported/implemented on mobile for now
        let _ = app;
        Ok(Vec::new())
    }
}
