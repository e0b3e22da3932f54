//! PLS Site Admin Backend
//!
//! Layered architecture:
//! - domain: Stored entities and the backend error type
//! - repository: SQLite storage for sections, documents and submissions
//! - commands: Tauri command handlers

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use tauri::http::Response;
use tauri::Manager;

mod commands;
mod config;
mod domain;
mod repository;

use config::SiteConfig;
use repository::{
    init_db, AttachmentStore, DocumentRepository, HomeRepository, SectionRepository,
    SubmissionRepository,
};

/// Application state shared across commands
pub struct AppState {
    pub sections: SectionRepository,
    pub documents: DocumentRepository,
    pub home: HomeRepository,
    pub submissions: SubmissionRepository,
    pub attachments: AttachmentStore,
    pub config: SiteConfig,
    /// Root served by the `asset` URI scheme
    pub media_root: PathBuf,
}

fn bytes_response(status: u16, mime: Option<&str>, body: Vec<u8>) -> Response<Vec<u8>> {
    let mut builder = Response::builder().status(status);
    if let Some(mime) = mime {
        builder = builder
            .header("Content-Type", mime)
            .header("Access-Control-Allow-Origin", "*");
    }
    builder
        .body(body)
        .unwrap_or_else(|_| Response::new(Vec::new()))
}

/// Map a request path onto a file under `root`, refusing to escape it
fn media_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(uri_path).decode_utf8_lossy().to_string();
    let relative = Path::new(decoded.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

fn serve_media(root: &Path, uri_path: &str) -> Response<Vec<u8>> {
    let Some(path) = media_path(root, uri_path) else {
        return bytes_response(403, None, Vec::new());
    };
    if !path.is_file() {
        return bytes_response(404, None, Vec::new());
    }
    match std::fs::read(&path) {
        Ok(content) => {
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
            bytes_response(200, Some(mime_type.as_ref()), content)
        }
        Err(e) => {
            log::error!("failed to read media {}: {}", path.display(), e);
            bytes_response(500, None, Vec::new())
        }
    }
}

fn build_state(app: &tauri::AppHandle) -> Result<AppState, Box<dyn std::error::Error>> {
    let config_dir = app.path().app_config_dir()?;
    let data_dir = app.path().app_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let config = SiteConfig::load(&config_dir)?;

    rolling_logger::init_logger(
        app.path().app_log_dir()?,
        "PlsSiteAdmin",
        &config.log_level,
        config.log_retention_files,
    )?;

    let media_root = config.media_root(&data_dir);
    std::fs::create_dir_all(&media_root)?;

    let db_path = data_dir.join(&config.database_file);
    let conn = init_db(&db_path)?;
    log::info!("database ready at {}", db_path.display());

    Ok(AppState {
        sections: SectionRepository::new(conn.clone()),
        documents: DocumentRepository::new(conn.clone()),
        home: HomeRepository::new(conn.clone()),
        submissions: SubmissionRepository::new(conn),
        attachments: AttachmentStore::new(data_dir.join("attachments")),
        config,
        media_root,
    })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .register_asynchronous_uri_scheme_protocol("asset", |ctx, request, responder| {
            let root = ctx
                .app_handle()
                .try_state::<AppState>()
                .map(|state| state.media_root.clone());
            let uri_path = request.uri().path().to_string();
            std::thread::spawn(move || {
                let response = match root {
                    Some(root) => serve_media(&root, &uri_path),
                    None => bytes_response(503, None, Vec::new()),
                };
                responder.respond(response);
            });
        })
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let state = build_state(app.handle())?;
            app.manage(state);
            let _ = rolling_logger::info("PLS site admin started");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Homepage sections
            commands::get_home_page,
            commands::get_section,
            commands::save_section,
            commands::delete_section_item,
            commands::get_quality_digital,
            commands::save_quality_digital,
            commands::delete_digital_service,
            // Singleton documents
            commands::get_section_images,
            commands::save_section_images,
            commands::get_pls_advantage,
            commands::save_pls_advantage,
            // Intake
            commands::submit_contact,
            commands::submit_quote,
            commands::submit_hire_us,
            commands::submit_freelancer,
            commands::submit_get_started,
            commands::list_submissions,
            commands::get_submission,
            commands::delete_submission,
            commands::pick_attachments,
            // Config and diagnostics
            commands::get_site_config,
            commands::recent_logs,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_path_stays_under_root() {
        let root = Path::new("/data/media");
        assert_eq!(
            media_path(root, "/services/top%20banner.png"),
            Some(PathBuf::from("/data/media/services/top banner.png"))
        );
        assert_eq!(media_path(root, "/../secrets.toml"), None);
        assert_eq!(media_path(root, "/a/%2E%2E/b.png"), None);
    }

    #[test]
    fn test_missing_media_is_404() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(serve_media(dir.path(), "/nope.png").status(), 404);

        std::fs::write(dir.path().join("logo.png"), b"png").unwrap();
        let response = serve_media(dir.path(), "/logo.png");
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "image/png");
    }
}
