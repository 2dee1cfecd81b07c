use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use notify::{Event, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use tower_livereload::LiveReloadLayer;

use crate::codegen::NavOutput;
use crate::config::NavConfig;
use crate::export;
use crate::template::{BaseTemplate, DirTemplateSource, StaticTemplateSource, TemplateSource};
use crate::update::ConfigUpdate;

mod css;
mod page;

struct DevState {
    template: DirTemplateSource,
    /// When set, the config is re-read from disk on every request and
    /// `/update` writes back to it.
    config_path: Option<PathBuf>,
    config: NavConfig,
}

type SharedState = Arc<Mutex<DevState>>;

/// Start the preview server with live reload for a component directory.
pub async fn run_dev_server(
    template_dir: PathBuf,
    config_path: Option<PathBuf>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &config_path {
        Some(path) if path.exists() => NavConfig::load(path)?,
        _ => NavConfig::default(),
    };
    let state = Arc::new(Mutex::new(DevState {
        template: DirTemplateSource::new(&template_dir),
        config_path: config_path.clone(),
        config,
    }));

    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    // Template and config watcher
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                tracing::debug!(paths = ?event.paths, "change detected, reloading");
                reloader.reload();
            }
        }
    })?;
    watcher.watch(&template_dir, RecursiveMode::Recursive)?;
    if let Some(parent) = config_path.as_ref().and_then(|p| p.parent()) {
        let parent = if parent.as_os_str().is_empty() {
            std::path::Path::new(".")
        } else {
            parent
        };
        watcher.watch(parent, RecursiveMode::NonRecursive)?;
    }

    let app = Router::new()
        .route("/", get(serve_page))
        .route("/preview.html", get(serve_preview))
        .route("/config.json", get(serve_config))
        .route("/generate", post(serve_generate))
        .route("/update", post(serve_update))
        .route("/export/html", get(serve_export_html))
        .route("/export/css", get(serve_export_css))
        .layer(livereload)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    eprintln!("navgen preview server");
    eprintln!("  template:  {}", template_dir.display());
    if let Some(path) = &config_path {
        eprintln!("  config:    {}", path.display());
    }
    eprintln!("  preview:   http://localhost:{port}/");
    eprintln!("  frame:     http://localhost:{port}/preview.html");
    eprintln!("  watching for changes...");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    // Keep watcher alive
    drop(watcher);
    Ok(())
}

// ── Generation helper ─────────────────────────────────────────────────

/// The config to render with. The file wins when one is set, so hand edits
/// show up on the next request.
fn current_config(state: &SharedState) -> Result<NavConfig, String> {
    let (config_path, config) = match state.lock() {
        Ok(s) => (s.config_path.clone(), s.config.clone()),
        Err(e) => return Err(format!("Lock error: {e}")),
    };
    match config_path {
        Some(path) if path.exists() => NavConfig::load(&path).map_err(|e| e.to_string()),
        _ => Ok(config),
    }
}

fn template_source(state: &SharedState) -> Result<DirTemplateSource, String> {
    state
        .lock()
        .map(|s| s.template.clone())
        .map_err(|e| format!("Lock error: {e}"))
}

/// Fetch the template and regenerate with the current config. The config
/// comes back with the output so callers describe exactly what was rendered.
fn generate_current(state: &SharedState) -> (String, Result<(NavOutput, NavConfig), String>) {
    let source = match template_source(state) {
        Ok(s) => s,
        Err(e) => return (String::new(), Err(e)),
    };
    let label = source.describe();
    let result = current_config(state).and_then(|config| {
        crate::regenerate(&source, &config)
            .map(|output| (output, config))
            .map_err(|e| e.to_string())
    });
    (label, result)
}

// ── Route handlers ────────────────────────────────────────────────────

/// Serve the preview UI: rendered navigation plus generated code.
async fn serve_page(State(state): State<SharedState>) -> Html<String> {
    let (label, result) = generate_current(&state);
    match result {
        Ok((output, config)) => Html(page::build_preview_page(&output, &config, &label)),
        Err(e) => Html(page::build_error_page(&label, &e)),
    }
}

/// Serve the bare preview document (what the preview frame shows).
async fn serve_preview(State(state): State<SharedState>) -> Html<String> {
    let (label, result) = generate_current(&state);
    match result {
        Ok((output, _)) => Html(export::preview_document(&output)),
        Err(e) => Html(page::build_error_page(&label, &e)),
    }
}

async fn serve_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    match current_config(&state) {
        Ok(config) => Json(ConfigResponse {
            config: Some(config),
            error: None,
        }),
        Err(e) => Json(ConfigResponse {
            config: None,
            error: Some(e),
        }),
    }
}

#[derive(Serialize)]
struct ConfigResponse {
    config: Option<NavConfig>,
    error: Option<String>,
}

// ── POST /generate: stateless generation ──────────────────────────────

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    config: NavConfig,
    /// Inline template halves; a missing half comes from the served
    /// component directory.
    html: Option<String>,
    css: Option<String>,
}

#[derive(Serialize, Default)]
struct GenerateResponse {
    html: Option<String>,
    css: Option<String>,
    warnings: Vec<String>,
    error: Option<String>,
}

impl GenerateResponse {
    fn from_result(result: Result<NavOutput, String>) -> Self {
        match result {
            Ok(output) => Self {
                html: Some(output.html),
                css: Some(output.css),
                warnings: output.warnings,
                error: None,
            },
            Err(e) => Self {
                error: Some(e),
                ..Self::default()
            },
        }
    }
}

fn request_template(
    state: &SharedState,
    html: Option<String>,
    css: Option<String>,
) -> Result<BaseTemplate, String> {
    match (html, css) {
        (Some(html), Some(css)) => Ok(BaseTemplate::new(html, css)),
        (html, css) => {
            let served = template_source(state)?
                .fetch()
                .map_err(|e| e.to_string())?;
            Ok(BaseTemplate::new(
                html.unwrap_or(served.html),
                css.unwrap_or(served.css),
            ))
        }
    }
}

async fn serve_generate(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    let result = request_template(&state, req.html, req.css).and_then(|template| {
        crate::regenerate(&StaticTemplateSource(template), &req.config).map_err(|e| e.to_string())
    });
    Json(GenerateResponse::from_result(result))
}

// ── POST /update: apply one configurator change ───────────────────────

#[derive(Deserialize)]
struct UpdateRequest {
    field: String,
    #[serde(default)]
    value: String,
}

#[derive(Serialize)]
struct UpdateResponse {
    config: Option<NavConfig>,
    #[serde(flatten)]
    output: GenerateResponse,
}

async fn serve_update(
    State(state): State<SharedState>,
    Json(req): Json<UpdateRequest>,
) -> Json<UpdateResponse> {
    let applied = ConfigUpdate::from_field(&req.field, &req.value)
        .map_err(|e| e.to_string())
        .and_then(|update| apply_update(&state, update));
    let (next, source) = match applied {
        Ok(applied) => applied,
        Err(e) => {
            tracing::warn!(field = %req.field, "rejected update: {e}");
            return Json(UpdateResponse {
                config: None,
                output: GenerateResponse::from_result(Err(e)),
            });
        }
    };
    tracing::info!(field = %req.field, "applied update");

    let result = crate::regenerate(&source, &next).map_err(|e| e.to_string());
    Json(UpdateResponse {
        config: Some(next),
        output: GenerateResponse::from_result(result),
    })
}

/// Read, apply and persist under one lock so concurrent updates serialize
/// and none is lost. Returns the new config and the template to render it
/// against.
fn apply_update(
    state: &SharedState,
    update: ConfigUpdate,
) -> Result<(NavConfig, DirTemplateSource), String> {
    let mut s = state.lock().map_err(|e| format!("Lock error: {e}"))?;
    let current = match &s.config_path {
        Some(path) if path.exists() => NavConfig::load(path).map_err(|e| e.to_string())?,
        _ => s.config.clone(),
    };
    let next = current.apply(update).map_err(|e| e.to_string())?;
    if let Some(path) = &s.config_path {
        next.save(path).map_err(|e| e.to_string())?;
    }
    s.config = next.clone();
    Ok((next, s.template.clone()))
}

// ── Export routes ─────────────────────────────────────────────────────

async fn serve_export_html(
    State(state): State<SharedState>,
) -> ([(HeaderName, &'static str); 2], String) {
    let (_, result) = generate_current(&state);
    let body = match result {
        Ok((output, _)) => output.html,
        Err(e) => format!("<!-- Generation error: {} -->", e),
    };
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"nav.html\""),
        ],
        body,
    )
}

async fn serve_export_css(
    State(state): State<SharedState>,
) -> ([(HeaderName, &'static str); 2], String) {
    let (_, result) = generate_current(&state);
    let body = match result {
        Ok((output, _)) => output.css,
        Err(e) => format!("/* Generation error: {} */", e),
    };
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"nav.css\""),
        ],
        body,
    )
}
