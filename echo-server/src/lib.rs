//! Development server that mounts the echo scripts under `/cgi-bin/`.
//!
//! Each request is turned into a `CgiRequest`, run through the same handler
//! the CGI executable uses, and the `CgiResponse` is sent back as an HTTP
//! response.

use std::{path::PathBuf, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use echo_core::{
    cgi::list_files, handlers, parse_cookie_headers, CgiRequest, CgiResponse, Script,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory listed by the `relative-files` script.
    pub scripts_dir: PathBuf,
}

pub type SharedConfig = Arc<AppConfig>;

pub fn app(config: AppConfig) -> Router {
    Router::new()
        .route("/cgi-bin/{script}", get(run_script).post(run_script))
        // Bodies are echoed whole, as the CGI executables do.
        .layer(DefaultBodyLimit::disable())
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: AppConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn run_script(
    State(config): State<SharedConfig>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let script = Script::from_name(&name).ok_or(StatusCode::NOT_FOUND)?;

    let cookies = parse_cookie_headers(
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    );
    let request = CgiRequest {
        cookies,
        body: body.to_vec(),
    };
    info!(
        %script,
        cookies = request.cookies.len(),
        body_len = request.body.len(),
        "running script"
    );

    let response = match script {
        Script::Cookies => handlers::cookie_echo(&request),
        Script::BodyEcho => handlers::body_echo(&request),
        Script::RelativeFiles => {
            let dir = config.scripts_dir.clone();
            let files = tokio::task::spawn_blocking(move || list_files(&dir, None))
                .await
                .map_err(|e| {
                    error!(error = %e, "listing task failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                })?
                .map_err(|e| {
                    error!(dir = ?config.scripts_dir, error = %e, "cannot list scripts directory");
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;
            handlers::file_listing(&files)
        }
    };

    Ok(into_http(response))
}

fn into_http(response: CgiResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut http = (
        status,
        [(header::CONTENT_TYPE, response.content_type.as_str())],
        response.body,
    )
        .into_response();

    if let Some(cookie) = &response.set_cookie {
        match HeaderValue::from_str(&cookie.header_value()) {
            Ok(value) => {
                http.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = %cookie.name, error = %e, "dropping unrepresentable cookie"),
        }
    }
    http
}
