//! CGI executables for the echo scripts.
//!
//! # Overview
//! Each binary in `src/bin/` is one script. A CGI-capable web server starts
//! it per request with the CGI meta-variables in the environment and the
//! request body on stdin; the binary writes the response document to stdout.
//!
//! # Design
//! `run` does the work against explicit `CgiEnv`, reader and writer values
//! so it can be tested in-process. `main_for` binds it to the real process
//! environment and stdio. Logs go to stderr, which servers forward to their
//! error log, because stdout belongs to the response.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use echo_core::cgi::{list_sibling_files, SCRIPT_FILENAME};
use echo_core::{handlers, write_response, CgiEnv, CgiError, CgiRequest, CgiResponse, Script};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Run `script` for one request.
pub fn run<R: Read, W: Write>(
    script: Script,
    env: &CgiEnv,
    stdin: R,
    stdout: &mut W,
) -> Result<(), CgiError> {
    let request = CgiRequest::from_cgi(env, stdin)?;
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
            let files = list_sibling_files(&script_path(env)?)?;
            handlers::file_listing(&files)
        }
    };

    write_response(&response, stdout)?;
    Ok(())
}

/// Path of the running script: `SCRIPT_FILENAME` when the server provides
/// it, otherwise the executable itself.
fn script_path(env: &CgiEnv) -> Result<PathBuf, CgiError> {
    match env.get(SCRIPT_FILENAME) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(std::env::current_exe()?),
    }
}

/// Entry point shared by the script binaries.
///
/// On failure the error is logged and a 500 document is written so the
/// server has a well-formed response to relay.
pub fn main_for(script: Script) -> ExitCode {
    init_tracing();

    let env = CgiEnv::from_process();
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match run(script, &env, stdin, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%script, error = %e, "script failed");
            if let Err(e) = write_response(&CgiResponse::internal_error(), &mut stdout) {
                error!(error = %e, "cannot write error document");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}
