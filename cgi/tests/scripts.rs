//! Run the built script executables the way a CGI host does: meta-variables
//! in a clean environment, body on stdin, response document on stdout.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use echo_core::parse_output;

fn run_script(exe: &str, vars: &[(&str, &str)], stdin: &[u8]) -> Output {
    let mut child = Command::new(exe)
        .env_clear()
        .envs(vars.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn script");
    child
        .stdin
        .take()
        .expect("stdin pipe")
        .write_all(stdin)
        .expect("write body");
    child.wait_with_output().expect("script output")
}

#[test]
fn cookies_sets_then_echoes() {
    let exe = env!("CARGO_BIN_EXE_cookies");

    let first = run_script(exe, &[], b"");
    assert!(first.status.success());
    let output = parse_output(&first.stdout).unwrap();
    assert_eq!(output.status, 200);
    assert_eq!(output.header("Content-Type"), Some("text/html"));
    assert_eq!(
        output.header("Set-Cookie"),
        Some("test_cookie=cookie_value; Max-Age=3600; Path=/")
    );

    let second = run_script(exe, &[("HTTP_COOKIE", "test_cookie=%3Cb%3E")], b"");
    assert!(second.status.success());
    let output = parse_output(&second.stdout).unwrap();
    assert!(output.header("Set-Cookie").is_none());
    assert_eq!(output.body, b"<p>Cookie empfangen: &lt;b&gt;</p>");
}

#[test]
fn body_echo_reads_stdin() {
    let exe = env!("CARGO_BIN_EXE_body-echo");

    let result = run_script(exe, &[("CONTENT_LENGTH", "9")], b"a=1&b=two");
    assert!(result.status.success());
    let output = parse_output(&result.stdout).unwrap();
    assert_eq!(output.header("Content-Type"), Some("text/plain"));
    assert_eq!(output.body, b"Body wurde empfangen.\n\nInhalt:\na=1&b=two");

    let result = run_script(exe, &[("CONTENT_LENGTH", "0")], b"");
    let output = parse_output(&result.stdout).unwrap();
    assert_eq!(output.body, b"Kein Body empfangen.");
}

#[test]
fn bad_content_length_yields_500_document() {
    let exe = env!("CARGO_BIN_EXE_body-echo");

    let result = run_script(exe, &[("CONTENT_LENGTH", "abc")], b"");
    assert!(!result.status.success());
    let output = parse_output(&result.stdout).unwrap();
    assert_eq!(output.status, 500);
    assert!(!result.stderr.is_empty(), "failure is logged to stderr");
}

#[test]
fn relative_files_lists_neighbours() {
    let exe = env!("CARGO_BIN_EXE_relative-files");
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("relative_files.py");
    std::fs::write(&script, b"").unwrap();
    std::fs::write(dir.path().join("index.php"), b"").unwrap();
    std::fs::write(dir.path().join("cookies.php"), b"").unwrap();
    std::fs::create_dir(dir.path().join("uploads")).unwrap();

    let script = script.to_string_lossy().into_owned();
    let result = run_script(exe, &[("SCRIPT_FILENAME", script.as_str())], b"");
    assert!(result.status.success());

    let output = parse_output(&result.stdout).unwrap();
    assert_eq!(output.header("Content-Type"), Some("text/html"));
    assert_eq!(
        String::from_utf8(output.body).unwrap(),
        "<html><body>\n\
         <p>Es wurden 2 Datei(en) gefunden.</p>\n\
         <ul>\n\
         <li>cookies.php</li>\n\
         <li>index.php</li>\n\
         </ul>\n\
         </body></html>\n"
    );
}
