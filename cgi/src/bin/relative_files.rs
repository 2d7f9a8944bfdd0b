use std::process::ExitCode;

use echo_core::Script;

fn main() -> ExitCode {
    echo_cgi::main_for(Script::RelativeFiles)
}
