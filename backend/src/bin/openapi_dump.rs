//! Print the OpenAPI document as JSON.

use std::process::ExitCode;

use gatehouse::doc::ApiDoc;
use utoipa::OpenApi;

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "writing the document to the terminal is this tool's purpose"
)]
fn main() -> ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialise OpenAPI document: {err}");
            ExitCode::FAILURE
        }
    }
}
