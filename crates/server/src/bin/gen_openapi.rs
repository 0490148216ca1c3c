//! Print the OpenAPI document as JSON, e.g. `cargo run --bin gen-openapi > openapi.json`.

use server::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> std::process::ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(doc) => {
            println!("{doc}");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("could not serialize the OpenAPI document: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
