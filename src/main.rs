//! ccd binary entry point.
//!
//! The single place where errors become exit codes: field-level
//! validation errors render one line per field, a cancelled prompt
//! says so, everything else prints the error chain. All failures exit
//! with code 1.

use std::process::ExitCode;

use ccd::api::ApiError;
use ccd::ui::output;
use ccd::ui::prompts::PromptError;

fn main() -> ExitCode {
    match ccd::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    if let Some(ApiError::Validation(fields)) = err.downcast_ref::<ApiError>() {
        for field in fields {
            eprintln!("{}", field);
        }
        return;
    }
    if let Some(PromptError::Cancelled) = err.downcast_ref::<PromptError>() {
        eprintln!("cancelled");
        return;
    }
    output::error(format!("{:#}", err));
}
