//! Step definitions for JSON API scenarios.
//!
//! Every step returns `Result<(), StepError>`; an `Err` fails the step with
//! the error's message.

mod given;
mod then;
mod when;

use cucumber::gherkin::Step;
use jsonapi_core::UsageError;
use jsonapi_exec::StepError;

/// The docstring attached to `step`, or a usage error naming the step.
fn docstring(step: &Step) -> Result<&str, StepError> {
    step.docstring.as_deref().map(strip_delimiter_newlines).ok_or_else(|| {
        UsageError(format!("The step '{}' requires a docstring.", step.value)).into()
    })
}

/// The parser keeps the line breaks next to the `"""` delimiters; the content
/// is what lies between them.
fn strip_delimiter_newlines(raw: &str) -> &str {
    let raw = raw
        .strip_prefix("\r\n")
        .or_else(|| raw.strip_prefix('\n'))
        .unwrap_or(raw);
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}
