use std::fmt::Write as _;

use crate::config::{CONFIG_FILE, DEFAULT_BIND};
use crate::error::Error;

/// ANSI bold, for markdown headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// States what happened and, where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::TextNotFoundAnywhere { tried } => render_text_not_found_anywhere(tried),
        Error::ServiceUnavailable { reason } => render_service_unavailable(reason),
        Error::InvalidRequest { reason } => render_invalid_request(reason),
        Error::Bind { addr, source } => render_bind(addr, source),
        _ => render_generic(e),
    };
}

/// Variants with a message and no fix.
fn render_generic(e: &Error) -> String {
    return match e {
        Error::FileNotFound { name } => format!("\
# Error: File Not Found

`{name}` does not exist.
"),

        Error::TextNotFound { name } => format!("\
# Error: Text Not Found

`{name}` does not contain the edited text. It may come from a component,
a translation file, or data rather than the page source.
"),

        Error::ConfigInvalid { path, source } => format!("\
# Error: Invalid Config

Could not parse `{}`:

{source}
", path.display()),

        Error::Io { name, source } => format!("\
# Error: I/O

`{name}`: {source}
"),

        _ => format!("\
# Error

{e}
"),
    };
}

/// Lists every tried candidate, then points at `--file`.
fn render_text_not_found_anywhere(tried: &[String]) -> String {
    let mut out = "\
# Error: Text Not Found Anywhere

None of the candidate files contains the edited text.

## Tried

"
    .to_string();
    for name in tried {
        let _ = writeln!(out, "- `{name}`");
    }
    let _ = write!(out, "\
\n## Fix

Point at the file that renders this text:

    livetext save <page> --file path/to/Component.tsx ...

or set `explicit_file` in `{CONFIG_FILE}`.
");
    return out;
}

/// Suggests starting the service.
fn render_service_unavailable(reason: &str) -> String {
    return format!("\
# Error: Service Unavailable

{reason}

## Fix

Start the patch service in the project directory:

    livetext serve --bind {DEFAULT_BIND}
");
}

/// Restates what a complete request needs.
fn render_invalid_request(reason: &str) -> String {
    return format!("\
# Error: Invalid Request

{reason}

## Fix

A save needs a project root or an explicit file (`--root` / `--file`, or
`project_root` / `explicit_file` in `{CONFIG_FILE}`), a non-empty old text,
and a new text that differs from it.
");
}

/// Suggests another address.
fn render_bind(addr: &str, source: &std::io::Error) -> String {
    return format!("\
# Error: Cannot Bind

`{addr}`: {source}

## Fix

Another process may be using the port. Stop it, or pick another address:

    livetext serve --bind 127.0.0.1:3457
");
}
