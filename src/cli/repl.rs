//! Interactive read-eval-print loop
//!
//! Reads one line, answers it, repeats. `exit` in any case or end of input
//! ends the loop with a farewell.

use crate::agents::ShoppingAgent;
use crate::cli::output::Output;
use crate::cli::{EXAMPLE_QUERIES, FAREWELL};
use std::io::{BufRead, Write};
use tracing::debug;

pub const WELCOME: &str = "Welcome to the AI Shopping Assistant! (Type 'exit' to quit)";
pub const ASK: &str = "What would you like to know?";

/// Run the loop until `exit` or end of input.
pub fn run<R: BufRead, W: Write>(
    agent: &ShoppingAgent,
    mut input: R,
    out: &mut W,
    output: &Output,
    verbose: bool,
) -> std::io::Result<()> {
    writeln!(out, "{}", output.label(WELCOME))?;
    writeln!(out, "\nExample queries:")?;
    for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, query)?;
    }

    let mut line = String::new();
    loop {
        writeln!(out, "\n{}", ASK)?;
        write!(out, "{}", output.dimmed("> "))?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(out)?;
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") {
            break;
        }

        debug!(query, "repl query");
        let response = agent.process_query(query);
        writeln!(out, "\n{}", response.content)?;

        if verbose && !response.tool_calls.is_empty() {
            writeln!(out, "\n{}", output.label("Tool calls made:"))?;
            for call in &response.tool_calls {
                writeln!(out, "{}", output.tool_call_line(call))?;
            }
        }
    }

    writeln!(out, "{}", FAREWELL)?;
    out.flush()
}
