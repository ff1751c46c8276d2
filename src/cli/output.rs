//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the shopping assistant.
//! The `*_line` and styling helpers return strings so the REPL can write them
//! to any writer.

use crate::agents::ToolCallRecord;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header = table_cells(columns);
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(columns.len() * 16).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(columns.len() * 16));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[&str]) {
        println!("    {}", table_cells(values));
    }

    /// Section label such as `User Query:`
    pub fn label(&self, text: &str) -> String {
        if self.colored {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dimmed(&self, text: &str) -> String {
        if self.colored {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// One line describing a tool invocation
    pub fn tool_call_line(&self, call: &ToolCallRecord) -> String {
        let timing = format!("({}µs)", call.duration_us);
        if self.colored {
            format!("  {} {} {}", "✓".green().bold(), call.name, timing.dimmed())
        } else {
            format!("  [TOOL] {} {}", call.name, timing)
        }
    }
}

fn table_cells(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("{:<15}", v))
        .collect::<Vec<_>>()
        .join(" ")
}
