// encplan-cli/src/output.rs
//
// Human-readable report printing for the CLI commands.

use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::IsTerminal;

const LABEL_WIDTH: usize = 16;

/// Color is used only on a terminal and when NO_COLOR is unset.
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!();
    if should_use_color() {
        println!("===== {} =====", title.to_uppercase().cyan().bold());
    } else {
        println!("===== {} =====", title.to_uppercase());
    }
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    let label = format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH);
    if should_use_color() {
        println!("  {}{}", label.bright_cyan(), value);
    } else {
        println!("  {}{}", label, value);
    }
}

pub fn print_success(message: &str) {
    if should_use_color() {
        println!("{}", message.green());
    } else {
        println!("{}", message);
    }
}

pub fn print_warning(message: &str) {
    if should_use_color() {
        println!("{}", message.yellow().bold());
    } else {
        println!("{}", message);
    }
}

pub fn print_error(message: &str) {
    if should_use_color() {
        println!("{}", message.bright_red());
    } else {
        println!("{}", message);
    }
}
