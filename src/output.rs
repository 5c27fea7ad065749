//! User-facing terminal output.
//! Prefixed, coloured lines for humans; colours only when stdout is a TTY.
//! Primary command output (file contents, timestamps) goes through
//! `print_user` unprefixed so it can be scripted against.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn emit(tone: Tone, msg: &str) {
    let label = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Success => "ok:",
    };
    let prefix = if is_tty() {
        match tone {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Success => label.green().bold().to_string(),
        }
    } else {
        label.to_string()
    };
    match tone {
        Tone::Warn | Tone::Error => eprintln!("{} {}", prefix, msg),
        Tone::Info | Tone::Success => println!("{} {}", prefix, msg),
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Success, msg);
}

/// Print a plain line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
