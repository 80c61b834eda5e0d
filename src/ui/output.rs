use crate::ui::theme;
use owo_colors::OwoColorize;

pub fn error(message: &str) {
    eprintln!("{} {}", "error:".style(theme().error.clone()), message);
}

pub fn warn(message: &str) {
    eprintln!(
        "{} {}",
        "warning:".style(theme().warn.clone()),
        message.style(theme().dim.clone())
    );
}
