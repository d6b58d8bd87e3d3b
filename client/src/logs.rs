//! Colored console output for a run: `[LEVEL] label message` lines, with warnings and errors on
//! stderr.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

/// Color of the label that follows the level tag.
pub const LABEL_COLOR: Color = Color::TrueColor {
    r: 40,
    g: 100,
    b: 153,
};

/// Color of the key in a [`print_kv!`](crate::print_kv) line.
pub const KEY_COLOR: Color = Color::TrueColor {
    r: 192,
    g: 192,
    b: 192,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[rustfmt::skip]
impl Level {
    pub fn color(self) -> Color {
        match self {
            Self::Info    => Color::TrueColor { r: 0,   g: 95,  b: 255 },
            Self::Success => Color::TrueColor { r: 255, g: 215, b: 87  },
            Self::Warning => Color::TrueColor { r: 180, g: 105, b: 0   },
            Self::Error   => Color::TrueColor { r: 255, g: 0,   b: 45  },
        }
    }

    fn is_diagnostic(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Renders one log line. Colors are dropped when the output isn't a terminal.
pub fn format_line(level: Level, label: impl Display, msg: impl Display) -> String {
    format!(
        "[{}] {} {}",
        level.to_string().color(level.color()),
        label.to_string().color(LABEL_COLOR),
        msg.to_string().bright_black()
    )
}

fn log(level: Level, label: impl Display, msg: impl Display) {
    let line = format_line(level, label, msg);
    if level.is_diagnostic() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn log_info(label: impl Display, msg: impl Display) {
    log(Level::Info, label, msg)
}

pub fn log_success(label: impl Display, msg: impl Display) {
    log(Level::Success, label, msg)
}

pub fn log_warning(label: impl Display, msg: impl Display) {
    log(Level::Warning, label, msg)
}

pub fn log_error(label: impl Display, msg: impl Display) {
    log(Level::Error, label, msg)
}

/// Prints a `key: value` line with the key dimmed, e.g. for echoing resolved settings.
#[macro_export]
macro_rules! print_kv {
    ($key:expr, $value:expr $(,)?) => {{
        use ::colored::Colorize;
        println!(
            "{}: {}",
            $key.to_string().color($crate::logs::KEY_COLOR),
            $value
        );
    }};
}

/// One error line per link of the chain, outermost first. For a failed run the outermost link is
/// the [`Stage`](crate::error::Stage) it failed in.
pub fn error_chain_lines(error: &anyhow::Error) -> Vec<String> {
    error
        .chain()
        .enumerate()
        .map(|(depth, cause)| {
            let label = if depth == 0 { "Failed" } else { "  caused by" };
            format_line(Level::Error, label, cause)
        })
        .collect()
}

pub fn log_error_chain(error: &anyhow::Error) {
    for line in error_chain_lines(error) {
        eprintln!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;
    use crate::error::Stage;

    #[test]
    fn line_layout() {
        colored::control::set_override(false);
        assert_eq!(
            format_line(Level::Warning, "Low balance", "0.5 SOL"),
            "[WARNING] Low balance 0.5 SOL"
        );
    }

    #[test]
    fn chain_starts_at_the_failed_stage() {
        colored::control::set_override(false);
        let error = Err::<(), _>(anyhow::anyhow!("Blockhash not found"))
            .context("Failed transaction submission")
            .context(Stage::Invoke)
            .unwrap_err();

        assert_eq!(
            error_chain_lines(&error),
            [
                format!("[ERROR] Failed {}", Stage::Invoke),
                "[ERROR]   caused by Failed transaction submission".to_string(),
                "[ERROR]   caused by Blockhash not found".to_string(),
            ]
        );
    }

    #[test]
    fn only_warnings_and_errors_are_diagnostics() {
        assert!(!Level::Info.is_diagnostic());
        assert!(!Level::Success.is_diagnostic());
        assert!(Level::Warning.is_diagnostic());
        assert!(Level::Error.is_diagnostic());
    }
}
