//! Terminal notification surface.

use va_console::{Notifier, Toast, ToastLevel};

/// Prints toasts to stderr, coloured by level, keeping stdout for data.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        eprintln!("{}", paint(&toast));
    }
}

fn paint(toast: &Toast) -> String {
    let (colour, tag) = match toast.level {
        ToastLevel::Success => ("32", "ok"),
        ToastLevel::Error => ("31", "error"),
        ToastLevel::Info => ("36", "info"),
    };
    format!("\x1B[{colour}m{tag}: {}\x1B[0m", toast.message)
}
