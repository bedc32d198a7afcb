use crate::bindings::Command;
use tracing::{debug, warn};

/// Used when nothing better can be found on `PATH`.
pub const FALLBACK_TERMINAL: &str = "xterm";

const KNOWN_TERMINALS: &[&str] = &[
    "roxterm",
    "sakura",
    "hyper",
    "alacritty",
    "terminator",
    "termite",
    "gnome-terminal",
    "konsole",
    "xfce4-terminal",
    "lxterminal",
    "mate-terminal",
    "kitty",
    "yakuake",
    "tilix",
    "guake",
    "eterm",
    "st",
    "urxvt",
    "wezterm",
    "xterm",
    "x-terminal-emulator",
];

/// `$TERMINAL` if it names something runnable, otherwise the first known
/// terminal emulator found by `installed`.
pub fn guess_terminal<F>(preferred: Option<&str>, installed: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    if let Some(term) = preferred.filter(|t| !t.is_empty()) {
        if installed(term) {
            return Some(term.to_owned());
        }
        warn!(%term, "$TERMINAL is not installed, looking for another terminal");
    }

    KNOWN_TERMINALS
        .iter()
        .find(|t| installed(t))
        .map(|t| t.to_string())
}

/// The terminal bound to the launch key, spawned with no arguments.
pub fn detect() -> Command {
    let preferred = std::env::var("TERMINAL").ok();
    let program = guess_terminal(preferred.as_deref(), |t| which::which(t).is_ok())
        .unwrap_or_else(|| FALLBACK_TERMINAL.to_owned());
    debug!(%program, "selected terminal");

    Command::new(program)
}
