use crate::{
    actions::{resolve, LogControl},
    groups::Group,
    KeyHandler, MOD_KEY,
};
use penrose::{
    builtin::actions::floating::{MouseDragHandler, MouseResizeHandler},
    core::bindings::{
        ModifierKey, MouseBindings, MouseButton as XButton, MouseEventHandler, MouseState,
    },
    x11rb::RustConn,
};
use std::{collections::HashMap, fmt};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Alt,
    Control,
    Shift,
    Super,
}

impl Modifier {
    fn prefix(self) -> &'static str {
        match self {
            Self::Alt => "A",
            Self::Control => "C",
            Self::Shift => "S",
            Self::Super => "M",
        }
    }

    fn key(self) -> ModifierKey {
        match self {
            Self::Alt => ModifierKey::Alt,
            Self::Control => ModifierKey::Ctrl,
            Self::Shift => ModifierKey::Shift,
            Self::Super => ModifierKey::Meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

/// An external program with a literal argument vector.
///
/// Arguments are never split on whitespace, so launcher flags such as a
/// quoted font name survive intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// The window manager operations a chord can be bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Focus(Direction),
    FocusNext,
    Shuffle(Direction),
    Grow(Direction),
    Normalize,
    ToggleSplit,
    NextLayout,
    Kill,
    Restart,
    Shutdown,
    Spawn(Command),
    SwitchToGroup(String),
    MoveToGroup { group: String, follow: bool },
    CycleLogLevel,
    DumpState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub mods: Vec<Modifier>,
    pub key: String,
    pub action: Action,
    pub desc: String,
}

impl KeyBinding {
    pub fn new(
        mods: &[Modifier],
        key: impl Into<String>,
        action: Action,
        desc: impl Into<String>,
    ) -> Self {
        let mut mods = mods.to_vec();
        mods.sort();
        mods.dedup();

        Self {
            mods,
            key: key.into(),
            action,
            desc: desc.into(),
        }
    }

    /// The chord in the `A-S-Return` form understood by penrose.
    pub fn chord(&self) -> String {
        self.mods
            .iter()
            .map(|m| m.prefix())
            .chain(std::iter::once(self.key.as_str()))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Everything that is not generated from the group set.
pub fn static_key_bindings(terminal: Command, launcher: Command) -> Vec<KeyBinding> {
    use Action::*;
    use Direction::*;
    use Modifier::{Control, Shift};

    let m = [MOD_KEY];
    let ms = [MOD_KEY, Shift];
    let mc = [MOD_KEY, Control];

    vec![
        // Switch between windows
        KeyBinding::new(&m, "h", Focus(Left), "Move focus to left"),
        KeyBinding::new(&m, "l", Focus(Right), "Move focus to right"),
        KeyBinding::new(&m, "j", Focus(Down), "Move focus down"),
        KeyBinding::new(&m, "k", Focus(Up), "Move focus up"),
        KeyBinding::new(&m, "space", FocusNext, "Move window focus to other window"),
        // Move windows within the current layout
        KeyBinding::new(&ms, "h", Shuffle(Left), "Move window to the left"),
        KeyBinding::new(&ms, "l", Shuffle(Right), "Move window to the right"),
        KeyBinding::new(&ms, "j", Shuffle(Down), "Move window down"),
        KeyBinding::new(&ms, "k", Shuffle(Up), "Move window up"),
        KeyBinding::new(&mc, "h", Grow(Left), "Grow window to the left"),
        KeyBinding::new(&mc, "l", Grow(Right), "Grow window to the right"),
        KeyBinding::new(&mc, "j", Grow(Down), "Grow window down"),
        KeyBinding::new(&mc, "k", Grow(Up), "Grow window up"),
        KeyBinding::new(&m, "n", Normalize, "Reset all window sizes"),
        KeyBinding::new(
            &ms,
            "Return",
            ToggleSplit,
            "Toggle between split and unsplit sides of stack",
        ),
        KeyBinding::new(&m, "Return", Spawn(terminal), "Launch terminal"),
        KeyBinding::new(&m, "Tab", NextLayout, "Toggle between layouts"),
        KeyBinding::new(&m, "w", Kill, "Kill focused window"),
        KeyBinding::new(&mc, "r", Restart, "Restart the window manager"),
        KeyBinding::new(&mc, "q", Shutdown, "Shutdown the window manager"),
        // Launchers
        KeyBinding::new(&m, "r", Spawn(launcher), "Spawn a command using a prompt"),
        KeyBinding::new(
            &ms,
            "s",
            Spawn(Command::new("flameshot").args(["gui"])),
            "Take a screenshot",
        ),
        // Debugging
        KeyBinding::new(&mc, "t", CycleLogLevel, "Cycle log verbosity"),
        KeyBinding::new(&mc, "d", DumpState, "Dump window manager state to the log"),
    ]
}

/// The full keymap: static entries followed by two entries per group.
pub fn key_bindings(terminal: Command, launcher: Command, groups: &[Group]) -> Vec<KeyBinding> {
    let mut bindings = static_key_bindings(terminal, launcher);
    for group in groups {
        bindings.extend(group.key_bindings());
    }

    bindings
}

/// Chord to handler map ready for `parse_keybindings_with_xmodmap`.
pub fn raw_key_bindings<L, S>(
    bindings: &[KeyBinding],
    log: &LogControl<L, S>,
) -> HashMap<String, KeyHandler>
where
    L: From<EnvFilter> + 'static,
    S: 'static,
{
    bindings
        .iter()
        .map(|b| {
            debug!(chord = %b.chord(), desc = %b.desc, "binding key");
            (b.chord(), resolve(&b.action, log))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    MoveFloating,
    ResizeFloating,
    BringToFront,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseBinding {
    pub mods: Vec<Modifier>,
    pub button: MouseButton,
    pub action: MouseAction,
}

/// Drag floating windows around with the main modifier held.
pub fn mouse_bindings() -> Vec<MouseBinding> {
    let binding = |button, action| MouseBinding {
        mods: vec![MOD_KEY],
        button,
        action,
    };

    vec![
        binding(MouseButton::Left, MouseAction::MoveFloating),
        binding(MouseButton::Right, MouseAction::ResizeFloating),
        binding(MouseButton::Middle, MouseAction::BringToFront),
    ]
}

pub fn raw_mouse_bindings(bindings: &[MouseBinding]) -> MouseBindings<RustConn> {
    let mut raw: MouseBindings<RustConn> = HashMap::new();

    for b in bindings {
        let handler: Box<dyn MouseEventHandler<RustConn>> = match b.action {
            MouseAction::MoveFloating => MouseDragHandler::boxed_default(),
            MouseAction::ResizeFloating => MouseResizeHandler::boxed_default(),
            MouseAction::BringToFront => {
                // penrose raises floating windows as they are focused
                debug!(button = ?b.button, "no handler needed for bring to front");
                continue;
            }
        };

        let button = match b.button {
            MouseButton::Left => XButton::Left,
            MouseButton::Middle => XButton::Middle,
            MouseButton::Right => XButton::Right,
        };

        let state = MouseState::new(button, b.mods.iter().map(|m| m.key()).collect());
        raw.insert(state, handler);
    }

    raw
}
