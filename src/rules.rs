//! Windows that skip tiling.
//!
//! penrose already floats dialogs, utility windows and friends based on
//! their window type. The rules here are appended on top of that for a few
//! known dialogs that do not set a useful type.
use penrose::{
    core::{hooks::ManageHook, State},
    extensions::hooks::manage::FloatingCentered,
    x::{Prop, XConn, XConnExt},
    Result, Xid,
};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    /// Either part (instance or class) of `WM_CLASS`.
    Class,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatingRule {
    pub field: MatchField,
    pub value: &'static str,
}

impl FloatingRule {
    pub const fn class(value: &'static str) -> Self {
        Self {
            field: MatchField::Class,
            value,
        }
    }

    pub const fn title(value: &'static str) -> Self {
        Self {
            field: MatchField::Title,
            value,
        }
    }

    pub fn matches(&self, window: &WindowInfo) -> bool {
        match self.field {
            MatchField::Class => window.classes.iter().any(|c| c == self.value),
            MatchField::Title => window.title == self.value,
        }
    }
}

/// The properties of a window that rules can match on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowInfo {
    pub classes: Vec<String>,
    pub title: String,
}

impl WindowInfo {
    pub fn query<X: XConn>(id: Xid, x: &X) -> Result<Self> {
        let classes = match x.get_prop(id, "WM_CLASS")? {
            Some(Prop::UTF8String(strs)) => strs,
            _ => Vec::new(),
        };

        Ok(Self {
            classes,
            title: x.window_title(id)?,
        })
    }
}

pub fn float_rules() -> Vec<FloatingRule> {
    vec![
        FloatingRule::class("confirmreset"), // gitk
        FloatingRule::class("makebranch"),   // gitk
        FloatingRule::class("maketag"),      // gitk
        FloatingRule::class("ssh-askpass"),
        FloatingRule::title("branchdialog"), // gitk
        FloatingRule::title("pinentry"),     // GPG key password entry
    ]
}

pub fn should_float(rules: &[FloatingRule], window: &WindowInfo) -> bool {
    rules.iter().any(|r| r.matches(window))
}

/// Manage hook floating any new client matched by one of its rules.
pub struct FloatRules {
    rules: Vec<FloatingRule>,
    placement: FloatingCentered,
}

impl FloatRules {
    pub fn new(rules: Vec<FloatingRule>) -> Self {
        Self {
            rules,
            placement: FloatingCentered::new(0.6, 0.6),
        }
    }
}

impl<X: XConn> ManageHook<X> for FloatRules {
    fn call(&mut self, client: Xid, state: &mut State<X>, x: &X) -> Result<()> {
        let info = WindowInfo::query(client, x)?;
        trace!(?client, ?info, "checking float rules");

        if should_float(&self.rules, &info) {
            debug!(?client, title = %info.title, "floating matched window");
            self.placement.call(client, state, x)?;
        }

        Ok(())
    }
}
