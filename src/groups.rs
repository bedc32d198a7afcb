use crate::{
    bindings::{Action, KeyBinding, Modifier},
    MOD_KEY,
};

/// One label per workspace, in the order they are bound and displayed.
pub const GROUP_LABELS: &str = "123456789";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Switch to this group, and move the focused window here and follow it.
    pub fn key_bindings(&self) -> [KeyBinding; 2] {
        let name = &self.name;

        [
            KeyBinding::new(
                &[MOD_KEY],
                name.as_str(),
                Action::SwitchToGroup(name.clone()),
                format!("Switch to group {name}"),
            ),
            KeyBinding::new(
                &[MOD_KEY, Modifier::Shift],
                name.as_str(),
                Action::MoveToGroup {
                    group: name.clone(),
                    follow: true,
                },
                format!("Switch to & move focused window to group {name}"),
            ),
        ]
    }
}

pub fn groups() -> Vec<Group> {
    GROUP_LABELS
        .chars()
        .map(|c| Group::new(c.to_string()))
        .collect()
}
