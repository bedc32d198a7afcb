//! The complete set of tables handed to the window manager at startup.
use crate::{
    bar::BarConfig,
    bindings::{key_bindings, mouse_bindings, Command, KeyBinding, MouseBinding},
    groups::{groups, Group},
    hooks::Autostart,
    layouts::{default_layout, LayoutConfig},
    rice::Rice,
    rules::{float_rules, FloatingRule},
    Error, Result,
};
use std::{collections::HashSet, path::PathBuf};
use tracing::info;

/// Name reported to clients that insist on a window manager they know.
pub const WM_NAME: &str = "LG3D";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOnActivation {
    Focus,
    Smart,
    Urgent,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    pub focus_on_window_activation: FocusOnActivation,
    pub wm_name: String,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: FocusOnActivation::Smart,
            wm_name: WM_NAME.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiceConfig {
    pub rice: Rice,
    pub groups: Vec<Group>,
    pub keys: Vec<KeyBinding>,
    pub mouse: Vec<MouseBinding>,
    pub layouts: Vec<LayoutConfig>,
    pub bar: BarConfig,
    pub float_rules: Vec<FloatingRule>,
    pub behavior: Behavior,
    pub autostart: Option<PathBuf>,
}

impl RiceConfig {
    pub fn load(rice: Rice, terminal: Command) -> Result<Self> {
        let spec = rice.spec()?;
        let groups = groups();
        let keys = key_bindings(terminal, spec.launcher, &groups);

        let config = Self {
            rice,
            keys,
            groups,
            mouse: mouse_bindings(),
            layouts: spec.layouts,
            bar: spec.bar,
            float_rules: float_rules(),
            behavior: Behavior::default(),
            autostart: Autostart::default_path(),
        };
        config.validate()?;

        info!(
            %rice,
            keys = config.keys.len(),
            layouts = config.layouts.len(),
            widgets = config.bar.widgets.len(),
            "loaded rice"
        );

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.layouts.is_empty() {
            return Err(Error::NoLayouts);
        }

        let mut names = HashSet::new();
        for g in &self.groups {
            if !names.insert(g.name.as_str()) {
                return Err(Error::DuplicateGroup(g.name.clone()));
            }
        }

        let mut chords = HashSet::new();
        for k in &self.keys {
            let chord = k.chord();
            if !chords.insert(chord.clone()) {
                return Err(Error::DuplicateChord(chord));
            }
        }

        Ok(())
    }

    pub fn default_layout(&self) -> Option<&LayoutConfig> {
        default_layout(&self.layouts)
    }

    /// Workspace tags in group order.
    pub fn tags(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }
}
