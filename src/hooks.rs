use penrose::{
    core::{hooks::StateHook, Config, State},
    extensions::hooks::add_ewmh_hooks,
    util::spawn_with_args,
    x::{Atom, Prop, XConn},
    Result, Xid,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, warn};

/// Run the user's autostart script, once per process.
///
/// No check is made that the script exists: a missing or non executable
/// file is reported by the spawn itself. As a startup hook that failure is
/// logged so the hooks composed after it still run.
#[derive(Debug, Clone)]
pub struct Autostart {
    script: PathBuf,
    fired: bool,
}

impl Autostart {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            fired: false,
        }
    }

    /// `<config dir>/ricewm/autostart.sh`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ricewm").join("autostart.sh"))
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Returns whether the script was spawned by this call.
    pub fn fire(&mut self) -> Result<bool> {
        if self.fired {
            debug!(script = ?self.script, "autostart already ran");
            return Ok(false);
        }
        self.fired = true;

        info!(script = ?self.script, "running autostart");
        spawn_with_args(self.script.to_string_lossy(), &[])?;

        Ok(true)
    }
}

impl<X: XConn> StateHook<X> for Autostart {
    fn call(&mut self, _: &mut State<X>, _: &X) -> Result<()> {
        if let Err(e) = self.fire() {
            error!(%e, script = ?self.script, "unable to run autostart");
        }

        Ok(())
    }
}

/// Report a fixed window manager name through an EWMH supporting window.
///
/// Some toolkits (Java's AWT in particular) only behave with window managers
/// they recognise. `check` must be a window owned by us: under X11 that is
/// one made with `RustConn::create_window(WinType::CheckWin, ..)`.
#[derive(Debug, Clone)]
pub struct WmName {
    name: String,
    check: Xid,
}

impl WmName {
    pub fn new(name: impl Into<String>, check: Xid) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<X: XConn> StateHook<X> for WmName {
    fn call(&mut self, _: &mut State<X>, x: &X) -> Result<()> {
        debug!(name = %self.name, check = %self.check, "setting wm name");
        let name = Prop::UTF8String(vec![self.name.clone()]);

        for id in [x.root(), self.check] {
            x.set_prop(
                id,
                Atom::NetSupportingWmCheck.as_ref(),
                Prop::Window(vec![self.check]),
            )?;
            x.set_prop(id, Atom::NetWmName.as_ref(), name.clone())?;
            x.set_prop(id, Atom::WmName.as_ref(), name.clone())?;
        }

        Ok(())
    }
}

/// Add penrose's EWMH hooks along with our own startup hooks.
///
/// Newly composed hooks run first in penrose, so ours are added before the
/// EWMH ones to get the order: EWMH setup, [WmName], [Autostart]. That way the
/// generic `WM_NAME` set by the EWMH hook is replaced.
pub fn add_startup_hooks<X>(
    mut config: Config<X>,
    wm_name: WmName,
    autostart: Option<Autostart>,
) -> Config<X>
where
    X: XConn + 'static,
{
    if let Some(autostart) = autostart {
        config.compose_or_set_startup_hook(autostart);
    }
    config.compose_or_set_startup_hook(wm_name);

    add_ewmh_hooks(config)
}

/// Keep the bar's layout indicator file in sync with the focused workspace.
#[derive(Debug, Clone)]
pub struct LayoutIndicator {
    path: PathBuf,
    last: Option<String>,
}

impl LayoutIndicator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: None,
        }
    }

    /// Returns whether the file was rewritten.
    pub fn update(&mut self, layout: &str) -> io::Result<bool> {
        if self.last.as_deref() == Some(layout) {
            return Ok(false);
        }

        fs::write(&self.path, format!("{layout}\n"))?;
        self.last = Some(layout.to_owned());

        Ok(true)
    }
}

impl<X: XConn> StateHook<X> for LayoutIndicator {
    fn call(&mut self, state: &mut State<X>, _: &X) -> Result<()> {
        let layout = state.client_set.current_workspace().layout_name();
        if let Err(e) = self.update(&layout) {
            warn!(%e, path = ?self.path, "unable to update layout indicator");
        }

        Ok(())
    }
}
