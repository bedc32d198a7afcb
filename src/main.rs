//! My personal penrose config
use clap::Parser;
use penrose::{
    builtin::hooks::SpacingHook,
    core::{bindings::parse_keybindings_with_xmodmap, Config, WindowManager},
    pure::geometry::Rect,
    util::spawn_with_args,
    x::WinType,
    x11rb::RustConn,
    Result,
};
use ricewm::{
    actions::LogControl,
    bar::{write_polybar, BAR_NAME},
    bindings::{raw_key_bindings, raw_mouse_bindings},
    hooks::{add_startup_hooks, Autostart, LayoutIndicator, WmName},
    layouts::{apply_border, layout_stack},
    rules::FloatRules,
    terminal, Rice, RiceConfig,
};
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{self, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "ricewm", version, about = "My personal penrose window manager")]
struct Args {
    /// Which rice to load
    #[arg(long, env = "RICEWM_RICE", value_enum, default_value_t = Rice::Tl)]
    rice: Rice,

    /// Where to write the daily log files (defaults to the cache dir)
    #[arg(long, env = "RICEWM_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Initial tracing filter
    #[arg(long, env = "RICEWM_LOG", default_value = "info")]
    log_filter: String,

    /// Do not launch polybar
    #[arg(long)]
    no_bar: bool,

    /// Set when re-exec'd by a restart: autostart has already run
    #[arg(long, hide = true)]
    restarted: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("ricewm");
    let log_dir = args.log_dir.clone().unwrap_or_else(|| cache_dir.clone());

    let file_appender = tracing_appender::rolling::daily(&log_dir, "ricewm.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .with_writer(non_blocking)
        .with_filter_reloading();

    let reload_handle = tracing_builder.reload_handle();
    tracing_builder.finish().init();
    let logging = LogControl::new(reload_handle, &args.log_filter).with_guard(guard);

    info!(rice = %args.rice, ?log_dir, restarted = args.restarted, "starting ricewm");
    let rice = RiceConfig::load(args.rice, terminal::detect())?;

    let conn = RustConn::new()?;
    let key_bindings = parse_keybindings_with_xmodmap(raw_key_bindings(&rice.keys, &logging))?;
    let mouse_bindings = raw_mouse_bindings(&rice.mouse);

    let (top_px, bottom_px) = if args.no_bar {
        (0, 0)
    } else {
        rice.bar.reserved()
    };
    let layout_hook = SpacingHook {
        inner_px: 0,
        outer_px: 0,
        top_px,
        bottom_px,
    };

    let indicator = cache_dir.join("layout");
    let mut config = Config {
        default_layouts: layout_stack(&rice.layouts)?,
        tags: rice.tags(),
        focus_follow_mouse: rice.behavior.follow_mouse_focus,
        manage_hook: Some(Box::new(FloatRules::new(rice.float_rules.clone()))),
        refresh_hook: Some(Box::new(LayoutIndicator::new(&indicator))),
        layout_hook: Some(Box::new(layout_hook)),
        ..Config::default()
    };
    if let Some(border) = rice.default_layout().and_then(|l| l.border.as_ref()) {
        apply_border(&mut config, border);
    }

    let check = conn.create_window(WinType::CheckWin, Rect::new(0, 0, 1, 1), false)?;
    let autostart = match &rice.autostart {
        Some(script) if !args.restarted => Some(Autostart::new(script)),
        _ => None,
    };
    let config = add_startup_hooks(
        config,
        WmName::new(&rice.behavior.wm_name, check),
        autostart,
    );

    if !args.no_bar {
        let path = write_polybar(&rice.bar, &cache_dir, &indicator)?;
        spawn_with_args("polybar", &["--config", &path.to_string_lossy(), BAR_NAME])?;
    }

    let wm = WindowManager::new(config, key_bindings, mouse_bindings, conn)?;

    wm.run()
}
