use crate::bindings::{Action, Command, Direction};
use penrose::{
    builtin::{
        actions::{exit, key_handler, log_current_state, modify_with, send_layout_message},
        layout::messages::{ExpandMain, IncMain, Rotate, ShrinkMain},
    },
    core::bindings::KeyEventHandler,
    custom_error,
    util::spawn_with_args,
    x::XConn,
};
use std::{
    cell::RefCell, env, ffi::OsString, fmt, os::unix::process::CommandExt, process, rc::Rc,
};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{reload::Handle, EnvFilter};

/// Verbosity steps visited by [Action::CycleLogLevel], wrapping at the end.
pub const LOG_LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];

/// Marks a process started by [restart] so one shot startup work is skipped.
pub const RESTARTED_FLAG: &str = "--restarted";

/// The running tracing setup, as needed by the logging and restart actions.
pub struct LogControl<L, S> {
    handle: Handle<L, S>,
    filter: String,
    guard: Rc<RefCell<Option<WorkerGuard>>>,
}

impl<L, S> LogControl<L, S> {
    pub fn new(handle: Handle<L, S>, filter: impl Into<String>) -> Self {
        Self {
            handle,
            filter: filter.into(),
            guard: Rc::default(),
        }
    }

    /// Dropped just before a restart so buffered log lines reach the file.
    pub fn with_guard(self, guard: WorkerGuard) -> Self {
        *self.guard.borrow_mut() = Some(guard);
        self
    }
}

impl<L, S> fmt::Debug for LogControl<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogControl")
            .field("filter", &self.filter)
            .finish()
    }
}

/// Map an [Action] onto the penrose operation that carries it out.
pub fn resolve<X, L, S>(action: &Action, log: &LogControl<L, S>) -> Box<dyn KeyEventHandler<X>>
where
    X: XConn + fmt::Debug + 'static,
    L: From<EnvFilter> + 'static,
    S: 'static,
{
    use Direction::*;

    match action {
        Action::Focus(Left | Up) => modify_with(|cs| cs.focus_up()),
        Action::Focus(Right | Down) | Action::FocusNext => modify_with(|cs| cs.focus_down()),
        Action::Shuffle(Left | Up) => modify_with(|cs| cs.swap_up()),
        Action::Shuffle(Right | Down) => modify_with(|cs| cs.swap_down()),
        Action::Grow(Left) => send_layout_message(|| ShrinkMain),
        Action::Grow(Right) => send_layout_message(|| ExpandMain),
        Action::Grow(Up) => send_layout_message(|| IncMain(1)),
        Action::Grow(Down) => send_layout_message(|| IncMain(-1)),
        Action::Normalize => unsupported("normalize"),
        Action::ToggleSplit => send_layout_message(|| Rotate),
        Action::NextLayout => modify_with(|cs| cs.next_layout()),
        Action::Kill => modify_with(|cs| cs.kill_focused()),
        Action::Restart => restart(Rc::clone(&log.guard)),
        Action::Shutdown => exit(),
        Action::Spawn(cmd) => spawn_command(cmd.clone()),
        Action::SwitchToGroup(tag) => {
            let tag = tag.clone();
            modify_with(move |cs| cs.focus_tag(&tag))
        }
        Action::MoveToGroup { group, follow } => {
            let (tag, follow) = (group.clone(), *follow);
            modify_with(move |cs| {
                cs.move_focused_to_tag(&tag);
                if follow {
                    cs.focus_tag(&tag);
                }
            })
        }
        Action::CycleLogLevel => cycle_log_level(log.handle.clone(), &log.filter),
        Action::DumpState => log_current_state(),
    }
}

pub fn spawn_command<X: XConn>(cmd: Command) -> Box<dyn KeyEventHandler<X>> {
    key_handler(move |_, _| {
        info!(%cmd, "spawning");
        let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
        spawn_with_args(cmd.program.as_str(), &args)
    })
}

/// Replace the running process with a fresh copy of itself.
///
/// The log writer behind `guard` is flushed and shut down first.
pub fn restart<X: XConn>(guard: Rc<RefCell<Option<WorkerGuard>>>) -> Box<dyn KeyEventHandler<X>> {
    key_handler(move |_, _| {
        let exe = env::current_exe().map_err(|e| custom_error!("unable to locate binary: {}", e))?;
        warn!(?exe, "restarting");
        drop(guard.borrow_mut().take());
        let err = process::Command::new(&exe)
            .args(restart_args(env::args_os().skip(1)))
            .exec();

        Err(custom_error!("unable to restart: {}", err))
    })
}

/// The current arguments, marked with [RESTARTED_FLAG] once.
pub fn restart_args<I>(current: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = current.into_iter().collect();
    if !args.iter().any(|a| a == RESTARTED_FLAG) {
        args.push(RESTARTED_FLAG.into());
    }

    args
}

/// Step through [LOG_LEVELS] on each press, reloading the tracing filter.
pub fn cycle_log_level<X, L, S>(handle: Handle<L, S>, initial: &str) -> Box<dyn KeyEventHandler<X>>
where
    X: XConn,
    L: From<EnvFilter> + 'static,
    S: 'static,
{
    let mut current = initial.to_owned();

    key_handler(move |_, _| {
        let level = next_log_level(&current);
        warn!(from = %current, to = level, "updating tracing filter");
        let f = level
            .parse::<EnvFilter>()
            .map_err(|e| custom_error!("invalid filter: {}", e))?;
        handle
            .reload(f)
            .map_err(|e| custom_error!("unable to set filter: {}", e))?;
        current = level.to_owned();

        Ok(())
    })
}

/// Anything that is not one of the plain levels restarts the cycle at `info`.
pub fn next_log_level(current: &str) -> &'static str {
    match LOG_LEVELS.iter().position(|l| *l == current) {
        Some(i) => LOG_LEVELS[(i + 1) % LOG_LEVELS.len()],
        None => LOG_LEVELS[1],
    }
}

fn unsupported<X: XConn>(name: &'static str) -> Box<dyn KeyEventHandler<X>> {
    key_handler(move |state, _| {
        let layout = state.client_set.current_workspace().layout_name();
        debug!(%layout, action = name, "layout does not support action");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingConn;
    use penrose::{core::Config, Xid};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tracing_subscriber::{reload, Registry};

    fn log_control() -> LogControl<EnvFilter, Registry> {
        let (_, handle) = reload::Layer::new(EnvFilter::new("info"));
        LogControl::new(handle, "info")
    }

    fn press(action: Action, conn: &RecordingConn, state: &mut penrose::core::State<RecordingConn>) {
        let mut handler = resolve(&action, &log_control());
        handler.call(state, conn).unwrap();
    }

    #[rstest]
    #[case(true, "3")]
    #[case(false, "1")]
    fn move_to_group_only_follows_when_asked(#[case] follow: bool, #[case] focused_tag: &str) {
        let conn = RecordingConn::default();
        let mut state = conn.state(Config::default());
        let client = Xid::from(42);
        state.client_set.insert(client);

        let action = Action::MoveToGroup {
            group: "3".to_owned(),
            follow,
        };
        press(action, &conn, &mut state);

        assert_eq!(state.client_set.tag_for_client(&client), Some("3"));
        assert_eq!(state.client_set.current_tag(), focused_tag);
    }

    #[test]
    fn switch_to_group_focuses_the_tag() {
        let conn = RecordingConn::default();
        let mut state = conn.state(Config::default());

        press(Action::SwitchToGroup("5".to_owned()), &conn, &mut state);

        assert_eq!(state.client_set.current_tag(), "5");
    }

    #[test]
    fn normalize_leaves_the_layout_alone() {
        let conn = RecordingConn::default();
        let mut state = conn.state(Config::default());
        let before = state.client_set.current_workspace().layout_name();

        press(Action::Normalize, &conn, &mut state);

        assert_eq!(state.client_set.current_workspace().layout_name(), before);
    }

    #[test]
    fn restart_marks_the_new_process_once() {
        let args = restart_args(["--rice".into(), "atarashii".into()]);
        assert_eq!(args, ["--rice", "atarashii", RESTARTED_FLAG]);

        let again = restart_args(args.clone());
        assert_eq!(again, args);
    }

    #[rstest]
    #[case("warn", "info")]
    #[case("info", "debug")]
    #[case("debug", "trace")]
    #[case("trace", "warn")]
    #[case("info,penrose=trace", "info")]
    #[case("", "info")]
    fn log_levels_cycle(#[case] current: &str, #[case] expected: &str) {
        assert_eq!(next_log_level(current), expected);
    }

    #[test]
    fn cycle_visits_every_level_once() {
        let mut level = "warn";
        let mut seen = vec![level];
        for _ in 1..LOG_LEVELS.len() {
            level = next_log_level(level);
            seen.push(level);
        }

        assert_eq!(seen, LOG_LEVELS);
        assert_eq!(next_log_level(level), "warn");
    }
}
