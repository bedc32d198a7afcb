use pretty_assertions::assert_eq;
use ricewm::{
    bar::{render_polybar, WidgetKind},
    bindings::{Action, Command},
    groups::GROUP_LABELS,
    layouts::LayoutKind,
    rules::{should_float, MatchField, WindowInfo},
    Rice, RiceConfig,
};
use rstest::rstest;
use std::{collections::HashSet, path::Path};

fn load(rice: Rice) -> RiceConfig {
    RiceConfig::load(rice, Command::new("alacritty")).unwrap()
}

fn is_group_binding(a: &Action) -> bool {
    matches!(a, Action::SwitchToGroup(_) | Action::MoveToGroup { .. })
}

#[rstest]
#[case(Rice::Tl)]
#[case(Rice::Atarashii)]
fn nine_groups_yield_eighteen_generated_bindings(#[case] rice: Rice) {
    let config = load(rice);
    let switches = config
        .keys
        .iter()
        .filter(|k| matches!(k.action, Action::SwitchToGroup(_)))
        .count();
    let moves = config
        .keys
        .iter()
        .filter(|k| matches!(k.action, Action::MoveToGroup { follow: true, .. }))
        .count();

    assert_eq!((switches, moves), (9, 9));

    let generated: Vec<_> = config
        .keys
        .iter()
        .skip_while(|k| !is_group_binding(&k.action))
        .collect();
    assert_eq!(generated.len(), 18);
    assert!(generated.iter().all(|k| is_group_binding(&k.action)));
}

#[rstest]
#[case(Rice::Tl)]
#[case(Rice::Atarashii)]
fn every_group_has_exactly_two_bindings(#[case] rice: Rice) {
    let config = load(rice);
    let names: Vec<String> = config.groups.iter().map(|g| g.name.clone()).collect();
    let labels: Vec<String> = GROUP_LABELS.chars().map(String::from).collect();
    assert_eq!(names, labels);
    assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());

    for name in &names {
        let n = config
            .keys
            .iter()
            .filter(|k| match &k.action {
                Action::SwitchToGroup(g) => g == name,
                Action::MoveToGroup { group, .. } => group == name,
                _ => false,
            })
            .count();
        assert_eq!(n, 2, "group {name}");
    }
}

#[rstest]
#[case(Rice::Tl)]
#[case(Rice::Atarashii)]
fn terminal_binding_spawns_terminal_without_arguments(#[case] rice: Rice) {
    let config = load(rice);
    let binding = config
        .keys
        .iter()
        .find(|k| k.chord() == "A-Return")
        .unwrap();

    assert_eq!(binding.action, Action::Spawn(Command::new("alacritty")));
    assert_eq!(binding.desc, "Launch terminal");
}

#[rstest]
#[case(Rice::Tl, "Main/Slaves - Tile")]
#[case(Rice::Atarashii, "tile")]
fn first_layout_is_the_default(#[case] rice: Rice, #[case] label: &str) {
    let config = load(rice);
    let default = config.default_layout().unwrap();

    assert_eq!(default, &config.layouts[0]);
    assert_eq!(default.label(), label);
    assert!(matches!(default.kind, LayoutKind::Tile { .. }));
}

#[test]
fn layouts_keep_declaration_order() {
    let labels = |rice| -> Vec<String> {
        load(rice)
            .layouts
            .iter()
            .map(|l| l.label().to_owned())
            .collect()
    };

    assert_eq!(
        labels(Rice::Tl),
        ["Main/Slaves - Tile", "Stack - TreeTab", "FlexTile - RatioTile"]
    );
    assert_eq!(
        labels(Rice::Atarashii),
        ["tile", "monadwide", "ratiotile", "treetab"]
    );
}

#[test]
fn pinentry_windows_float() {
    let config = load(Rice::Tl);
    let pinentry = WindowInfo {
        classes: vec!["pinentry-gtk-2".into(), "Pinentry-gtk-2".into()],
        title: "pinentry".into(),
    };
    let editor = WindowInfo {
        classes: vec!["code".into(), "Code".into()],
        title: "pinentry.rs - Visual Studio Code".into(),
    };

    assert!(should_float(&config.float_rules, &pinentry));
    assert!(!should_float(&config.float_rules, &editor));
    assert!(config
        .float_rules
        .iter()
        .all(|r| matches!(r.field, MatchField::Class | MatchField::Title)));
}

#[test]
fn tl_bar_widgets_in_order() {
    let kinds: Vec<&'static str> = load(Rice::Tl)
        .bar
        .widgets
        .iter()
        .map(|w| match w.kind {
            WidgetKind::Sep { .. } => "sep",
            WidgetKind::GroupBox(_) => "groupbox",
            WidgetKind::Prompt => "prompt",
            WidgetKind::WindowName { .. } => "windowname",
            WidgetKind::TextBox(_) => "textbox",
            WidgetKind::Clock { .. } => "clock",
            WidgetKind::Memory { .. } => "memory",
            WidgetKind::Cpu => "cpu",
            WidgetKind::Volume => "volume",
            WidgetKind::Wlan => "wlan",
            WidgetKind::CurrentLayout => "currentlayout",
        })
        .collect();

    assert_eq!(
        kinds,
        [
            "sep",
            "groupbox",
            "prompt",
            "windowname",
            "textbox",
            "clock",
            "textbox",
            "memory",
            "textbox",
            "currentlayout",
        ]
    );
}

#[test]
fn atarashii_bar_renders_every_telemetry_module() {
    let config = load(Rice::Atarashii);
    let ini = render_polybar(&config.bar, Path::new("/tmp/ricewm/layout"));

    for ty in [
        "internal/xworkspaces",
        "internal/xwindow",
        "internal/date",
        "internal/memory",
        "internal/cpu",
        "internal/alsa",
        "internal/network",
        "custom/script",
    ] {
        assert!(ini.contains(&format!("type = {ty}")), "missing {ty}");
    }
    assert!(ini.contains("label = \"%mb_used% MB\""));
    assert!(ini.contains("height = 30px"));
}
