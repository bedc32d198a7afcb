use super::{rofi, RiceSpec};
use crate::{
    bar::{
        BarConfig, Edge, GroupBoxStyle, HighlightMethod, Style, WidgetConfig, WidgetDefaults,
        WidgetKind,
    },
    layouts::{BorderStyle, LayoutConfig, LayoutKind, TreeTab},
    Result, Rgb,
};

const MARGIN: u32 = 25;
const BORDER_WIDTH: u32 = 3;
const BAR_HEIGHT: u32 = 30;
const FONT: &str = "Roboto Mono Regular";
const FONT_SIZE: u32 = 15;

struct Palette {
    background: Rgb,
    foreground: Rgb,
    dark_background: Rgb,
    alt_dark_background: Rgb,
    dark_foreground: Rgb,
    active: Rgb,
    inactive: Rgb,
    pastel_yellow: Rgb,
    pastel_red: Rgb,
    pastel_blue: Rgb,
    pastel_green: Rgb,
    pastel_purple: Rgb,
    border_focus: Rgb,
    border_focus_stack: Rgb,
    border_normal: Rgb,
    border_normal_stack: Rgb,
}

impl Palette {
    fn load() -> Result<Self> {
        Ok(Self {
            background: Rgb::parse("#1d0b21")?,
            foreground: Rgb::parse("#ff8e71")?,
            dark_background: Rgb::parse("#4E2C5D")?,
            alt_dark_background: Rgb::parse("#301f7c")?,
            dark_foreground: Rgb::parse("#75105f")?,
            active: Rgb::parse("#ff9b9b")?,
            inactive: Rgb::parse("#f6f5f5")?,
            pastel_yellow: Rgb::parse("#fcf2a9")?,
            pastel_red: Rgb::parse("#ff9b9b")?,
            pastel_blue: Rgb::parse("#9abeff")?,
            pastel_green: Rgb::parse("#d1ffc2")?,
            pastel_purple: Rgb::parse("#f4b7d8")?,
            border_focus: Rgb::parse("#f289ff")?,
            border_focus_stack: Rgb::parse("#e5e5e5")?,
            border_normal: Rgb::parse("FFFFFF")?,
            border_normal_stack: Rgb::parse("#f9c5ff")?,
        })
    }
}

pub fn spec() -> Result<RiceSpec> {
    let p = Palette::load()?;

    Ok(RiceSpec {
        launcher: rofi(&[
            "-show",
            "run",
            "-lines",
            "10",
            "-width",
            "30",
            "-font",
            "Roboto Mono Regular 12",
            "-theme",
            "Arc-Dark",
        ]),
        layouts: layouts(&p)?,
        bar: bar(&p),
    })
}

fn layouts(p: &Palette) -> Result<Vec<LayoutConfig>> {
    let border = BorderStyle::new(BORDER_WIDTH, p.border_focus, p.border_normal)
        .stacked(p.border_focus_stack, p.border_normal_stack);
    let tiled = |kind| {
        LayoutConfig::new(kind)
            .margin(MARGIN)
            .border(border.clone())
    };

    Ok(vec![
        tiled(LayoutKind::tile()),
        tiled(LayoutKind::monad_wide()),
        tiled(LayoutKind::RatioTile { fancy: false }),
        LayoutConfig::new(LayoutKind::TreeTab(TreeTab {
            sections: vec!["Primary".into(), "Secondary".into(), "Misc".into()],
            panel_width: 180,
            font: Some(FONT.into()),
            vspace: Some(3),
            active_bg: Some(p.border_focus),
            active_fg: Some(Rgb::parse("#6e027c")?),
            bg_color: Some(p.background),
            ..TreeTab::default()
        }))
        .border(BorderStyle {
            width: 2,
            ..BorderStyle::default()
        }),
    ])
}

fn bar(p: &Palette) -> BarConfig {
    let styled = |fg: Rgb| {
        Style::default()
            .fg(fg)
            .bg(p.background)
            .font(FONT)
            .fontsize(FONT_SIZE)
    };
    let divider = || {
        WidgetConfig::new(
            WidgetKind::TextBox("|".into()),
            Style::default().bg(p.background).font(FONT).fontsize(FONT_SIZE),
        )
    };
    let sep = || {
        WidgetConfig::new(
            WidgetKind::Sep {
                linewidth: 6,
                size_percent: 80,
            },
            Style::default().fg(p.background).bg(p.background).padding(6),
        )
    };

    let widgets = vec![
        sep(),
        WidgetConfig::new(
            WidgetKind::GroupBox(GroupBoxStyle {
                active: p.active,
                inactive: p.inactive,
                this_screen_border: p.dark_foreground,
                this_current_screen_border: p.alt_dark_background,
                other_screen_border: p.dark_background,
                other_current_screen_border: p.dark_background,
                highlight_method: HighlightMethod::Block,
                borderwidth: 8,
                margin: None,
                rounded: true,
            }),
            Style::default()
                .fg(p.foreground)
                .bg(p.background)
                .font(FONT)
                .fontsize(14),
        ),
        WidgetConfig::new(
            WidgetKind::TextBox(" ".into()),
            Style::default().bg(p.background),
        ),
        WidgetConfig::new(
            WidgetKind::Prompt,
            Style::default().fg(p.foreground).bg(p.background),
        ),
        WidgetConfig::new(
            WidgetKind::WindowName { max_chars: None },
            styled(p.pastel_purple),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::Clock {
                format: "%I:%M %p".into(),
            },
            styled(p.pastel_blue),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::Clock {
                format: "%D, %A".into(),
            },
            styled(p.pastel_blue),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::Memory {
                format: Some("{MemUsed} MB".into()),
            },
            styled(p.pastel_yellow),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::Cpu,
            Style::default().bg(p.background).font(FONT).fontsize(FONT_SIZE),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::TextBox("Volume:".into()),
            styled(p.pastel_red),
        ),
        WidgetConfig::new(WidgetKind::Volume, styled(p.pastel_red)),
        divider(),
        WidgetConfig::new(WidgetKind::Wlan, styled(p.pastel_green)),
        divider(),
        WidgetConfig::new(WidgetKind::CurrentLayout, styled(p.pastel_purple)),
        sep(),
    ];

    BarConfig {
        edge: Edge::Top,
        height: BAR_HEIGHT,
        background: None,
        defaults: WidgetDefaults {
            font: "sans".into(),
            fontsize: 12,
            padding: 3,
        },
        widgets,
    }
}
