use super::{rofi, RiceSpec};
use crate::{
    bar::{
        BarConfig, Edge, GroupBoxStyle, HighlightMethod, Style, WidgetConfig, WidgetDefaults,
        WidgetKind,
    },
    layouts::{BorderStyle, LayoutConfig, LayoutKind, TreeTab},
    Result, Rgb,
};

const MARGIN: u32 = 20;
const BORDER_WIDTH: u32 = 7;
const BAR_HEIGHT: u32 = 37;
const FONT: &str = "Roboto Mono";

struct Palette {
    light_blue: Rgb,
    light_orange: Rgb,
    normal_blue: Rgb,
    normal_orange: Rgb,
    pastel_blurple: Rgb,
    pastel_yellow: Rgb,
    dark_blue: Rgb,
    background: Rgb,
}

impl Palette {
    fn load() -> Result<Self> {
        Ok(Self {
            light_blue: Rgb::parse("#90d4ed")?,
            light_orange: Rgb::parse("#f4cd9a")?,
            normal_blue: Rgb::parse("#0453db")?,
            normal_orange: Rgb::parse("#c65600")?,
            pastel_blurple: Rgb::parse("#a697ed")?,
            pastel_yellow: Rgb::parse("#ffff99")?,
            dark_blue: Rgb::parse("#00008B")?,
            background: Rgb::parse("#8b8dfa")?,
        })
    }
}

pub fn spec() -> Result<RiceSpec> {
    let p = Palette::load()?;

    Ok(RiceSpec {
        launcher: rofi(&[
            "-show",
            "run",
            "-font",
            "Roboto Mono Regular 12",
            "-lines",
            "10",
            "-width",
            "25",
            "-theme",
            "DarkBlue",
        ]),
        layouts: layouts(&p),
        bar: bar(&p)?,
    })
}

fn layouts(p: &Palette) -> Vec<LayoutConfig> {
    let border = BorderStyle::new(BORDER_WIDTH, p.light_blue, p.light_orange);

    vec![
        LayoutConfig::new(LayoutKind::tile())
            .named("Main/Slaves - Tile")
            .margin(MARGIN)
            .border(border.clone()),
        LayoutConfig::new(LayoutKind::TreeTab(TreeTab {
            sections: vec!["Primary".into(), "Secondary".into(), "Tertiary".into()],
            panel_width: 180,
            font: Some(FONT.into()),
            section_fontsize: Some(12),
            active_bg: Some(p.light_blue),
            active_fg: Some(p.normal_blue),
            bg_color: Some(p.pastel_blurple),
            inactive_bg: Some(p.light_orange),
            inactive_fg: Some(p.normal_orange),
            ..TreeTab::default()
        }))
        .named("Stack - TreeTab"),
        LayoutConfig::new(LayoutKind::RatioTile { fancy: true })
            .named("FlexTile - RatioTile")
            .margin(MARGIN)
            .border(border),
    ]
}

fn bar(p: &Palette) -> Result<BarConfig> {
    let on_bg = || Style::default().bg(p.background).font(FONT);
    let divider = || WidgetConfig::new(WidgetKind::TextBox("|".into()), on_bg().fontsize(20));

    let widgets = vec![
        WidgetConfig::new(
            WidgetKind::Sep {
                linewidth: 5,
                size_percent: 100,
            },
            Style::default().bg(p.background).fg(p.background),
        ),
        WidgetConfig::new(
            WidgetKind::GroupBox(GroupBoxStyle {
                active: p.dark_blue,
                inactive: Rgb::parse("#4d4c66")?,
                this_screen_border: Rgb::parse("#05ffb7")?,
                this_current_screen_border: Rgb::parse("#b6ffea")?,
                other_screen_border: p.pastel_yellow,
                other_current_screen_border: p.pastel_yellow,
                highlight_method: HighlightMethod::Block,
                borderwidth: 5,
                margin: Some(5),
                rounded: false,
            }),
            on_bg().fontsize(16).padding(5),
        ),
        WidgetConfig::new(WidgetKind::Prompt, Style::default()),
        WidgetConfig::new(
            WidgetKind::WindowName { max_chars: None },
            on_bg().fg(Rgb::parse("#9cf196")?).fontsize(14).padding(5),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::Clock {
                format: "%I:%M %p".into(),
            },
            Style::default()
                .bg(p.background)
                .fg(Rgb::parse("#fce2ae")?)
                .fontsize(15),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::Memory { format: None },
            on_bg().fg(Rgb::parse("#b6ffea")?).fontsize(15),
        ),
        divider(),
        WidgetConfig::new(
            WidgetKind::CurrentLayout,
            on_bg().fg(Rgb::parse("#ffb3b3")?).fontsize(15),
        ),
    ];

    Ok(BarConfig {
        edge: Edge::Top,
        height: BAR_HEIGHT,
        background: None,
        defaults: WidgetDefaults {
            font: FONT.into(),
            fontsize: 14,
            padding: 3,
        },
        widgets,
    })
}
