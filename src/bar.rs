//! Status bar configuration.
//!
//! The bar itself is drawn by polybar: a [BarConfig] is rendered into a
//! polybar ini file whose modules appear left to right in the same order as
//! the widgets were declared. Refreshing dynamic modules (clock, memory and
//! friends) is left to polybar.
use crate::{Result, Rgb};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Name of the `[bar/...]` section in the rendered config.
pub const BAR_NAME: &str = "main";

const DEFAULT_BACKGROUND: Rgb = Rgb::new(0x000000);
const DEFAULT_FOREGROUND: Rgb = Rgb::new(0xffffff);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDefaults {
    pub font: String,
    pub fontsize: u32,
    pub padding: u32,
}

/// Per widget overrides of the bar wide [WidgetDefaults].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub font: Option<String>,
    pub fontsize: Option<u32>,
    pub padding: Option<u32>,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Style {
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn fontsize(mut self, size: u32) -> Self {
        self.fontsize = Some(size);
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn fg(mut self, c: Rgb) -> Self {
        self.foreground = Some(c);
        self
    }

    pub fn bg(mut self, c: Rgb) -> Self {
        self.background = Some(c);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMethod {
    Border,
    Block,
    Line,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBoxStyle {
    pub active: Rgb,
    pub inactive: Rgb,
    pub this_screen_border: Rgb,
    pub this_current_screen_border: Rgb,
    pub other_screen_border: Rgb,
    pub other_current_screen_border: Rgb,
    pub highlight_method: HighlightMethod,
    pub borderwidth: u32,
    pub margin: Option<u32>,
    pub rounded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    Sep { linewidth: u32, size_percent: u32 },
    GroupBox(GroupBoxStyle),
    Prompt,
    WindowName { max_chars: Option<usize> },
    TextBox(String),
    Clock { format: String },
    Memory { format: Option<String> },
    Cpu,
    Volume,
    Wlan,
    CurrentLayout,
}

impl WidgetKind {
    fn tag(&self) -> &'static str {
        match self {
            Self::Sep { .. } => "sep",
            Self::GroupBox(_) => "groupbox",
            Self::Prompt => "prompt",
            Self::WindowName { .. } => "windowname",
            Self::TextBox(_) => "textbox",
            Self::Clock { .. } => "clock",
            Self::Memory { .. } => "memory",
            Self::Cpu => "cpu",
            Self::Volume => "volume",
            Self::Wlan => "wlan",
            Self::CurrentLayout => "currentlayout",
        }
    }

    /// The polybar format names the module's colours and font apply to.
    fn formats(&self) -> &'static [&'static str] {
        match self {
            Self::Volume => &["format-volume", "format-muted"],
            Self::Wlan => &["format-connected", "format-disconnected"],
            _ => &["format"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub kind: WidgetKind,
    pub style: Style,
}

impl WidgetConfig {
    pub fn new(kind: WidgetKind, style: Style) -> Self {
        Self { kind, style }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarConfig {
    pub edge: Edge,
    pub height: u32,
    pub background: Option<Rgb>,
    pub defaults: WidgetDefaults,
    pub widgets: Vec<WidgetConfig>,
}

impl BarConfig {
    /// Space the window manager must leave free at (top, bottom).
    pub fn reserved(&self) -> (u32, u32) {
        match self.edge {
            Edge::Top => (self.height, 0),
            Edge::Bottom => (0, self.height),
        }
    }
}

/// One `[section]` of an ini file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    fn set(&mut self, key: impl Into<String>, val: impl ToString) {
        self.entries.push((key.into(), val.to_string()));
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        for (k, v) in &self.entries {
            writeln!(f, "{k} = {v}")?;
        }
        Ok(())
    }
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

/// Python format style `{MemUsed}` tokens to polybar `%mb_used%` tokens.
///
/// Format specs such as `{MemUsed: .0f}` are dropped and unknown tokens are
/// left in place.
pub fn memory_label(format: &str) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let token = &rest[start + 1..start + len];
        let name = token.split(':').next().unwrap_or_default().trim();
        let replacement = match name {
            "MemUsed" => "%mb_used%",
            "MemTotal" => "%mb_total%",
            "MemFree" => "%mb_free%",
            "MemPercent" => "%percentage_used%",
            "SwapUsed" => "%mb_swap_used%",
            "SwapTotal" => "%mb_swap_total%",
            "SwapFree" => "%mb_swap_free%",
            "SwapPercent" => "%percentage_swap_used%",
            // polybar's mb tokens carry their own unit
            "mm" => "",
            _ => &rest[start..=start + len],
        };
        out.push_str(replacement);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    out
}

/// Distinct (font, size) pairs in first use order: polybar's `font-N` list.
fn font_table(bar: &BarConfig) -> Vec<(String, u32)> {
    let mut fonts = Vec::new();
    for w in &bar.widgets {
        let font = effective_font(bar, &w.style);
        if !fonts.contains(&font) {
            fonts.push(font);
        }
    }

    fonts
}

fn effective_font(bar: &BarConfig, style: &Style) -> (String, u32) {
    (
        style.font.clone().unwrap_or_else(|| bar.defaults.font.clone()),
        style.fontsize.unwrap_or(bar.defaults.fontsize),
    )
}

/// `None` for widgets polybar has no counterpart for.
fn module_section(
    name: &str,
    widget: &WidgetConfig,
    layout_file: &Path,
) -> Option<Section> {
    let mut s = Section::new(format!("module/{name}"));

    match &widget.kind {
        WidgetKind::Sep { linewidth, .. } => {
            s.set("type", "custom/text");
            s.set("format", quoted(" "));
            s.set("format-padding", format!("{}px", linewidth / 2));
        }
        WidgetKind::GroupBox(g) => {
            s.set("type", "internal/xworkspaces");
            s.set("label-active", "%name%");
            s.set("label-occupied", "%name%");
            s.set("label-empty", "%name%");
            s.set("label-urgent", "%name%");
            let active_fg = match g.highlight_method {
                HighlightMethod::Text => g.this_current_screen_border,
                _ => g.active,
            };
            s.set("label-active-foreground", active_fg);
            s.set("label-occupied-foreground", g.active);
            s.set("label-empty-foreground", g.inactive);
            let margin = g.margin.unwrap_or(0);
            for state in ["active", "occupied", "empty", "urgent"] {
                s.set(format!("label-{state}-padding"), format!("{}px", g.borderwidth + margin));
            }
            match g.highlight_method {
                HighlightMethod::Block => {
                    s.set("label-active-background", g.this_current_screen_border);
                }
                HighlightMethod::Line | HighlightMethod::Border => {
                    s.set("label-active-underline", g.this_current_screen_border);
                }
                HighlightMethod::Text => (),
            }
        }
        WidgetKind::Prompt => return None,
        WidgetKind::WindowName { max_chars } => {
            s.set("type", "internal/xwindow");
            s.set("label", "%title%");
            if let Some(n) = max_chars {
                s.set("label-maxlen", n);
            }
        }
        WidgetKind::TextBox(text) => {
            s.set("type", "custom/text");
            s.set("format", quoted(text));
        }
        WidgetKind::Clock { format } => {
            s.set("type", "internal/date");
            s.set("interval", 1);
            s.set("date", quoted(format));
            s.set("label", "%date%");
        }
        WidgetKind::Memory { format } => {
            s.set("type", "internal/memory");
            s.set("interval", 1);
            let label = format
                .as_deref()
                .map(memory_label)
                .unwrap_or_else(|| "%mb_used%/%mb_total%".to_owned());
            s.set("label", quoted(&label));
        }
        WidgetKind::Cpu => {
            s.set("type", "internal/cpu");
            s.set("interval", 1);
            s.set("label", quoted("CPU %percentage%%"));
        }
        WidgetKind::Volume => {
            s.set("type", "internal/alsa");
            s.set("label-volume", "%percentage%%");
            s.set("label-muted", "M");
        }
        WidgetKind::Wlan => {
            s.set("type", "internal/network");
            s.set("interface-type", "wireless");
            s.set("interval", 1);
            s.set("label-connected", quoted("%essid% %signal%%"));
            s.set("label-disconnected", quoted("Disconnected --"));
        }
        WidgetKind::CurrentLayout => {
            s.set("type", "custom/script");
            let path = layout_file.display().to_string();
            s.set("exec", format!("cat {} 2>/dev/null", quoted(&path)));
            s.set("interval", 1);
        }
    }

    Some(s)
}

/// Render the bar as a polybar config with one module per widget.
pub fn render_polybar(bar: &BarConfig, layout_file: &Path) -> String {
    let fonts = font_table(bar);
    let mut modules = Vec::new();
    let mut sections = Vec::new();

    for (i, w) in bar.widgets.iter().enumerate() {
        let name = format!("w{i}-{}", w.kind.tag());
        let Some(mut s) = module_section(&name, w, layout_file) else {
            debug!(widget = w.kind.tag(), "widget has no polybar module");
            continue;
        };

        let font = effective_font(bar, &w.style);
        let font_idx = fonts.iter().position(|f| *f == font).unwrap_or_default() + 1;
        for fmt in w.kind.formats() {
            if let Some(c) = w.style.foreground {
                s.set(format!("{fmt}-foreground"), c);
            }
            if let Some(c) = w.style.background {
                s.set(format!("{fmt}-background"), c);
            }
            s.set(format!("{fmt}-font"), font_idx);
            if !matches!(w.kind, WidgetKind::Sep { .. }) {
                let padding = w.style.padding.unwrap_or(bar.defaults.padding);
                s.set(format!("{fmt}-padding"), format!("{padding}px"));
            }
        }

        modules.push(name);
        sections.push(s);
    }

    let mut main = Section::new(format!("bar/{BAR_NAME}"));
    main.set("bottom", bar.edge == Edge::Bottom);
    main.set("width", "100%");
    main.set("height", format!("{}px", bar.height));
    main.set("background", bar.background.unwrap_or(DEFAULT_BACKGROUND));
    main.set("foreground", DEFAULT_FOREGROUND);
    for (i, (font, size)) in fonts.iter().enumerate() {
        main.set(format!("font-{i}"), quoted(&format!("{font}:pixelsize={size};2")));
    }
    main.set("modules-left", modules.join(" "));

    std::iter::once(main)
        .chain(sections)
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the rendered config into `dir`, returning its path.
pub fn write_polybar(bar: &BarConfig, dir: &Path, layout_file: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join("polybar.ini");
    fs::write(&path, render_polybar(bar, layout_file))?;
    info!(?path, widgets = bar.widgets.len(), "wrote polybar config");

    Ok(path)
}
