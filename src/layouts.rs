use crate::{Error, Result, Rgb, MAX_MAIN};
use penrose::{
    builtin::layout::{transformers::Gaps, Grid, MainAndStack, Monocle},
    core::{
        layout::{Layout, LayoutStack, LayoutTransformer},
        Config,
    },
    pure::Stack,
    x::XConn,
};

pub const TILE_RATIO: f32 = 0.618;
pub const TILE_RATIO_STEP: f32 = 0.05;
pub const MONAD_RATIO: f32 = 0.5;
pub const MONAD_RATIO_STEP: f32 = 0.05;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderStyle {
    pub width: u32,
    pub focus: Option<Rgb>,
    pub normal: Option<Rgb>,
    pub focus_stack: Option<Rgb>,
    pub normal_stack: Option<Rgb>,
}

impl BorderStyle {
    pub fn new(width: u32, focus: Rgb, normal: Rgb) -> Self {
        Self {
            width,
            focus: Some(focus),
            normal: Some(normal),
            ..Self::default()
        }
    }

    pub fn stacked(mut self, focus_stack: Rgb, normal_stack: Rgb) -> Self {
        self.focus_stack = Some(focus_stack);
        self.normal_stack = Some(normal_stack);
        self
    }
}

/// Side panel of the tree tab layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeTab {
    pub sections: Vec<String>,
    pub panel_width: u32,
    pub font: Option<String>,
    pub section_fontsize: Option<u32>,
    pub vspace: Option<u32>,
    pub active_bg: Option<Rgb>,
    pub active_fg: Option<Rgb>,
    pub bg_color: Option<Rgb>,
    pub inactive_bg: Option<Rgb>,
    pub inactive_fg: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutKind {
    Tile {
        main: u32,
        ratio: f32,
        ratio_step: f32,
    },
    MonadWide {
        ratio: f32,
        ratio_step: f32,
    },
    RatioTile {
        fancy: bool,
    },
    TreeTab(TreeTab),
}

impl LayoutKind {
    pub fn tile() -> Self {
        Self::Tile {
            main: MAX_MAIN,
            ratio: TILE_RATIO,
            ratio_step: TILE_RATIO_STEP,
        }
    }

    pub fn monad_wide() -> Self {
        Self::MonadWide {
            ratio: MONAD_RATIO,
            ratio_step: MONAD_RATIO_STEP,
        }
    }

    fn default_name(&self) -> &'static str {
        match self {
            Self::Tile { .. } => "tile",
            Self::MonadWide { .. } => "monadwide",
            Self::RatioTile { .. } => "ratiotile",
            Self::TreeTab(_) => "treetab",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub name: Option<String>,
    pub kind: LayoutKind,
    pub margin: u32,
    pub border: Option<BorderStyle>,
}

impl LayoutConfig {
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            name: None,
            kind,
            margin: 0,
            border: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.default_name())
    }

    /// The closest penrose layout, with the margin applied as gaps and
    /// reporting [LayoutConfig::label] as its name.
    pub fn build(&self) -> Box<dyn Layout> {
        let layout = match &self.kind {
            LayoutKind::Tile {
                main,
                ratio,
                ratio_step,
            } => MainAndStack::side(*main, *ratio, *ratio_step),
            LayoutKind::MonadWide { ratio, ratio_step } => {
                MainAndStack::bottom(MAX_MAIN, *ratio, *ratio_step)
            }
            LayoutKind::RatioTile { .. } => Grid::boxed(),
            LayoutKind::TreeTab(_) => Monocle::boxed(),
        };

        let layout = if self.margin == 0 {
            layout
        } else {
            Gaps::wrap(layout, self.margin, self.margin)
        };

        Named::wrap(self.label(), layout)
    }
}

/// Give a layout a name of our choosing.
#[derive(Debug, Clone)]
pub struct Named {
    pub name: String,
    pub layout: Box<dyn Layout>,
}

impl Named {
    pub fn wrap(name: impl Into<String>, layout: Box<dyn Layout>) -> Box<dyn Layout> {
        Box::new(Self {
            name: name.into(),
            layout,
        })
    }
}

impl LayoutTransformer for Named {
    fn transformed_name(&self) -> String {
        self.name.clone()
    }

    fn inner_mut(&mut self) -> &mut Box<dyn Layout> {
        &mut self.layout
    }
}

/// The first layout is the one every workspace starts with.
pub fn default_layout(layouts: &[LayoutConfig]) -> Option<&LayoutConfig> {
    layouts.first()
}

pub fn layout_stack(layouts: &[LayoutConfig]) -> Result<LayoutStack> {
    let mut built = layouts.iter().map(LayoutConfig::build);
    let focus = built.next().ok_or(Error::NoLayouts)?;

    Ok(Stack::new(Vec::new(), focus, built.collect::<Vec<_>>()))
}

/// Borders are global in penrose so they come from the default layout.
pub fn apply_border<X: XConn>(config: &mut Config<X>, border: &BorderStyle) {
    config.border_width = border.width;
    if let Some(c) = border.focus {
        config.focused_border = c.into();
    }
    if let Some(c) = border.normal {
        config.normal_border = c.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penrose::{builtin::layout::messages::ExpandMain, core::layout::IntoMessage};

    fn layouts() -> Vec<LayoutConfig> {
        vec![
            LayoutConfig::new(LayoutKind::tile()).margin(20),
            LayoutConfig::new(LayoutKind::TreeTab(TreeTab::default())).named("Stack - TreeTab"),
            LayoutConfig::new(LayoutKind::RatioTile { fancy: true }),
        ]
    }

    #[test]
    fn label_falls_back_to_kind() {
        let ls = layouts();

        assert_eq!(ls[0].label(), "tile");
        assert_eq!(ls[1].label(), "Stack - TreeTab");
        assert_eq!(ls[2].label(), "ratiotile");
    }

    #[test]
    fn default_layout_is_the_first_declared() {
        let ls = layouts();

        assert_eq!(default_layout(&ls), Some(&ls[0]));
        assert_eq!(default_layout(&[]), None);
    }

    #[test]
    fn layout_stack_keeps_declaration_order() {
        let ls = layouts();
        let stack = layout_stack(&ls).unwrap();
        let names: Vec<String> = stack.iter().map(|l| l.name()).collect();

        assert_eq!(names, ["tile", "Stack - TreeTab", "ratiotile"]);
        assert_eq!(stack.focused().name(), "tile");
    }

    #[test]
    fn built_layouts_report_their_label() {
        let tile = LayoutConfig::new(LayoutKind::tile())
            .named("Main/Slaves - Tile")
            .margin(20);

        assert_eq!(tile.build().name(), "Main/Slaves - Tile");
    }

    #[test]
    fn renamed_layouts_still_take_messages() {
        let mut tile = LayoutConfig::new(LayoutKind::tile()).named("Main").build();
        let expanded = tile.handle_message(&ExpandMain.into_message());

        assert!(expanded.is_none());
        assert_eq!(tile.name(), "Main");
    }

    #[test]
    fn empty_layout_list_is_rejected() {
        assert!(matches!(layout_stack(&[]), Err(Error::NoLayouts)));
    }

    #[test]
    fn stacked_border_keeps_primary_colours() {
        let b = BorderStyle::new(3, Rgb::new(0xf289ff), Rgb::new(0xffffff))
            .stacked(Rgb::new(0xe5e5e5), Rgb::new(0xf9c5ff));

        assert_eq!(b.focus, Some(Rgb::new(0xf289ff)));
        assert_eq!(b.normal_stack, Some(Rgb::new(0xf9c5ff)));
    }
}
