//! Default page content shipped with the firmware.

use crate::{
    error::Result,
    graphics::{
        BASIC_FONT, DataLine, DisplayAttributes, Graphic, Point, Rectangle, TextLine,
        centered_column,
    },
    store::DataField,
};

use super::{
    PageGraph,
    page::{InteractiveLink, InteractiveParam, LinkPage, Page, PageName, ParamPage},
};

const TITLE_PAGE: u8 = 1;
const LABEL_COL: u8 = 12;
const FRAME_INSET: u8 = 2;

const STEPS_LABEL: &str = "STEPS:";
const TARGET_LABEL: &str = "TARGET:";

fn title(text: &'static str, attrs: &DisplayAttributes, cell: Option<u8>) -> Graphic {
    Graphic::Text(TextLine::new(
        text,
        TITLE_PAGE,
        centered_column(text, attrs.columns, cell),
        BASIC_FONT,
    ))
}

fn frame(attrs: &DisplayAttributes) -> Graphic {
    Graphic::Rectangle(Rectangle::outline(
        Point::new(attrs.first_col + FRAME_INSET, attrs.first_row + FRAME_INSET),
        Point::new(attrs.last_col - FRAME_INSET, attrs.last_row - FRAME_INSET),
    ))
}

const fn row(text: &'static str, page: u8) -> TextLine {
    TextLine::new(text, page, LABEL_COL, BASIC_FONT)
}

fn main_page(attrs: &DisplayAttributes, cell: Option<u8>) -> Result<LinkPage> {
    // Values share one column, one blank cell after the longest label.
    let value_col = LABEL_COL + (TARGET_LABEL.len() as u8 + 1) * cell.unwrap_or(0);

    let mut page = LinkPage::new();
    page.push_graphic(title("PEDOMETER", attrs, cell))?;
    page.push_graphic(Graphic::Text(row(STEPS_LABEL, 5)))?;
    page.push_graphic(Graphic::Text(row(TARGET_LABEL, 6)))?;
    page.push_graphic(Graphic::Data(DataLine::new(
        DataField::Steps,
        5,
        value_col,
        BASIC_FONT,
    )))?;
    page.push_graphic(Graphic::Data(DataLine::new(
        DataField::TargetSteps,
        6,
        value_col,
        BASIC_FONT,
    )))?;
    page.push_graphic(frame(attrs))?;
    page.push_link(InteractiveLink::new(PageName::Config, row("CONFIG", 3)))?;
    Ok(page)
}

fn config_page(attrs: &DisplayAttributes, cell: Option<u8>) -> Result<LinkPage> {
    let mut page = LinkPage::new();
    page.push_graphic(title("CONFIG", attrs, cell))?;
    page.push_graphic(frame(attrs))?;
    page.push_link(InteractiveLink::new(PageName::Main, row("BACK", 3)))?;
    page.push_link(InteractiveLink::new(PageName::Main, row("HOME", 4)))?;
    page.push_link(InteractiveLink::new(PageName::Time, row("SET TIME", 5)))?;
    page.push_link(InteractiveLink::new(PageName::Target, row("SET TARGET", 6)))?;
    Ok(page)
}

fn time_page(attrs: &DisplayAttributes, cell: Option<u8>) -> Result<ParamPage> {
    let mut page = ParamPage::new(PageName::Config);
    page.push_graphic(title("SET TIME", attrs, cell))?;
    page.push_graphic(frame(attrs))?;
    page.push_param(InteractiveParam::new(DataField::Hours, row("HOURS", 3)))?;
    page.push_param(InteractiveParam::new(DataField::Minutes, row("MINUTES", 4)))?;
    page.push_param(InteractiveParam::new(DataField::Seconds, row("SECONDS", 5)))?;
    Ok(page)
}

fn target_page(attrs: &DisplayAttributes, cell: Option<u8>) -> Result<ParamPage> {
    let mut page = ParamPage::new(PageName::Config);
    page.push_graphic(title("SET TARGET", attrs, cell))?;
    page.push_graphic(frame(attrs))?;
    page.push_param(InteractiveParam::new(DataField::TargetSteps, row("TARGET", 3)))?;
    page.push_param(InteractiveParam::new(DataField::GoalAlert, row("ALERT", 4)))?;
    Ok(page)
}

/// Builds MAIN, CONFIG, TIME and TARGET for a panel of the given geometry.
///
/// `cell` is the width of the basic font on the target surface.
pub fn reference_graph(attrs: &DisplayAttributes, cell: Option<u8>) -> Result<PageGraph> {
    let mut graph = PageGraph::new();
    graph.insert(PageName::Main, Page::Link(main_page(attrs, cell)?))?;
    graph.insert(PageName::Config, Page::Link(config_page(attrs, cell)?))?;
    graph.insert(PageName::Time, Page::Param(time_page(attrs, cell)?))?;
    graph.insert(PageName::Target, Page::Param(target_page(attrs, cell)?))?;
    Ok(graph)
}
