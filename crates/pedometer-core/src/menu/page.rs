//! Pages: graphics plus the interactive rows a cursor walks over.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::{
    error::{Error, MenuError, Result},
    graphics::{self, Graphic, Surface, TextLine, VALUE_TEXT_BYTES},
    store::{DataField, Store, Value},
};

pub const MAX_GRAPHICS: usize = 8;
pub const MAX_ITEMS: usize = 6;
const LABEL_BYTES: usize = 16;

/// Glyph marking the selected row.
pub const CURSOR: char = '>';
/// Column the cursor glyph is drawn at.
pub const CURSOR_COL: u8 = 6;

/// Stable page key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageName {
    Main,
    Config,
    Time,
    Target,
}

/// Row that navigates to another page when confirmed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InteractiveLink {
    pub target: PageName,
    pub label: TextLine,
}

impl InteractiveLink {
    pub const fn new(target: PageName, label: TextLine) -> Self {
        Self { target, label }
    }
}

/// Row editing one store field, drawn as `"<label> <value>"`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InteractiveParam {
    field: DataField,
    label: TextLine,
    value: Option<Value>,
}

impl InteractiveParam {
    pub const fn new(field: DataField, label: TextLine) -> Self {
        Self {
            field,
            label,
            value: None,
        }
    }

    pub fn field(&self) -> DataField {
        self.field
    }

    pub fn label(&self) -> &TextLine {
        &self.label
    }

    pub fn value(&self) -> Option<Value> {
        self.value
    }

    pub fn refresh(&mut self, store: &Store) -> Result<()> {
        self.value = Some(graphics::pull(self.field, self.value, store)?);
        Ok(())
    }

    /// Row text; the label alone before the first refresh.
    pub fn text(&self) -> String<{ LABEL_BYTES + 1 + VALUE_TEXT_BYTES }> {
        let mut text = String::new();
        let _ = text.push_str(self.label.text);
        if let Some(value) = self.value {
            let _ = write!(text, " {value}");
        }
        text
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.put_string(&self.text(), self.label.page, self.label.col, self.label.font);
    }
}

fn step_selection(index: usize, count: usize, increase: bool) -> usize {
    if count <= 1 {
        return index;
    }
    if increase {
        (index + 1).min(count - 1)
    } else {
        index.saturating_sub(1)
    }
}

fn draw_cursor<S: Surface>(surface: &mut S, row: &TextLine) {
    surface.put_char(CURSOR, row.page, CURSOR_COL, row.font);
}

fn refresh_all(graphics: &mut [Graphic], store: &Store) -> Result<()> {
    graphics.iter_mut().try_for_each(|graphic| graphic.refresh(store))
}

/// Navigation page.
#[derive(Clone, Debug, Default)]
pub struct LinkPage {
    graphics: Vec<Graphic, MAX_GRAPHICS>,
    links: Vec<InteractiveLink, MAX_ITEMS>,
    selected: usize,
}

impl LinkPage {
    pub const fn new() -> Self {
        Self {
            graphics: Vec::new(),
            links: Vec::new(),
            selected: 0,
        }
    }

    pub fn push_graphic(&mut self, graphic: Graphic) -> Result<()> {
        self.graphics
            .push(graphic)
            .map_err(|_| Error::CapacityExceeded)
    }

    pub fn push_link(&mut self, link: InteractiveLink) -> Result<()> {
        self.links.push(link).map_err(|_| Error::CapacityExceeded)
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn links(&self) -> &[InteractiveLink] {
        &self.links
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the cursor one row; saturates at both ends.
    pub fn change_selection(&mut self, increase: bool) {
        self.selected = step_selection(self.selected, self.links.len(), increase);
    }

    /// Target of the selected link, `None` on a page without links.
    pub fn confirm_selection(&self) -> Option<PageName> {
        self.links.get(self.selected).map(|link| link.target)
    }

    pub fn refresh(&mut self, store: &Store) -> Result<()> {
        refresh_all(&mut self.graphics, store)
    }

    /// Composites the page. Links and cursor only show with two or more links.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        for graphic in &self.graphics {
            graphic.draw(surface);
        }
        if self.links.len() > 1 {
            for link in &self.links {
                link.label.draw(surface);
            }
            if let Some(link) = self.links.get(self.selected) {
                draw_cursor(surface, &link.label);
            }
        }
    }
}

/// Value-editing page that returns to `parent` after the last row.
#[derive(Clone, Debug)]
pub struct ParamPage {
    graphics: Vec<Graphic, MAX_GRAPHICS>,
    params: Vec<InteractiveParam, MAX_ITEMS>,
    selected: usize,
    parent: PageName,
}

impl ParamPage {
    pub const fn new(parent: PageName) -> Self {
        Self {
            graphics: Vec::new(),
            params: Vec::new(),
            selected: 0,
            parent,
        }
    }

    pub fn push_graphic(&mut self, graphic: Graphic) -> Result<()> {
        self.graphics
            .push(graphic)
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Adds a row. Labels longer than the row buffer are rejected.
    pub fn push_param(&mut self, param: InteractiveParam) -> Result<()> {
        if param.label.text.len() > LABEL_BYTES {
            return Err(Error::CapacityExceeded);
        }
        self.params.push(param).map_err(|_| Error::CapacityExceeded)
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn params(&self) -> &[InteractiveParam] {
        &self.params
    }

    pub fn parent(&self) -> PageName {
        self.parent
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_field(&self) -> Option<DataField> {
        self.params.get(self.selected).map(InteractiveParam::field)
    }

    pub fn change_selection(&mut self, increase: bool) {
        self.selected = step_selection(self.selected, self.params.len(), increase);
    }

    /// Puts the cursor back on the first row.
    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    pub fn is_last_param(&self) -> bool {
        self.selected + 1 == self.params.len()
    }

    pub fn refresh(&mut self, store: &Store) -> Result<()> {
        refresh_all(&mut self.graphics, store)?;
        self.params
            .iter_mut()
            .try_for_each(|param| param.refresh(store))
    }

    /// Composites the page; the cursor is drawn even for a single row.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        for graphic in &self.graphics {
            graphic.draw(surface);
        }
        for param in &self.params {
            param.draw(surface);
        }
        if let Some(param) = self.params.get(self.selected) {
            draw_cursor(surface, param.label());
        }
    }
}

/// Closed set of page kinds.
#[derive(Clone, Debug)]
pub enum Page {
    Link(LinkPage),
    Param(ParamPage),
}

impl Page {
    pub fn refresh(&mut self, store: &Store) -> Result<()> {
        match self {
            Self::Link(page) => page.refresh(store),
            Self::Param(page) => page.refresh(store),
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        match self {
            Self::Link(page) => page.draw(surface),
            Self::Param(page) => page.draw(surface),
        }
    }

    /// Pulls store values, recomposes the frame from scratch and flushes it.
    pub fn redraw<S: Surface>(
        &mut self,
        store: &Store,
        surface: &mut S,
    ) -> core::result::Result<(), MenuError<S::Error>> {
        self.refresh(store)?;
        surface.clear();
        self.draw(surface);
        surface.render().map_err(MenuError::Display)
    }

    pub fn selected(&self) -> usize {
        match self {
            Self::Link(page) => page.selected(),
            Self::Param(page) => page.selected(),
        }
    }

    pub fn as_link(&self) -> Option<&LinkPage> {
        match self {
            Self::Link(page) => Some(page),
            Self::Param(_) => None,
        }
    }

    pub fn as_param(&self) -> Option<&ParamPage> {
        match self {
            Self::Param(page) => Some(page),
            Self::Link(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{graphics::BASIC_FONT, testing::CellSurface};

    fn link(target: PageName, text: &'static str, page: u8) -> InteractiveLink {
        InteractiveLink::new(target, TextLine::new(text, page, 12, BASIC_FONT))
    }

    fn param(field: DataField, text: &'static str, page: u8) -> InteractiveParam {
        InteractiveParam::new(field, TextLine::new(text, page, 12, BASIC_FONT))
    }

    fn store() -> Store {
        let mut store = Store::new();
        store.initialize().unwrap();
        store
    }

    proptest! {
        #[test]
        fn selection_never_leaves_range(
            count in 0usize..=MAX_ITEMS,
            moves in prop::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut page = LinkPage::new();
            for row in 0..count {
                page.push_link(link(PageName::Main, "ROW", row as u8)).unwrap();
            }
            for increase in moves {
                page.change_selection(increase);
                prop_assert!(page.selected() < count.max(1));
            }
        }
    }

    #[test]
    fn selection_saturates_at_both_ends() {
        let mut page = ParamPage::new(PageName::Config);
        page.push_param(param(DataField::Hours, "HOURS", 2)).unwrap();
        page.push_param(param(DataField::Minutes, "MINUTES", 3)).unwrap();
        page.push_param(param(DataField::Seconds, "SECONDS", 4)).unwrap();

        for _ in 0..5 {
            page.change_selection(false);
        }
        assert_eq!(page.selected(), 0);

        for _ in 0..5 {
            page.change_selection(true);
        }
        assert_eq!(page.selected(), 2);
        assert!(page.is_last_param());
    }

    #[test]
    fn single_link_page_ignores_selection_changes() {
        let mut page = LinkPage::new();
        page.push_link(link(PageName::Config, "CONFIG", 3)).unwrap();

        page.change_selection(true);
        assert_eq!(page.selected(), 0);
        assert_eq!(page.confirm_selection(), Some(PageName::Config));
    }

    #[test]
    fn page_without_links_confirms_nothing() {
        assert_eq!(LinkPage::new().confirm_selection(), None);
    }

    #[test]
    fn link_rows_hidden_with_single_link() {
        let mut page = LinkPage::new();
        page.push_graphic(Graphic::Text(TextLine::new("TITLE", 1, 12, BASIC_FONT)))
            .unwrap();
        page.push_link(link(PageName::Config, "CONFIG", 3)).unwrap();
        let mut surface = CellSurface::new();

        page.draw(&mut surface);
        assert_eq!(surface.line(1), "TITLE");
        assert_eq!(surface.line(3), "");
    }

    #[test]
    fn cursor_marks_selected_link() {
        let mut page = LinkPage::new();
        page.push_link(link(PageName::Main, "BACK", 3)).unwrap();
        page.push_link(link(PageName::Main, "HOME", 4)).unwrap();
        page.change_selection(true);
        let mut surface = CellSurface::new();

        page.draw(&mut surface);
        assert_eq!(surface.line(3), "BACK");
        assert_eq!(surface.line(4), ">HOME");
    }

    #[test]
    fn param_rows_show_label_and_value() {
        let mut store = store();
        store.write(DataField::Minutes, Value::U8(42)).unwrap();
        let mut page = ParamPage::new(PageName::Config);
        page.push_param(param(DataField::Minutes, "MINUTES", 2)).unwrap();
        page.push_param(param(DataField::GoalAlert, "ALERT", 3)).unwrap();
        let mut surface = CellSurface::new();

        page.refresh(&store).unwrap();
        page.draw(&mut surface);
        assert_eq!(surface.line(2), ">MINUTES 42");
        assert_eq!(surface.line(3), "ALERT NO");
    }

    #[test]
    fn single_param_page_still_draws_cursor() {
        let store = store();
        let mut page = ParamPage::new(PageName::Config);
        page.push_param(param(DataField::Hours, "HOURS", 5)).unwrap();
        let mut surface = CellSurface::new();

        page.refresh(&store).unwrap();
        page.draw(&mut surface);
        assert_eq!(surface.line(5), ">HOURS 0");
    }

    #[test]
    fn redraw_clears_stale_cursor_and_renders() {
        let store = store();
        let mut page = Page::Link({
            let mut page = LinkPage::new();
            page.push_link(link(PageName::Main, "BACK", 3)).unwrap();
            page.push_link(link(PageName::Main, "HOME", 4)).unwrap();
            page
        });
        let mut surface = CellSurface::new();

        page.redraw(&store, &mut surface).unwrap();
        assert_eq!(surface.line(3), ">BACK");

        if let Page::Link(links) = &mut page {
            links.change_selection(true);
        }
        page.redraw(&store, &mut surface).unwrap();
        assert_eq!(surface.line(3), "BACK");
        assert_eq!(surface.line(4), ">HOME");
        assert_eq!(surface.renders(), 2);
    }

    #[test]
    fn redraw_reports_flush_failure() {
        let store = store();
        let mut page = Page::Param(ParamPage::new(PageName::Main));
        let mut surface = CellSurface::new();
        surface.fail_render();

        assert_eq!(
            page.redraw(&store, &mut surface),
            Err(MenuError::Display("flush failed"))
        );
    }

    #[test]
    fn overlong_param_label_is_rejected() {
        let mut page = ParamPage::new(PageName::Config);

        assert_eq!(
            page.push_param(param(DataField::Hours, "HOURS OF THE DAY", 2)),
            Ok(())
        );
        assert_eq!(
            page.push_param(param(DataField::Minutes, "MINUTES PAST THE HOUR", 3)),
            Err(Error::CapacityExceeded)
        );
        assert_eq!(page.params().len(), 1);
    }

    #[test]
    fn reset_selection_returns_to_first_row() {
        let mut page = ParamPage::new(PageName::Config);
        page.push_param(param(DataField::Hours, "HOURS", 2)).unwrap();
        page.push_param(param(DataField::Minutes, "MINUTES", 3)).unwrap();
        page.change_selection(true);
        assert!(page.is_last_param());

        page.reset_selection();
        assert_eq!(page.selected_field(), Some(DataField::Hours));
    }

    #[test]
    fn graphics_capacity_is_enforced() {
        let mut page = LinkPage::new();
        for _ in 0..MAX_GRAPHICS {
            page.push_graphic(Graphic::Text(TextLine::new("X", 0, 0, BASIC_FONT)))
                .unwrap();
        }

        assert_eq!(
            page.push_graphic(Graphic::Text(TextLine::new("X", 0, 0, BASIC_FONT))),
            Err(Error::CapacityExceeded)
        );
    }
}
