//! Page graph and the menu state machine driving it.

mod layout;
mod page;


use heapless::LinearMap;
use log::{debug, info};

pub use layout::reference_graph;
pub use page::{
    CURSOR, CURSOR_COL, InteractiveLink, InteractiveParam, LinkPage, MAX_GRAPHICS, MAX_ITEMS,
    Page, PageName, ParamPage,
};

use crate::{
    error::{Component, Error, MenuError, Result},
    graphics::{BASIC_FONT, Surface},
    input::MenuAction,
    store::Store,
};

pub const MAX_PAGES: usize = 4;

type MenuResult<E> = core::result::Result<(), MenuError<E>>;

/// Pages keyed by name.
#[derive(Clone, Debug, Default)]
pub struct PageGraph {
    pages: LinearMap<PageName, Page, MAX_PAGES>,
}

impl PageGraph {
    pub const fn new() -> Self {
        Self {
            pages: LinearMap::new(),
        }
    }

    pub fn insert(&mut self, name: PageName, page: Page) -> Result<()> {
        if self.pages.contains_key(&name) {
            return Err(Error::DuplicatePage(name));
        }
        self.pages
            .insert(name, page)
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(())
    }

    pub fn get(&self, name: PageName) -> Option<&Page> {
        self.pages.get(&name)
    }

    fn get_mut(&mut self, name: PageName) -> Result<&mut Page> {
        self.pages.get_mut(&name).ok_or(Error::UnknownPage(name))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Checks that every link target and parent exists and that no
    /// parameter page is empty.
    pub fn validate(&self, initial: PageName) -> Result<()> {
        if !self.pages.contains_key(&initial) {
            return Err(Error::UnknownPage(initial));
        }

        for (name, page) in self.pages.iter() {
            match page {
                Page::Link(links) => {
                    for link in links.links() {
                        if !self.pages.contains_key(&link.target) {
                            return Err(Error::UnknownPage(link.target));
                        }
                    }
                }
                Page::Param(params) => {
                    if params.params().is_empty() {
                        return Err(Error::EmptyParamPage(*name));
                    }
                    if !self.pages.contains_key(&params.parent()) {
                        return Err(Error::UnknownPage(params.parent()));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Owns the pages and routes actions to the active one.
#[derive(Debug)]
pub struct Menu {
    pages: PageGraph,
    active: PageName,
    initialized: bool,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            pages: PageGraph::new(),
            active: PageName::Main,
            initialized: false,
        }
    }

    /// Installs the default pages, opens MAIN and draws it.
    pub fn init<S: Surface>(&mut self, store: &Store, surface: &mut S) -> MenuResult<S::Error> {
        if self.initialized {
            return Err(Error::AlreadyInitialized(Component::Menu).into());
        }
        let graph = reference_graph(&surface.attributes(), surface.font_width(BASIC_FONT))?;
        self.init_with(graph, PageName::Main, store, surface)
    }

    /// Installs a custom page graph, opens `initial` and draws it.
    pub fn init_with<S: Surface>(
        &mut self,
        graph: PageGraph,
        initial: PageName,
        store: &Store,
        surface: &mut S,
    ) -> MenuResult<S::Error> {
        if self.initialized {
            return Err(Error::AlreadyInitialized(Component::Menu).into());
        }
        graph.validate(initial)?;

        self.pages = graph;
        self.active = initial;
        self.initialized = true;
        info!("menu: {} pages, opening {:?}", self.pages.len(), initial);
        self.redraw(store, surface)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn active(&self) -> PageName {
        self.active
    }

    pub fn page(&self, name: PageName) -> Option<&Page> {
        self.pages.get(name)
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized(Component::Menu))
        }
    }

    /// Refreshes and redraws the active page without changing state.
    pub fn redraw<S: Surface>(&mut self, store: &Store, surface: &mut S) -> MenuResult<S::Error> {
        self.ensure_initialized()?;
        self.pages.get_mut(self.active)?.redraw(store, surface)
    }

    /// Applies one action to the active page, then redraws.
    pub fn action<S: Surface>(
        &mut self,
        action: MenuAction,
        store: &mut Store,
        surface: &mut S,
    ) -> MenuResult<S::Error> {
        self.ensure_initialized()?;
        let current = self.active;

        let next = match self.pages.get_mut(current)? {
            Page::Link(page) => match action {
                MenuAction::Enter => page.confirm_selection(),
                MenuAction::Up => {
                    page.change_selection(true);
                    None
                }
                MenuAction::Down => {
                    page.change_selection(false);
                    None
                }
            },
            Page::Param(page) => match action {
                MenuAction::Enter if page.is_last_param() => Some(page.parent()),
                MenuAction::Enter => {
                    page.change_selection(true);
                    None
                }
                MenuAction::Up | MenuAction::Down => {
                    let field = page
                        .selected_field()
                        .ok_or(Error::EmptyParamPage(current))?;
                    store.adjust(field, action == MenuAction::Up)?;
                    None
                }
            },
        };

        if let Some(next) = next {
            debug!("menu: {:?} -> {:?}", current, next);
            // Parameter pages are always entered on their first row.
            if let Page::Param(page) = self.pages.get_mut(next)? {
                page.reset_selection();
            }
            self.active = next;
        } else {
            debug!("menu: {:?} on {:?}", action, current);
        }

        self.redraw(store, surface)
    }
}
