//! Event loop for the interactive product list
//!
//! The controller owns the [`CollectionState`] and is the only thing that
//! mutates it. Fetches and debounce timers run as spawned tasks that report
//! back by posting an [`Event`]; events are handled one at a time, and every
//! handled transition ends in exactly one render.

use std::time::Duration;

use storefront_core::catalog::SortKey;
use storefront_core::debounce::{Debouncer, Ticket, SEARCH_DEBOUNCE};
use storefront_core::product::Product;
use storefront_core::state::CollectionState;
use storefront_core::view::build_list_view;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::error::FetchError;
use crate::render::Render;
use crate::source::ProductSource;

#[derive(Debug)]
pub enum Event {
    /// Raw search box content after a keystroke
    SearchInput(String),
    /// Debounce timer for a search input expired
    SearchSettled(Ticket),
    FilterToggle { category: String, checked: bool },
    SortChange(SortKey),
    LoadMore,
    PageLoaded {
        page: u32,
        result: Result<Vec<Product>, FetchError>,
    },
    /// No more input; stop once the pending fetch and search have settled
    Drain,
    Quit,
}

/// Search debounce: one timer task per keystroke, the previous one aborted
#[derive(Debug)]
struct SearchTimer {
    delay: Duration,
    debouncer: Debouncer<String>,
    task: Option<JoinHandle<()>>,
}

impl SearchTimer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            debouncer: Debouncer::new(),
            task: None,
        }
    }

    fn restart(&mut self, text: String, events: &UnboundedSender<Event>) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let ticket = self.debouncer.schedule(text);
        let events = events.clone();
        let delay = self.delay;

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::SearchSettled(ticket));
        }));
    }

    // An aborted timer may already have posted its event; the ticket check
    // drops it.
    fn settle(&mut self, ticket: Ticket) -> Option<String> {
        let text = self.debouncer.settle(ticket)?;
        self.task = None;
        Some(text)
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.debouncer.cancel();
    }

    fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

pub struct Controller<S: ProductSource, R: Render> {
    state: CollectionState,
    source: S,
    renderer: R,
    events: UnboundedSender<Event>,
    search: SearchTimer,
    pending_page: Option<u32>,
    last_error: Option<String>,
    draining: bool,
}

impl<S: ProductSource, R: Render> Controller<S, R> {
    pub fn new(source: S, renderer: R, events: UnboundedSender<Event>) -> Self {
        Self {
            state: CollectionState::new(),
            source,
            renderer,
            events,
            search: SearchTimer::new(SEARCH_DEBOUNCE),
            pending_page: None,
            last_error: None,
            draining: false,
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.search = SearchTimer::new(delay);
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_loading(&self) -> bool {
        self.pending_page.is_some()
    }

    /// No page fetch in flight and no search waiting for its quiet period
    fn is_idle(&self) -> bool {
        !self.is_loading() && !self.search.is_pending()
    }

    /// Request the first page
    pub fn start(&mut self) {
        self.request_page(self.state.next_page());
    }

    /// Process events until `Quit` arrives or every sender is gone
    pub async fn run(mut self, mut events: UnboundedReceiver<Event>) -> R {
        self.start();

        while let Some(event) = events.recv().await {
            if !self.handle(event) {
                break;
            }
        }

        self.search.cancel();
        self.renderer
    }

    /// Apply one event; returns `false` when the loop should stop
    ///
    /// After [`Event::Drain`] the loop stops as soon as nothing is pending.
    pub fn handle(&mut self, event: Event) -> bool {
        log::debug!("event: {event:?}");

        match event {
            Event::SearchInput(text) => {
                self.search.restart(text, &self.events);
            }
            Event::SearchSettled(ticket) => {
                if let Some(text) = self.search.settle(ticket) {
                    self.state.set_search(text);
                    self.render();
                }
            }
            Event::FilterToggle { category, checked } => {
                self.state.toggle_filter(&category, checked);
                self.render();
            }
            Event::SortChange(key) => {
                self.state.set_sort(key);
                self.render();
            }
            Event::LoadMore => self.load_more(),
            Event::PageLoaded { page, result } => self.page_loaded(page, result),
            Event::Drain => self.draining = true,
            Event::Quit => {
                self.search.cancel();
                return false;
            }
        }

        !(self.draining && self.is_idle())
    }

    fn load_more(&mut self) {
        if let Some(page) = self.pending_page {
            log::debug!("page {page} still loading, ignoring load more");
            return;
        }
        if !self.state.can_load_more() {
            log::debug!("load more is hidden while the list is narrowed");
            return;
        }

        self.request_page(self.state.next_page());
        self.render();
    }

    fn request_page(&mut self, page: u32) {
        self.pending_page = Some(page);

        let source = self.source.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(page).await;
            let _ = events.send(Event::PageLoaded { page, result });
        });
    }

    fn page_loaded(&mut self, page: u32, result: Result<Vec<Product>, FetchError>) {
        if self.pending_page != Some(page) {
            log::debug!("dropping unexpected page {page}");
            return;
        }
        self.pending_page = None;

        match result {
            Ok(products) => {
                log::debug!("page {page}: {} products", products.len());
                self.state.merge_page(page, products);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("Error fetching products: {e}");
                self.last_error = Some(e.to_string());
            }
        }

        self.render();
    }

    fn render(&mut self) {
        let view = build_list_view(
            &self.state,
            self.is_loading(),
            self.last_error.as_deref(),
        );
        self.renderer.render(&view);
    }
}
