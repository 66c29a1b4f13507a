//! View controller: the active section and the state of its data

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::config::{DashboardOptions, RenderOptions};
use crate::error::Result;
use crate::fetch::{ApiClient, Fetcher};
use crate::render;
use crate::section::Section;

/// Where the active section's data stands
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Nothing requested. Sections without data stay here.
    Idle,
    Loading,
    Loaded(Vec<Value>),
    /// Human-readable failure message
    Failed(String),
}

/// Everything the renderer needs, as one immutable value
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub section: Section,
    pub phase: Phase,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            section: Section::default(),
            phase: Phase::Idle,
        }
    }
}

/// Handle for one issued fetch. Only the most recently issued ticket may
/// complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    section: Section,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn section(&self) -> Section {
        self.section
    }
}

/// Synchronous state machine behind the dashboard
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
    issued: u64,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Sequence number of the last issued ticket
    pub fn latest(&self) -> u64 {
        self.issued
    }

    /// Switch to `section`. Returns the ticket for the fetch to perform, or
    /// `None` when the section has no data. Either way every earlier ticket
    /// becomes stale.
    pub fn begin(&mut self, section: Section) -> Option<Ticket> {
        self.issued += 1;

        match section.resource_path() {
            Some(_) => {
                self.state = ViewState {
                    section,
                    phase: Phase::Loading,
                };
                Some(Ticket {
                    seq: self.issued,
                    section,
                })
            }
            None => {
                self.state = ViewState {
                    section,
                    phase: Phase::Idle,
                };
                None
            }
        }
    }

    /// Apply a fetch result. Returns `false` and leaves the state untouched
    /// when the ticket has been superseded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Vec<Value>>) -> bool {
        if ticket.seq != self.issued {
            log::debug!(
                "discarding stale {} response (ticket {}, latest {})",
                ticket.section,
                ticket.seq,
                self.issued
            );
            return false;
        }

        self.state.phase = match result {
            Ok(records) => {
                log::debug!("{}: loaded {} records", ticket.section, records.len());
                Phase::Loaded(records)
            }
            Err(err) => Phase::Failed(err.to_string()),
        };
        true
    }
}

/// Async driver tying a [`Fetcher`] to a [`ViewController`].
///
/// Methods take `&self`, so selections may overlap; the controller's ticket
/// check decides which result wins.
#[derive(Clone)]
pub struct Dashboard<F> {
    fetcher: F,
    controller: Arc<Mutex<ViewController>>,
    render_options: RenderOptions,
}

impl Dashboard<ApiClient> {
    /// Dashboard backed by the HTTP API
    pub fn from_options(options: DashboardOptions) -> Result<Self> {
        let render_options = options.render.clone();
        Ok(Self::new(ApiClient::from_options(options)?, render_options))
    }
}

impl<F: Fetcher> Dashboard<F> {
    pub fn new(fetcher: F, render_options: RenderOptions) -> Self {
        Self {
            fetcher,
            controller: Arc::new(Mutex::new(ViewController::new())),
            render_options,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> ViewState {
        self.controller().state().clone()
    }

    /// Make `section` active and load its data. Issues exactly one fetch for
    /// sections with data and none for the agenda.
    pub async fn select(&self, section: Section) -> ViewState {
        let ticket = self.controller().begin(section);

        if let Some(ticket) = ticket {
            let result = self.fetcher.fetch_section(section).await;
            if let Err(err) = &result {
                log::error!("failed to load {}: {}", section, err);
            }
            self.controller().complete(ticket, result);
        }

        self.state()
    }

    /// Handle a click on a navigation link. Unknown ids are ignored.
    pub async fn navigate(&self, nav_id: &str) -> Option<ViewState> {
        match Section::from_nav_id(nav_id) {
            Some(section) => Some(self.select(section).await),
            None => {
                log::warn!("unknown navigation link: {}", nav_id);
                None
            }
        }
    }

    /// Re-fetch the active section
    pub async fn refresh(&self) -> ViewState {
        let section = self.state().section;
        self.select(section).await
    }

    /// Markup of the list container for the current state
    pub fn render_content(&self) -> Result<String> {
        render::render_content(&self.state(), &self.render_options)
    }

    /// Full page markup for the current state
    pub fn render_page(&self) -> Result<String> {
        render::render_page(&self.state(), &self.render_options)
    }

    fn controller(&self) -> MutexGuard<'_, ViewController> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
