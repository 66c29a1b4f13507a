//! Barbershop administration dashboard client
//!
//! A read-only client for the barbershop REST API. It fetches clients,
//! barbers, services and appointments and renders them as HTML tables behind
//! a tab-style navigation.
//!
//! # Example
//!
//! ```no_run
//! use barberia_admin::prelude::*;
//!
//! # async fn run() -> Result<(), DashboardError> {
//! let options = DashboardOptions::default().with_base_url("http://localhost:8000")?;
//! let dashboard = Dashboard::from_options(options)?;
//!
//! dashboard.select(Section::Appointments).await;
//! println!("{}", dashboard.render_page()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod navigation;
pub mod render;
pub mod section;
pub mod view;

pub use crate::config::{DashboardOptions, DisplayZone, RenderOptions};
pub use crate::error::{DashboardError, Result};
pub use crate::fetch::{normalize, ApiClient, Fetcher};
pub use crate::section::Section;
pub use crate::view::{Dashboard, Phase, ViewController, ViewState};

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{DashboardOptions, DisplayZone, RenderOptions};
    pub use crate::error::DashboardError;
    pub use crate::fetch::{ApiClient, Fetcher};
    pub use crate::section::Section;
    pub use crate::view::{Dashboard, Phase, ViewState};
}
