//! Tab navigation between sections

use crate::section::Section;

/// One link of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Element id, e.g. `nav-clientes`
    pub id: String,
    pub slug: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub active: bool,
}

/// The fixed navigation bar
pub struct Navigation;

impl Navigation {
    /// Links for every section in order, with only `active` marked
    pub fn links(active: Section) -> Vec<NavLink> {
        Section::ALL
            .into_iter()
            .map(|section| NavLink {
                id: section.nav_id(),
                slug: section.slug(),
                label: section.label(),
                section,
                active: section == active,
            })
            .collect()
    }
}
