//! The closed set of dashboard sections

use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// A dashboard tab. Each variant except `Agenda` is backed by one API collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Clients,
    Barbers,
    Services,
    Appointments,
    /// Referenced by the navigation but without a backing collection
    Agenda,
}

impl Section {
    /// All sections in navigation order
    pub const ALL: [Section; 5] = [
        Section::Clients,
        Section::Barbers,
        Section::Services,
        Section::Appointments,
        Section::Agenda,
    ];

    /// Tag used in URLs and markup
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Clients => "clientes",
            Section::Barbers => "barberos",
            Section::Services => "servicios",
            Section::Appointments => "citas",
            Section::Agenda => "agenda",
        }
    }

    /// Human-readable title
    pub fn label(&self) -> &'static str {
        match self {
            Section::Clients => "Clientes",
            Section::Barbers => "Barberos",
            Section::Services => "Servicios",
            Section::Appointments => "Citas",
            Section::Agenda => "Agenda",
        }
    }

    /// Resource path under the API prefix, `None` when the section has no data
    pub fn resource_path(&self) -> Option<&'static str> {
        match self {
            Section::Clients => Some("/clientes/"),
            Section::Barbers => Some("/barberos/"),
            Section::Services => Some("/servicios/"),
            Section::Appointments => Some("/citas/"),
            Section::Agenda => None,
        }
    }

    /// Element id of the navigation link bound to this section
    pub fn nav_id(&self) -> String {
        format!("nav-{}", self.slug())
    }

    /// Resolve a navigation link id such as `nav-citas`
    pub fn from_nav_id(id: &str) -> Option<Section> {
        let slug = id.strip_prefix("nav-")?;
        Section::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = DashboardError;

    /// Accepts the Spanish slug or the English variant name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        let section = match needle.as_str() {
            "clientes" | "clients" => Section::Clients,
            "barberos" | "barbers" => Section::Barbers,
            "servicios" | "services" => Section::Services,
            "citas" | "appointments" => Section::Appointments,
            "agenda" => Section::Agenda,
            _ => return Err(DashboardError::config(format!("unknown section: {}", s))),
        };
        Ok(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Section::Clients.resource_path(), Some("/clientes/"));
        assert_eq!(Section::Barbers.resource_path(), Some("/barberos/"));
        assert_eq!(Section::Services.resource_path(), Some("/servicios/"));
        assert_eq!(Section::Appointments.resource_path(), Some("/citas/"));
        assert_eq!(Section::Agenda.resource_path(), None);
    }

    #[test]
    fn test_nav_id_lookup() {
        for section in Section::ALL {
            assert_eq!(Section::from_nav_id(&section.nav_id()), Some(section));
        }
        assert_eq!(Section::from_nav_id("nav-inventario"), None);
        assert_eq!(Section::from_nav_id("clientes"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Citas".parse::<Section>().unwrap(), Section::Appointments);
        assert_eq!("barbers".parse::<Section>().unwrap(), Section::Barbers);
        assert!("".parse::<Section>().is_err());
    }
}
