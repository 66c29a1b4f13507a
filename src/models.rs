//! Record shapes served by the barbershop API
//!
//! Every field is optional: the API owns these records and the client never
//! rejects one for a missing field.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::section::Section;

/// A collection that can be listed through [`crate::fetch::ApiClient::list`]
pub trait Resource: DeserializeOwned {
    /// Section whose endpoint serves this record type
    const SECTION: Section;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Natural key
    pub rut: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub correo: Option<String>,
    pub celular: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Barber {
    pub id_barbero: Option<i64>,
    pub nombre: Option<String>,
    pub usuario: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id_servicio: Option<i64>,
    pub nombre: Option<String>,
    pub duracion_min: Option<i64>,
    pub precio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id_cita: Option<i64>,
    pub cliente_nombre: Option<String>,
    pub barbero_nombre: Option<String>,
    pub servicio_nombre: Option<String>,
    /// ISO-8601 timestamp as sent by the API
    pub fecha_programada: Option<String>,
    pub estado: Option<String>,
}

impl Resource for Client {
    const SECTION: Section = Section::Clients;
}

impl Resource for Barber {
    const SECTION: Section = Section::Barbers;
}

impl Resource for Service {
    const SECTION: Section = Section::Services;
}

impl Resource for Appointment {
    const SECTION: Section = Section::Appointments;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_none() {
        let barber: Barber = serde_json::from_value(json!({ "nombre": "Pedro" })).unwrap();
        assert_eq!(barber.nombre.as_deref(), Some("Pedro"));
        assert_eq!(barber.id_barbero, None);
        assert_eq!(barber.activo, None);
    }

    #[test]
    fn test_null_fields_deserialize() {
        let appointment: Appointment = serde_json::from_value(json!({
            "id_cita": 7,
            "cliente_nombre": null,
            "fecha_programada": "2025-03-01T10:30:00Z",
            "estado": "pendiente"
        }))
        .unwrap();
        assert_eq!(appointment.id_cita, Some(7));
        assert_eq!(appointment.cliente_nombre, None);
        assert_eq!(appointment.estado.as_deref(), Some("pendiente"));
    }
}
