//! HTML rendering of the dashboard view state
//!
//! Rendering is a pure function of a [`ViewState`]: nothing here performs I/O
//! or keeps state between calls. Cell text is escaped by the templates.

use std::fmt::Write;

use askama::Template;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::config::{DisplayZone, RenderOptions};
use crate::error::Result;
use crate::navigation::{NavLink, Navigation};
use crate::section::Section;
use crate::view::{Phase, ViewState};

pub const LOADING_TEXT: &str = "Cargando...";
pub const EMPTY_TEXT: &str = "No hay datos disponibles";
pub const AGENDA_PLACEHOLDER: &str = "Contenido de Agenda no implementado.";
pub const YES: &str = "Sí";
pub const NO: &str = "No";

/// How a field is turned into cell text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    /// Truthy values render as "Sí", everything else as "No"
    Flag,
    /// Suffixed with " min"
    Minutes,
    /// Prefixed with "$"
    Currency,
    /// ISO-8601 timestamp, reformatted for display
    Timestamp,
}

/// One table column: header text and the record field it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
    pub kind: CellKind,
}

const fn column(header: &'static str, field: &'static str, kind: CellKind) -> Column {
    Column {
        header,
        field,
        kind,
    }
}

const CLIENT_COLUMNS: [Column; 5] = [
    column("RUT", "rut", CellKind::Text),
    column("Nombre", "nombre", CellKind::Text),
    column("Apellido", "apellido", CellKind::Text),
    column("Correo", "correo", CellKind::Text),
    column("Celular", "celular", CellKind::Text),
];

const BARBER_COLUMNS: [Column; 4] = [
    column("ID", "id_barbero", CellKind::Text),
    column("Nombre", "nombre", CellKind::Text),
    column("Usuario", "usuario", CellKind::Text),
    column("Activo", "activo", CellKind::Flag),
];

const SERVICE_COLUMNS: [Column; 4] = [
    column("ID", "id_servicio", CellKind::Text),
    column("Nombre", "nombre", CellKind::Text),
    column("Duración", "duracion_min", CellKind::Minutes),
    column("Precio", "precio", CellKind::Currency),
];

const APPOINTMENT_COLUMNS: [Column; 6] = [
    column("ID", "id_cita", CellKind::Text),
    column("Cliente", "cliente_nombre", CellKind::Text),
    column("Barbero", "barbero_nombre", CellKind::Text),
    column("Servicio", "servicio_nombre", CellKind::Text),
    column("Fecha", "fecha_programada", CellKind::Timestamp),
    column("Estado", "estado", CellKind::Text),
];

#[derive(Template)]
#[template(path = "table.html")]
struct TableTemplate {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

#[derive(Template)]
#[template(path = "error_panel.html")]
struct ErrorPanelTemplate<'a> {
    title: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "notice.html")]
struct NoticeTemplate<'a> {
    text: &'a str,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    links: Vec<NavLink>,
    content: String,
}

/// Table layout of a section, `None` for sections without data
pub fn columns(section: Section) -> Option<&'static [Column]> {
    match section {
        Section::Clients => Some(&CLIENT_COLUMNS),
        Section::Barbers => Some(&BARBER_COLUMNS),
        Section::Services => Some(&SERVICE_COLUMNS),
        Section::Appointments => Some(&APPOINTMENT_COLUMNS),
        Section::Agenda => None,
    }
}

/// Markup for the list container
pub fn render_content(state: &ViewState, options: &RenderOptions) -> Result<String> {
    match &state.phase {
        Phase::Loading => notice(LOADING_TEXT),
        Phase::Failed(message) => Ok(ErrorPanelTemplate {
            title: state.section.label(),
            message: message.as_str(),
        }
        .render()?),
        Phase::Idle => render_records(state.section, &[], options),
        Phase::Loaded(records) => render_records(state.section, records, options),
    }
}

/// Full page: header, navigation with the active link marked, title and content
pub fn render_page(state: &ViewState, options: &RenderOptions) -> Result<String> {
    let content = render_content(state, options)?;
    Ok(PageTemplate {
        title: state.section.label(),
        links: Navigation::links(state.section),
        content,
    }
    .render()?)
}

/// Table for a section's records, or the section's fixed notice
pub fn render_records(section: Section, records: &[Value], options: &RenderOptions) -> Result<String> {
    let Some(columns) = columns(section) else {
        return notice(AGENDA_PLACEHOLDER);
    };
    if records.is_empty() {
        return notice(EMPTY_TEXT);
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| format_cell(record, column, options))
                .collect()
        })
        .collect();

    Ok(TableTemplate {
        headers: columns.iter().map(|c| c.header).collect(),
        rows,
    }
    .render()?)
}

/// Cell text for one field of a record. Absent and null fields give `""`.
pub fn format_cell(record: &Value, column: &Column, options: &RenderOptions) -> String {
    let value = record.get(column.field).filter(|v| !v.is_null());

    match (column.kind, value) {
        (CellKind::Flag, value) => {
            if value.map_or(false, is_truthy) {
                YES.to_string()
            } else {
                NO.to_string()
            }
        }
        (_, None) => String::new(),
        (CellKind::Text, Some(value)) => plain_text(value),
        (CellKind::Minutes, Some(value)) => format!("{} min", plain_text(value)),
        (CellKind::Currency, Some(value)) => format!("${}", plain_text(value)),
        (CellKind::Timestamp, Some(Value::String(raw))) => format_timestamp(raw, options),
        (CellKind::Timestamp, Some(value)) => plain_text(value),
    }
}

/// Reformat an ISO-8601 timestamp. Values carrying an offset are converted to
/// the display zone; naive values are shown as wall-clock time. Anything that
/// does not parse is returned unchanged.
pub fn format_timestamp(raw: &str, options: &RenderOptions) -> String {
    let format = options.timestamp_format.as_str();
    let mut out = String::new();

    let written = if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        match options.display_zone {
            DisplayZone::Local => write!(out, "{}", parsed.with_timezone(&Local).format(format)),
            DisplayZone::Utc => write!(out, "{}", parsed.with_timezone(&Utc).format(format)),
        }
    } else if let Some(naive) = parse_naive(raw) {
        write!(out, "{}", naive.format(format))
    } else {
        return raw.to_string();
    };

    // An invalid format string fails here instead of panicking
    match written {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn notice(text: &str) -> Result<String> {
    Ok(NoticeTemplate { text }.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc() -> RenderOptions {
        RenderOptions {
            display_zone: DisplayZone::Utc,
            ..RenderOptions::default()
        }
    }

    fn cell(record: Value, section: Section, field: &str) -> String {
        let column = columns(section)
            .unwrap()
            .iter()
            .find(|c| c.field == field)
            .unwrap();
        format_cell(&record, column, &utc())
    }

    #[test]
    fn test_missing_and_null_fields_render_empty() {
        let record = json!({ "rut": "1-9", "correo": null });
        assert_eq!(cell(record.clone(), Section::Clients, "correo"), "");
        assert_eq!(cell(record.clone(), Section::Clients, "celular"), "");
        assert_eq!(cell(record, Section::Clients, "rut"), "1-9");
    }

    #[test]
    fn test_zero_is_not_treated_as_missing() {
        assert_eq!(cell(json!({ "id_servicio": 0 }), Section::Services, "id_servicio"), "0");
    }

    #[test]
    fn test_flag_cells() {
        assert_eq!(cell(json!({ "activo": true }), Section::Barbers, "activo"), "Sí");
        assert_eq!(cell(json!({ "activo": false }), Section::Barbers, "activo"), "No");
        assert_eq!(cell(json!({}), Section::Barbers, "activo"), "No");
        assert_eq!(cell(json!({ "activo": 1 }), Section::Barbers, "activo"), "Sí");
        assert_eq!(cell(json!({ "activo": "" }), Section::Barbers, "activo"), "No");
    }

    #[test]
    fn test_service_units() {
        let record = json!({ "duracion_min": 30, "precio": 15000 });
        assert_eq!(cell(record.clone(), Section::Services, "duracion_min"), "30 min");
        assert_eq!(cell(record, Section::Services, "precio"), "$15000");
        assert_eq!(cell(json!({}), Section::Services, "precio"), "");
    }

    #[test]
    fn test_timestamp_formatting() {
        let options = utc();
        assert_eq!(format_timestamp("2025-03-01T10:30:00Z", &options), "01-03-2025, 10:30:00");
        assert_eq!(format_timestamp("2025-03-01T10:30:00-03:00", &options), "01-03-2025, 13:30:00");
        assert_eq!(format_timestamp("2025-03-01T10:30:00.250", &options), "01-03-2025, 10:30:00");
        assert_eq!(format_timestamp("2025-03-01", &options), "01-03-2025, 00:00:00");
        assert_eq!(format_timestamp("mañana", &options), "mañana");
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back_to_raw() {
        let options = RenderOptions {
            display_zone: DisplayZone::Utc,
            timestamp_format: "%Q".to_string(),
        };
        assert_eq!(format_timestamp("2025-03-01T10:30:00Z", &options), "2025-03-01T10:30:00Z");
    }

    #[test]
    fn test_agenda_renders_placeholder() {
        let html = render_records(Section::Agenda, &[json!({ "x": 1 })], &utc()).unwrap();
        assert!(html.contains(AGENDA_PLACEHOLDER));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_empty_list_renders_notice() {
        let html = render_records(Section::Appointments, &[], &utc()).unwrap();
        assert!(html.contains(EMPTY_TEXT));
    }

    #[test]
    fn test_cells_are_escaped() {
        let records = [json!({ "nombre": "<b>Ana</b>", "rut": "1-9" })];
        let html = render_records(Section::Clients, &records, &utc()).unwrap();
        assert!(!html.contains("<b>Ana</b>"));
        assert!(html.contains("&lt;b&gt;Ana&lt;"));
    }

    #[test]
    fn test_scalar_record_renders_empty_cells() {
        let records = [json!("suelto")];
        let html = render_records(Section::Barbers, &records, &utc()).unwrap();
        assert!(html.contains("<td></td><td></td><td></td><td>No</td>"));
    }

    #[test]
    fn test_render_content_phases() {
        let options = utc();
        let loading = ViewState {
            section: Section::Clients,
            phase: Phase::Loading,
        };
        assert!(render_content(&loading, &options).unwrap().contains(LOADING_TEXT));

        let failed = ViewState {
            section: Section::Appointments,
            phase: Phase::Failed("Error de Red: 500. Respuesta: DB down".to_string()),
        };
        let html = render_content(&failed, &options).unwrap();
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("Error al cargar Citas"));
        assert!(html.contains("500"));
        assert!(html.contains("DB down"));
    }

    #[test]
    fn test_page_marks_active_link() {
        let state = ViewState {
            section: Section::Services,
            phase: Phase::Loaded(vec![json!({ "id_servicio": 3, "nombre": "Corte" })]),
        };
        let html = render_page(&state, &utc()).unwrap();
        assert_eq!(html.matches("class=\"active\"").count(), 1);
        assert!(html.contains("id=\"nav-servicios\" data-section=\"servicios\" class=\"active\""));
        assert!(html.contains("<h2>Servicios</h2>"));
        assert!(html.contains("<td>3</td><td>Corte</td>"));
    }
}
