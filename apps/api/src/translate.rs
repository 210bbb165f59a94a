//! Form Translator — converts between the applicant-tracking record shape
//! and the flat key/value shape the form page works with.
//!
//! Both directions run through one static dictionary of
//! form-key ↔ display-name pairs. The dictionary is the single source of
//! truth for what the frontend can see: any custom field not listed here is
//! dropped on read and never reconstructible on write. Display names are the
//! literal German labels configured in the tracking system.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::catalog::invert_field_map;
use crate::form::FormData;
use crate::models::{Candidate, CustomFieldEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Record → form only.
    #[allow(dead_code)]
    Read,
    /// Form → tracking-system payload only.
    Write,
    Both,
}

pub struct CustomFieldMapping {
    pub form_key: &'static str,
    pub display_name: &'static str,
    pub direction: Direction,
    /// Multi-valued form key: all submitted values are joined with `", "`.
    pub multi: bool,
}

const fn both(form_key: &'static str, display_name: &'static str) -> CustomFieldMapping {
    CustomFieldMapping {
        form_key,
        display_name,
        direction: Direction::Both,
        multi: false,
    }
}

const fn both_multi(form_key: &'static str, display_name: &'static str) -> CustomFieldMapping {
    CustomFieldMapping {
        form_key,
        display_name,
        direction: Direction::Both,
        multi: true,
    }
}

const fn write(form_key: &'static str, display_name: &'static str) -> CustomFieldMapping {
    CustomFieldMapping {
        form_key,
        display_name,
        direction: Direction::Write,
        multi: false,
    }
}

pub const CUSTOM_FIELD_DICTIONARY: &[CustomFieldMapping] = &[
    both("branche", "Branche"),
    both("kuendigungsfrist", "Kündigungsfrist"),
    both("anstellungsart", "Aktuelle Anstellungsart"),
    both("zusatzqualifikation", "Zusatzqualifikation"),
    both_multi("zusatzbezeichnungen[]", "Zusatzbezeichnungen"),
    both("wechselmotivation", "Wechselmotivation"),
    both("bonus_amount", "Bonushöhe"),
    both("bonus_type", "Bonustyp"),
    both("gehalt_erhoehen", "Soll das Gehalt erhöht werden?"),
    both("key_clients", "Offen für unsere Key-Clients?"),
    both("nicht_an", "Blacklist: Bitte nicht an diese Unternehmen"),
    both(
        "soll_auf_jeden_fall",
        "Whitelist: An wen soll der Kandidat auf jeden Fall geschickt werden?",
    ),
    both(
        "aufhebungsvertrag_wahrscheinlichkeit",
        "Wahrscheinlichkeit auf einen Aufhebungsvertrag",
    ),
    both("verfuegbar_ab", "Ab wann wäre der Kandidat verfügbar?"),
    both("arbeitgeber_standort", "Arbeitsort (Standort)"),
    both("additional_benefits", "Zusatzleistungen (aktuell)"),
    both("job_extras", "Extras (Interview-Notes)"),
    both("interview_schwerpunkte", "Interview-Notes Schwerpunkte"),
    write("unternehmen_wahl", "Gewünschter Unternehmenstyp"),
    both("aktiv_suche", "Ist der Kandidat aktiv auf der Suche?"),
    both("aktiv_bewerbung", "Ist der Kandidat aktiv in Bewerbungsprozessen?"),
    both(
        "weitere_personalvermittlungen",
        "Arbeitet der Kandidat mit weiteren Personalvermittlungen zusammen?",
    ),
    both("cv_submission_deadline", "CV wird zugeschickt bis zum"),
    both("arbeitgeber_art", "Art des Arbeitgebers"),
    write("arbeitgeber_name", "Aktueller Arbeitgeber"),
    both_multi("kategorie[]", "Wunsch Job Fachbereich"),
    both("verkehrsmittel", "Welches Verkehrsmittel wird genutzt?"),
    both("home_office_aktuell", "Home-Office (aktuell)"),
    both("home_office_gewuenscht", "Home-Office (gewünscht)"),
    both("flexible_arbeitszeiten", "Wunsch Flexible Arbeitszeiten?"),
    both("current_process", "Aktueller Prozess (IV-Notizen)"),
    both("erreichbare_stadtname", "Erreichbare Städte"),
    both("wohnort_plz", "Wohnort (PLZ)"),
    both("wohnort", "Wohnort (Stadt)"),
    write("aktuelle_position", "Aktuelle Position"),
    both("radius", "Pendelbarer Radius (in km)"),
    both("wuensche_an_den_job", "Wuensche am neuen Job"),
    both("berufliche_erfahrung", "Aktuelle Berufliche Lage des Kandidaten"),
    both_multi("umzugsbereit[]", "Umzugsbereit"),
    both("relevante_berufserfahrung", "Relevante Berufserfahrung"),
    both("berufliche_ziele", "Berufliche Ziele"),
    both("private_ziele", "Private Ziele"),
    both("sonstiges", "Sonstiges"),
    both("umgang_mit_rueckschlaegen", "Umgang mit Rückschlägen"),
    both("weiterentwicklung", "Weiterentwicklung"),
    both("finanzielle_motivation", "Finanzielle Motivation"),
    both("erfolgsmethodik_kpis", "Erfolgsmethodik & KPIs"),
    both("wechselkommitment", "Wechselkommitment (von 1-10)"),
    both("wunschklinik", "Wunschklinik"),
    write("auswertung", "Auswertung"),
    write("anonym_auswertung", "Anonyme Auswertung"),
];

impl CustomFieldMapping {
    fn readable(&self) -> bool {
        matches!(self.direction, Direction::Read | Direction::Both)
    }

    fn writable(&self) -> bool {
        matches!(self.direction, Direction::Write | Direction::Both)
    }
}

/// Builds the flat form representation of a candidate record. Missing
/// values become JSON null; custom fields not in the dictionary are
/// silently dropped.
pub fn to_form_shape(record: &Candidate) -> Map<String, Value> {
    let custom: HashMap<&str, &Value> = record
        .custom_fields
        .iter()
        .filter_map(|f| f.value.as_ref().map(|v| (f.field_name.as_str(), v)))
        .collect();

    let mut out = Map::new();
    let mut put = |key: &str, value: Value| {
        out.insert(key.to_string(), value);
    };

    let opt = |s: &Option<String>| s.clone().map(Value::String).unwrap_or(Value::Null);
    let raw = |v: &Option<Value>| v.clone().unwrap_or(Value::Null);

    put("vorname", opt(&record.first_name));
    put("nachname", opt(&record.last_name));
    put("avatar", opt(&record.avatar));
    put("email", opt(&record.email));
    put("telefon", raw(&record.contact_number));
    put("geschlecht", raw(&record.gender_id));
    put("arbeitgeber_name", opt(&record.current_organization));
    put("slug", opt(&record.slug));
    put(
        "consultant",
        record
            .owner
            .as_ref()
            .and_then(crate::models::value_to_string)
            .map(Value::String)
            .unwrap_or(Value::Null),
    );
    put(
        "cv_link",
        record
            .resume_link()
            .map(|s| Value::String(s.to_string()))
            .unwrap_or(Value::Null),
    );
    put("xing", opt(&record.xing));
    put("linkedin", opt(&record.linkedin));
    put("aktuelle_position", opt(&record.position));
    put("current_salary", raw(&record.current_salary));
    put("expected_salary", raw(&record.salary_expectation));

    for mapping in CUSTOM_FIELD_DICTIONARY.iter().filter(|m| m.readable()) {
        let value = custom
            .get(mapping.display_name)
            .map(|v| (*v).clone())
            .unwrap_or(Value::Null);
        out.insert(mapping.form_key.to_string(), value);
    }

    out
}

/// Builds the sparse `[{field_id, value}]` sequence for a tracking-system
/// update. Entries with no submitted value or no resolvable field id are
/// omitted entirely — omitted fields stay untouched server-side.
pub fn custom_field_payload(
    form: &FormData,
    name_to_id: &HashMap<String, i64>,
) -> Vec<CustomFieldEntry> {
    let mut out = Vec::new();
    for mapping in CUSTOM_FIELD_DICTIONARY.iter().filter(|m| m.writable()) {
        let value = if mapping.multi {
            form.join_multi(mapping.form_key)
        } else {
            form.get(mapping.form_key).map(str::to_string)
        };
        let Some(value) = value else { continue };
        if value.is_empty() {
            continue;
        }
        let Some(&field_id) = name_to_id.get(mapping.display_name) else {
            continue;
        };
        out.push(CustomFieldEntry { field_id, value });
    }
    out
}

/// Checks the write side of the dictionary against the live catalog and
/// returns the display names that resolve to no field id. Run once at
/// startup so drift shows up as a warning instead of a silent per-request
/// drop.
pub fn dictionary_drift(field_map: &HashMap<i64, String>) -> Vec<&'static str> {
    let name_to_id = invert_field_map(field_map);
    CUSTOM_FIELD_DICTIONARY
        .iter()
        .filter(|m| m.writable())
        .filter(|m| !name_to_id.contains_key(m.display_name))
        .map(|m| m.display_name)
        .collect()
}
