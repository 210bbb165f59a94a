//! Sales-branch payload builders.

use serde_json::{json, Map, Value};

use super::{arbeitsort, text, text_or};
use crate::form::FormData;

/// Flat record for the sales spreadsheet table.
pub fn spreadsheet_fields(form: &FormData) -> Map<String, Value> {
    let mut fields = Map::new();
    let mut put = |key: &str, value: Value| {
        fields.insert(key.to_string(), value);
    };

    put("foto_url", text(form, "avatar"));
    put("vorname", text(form, "vorname"));
    put("nachname", text(form, "nachname"));
    put("email", text(form, "email"));
    put("telefon", text(form, "phone"));
    put("aktuelle_position", text(form, "aktuelle_position"));
    put("aktuelle_organisation", text(form, "arbeitgeber_name"));
    put("aktuelles_gehalt", text(form, "current_salary"));
    put("wunschgehalt", text(form, "expected_salary"));
    put("verfuegbar_ab", text(form, "verfuegbar_ab"));
    put("kuendigungsfrist", text(form, "kuendigungsfrist"));
    put("umzugsbereitschaft", text(form, "umzugsbereit[]"));
    put("wechselkommitment", text(form, "wechselkommitment"));
    put("fachbereich_aktuell", text(form, "branche"));
    put(
        "arbeitsort",
        arbeitsort(form).map(Value::String).unwrap_or(Value::Null),
    );
    put("wuensche_an_den_neuen_job", text(form, "wuensche_an_den_job"));
    put("berufliche_erfahrung", text(form, "relevante_berufserfahrung"));
    put("sonstiges", text(form, "sonstiges"));

    fields
}

/// Render payload for both sales templates (transparent and anonymized
/// share the payload shape; the template decides what to show).
pub fn document_payload(form: &FormData) -> Value {
    json!({
        "kandidat": {
            "vorname": text_or(form, "vorname", ""),
            "nachname": text_or(form, "nachname", ""),
            "email": text_or(form, "email", ""),
            "telefon": text_or(form, "phone", ""),
            "wohnort": text_or(form, "wohnort", ""),
            "aktuelle_organisation": text_or(form, "arbeitgeber_name", ""),
            "aktuelle_position": text_or(form, "aktuelle_position", ""),
            "branche": text_or(form, "branche", "Nicht angegeben"),
            "kuendigungsfrist": text_or(form, "kuendigungsfrist", "Nicht angegeben"),
            "verfuegbar_ab": text_or(form, "verfuegbar_ab", "Nicht angegeben"),
            "homeoffice_aktuell": text_or(form, "home_office_aktuell", "Nicht angegeben"),
            "homeoffice_wunsch": text_or(form, "home_office_gewuenscht", "Nicht angegeben"),
            "arbeitsort": arbeitsort(form).unwrap_or_default(),
            "aktuelles_gehalt": text_or(form, "current_salary_display", "Nicht angegeben"),
            "wunschgehalt": text_or(form, "expected_salary_display", "Nicht angegeben"),
            "wechselmotiv": text_or(form, "wechselmotivation", "Nicht angegeben"),
            "foto_url": text_or(form, "avatar", ""),
            "umzugsbereitschaft": text_or(form, "umzugsbereit[]", "Nein"),
            "wechselkommitment": text_or(form, "wechselkommitment", "Nein"),
            "berufserfahrung": text_or(form, "relevante_berufserfahrung", "0"),
            "erfolgsmethodik": text_or(form, "erfolgsmethodik_kpis", "Nicht angegeben"),
            "umgang_rueckschlaege": text_or(form, "umgang_mit_rueckschlaegen", "Nicht angegeben"),
            "weiterentwicklung": text_or(form, "weiterentwicklung", "Nicht angegeben"),
            "finanzielle_motivation": text_or(form, "finanzielle_motivation", "Nicht angegeben"),
            "sonstiges": text_or(form, "sonstiges", "Keine Bemerkungen"),
            "berufliche_ziele": text_or(form, "berufliche_ziele", "Nicht angegeben"),
            "private_ziele": text_or(form, "private_ziele", "Nicht angegeben"),
            "vertriebs_erfahrung": text_or(form, "relevante_berufserfahrung", "Keine Angaben"),
        }
    })
}
