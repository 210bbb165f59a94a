//! Medical-branch payload builders.

use serde_json::{json, Map, Value};

use super::{arbeitsort, text, text_or};
use crate::form::FormData;

/// Flat record for the medical spreadsheet table.
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
    put("wechselkommitment", text(form, "wechselkommitment"));
    put("fachbereich_aktuell", text(form, "fachbereich_aktuell"));
    put("fachbereich_wunsch", text(form, "fachbereich_wunsch"));
    put("wohnort", text(form, "wohnort"));
    put(
        "arbeitsort",
        arbeitsort(form).map(Value::String).unwrap_or(Value::Null),
    );
    put("berufliche_ziele", text(form, "berufliche_ziele"));
    put("private_ziele", text(form, "private_ziele"));
    put("sonstiges", text(form, "sonstiges"));
    put("berufliche_erfahrung", text(form, "berufliche_erfahrung"));

    fields
}

/// Render payload for both medical templates.
pub fn document_payload(form: &FormData) -> Value {
    let wunscharbeitsort = match form.get("wunscharbeitsort").filter(|v| !v.is_empty()) {
        Some(v) => Value::String(v.to_string()),
        None => text_or(form, "locality", "Nicht angegeben"),
    };

    json!({
        "kandidat": {
            "foto_url": text_or(form, "avatar", ""),
            "vorname": text_or(form, "vorname", ""),
            "nachname": text_or(form, "nachname", ""),
            "email": text_or(form, "email", ""),
            "telefon": text_or(form, "phone", ""),
            "aktuelle_position": text_or(form, "aktuelle_position", ""),
            "aktuelle_organisation": text_or(form, "arbeitgeber_name", ""),
            "aktuelles_gehalt": text_or(form, "current_salary_display", "Nicht angegeben"),
            "wunschgehalt": text_or(form, "expected_salary_display", "Nicht angegeben"),
            "verfuegbar_ab": text_or(form, "verfuegbar_ab", ""),
            "kuendigungsfrist": text_or(form, "kuendigungsfrist", "Nicht angegeben"),
            "umzugsbereitschaft": text_or(form, "umzugsbereit[]", "Nein"),
            "wechselkommitment": text_or(form, "wechselkommitment", "0"),
            "fachbereich_aktuell": text_or(form, "branche", "Nicht angegeben"),
            "fachbereich_wunsch": text_or(form, "kategorie[]", "Nicht angegeben"),
            "wohnort": text_or(form, "wohnort", ""),
            "berufserfahrung_in_jahren": text_or(form, "berufserfahrung", "0"),
            "arbeitsort": arbeitsort(form).unwrap_or_default(),
            "wunschklinik": text_or(form, "wunschklinik", "Nicht angegeben"),
            "wunscharbeitsort": wunscharbeitsort,
            "wuensche_an_den_neuen_job": text_or(form, "wuensche_an_den_job", "Nicht angegeben"),
            "berufliche_erfahrung": text_or(form, "berufliche_erfahrung", "Nicht angegeben"),
            "sonstiges": text_or(form, "sonstiges", "Keine Bemerkungen"),
        }
    })
}
