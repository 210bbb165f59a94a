use crate::airtable::AirtableClient;
use crate::catalog::FieldCatalog;
use crate::pdfmonkey::PdfMonkeyClient;
use crate::recruitcrm::RecruitCrmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub recruit: RecruitCrmClient,
    pub airtable: AirtableClient,
    pub pdf: PdfMonkeyClient,
    pub catalog: FieldCatalog,
}
