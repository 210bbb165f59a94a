use anyhow::{Context, Result};

/// Base URL of the applicant-tracking API (RecruitCRM).
pub const RECRUITCRM_BASE_URL: &str = "https://api.recruitcrm.io/v1";
/// Base URL of the document-generation API (PDFMonkey).
pub const PDFMONKEY_BASE_URL: &str = "https://api.pdfmonkey.io/api/v1";
/// Base URL of the spreadsheet API (Airtable).
pub const AIRTABLE_BASE_URL: &str = "https://api.airtable.com/v0";

/// Airtable base and per-branch table ids.
pub const AIRTABLE_BASE_ID: &str = "appE2c4HLRRkHAr3y";
pub const SALES_TABLE_ID: &str = "tbl3FmKzmSWmxJhS0";
pub const MED_TABLE_ID: &str = "tbltjg6SO2Px8PzMy";

/// PDFMonkey template ids, one per branch and report variant.
pub const SALES_TRANSPARENT_TEMPLATE_ID: &str = "27D99758-E3D4-4661-998C-6DB52835467D";
pub const SALES_ANONYMOUS_TEMPLATE_ID: &str = "E781DCB1-E3D2-41C8-AD05-F176481447AA";
pub const MED_TRANSPARENT_TEMPLATE_ID: &str = "EB0C33E8-3458-4A19-BCE4-C609DDAA71F3";
pub const MED_ANONYMOUS_TEMPLATE_ID: &str = "4AD5DBFA-4803-49FF-B7ED-44720FEEB14F";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub recruitcrm_api_key: String,
    pub pdfmonkey_api_key: String,
    pub airtable_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            recruitcrm_api_key: require_env("RECRUITCRM_API_KEY")?,
            pdfmonkey_api_key: require_env("PDFMONKEY_API_KEY")?,
            airtable_api_key: require_env("AIRTABLE_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
