// src/source/google.rs
//
// Google Sheets API v4 source.
// 1. Sign a JWT with the service-account key, trade it for an access token.
// 2. `values.get` on the worksheet; first row is the header.
//
// Cells are requested UNFORMATTED so distances arrive as numbers regardless of
// the sheet's locale; dates stay as their displayed text (`dd.mm.yyyy`).

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use serde_json::Value;

use super::credentials::ServiceAccount;
use super::{Cell, RawTable, SheetSource, SourceError};
use crate::config::consts::{JWT_BEARER_GRANT, SHEETS_API_BASE};
use crate::core::net::{self, percent_encode};

pub struct GoogleSheetSource {
    account: ServiceAccount,
    sheet_id: String,
    worksheet: String,
    api_base: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Deserialize)]
struct TokenErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

impl GoogleSheetSource {
    pub fn new(account: ServiceAccount, sheet_id: &str, worksheet: &str) -> Self {
        Self {
            account,
            sheet_id: s!(sheet_id),
            worksheet: s!(worksheet),
            api_base: s!(SHEETS_API_BASE),
        }
    }

    /// Point the values request at another host (local stub server in tests).
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = s!(base.trim_end_matches('/'));
        self
    }

    fn access_token(&self) -> Result<String, SourceError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let assertion = self.account.signed_assertion(now)?;

        let resp = net::post_form(
            &self.account.token_uri,
            &[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)],
        )?;

        if !resp.is_success() {
            let detail = serde_json::from_str::<TokenErrorBody>(&resp.body)
                .map(|e| {
                    if e.error_description.is_empty() { e.error } else { e.error_description }
                })
                .unwrap_or_else(|_| s!(resp.body.trim()));
            return Err(SourceError::Auth(format!("token endpoint HTTP {}: {detail}", resp.status)));
        }

        let token: TokenResponse = serde_json::from_str(&resp.body)
            .map_err(|e| SourceError::Malformed(format!("token response: {e}")))?;
        Ok(token.access_token)
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}?valueRenderOption=UNFORMATTED_VALUE&dateTimeRenderOption=FORMATTED_STRING",
            self.api_base,
            percent_encode(&self.sheet_id),
            percent_encode(&a1_sheet_range(&self.worksheet)),
        )
    }

    /// Map a non-2xx `values.get` answer onto the fatal error taxonomy.
    fn classify_error(&self, status: u16, body: &str) -> SourceError {
        let (message, api_status) = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| (b.error.message, b.error.status))
            .unwrap_or_else(|_| (s!(body.trim()), s!()));

        match status {
            400 if message.contains("Unable to parse range") => SourceError::WorksheetNotFound {
                worksheet: self.worksheet.clone(),
            },
            404 => SourceError::SheetNotFound { sheet_id: self.sheet_id.clone() },
            401 | 403 => SourceError::Auth(format!("{api_status} {message}").trim().to_string()),
            _ => SourceError::Api { status, message },
        }
    }
}

/// Whole-sheet A1 range for a tab name. Quoted so names with spaces or
/// cell-like names (`KW1`) are not read as a range.
pub fn a1_sheet_range(worksheet: &str) -> String {
    join!("'", &worksheet.replace('\'', "''"), "'")
}

impl SheetSource for GoogleSheetSource {
    fn fetch(&self) -> Result<RawTable, SourceError> {
        let token = self.access_token()?;
        let bearer = join!("Bearer ", &token);
        let resp = net::get(&self.values_url(), &[("Authorization", &bearer), ("Accept", "application/json")])?;

        if !resp.is_success() {
            let err = self.classify_error(resp.status, &resp.body);
            loge!("Fetch: {} → {}", self.describe(), err);
            return Err(err);
        }

        let range: ValueRange = serde_json::from_str(&resp.body)
            .map_err(|e| SourceError::Malformed(format!("values response: {e}")))?;
        let grid = range
            .values
            .iter()
            .map(|row| row.iter().map(Cell::from_json).collect())
            .collect();

        let table = RawTable::from_grid(grid);
        logf!("Fetch: {} → rows={}, headers={}", self.describe(), table.row_count(), table.headers.len());
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("sheet {} / {}", self.sheet_id, self.worksheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_range_is_quoted() {
        assert_eq!(a1_sheet_range("Laufdaten"), "'Laufdaten'");
        assert_eq!(a1_sheet_range("KW1"), "'KW1'");
        assert_eq!(a1_sheet_range("Anna's Läufe"), "'Anna''s Läufe'");
    }
}
