pub mod auth;
pub mod error;
pub mod types;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use error::{Result, SheetsError};
pub use types::{
    AddSheet, AppendedSpan, BatchRequest, CellData, CellFormat, Color, DimensionProperties,
    DimensionRange, GridRange, NewSheetProperties, RepeatCell, SheetProperties, TextFormat,
    UpdateDimensionProperties,
};

use std::time::Duration;

use types::{
    AppendResponse, BatchUpdateBody, BatchUpdateResponse, Spreadsheet, ValueRange,
};

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// OAuth scope granting read/write access to spreadsheets.
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

pub struct SheetsClient {
    client: reqwest::Client,
    auth: TokenProvider,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            auth: TokenProvider::new(key, SHEETS_SCOPE),
            spreadsheet_id,
        }
    }

    /// List the spreadsheet's tabs (id + title only).
    pub async fn get_metadata(&self) -> Result<Vec<SheetProperties>> {
        let token = self.auth.token(&self.client).await?;
        let url = format!(
            "{}/{}?fields=sheets.properties",
            BASE_URL, self.spreadsheet_id
        );
        let resp = self.client.get(&url).bearer_auth(&token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let spreadsheet: Spreadsheet = resp.json().await?;
        Ok(spreadsheet.sheets.into_iter().map(|s| s.properties).collect())
    }

    /// Add a new tab titled `title`. Returns the assigned properties.
    pub async fn add_sheet(&self, title: &str) -> Result<SheetProperties> {
        tracing::info!(title, "Adding sheet tab");

        let body = BatchUpdateBody {
            requests: vec![BatchRequest::AddSheet(AddSheet {
                properties: NewSheetProperties {
                    title: title.to_string(),
                },
            })],
        };
        let resp: BatchUpdateResponse = self.batch_update(&body).await?;

        resp.replies
            .into_iter()
            .find_map(|r| r.add_sheet)
            .map(|r| r.properties)
            .ok_or_else(|| {
                SheetsError::Parse("addSheet reply missing from batchUpdate response".to_string())
            })
    }

    /// Overwrite `range` (A1 notation) with `values`, USER_ENTERED semantics.
    pub async fn update_values(&self, range: &str, values: Vec<Vec<String>>) -> Result<()> {
        let token = self.auth.token(&self.client).await?;
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            BASE_URL, self.spreadsheet_id, range
        );
        let resp = self
            .client
            .put(&url)
            .bearer_auth(&token)
            .json(&ValueRange { values })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }

    /// Append `values` beneath the existing content of `range` (A1 notation),
    /// inserting rows rather than overwriting. Returns the landed row span.
    pub async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<AppendedSpan> {
        let token = self.auth.token(&self.client).await?;
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            BASE_URL, self.spreadsheet_id, range
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&ValueRange { values })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let append: AppendResponse = resp.json().await?;
        let updated_range = append
            .updates
            .and_then(|u| u.updated_range)
            .ok_or_else(|| {
                SheetsError::Parse("append response missing updatedRange".to_string())
            })?;
        AppendedSpan::from_a1(&updated_range).ok_or_else(|| {
            SheetsError::Parse(format!("unparseable updatedRange: {updated_range}"))
        })
    }

    /// Apply a batch of formatting requests (cell styling, column widths).
    pub async fn batch_format(&self, requests: Vec<BatchRequest>) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }
        self.batch_update::<BatchUpdateResponse>(&BatchUpdateBody { requests })
            .await?;
        Ok(())
    }

    async fn batch_update<T: serde::de::DeserializeOwned>(
        &self,
        body: &BatchUpdateBody,
    ) -> Result<T> {
        let token = self.auth.token(&self.client).await?;
        let url = format!("{}/{}:batchUpdate", BASE_URL, self.spreadsheet_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}
