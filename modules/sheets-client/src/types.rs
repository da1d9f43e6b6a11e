use serde::{Deserialize, Serialize};

// --- Spreadsheet metadata ---

/// Response to a metadata GET with `fields=sheets.properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

/// One tab of a spreadsheet, as the API reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetProperties {
    #[serde(rename = "sheetId")]
    pub sheet_id: i64,
    pub title: String,
}

// --- batchUpdate requests ---
//
// The batchUpdate body is a list of single-key request objects; an
// externally-tagged enum serializes to exactly that shape.

#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<BatchRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub enum BatchRequest {
    #[serde(rename = "addSheet")]
    AddSheet(AddSheet),
    #[serde(rename = "repeatCell")]
    RepeatCell(RepeatCell),
    #[serde(rename = "updateDimensionProperties")]
    UpdateDimensionProperties(UpdateDimensionProperties),
}

#[derive(Debug, Clone, Serialize)]
pub struct AddSheet {
    pub properties: NewSheetProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSheetProperties {
    pub title: String,
}

/// Applies one cell format over a grid range.
#[derive(Debug, Clone, Serialize)]
pub struct RepeatCell {
    pub range: GridRange,
    pub cell: CellData,
    pub fields: String,
}

/// Half-open row/column span within one tab. Indices are 0-based.
#[derive(Debug, Clone, Serialize)]
pub struct GridRange {
    #[serde(rename = "sheetId")]
    pub sheet_id: i64,
    #[serde(rename = "startRowIndex")]
    pub start_row_index: u32,
    #[serde(rename = "endRowIndex")]
    pub end_row_index: u32,
    #[serde(rename = "startColumnIndex")]
    pub start_column_index: u32,
    #[serde(rename = "endColumnIndex")]
    pub end_column_index: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellData {
    #[serde(rename = "userEnteredFormat")]
    pub user_entered_format: CellFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellFormat {
    #[serde(rename = "backgroundColor")]
    pub background_color: Color,
    #[serde(rename = "textFormat")]
    pub text_format: TextFormat,
    #[serde(rename = "horizontalAlignment")]
    pub horizontal_alignment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextFormat {
    #[serde(rename = "foregroundColor")]
    pub foreground_color: Color,
    #[serde(rename = "fontSize")]
    pub font_size: u32,
    pub bold: bool,
}

/// RGB channels in [0, 1], the API's own representation.
#[derive(Debug, Clone, Serialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateDimensionProperties {
    pub range: DimensionRange,
    pub properties: DimensionProperties,
    pub fields: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionRange {
    #[serde(rename = "sheetId")]
    pub sheet_id: i64,
    pub dimension: String,
    #[serde(rename = "startIndex")]
    pub start_index: u32,
    #[serde(rename = "endIndex")]
    pub end_index: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionProperties {
    #[serde(rename = "pixelSize")]
    pub pixel_size: u32,
}

// --- batchUpdate responses ---

#[derive(Debug, Clone, Deserialize)]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<BatchReply>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchReply {
    #[serde(rename = "addSheet")]
    pub add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSheetReply {
    pub properties: SheetProperties,
}

// --- Values ---

#[derive(Debug, Clone, Serialize)]
pub struct ValueRange {
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppendResponse {
    pub updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateValuesResponse {
    #[serde(rename = "updatedRange")]
    pub updated_range: Option<String>,
}

/// The 0-based half-open row span an append landed on, recovered from the
/// A1 `updatedRange` the API reports (e.g. `"Hackathon!A5:C7"` → rows 4..7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendedSpan {
    pub start_row_index: u32,
    pub end_row_index: u32,
}

impl AppendedSpan {
    pub fn from_a1(updated_range: &str) -> Option<Self> {
        let cells = updated_range.rsplit('!').next()?;
        let mut bounds = cells.split(':');
        let start = trailing_number(bounds.next()?)?;
        let end = match bounds.next() {
            Some(cell) => trailing_number(cell)?,
            None => start,
        };
        if start == 0 || end < start {
            return None;
        }
        Some(Self {
            start_row_index: start - 1,
            end_row_index: end,
        })
    }
}

/// The 1-based row number at the end of an A1 cell reference, e.g. `"C7"` → 7.
fn trailing_number(cell: &str) -> Option<u32> {
    let digits: String = cell.chars().skip_while(|c| !c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_span_from_multi_row_range() {
        let span = AppendedSpan::from_a1("Hackathon!A5:C7").unwrap();
        assert_eq!(span.start_row_index, 4);
        assert_eq!(span.end_row_index, 7);
    }

    #[test]
    fn appended_span_from_single_cell_range() {
        let span = AppendedSpan::from_a1("Tab!B3").unwrap();
        assert_eq!(span.start_row_index, 2);
        assert_eq!(span.end_row_index, 3);
    }

    #[test]
    fn appended_span_handles_quoted_titles_with_bang() {
        // Tab titles may themselves contain '!'; only the last segment is cells.
        let span = AppendedSpan::from_a1("'Go! Team'!A2:C4").unwrap();
        assert_eq!(span.start_row_index, 1);
        assert_eq!(span.end_row_index, 4);
    }

    #[test]
    fn appended_span_rejects_rangeless_input() {
        assert!(AppendedSpan::from_a1("garbage").is_none());
    }

    #[test]
    fn batch_request_serializes_externally_tagged() {
        let req = BatchRequest::AddSheet(AddSheet {
            properties: NewSheetProperties {
                title: "Hackathon".to_string(),
            },
        });
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["addSheet"]["properties"]["title"], "Hackathon");
    }
}
