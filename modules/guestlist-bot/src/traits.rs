// Trait abstraction for the Event Projector's one dependency.
//
// SheetStore replaces SheetsClient — every spreadsheet write behind one
// trait. Enables deterministic testing with MockSheetStore: no network,
// no credentials. `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use guestlist_common::{AppendedRange, Tab};
use sheets_client::{
    AppendedSpan, BatchRequest, CellData, CellFormat, Color, DimensionProperties, DimensionRange,
    GridRange, RepeatCell, SheetsClient, TextFormat, UpdateDimensionProperties,
};

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All tabs currently in the spreadsheet.
    async fn tabs(&self) -> Result<Vec<Tab>>;

    /// Create a tab titled `title`. Returns it with its assigned id.
    async fn create_tab(&self, title: &str) -> Result<Tab>;

    /// Write the header row into row 1 of the named tab.
    async fn write_header(&self, title: &str, header: &[&str]) -> Result<()>;

    /// Append rows beneath any existing content of the named tab.
    /// Returns the row span the block landed on.
    async fn append_rows(&self, title: &str, rows: Vec<Vec<String>>) -> Result<AppendedRange>;

    /// Apply the event-tab styling: header row, the freshly appended block,
    /// and the fixed column widths.
    async fn style_event_tab(&self, sheet_id: i64, block: AppendedRange) -> Result<()>;
}

// ---------------------------------------------------------------------------
// SheetStore for the real client
//
// Absorbs the repeatCell / updateDimensionProperties request construction so
// the projector never sees wire types.
// ---------------------------------------------------------------------------

/// Columns A..C carry name, date, participant.
const COLUMN_COUNT: u32 = 3;

/// Fixed pixel widths for the name, date, and participant columns.
const COLUMN_WIDTHS_PX: [u32; COLUMN_COUNT as usize] = [150, 120, 200];

const FORMAT_FIELDS: &str = "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment)";

const LIGHT_GRAY: Color = Color {
    red: 0.827,
    green: 0.827,
    blue: 0.827,
};

const PURPLE: Color = Color {
    red: 0.627,
    green: 0.125,
    blue: 0.941,
};

const BLACK: Color = Color {
    red: 0.0,
    green: 0.0,
    blue: 0.0,
};

const WHITE: Color = Color {
    red: 1.0,
    green: 1.0,
    blue: 1.0,
};

fn header_cell() -> CellData {
    CellData {
        user_entered_format: CellFormat {
            background_color: LIGHT_GRAY,
            text_format: TextFormat {
                foreground_color: PURPLE,
                font_size: 12,
                bold: true,
            },
            horizontal_alignment: "CENTER".to_string(),
        },
    }
}

fn block_cell() -> CellData {
    CellData {
        user_entered_format: CellFormat {
            background_color: BLACK,
            text_format: TextFormat {
                foreground_color: WHITE,
                font_size: 12,
                bold: false,
            },
            horizontal_alignment: "CENTER".to_string(),
        },
    }
}

fn row_span(sheet_id: i64, start_row: u32, end_row: u32) -> GridRange {
    GridRange {
        sheet_id,
        start_row_index: start_row,
        end_row_index: end_row,
        start_column_index: 0,
        end_column_index: COLUMN_COUNT,
    }
}

#[async_trait]
impl SheetStore for SheetsClient {
    async fn tabs(&self) -> Result<Vec<Tab>> {
        let properties = self.get_metadata().await?;
        Ok(properties
            .into_iter()
            .map(|p| Tab {
                sheet_id: p.sheet_id,
                title: p.title,
            })
            .collect())
    }

    async fn create_tab(&self, title: &str) -> Result<Tab> {
        let properties = self.add_sheet(title).await?;
        Ok(Tab {
            sheet_id: properties.sheet_id,
            title: properties.title,
        })
    }

    async fn write_header(&self, title: &str, header: &[&str]) -> Result<()> {
        let row = header.iter().map(|cell| cell.to_string()).collect();
        Ok(self.update_values(&format!("{title}!A1:C1"), vec![row]).await?)
    }

    async fn append_rows(&self, title: &str, rows: Vec<Vec<String>>) -> Result<AppendedRange> {
        let AppendedSpan {
            start_row_index,
            end_row_index,
        } = self.append_values(&format!("{title}!A1:C"), rows).await?;
        Ok(AppendedRange {
            start_row: start_row_index,
            end_row: end_row_index,
        })
    }

    async fn style_event_tab(&self, sheet_id: i64, block: AppendedRange) -> Result<()> {
        let mut requests = vec![
            BatchRequest::RepeatCell(RepeatCell {
                range: row_span(sheet_id, 0, 1),
                cell: header_cell(),
                fields: FORMAT_FIELDS.to_string(),
            }),
            BatchRequest::RepeatCell(RepeatCell {
                range: row_span(sheet_id, block.start_row, block.end_row),
                cell: block_cell(),
                fields: FORMAT_FIELDS.to_string(),
            }),
        ];

        for (column, pixel_size) in COLUMN_WIDTHS_PX.iter().enumerate() {
            requests.push(BatchRequest::UpdateDimensionProperties(
                UpdateDimensionProperties {
                    range: DimensionRange {
                        sheet_id,
                        dimension: "COLUMNS".to_string(),
                        start_index: column as u32,
                        end_index: column as u32 + 1,
                    },
                    properties: DimensionProperties {
                        pixel_size: *pixel_size,
                    },
                    fields: "pixelSize".to_string(),
                },
            ));
        }

        Ok(self.batch_format(requests).await?)
    }
}
