//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{
    append_records, column_number_to_name, extract_resource_id, get_existing_sheet_names,
    get_range_string, hex_to_rgb, parse_column_name, prepare_sheet_data, AppendOutcome, Rgb,
};
use crate::error::{GridmapError, GridmapResult};
use crate::sheet::{MemoryWorkbook, SheetIo, Workbook, Worksheet};
use crate::types::{
    Cell, ExtraDataPolicy, Grid, RangeDefinition, Record, ResourceLocator, ShapedRange,
    ValueRenderOption, WriteOptions,
};

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Success → 200 with data; failure → 422 with the error message
fn respond<T: Serialize>(result: GridmapResult<T>) -> Response {
    match result {
        Ok(data) => Json(ApiResponse::ok(data)).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<T>::err(e.detailed())),
        )
            .into_response(),
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "Gridmap API Server".to_string(),
        version: state.version.clone(),
        description: "Range detection and record mapping for spreadsheet data".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new("/api/v1/shape", "POST", "Detect header and data rows of a grid"),
            EndpointInfo::new("/api/v1/records", "POST", "Shape a grid and return its records"),
            EndpointInfo::new("/api/v1/column", "POST", "Convert column letters and ordinals"),
            EndpointInfo::new("/api/v1/color", "POST", "Decode a hex color"),
            EndpointInfo::new("/api/v1/sheet-id", "POST", "Extract a spreadsheet id"),
            EndpointInfo::new("/api/v1/map", "POST", "Map records onto a sheet header"),
            EndpointInfo::new("/api/v1/sheets", "GET", "List sheets of the served workbook"),
            EndpointInfo::new(
                "/api/v1/sheets/:name/read",
                "POST",
                "Read and shape a sheet of the served workbook",
            ),
            EndpointInfo::new(
                "/api/v1/sheets/:name/append",
                "POST",
                "Append records to a sheet of the served workbook",
            ),
        ],
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: ["shape", "records", "column", "color", "sheet-id", "map", "sheets"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }))
}

fn default_true() -> bool {
    true
}

/// Shape / records request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRequest {
    pub grid: Grid,
    #[serde(default)]
    pub options: RangeDefinition,
    #[serde(default = "default_true")]
    pub add_row_numbers: bool,
}

/// POST /api/v1/shape - Detect the table in a grid
pub async fn shape(Json(req): Json<ShapeRequest>) -> impl IntoResponse {
    Json(ApiResponse::<ShapedRange>::ok(prepare_sheet_data(
        req.grid,
        &req.options,
        req.add_row_numbers,
    )))
}

/// Records response
#[derive(Serialize)]
pub struct RecordsResponse {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

/// POST /api/v1/records - Shape a grid and key its data rows by header
pub async fn records(Json(req): Json<ShapeRequest>) -> impl IntoResponse {
    let shaped = prepare_sheet_data(req.grid, &req.options, req.add_row_numbers);
    Json(ApiResponse::ok(RecordsResponse {
        columns: shaped.column_names(),
        records: shaped.into_records(),
    }))
}

/// Column request: give either `name` or `number`
#[derive(Deserialize)]
pub struct ColumnRequest {
    pub name: Option<String>,
    pub number: Option<usize>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ColumnResponse {
    pub name: String,
    pub number: usize,
}

/// POST /api/v1/column - Convert between column letters and ordinals
pub async fn column(Json(req): Json<ColumnRequest>) -> Response {
    let result = match (req.name, req.number) {
        (Some(name), _) => parse_column_name(&name)
            .map(|number| ColumnResponse {
                name: name.to_ascii_uppercase(),
                number,
            })
            .ok_or(GridmapError::InvalidRange(name)),
        (None, Some(number)) if number > 0 => Ok(ColumnResponse {
            name: column_number_to_name(number),
            number,
        }),
        (None, number) => Err(GridmapError::InvalidRange(
            number.map(|n| n.to_string()).unwrap_or_default(),
        )),
    };
    respond(result)
}

#[derive(Deserialize)]
pub struct ColorRequest {
    pub hex: String,
}

#[derive(Serialize)]
pub struct ColorResponse {
    pub hex: String,
    pub rgb: Option<Rgb>,
}

/// POST /api/v1/color - Decode a hex color; `rgb` is null when malformed
pub async fn color(Json(req): Json<ColorRequest>) -> impl IntoResponse {
    let rgb = hex_to_rgb(&req.hex);
    Json(ApiResponse::ok(ColorResponse { hex: req.hex, rgb }))
}

#[derive(Serialize)]
pub struct SheetIdResponse {
    pub id: String,
    pub found: bool,
}

/// POST /api/v1/sheet-id - Extract a spreadsheet id from a locator
pub async fn sheet_id(Json(locator): Json<ResourceLocator>) -> Response {
    respond(
        extract_resource_id(locator.kind, &locator.value).map(|id| SheetIdResponse {
            found: !id.is_empty(),
            id,
        }),
    )
}

/// Map request: current sheet header plus records to write
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRequest {
    #[serde(default)]
    pub header: Vec<String>,
    pub records: Vec<Record>,
    #[serde(default)]
    pub policy: ExtraDataPolicy,
    #[serde(default)]
    pub options: WriteOptions,
}

#[derive(Serialize)]
pub struct MapResponse {
    pub columns: Vec<String>,
    pub rows: Grid,
}

impl From<AppendOutcome> for MapResponse {
    fn from(outcome: AppendOutcome) -> Self {
        Self {
            columns: outcome.columns,
            rows: outcome.rows,
        }
    }
}

/// POST /api/v1/map - Reconcile records with a header and lay them out as rows
pub async fn map(Json(req): Json<MapRequest>) -> Response {
    const SHEET: &str = "Sheet1";
    let header: Vec<Cell> = req.header.into_iter().map(Cell::Text).collect();
    let sheet = MemoryWorkbook::new(Workbook::new(vec![Worksheet::new(SHEET, vec![header])]));

    let result = append_records(req.policy, SHEET, &sheet, req.records, &req.options)
        .await
        .map(MapResponse::from);
    respond(result)
}

/// GET /api/v1/sheets - Sheet titles of the served workbook
pub async fn list_sheets(State(state): State<Arc<AppState>>) -> Response {
    respond(get_existing_sheet_names(&state.book).await)
}

/// Read request for a sheet of the served workbook
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRequest {
    #[serde(default)]
    pub options: RangeDefinition,
    #[serde(default = "default_true")]
    pub add_row_numbers: bool,
}

/// POST /api/v1/sheets/:name/read - Fetch a range, shape it and key its rows
pub async fn read_sheet(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<ReadRequest>,
) -> Response {
    let range = get_range_string(&name, &req.options);
    let result = state
        .book
        .get_data(&range, ValueRenderOption::UnformattedValue)
        .await
        .map(|grid| {
            let shaped = prepare_sheet_data(grid, &req.options, req.add_row_numbers);
            RecordsResponse {
                columns: shaped.column_names(),
                records: shaped.into_records(),
            }
        });
    respond(result)
}

/// Append request for a sheet of the served workbook
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendRequest {
    pub records: Vec<Record>,
    #[serde(default)]
    pub policy: ExtraDataPolicy,
    #[serde(default)]
    pub options: WriteOptions,
}

/// POST /api/v1/sheets/:name/append - Reconcile records with the header and append them
pub async fn append_sheet(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<AppendRequest>,
) -> Response {
    let result = append_records(req.policy, &name, &state.book, req.records, &req.options)
        .await
        .map(MapResponse::from);
    respond(result)
}
