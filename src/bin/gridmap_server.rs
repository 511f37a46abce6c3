//! Gridmap API Server binary
//!
//! HTTP REST API for range shaping and record mapping.

use clap::Parser;
use royalbit_gridmap::api::{run_api_server, server::ApiConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridmap-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Gridmap API Server - HTTP REST API for sheet range detection and record mapping")]
#[command(long_about = r#"
Gridmap API Server - HTTP REST API

Provides RESTful endpoints for the Gridmap core:
  - POST /api/v1/shape    - Detect header row, first data row and table bounds
  - POST /api/v1/records  - Shape a grid and return keyed records
  - POST /api/v1/map      - Map records onto a header (insert/ignore/error policy)
  - POST /api/v1/column   - Column letters <-> ordinals
  - POST /api/v1/color    - Hex color to RGB
  - POST /api/v1/sheet-id - Spreadsheet id from an id, list value or URL

Served workbook (--workbook, held in memory):
  - GET  /api/v1/sheets              - Sheet titles
  - POST /api/v1/sheets/:name/read   - Read and shape a sheet
  - POST /api/v1/sheets/:name/append - Append records to a sheet

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  gridmap-server                           # Start on localhost:8080
  gridmap-server --host 0.0.0.0 --port 3000
  gridmap-server --workbook book.xlsx

  curl -X POST http://localhost:8080/api/v1/shape \
    -H "Content-Type: application/json" \
    -d '{"grid": [[], ["name", "age"], ["Ada", 36]]}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "GRIDMAP_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "GRIDMAP_PORT")]
    port: u16,

    /// Workbook to load and serve (.yaml, .json, .xlsx, ...)
    #[arg(short, long, env = "GRIDMAP_WORKBOOK")]
    workbook: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        workbook: args.workbook,
    };

    run_api_server(config).await
}
