/*!
# Sheet Auto-Reply

A small dashboard over a response spreadsheet that mails a thank-you letter
to every row not yet replied to, then marks the row as replied.

## Overview

Rows live in a hosted spreadsheet whose first row is the header row. Three
columns matter: the contact's name, their email address and an
"auto-reply sent?" status cell. A row whose status is blank or `N` is
pending; anything else counts as handled.

## Architecture

### Frontend Layer
- **Technologies**: HTML, CSS, Chart.js
- **Key Components**:
  - Data table of every row
  - Total / pending / replied counters
  - Status doughnut and daily trend bar chart
  - Execute button that triggers the automation

### Backend Layer
- **Technologies**: Rust, axum, lettre, reqwest
- **Core Components**:
  - Column Codec - column index to letter (`A`, `Z`, `AA`, ...)
  - Row Projector - header-keyed rows with their sheet position
  - Status Classifier - pending vs. replied
  - Automation Runner - fetch, classify, mail, write back, count
  - Preview Responder - fetch and project for display
  - Dashboard aggregation - counters and per-day trend

The spreadsheet is fetched fresh on every request. Nothing is cached or
persisted locally.

## Modules

- **column**: Column letters and A1 range strings
- **grid**: Row projection and required-column resolution
- **status**: Reply status classification
- **dashboard**: Counters, date column detection and trend buckets
- **error**: Error taxonomy
- **config**: Environment configuration
- **sheets**: Spreadsheet backend trait and Google Sheets client
- **mailer**: Letter template, notifier trait and SMTP transport
- **automation**: The mark-and-notify loop
- **preview**: Read-only projection for the dashboard
- **app**: Routing and handlers

## REST API Endpoints

- `GET /health` - Liveness check
- `GET /api/preview` - Headers and projected rows
- `GET /api/dashboard` - Counters and trend
- `POST /api/execute` - Run the automation
*/

pub mod column;
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod mailer;
pub mod status;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod automation;
#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod preview;
#[cfg(feature = "web")]
pub mod sheets;

/// Re-export the pieces most callers need
pub use error::{AppError, RowOutcome};
pub use grid::{HeaderNames, Projection, ProjectedRow, SheetGrid};
pub use status::{ReplyStatus, classify};
