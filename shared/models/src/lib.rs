//! # Consulta de Prazos Domain Models
//!
//! Core types shared by the lookup engine and the web service.
//!
//! ## Key Models
//!
//! - **WorksheetTab**: one of the five fixed machine/process tabs of the order spreadsheet
//! - **OrderRecord**: a typed spreadsheet row with coerced order numbers
//! - **ForecastValue**: a production date, or the raw cell text when it is not a date
//! - **LookupMatch**: a selected row ready for rendering
//! - **LookupOutcome** / **LookupReport**: the kind and the rendered text of a lookup

pub mod order;
pub mod lookup;

pub use order::*;
pub use lookup::*;
