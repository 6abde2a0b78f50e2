//! playslip — turns a listening history into a novelty till receipt.
//!
//! The pipeline runs in one direction: the catalog client (or the demo
//! source) produces tracks, the assembler prices, aggregates and
//! decorates them into an immutable [`model::Receipt`], and the
//! renderer/exporter turn that receipt into a shareable image. Every
//! derived figure is deterministic for a given receipt, so an exported
//! image can be regenerated byte for byte; the only sanctioned
//! exception is the activity heatmap (see [`decor::codes::ActivityGrid`]).
//!
//! ```no_run
//! use playslip::assemble::Assembler;
//! use playslip::export::{self, ExportScale, ImageFormat};
//! use playslip::model::TimeRange;
//! use playslip::theme::ThemeId;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tracks = playslip::demo::preset_tracks(25);
//! let receipt = Assembler::new().assemble_counted(tracks, ThemeId::Casino, TimeRange::Short)?;
//! let png = export::rasterize(&receipt, ExportScale::X2, ImageFormat::Png, 1.0)?;
//! std::fs::write(
//!     export::export_filename(ImageFormat::Png, receipt.generated_at),
//!     png,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod barcode;
pub mod catalog;
pub mod decor;
pub mod demo;
pub mod estimate;
pub mod export;
pub mod layout;
pub mod model;
pub mod pricing;
pub mod render;
pub mod stats;
pub mod theme;

pub use assemble::{AssembleError, Assembler, RequestGeneration};
pub use catalog::{CatalogClient, CatalogError, TokenProvider};
pub use export::{ExportError, ExportScale, ImageFormat, PipelineError};
pub use model::{PlayCountedTrack, Receipt, TimeRange, TrackRecord};
pub use render::RenderError;
pub use theme::{Theme, ThemeId};
