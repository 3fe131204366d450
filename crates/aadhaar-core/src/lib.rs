//! Core library for extracting Aadhaar details from PDF letters.
//!
//! This crate provides:
//! - Password handling for encrypted PDFs
//! - PDF text and embedded image extraction
//! - Rule-based field matching for multilingual Aadhaar layouts
//! - Image persistence and the request pipeline tying it all together

pub mod error;
pub mod fields;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod storage;

pub use error::{AadhaarError, GateError, PdfError, Result, StorageError};
pub use fields::{match_fields, Rule, RULES};
pub use models::config::AadhaarConfig;
pub use models::extraction::{EmbeddedImage, ExtractionResponse, ExtractionResult, Ordinal};
pub use models::fields::{Field, FieldSet};
pub use pdf::{extract_text, gate, walk_images, ImageWalker, PdfHandle, SecuredDocument};
pub use pipeline::Pipeline;
pub use storage::{FsImageStore, ImageStore, MemoryImageStore};
