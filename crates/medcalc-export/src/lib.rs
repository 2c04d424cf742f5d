//! medcalc-export
//!
//! Calculator result reports: Tera-rendered text and DOCX result sheets.

pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
