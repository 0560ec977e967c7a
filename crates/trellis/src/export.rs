//! Output writers for expanded documents.

pub mod html;
