//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis parser
//! and expander. It includes:
//!
//! - **Tree**: The markup tree model ([`tree::Node`], [`tree::Child`])
//! - **Naming**: Slug, camelCase and class token helpers ([`naming`] module)
//! - **Escaping**: Text and attribute escaping ([`escape`] module)

pub mod escape;
pub mod naming;
pub mod tree;

pub use tree::{Attributes, Child, Node};
