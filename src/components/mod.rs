//! UI components.

pub mod vector_field;
