//! Shared Domain Logic
//!
//! Pure, IO-free building blocks used by the handlers and the storage layer:
//!
//! - **`course`** - The course catalog and its string encoding at the
//!   storage boundary
//! - **`forms`** - Form structs and validation functions

pub mod course;
pub mod forms;
