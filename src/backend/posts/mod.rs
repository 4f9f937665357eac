//! Blog posts
//!
//! Repository and handlers for the post CRUD flow. Authorship is the
//! authorization anchor: only a post's author may edit or delete it.

pub mod db;
pub mod handlers;
