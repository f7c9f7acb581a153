//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Wire-facing structs use camelCase serde renames; the REST contract is
//! camelCase throughout (`nextOffset`, `createdAt`, `startDate`, ...).

pub mod activity;
pub mod comment;
pub mod comment_reaction;
pub mod dashboard;
pub mod label;
pub mod project;
pub mod project_member;
pub mod session;
pub mod task;
pub mod user;
