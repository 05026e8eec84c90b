/*!
 * Core Module
 * Shared types and limits used across the allocator
 */

pub mod limits;
pub mod types;

pub use types::{Address, Pages, Size};
