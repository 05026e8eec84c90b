/*!
 * Core Types
 * Common types used across the allocator
 */

/// Address type for memory operations
pub type Address = usize;

/// Size type for memory operations (bytes)
pub type Size = usize;

/// Count of whole OS pages
pub type Pages = usize;
