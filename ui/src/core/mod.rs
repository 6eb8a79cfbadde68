//! Platform-neutral building blocks shared by the views.

pub mod format;
pub mod resource;
pub mod storage;
pub mod theme;
