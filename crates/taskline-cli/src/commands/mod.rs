pub mod check;
pub mod config;
pub mod conflicts;
pub mod input;
pub mod timeline;
