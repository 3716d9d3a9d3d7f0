// src/lib.rs

pub mod analyzer;
pub mod cli;
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod github;
pub mod layout;
pub mod model;
pub mod pagination;
pub mod poll;
pub mod renderer;
pub mod scheduler;

pub use analyzer::aggregate;
pub use color::ColorPolicy;
pub use error::{Error, Result};
pub use layout::LayoutStrategy;
pub use pagination::Paginator;
