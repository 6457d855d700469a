//! Helper functions shared by the content pipeline

mod date;
mod html;
mod slug;

pub use date::*;
pub use html::*;
pub use slug::*;
