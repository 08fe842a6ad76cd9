//! The presentation shell: page title, city selector, and the three chart
//! sections rendered for the current selection.

mod page;
mod site;

pub use page::*;
pub use site::*;
