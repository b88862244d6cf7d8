//! Terminal UI: the table component, its overlay indicator and themes.

pub mod components;
pub mod theme;

pub use theme::TableTheme;
