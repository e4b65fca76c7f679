pub mod app;
pub mod content;
pub mod event;
pub mod input;
pub mod page;
pub mod sections;
pub mod theme;

pub use app::App;
pub use theme::Theme;
