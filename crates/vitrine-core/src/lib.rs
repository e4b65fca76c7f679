pub mod carousel;
pub mod config;
pub mod diagnostics;
pub mod easing;
pub mod error;
pub mod form;
pub mod loader;
pub mod magnet;
pub mod pointer;
pub mod scene;
pub mod scroll;
pub mod stage;
pub mod timing;
pub mod tween;

pub use carousel::{Carousel, Direction};
pub use config::{AppConfig, LoaderConfig, OverlayConfig, ScrollConfig, UiConfig};
pub use easing::Easing;
pub use error::{Error, Result};
pub use loader::{CompletionPolicy, LoadSequence, LoaderPhase};
pub use stage::{Channel, Mark, ScopeId, Stage, Trigger};
pub use tween::{Timeline, Track, Tween};
