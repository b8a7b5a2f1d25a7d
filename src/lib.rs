pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod render;
pub mod surface;
pub mod ui;
pub mod util;
pub mod widget;

pub use config::{OverlapPolicy, WidgetConfig};
pub use error::{Result, WidgetError};
pub use surface::{page::HtmlPage, HandleRole, Surface};
pub use widget::{SupportWidget, WidgetHandle};
