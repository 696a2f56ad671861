//! Infrastructure layer - Platform implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Application context (state)
//! - Desktop picker backed by a capture command or a file path (desktop_picker)
//! - Terminal dialogs and system clipboard (terminal)

pub mod config;
pub mod desktop_picker;
pub mod state;
pub mod terminal;

pub use desktop_picker::DesktopPicker;
pub use state::AppContext;
#[cfg(feature = "desktop")]
pub use terminal::SystemClipboard;
pub use terminal::TerminalSurface;
