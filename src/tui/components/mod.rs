//! # TUI Components
//!
//! Stateless, props-based components for the demo shell:
//!
//! - `TitleBar`: top line showing what the manager currently holds
//! - `PanelView`: one bordered panel (screen, modal, menu or status bar)
//!
//! Components receive external data as props, not by reading the shell
//! state directly. This keeps dependencies explicit and components testable.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top line)
//! └── panel_view.rs    (A single panel)
//! ```

mod panel_view;
mod title_bar;

pub use panel_view::PanelView;
pub use title_bar::TitleBar;
