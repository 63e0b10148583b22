//! Interactive TUI for restaurant and menu search
//!
//! Architecture:
//! - Loader thread: reads the catalog once and hands it over via mpsc
//! - Main thread: owns the `Session`, turns key/mouse events into session
//!   events, and redraws from session state
//!
//! Layout:
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Restaurant: [Liberty Kitchen_____]                          │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │ Item / category: [pa______]  │ Ingredient: [basil_______]   │
//! ├───────────────────┬──────────┴──────────────────────────────┤
//! │ Restaurants       │ Liberty Kitchen [1/12]                  │
//! │ > Liberty Kitchen │ ▾ Pesto Pasta      Pasta        13.00   │
//! │   Ridley's BBQ    │     • Basil                             │
//! │                   │     • Pine Nuts                         │
//! ├───────────────────┴─────────────────────────────────────────┤
//! │ 3 restaurants │ Tab: field │ Enter: select/toggle │ Esc: quit│
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod input;
mod ui;

pub use app::run;
