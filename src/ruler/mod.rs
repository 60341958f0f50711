//! Ruler module
//!
//! Handles:
//! - Unit selection and DPI-based scaling
//! - Marker layout for the vertical, horizontal and diagonal rulers
//! - Reacting to paint, resize and click signals from the host window

mod renderer;
mod state;
mod style;
mod traits;
mod units;

pub use state::RulerController;
pub use style::DrawStyle;
pub use traits::{DpiProvider, FixedDpi, MemorySettings, SettingsPort};
pub use units::{compute_scale, UnitKind, MAX_DPI};

#[cfg(target_os = "windows")]
pub use state::{HostSignal, RulerSignal};
#[cfg(target_os = "windows")]
pub use style::Rgb;
