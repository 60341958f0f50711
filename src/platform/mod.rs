//! Platform module - host window and display queries
//!
//! This module provides:
//! - The system DPI query behind [`DpiProvider`]
//! - The transparent overlay window (Windows only)

#[cfg(target_os = "windows")]
mod windows;

use thiserror::Error;

use crate::config::TomlSettings;
use crate::ruler::{DpiProvider, RulerController};

/// Dots per inch assumed when the platform cannot report one
pub const DEFAULT_DPI: u32 = 96;

/// Errors that can occur while hosting the overlay
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("The overlay window is not supported on {0}")]
    NotSupported(&'static str),

    #[cfg(target_os = "windows")]
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    #[cfg(target_os = "windows")]
    #[error("Win32 error: {0}")]
    Win32(#[from] ::windows::core::Error),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Controller type the overlay window drives
pub type OverlayController = RulerController<TomlSettings, SystemDpi>;

/// DPI reported by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDpi;

impl DpiProvider for SystemDpi {
    fn dpi(&self) -> u32 {
        match query_system_dpi() {
            Some(dpi) if dpi > 0 => dpi,
            _ => DEFAULT_DPI,
        }
    }
}

#[cfg(target_os = "windows")]
fn query_system_dpi() -> Option<u32> {
    use ::windows::Win32::UI::HiDpi::GetDpiForSystem;
    Some(unsafe { GetDpiForSystem() })
}

#[cfg(not(target_os = "windows"))]
fn query_system_dpi() -> Option<u32> {
    None
}

/// Open the overlay window and run its message loop until it closes
#[cfg(target_os = "windows")]
pub fn run_overlay(controller: OverlayController) -> PlatformResult<()> {
    windows::run_overlay(controller)
}

#[cfg(not(target_os = "windows"))]
pub fn run_overlay(_controller: OverlayController) -> PlatformResult<()> {
    Err(PlatformError::NotSupported(platform_name()))
}

/// Get the current platform name
pub fn platform_name() -> &'static str {
    #[cfg(target_os = "macos")]
    return "macOS";

    #[cfg(target_os = "linux")]
    return "Linux";

    #[cfg(target_os = "windows")]
    return "Windows";

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return "Unknown";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_dpi_is_positive() {
        assert!(SystemDpi.dpi() > 0);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_fallback_dpi() {
        assert_eq!(SystemDpi.dpi(), DEFAULT_DPI);
    }

    #[test]
    fn test_platform_name() {
        assert!(!platform_name().is_empty());
    }
}
