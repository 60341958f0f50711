//! Ports the ruler depends on
//!
//! The controller never reaches for a global settings store or a platform DPI
//! call directly; both are injected through these traits.

use std::convert::Infallible;

/// Durable storage for the selected unit index
pub trait SettingsPort {
    type Error: std::error::Error;

    /// Stored unit index; implementations return 0 when nothing is stored
    fn load(&self) -> usize;

    /// Store a new unit index
    fn save(&mut self, unit_index: usize) -> Result<(), Self::Error>;
}

/// Source of the display density in dots per inch
pub trait DpiProvider {
    /// A positive DPI value
    fn dpi(&self) -> u32;
}

impl<F> DpiProvider for F
where
    F: Fn() -> u32,
{
    fn dpi(&self) -> u32 {
        self()
    }
}

/// Constant DPI, for off-screen rendering and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDpi(pub u32);

impl DpiProvider for FixedDpi {
    fn dpi(&self) -> u32 {
        self.0
    }
}

/// Settings kept only in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    unit_index: usize,
    #[cfg(test)]
    saves: Vec<usize>,
}

impl MemorySettings {
    pub fn new(unit_index: usize) -> Self {
        Self {
            unit_index,
            #[cfg(test)]
            saves: Vec::new(),
        }
    }

    /// Every value passed to `save`, oldest first
    #[cfg(test)]
    pub fn saves(&self) -> &[usize] {
        &self.saves
    }
}

impl SettingsPort for MemorySettings {
    type Error = Infallible;

    fn load(&self) -> usize {
        self.unit_index
    }

    fn save(&mut self, unit_index: usize) -> Result<(), Self::Error> {
        self.unit_index = unit_index;
        #[cfg(test)]
        self.saves.push(unit_index);
        Ok(())
    }
}
