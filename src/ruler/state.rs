//! Unit selection state and the signal handlers that drive it

use super::renderer::{FrameReport, RulerRenderer};
use super::style::DrawStyle;
use super::traits::{DpiProvider, SettingsPort};
use super::units::UnitKind;
use crate::surface::Surface;

/// Signals delivered by the hosting window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    PaintRequested,
    SurfaceResized,
    SurfaceClicked,
}

/// Requests the controller sends back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulerSignal {
    /// The surface should be invalidated and painted again
    RepaintRequested,
    /// The new unit could not be stored; the in-memory unit is still updated
    PersistFailed { unit_index: usize, message: String },
}

/// Currently selected unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RulerState {
    unit: UnitKind,
}

impl RulerState {
    pub fn new(unit: UnitKind) -> Self {
        Self { unit }
    }

    /// Restore the unit from a stored index, falling back to inches
    pub fn from_index(index: usize) -> Self {
        match UnitKind::from_index(index) {
            Some(unit) => Self::new(unit),
            None => {
                tracing::warn!("Stored unit index {} out of range, using inches", index);
                Self::default()
            }
        }
    }

    pub fn unit(&self) -> UnitKind {
        self.unit
    }

    /// Step to the next unit and return it
    pub fn advance(&mut self) -> UnitKind {
        self.unit = self.unit.next();
        self.unit
    }
}

/// Owns the ruler state and reacts to host signals
pub struct RulerController<P, D> {
    state: RulerState,
    settings: P,
    dpi: D,
    renderer: RulerRenderer,
}

impl<P, D> RulerController<P, D>
where
    P: SettingsPort,
    D: DpiProvider,
{
    pub fn new(settings: P, dpi: D, style: DrawStyle) -> Self {
        let state = RulerState::from_index(settings.load());
        tracing::debug!("Restored unit: {}", state.unit());

        Self {
            state,
            settings,
            dpi,
            renderer: RulerRenderer::new(style),
        }
    }

    pub fn unit(&self) -> UnitKind {
        self.state.unit()
    }

    pub fn style(&self) -> &DrawStyle {
        self.renderer.style()
    }

    pub fn settings(&self) -> &P {
        &self.settings
    }

    /// Dispatch a host signal. Painting needs a surface, so
    /// [`HostSignal::PaintRequested`] only asks for a repaint here; hosts
    /// holding a surface call [`Self::on_paint_requested`] instead.
    pub fn handle(&mut self, signal: HostSignal) -> Vec<RulerSignal> {
        match signal {
            HostSignal::PaintRequested => vec![RulerSignal::RepaintRequested],
            HostSignal::SurfaceResized => vec![self.on_surface_resized()],
            HostSignal::SurfaceClicked => self.on_surface_clicked(),
        }
    }

    /// Render the current unit onto `surface`
    pub fn on_paint_requested(&self, surface: &mut dyn Surface) -> FrameReport {
        self.renderer
            .render_frame(surface, self.dpi.dpi(), self.state.unit())
    }

    pub fn on_surface_resized(&self) -> RulerSignal {
        RulerSignal::RepaintRequested
    }

    /// Cycle to the next unit, store it and ask for a repaint
    pub fn on_surface_clicked(&mut self) -> Vec<RulerSignal> {
        let unit = self.state.advance();
        let unit_index = unit.index();
        tracing::info!("Unit changed to {}", unit);

        let mut signals = Vec::with_capacity(2);
        if let Err(e) = self.settings.save(unit_index) {
            tracing::warn!("Failed to save unit index {}: {}", unit_index, e);
            signals.push(RulerSignal::PersistFailed {
                unit_index,
                message: e.to_string(),
            });
        }
        signals.push(RulerSignal::RepaintRequested);
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruler::traits::{FixedDpi, MemorySettings};
    use crate::surface::{RecordingSurface, Size};
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("disk full")]
    struct DiskFull;

    struct FailingSettings;

    impl SettingsPort for FailingSettings {
        type Error = DiskFull;

        fn load(&self) -> usize {
            2
        }

        fn save(&mut self, _unit_index: usize) -> Result<(), Self::Error> {
            Err(DiskFull)
        }
    }

    fn controller(index: usize) -> RulerController<MemorySettings, FixedDpi> {
        RulerController::new(MemorySettings::new(index), FixedDpi(96), DrawStyle::default())
    }

    #[test]
    fn test_three_clicks_rotate_and_persist() {
        let mut ruler = controller(0);
        assert_eq!(ruler.unit(), UnitKind::Inches);

        let mut units = Vec::new();
        for _ in 0..3 {
            let signals = ruler.on_surface_clicked();
            assert_eq!(signals, vec![RulerSignal::RepaintRequested]);
            units.push(ruler.unit());
        }

        assert_eq!(
            units,
            vec![UnitKind::Centimeters, UnitKind::Pixels, UnitKind::Inches]
        );
        assert_eq!(ruler.settings().saves(), &[1, 2, 0]);
    }

    #[test]
    fn test_restores_persisted_unit() {
        assert_eq!(controller(1).unit(), UnitKind::Centimeters);
        assert_eq!(controller(2).unit(), UnitKind::Pixels);
    }

    #[test]
    fn test_out_of_range_index_defaults_to_inches() {
        assert_eq!(controller(7).unit(), UnitKind::Inches);
    }

    #[test]
    fn test_resize_requests_repaint() {
        let mut ruler = controller(0);
        assert_eq!(
            ruler.handle(HostSignal::SurfaceResized),
            vec![RulerSignal::RepaintRequested]
        );
        assert!(ruler.settings().saves().is_empty());
    }

    #[test]
    fn test_click_signal_dispatch() {
        let mut ruler = controller(2);
        ruler.handle(HostSignal::SurfaceClicked);
        assert_eq!(ruler.unit(), UnitKind::Inches);
        assert_eq!(ruler.settings().saves(), &[0]);
    }

    #[test]
    fn test_failed_save_still_advances_and_repaints() {
        let mut ruler = RulerController::new(FailingSettings, FixedDpi(96), DrawStyle::default());
        assert_eq!(ruler.unit(), UnitKind::Pixels);

        let signals = ruler.on_surface_clicked();
        assert_eq!(ruler.unit(), UnitKind::Inches);
        assert_eq!(
            signals,
            vec![
                RulerSignal::PersistFailed {
                    unit_index: 0,
                    message: "disk full".to_string(),
                },
                RulerSignal::RepaintRequested,
            ]
        );
    }

    #[test]
    fn test_paint_uses_injected_dpi() {
        let ruler = RulerController::new(
            MemorySettings::new(0),
            || 144u32,
            DrawStyle::default(),
        );
        let mut surface = RecordingSurface::new(Size::new(1000, 800));
        let report = ruler.on_paint_requested(&mut surface);

        assert_eq!(report.scale.pixels_per_unit, 144);
        assert_eq!(report.vertical_ticks, 6);
        assert_eq!(report.horizontal_ticks, 7);
    }
}
