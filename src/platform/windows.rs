//! Windows overlay host
//!
//! Creates a layered, top-most popup window whose transparency-key pixels are
//! see-through, and wires its paint, size and click messages to the ruler
//! controller. Drawing goes through GDI into an off-screen bitmap that is
//! blitted to the window in one step.
//!
//! Controls:
//! - Left click: next unit
//! - Right drag: move the window
//! - Window frame: resize
//! - Escape: close

#![cfg(target_os = "windows")]

use std::cell::RefCell;

use windows::Win32::Foundation::{BOOL, COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, VK_ESCAPE};
use windows::Win32::UI::WindowsAndMessaging::*;

use super::{OverlayController, PlatformError, PlatformResult};
use crate::ruler::{DrawStyle, HostSignal, Rgb, RulerSignal};
use crate::surface::{Brush, Point, Rect, Size, Surface};

const INITIAL_WIDTH: i32 = 800;
const INITIAL_HEIGHT: i32 = 600;

thread_local! {
    static OVERLAY: RefCell<Option<OverlayController>> = RefCell::new(None);
}

pub fn run_overlay(controller: OverlayController) -> PlatformResult<()> {
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);

        let instance: HINSTANCE = GetModuleHandleW(None)?.into();
        let class_name = windows::core::w!("RulerPlusOverlay");
        let transparency = controller.style().palette.transparency;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: WNDCLASS_STYLES(CS_HREDRAW.0 | CS_VREDRAW.0),
            lpfnWndProc: Some(overlay_wnd_proc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_CROSS)?,
            lpszClassName: class_name,
            ..Default::default()
        };

        if RegisterClassExW(&wc) == 0 {
            return Err(windows::core::Error::from_win32().into());
        }

        // Messages arrive during CreateWindowExW, so the controller must be in place first
        OVERLAY.with(|slot| *slot.borrow_mut() = Some(controller));

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(WS_EX_LAYERED.0 | WS_EX_TOPMOST.0),
            class_name,
            windows::core::w!("RulerPlus"),
            WINDOW_STYLE(WS_POPUP.0 | WS_THICKFRAME.0),
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            INITIAL_WIDTH,
            INITIAL_HEIGHT,
            None,
            None,
            instance,
            None,
        );

        if hwnd.0 == 0 {
            OVERLAY.with(|slot| slot.borrow_mut().take());
            return Err(PlatformError::WindowCreation(
                windows::core::Error::from_win32().to_string(),
            ));
        }

        let _ = SetLayeredWindowAttributes(hwnd, colorref(transparency), 255, LWA_COLORKEY);
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);

        tracing::info!(
            "Overlay window created ({}x{})",
            INITIAL_WIDTH,
            INITIAL_HEIGHT
        );

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        OVERLAY.with(|slot| slot.borrow_mut().take());
        tracing::info!("Overlay window closed");
    }

    Ok(())
}

unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            paint(hwnd);
            LRESULT(0)
        }
        // Every pixel is repainted, skip the default erase
        WM_ERASEBKGND => LRESULT(1),
        WM_SIZE => {
            dispatch(hwnd, HostSignal::SurfaceResized);
            LRESULT(0)
        }
        WM_LBUTTONUP => {
            dispatch(hwnd, HostSignal::SurfaceClicked);
            LRESULT(0)
        }
        WM_RBUTTONDOWN => {
            let _ = ReleaseCapture();
            SendMessageW(hwnd, WM_NCLBUTTONDOWN, WPARAM(HTCAPTION as usize), LPARAM(0));
            LRESULT(0)
        }
        WM_KEYDOWN if wparam.0 == usize::from(VK_ESCAPE.0) => {
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn dispatch(hwnd: HWND, signal: HostSignal) {
    let signals = OVERLAY.with(|slot| {
        slot.borrow_mut()
            .as_mut()
            .map(|controller| controller.handle(signal))
            .unwrap_or_default()
    });

    for signal in signals {
        match signal {
            RulerSignal::RepaintRequested => unsafe {
                let _ = InvalidateRect(hwnd, None, BOOL::from(false));
            },
            RulerSignal::PersistFailed {
                unit_index,
                message,
            } => {
                tracing::error!("Could not save unit index {}: {}", unit_index, message);
            }
        }
    }
}

unsafe fn paint(hwnd: HWND) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = BeginPaint(hwnd, &mut ps);

    let mut client = RECT::default();
    let _ = GetClientRect(hwnd, &mut client);
    let width = client.right - client.left;
    let height = client.bottom - client.top;

    let mem_dc = CreateCompatibleDC(hdc);
    let bitmap = CreateCompatibleBitmap(hdc, width, height);
    let old_bitmap = SelectObject(mem_dc, bitmap);

    OVERLAY.with(|slot| {
        if let Some(controller) = slot.borrow().as_ref() {
            let mut surface = GdiSurface::new(mem_dc, Size::new(width, height), controller.style());
            controller.on_paint_requested(&mut surface);
        }
    });

    let _ = BitBlt(hdc, 0, 0, width, height, mem_dc, 0, 0, SRCCOPY);

    SelectObject(mem_dc, old_bitmap);
    let _ = DeleteObject(bitmap);
    let _ = DeleteDC(mem_dc);
    let _ = EndPaint(hwnd, &ps);
}

fn colorref(color: Rgb) -> COLORREF {
    COLORREF(color.to_colorref())
}

/// GDI device context wrapped as a ruler surface
struct GdiSurface<'a> {
    hdc: HDC,
    size: Size,
    style: &'a DrawStyle,
    font: HFONT,
    old_font: HGDIOBJ,
}

impl<'a> GdiSurface<'a> {
    unsafe fn new(hdc: HDC, size: Size, style: &'a DrawStyle) -> Self {
        let dpi_y = GetDeviceCaps(hdc, LOGPIXELSY);

        let mut logfont = LOGFONTW {
            lfHeight: -(style.font.size_pt as i32 * dpi_y / 72),
            lfWeight: 400,
            ..Default::default()
        };
        for (dst, src) in logfont
            .lfFaceName
            .iter_mut()
            .zip(style.font.family.encode_utf16().take(31))
        {
            *dst = src;
        }

        let font = CreateFontIndirectW(&logfont);
        let old_font = SelectObject(hdc, font);
        SetBkMode(hdc, TRANSPARENT);

        Self {
            hdc,
            size,
            style,
            font,
            old_font,
        }
    }

    fn color(&self, brush: Brush) -> COLORREF {
        colorref(self.style.palette.color(brush))
    }
}

impl Drop for GdiSurface<'_> {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.hdc, self.old_font);
            let _ = DeleteObject(self.font);
        }
    }
}

impl Surface for GdiSurface<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, brush: Brush, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let area = RECT {
            left: rect.x,
            top: rect.y,
            right: rect.right(),
            bottom: rect.bottom(),
        };
        unsafe {
            let solid = CreateSolidBrush(self.color(brush));
            FillRect(self.hdc, &area, solid);
            let _ = DeleteObject(solid);
        }
    }

    fn draw_line(&mut self, brush: Brush, width: i32, from: Point, to: Point) {
        unsafe {
            let pen = CreatePen(PS_SOLID, width, self.color(brush));
            let old_pen = SelectObject(self.hdc, pen);
            let _ = MoveToEx(self.hdc, from.x, from.y, None);
            let _ = LineTo(self.hdc, to.x, to.y);
            SelectObject(self.hdc, old_pen);
            let _ = DeleteObject(pen);
        }
    }

    fn draw_text(&mut self, brush: Brush, origin: Point, text: &str) {
        let wide: Vec<u16> = text.encode_utf16().collect();
        unsafe {
            SetTextColor(self.hdc, self.color(brush));
            let _ = TextOutW(self.hdc, origin.x, origin.y, &wide);
        }
    }
}
