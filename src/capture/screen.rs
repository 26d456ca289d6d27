//! Screen region capture using GDI.
//!
//! Blits the bounding box from the desktop device context into a 32-bit
//! top-down DIB and converts it from BGRA to RGB.

use anyhow::{anyhow, Result};
use image::{Rgb, RgbImage};
use std::ffi::c_void;

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};

use super::frame::{BoundingBox, Frame, FrameSource};

/// Captures a fixed screen rectangle on every call to [`FrameSource::grab`].
pub struct ScreenSource {
    bbox: BoundingBox,
}

impl ScreenSource {
    /// Creates a source for the given bounding box.
    ///
    /// Returns an error if the box is empty.
    pub fn new(bbox: BoundingBox) -> Result<Self> {
        if bbox.width() == 0 || bbox.height() == 0 {
            return Err(anyhow!("Bounding box {} is empty", bbox));
        }
        crate::log(&format!(
            "Screen source: {} ({}x{})",
            bbox,
            bbox.width(),
            bbox.height()
        ));
        Ok(Self { bbox })
    }
}

impl FrameSource for ScreenSource {
    fn grab(&mut self) -> Result<Frame> {
        capture_screen_region(&self.bbox)
    }
}

/// Copies the bounding box from the screen into an RGB image.
pub fn capture_screen_region(bbox: &BoundingBox) -> Result<RgbImage> {
    let width = bbox.width() as i32;
    let height = bbox.height() as i32;

    unsafe {
        let screen_dc = GetDC(HWND::default());
        if screen_dc.is_invalid() {
            return Err(anyhow!("GetDC failed for the screen"));
        }

        let mem_dc = CreateCompatibleDC(screen_dc);
        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        let previous = SelectObject(mem_dc, bitmap);

        let blit = BitBlt(
            mem_dc, 0, 0, width, height, screen_dc, bbox.left, bbox.top, SRCCOPY,
        );

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                // Negative height requests a top-down DIB
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut buffer = vec![0u8; (width * height * 4) as usize];
        let lines = GetDIBits(
            mem_dc,
            bitmap,
            0,
            height as u32,
            Some(buffer.as_mut_ptr() as *mut c_void),
            &mut info,
            DIB_RGB_COLORS,
        );

        SelectObject(mem_dc, previous);
        let _ = DeleteObject(bitmap);
        let _ = DeleteDC(mem_dc);
        ReleaseDC(HWND::default(), screen_dc);

        blit.map_err(|e| anyhow!("BitBlt failed: {}", e))?;
        if lines != height {
            return Err(anyhow!(
                "GetDIBits copied {} of {} rows",
                lines,
                height
            ));
        }

        let mut img = RgbImage::new(width as u32, height as u32);
        for (i, pixel) in img.pixels_mut().enumerate() {
            let offset = i * 4;
            // BGRA -> RGB
            *pixel = Rgb([buffer[offset + 2], buffer[offset + 1], buffer[offset]]);
        }
        Ok(img)
    }
}
