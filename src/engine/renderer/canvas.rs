// CPU framebuffer the game draws into before it is uploaded to the GPU

use crate::core::math::Rect;
use glam::IVec2;
use image::{Pixel, Rgba, RgbaImage};

/// RGBA colour, 8 bits per channel
pub type Color = Rgba<u8>;

pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const RED: Color = Rgba([255, 0, 0, 255]);
pub const GREEN: Color = Rgba([0, 255, 0, 255]);

/// Logical-resolution frame composed on the CPU
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a black canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BLACK),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Bounds of the canvas as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Reallocate to a new resolution, clearing the content
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.image.dimensions() {
            self.image = RgbaImage::from_pixel(width, height, BLACK);
        }
    }

    /// Fill the whole canvas with one colour
    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fill a rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = self.bounds().intersect(&rect) else {
            return;
        };

        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Blend one pixel over the canvas, ignoring out-of-bounds coordinates
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }

        match color[3] {
            0 => {}
            255 => self.image.put_pixel(x as u32, y as u32, color),
            _ => self.image.get_pixel_mut(x as u32, y as u32).blend(&color),
        }
    }

    /// Copy the `src` region of `sheet` to `dst`, optionally mirrored horizontally
    pub fn blit(&mut self, sheet: &RgbaImage, src: Rect, dst: IVec2, mirrored: bool) {
        let sheet_bounds = Rect::new(0, 0, sheet.width(), sheet.height());

        for dy in 0..src.h as i32 {
            for dx in 0..src.w as i32 {
                let sx = if mirrored {
                    src.x + src.w as i32 - 1 - dx
                } else {
                    src.x + dx
                };
                let sy = src.y + dy;
                if sx < sheet_bounds.x
                    || sy < sheet_bounds.y
                    || sx >= sheet_bounds.right()
                    || sy >= sheet_bounds.bottom()
                {
                    continue;
                }

                let pixel = *sheet.get_pixel(sx as u32, sy as u32);
                self.blend_pixel(dst.x + dx, dst.y + dy, pixel);
            }
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Read back one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.image.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> RgbaImage {
        // Two 2x1 frames: [red, green] [blue, transparent]
        let mut sheet = RgbaImage::new(4, 1);
        sheet.put_pixel(0, 0, RED);
        sheet.put_pixel(1, 0, GREEN);
        sheet.put_pixel(2, 0, Rgba([0, 0, 255, 255]));
        sheet.put_pixel(3, 0, Rgba([0, 0, 0, 0]));
        sheet
    }

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = Canvas::new(4, 3);
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
        assert_eq!(canvas.pixel(3, 2), BLACK);
        assert_eq!(canvas.as_raw().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(2, 2, 10, 10), WHITE);

        assert_eq!(canvas.pixel(1, 1), BLACK);
        assert_eq!(canvas.pixel(2, 2), WHITE);
        assert_eq!(canvas.pixel(3, 3), WHITE);

        // Entirely outside: nothing happens
        canvas.fill_rect(Rect::new(-10, -10, 5, 5), RED);
        assert_eq!(canvas.pixel(0, 0), BLACK);
    }

    #[test]
    fn test_blit_frame() {
        let mut canvas = Canvas::new(4, 1);
        canvas.blit(&strip(), Rect::new(0, 0, 2, 1), IVec2::new(1, 0), false);

        assert_eq!(canvas.pixel(0, 0), BLACK);
        assert_eq!(canvas.pixel(1, 0), RED);
        assert_eq!(canvas.pixel(2, 0), GREEN);
    }

    #[test]
    fn test_blit_mirrored() {
        let mut canvas = Canvas::new(2, 1);
        canvas.blit(&strip(), Rect::new(0, 0, 2, 1), IVec2::ZERO, true);

        assert_eq!(canvas.pixel(0, 0), GREEN);
        assert_eq!(canvas.pixel(1, 0), RED);
    }

    #[test]
    fn test_blit_skips_transparent_pixels() {
        let mut canvas = Canvas::new(2, 1);
        canvas.clear(WHITE);
        canvas.blit(&strip(), Rect::new(2, 0, 2, 1), IVec2::ZERO, false);

        assert_eq!(canvas.pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(1, 0), WHITE);
    }

    #[test]
    fn test_blit_partially_off_screen() {
        let mut canvas = Canvas::new(2, 1);
        canvas.blit(&strip(), Rect::new(0, 0, 2, 1), IVec2::new(-1, 0), false);
        assert_eq!(canvas.pixel(0, 0), GREEN);
        assert_eq!(canvas.pixel(1, 0), BLACK);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(WHITE);
        canvas.resize(3, 1);
        assert_eq!((canvas.width(), canvas.height()), (3, 1));
        assert_eq!(canvas.pixel(2, 0), BLACK);
    }
}
