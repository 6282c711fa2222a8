//! 像素表面

use pxcad_core::geometry::Point;
use std::io::Write;
use thiserror::Error;

/// 0xRRGGBB
pub type Color = u32;

/// 渲染器错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid surface size: {0}x{1}")]
    InvalidSize(i32, i32),
}

/// 可写像素的目标
pub trait PixelSurface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// 写入像素，调用者保证坐标在范围内
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    fn fill(&mut self, color: Color) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, color);
            }
        }
    }
}

/// 写入像素，超出 `[0, width) × [0, height)` 的坐标被丢弃
///
/// 返回是否写入。
pub fn put_pixel<S: PixelSurface + ?Sized>(surface: &mut S, p: Point, color: Color) -> bool {
    if 0 <= p.x && p.x < surface.width() && 0 <= p.y && p.y < surface.height() {
        surface.set_pixel(p.x, p.y, color);
        true
    } else {
        false
    }
}

/// 内存中的像素缓冲区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize(width, height));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        })
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        (0 <= x && x < self.width && 0 <= y && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 指定颜色的像素数
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// 按行展开为 8 位 RGB 字节
    pub fn rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &c in &self.pixels {
            bytes.extend_from_slice(&[(c >> 16) as u8, (c >> 8) as u8, c as u8]);
        }
        bytes
    }

    /// 以 8 位 RGB PNG 格式输出
    pub fn write_png<W: Write>(&self, out: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(out, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.rgb_bytes())?;
        writer.finish()
    }
}

impl PixelSurface for PixelBuffer {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_pixel_drops_out_of_bounds() {
        let mut buf = PixelBuffer::new(4, 3, 0xFFFFFF).unwrap();
        assert!(put_pixel(&mut buf, Point::new(0, 0), 0x000000));
        assert!(put_pixel(&mut buf, Point::new(3, 2), 0x000000));
        assert!(!put_pixel(&mut buf, Point::new(4, 0), 0x000000));
        assert!(!put_pixel(&mut buf, Point::new(0, 3), 0x000000));
        assert!(!put_pixel(&mut buf, Point::new(-1, 1), 0x000000));
        assert_eq!(buf.count(0x000000), 2);
        assert_eq!(buf.get(3, 2), Some(0x000000));
        assert_eq!(buf.get(4, 2), None);
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(PixelBuffer::new(0, 10, 0).unwrap_err(), RenderError::InvalidSize(0, 10));
    }

    #[test]
    fn test_write_png_decodes_back() {
        let mut buf = PixelBuffer::new(2, 1, 0xFFFFFF).unwrap();
        buf.set_pixel(1, 0, 0x102030);
        let mut out = Vec::new();
        buf.write_png(&mut out).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");

        let mut reader = png::Decoder::new(out.as_slice()).read_info().unwrap();
        let mut data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut data).unwrap();
        assert_eq!((info.width, info.height), (2, 1));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(&data[..info.buffer_size()], &[0xFF, 0xFF, 0xFF, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_fill() {
        let mut buf = PixelBuffer::new(2, 2, 0).unwrap();
        buf.fill(0x123456);
        assert_eq!(buf.count(0x123456), 4);
    }
}
