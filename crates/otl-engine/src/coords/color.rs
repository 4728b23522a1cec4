/// Straight-alpha sRGB color.
///
/// Colors are authored the way artists pick them (`0`–`255` sRGB bytes). The
/// renderer converts to linear premultiplied values when it uploads vertices.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque color from sRGB bytes.
    #[inline]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear premultiplied RGBA, as expected by an sRGB render target.
    pub fn to_linear_premul(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            srgb_to_linear(self.r) * a,
            srgb_to_linear(self.g) * a,
            srgb_to_linear(self.b) * a,
            a,
        ]
    }

    /// sRGB premultiplied RGBA, for targets that do no conversion on write.
    pub fn to_srgb_premul(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r.clamp(0.0, 1.0) * a,
            self.g.clamp(0.0, 1.0) * a,
            self.b.clamp(0.0, 1.0) * a,
            a,
        ]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_bytes_map_to_unit_range() {
        let c = Color::rgb(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Color::black().to_linear_premul(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::white().to_linear_premul(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn premultiplies_by_alpha() {
        let c = Color::white().with_alpha(0.5).to_srgb_premul();
        assert_eq!(c, [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn midtones_darken_in_linear_space() {
        let [r, ..] = Color::rgb(128, 128, 128).to_linear_premul();
        assert!(r > 0.2 && r < 0.23, "r = {r}");
    }
}
