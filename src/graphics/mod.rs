//! Types and helpers for drawing on the GPU.

pub(crate) mod gpu;
pub(crate) mod palette_pass;
pub(crate) mod state;

use wgpu::Color;

/// Convert an `u32` color to a WGPU [`wgpu::Color`] taking in account sRGB.
fn u32_to_wgpu_color(argb: u32, srgb: bool) -> Color {
    let a = ((argb & 0xFF00_0000) >> 24) as f64 / 255.0;
    let r = ((argb & 0x00FF_0000) >> 16) as f64 / 255.0;
    let g = ((argb & 0x0000_FF00) >> 8) as f64 / 255.0;
    let b = (argb & 0x0000_00FF) as f64 / 255.0;

    if srgb {
        // Convert to sRGB space
        Color {
            a: a.powf(2.2),
            r: r.powf(2.2),
            g: g.powf(2.2),
            b: b.powf(2.2),
        }
    } else {
        Color { a, r, g, b }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn linear_color_channels() {
        let color = super::u32_to_wgpu_color(0xFF00_80FF, false);

        assert!((color.a - 1.0).abs() < f64::EPSILON);
        assert!(color.r.abs() < f64::EPSILON);
        assert!((color.g - 128.0 / 255.0).abs() < f64::EPSILON);
        assert!((color.b - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn srgb_darkens_midtones() {
        let linear = super::u32_to_wgpu_color(0xFF80_8080, false);
        let srgb = super::u32_to_wgpu_color(0xFF80_8080, true);

        assert!(srgb.r < linear.r);
        assert!((srgb.a - 1.0).abs() < f64::EPSILON);
    }
}
