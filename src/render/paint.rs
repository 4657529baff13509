use image::RgbaImage;
use kurbo::{Circle, Shape as _, Vec2};
use rayon::prelude::*;

use crate::{
    catalog::frames::{Background, ColorStop, RadialLayer},
    foundation::{
        color::Color,
        core::{Canvas, Point, Rect},
        error::{BoothError, BoothResult},
    },
    layout::grid::PixelRect,
};

/// Straight-alpha source-over. Opaque sources replace, transparent sources are a no-op.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Alpha scaled by 255 to keep the division exact enough in integers.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = ((out_a + 127) / 255).min(255) as u8;
    out
}

/// Fill `rect` (clipped to the canvas) with `color`, blending when translucent.
pub fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Color) {
    let bounds = canvas_of(canvas).rect();
    let clipped = rect.intersect(bounds);
    if clipped.is_zero_area() {
        return;
    }
    let r = PixelRect::from_rect(clipped);
    let src = color.to_pixel().0;
    for y in r.y..r.y + r.height {
        for x in r.x..r.x + r.width {
            let p = canvas.get_pixel_mut(x, y);
            p.0 = over(p.0, src);
        }
    }
}

/// Anti-aliased filled circle, rasterized by `vello_cpu` over the circle's pixel bounds and
/// blended source-over onto `canvas`.
pub fn fill_circle(canvas: &mut RgbaImage, circle: Circle, color: Color) -> BoothResult<()> {
    let bounds = circle.bounding_box().expand().intersect(canvas_of(canvas).rect());
    if bounds.is_zero_area() || color.a == 0 {
        return Ok(());
    }
    let r = PixelRect::from_rect(bounds);
    let width: u16 = r.width.try_into().map_err(|_| {
        BoothError::validation(format!("circle bounds exceed u16: width={}", r.width))
    })?;
    let height: u16 = r.height.try_into().map_err(|_| {
        BoothError::validation(format!("circle bounds exceed u16: height={}", r.height))
    })?;

    let local = Circle::new(
        circle.center - Vec2::new(f64::from(r.x), f64::from(r.y)),
        circle.radius,
    );
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in local.path_elements(0.1) {
        path.push(el);
    }

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&path);
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    let rows = pixmap
        .data_as_u8_slice()
        .chunks_exact(usize::from(width) * 4)
        .zip(r.y..);
    for (row, y) in rows {
        for (src, x) in row.chunks_exact(4).zip(r.x..) {
            let Some(src) = unpremultiply([src[0], src[1], src[2], src[3]]) else {
                continue;
            };
            let p = canvas.get_pixel_mut(x, y);
            p.0 = over(p.0, src);
        }
    }
    Ok(())
}

/// Premultiplied RGBA8 back to straight alpha. `None` for fully transparent pixels.
fn unpremultiply(px: [u8; 4]) -> Option<[u8; 4]> {
    let a = u16::from(px[3]);
    if a == 0 {
        return None;
    }
    let mut out = px;
    for c in &mut out[..3] {
        *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
    }
    Some(out)
}

/// Draw `src` unscaled with its top-left corner at `(x, y)`, source-over.
pub fn draw_image(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    image::imageops::overlay(canvas, src, x, y);
}

/// Paint `bg` across the whole canvas, blended over what is already there.
pub fn paint_background(canvas: &mut RgbaImage, bg: &Background) {
    let size = canvas_of(canvas);
    let shader = Shader::new(bg, size);
    let stride = size.width as usize * 4;
    if stride == 0 {
        return;
    }
    let buf: &mut [u8] = &mut **canvas;
    buf.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let src = shader.shade(x as f64 + 0.5, y as f64 + 0.5);
            let out = over([px[0], px[1], px[2], px[3]], src);
            px.copy_from_slice(&out);
        }
    });
}

fn canvas_of(img: &RgbaImage) -> Canvas {
    Canvas {
        width: img.width(),
        height: img.height(),
    }
}

/// Axis of a CSS-style linear gradient over a `width x height` box.
#[derive(Clone, Copy, Debug)]
struct GradientLine {
    center: Point,
    dir: Vec2,
    length: f64,
}

impl GradientLine {
    fn new(angle_deg: f64, size: Canvas) -> Self {
        let a = angle_deg.to_radians();
        let (w, h) = (f64::from(size.width), f64::from(size.height));
        Self {
            center: Point::new(w / 2.0, h / 2.0),
            dir: Vec2::new(a.sin(), -a.cos()),
            length: (w * a.sin()).abs() + (h * a.cos()).abs(),
        }
    }

    /// Distance along the line from its start to the projection of `p`.
    fn project(&self, p: Point) -> f64 {
        (p - self.center).dot(self.dir) + self.length / 2.0
    }
}

enum Shader<'a> {
    Solid([u8; 4]),
    Linear {
        line: GradientLine,
        stops: &'a [ColorStop],
    },
    Repeating {
        line: GradientLine,
        stops: &'a [ColorStop],
    },
    Radial {
        spots: Vec<(Point, f64, Color)>,
    },
}

impl<'a> Shader<'a> {
    fn new(bg: &'a Background, size: Canvas) -> Self {
        match bg {
            Background::Solid { color } => Self::Solid(color.to_pixel().0),
            Background::LinearGradient { angle_deg, stops } => Self::Linear {
                line: GradientLine::new(*angle_deg, size),
                stops,
            },
            Background::RepeatingPattern { angle_deg, stops } => Self::Repeating {
                line: GradientLine::new(*angle_deg, size),
                stops,
            },
            Background::RadialGlow { layers } => Self::Radial {
                spots: layers
                    .iter()
                    .rev()
                    .map(|l| radial_spot(l, size))
                    .collect(),
            },
        }
    }

    fn shade(&self, x: f64, y: f64) -> [u8; 4] {
        let p = Point::new(x, y);
        match self {
            Self::Solid(c) => *c,
            Self::Linear { line, stops } => {
                let t = if line.length > 0.0 {
                    line.project(p) / line.length
                } else {
                    0.0
                };
                sample_stops(stops, t).to_pixel().0
            }
            Self::Repeating { line, stops } => {
                let first = stops.first().map_or(0.0, |s| s.offset);
                let period = stops.last().map_or(0.0, |s| s.offset) - first;
                let pos = if period > 0.0 {
                    first + (line.project(p) - first).rem_euclid(period)
                } else {
                    first
                };
                sample_stops(stops, pos).to_pixel().0
            }
            Self::Radial { spots } => {
                let mut out = Color::TRANSPARENT.to_pixel().0;
                for (center, radius, color) in spots {
                    let falloff = (1.0 - p.distance(*center) / radius).clamp(0.0, 1.0);
                    if falloff <= 0.0 {
                        continue;
                    }
                    let a = (f64::from(color.a) * falloff).round() as u8;
                    out = over(out, color.with_alpha(a).to_pixel().0);
                }
                out
            }
        }
    }
}

fn radial_spot(layer: &RadialLayer, size: Canvas) -> (Point, f64, Color) {
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let center = Point::new(layer.center_x * w, layer.center_y * h);
    let farthest = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ]
    .into_iter()
    .map(|corner| center.distance(corner))
    .fold(0.0, f64::max);
    (center, (farthest * layer.extent).max(f64::EPSILON), layer.color)
}

/// Color at `pos` along a stop list. Equal neighbouring offsets make a hard edge.
pub fn sample_stops(stops: &[ColorStop], pos: f64) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if pos <= first.offset {
        return first.color;
    }
    for w in stops.windows(2) {
        if pos < w[1].offset {
            let span = w[1].offset - w[0].offset;
            if span <= 0.0 {
                return w[1].color;
            }
            return w[0].color.lerp(w[1].color, (pos - w[0].offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
