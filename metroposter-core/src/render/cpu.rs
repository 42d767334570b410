use std::sync::Arc;

use crate::compose::scene::PosterScene;
use crate::foundation::color::Color;
use crate::foundation::error::{PosterError, PosterResult};
use crate::overlay::spec::{HAlign, OverlaySpec};
use crate::overlay::text::{FontLibrary, TextBrush, TypeEngine};
use crate::render::paper::Dpi;

/// A rendered poster frame as straight RGBA8 pixels.
///
/// The canvas background is opaque and every draw composites over it, so the
/// buffer is fully opaque and straight/premultiplied representations agree.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Expected byte length for the frame dimensions.
    pub fn expected_len(width: u32, height: u32) -> PosterResult<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PosterError::render("frame buffer size overflow"))
    }
}

/// CPU rasterizer turning a composed scene plus overlay into pixels.
///
/// Holds its render context and type engine across runs so repeated
/// generations reuse allocations.
pub struct Rasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    type_engine: TypeEngine,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// A fresh rasterizer.
    pub fn new() -> Self {
        Self {
            ctx: None,
            type_engine: TypeEngine::new(),
        }
    }

    /// Render `scene` and `overlay` at `dpi` into an opaque RGBA8 frame.
    pub fn render(
        &mut self,
        scene: &PosterScene,
        overlay: &OverlaySpec,
        fonts: &FontLibrary,
        dpi: Dpi,
    ) -> PosterResult<FrameRgba> {
        let width: u16 = scene
            .width_px
            .try_into()
            .map_err(|_| PosterError::render("canvas width exceeds u16"))?;
        let height: u16 = scene
            .height_px
            .try_into()
            .map_err(|_| PosterError::render("canvas height exceeds u16"))?;
        let w = f64::from(scene.width_px);
        let h = f64::from(scene.height_px);

        // Shape all text up front; the draw loop below only consumes layouts.
        let mut placed = Vec::with_capacity(overlay.texts.len());
        for spec in &overlay.texts {
            let size_px = dpi.pt_to_px(spec.size_pt) as f32;
            let c = spec.color.with_alpha(spec.alpha);
            let brush = TextBrush {
                r: c.r,
                g: c.g,
                b: c.b,
                a: c.a,
            };
            let layout = self
                .type_engine
                .layout(&spec.text, fonts, spec.role, size_px, brush)?;
            let line_w = f64::from(layout.width());
            let line_h = f64::from(layout.height());
            let x = match spec.anchor.align {
                HAlign::Center => spec.anchor.x_frac * w - line_w / 2.0,
                HAlign::Right => spec.anchor.x_frac * w - line_w,
            };
            let y = (1.0 - spec.anchor.y_frac) * h - line_h;
            placed.push((layout, x, y));
        }

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();

        // Background fills the full frame with no margins.
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint_color(scene.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        for fill in &scene.fills {
            ctx.set_paint(paint_color(fill.color));
            ctx.fill_path(&bezpath_to_cpu(&fill.path));
        }

        for stroke in &scene.strokes {
            ctx.set_paint(paint_color(stroke.color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(dpi.pt_to_px(stroke.width_pt)));
            ctx.stroke_path(&bezpath_to_cpu(&stroke.path));
        }

        for fade in &overlay.fades {
            let (top_y, zone_h) = fade.zone_px(scene.height_px);
            if zone_h == 0 {
                continue;
            }
            let ramp = fade.ramp_premul_bytes(scene.width_px, zone_h);
            let img = rgba_premul_to_image(&ramp, scene.width_px, zone_h)?;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((0.0, f64::from(top_y))));
            ctx.set_paint(img);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                w,
                f64::from(zone_h),
            ));
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for rule in &overlay.rules {
            let y = (1.0 - rule.y_frac) * h;
            let half = dpi.pt_to_px(rule.width_pt) / 2.0;
            ctx.set_paint(paint_color(rule.color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rule.x0_frac * w,
                y - half,
                rule.x1_frac * w,
                y + half,
            ));
        }

        for (layout, x, y) in &placed {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((*x, *y)));
            draw_layout(&mut ctx, layout);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        let data = pixmap.data_as_u8_slice().to_vec();
        self.ctx = Some(ctx);

        if data.len() != FrameRgba::expected_len(scene.width_px, scene.height_px)? {
            return Err(PosterError::render("rasterized buffer size mismatch"));
        }
        Ok(FrameRgba {
            width: scene.width_px,
            height: scene.height_px,
            data,
        })
    }
}

fn draw_layout(ctx: &mut vello_cpu::RenderContext, layout: &parley::Layout<TextBrush>) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let font = font_data_for_run(&run);
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn font_data_for_run(
    run: &parley::layout::GlyphRun<'_, TextBrush>,
) -> vello_cpu::peniko::FontData {
    // Copying the font bytes keeps this independent of blob-type versions
    // between the layout and raster crates.
    let font = run.run().font();
    vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font.data.as_ref().to_vec()),
        font.index,
    )
}

fn paint_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosterError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosterError::render("pixmap height exceeds u16"))?;
    if bytes.len() != FrameRgba::expected_len(width, height)? {
        return Err(PosterError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
