use sweeper_core::{Coord, Coord2, Glyph, Renderer, number_color};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const COVERED_FILL: &str = "lightgrey";
const OPEN_FILL: &str = "white";
const GRID_STROKE: &str = "grey";
const FLAG_FILL: &str = "crimson";
const MINE_FILL: &str = "black";

/// Top-left pixel of a cell.
pub(crate) fn cell_origin((x, y): Coord2, cell_len: f64) -> (f64, f64) {
    (f64::from(x) * cell_len, f64::from(y) * cell_len)
}

/// Draws board cells onto a square `<canvas>`.
pub(crate) struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    cell_len: f64,
}

impl CanvasRenderer {
    pub(crate) fn attach(canvas: &HtmlCanvasElement, size: Coord) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let cell_len = f64::from(canvas.width()) / f64::from(size.max(1));
        Ok(Self { ctx, cell_len })
    }

    fn paint(&self, coords: Coord2, glyph: Glyph) -> Result<(), JsValue> {
        let (x, y) = cell_origin(coords, self.cell_len);
        let len = self.cell_len;
        let ctx = &self.ctx;

        ctx.set_fill_style_str(match glyph {
            Glyph::Blank | Glyph::Flag => COVERED_FILL,
            Glyph::Mine | Glyph::Cleared | Glyph::Number(_) => OPEN_FILL,
        });
        ctx.fill_rect(x, y, len, len);
        ctx.set_stroke_style_str(GRID_STROKE);
        ctx.stroke_rect(x, y, len, len);

        match glyph {
            Glyph::Blank | Glyph::Cleared => Ok(()),
            Glyph::Flag => self.label(coords, "⚑", FLAG_FILL),
            Glyph::Mine => self.label(coords, "✹", MINE_FILL),
            Glyph::Number(count) => {
                let color = number_color(count).unwrap_or(MINE_FILL);
                self.label(coords, &count.to_string(), color)
            }
        }
    }

    fn label(&self, coords: Coord2, text: &str, color: &str) -> Result<(), JsValue> {
        let (x, y) = cell_origin(coords, self.cell_len);
        let half = self.cell_len / 2.0;
        let ctx = &self.ctx;

        ctx.set_font(&format!("bold {}px sans-serif", (self.cell_len * 0.6).round()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(color);
        ctx.fill_text(text, x + half, y + half)
    }
}

impl Renderer for CanvasRenderer {
    fn draw_cell(&mut self, coords: Coord2, glyph: Glyph) {
        if let Err(err) = self.paint(coords, glyph) {
            log::error!("failed to draw {coords:?} as {glyph:?}: {err:?}");
        }
    }
}
