//! Immediate-mode drawing surface used by the renderer.
//!
//! The renderer only talks to [`DrawingSurface`]. [`CanvasSurface`] implements it
//! on top of a browser 2D canvas context.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{BoundingBox, Point};

/// Fill color and opacity for a node shape.
#[derive(Clone, Debug, PartialEq)]
pub struct FillStyle {
	pub fill: String,
	pub alpha: f64,
}

impl FillStyle {
	/// `"none"` leaves the shape unpainted.
	pub fn is_visible(&self) -> bool {
		self.fill != "none"
	}
}

/// 2D drawing operations needed to paint a graph frame.
pub trait DrawingSurface {
	/// Erase the whole surface.
	fn clear(&mut self);
	/// Filled ellipse inscribed in `rect`.
	fn oval(&mut self, rect: BoundingBox, style: &FillStyle);
	/// Filled rectangle with rounded corners.
	fn rounded_rect(&mut self, rect: BoundingBox, radius: f64, style: &FillStyle);
	/// Width of `text` when drawn in `font`.
	fn measure_text(&mut self, text: &str, font: &str) -> f64;
	/// Draw `text` horizontally centred on `at.x` with its baseline at `at.y`.
	fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str);
	/// Stroke a straight line without filling.
	fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64);
	/// Fill the closed polygon through `points`.
	fn fill_polygon(&mut self, points: &[Point], color: &str);
	/// Erase a rectangle in the current transform.
	fn clear_rect(&mut self, rect: BoundingBox);
	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, by: Point);
	fn rotate(&mut self, angle: f64);
}

/// [`DrawingSurface`] backed by a canvas 2D context.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl CanvasSurface {
	pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
		Self { ctx, width, height }
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn begin_fill(&self, style: &FillStyle) {
		self.ctx.save();
		self.ctx.set_global_alpha(style.alpha);
		self.ctx.set_fill_style_str(&style.fill);
		self.ctx.begin_path();
	}

	fn end_fill(&self) {
		self.ctx.fill();
		self.ctx.restore();
	}
}

impl DrawingSurface for CanvasSurface {
	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
	}

	fn oval(&mut self, rect: BoundingBox, style: &FillStyle) {
		if !style.is_visible() {
			return;
		}
		let center = rect.center();
		self.begin_fill(style);
		let _ = self.ctx.ellipse(
			center.x,
			center.y,
			rect.width / 2.0,
			rect.height / 2.0,
			0.0,
			0.0,
			2.0 * PI,
		);
		self.end_fill();
	}

	fn rounded_rect(&mut self, rect: BoundingBox, radius: f64, style: &FillStyle) {
		if !style.is_visible() {
			return;
		}
		let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
		let (left, top) = (rect.x, rect.y);
		let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);

		self.begin_fill(style);
		self.ctx.move_to(left + r, top);
		self.ctx.line_to(right - r, top);
		self.ctx.quadratic_curve_to(right, top, right, top + r);
		self.ctx.line_to(right, bottom - r);
		self.ctx.quadratic_curve_to(right, bottom, right - r, bottom);
		self.ctx.line_to(left + r, bottom);
		self.ctx.quadratic_curve_to(left, bottom, left, bottom - r);
		self.ctx.line_to(left, top + r);
		self.ctx.quadratic_curve_to(left, top, left + r, top);
		self.ctx.close_path();
		self.end_fill();
	}

	fn measure_text(&mut self, text: &str, font: &str) -> f64 {
		self.ctx.set_font(font);
		self.ctx
			.measure_text(text)
			.map(|metrics| metrics.width())
			.unwrap_or(0.0)
	}

	fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str) {
		self.ctx.set_font(font);
		self.ctx.set_text_align("center");
		self.ctx.set_fill_style_str(color);
		let _ = self.ctx.fill_text(text, at.x, at.y);
	}

	fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64) {
		self.ctx.begin_path();
		self.ctx.set_line_width(width);
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_fill_style_str("rgba(0, 0, 0, 0)");
		let _ = self.ctx.set_line_dash(&js_sys::Array::new());
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.ctx.stroke();
	}

	fn fill_polygon(&mut self, points: &[Point], color: &str) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};
		self.ctx.set_fill_style_str(color);
		self.ctx.begin_path();
		self.ctx.move_to(first.x, first.y);
		for p in rest {
			self.ctx.line_to(p.x, p.y);
		}
		self.ctx.close_path();
		self.ctx.fill();
	}

	fn clear_rect(&mut self, rect: BoundingBox) {
		self.ctx.clear_rect(rect.x, rect.y, rect.width, rect.height);
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn translate(&mut self, by: Point) {
		let _ = self.ctx.translate(by.x, by.y);
	}

	fn rotate(&mut self, angle: f64) {
		let _ = self.ctx.rotate(angle);
	}
}
