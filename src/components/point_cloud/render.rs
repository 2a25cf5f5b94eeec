use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::camera::Projected;
use super::highlight::Artifact;
use super::state::{AXES_LENGTH, POINT_RADIUS, PointCloudState};
use super::types::{Rgb, Vec3};

const BACKGROUND: &str = "#202020";

pub fn render(state: &PointCloudState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_axes(state, ctx);
	draw_points(state, ctx);
	draw_artifacts(state, ctx);
}

fn project(state: &PointCloudState, p: Vec3) -> Option<Projected> {
	state.camera.project(p, state.width, state.height)
}

fn draw_segment(state: &PointCloudState, ctx: &CanvasRenderingContext2d, from: Vec3, to: Vec3) {
	let (Some(a), Some(b)) = (project(state, from), project(state, to)) else {
		return;
	};
	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.stroke();
}

fn draw_axes(state: &PointCloudState, ctx: &CanvasRenderingContext2d) {
	let axes = [
		(Vec3::new(AXES_LENGTH, 0.0, 0.0), "#ff0000"),
		(Vec3::new(0.0, AXES_LENGTH, 0.0), "#00ff00"),
		(Vec3::new(0.0, 0.0, AXES_LENGTH), "#0000ff"),
	];
	ctx.set_line_width(1.0);
	for (end, color) in axes {
		ctx.set_stroke_style_str(color);
		draw_segment(state, ctx, Vec3::ZERO, end);
	}
}

fn draw_points(state: &PointCloudState, ctx: &CanvasRenderingContext2d) {
	let explorer = &state.explorer;
	// Painter's order: far to near.
	let mut visible: Vec<_> = explorer
		.store
		.iter()
		.filter_map(|(id, point)| project(state, point.position).map(|p| (id, p)))
		.collect();
	visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	for (id, p) in visible {
		let color = explorer.display_color(id);
		let radius = (POINT_RADIUS * p.scale).max(0.75);
		fill_shaded_disc(ctx, p.x, p.y, radius, color);
	}
}

/// Disc lit from the upper left, standing in for a shaded sphere.
fn fill_shaded_disc(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: Rgb) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	if radius < 2.0 {
		ctx.set_fill_style_str(&color.css());
		ctx.fill();
		return;
	}
	let (hx, hy) = (x - radius * 0.35, y - radius * 0.35);
	match ctx.create_radial_gradient(hx, hy, radius * 0.1, x, y, radius) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &color.css());
			let _ = gradient.add_color_stop(1.0, &color.shade(0.45).css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&color.css()),
	}
	ctx.fill();
}

fn draw_artifacts(state: &PointCloudState, ctx: &CanvasRenderingContext2d) {
	for (artifact, opacity) in state.explorer.highlighter.artifacts() {
		match *artifact {
			Artifact::Segment { from, to } => {
				ctx.set_stroke_style_str(&Rgb::WHITE.css_alpha(opacity));
				ctx.set_line_width(2.0);
				draw_segment(state, ctx, from, to);
			}
			Artifact::Arrow {
				origin,
				direction,
				length,
				head_length,
				head_width,
			} => draw_arrow(state, ctx, origin, direction, length, head_length, head_width, opacity),
			Artifact::Sphere { center, radius } => {
				let Some(p) = project(state, center) else {
					continue;
				};
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, radius * p.scale, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(&Rgb::HIGHLIGHT.css_alpha(opacity));
				ctx.fill();
			}
		}
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_arrow(
	state: &PointCloudState,
	ctx: &CanvasRenderingContext2d,
	origin: Vec3,
	direction: Vec3,
	length: f64,
	head_length: f64,
	head_width: f64,
	opacity: f64,
) {
	let tip_world = origin + direction.scale(length);
	let back_world = origin + direction.scale((length - head_length).max(0.0));
	let (Some(tip), Some(back)) = (project(state, tip_world), project(state, back_world)) else {
		return;
	};
	let color = Rgb::WHITE.css_alpha(opacity);
	ctx.set_stroke_style_str(&color);
	ctx.set_line_width(1.0);
	draw_segment(state, ctx, origin, back_world);

	let (dx, dy) = (tip.x - back.x, tip.y - back.y);
	let len = (dx * dx + dy * dy).sqrt();
	if len < 0.001 {
		return;
	}
	let half = head_width * back.scale * 0.5;
	let (px, py) = (-dy / len * half, dx / len * half);
	ctx.set_fill_style_str(&color);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back.x + px, back.y + py);
	ctx.line_to(back.x - px, back.y - py);
	ctx.close_path();
	ctx.fill();
}
