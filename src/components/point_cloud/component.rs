use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::clipboard;
use super::interaction::{Action, Tooltip, place_tooltip};
use super::loader;
use super::palette::ColorMode;
use super::render;
use super::state::{PointCloudState, PointerKind};
use crate::config::VisualizerConfig;

#[derive(Clone, Debug, PartialEq)]
enum LoadStatus {
	Loading,
	Ready(usize),
	Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
enum Notice {
	Copied,
	CopyFailed(String),
}

/// DOM overlays fed by dispatcher actions.
#[derive(Clone, Copy)]
struct Overlay {
	tooltip: RwSignal<Option<Tooltip>>,
	notice: RwSignal<Option<Notice>>,
}

impl Overlay {
	fn apply(self, actions: Vec<Action>) {
		for action in actions {
			match action {
				Action::ShowTooltip(tooltip) => self.tooltip.set(Some(tooltip)),
				Action::HideTooltip => {
					if self.tooltip.with_untracked(Option::is_some) {
						self.tooltip.set(None);
					}
				}
				Action::CopyToClipboard(text) => self.copy(text),
				Action::DismissTitle => info!("title dismissed"),
				Action::FreezeRotation => info!("auto-rotation stopped"),
				Action::Highlight(_) => {}
			}
		}
	}

	fn copy(self, text: String) {
		let notice = self.notice;
		spawn_local(async move {
			let result = clipboard::write_text(&text).await;
			notice.set(Some(match result {
				Ok(()) => {
					info!("prompt copied to clipboard");
					Notice::Copied
				}
				Err(err) => {
					warn!("{err}");
					Notice::CopyFailed(err.to_string())
				}
			}));
			set_timeout(move || notice.set(None), Duration::from_secs(2));
		});
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0))
}

fn canvas_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn PointCloudCanvas(config: VisualizerConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip_ref = NodeRef::<leptos::html::Div>::new();
	let state = Rc::new(RefCell::new(PointCloudState::new(&config, 800.0, 600.0)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let status = RwSignal::new(LoadStatus::Loading);
	let reload = RwSignal::new(0u32);
	let title_opacity = RwSignal::new(Some(1.0));
	let color_mode = RwSignal::new(ColorMode::Original);
	let overlay = Overlay {
		tooltip: RwSignal::new(None),
		notice: RwSignal::new(None),
	};

	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animate_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window");
			return;
		};
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};

		let (w, h) = window_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().resize(w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = window_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().resize(nw, nh);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			let opacity = {
				let mut s = state_anim.borrow_mut();
				s.tick(now);
				render::render(&s, &ctx);
				s.explorer.ui.title_opacity()
			};
			if title_opacity.get_untracked() != opacity {
				title_opacity.set(opacity);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (state_load, url, scale) = (state.clone(), config.data_url.clone(), config.position_scale);
	Effect::new(move |_| {
		let attempt = reload.get();
		let (state, url) = (state_load.clone(), url.clone());
		status.set(LoadStatus::Loading);
		spawn_local(async move {
			match loader::fetch_points(&url, scale).await {
				Ok(store) => {
					let count = store.len();
					state.borrow_mut().load(store);
					status.set(LoadStatus::Ready(count));
				}
				Err(err) => {
					error!("load attempt {attempt} failed: {err}");
					status.set(LoadStatus::Failed(err.to_string()));
				}
			}
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		s.drag.active = true;
		s.drag.last_x = x;
		s.drag.last_y = y;
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		let actions = {
			let mut s = state_mm.borrow_mut();
			if s.drag.active {
				let (dx, dy) = (x - s.drag.last_x, y - s.drag.last_y);
				s.camera.orbit(dx, dy);
				s.drag.last_x = x;
				s.drag.last_y = y;
			}
			s.pointer(PointerKind::Move, x, y)
		};
		overlay.apply(actions);
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().drag.active = false;
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().drag.active = false;
		overlay.apply(vec![Action::HideTooltip]);
	};

	let pointer = {
		let state = state.clone();
		move |kind: PointerKind, ev: &MouseEvent| {
			let Some((x, y)) = canvas_position(canvas_ref, ev) else {
				return;
			};
			let actions = state.borrow_mut().pointer(kind, x, y);
			overlay.apply(actions);
		}
	};

	let on_click = {
		let pointer = pointer.clone();
		move |ev: MouseEvent| {
			if ev.button() == 0 {
				pointer(PointerKind::Primary, &ev);
			}
		}
	};

	let on_contextmenu = {
		let pointer = pointer.clone();
		move |ev: MouseEvent| {
			ev.prevent_default();
			pointer(PointerKind::Secondary, &ev);
		}
	};

	let on_dblclick = move |ev: MouseEvent| {
		ev.prevent_default();
		pointer(PointerKind::Double, &ev);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		state_wh.borrow_mut().camera.zoom(ev.delta_y());
	};

	let state_color = state.clone();
	let on_toggle_color = move |_: MouseEvent| {
		let mode = state_color.borrow_mut().explorer.toggle_color_mode();
		info!("colour mode: {mode:?}");
		color_mode.set(mode);
	};

	let state_rotate = state.clone();
	let on_toggle_rotation = move |_: MouseEvent| {
		state_rotate.borrow_mut().explorer.ui.toggle_rotation();
	};

	let tooltip_position = move || {
		let tooltip = overlay.tooltip.get()?;
		let size = tooltip_ref
			.get_untracked()
			.map(|el| (el.offset_width() as f64, el.offset_height() as f64))
			.unwrap_or((240.0, 48.0));
		let viewport = web_sys::window()
			.map(|w| window_size(&w))
			.unwrap_or((800.0, 600.0));
		Some(place_tooltip(tooltip.anchor, size, viewport))
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="point-cloud-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:contextmenu=on_contextmenu
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>

		<Show when=move || title_opacity.get().is_some()>
			<div
				class="title-overlay"
				style="position: fixed; top: 40%; width: 100%; text-align: center; color: white; font-size: 2.5rem; pointer-events: none; transition: opacity 0.1s;"
				style:opacity=move || title_opacity.get().unwrap_or(0.0).to_string()
			>
				"Music Visualization Explorer"
			</div>
		</Show>

		{move || match status.get() {
			LoadStatus::Loading => Some(
				view! {
					<div class="loading" style="position: fixed; top: 50%; width: 100%; text-align: center; color: #aaa;">
						"Loading embeddings…"
					</div>
				}
				.into_any(),
			),
			LoadStatus::Failed(message) => Some(
				view! {
					<div class="error-banner" style="position: fixed; top: 1rem; left: 50%; transform: translateX(-50%); padding: 0.75rem 1rem; background: #5c1f1f; color: white; border-radius: 4px;">
						<span>"Could not load embeddings: " {message}</span>
						<button style="margin-left: 1rem;" on:click=move |_| reload.update(|n| *n += 1)>
							"Retry"
						</button>
					</div>
				}
				.into_any(),
			),
			LoadStatus::Ready(_) => None,
		}}

		<div
			node_ref=tooltip_ref
			class="tooltip"
			style="position: fixed; max-width: 320px; padding: 6px 8px; background: rgba(0, 0, 0, 0.75); color: white; font-size: 12px; border-radius: 4px; pointer-events: none;"
			style:display=move || if overlay.tooltip.with(Option::is_some) { "block" } else { "none" }
			style:left=move || format!("{}px", tooltip_position().map_or(0.0, |p| p.0))
			style:top=move || format!("{}px", tooltip_position().map_or(0.0, |p| p.1))
		>
			{move || {
				overlay
					.tooltip
					.get()
					.map(|t| {
						view! {
							<div>"Prompt: " {t.prompt}</div>
							<div>"Genre: " {t.genre}</div>
						}
					})
			}}
		</div>

		{move || {
			overlay
				.notice
				.get()
				.map(|notice| {
					let text = match notice {
						Notice::Copied => "Prompt copied to clipboard!".to_string(),
						Notice::CopyFailed(reason) => format!("Could not copy prompt: {reason}"),
					};
					view! {
						<div class="notice" style="position: fixed; bottom: 4rem; left: 50%; transform: translateX(-50%); padding: 0.5rem 1rem; background: rgba(0, 0, 0, 0.8); color: white; border-radius: 4px;">
							{text}
						</div>
					}
				})
		}}

		<div class="controls" style="position: fixed; bottom: 1rem; right: 1rem; display: flex; gap: 0.5rem;">
			<button on:click=on_toggle_color>
				{move || match color_mode.get() {
					ColorMode::Original => "Color by genre",
					ColorMode::ByGenre => "Original colors",
				}}
			</button>
			<button on:click=on_toggle_rotation>"Toggle rotation"</button>
		</div>
	}
}
