use leptos::prelude::*;

use crate::components::point_cloud::PointCloudCanvas;
use crate::config::VisualizerConfig;

#[component]
fn ExplorerPage(config: VisualizerConfig) -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="fullscreen-cloud" style="position: fixed; inset: 0; overflow: hidden; background: #202020;">
				<PointCloudCanvas config=config />
			</div>
		</ErrorBoundary>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! { <ExplorerPage config=VisualizerConfig::default() /> }
}

/// Long-hold presentation variant
#[component]
pub fn LongHold() -> impl IntoView {
	view! { <ExplorerPage config=VisualizerConfig::long_hold() /> }
}
