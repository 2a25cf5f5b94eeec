use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div style="color: #ccc; text-align: center; margin-top: 20vh;">
			<h1>"Nothing here"</h1>
			<a href="/" style="color: #00ace0;">"Back to the explorer"</a>
		</div>
	}
}
