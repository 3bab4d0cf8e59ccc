use leptos::prelude::*;

use crate::notice::Notice;

/// Visible notices, each removed again once its duration elapses.
#[derive(Clone, Copy)]
pub struct NoticeQueue {
	items: RwSignal<Vec<(u64, Notice)>>,
	next_id: RwSignal<u64>,
}

impl Default for NoticeQueue {
	fn default() -> Self {
		Self::new()
	}
}

impl NoticeQueue {
	pub fn new() -> Self {
		Self {
			items: RwSignal::new(Vec::new()),
			next_id: RwSignal::new(0),
		}
	}

	pub fn push(&self, notice: Notice) {
		let id = self.next_id.get_untracked();
		self.next_id.set(id + 1);
		let duration = notice.duration;
		self.items.update(|items| items.push((id, notice)));

		let items = self.items;
		set_timeout(
			move || {
				items.try_update(|items| items.retain(|(i, _)| *i != id));
			},
			duration,
		);
	}
}

#[component]
pub fn NoticeStack(queue: NoticeQueue) -> impl IntoView {
	view! {
		<div class="notice-stack">
			<For
				each=move || queue.items.get()
				key=|(id, _)| *id
				children=move |(_, notice): (u64, Notice)| {
					view! {
						<div class=format!("notice indicator-{}", notice.severity.indicator())>
							{notice.message}
						</div>
					}
				}
			/>
		</div>
	}
}
