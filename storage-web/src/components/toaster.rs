//! Toast stack rendered in the corner of the page

use leptos::prelude::*;

use crate::state::notifications::use_notifications;

#[component]
pub fn Toaster() -> impl IntoView {
    let notifications = use_notifications();

    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For
                each=move || notifications.queue.with(|queue| queue.items().to_vec())
                key=|toast| (toast.id, toast.kind, toast.message.clone())
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", toast.kind.css_class())
                            on:click=move |_| notifications.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
