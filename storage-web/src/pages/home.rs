//! Home Page - shows the contract section once a wallet is connected

use leptos::prelude::*;

use crate::components::StorageSection;
use crate::state::wallet::use_wallet_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let connected = Memo::new(move |_| wallet_ctx.is_connected());

    view! {
        <main class="home">
            <h2 class="welcome">"Welcome to the SimpleStorage DApp"</h2>

            <Show
                when=move || connected.get()
                fallback=|| view! {
                    <p class="call-to-action">"Connect your wallet from the header to get started."</p>
                }
            >
                <StorageSection/>
            </Show>
        </main>
    }
}
