//! Header - title plus wallet connection controls

use leptos::prelude::*;
use shared::dto::HeaderMode;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn Header() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let mode = Memo::new(move |_| wallet_ctx.session.with(|session| HeaderMode::from(session)));

    view! {
        <header class="app-header">
            <h1 class="app-title">"📦 SimpleStorage DApp"</h1>

            {move || match mode.get() {
                HeaderMode::InstallPrompt => view! {
                    <div class="install-prompt">"Install MetaMask"</div>
                }.into_any(),
                HeaderMode::Connect { pending } => view! {
                    <button
                        class="btn btn-connect"
                        disabled=pending
                        on:click=move |_| wallet_ctx.connect()
                    >
                        {if pending { "Connecting..." } else { "Connect Wallet" }}
                    </button>
                }.into_any(),
                HeaderMode::Account { address, balance, symbol } => {
                    let full = address.to_string();
                    let title = full.clone();
                    view! {
                        <div class="account">
                            <span
                                class="account-address"
                                title=title
                                on:click=move |_| wallet_ctx.copy_address()
                            >
                                {full}
                            </span>
                            <span class="account-balance">
                                {format!("{} {}", balance, symbol.unwrap_or_default())}
                            </span>
                            <button
                                class="btn btn-disconnect"
                                on:click=move |_| wallet_ctx.disconnect()
                            >
                                "Disconnect"
                            </button>
                        </div>
                    }.into_any()
                }
                HeaderMode::Disconnecting => view! {
                    <div class="account">
                        <button class="btn btn-disconnect" disabled=true>
                            "Disconnecting..."
                        </button>
                    </div>
                }.into_any(),
            }}
        </header>
    }
}
