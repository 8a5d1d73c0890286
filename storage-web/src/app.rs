//! SimpleStorage dApp - Leptos Frontend
//!
//! Header with wallet controls, one page with the contract section, and a toast stack.

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::{Header, Toaster};
use crate::config::AppConfig;
use crate::pages::HomePage;
use crate::state::notifications::provide_notification_context;
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let notifications = provide_notification_context(config.toast_duration_ms);
    provide_wallet_context(&config, notifications);
    provide_context(config);

    // backup for the loading screen in case the wasm start hook ran before the DOM was ready
    Effect::new(move || {
        crate::hide_loading_screen();
    });

    view! {
        <Router>
            <div class="app-container">
                <Header/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=HomePage/>
                </Routes>
                <Toaster/>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card not-found">
            <h1>"404 - Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href="/">
                <span class="btn">"Go to Home"</span>
            </A>
        </div>
    }
}
