//! Storage Section - read and write the SimpleStorage contract
//!
//! Mounted only while a wallet is connected. The form and the gateway live in this
//! component's scope and are dropped on disconnect.

use leptos::prelude::*;
use shared::dto::{FormState, TxStatus};

use crate::config::AppConfig;
use crate::state::contract::ContractGateway;
use crate::state::notifications::use_notifications;
use crate::state::wallet::use_wallet_context;
use crate::utils::format::stored_number_label;

#[component]
pub fn StorageSection() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let wallet_ctx = use_wallet_context();
    let notifications = use_notifications();

    let contract = match config.contract_address() {
        Ok(address) => address,
        Err(e) => {
            log::error!("{}", e);
            return view! {
                <div class="storage-section">
                    <p class="error">"The SimpleStorage contract address is not configured correctly."</p>
                </div>
            }
            .into_any();
        }
    };

    let gateway = ContractGateway::new(
        contract,
        config.receipt_poll_interval_ms,
        wallet_ctx,
        notifications,
    );
    let form = RwSignal::new(FormState::default());

    let store_busy = move || gateway.store_tx.with(TxStatus::is_busy);
    let add_person_busy = move || gateway.add_person_tx.with(TxStatus::is_busy);

    view! {
        <div class="storage-section">
            <h2 class="section-title">"📦 SimpleStorage Contract"</h2>

            <p class="stored-number">
                "Current Favorite Number: "
                <span class="stored-number-value">
                    {move || stored_number_label(gateway.stored_number.get())}
                </span>
                <button class="btn btn-refresh" on:click=move |_| gateway.refetch()>
                    "Refresh"
                </button>
            </p>

            <div class="form-group">
                <input
                    type="number"
                    min="0"
                    step="1"
                    placeholder="Enter new favorite number"
                    prop:value=move || form.with(|f| f.favorite_number.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.favorite_number = value);
                    }
                />
                <button
                    class="btn btn-store"
                    disabled=store_busy
                    on:click=move |_| gateway.submit_store(form.with(FormState::store_call))
                >
                    "Store Favorite Number"
                </button>
                <TxStatusLine status=gateway.store_tx/>
            </div>

            <div class="form-group">
                <input
                    type="text"
                    placeholder="Person's name"
                    prop:value=move || form.with(|f| f.person_name.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.person_name = value);
                    }
                />
                <input
                    type="number"
                    min="0"
                    step="1"
                    placeholder="Their favorite number"
                    prop:value=move || form.with(|f| f.person_number.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.person_number = value);
                    }
                />
                <button
                    class="btn btn-add-person"
                    disabled=add_person_busy
                    on:click=move |_| gateway.submit_add_person(form.with(FormState::add_person_call))
                >
                    "Add Person"
                </button>
                <TxStatusLine status=gateway.add_person_tx/>
            </div>
        </div>
    }
    .into_any()
}

/// One-line status of a tracked write, hidden while idle.
#[component]
fn TxStatusLine(status: RwSignal<TxStatus>) -> impl IntoView {
    move || {
        status.with(|s| {
            s.label().map(|label| {
                let class = match s {
                    TxStatus::Failed { .. } | TxStatus::Reverted { .. } => "tx-status tx-error",
                    TxStatus::Mined { .. } => "tx-status tx-success",
                    _ => "tx-status tx-pending",
                };
                view! { <p class=class>{label}</p> }
            })
        })
    }
}
