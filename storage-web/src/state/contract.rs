//! Contract gateway state
//!
//! Created by the storage section and dropped with it, so its signals (and the form)
//! disappear when the wallet disconnects.

use alloy_primitives::{Address, U256};
use leptos::prelude::*;
use shared::contract::ContractCall;
use shared::dto::{NotificationKind, TxStatus};
use shared::error::{AppError, Result};

use crate::services::contract;
use crate::state::notifications::NotificationContext;
use crate::state::wallet::WalletContext;
use crate::utils::format::short_hash;

#[derive(Clone, Copy)]
pub struct ContractGateway {
    pub stored_number: RwSignal<Option<U256>>,
    pub store_tx: RwSignal<TxStatus>,
    pub add_person_tx: RwSignal<TxStatus>,
    refresh: RwSignal<u64>,
    contract: Address,
    poll_interval_ms: u32,
    wallet: WalletContext,
    notifications: NotificationContext,
}

impl ContractGateway {
    /// Build the gateway and start the `retrieve()` query.
    pub fn new(
        contract: Address,
        poll_interval_ms: u32,
        wallet: WalletContext,
        notifications: NotificationContext,
    ) -> Self {
        let gateway = Self::untracked(contract, poll_interval_ms, wallet, notifications);
        gateway.track_stored_number();
        gateway
    }

    fn untracked(
        contract: Address,
        poll_interval_ms: u32,
        wallet: WalletContext,
        notifications: NotificationContext,
    ) -> Self {
        Self {
            stored_number: RwSignal::new(None),
            store_tx: RwSignal::new(TxStatus::Idle),
            add_person_tx: RwSignal::new(TxStatus::Idle),
            refresh: RwSignal::new(0),
            contract,
            poll_interval_ms,
            wallet,
            notifications,
        }
    }

    /// Re-run `retrieve()`.
    pub fn refetch(&self) {
        self.refresh.try_update(|n| *n += 1);
    }

    pub fn submit_store(&self, call: Result<ContractCall>) {
        self.submit(call, self.store_tx);
    }

    pub fn submit_add_person(&self, call: Result<ContractCall>) {
        self.submit(call, self.add_person_tx);
    }

    fn track_stored_number(&self) {
        let refresh = self.refresh;
        let stored_number = self.stored_number;
        let address = self.contract;

        Effect::new(move || {
            refresh.track();
            leptos::task::spawn_local(async move {
                match contract::read_stored_number(address).await {
                    Ok(value) => {
                        log::debug!("retrieve() = {}", value);
                        stored_number.try_set(Some(value));
                    }
                    // the display stays on its last value (or "Loading...")
                    Err(e) => log::error!("retrieve() failed: {}", e),
                }
            });
        });
    }

    fn submit(&self, call: Result<ContractCall>, tx: RwSignal<TxStatus>) {
        let notifications = self.notifications;

        let call = match call {
            Ok(call) => call,
            Err(err) => {
                log::warn!("rejected form input: {}", err);
                notifications.error(err.short_message());
                return;
            }
        };

        let Some(from) = self.wallet.address() else {
            let err = AppError::NotConnected;
            tx.try_update(|status| status.failed(&err));
            notifications.error(err.short_message());
            return;
        };

        match tx.try_update(|status| status.begin()) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                log::warn!("{} ignored: {}", call.function_name(), e);
                return;
            }
            None => return,
        }

        let name = call.function_name();
        let mut toast = notifications.loading(format!("Confirm {} in your wallet...", name));
        let gateway = *self;

        leptos::task::spawn_local(async move {
            let hash = match contract::send(gateway.contract, from, &call).await {
                Ok(hash) => hash,
                Err(err) => {
                    log::warn!("{} was not sent: {}", name, err);
                    tx.try_update(|status| status.failed(&err));
                    notifications.resolve(toast, NotificationKind::Error, err.short_message());
                    return;
                }
            };

            log::info!("{} submitted: {}", name, hash);
            if let Some(Err(e)) = tx.try_update(|status| status.submitted(hash.clone())) {
                log::error!("{} submitted out of order: {}", name, e);
            }
            toast = notifications.resolve(
                toast,
                NotificationKind::Loading,
                format!("Transaction {} pending...", short_hash(&hash)),
            );

            let receipt = match contract::wait_for_receipt(&hash, gateway.poll_interval_ms).await {
                Ok(receipt) => receipt,
                Err(err) => {
                    log::warn!("receipt for {} unavailable: {}", hash, err);
                    tx.try_update(|status| status.failed(&err));
                    notifications.resolve(toast, NotificationKind::Error, err.short_message());
                    return;
                }
            };

            match tx.try_update(|status| status.settle(&receipt)) {
                Some(Ok(())) => {
                    log::info!("{} mined: {}", name, hash);
                    notifications.resolve(
                        toast,
                        NotificationKind::Success,
                        format!("{} confirmed", name),
                    );
                    gateway.refetch();
                    gateway.wallet.refresh_balance();
                }
                Some(Err(err)) => {
                    log::warn!("{} failed on chain: {}", name, err);
                    notifications.resolve(toast, NotificationKind::Error, err.short_message());
                    gateway.wallet.refresh_balance();
                }
                // the section was unmounted; only the toast is left to settle
                None => {
                    notifications.resolve(
                        toast,
                        NotificationKind::Info,
                        format!("{} settled", name),
                    );
                }
            }
        });
    }
}
