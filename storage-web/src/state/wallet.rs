//! Wallet state management
//!
//! One [`WalletContext`] owns the [`Session`]. Components read it through the signal and
//! change it only through [`WalletContext::connect`] and [`WalletContext::disconnect`]
//! (plus provider-driven account events).

use alloy_primitives::Address;
use leptos::prelude::*;
use shared::dto::{AccountChange, Balance, NotificationKind, Session};
use shared::error::{AppError, Result};
use shared::utils::truncate_address;

use crate::config::AppConfig;
use crate::services::wallet;
use crate::state::notifications::NotificationContext;

const CONNECT_PENDING: &str = "Waiting for wallet confirmation...";
const CONNECT_SUCCESS: &str = "Wallet connected! Now you can interact with the DApp.";
const CONNECT_FAILED: &str = "Failed to connect to wallet";
const DISCONNECTED: &str = "Disconnected, see you later!";

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub session: RwSignal<Session>,
    balance_epoch: RwSignal<u64>,
    notifications: NotificationContext,
}

impl WalletContext {
    pub fn new(has_provider: bool, notifications: NotificationContext) -> Self {
        Self {
            session: RwSignal::new(Session::detect(has_provider)),
            balance_epoch: RwSignal::new(0),
            notifications,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.with(|session| session.is_connected())
    }

    pub fn address(&self) -> Option<Address> {
        self.session.with(|session| session.address())
    }

    /// Run the connect handshake. A no-op while one is already pending.
    pub fn connect(&self) {
        match self.session.try_update(|session| session.begin_connect()) {
            Some(Ok(())) => {}
            Some(Err(AppError::NoProvider)) => {
                self.notifications.error("Install MetaMask");
                return;
            }
            Some(Err(e)) => {
                log::warn!("connect ignored: {}", e);
                return;
            }
            None => return,
        }

        log::info!("Connecting to injected wallet");
        let toast = self.notifications.loading(CONNECT_PENDING);
        let ctx = *self;

        leptos::task::spawn_local(async move {
            let result = wallet::request_accounts().await.and_then(|accounts| {
                accounts.first().copied().ok_or_else(|| {
                    AppError::Provider(shared::error::ProviderError::new(
                        None,
                        Some("The wallet returned no accounts".to_string()),
                    ))
                })
            });

            ctx.connect_settled(toast, result);
        });
    }

    /// Apply the outcome of `eth_requestAccounts` and settle the pending toast.
    fn connect_settled(&self, toast: u64, result: Result<Address>) {
        match result {
            Ok(address) => {
                let applied = self
                    .session
                    .try_update(|session| session.connect_succeeded(address));
                if let Some(Err(e)) = applied {
                    log::error!("connect resolved out of order: {}", e);
                    self.notifications
                        .resolve(toast, NotificationKind::Error, CONNECT_FAILED);
                    return;
                }
                log::info!("Connected {}", address);
                self.notifications
                    .resolve(toast, NotificationKind::Success, CONNECT_SUCCESS);
            }
            Err(err) => {
                log::warn!("Failed to connect: {}", err);
                if let Some(Err(e)) = self.session.try_update(|session| session.connect_failed()) {
                    log::error!("connect failure arrived out of order: {}", e);
                }
                self.notifications
                    .resolve(toast, NotificationKind::Error, connect_error_message(&err));
            }
        }
    }

    /// Tear down the session. Address and balance are cleared once the provider settles,
    /// whatever the outcome.
    pub fn disconnect(&self) {
        let address = match self.session.try_update(|session| session.begin_disconnect()) {
            Some(Ok(address)) => address,
            Some(Err(e)) => {
                log::warn!("disconnect ignored: {}", e);
                return;
            }
            None => return,
        };

        log::info!("Disconnecting {}", address);
        let ctx = *self;

        leptos::task::spawn_local(async move {
            let revoked = wallet::revoke_permissions().await;
            ctx.disconnect_settled(revoked);
        });
    }

    fn disconnect_settled(&self, revoked: Result<()>) {
        if let Err(e) = revoked {
            log::debug!("permission revoke failed, clearing session locally: {}", e);
        }
        self.session.try_update(|session| session.disconnect_settled());
        self.notifications.warning(DISCONNECTED);
    }

    /// Re-query the balance of the current account.
    pub fn refresh_balance(&self) {
        self.balance_epoch.try_update(|epoch| *epoch += 1);
    }

    pub fn copy_address(&self) {
        let Some(address) = self.address() else {
            return;
        };
        let notifications = self.notifications;

        leptos::task::spawn_local(async move {
            match wallet::copy_text(&address.to_string()).await {
                Ok(()) => {
                    notifications.success("Address copied to clipboard!");
                }
                Err(e) => {
                    log::warn!("clipboard write failed: {}", e);
                    notifications.error("Could not copy the address");
                }
            }
        });
    }

    /// Keep the balance in sync with the active address.
    fn track_balance(&self, config: &AppConfig) {
        let session = self.session;
        let epoch = self.balance_epoch;
        let symbol = config.native_symbol.clone();
        let decimals = config.native_decimals;

        // only address changes (not balance writes) should re-run the query
        let address = Memo::new(move |_| session.with(|session| session.address()));

        Effect::new(move || {
            epoch.track();
            let Some(owner) = address.get() else {
                return;
            };
            let symbol = symbol.clone();

            leptos::task::spawn_local(async move {
                match wallet::get_balance(owner).await {
                    Ok(value) => {
                        let balance = Balance::new(value, decimals, symbol);
                        let applied = session.try_update(|session| session.set_balance(owner, balance));
                        if applied == Some(false) {
                            log::debug!("dropped balance for inactive account {}", owner);
                        }
                    }
                    Err(e) => log::warn!("balance query for {} failed: {}", owner, e),
                }
            });
        });
    }

    /// Follow account switches and removals made inside the wallet extension.
    fn watch_provider_accounts(&self) {
        let session = self.session;
        let notifications = self.notifications;

        wallet::watch_accounts(move |accounts| {
            match session.try_update(|session| session.accounts_changed(&accounts)) {
                Some(AccountChange::Switched(address)) => {
                    log::info!("Wallet switched to {}", address);
                    notifications.info(format!(
                        "Switched to {}",
                        truncate_address(&address.to_string())
                    ));
                }
                Some(AccountChange::Disconnected) => {
                    log::info!("Wallet disconnected by the provider");
                    notifications.warning(DISCONNECTED);
                }
                Some(AccountChange::Unchanged) | None => {}
            }
        });
    }
}

/// Notification text for a failed connect: the provider's short message if it has one.
pub fn connect_error_message(err: &AppError) -> String {
    match err {
        AppError::Provider(provider) => provider
            .short_message()
            .unwrap_or_else(|| CONNECT_FAILED.to_string()),
        other => other.short_message(),
    }
}

pub fn provide_wallet_context(
    config: &AppConfig,
    notifications: NotificationContext,
) -> WalletContext {
    let has_provider = wallet::hasInjectedProvider();
    log::info!("Injected wallet provider detected: {}", has_provider);

    let context = WalletContext::new(has_provider, notifications);
    if has_provider {
        context.track_balance(config);
        context.watch_provider_accounts();
    }
    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use shared::dto::WalletState;
    use shared::error::ProviderError;

    const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn wallet(has_provider: bool) -> WalletContext {
        WalletContext::new(has_provider, NotificationContext::new(0))
    }

    fn toasts(ctx: &WalletContext) -> Vec<(NotificationKind, String)> {
        ctx.notifications.queue.with(|queue| {
            queue
                .items()
                .iter()
                .map(|n| (n.kind, n.message.clone()))
                .collect()
        })
    }

    fn connected() -> WalletContext {
        let ctx = wallet(true);
        ctx.session.update(|session| {
            session.begin_connect().unwrap();
            session.connect_succeeded(ALICE).unwrap();
        });
        ctx
    }

    #[test]
    fn test_connect_without_provider_prompts_install() {
        let ctx = wallet(false);
        ctx.connect();
        assert_eq!(ctx.session.with(|s| s.state()), WalletState::NoProvider);
        assert_eq!(
            toasts(&ctx),
            vec![(NotificationKind::Error, "Install MetaMask".to_string())]
        );
    }

    #[test]
    fn test_rejected_connect_returns_to_detected() {
        let ctx = wallet(true);
        ctx.session.update(|session| session.begin_connect().unwrap());
        let toast = ctx.notifications.loading(CONNECT_PENDING);

        let rejection = AppError::Provider(ProviderError::new(Some(4001), None));
        ctx.connect_settled(toast, Err(rejection));

        assert_eq!(ctx.session.with(|s| s.state()), WalletState::ProviderDetected);
        assert!(!ctx.is_connected());
        assert_eq!(
            toasts(&ctx),
            vec![(NotificationKind::Error, "User rejected the request.".to_string())]
        );
    }

    #[test]
    fn test_successful_connect_shows_address() {
        let ctx = wallet(true);
        ctx.session.update(|session| session.begin_connect().unwrap());
        let toast = ctx.notifications.loading(CONNECT_PENDING);

        ctx.connect_settled(toast, Ok(ALICE));

        assert!(ctx.is_connected());
        assert_eq!(ctx.address(), Some(ALICE));
        assert_eq!(
            toasts(&ctx),
            vec![(NotificationKind::Success, CONNECT_SUCCESS.to_string())]
        );
    }

    #[test]
    fn test_late_connect_settles_loading_toast() {
        // the session was never moved to Connecting, so the success cannot apply
        let ctx = wallet(true);
        let toast = ctx.notifications.loading(CONNECT_PENDING);

        ctx.connect_settled(toast, Ok(ALICE));

        assert!(!ctx.is_connected());
        assert_eq!(
            toasts(&ctx),
            vec![(NotificationKind::Error, CONNECT_FAILED.to_string())]
        );
    }

    #[test]
    fn test_disconnect_clears_session_even_if_revoke_fails() {
        let ctx = connected();
        ctx.session.update(|session| {
            session.begin_disconnect().unwrap();
        });
        ctx.disconnect_settled(Err(AppError::Provider(ProviderError::new(
            Some(-32601),
            Some("Method not found".to_string()),
        ))));

        assert!(!ctx.is_connected());
        assert_eq!(ctx.address(), None);
        assert!(ctx.session.with(|s| s.balance().is_none()));
        assert_eq!(
            toasts(&ctx),
            vec![(NotificationKind::Warning, DISCONNECTED.to_string())]
        );
    }

    #[test]
    fn test_disconnect_requires_connection() {
        let ctx = wallet(true);
        ctx.disconnect();
        assert_eq!(ctx.session.with(|s| s.state()), WalletState::ProviderDetected);
        assert!(toasts(&ctx).is_empty());
    }

    #[test]
    fn test_connect_error_uses_short_message() {
        let err = AppError::Provider(ProviderError::new(Some(4001), None));
        assert_eq!(connect_error_message(&err), "User rejected the request.");
    }

    #[test]
    fn test_connect_error_fallback() {
        let err = AppError::Provider(ProviderError::default());
        assert_eq!(connect_error_message(&err), CONNECT_FAILED);
    }
}
