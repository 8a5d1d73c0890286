//! # Wallet Session
//!
//! The session is the dApp's local record of a wallet connection. It is a small state
//! machine; every mutation goes through one of the lifecycle methods on [`Session`].
//!
//! ```text
//! NoProvider (terminal)
//! ProviderDetected ──connect──▶ Connecting ──ok──▶ Connected ──disconnect──▶ Disconnecting
//!        ▲                          │                  │                          │
//!        └────────── failed ────────┘                  └── accounts removed ──────┤
//!        └──────────────────────────── settled ──────────────────────────────────┘
//! ```

use alloy_primitives::{Address, U256};

use crate::error::{AppError, Result};
use crate::utils::display_balance;

/// Native-token balance of the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub value: U256,
    pub decimals: u8,
    pub symbol: String,
}

impl Balance {
    pub fn new(value: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            value,
            decimals,
            symbol: symbol.into(),
        }
    }
}

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletState {
    NoProvider,
    ProviderDetected,
    Connecting,
    Connected { address: Address },
    Disconnecting { address: Address },
}

impl WalletState {
    pub fn name(&self) -> &'static str {
        match self {
            WalletState::NoProvider => "no-provider",
            WalletState::ProviderDetected => "provider-detected",
            WalletState::Connecting => "connecting",
            WalletState::Connected { .. } => "connected",
            WalletState::Disconnecting { .. } => "disconnecting",
        }
    }
}

/// Outcome of an `accountsChanged` event from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChange {
    /// Nothing to do: not connected, or the active account did not change.
    Unchanged,
    /// The provider switched to another account.
    Switched(Address),
    /// The provider removed every account; the session is gone.
    Disconnected,
}

/// Wallet session: lifecycle state plus the balance of the active account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: WalletState,
    balance: Option<Balance>,
}

impl Session {
    /// Build the initial session from provider detection.
    pub fn detect(has_provider: bool) -> Self {
        let state = if has_provider {
            WalletState::ProviderDetected
        } else {
            WalletState::NoProvider
        };
        Self { state, balance: None }
    }

    pub fn state(&self) -> WalletState {
        self.state
    }

    pub fn has_provider(&self) -> bool {
        !matches!(self.state, WalletState::NoProvider)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, WalletState::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self.state, WalletState::Connecting)
    }

    pub fn is_disconnecting(&self) -> bool {
        matches!(self.state, WalletState::Disconnecting { .. })
    }

    /// Address of the active account, only while connected.
    pub fn address(&self) -> Option<Address> {
        match self.state {
            WalletState::Connected { address } => Some(address),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<&Balance> {
        self.balance.as_ref()
    }

    /// Start a connect handshake. Rejects a second handshake while one is pending.
    pub fn begin_connect(&mut self) -> Result<()> {
        match self.state {
            WalletState::ProviderDetected => {
                self.state = WalletState::Connecting;
                Ok(())
            }
            WalletState::NoProvider => Err(AppError::NoProvider),
            WalletState::Connecting => Err(AppError::Busy("connect".to_string())),
            other => Err(AppError::InvalidTransition(format!(
                "cannot connect while {}",
                other.name()
            ))),
        }
    }

    pub fn connect_succeeded(&mut self, address: Address) -> Result<()> {
        match self.state {
            WalletState::Connecting => {
                self.state = WalletState::Connected { address };
                self.balance = None;
                Ok(())
            }
            other => Err(AppError::InvalidTransition(format!(
                "connect resolved while {}",
                other.name()
            ))),
        }
    }

    pub fn connect_failed(&mut self) -> Result<()> {
        match self.state {
            WalletState::Connecting => {
                self.state = WalletState::ProviderDetected;
                Ok(())
            }
            other => Err(AppError::InvalidTransition(format!(
                "connect failed while {}",
                other.name()
            ))),
        }
    }

    /// Start tearing down the session. The balance is dropped immediately.
    pub fn begin_disconnect(&mut self) -> Result<Address> {
        match self.state {
            WalletState::Connected { address } => {
                self.state = WalletState::Disconnecting { address };
                self.balance = None;
                Ok(address)
            }
            WalletState::Disconnecting { .. } => Err(AppError::Busy("disconnect".to_string())),
            _ => Err(AppError::NotConnected),
        }
    }

    /// Finish a disconnect. Applies whether the provider call succeeded or not.
    pub fn disconnect_settled(&mut self) {
        if self.has_provider() {
            self.state = WalletState::ProviderDetected;
        }
        self.balance = None;
    }

    /// Apply a provider `accountsChanged` notification.
    pub fn accounts_changed(&mut self, accounts: &[Address]) -> AccountChange {
        let current = match self.state {
            WalletState::Connected { address } => address,
            _ => return AccountChange::Unchanged,
        };

        match accounts.first() {
            None => {
                self.state = WalletState::ProviderDetected;
                self.balance = None;
                AccountChange::Disconnected
            }
            Some(&next) if next == current => AccountChange::Unchanged,
            Some(&next) => {
                self.state = WalletState::Connected { address: next };
                self.balance = None;
                AccountChange::Switched(next)
            }
        }
    }

    /// Store a balance result. Results for an account that is no longer active are
    /// dropped and `false` is returned.
    pub fn set_balance(&mut self, owner: Address, balance: Balance) -> bool {
        if self.address() != Some(owner) {
            return false;
        }
        self.balance = Some(balance);
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::detect(false)
    }
}

/// What the header renders for a given session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMode {
    /// No wallet extension: only the install prompt.
    InstallPrompt,
    /// Connect button; `pending` disables it while a handshake is in flight.
    Connect { pending: bool },
    /// Active account with its balance text.
    Account {
        address: Address,
        balance: String,
        symbol: Option<String>,
    },
    /// Disconnect requested, waiting for the provider to settle.
    Disconnecting,
}

impl From<&Session> for HeaderMode {
    fn from(session: &Session) -> Self {
        match session.state() {
            WalletState::NoProvider => HeaderMode::InstallPrompt,
            WalletState::ProviderDetected => HeaderMode::Connect { pending: false },
            WalletState::Connecting => HeaderMode::Connect { pending: true },
            WalletState::Connected { address } => HeaderMode::Account {
                address,
                balance: display_balance(session.balance()),
                symbol: session.balance().map(|b| b.symbol.clone()),
            },
            WalletState::Disconnecting { .. } => HeaderMode::Disconnecting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    fn connected(addr: Address) -> Session {
        let mut session = Session::detect(true);
        session.begin_connect().unwrap();
        session.connect_succeeded(addr).unwrap();
        session
    }

    #[test]
    fn test_no_provider_only_shows_install_prompt() {
        let mut session = Session::detect(false);
        assert_eq!(HeaderMode::from(&session), HeaderMode::InstallPrompt);
        assert_eq!(session.begin_connect(), Err(AppError::NoProvider));
        assert_eq!(HeaderMode::from(&session), HeaderMode::InstallPrompt);
    }

    #[test]
    fn test_connect_success_exposes_resolved_address() {
        let session = connected(ALICE);
        assert!(session.is_connected());
        assert_eq!(session.address(), Some(ALICE));
        match HeaderMode::from(&session) {
            HeaderMode::Account { address, balance, symbol } => {
                assert_eq!(address.to_string(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
                assert_eq!(balance, "0.000000");
                assert_eq!(symbol, None);
            }
            other => panic!("unexpected header mode: {:?}", other),
        }
    }

    #[test]
    fn test_second_connect_while_pending_is_rejected() {
        let mut session = Session::detect(true);
        session.begin_connect().unwrap();
        assert_eq!(HeaderMode::from(&session), HeaderMode::Connect { pending: true });
        assert!(matches!(session.begin_connect(), Err(AppError::Busy(_))));
    }

    #[test]
    fn test_rejected_connect_returns_to_detected() {
        let mut session = Session::detect(true);
        session.begin_connect().unwrap();
        session.connect_failed().unwrap();
        assert!(!session.is_connected());
        assert_eq!(session.state(), WalletState::ProviderDetected);
        assert_eq!(HeaderMode::from(&session), HeaderMode::Connect { pending: false });
    }

    #[test]
    fn test_disconnect_clears_address_and_balance() {
        let mut session = connected(ALICE);
        assert!(session.set_balance(ALICE, Balance::new(U256::from(7u64), 18, "ETH")));

        assert_eq!(session.begin_disconnect().unwrap(), ALICE);
        assert!(!session.is_connected());
        assert!(session.address().is_none());
        assert!(session.balance().is_none());

        session.disconnect_settled();
        assert_eq!(session.state(), WalletState::ProviderDetected);
        assert!(session.balance().is_none());
    }

    #[test]
    fn test_disconnect_requires_connection() {
        let mut session = Session::detect(true);
        assert_eq!(session.begin_disconnect(), Err(AppError::NotConnected));
    }

    #[test]
    fn test_stale_balance_is_dropped() {
        let mut session = connected(ALICE);
        assert_eq!(
            session.accounts_changed(&[BOB]),
            AccountChange::Switched(BOB)
        );
        assert!(!session.set_balance(ALICE, Balance::new(U256::from(1u64), 18, "ETH")));
        assert!(session.balance().is_none());
        assert!(session.set_balance(BOB, Balance::new(U256::from(1u64), 18, "ETH")));
    }

    #[test]
    fn test_provider_removing_accounts_ends_session() {
        let mut session = connected(ALICE);
        assert_eq!(session.accounts_changed(&[ALICE]), AccountChange::Unchanged);
        assert_eq!(session.accounts_changed(&[]), AccountChange::Disconnected);
        assert!(!session.is_connected());
        assert!(session.has_provider());
    }

    #[test]
    fn test_accounts_changed_ignored_when_disconnected() {
        let mut session = Session::detect(true);
        assert_eq!(session.accounts_changed(&[ALICE]), AccountChange::Unchanged);
        assert!(!session.is_connected());
    }
}
