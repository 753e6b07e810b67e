//! Wallet abstraction: sign and broadcast a transaction, or fail.

use std::sync::Arc;

use async_trait::async_trait;

use ghostwrite_core::{Address, TransactionId};

use crate::error::Result;
use crate::program::TransactionRequest;

/// The signer the workflows submit transactions through.
///
/// Implementations must be thread-safe (Send + Sync). A dispatched
/// submission cannot be recalled.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Is there an active wallet session?
    fn is_connected(&self) -> bool;

    /// The connected account, if any.
    fn identity(&self) -> Option<Address>;

    /// Sign and broadcast `request`.
    ///
    /// Fails on user rejection, a missing session, or network error.
    async fn submit_transaction(&self, request: TransactionRequest) -> Result<TransactionId>;
}

#[async_trait]
impl<W: Wallet + ?Sized> Wallet for Arc<W> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn identity(&self) -> Option<Address> {
        (**self).identity()
    }

    async fn submit_transaction(&self, request: TransactionRequest) -> Result<TransactionId> {
        (**self).submit_transaction(request).await
    }
}

/// A scripted in-memory wallet for tests and demos.
///
/// Records every request it receives and can be told to fail calls to a given
/// program function.
pub mod memory {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
    use std::time::Duration;

    use crate::error::WalletError;

    #[derive(Default)]
    struct Script {
        /// Persistent failures keyed by function name.
        by_function: HashMap<String, WalletError>,
        /// One-shot failures consumed in order.
        next: VecDeque<WalletError>,
    }

    /// In-memory wallet.
    pub struct MemoryWallet {
        identity: RwLock<Option<Address>>,
        requests: Mutex<Vec<TransactionRequest>>,
        script: Mutex<Script>,
        tx_counter: AtomicU64,
        latency: Option<Duration>,
    }

    impl MemoryWallet {
        /// A wallet connected as `address`.
        pub fn connected(address: impl Into<Address>) -> Self {
            Self {
                identity: RwLock::new(Some(address.into())),
                requests: Mutex::new(Vec::new()),
                script: Mutex::new(Script::default()),
                tx_counter: AtomicU64::new(0),
                latency: None,
            }
        }

        /// A wallet with no session.
        pub fn disconnected() -> Self {
            let wallet = Self::connected("");
            wallet.disconnect();
            wallet
        }

        /// Delay every submission by `latency`.
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        pub fn connect(&self, address: impl Into<Address>) {
            *self.identity.write().unwrap_or_else(PoisonError::into_inner) = Some(address.into());
        }

        pub fn disconnect(&self) {
            *self.identity.write().unwrap_or_else(PoisonError::into_inner) = None;
        }

        /// Fail every call to `function` with `error` until cleared.
        pub fn fail_function(&self, function: &str, error: WalletError) {
            lock(&self.script)
                .by_function
                .insert(function.to_string(), error);
        }

        /// Fail the next submission, whatever it is.
        pub fn fail_next(&self, error: WalletError) {
            lock(&self.script).next.push_back(error);
        }

        /// Remove all scripted failures.
        pub fn clear_failures(&self) {
            *lock(&self.script) = Script::default();
        }

        /// Every request received, including failed ones, in arrival order.
        pub fn requests(&self) -> Vec<TransactionRequest> {
            lock(&self.requests).clone()
        }

        /// Functions called, in arrival order.
        pub fn calls(&self) -> Vec<String> {
            lock(&self.requests)
                .iter()
                .map(|r| r.function.clone())
                .collect()
        }

        fn scripted_failure(&self, function: &str) -> Option<WalletError> {
            let mut script = lock(&self.script);
            script
                .next
                .pop_front()
                .or_else(|| script.by_function.get(function).cloned())
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[async_trait]
    impl Wallet for MemoryWallet {
        fn is_connected(&self) -> bool {
            self.identity().is_some()
        }

        fn identity(&self) -> Option<Address> {
            self.identity
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        async fn submit_transaction(&self, request: TransactionRequest) -> Result<TransactionId> {
            if !self.is_connected() {
                return Err(WalletError::NotConnected);
            }

            let function = request.function.clone();
            lock(&self.requests).push(request);

            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }

            if let Some(error) = self.scripted_failure(&function) {
                tracing::debug!(%function, %error, "scripted submission failure");
                return Err(error);
            }

            let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(TransactionId::new(format!("at1memory{:010}", n)))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::program::{ProgramConfig, TRANSFER_PUBLIC};
        use ghostwrite_core::Microcredits;

        fn transfer() -> TransactionRequest {
            ProgramConfig::default().transfer_public(&Address::from("aleo1to"), Microcredits::new(1))
        }

        #[tokio::test]
        async fn test_submit_returns_distinct_ids() {
            let wallet = MemoryWallet::connected("aleo1me");
            let a = wallet.submit_transaction(transfer()).await.unwrap();
            let b = wallet.submit_transaction(transfer()).await.unwrap();
            assert_ne!(a, b);
            assert_eq!(wallet.calls(), [TRANSFER_PUBLIC, TRANSFER_PUBLIC]);
        }

        #[tokio::test]
        async fn test_disconnected_rejects() {
            let wallet = MemoryWallet::disconnected();
            assert!(!wallet.is_connected());
            assert_eq!(
                wallet.submit_transaction(transfer()).await,
                Err(WalletError::NotConnected)
            );
            assert!(wallet.requests().is_empty());
        }

        #[tokio::test]
        async fn test_scripted_failures() {
            let wallet = MemoryWallet::connected("aleo1me");
            wallet.fail_next(WalletError::Rejected("user closed popup".into()));
            assert!(wallet.submit_transaction(transfer()).await.is_err());
            assert!(wallet.submit_transaction(transfer()).await.is_ok());

            wallet.fail_function(TRANSFER_PUBLIC, WalletError::Network("timeout".into()));
            assert_eq!(
                wallet.submit_transaction(transfer()).await,
                Err(WalletError::Network("timeout".into()))
            );

            wallet.clear_failures();
            assert!(wallet.submit_transaction(transfer()).await.is_ok());
            assert_eq!(wallet.requests().len(), 4);
        }

        #[tokio::test]
        async fn test_connect_switches_identity() {
            let wallet = MemoryWallet::disconnected();
            wallet.connect("aleo1new");
            assert_eq!(wallet.identity(), Some(Address::from("aleo1new")));
        }
    }
}
