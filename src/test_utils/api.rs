use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    AppState,
    api::{
        ApiError, NewTransaction, SessionToken, SignInData, SignInResponse, Transaction, WalletApi,
    },
};

/// A [WalletApi] double with canned responses.
///
/// Tests keep a second [Arc] to the stub so they can inspect the recorded
/// calls after handing it to the handler under test.
pub(crate) struct StubWalletApi {
    sign_in_result: Result<SignInResponse, ApiError>,
    transactions_result: Result<Vec<Transaction>, ApiError>,
    create_result: Result<(), ApiError>,
    transactions_calls: AtomicUsize,
    created: Mutex<Vec<NewTransaction>>,
}

impl Default for StubWalletApi {
    fn default() -> Self {
        Self {
            sign_in_result: Ok(SignInResponse {
                name: "Teste".to_owned(),
                token: SessionToken::new("abc123"),
            }),
            transactions_result: Ok(Vec::new()),
            create_result: Ok(()),
            transactions_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }
}

impl StubWalletApi {
    pub(crate) fn with_sign_in_result(
        mut self,
        result: Result<SignInResponse, ApiError>,
    ) -> Self {
        self.sign_in_result = result;
        self
    }

    pub(crate) fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions_result = Ok(transactions);
        self
    }

    pub(crate) fn with_transactions_error(mut self, error: ApiError) -> Self {
        self.transactions_result = Err(error);
        self
    }

    pub(crate) fn with_create_error(mut self, error: ApiError) -> Self {
        self.create_result = Err(error);
        self
    }

    pub(crate) fn transactions_call_count(&self) -> usize {
        self.transactions_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn created_transactions(&self) -> Vec<NewTransaction> {
        self.created.lock().expect("Could not acquire lock").clone()
    }
}

#[async_trait]
impl WalletApi for StubWalletApi {
    async fn sign_in(&self, _credentials: SignInData) -> Result<SignInResponse, ApiError> {
        self.sign_in_result.clone()
    }

    async fn get_transactions(&self, _token: &SessionToken) -> Result<Vec<Transaction>, ApiError> {
        self.transactions_calls.fetch_add(1, Ordering::SeqCst);

        self.transactions_result.clone()
    }

    async fn create_transaction(
        &self,
        _token: &SessionToken,
        transaction: NewTransaction,
    ) -> Result<(), ApiError> {
        self.created
            .lock()
            .expect("Could not acquire lock")
            .push(transaction);

        self.create_result.clone()
    }
}

/// An [AppState] backed by a default [StubWalletApi].
pub(crate) fn new_test_state() -> AppState {
    AppState::new("foobar", Arc::new(StubWalletApi::default()))
}
