//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of scripted expectations instead of a running actor. Use it to test
//! logic that sits *around* a client (error mapping, notices, argument filtering)
//! without an HTTP backend or a store.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (expectations) | Real ordered store |
//! | **Use Case** | Logic around the client | The actor and its entity hooks |
//! | **Error Injection** | `return_err` | Requires a failing collaborator |
//!
//! ```rust,ignore
//! let mut mock = MockClient::<CartEntry>::new();
//! mock.expect_delete(ProductId(1)).return_err(FrameworkError::NotFound("1".into()));
//!
//! let client = CartClient::new(mock.client(), notifier);
//! assert!(client.remove_product(ProductId(1)).await.is_err());
//! mock.verify();
//! ```
//!
//! A request that arrives with no matching expectation at the head of the queue
//! panics inside the mock task; the caller then sees `FrameworkError::ActorDropped`.
//!
//! For hand-driven tests, [`create_mock_client`] returns the raw request receiver
//! and the `expect_*` helpers pop typed requests off it.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// An expected request and the response to send back.
enum Expectation<T: ActorEntity> {
    Upsert {
        id: T::Id,
        response: Result<T, FrameworkError<T::Error>>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError<T::Error>>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError<T::Error>>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError<T::Error>>,
    },
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    snapshots: watch::Sender<Vec<T>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (snapshots, snapshot_receiver) = watch::channel(Vec::new());
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().expect("mock expectations poisoned").pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Upsert { id, respond_to, .. },
                        Some(Expectation::Upsert { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "upsert for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "update for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "delete for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, snapshot_receiver),
            expectations,
            snapshots,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Publishes `state` as if the actor had committed it.
    pub fn publish(&self, state: Vec<T>) {
        self.snapshots.send_replace(state);
    }

    pub fn expect_upsert(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(id, self.expectations.clone(), |id, response| {
            Expectation::Upsert { id, response }
        })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(id, self.expectations.clone(), |id, response| {
            Expectation::Get { id, response }
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(id, self.expectations.clone(), |id, response| {
            Expectation::Update { id, response }
        })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(id, self.expectations.clone(), |id, response| {
            Expectation::Delete { id, response }
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock expectations poisoned").len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder that queues one expectation once a response is chosen.
pub struct ExpectationBuilder<T: ActorEntity, V> {
    id: T::Id,
    expectations: Expectations<T>,
    wrap: fn(T::Id, Result<V, FrameworkError<T::Error>>) -> Expectation<T>,
}

impl<T: ActorEntity, V> ExpectationBuilder<T, V> {
    fn new(
        id: T::Id,
        expectations: Expectations<T>,
        wrap: fn(T::Id, Result<V, FrameworkError<T::Error>>) -> Expectation<T>,
    ) -> Self {
        Self {
            id,
            expectations,
            wrap,
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: V) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError<T::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<V, FrameworkError<T::Error>>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back((self.wrap)(self.id, response));
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// The snapshot channel of the returned client stays at an empty store.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_snapshots, snapshot_receiver) = watch::channel(Vec::new());
    (ResourceClient::new(sender, snapshot_receiver), receiver)
}

/// Helper to verify that the next message is an Upsert request
pub async fn expect_upsert<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Create,
    oneshot::Sender<Result<T, FrameworkError<T::Error>>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Upsert {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Update,
    oneshot::Sender<Result<T, FrameworkError<T::Error>>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}
