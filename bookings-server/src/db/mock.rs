//! Scripted store for tests
//!
//! Responses are returned in the order they were pushed; an empty
//! queue answers with no rows. Every call is recorded.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::store::{Param, Row, Store, StoreError};

/// A recorded `fetch` call
#[derive(Debug, Clone)]
pub struct Call {
    pub statement: &'static str,
    pub params: Vec<Param>,
}

enum Response {
    Rows(Vec<Row>),
    Fault(String),
    Delayed(Duration, Vec<Row>),
}

#[derive(Default)]
pub struct MockStore {
    responses: Mutex<VecDeque<Response>>,
    calls: Mutex<Vec<Call>>,
    unhealthy: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        self.responses.lock().unwrap().push_back(Response::Rows(rows));
    }

    /// Next call fails as if the driver reported `message`.
    pub fn push_fault(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Response::Fault(message.to_owned()));
    }

    /// Next call sleeps for `delay` before answering.
    pub fn push_delayed(&self, delay: Duration, rows: Vec<Row>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Response::Delayed(delay, rows));
    }

    pub fn set_unhealthy(&self, unhealthy: bool) {
        self.unhealthy.store(unhealthy, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn fetch(&self, statement: &'static str, params: &[Param]) -> Result<Vec<Row>, StoreError> {
        self.calls.lock().unwrap().push(Call {
            statement,
            params: params.to_vec(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            None => Ok(Vec::new()),
            Some(Response::Rows(rows)) => Ok(rows),
            Some(Response::Fault(message)) => Err(StoreError::Sqlx(sqlx::Error::Protocol(message))),
            Some(Response::Delayed(delay, rows)) => {
                tokio::time::sleep(delay).await;
                Ok(rows)
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.unhealthy.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Build a row from a JSON object literal.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("row must be a JSON object, got {other}"),
    }
}
