//! Async token operations
//!
//! Build and verify are CPU-bound and synchronous. These wrappers move owned
//! inputs onto tokio's blocking pool and hand back a future, so async services
//! can issue and check tokens without stalling their executor.

use crate::{
    builder::TokenBuilder,
    claims::Claims,
    error::{TokenError, TokenResult},
    keys::{TokenSigningKey, TokenVerifyingKey},
    token::Token,
    verifier::TokenVerifier,
};
use digest::Digest;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::{runtime::Handle, sync::oneshot};

/// Result of a token operation running on the blocking pool
pub struct AsyncTokenResult<T> {
    receiver: oneshot::Receiver<TokenResult<T>>,
}

impl<T: Send + 'static> AsyncTokenResult<T> {
    fn spawn<F>(op: F) -> Self
    where
        F: FnOnce() -> TokenResult<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    let _ = tx.send(op());
                });
            }
            Err(_) => {
                tracing::warn!("token operation requested outside a tokio runtime");
                let _ = tx.send(Err(TokenError::internal("no tokio runtime available")));
            }
        }
        Self { receiver: rx }
    }
}

impl<T> Future for AsyncTokenResult<T> {
    type Output = TokenResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TokenError::internal("token task dropped"))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<H: Digest + 'static> TokenBuilder<H> {
    /// [`build`](Self::build) on the blocking pool.
    ///
    /// The key is moved into the task and dropped when it finishes.
    /// Outside a tokio runtime the result resolves to [`TokenError::Internal`].
    #[must_use]
    pub fn build_async<K>(&self, claims: Claims, key: K) -> AsyncTokenResult<Token>
    where
        K: TokenSigningKey + 'static,
    {
        let builder = self.clone();
        AsyncTokenResult::spawn(move || builder.build(&claims, &key))
    }
}

impl<H: Digest + 'static> TokenVerifier<H> {
    /// [`verify`](Self::verify) on the blocking pool.
    ///
    /// Outside a tokio runtime the result resolves to [`TokenError::Internal`].
    #[must_use]
    pub fn verify_async<K>(&self, token: impl Into<String>, key: K) -> AsyncTokenResult<Claims>
    where
        K: TokenVerifyingKey + 'static,
    {
        let verifier = self.clone();
        let token = token.into();
        AsyncTokenResult::spawn(move || verifier.verify(&token, &key))
    }
}
