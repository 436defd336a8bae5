//! 解析上下文
//!
//! 每一次网络调用都绑定到调用方提供的上下文：取消令牌加可选的截止时间。
//! 取消或超时会中止正在进行的调用，并以上下文类错误返回。

use dormant_common::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 解析上下文
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ResolveContext {
    /// 不会被取消、没有截止时间的上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定到给定取消令牌
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 设置截止时间
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 设置从现在起的超时
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// 是否已被取消
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 在上下文约束下执行一次调用
    ///
    /// `per_call` 为单次调用的额外超时，与上下文截止时间取较早者。
    pub async fn run<T, F>(&self, per_call: Option<Duration>, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let now = Instant::now();
        if self.deadline.is_some_and(|deadline| deadline <= now) {
            return Err(Error::DeadlineExceeded);
        }

        let call_deadline = per_call.map(|d| now + d);
        let deadline = match (self.deadline, call_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            res = async {
                match deadline {
                    Some(deadline) => tokio::time::timeout_at(deadline, fut)
                        .await
                        .unwrap_or(Err(Error::DeadlineExceeded)),
                    None => fut.await,
                }
            } => res,
        }
    }
}
