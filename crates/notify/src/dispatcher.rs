//! First-match notification dispatcher.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;

use crate::channel::Channel;
use crate::error::{NotifyError, Result};
use crate::senders::{InMemorySender, Sender};

/// How a strategy decides whether it takes an address.
#[derive(Clone)]
pub enum Matcher {
    /// Defer to [`Sender::can_handle`].
    Sender,
    /// Use this predicate instead of the sender's own check.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Sender => f.write_str("Sender"),
            Matcher::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A registered sender together with the rule that selects it.
#[derive(Clone)]
pub struct Strategy {
    matcher: Matcher,
    sender: Arc<dyn Sender>,
}

impl Strategy {
    /// Selects `sender` by its own address check.
    pub fn new(sender: Arc<dyn Sender>) -> Self {
        Self {
            matcher: Matcher::Sender,
            sender,
        }
    }

    /// Selects `sender` for addresses matching `predicate`.
    pub fn matching<P>(predicate: P, sender: Arc<dyn Sender>) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            matcher: Matcher::Predicate(Arc::new(predicate)),
            sender,
        }
    }

    pub fn can_handle(&self, address: &str) -> bool {
        match &self.matcher {
            Matcher::Sender => self.sender.can_handle(address),
            Matcher::Predicate(predicate) => predicate(address),
        }
    }

    pub fn sender(&self) -> &Arc<dyn Sender> {
        &self.sender
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("sender", &self.sender.name())
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub address: String,
    pub channel: Channel,
    pub sender: String,
    pub delivered: bool,
}

/// An address that could not be delivered to, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDelivery {
    pub address: String,
    pub reason: String,
}

/// Outcome of a bulk dispatch. Every distinct address lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub delivered: Vec<String>,
    pub failed: Vec<FailedDelivery>,
}

/// Sends each message through the first registered strategy that accepts
/// the address.
///
/// Strategies are scanned in registration order; a strategy added later
/// never shadows an earlier one for the same address shape.
#[derive(Debug, Clone, Default)]
pub struct NotificationDispatcher {
    strategies: Vec<Strategy>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher with no strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with in-memory email, SMS and push senders, in that order.
    pub fn with_default_senders() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_strategy(Arc::new(InMemorySender::email()));
        dispatcher.add_strategy(Arc::new(InMemorySender::sms()));
        dispatcher.add_strategy(Arc::new(InMemorySender::push()));
        dispatcher
    }

    /// Appends `sender` to the end of the scan order.
    pub fn add_strategy(&mut self, sender: Arc<dyn Sender>) -> &mut Self {
        self.push(Strategy::new(sender))
    }

    /// Appends a pre-built strategy to the end of the scan order.
    pub fn push(&mut self, strategy: Strategy) -> &mut Self {
        tracing::debug!(sender = strategy.sender.name(), position = self.strategies.len(), "strategy added");
        self.strategies.push(strategy);
        self
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Returns the first strategy that accepts `address`.
    pub fn select(&self, address: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.can_handle(address))
    }

    /// Sends `message` to `address` through the first matching strategy.
    #[tracing::instrument(skip(self, message))]
    pub async fn dispatch(&self, message: &str, address: &str) -> Result<Delivery> {
        let Some(strategy) = self.select(address) else {
            metrics::counter!("notifications_failed_total", "reason" => "no_sender").increment(1);
            tracing::warn!("no sender for address");
            return Err(NotifyError::NoSender {
                address: address.to_string(),
            });
        };

        let sender = &strategy.sender;
        let channel = sender.channel();
        tracing::debug!(sender = sender.name(), %channel, "sender selected");

        match sender.send(message, address).await {
            Ok(delivered) => {
                if delivered {
                    metrics::counter!("notifications_delivered_total", "channel" => channel.as_str())
                        .increment(1);
                } else {
                    metrics::counter!("notifications_failed_total", "channel" => channel.as_str())
                        .increment(1);
                    tracing::warn!(sender = sender.name(), "message not delivered");
                }
                Ok(Delivery {
                    address: address.to_string(),
                    channel,
                    sender: sender.name().to_string(),
                    delivered,
                })
            }
            Err(err) => {
                metrics::counter!("notifications_failed_total", "channel" => channel.as_str())
                    .increment(1);
                tracing::warn!(sender = sender.name(), error = %err, "send failed");
                Err(err)
            }
        }
    }

    /// Sends `message` to every address concurrently.
    ///
    /// Failures never abort the others; they are collected in the report.
    /// Repeated addresses are sent to once.
    #[tracing::instrument(skip(self, message, addresses), fields(count = addresses.len()))]
    pub async fn dispatch_bulk(&self, message: &str, addresses: &[String]) -> BulkReport {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = addresses
            .iter()
            .map(String::as_str)
            .filter(|address| seen.insert(*address))
            .collect();

        let outcomes = join_all(
            unique
                .iter()
                .map(|address| async move { (*address, self.dispatch(message, address).await) }),
        )
        .await;

        let mut report = BulkReport::default();
        for (address, outcome) in outcomes {
            match outcome {
                Ok(delivery) if delivery.delivered => report.delivered.push(address.to_string()),
                Ok(delivery) => report.failed.push(FailedDelivery {
                    address: address.to_string(),
                    reason: format!("{} did not accept the message", delivery.sender),
                }),
                Err(err) => report.failed.push(FailedDelivery {
                    address: address.to_string(),
                    reason: err.to_string(),
                }),
            }
        }

        tracing::info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "bulk dispatch finished"
        );
        report
    }
}
