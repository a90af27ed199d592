//! Passing a logger down a call chain.
//!
//! Two carriers are supported: an explicit, immutable [`Carrier`] value
//! threaded through function arguments, and a tokio task-local installed with
//! [`scope`]. Both lookups panic when no logger was attached upstream; a
//! missing logger is a wiring bug, not something callers handle.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::Logger;

/// Key the logger is stored under in a [`Carrier`]
pub const LOGGER_KEY: &str = "log";

tokio::task_local! {
    static CURRENT: Logger;
}

/// Immutable request-scoped value bag.
///
/// Adding a value returns a new carrier; clones and earlier carriers keep
/// seeing what they saw before.
#[derive(Clone, Default)]
pub struct Carrier {
    values: Arc<HashMap<&'static str, Arc<dyn Any + Send + Sync>>>,
}

impl Carrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a carrier with `value` bound under `key`
    pub fn with_value<T: Any + Send + Sync>(&self, key: &'static str, value: T) -> Carrier {
        let mut values = HashMap::clone(&self.values);
        values.insert(key, Arc::new(value));
        Carrier {
            values: Arc::new(values),
        }
    }

    /// Value under `key`, if present with type `T`
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref::<T>())
    }
}

impl std::fmt::Debug for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carrier")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Carrier derived from `carrier` with `logger` attached
pub fn attach_logger(carrier: &Carrier, logger: Logger) -> Carrier {
    carrier.with_value(LOGGER_KEY, logger)
}

/// Logger attached to `carrier`.
///
/// # Panics
///
/// Panics if no logger was attached with [`attach_logger`].
pub fn logger_from(carrier: &Carrier) -> Logger {
    match carrier.value::<Logger>(LOGGER_KEY) {
        Some(logger) => logger.clone(),
        None => panic!("no logger attached to carrier under key {LOGGER_KEY:?}"),
    }
}

/// Run `future` with `logger` as the task-local logger
pub async fn scope<F: Future>(logger: Logger, future: F) -> F::Output {
    CURRENT.scope(logger, future).await
}

/// Task-local logger installed by [`scope`].
///
/// # Panics
///
/// Panics when called outside a [`scope`].
pub fn current() -> Logger {
    match CURRENT.try_with(Logger::clone) {
        Ok(logger) => logger,
        Err(_) => panic!("no logger in task scope; wrap the task with ctxlog::propagation::scope"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::sink::MemorySink;

    fn logger(context: &str) -> Logger {
        Logger::with_output(FixedClock::from_ymd_hms(2024, 1, 2, 3, 4, 5), MemorySink::new())
            .with_context(context)
    }

    #[test]
    fn test_attach_then_retrieve() {
        let carrier = attach_logger(&Carrier::new(), logger("req-1"));
        assert_eq!(logger_from(&carrier).context(), "req-1");
    }

    #[test]
    fn test_attach_does_not_touch_original() {
        let root = Carrier::new();
        let attached = attach_logger(&root, logger("req-1"));

        assert!(root.value::<Logger>(LOGGER_KEY).is_none());
        assert!(attached.value::<Logger>(LOGGER_KEY).is_some());
    }

    #[test]
    fn test_reattach_shadows_in_new_carrier_only() {
        let first = attach_logger(&Carrier::new(), logger("outer"));
        let second = attach_logger(&first, logger_from(&first).with_context("inner"));

        assert_eq!(logger_from(&first).context(), "outer");
        assert_eq!(logger_from(&second).context(), "outer|inner");
    }

    #[test]
    #[should_panic(expected = "no logger attached")]
    fn test_missing_logger_panics() {
        logger_from(&Carrier::new());
    }

    #[test]
    #[should_panic(expected = "no logger attached")]
    fn test_wrong_type_under_key_panics() {
        let carrier = Carrier::new().with_value(LOGGER_KEY, "not a logger");
        logger_from(&carrier);
    }

    #[test]
    fn test_generic_values() {
        let carrier = Carrier::new().with_value("request_id", 42u64);
        assert_eq!(carrier.value::<u64>("request_id"), Some(&42));
        assert_eq!(carrier.value::<u32>("request_id"), None);
        assert_eq!(carrier.value::<u64>("missing"), None);
    }

    #[tokio::test]
    async fn test_task_scope() {
        let context = scope(logger("task"), async { current().context().to_string() }).await;
        assert_eq!(context, "task");
    }

    #[tokio::test]
    async fn test_nested_task_scope() {
        let outer = logger("outer");
        scope(outer.clone(), async {
            let inner = current().with_context("inner");
            scope(inner, async {
                assert_eq!(current().context(), "outer|inner");
            })
            .await;
            assert_eq!(current().context(), "outer");
        })
        .await;
    }

    #[test]
    #[should_panic(expected = "no logger in task scope")]
    fn test_current_outside_scope_panics() {
        current();
    }
}
