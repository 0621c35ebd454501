//! Change notification for lap timer observers.
//!
//! Observers register a callback and get a [`Subscription`] token back.
//! Callbacks carry no payload of their own: they are handed a read-only
//! reference to the subject and query whatever they need from it.

use std::fmt;
use uuid::Uuid;

/// Token identifying a registered callback.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Subscription(Uuid);

/// Ordered set of callbacks, invoked synchronously in insertion order.
///
/// # Example
///
/// ```rust
/// use lapcount::notify::ChangeNotifier;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let mut notifier: ChangeNotifier<u32> = ChangeNotifier::new();
///
/// let counter = Arc::clone(&seen);
/// let token = notifier.subscribe(move |value: &u32| {
///     counter.fetch_add(*value as usize, Ordering::SeqCst);
/// });
///
/// notifier.notify(&2);
/// assert!(notifier.unsubscribe(token));
/// notifier.notify(&5);
///
/// assert_eq!(seen.load(Ordering::SeqCst), 2);
/// ```
pub struct ChangeNotifier<T: ?Sized> {
    callbacks: Vec<(Subscription, Box<dyn FnMut(&T) + Send>)>,
}

impl<T: ?Sized> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback; it runs after every change until unsubscribed.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let subscription = Subscription(Uuid::new_v4());
        self.callbacks.push((subscription, Box::new(callback)));
        subscription
    }

    /// Detach a callback. Returns `false` if the token was not registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription);
        self.callbacks.len() != before
    }

    /// Invoke every callback once, in the order they were registered.
    pub fn notify(&mut self, subject: &T) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(subject);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T: ?Sized> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn callbacks_run_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier: ChangeNotifier<()> = ChangeNotifier::new();

        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            notifier.subscribe(move |_: &()| log.lock().unwrap().push(name));
        }

        notifier.notify(&());

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_detaches_only_that_callback() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier: ChangeNotifier<()> = ChangeNotifier::new();

        let first_log = Arc::clone(&log);
        let first = notifier.subscribe(move |_: &()| first_log.lock().unwrap().push(1));
        let second_log = Arc::clone(&log);
        notifier.subscribe(move |_: &()| second_log.lock().unwrap().push(2));

        assert!(notifier.unsubscribe(first));
        notifier.notify(&());

        assert_eq!(*log.lock().unwrap(), vec![2]);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn unsubscribe_twice_reports_false() {
        let mut notifier: ChangeNotifier<()> = ChangeNotifier::new();
        let token = notifier.subscribe(|_: &()| {});

        assert!(notifier.unsubscribe(token));
        assert!(!notifier.unsubscribe(token));
        assert!(notifier.is_empty());
    }

    #[test]
    fn subscriptions_are_unique() {
        let mut notifier: ChangeNotifier<()> = ChangeNotifier::new();
        let a = notifier.subscribe(|_: &()| {});
        let b = notifier.subscribe(|_: &()| {});
        assert_ne!(a, b);
    }

    #[test]
    fn callbacks_see_the_subject() {
        let seen = Arc::new(Mutex::new(None));
        let mut notifier: ChangeNotifier<str> = ChangeNotifier::new();

        let sink = Arc::clone(&seen);
        notifier.subscribe(move |value: &str| *sink.lock().unwrap() = Some(value.to_string()));
        notifier.notify("lap");

        assert_eq!(seen.lock().unwrap().as_deref(), Some("lap"));
    }
}
