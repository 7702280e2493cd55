//! Font load registry
//!
//! Tracks the load state of every requested family for the life of the
//! process. Each family is fetched at most once; every dependent asking for
//! it is either answered from the cached outcome or queued behind the one
//! in-flight load.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use crate::fetch::{FetchCallback, FetchOutcome, FontFetcher};
use crate::FontLoadFailed;

/// Timeout attached to every external load unless configured otherwise
pub const DEFAULT_FONT_TIMEOUT: Duration = Duration::from_secs(10);

/// Load state of one family. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontLoadState {
    #[default]
    Unrequested,
    Loading,
    Loaded,
    Failed,
}

type SuccessCallback = Box<dyn FnOnce()>;
type FailureCallback = Box<dyn FnOnce(FontLoadFailed)>;

struct Waiter {
    id: u64,
    on_success: SuccessCallback,
    on_failure: FailureCallback,
}

#[derive(Default)]
struct Entry {
    state: FontLoadState,
    timed_out: bool,
    waiters: Vec<Waiter>,
}

struct Inner {
    entries: RefCell<HashMap<String, Entry>>,
    fetcher: RefCell<Box<dyn FontFetcher>>,
    queue: RefCell<VecDeque<String>>,
    dispatching: Cell<bool>,
    next_waiter: Cell<u64>,
    issued: Cell<usize>,
    timeout: Duration,
}

/// Handle to one registration with the registry.
///
/// Pass it to [`FontRegistry::cancel`] to drop the callbacks before the
/// family resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontTicket {
    family: String,
    waiter: Option<u64>,
}

impl FontTicket {
    fn settled(family: &str) -> Self {
        Self {
            family: family.to_string(),
            waiter: None,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// The callbacks were already invoked when the request was made
    pub fn is_settled(&self) -> bool {
        self.waiter.is_none()
    }
}

/// Shared font registry. Clones refer to the same registry.
#[derive(Clone)]
pub struct FontRegistry {
    inner: Rc<Inner>,
}

impl FontRegistry {
    /// Create a registry using the default timeout
    pub fn new(fetcher: impl FontFetcher + 'static) -> Self {
        Self::with_timeout(fetcher, DEFAULT_FONT_TIMEOUT)
    }

    pub fn with_timeout(fetcher: impl FontFetcher + 'static, timeout: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                entries: RefCell::new(HashMap::new()),
                fetcher: RefCell::new(Box::new(fetcher)),
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                next_waiter: Cell::new(0),
                issued: Cell::new(0),
                timeout,
            }),
        }
    }

    /// Timeout attached to external loads
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Current state of `family`
    pub fn state(&self, family: &str) -> FontLoadState {
        self.inner
            .entries
            .borrow()
            .get(family)
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    /// Number of external loads issued over the registry's lifetime
    pub fn requests_issued(&self) -> usize {
        self.inner.issued.get()
    }

    /// Request `family`.
    ///
    /// An empty family, or one already resolved, is answered before this
    /// returns. Otherwise the callbacks run once the single in-flight load
    /// for the family resolves, after every earlier waiter.
    pub fn request(
        &self,
        family: &str,
        on_success: impl FnOnce() + 'static,
        on_failure: impl FnOnce(FontLoadFailed) + 'static,
    ) -> FontTicket {
        if family.trim().is_empty() {
            on_success();
            return FontTicket::settled(family);
        }

        let (state, timed_out) = self
            .inner
            .entries
            .borrow()
            .get(family)
            .map(|entry| (entry.state, entry.timed_out))
            .unwrap_or_default();

        match state {
            FontLoadState::Loaded => {
                tracing::trace!("Font {} served from cache", family);
                on_success();
                FontTicket::settled(family)
            }
            FontLoadState::Failed => {
                tracing::trace!("Font {} previously failed", family);
                on_failure(FontLoadFailed::new(family, timed_out));
                FontTicket::settled(family)
            }
            FontLoadState::Loading => {
                tracing::trace!("Font {} already loading, queueing waiter", family);
                self.add_waiter(family, Box::new(on_success), Box::new(on_failure))
            }
            FontLoadState::Unrequested => {
                let ticket = self.add_waiter(family, Box::new(on_success), Box::new(on_failure));
                self.inner.queue.borrow_mut().push_back(family.to_string());
                self.dispatch();
                ticket
            }
        }
    }

    /// Remove a pending registration. Has no effect once it has fired.
    pub fn cancel(&self, ticket: &FontTicket) {
        let Some(id) = ticket.waiter else { return };
        if let Some(entry) = self.inner.entries.borrow_mut().get_mut(&ticket.family) {
            entry.waiters.retain(|waiter| waiter.id != id);
        }
    }

    fn add_waiter(
        &self,
        family: &str,
        on_success: SuccessCallback,
        on_failure: FailureCallback,
    ) -> FontTicket {
        let id = self.inner.next_waiter.get();
        self.inner.next_waiter.set(id + 1);

        let mut entries = self.inner.entries.borrow_mut();
        let entry = entries.entry(family.to_string()).or_default();
        entry.state = FontLoadState::Loading;
        entry.waiters.push(Waiter {
            id,
            on_success,
            on_failure,
        });

        FontTicket {
            family: family.to_string(),
            waiter: Some(id),
        }
    }

    /// Issue queued external loads. Requests made from inside a fetcher's
    /// synchronous completion land in the queue and are picked up here.
    fn dispatch(&self) {
        if self.inner.dispatching.replace(true) {
            return;
        }

        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(family) = next else { break };

            self.inner.issued.set(self.inner.issued.get() + 1);
            tracing::debug!(
                "Requesting font {} (timeout {:?})",
                family,
                self.inner.timeout
            );

            let registry = Rc::downgrade(&self.inner);
            let key = family.clone();
            let done: FetchCallback = Box::new(move |outcome| {
                if let Some(inner) = registry.upgrade() {
                    FontRegistry { inner }.settle(&key, outcome);
                }
            });
            self.inner
                .fetcher
                .borrow_mut()
                .load(&family, self.inner.timeout, done);
        }

        self.inner.dispatching.set(false);
    }

    fn settle(&self, family: &str, outcome: FetchOutcome) {
        let waiters = {
            let mut entries = self.inner.entries.borrow_mut();
            let Some(entry) = entries.get_mut(family) else { return };
            if entry.state != FontLoadState::Loading {
                tracing::warn!("Ignoring duplicate outcome {:?} for font {}", outcome, family);
                return;
            }
            entry.state = match outcome {
                FetchOutcome::Active => FontLoadState::Loaded,
                FetchOutcome::Inactive | FetchOutcome::TimedOut => FontLoadState::Failed,
            };
            entry.timed_out = outcome == FetchOutcome::TimedOut;
            std::mem::take(&mut entry.waiters)
        };

        match outcome {
            FetchOutcome::Active => tracing::debug!("Font {} loaded", family),
            FetchOutcome::Inactive => tracing::warn!("Font {} failed to load", family),
            FetchOutcome::TimedOut => tracing::warn!("Font {} timed out", family),
        }

        let timed_out = outcome == FetchOutcome::TimedOut;
        for waiter in waiters {
            if outcome == FetchOutcome::Active {
                (waiter.on_success)();
            } else {
                (waiter.on_failure)(FontLoadFailed::new(family, timed_out));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeferredFetcher;

    /// Fetcher answering synchronously with a fixed outcome
    struct Immediate(FetchOutcome);

    impl FontFetcher for Immediate {
        fn load(&mut self, _family: &str, _timeout: Duration, done: FetchCallback) {
            done(self.0);
        }
    }

    fn log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_empty_family_succeeds_synchronously() {
        let registry = FontRegistry::new(DeferredFetcher::new());
        let events = log();
        let seen = events.clone();
        let ticket = registry.request("", move || seen.borrow_mut().push("ok".into()), |_| {});
        assert!(ticket.is_settled());
        assert_eq!(*events.borrow(), vec!["ok"]);
        assert_eq!(registry.requests_issued(), 0);
    }

    #[test]
    fn test_synchronous_fetch_resolves_inside_request() {
        let registry = FontRegistry::new(Immediate(FetchOutcome::Active));
        let events = log();
        let seen = events.clone();
        registry.request("Lobster", move || seen.borrow_mut().push("ok".into()), |_| {});
        assert_eq!(*events.borrow(), vec!["ok"]);
        assert_eq!(registry.state("Lobster"), FontLoadState::Loaded);
    }

    #[test]
    fn test_waiters_notified_in_request_order() {
        let fetcher = DeferredFetcher::new();
        let registry = FontRegistry::new(fetcher.clone());
        let events = log();
        for name in ["first", "second", "third"] {
            let seen = events.clone();
            registry.request("Bangers", move || seen.borrow_mut().push(name.into()), |_| {});
        }
        assert_eq!(registry.requests_issued(), 1);
        assert_eq!(registry.state("Bangers"), FontLoadState::Loading);

        fetcher.resolve("Bangers", FetchOutcome::Active);
        assert_eq!(*events.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_cancelled_waiter_not_notified() {
        let fetcher = DeferredFetcher::new();
        let registry = FontRegistry::new(fetcher.clone());
        let events = log();
        let seen = events.clone();
        let ticket = registry.request("Anton", move || seen.borrow_mut().push("a".into()), |_| {});
        let seen = events.clone();
        registry.request("Anton", move || seen.borrow_mut().push("b".into()), |_| {});

        registry.cancel(&ticket);
        fetcher.resolve("Anton", FetchOutcome::Active);
        assert_eq!(*events.borrow(), vec!["b"]);
    }

    #[test]
    fn test_reentrant_request_from_callback() {
        let registry = FontRegistry::new(Immediate(FetchOutcome::Active));
        let events = log();
        let nested = registry.clone();
        let seen = events.clone();
        registry.request(
            "Caveat",
            move || {
                let inner_seen = seen.clone();
                nested.request("Oswald", move || inner_seen.borrow_mut().push("oswald".into()), |_| {});
                seen.borrow_mut().push("caveat".into());
            },
            |_| {},
        );
        assert_eq!(*events.borrow(), vec!["caveat", "oswald"]);
        assert_eq!(registry.requests_issued(), 2);
    }

    #[test]
    fn test_failure_carries_family() {
        let registry = FontRegistry::new(Immediate(FetchOutcome::Inactive));
        let error = Rc::new(RefCell::new(None));
        let seen = error.clone();
        registry.request("Monoton", || {}, move |e| *seen.borrow_mut() = Some(e));
        let error = error.borrow().clone().unwrap();
        assert_eq!(error.family, "Monoton");
        assert!(!error.timed_out);
        assert_eq!(error.to_string(), "Failed to load font: Monoton");
    }
}
