//! The counter view: props derivation and render lifecycle.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::format;
#[cfg(feature = "no_std")]
use alloc::string::String;

use portable_atomic_util::Arc;
use spin::Mutex;

use crate::{CounterAction, CounterState, CounterStore, Renderer, SubscriptionId};

/// An interactive element: a label and the callback its activation fires.
pub struct Trigger {
    pub label: &'static str,
    pub on_activate: Box<dyn Fn() + Send>,
}

impl Trigger {
    /// Fire the trigger, as a user activating the element would.
    pub fn activate(&self) {
        (self.on_activate)()
    }
}

/// Renderable representation of the counter.
///
/// The heading is the display text `"Count: {value}"`; the two triggers
/// dispatch [`CounterAction::Increment`] and [`CounterAction::Decrement`]
/// when activated.
pub struct CounterProps {
    pub heading: String,
    pub increment: Trigger,
    pub decrement: Trigger,
}

/// Derive [`CounterProps`] from the current state.
///
/// Pure except for the store handles cloned into the trigger callbacks. The
/// props hold no reference into the store; the heading is a snapshot of the
/// value at derivation time.
pub fn view(state: &CounterState, store: &CounterStore) -> CounterProps {
    let increment = {
        let store = store.clone();
        Trigger {
            label: "Increment",
            on_activate: Box::new(move || store.dispatch(CounterAction::Increment)),
        }
    };
    let decrement = {
        let store = store.clone();
        Trigger {
            label: "Decrement",
            on_activate: Box::new(move || store.dispatch(CounterAction::Decrement)),
        }
    };

    CounterProps {
        heading: format!("Count: {}", state.count),
        increment,
        decrement,
    }
}

/// Binds a [`Renderer`] to a counter store.
///
/// [`mount`](Self::mount) renders the current value once, then subscribes so
/// every subsequent mutation re-renders synchronously from the notification.
/// The view keeps no state of its own; each render derives fresh props from
/// the store's snapshot. [`unmount`](Self::unmount) (or dropping the view)
/// removes the subscription.
///
/// A [`Renderer::render`] implementation must not activate a trigger before
/// returning: the dispatch would re-enter the renderer lock held for the
/// call. Hand triggers to the interaction layer and activate them from
/// there.
///
/// # Example
///
/// ```rust
/// use tally::{counter_store, CounterAction, CounterProps, CounterView, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer<CounterProps> for ConsoleRenderer {
///     fn render(&mut self, props: CounterProps) {
///         println!("{}", props.heading);
///     }
/// }
///
/// let store = counter_store();
/// let mut view = CounterView::new(store.clone(), ConsoleRenderer);
///
/// view.mount(); // prints "Count: 0"
/// store.dispatch(CounterAction::Increment); // prints "Count: 1"
/// ```
pub struct CounterView<R>
where
    R: Renderer<CounterProps> + Send + 'static,
{
    store: CounterStore,
    renderer: Arc<Mutex<R>>,
    subscription: Option<SubscriptionId>,
}

impl<R> CounterView<R>
where
    R: Renderer<CounterProps> + Send + 'static,
{
    /// Create an unmounted view over `store`, rendering onto `renderer`.
    pub fn new(store: CounterStore, renderer: R) -> Self {
        CounterView {
            store,
            renderer: Arc::new(Mutex::new(renderer)),
            subscription: None,
        }
    }

    /// Render the current value and subscribe for re-renders.
    ///
    /// Mounting an already-mounted view is a no-op.
    pub fn mount(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        let props = view(&self.store.state(), &self.store);
        self.renderer.lock().render(props);

        let store = self.store.clone();
        let renderer = self.renderer.clone();
        let id = self.store.subscribe(move |state| {
            let props = view(state, &store);
            renderer.lock().render(props);
        });
        self.subscription = Some(id);
    }

    /// Stop rendering and drop the subscription.
    ///
    /// Safe to call on an unmounted view.
    pub fn unmount(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
    }
}

impl<R> Drop for CounterView<R>
where
    R: Renderer<CounterProps> + Send + 'static,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
