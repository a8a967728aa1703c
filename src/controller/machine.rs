//! The autocomplete state machine

use super::models::{Activity, ControllerEvent, Focus, Phase, SelectionState};
use super::navigation::{navigate, NavAction, NavState, UserInput};
use super::sink::{ErrorSink, TracingErrorSink};
use crate::address::{AddressResult, RawCandidate, SuggestionEntry};
use crate::cache::SuggestionCache;
use crate::config::AutocompleteSettings;
use crate::debounce::Debouncer;
use crate::geocode::{FetchError, Geocoder};
use crate::surface::{SuggestionSurface, TextSurface};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

type Listener = Box<dyn FnMut(&AddressResult) + Send>;

/// Drives a text field and a suggestion popup from typed input.
///
/// All state lives here and is only touched through `&mut self`. Timers and
/// fetches run as tokio tasks and report back through an internal queue; the
/// owning task feeds those messages in with [`handle_event`](Self::handle_event).
/// Every message carries the generation it was issued under, and anything
/// older than the current generation is dropped.
pub struct AutocompleteController<P, T> {
    geocoder: Arc<dyn Geocoder>,
    popup: P,
    field: T,
    debouncer: Debouncer,
    min_query_chars: usize,

    text: String,
    generation: u64,
    activity: Activity,
    selection: SelectionState,
    focus: Focus,
    cache: SuggestionCache,
    address: AddressResult,

    listener: Option<Listener>,
    error_sink: Box<dyn ErrorSink>,

    tx: UnboundedSender<ControllerEvent>,
    rx: UnboundedReceiver<ControllerEvent>,
}

impl<P, T> AutocompleteController<P, T>
where
    P: SuggestionSurface,
    T: TextSurface,
{
    /// Create a controller. Must be called within a tokio runtime.
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        popup: P,
        field: T,
        settings: &AutocompleteSettings,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            geocoder,
            popup,
            field,
            debouncer: Debouncer::new(settings.debounce()),
            min_query_chars: settings.min_query_chars,
            text: String::new(),
            generation: 0,
            activity: Activity::Idle,
            selection: SelectionState::Closed,
            focus: Focus::Field,
            cache: SuggestionCache::new(),
            address: AddressResult::default(),
            listener: None,
            error_sink: Box::new(TracingErrorSink),
            tx,
            rx,
        }
    }

    /// Replace the default tracing error sink
    pub fn with_error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.error_sink = Box::new(sink);
        self
    }

    /// The user edited the field
    pub fn on_text_changed(&mut self, text: &str) {
        self.text = text.to_string();
        self.generation += 1;
        let generation = self.generation;

        if text.chars().count() <= self.min_query_chars {
            debug!(generation, "input too short, closing suggestions");
            self.debouncer.cancel();
            self.activity = Activity::Idle;
            self.clear_suggestions();
            return;
        }

        let tx = self.tx.clone();
        let query = text.to_string();
        self.debouncer.schedule(move || {
            let _ = tx.send(ControllerEvent::DebounceElapsed { generation, query });
        });
        self.activity = Activity::Debouncing { generation };
        debug!(generation, "debouncing '{}'", text);
    }

    /// Wait for the next timer or fetch message
    pub async fn next_event(&mut self) -> ControllerEvent {
        match self.rx.recv().await {
            Some(event) => event,
            // The controller holds a sender, so the queue never closes
            None => std::future::pending().await,
        }
    }

    /// Handle every message already queued, returning how many were handled
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply a timer or fetch message
    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::DebounceElapsed { generation, query } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "dropping stale timer");
                    return;
                }
                self.start_fetch(generation, query);
            }
            ControllerEvent::FetchCompleted {
                generation,
                query,
                result,
            } => self.finish_fetch(generation, &query, result),
        }
    }

    fn start_fetch(&mut self, generation: u64, query: String) {
        self.activity = Activity::Fetching { generation };
        debug!(
            generation,
            backend = self.geocoder.name(),
            "fetching suggestions for '{}'",
            query
        );

        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = geocoder.fetch(&query).await;
            let _ = tx.send(ControllerEvent::FetchCompleted {
                generation,
                query,
                result,
            });
        });
    }

    fn finish_fetch(
        &mut self,
        generation: u64,
        query: &str,
        result: Result<Vec<RawCandidate>, FetchError>,
    ) {
        if let Err(ref error) = result {
            self.error_sink.report(query, error);
        }
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale response");
            return;
        }
        self.activity = Activity::Idle;

        let candidates = match result {
            Ok(candidates) => candidates,
            Err(_) => {
                self.clear_suggestions();
                return;
            }
        };

        let suggestions = SuggestionEntry::from_candidates(candidates);
        self.cache.replace_all(&suggestions);

        let labels: Vec<String> = suggestions.iter().map(|s| s.label.clone()).collect();
        self.popup.set_items(&labels);
        self.popup.set_highlighted(None);

        if suggestions.is_empty() {
            self.selection = SelectionState::Closed;
            self.popup.hide();
            self.focus = Focus::Field;
        } else {
            debug!(generation, "showing {} suggestions", suggestions.len());
            self.selection = SelectionState::Open {
                generation,
                suggestions,
                highlighted: None,
            };
            self.show_popup();
        }
    }

    fn show_popup(&mut self) {
        match self.field.anchor() {
            Some(anchor) => self.popup.show(anchor),
            None => debug!("field not on screen, popup not shown"),
        }
    }

    fn clear_suggestions(&mut self) {
        self.selection = SelectionState::Closed;
        self.popup.set_items(&[]);
        self.popup.hide();
        self.focus = Focus::Field;
    }

    /// Feed a key press, row click or outside click.
    ///
    /// Returns whether the input was consumed.
    pub fn handle_input(&mut self, input: UserInput) -> bool {
        let state = NavState {
            open: self.selection.is_open(),
            visible: self.popup.is_visible(),
            len: self.selection.suggestions().len(),
            highlighted: self.selection.highlighted(),
            focus: self.focus,
        };

        match navigate(input, &state) {
            NavAction::Ignore => false,
            NavAction::Highlight { index, focus } => {
                if let SelectionState::Open { highlighted, .. } = &mut self.selection {
                    *highlighted = Some(index);
                }
                self.popup.set_highlighted(Some(index));
                if focus == Focus::List && self.focus != Focus::List {
                    self.popup.focus();
                }
                self.focus = focus;
                true
            }
            NavAction::Commit(index) => {
                let label = self.selection.suggestions()[index].label.clone();
                self.apply_selection(&label);
                true
            }
            NavAction::Dismiss { refocus_field } => {
                self.dismiss();
                if refocus_field {
                    self.field.focus();
                }
                true
            }
        }
    }

    /// Close the popup without touching the text or the committed address
    pub fn dismiss(&mut self) {
        self.selection = SelectionState::Closed;
        self.popup.hide();
        self.focus = Focus::Field;
    }

    /// Commit `label` as the chosen address.
    ///
    /// A label missing from the cache still updates the field but leaves the
    /// committed address as it was.
    pub fn apply_selection(&mut self, label: &str) {
        // Nothing in flight may reopen the popup over a committed choice
        self.debouncer.cancel();
        self.generation += 1;
        self.activity = Activity::Idle;

        self.text = label.to_string();
        self.field.set_text(label);
        self.field.set_caret(label.chars().count());
        self.dismiss();
        self.field.focus();

        match self.cache.get(label) {
            Some(address) => {
                self.address = address.clone();
                info!("Selected address: {}", label);
                self.notify();
            }
            None => debug!("no cached record for '{}'", label),
        }
    }

    /// Register the selection listener, replacing any previous one.
    ///
    /// The listener is called right away with the address currently held
    /// (the zero value if nothing was committed), then after every commit.
    pub fn set_on_address_selected<F>(&mut self, listener: F)
    where
        F: FnMut(&AddressResult) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.address);
        }
    }

    /// Current field text
    pub fn selected_address(&self) -> &str {
        &self.text
    }

    pub fn address(&self) -> &AddressResult {
        &self.address
    }

    pub fn neighborhood(&self) -> &str {
        &self.address.neighborhood
    }

    pub fn city(&self) -> &str {
        &self.address.city
    }

    pub fn state(&self) -> &str {
        &self.address.state
    }

    pub fn full_address(&self) -> &str {
        &self.address.full_address
    }

    pub fn latitude(&self) -> f64 {
        self.address.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.address.longitude
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn suggestions(&self) -> &[SuggestionEntry] {
        self.selection.suggestions()
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn phase(&self) -> Phase {
        match self.activity {
            Activity::Debouncing { generation } => Phase::Debouncing { generation },
            Activity::Fetching { generation } => Phase::Fetching { generation },
            Activity::Idle => match &self.selection {
                SelectionState::Open {
                    generation,
                    highlighted,
                    ..
                } if self.popup.is_visible() => Phase::Open {
                    generation: *generation,
                    highlighted: *highlighted,
                },
                _ if self.text.is_empty() => Phase::Idle,
                _ => Phase::Closed,
            },
        }
    }

    pub fn popup(&self) -> &P {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut P {
        &mut self.popup
    }

    pub fn field(&self) -> &T {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut T {
        &mut self.field
    }
}
