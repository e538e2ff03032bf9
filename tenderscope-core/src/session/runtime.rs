use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::effects::{Effect, TimerKey};
use super::messages::Message;
use super::state::BrowseSession;
use super::update::update;
use crate::service::SessionServices;

/// Cloneable sender the host uses to feed user events into a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl SessionHandle {
    /// Queue `message`. Returns `false` once the runtime is gone.
    pub fn send(&self, message: Message) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// Single-writer event loop for one [`BrowseSession`].
///
/// Messages are applied one at a time; the effects they produce become
/// spawned tasks whose results come back as messages on the same queue.
/// Timers live in named slots and are aborted when re-armed or cancelled.
/// Collaborator calls are never aborted; stale answers are dropped by the
/// state machine when they arrive.
#[derive(Debug)]
pub struct SessionRuntime {
    session: BrowseSession,
    services: SessionServices,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    timers: HashMap<TimerKey, JoinHandle<()>>,
}

impl SessionRuntime {
    pub fn new(session: BrowseSession, services: SessionServices) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            services,
            tx,
            rx,
            timers: HashMap::new(),
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn session(&self) -> &BrowseSession {
        &self.session
    }

    /// Apply `message` now and start whatever it asks for.
    pub fn dispatch(&mut self, message: Message) {
        let effects = update(&mut self.session, message);
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Apply everything already queued without waiting. Returns how many
    /// messages were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.dispatch(message);
            handled += 1;
        }
        handled
    }

    /// Wait for the next queued message and apply it.
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => {
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    /// Process messages until `shutdown` resolves.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                received = self.rx.recv() => match received {
                    Some(message) => self.dispatch(message),
                    None => break,
                },
            }
        }
    }

    /// Process messages for `duration` of (possibly paused) tokio time.
    pub async fn run_for(&mut self, duration: Duration) {
        self.run_until(tokio::time::sleep(duration)).await;
    }

    fn execute(&mut self, effect: Effect) {
        trace!(effect = effect.as_str(), "executing effect");

        match effect {
            Effect::Schedule {
                timer,
                delay,
                message,
            } => {
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(*message);
                });
                if let Some(previous) = self.timers.insert(timer, handle) {
                    previous.abort();
                }
            }

            Effect::Cancel(timer) => {
                if let Some(handle) = self.timers.remove(&timer) {
                    handle.abort();
                }
            }

            Effect::Fetch { token, filter } => {
                let catalog = Arc::clone(&self.services.catalog);
                self.spawn(async move {
                    let result = catalog.fetch_results(&filter).await;
                    Message::ResultsLoaded { token, result }
                });
            }

            Effect::FetchSuggestions {
                field,
                query,
                generation,
            } => {
                let catalog = Arc::clone(&self.services.catalog);
                self.spawn(async move {
                    let result = catalog.fetch_suggestions(field, &query).await;
                    Message::RemoteSuggestionsLoaded {
                        field,
                        generation,
                        result,
                    }
                });
            }

            Effect::LoadCorpus => {
                let catalog = Arc::clone(&self.services.catalog);
                self.spawn(async move {
                    Message::CorpusLoaded(catalog.autosuggest_corpus().await)
                });
            }

            Effect::PersistShortlist(id) => {
                let catalog = Arc::clone(&self.services.catalog);
                self.spawn(async move {
                    let result = catalog.toggle_shortlist(&id).await;
                    Message::ShortlistPersisted { id, result }
                });
            }

            Effect::CheckAuth => {
                let catalog = Arc::clone(&self.services.catalog);
                self.spawn(async move {
                    Message::AuthChecked(catalog.check_authenticated().await)
                });
            }

            Effect::WriteUrl(url) => {
                debug!(query = %url.query, mode = ?url.mode, "writing address bar");
                self.services.host.write_url(&url);
            }

            Effect::Focus(field) => self.services.host.focus(field),
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Message> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = task.await;
            let _ = tx.send(message);
        });
    }
}

impl Drop for SessionRuntime {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}
