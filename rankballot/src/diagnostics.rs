use crate::*;
use std::cell::RefCell;

/// Something worth telling the operator about while a ballot is being made or checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CatalogLoaded { options: usize },
    TokenRejected { token: String, error: SelectionError },
    PositionAccepted { position: usize, remaining: usize },
    SelectionComplete { positions: Vec<usize> },
    PayloadSigned { payload_len: usize, digest: DigestAlgorithm },
    ArtifactVerified { valid: bool, digest: DigestAlgorithm },
}

/// A sink for diagnostic events.
///
/// Components that want to report progress take a `&D: Diagnostics` instead of
/// logging through global state.
pub trait Diagnostics {
    fn report(&self, event: &Event);
}

/// Discards every event
impl Diagnostics for () {
    fn report(&self, _event: &Event) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, event: &Event) {
        (**self).report(event)
    }
}

/// Forwards events to `tracing`.
///
/// Rejected entries are logged at debug level; showing them to the voter is up
/// to the front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: &Event) {
        match event {
            Event::CatalogLoaded { options } => {
                tracing::info!(options, "catalog loaded");
            }
            Event::TokenRejected { token, error } => {
                tracing::debug!(token = token.as_str(), "{}", error);
            }
            Event::PositionAccepted {
                position,
                remaining,
            } => {
                tracing::debug!(position, remaining, "position accepted");
            }
            Event::SelectionComplete { positions } => {
                tracing::info!(?positions, "selection complete");
            }
            Event::PayloadSigned {
                payload_len,
                digest,
            } => {
                tracing::info!(payload_len, %digest, "payload signed");
            }
            Event::ArtifactVerified { valid, digest } => {
                tracing::info!(valid, %digest, "artifact verified");
            }
        }
    }
}

/// Keeps every event in memory, in the order reported.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: RefCell<Vec<Event>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Only the rejection errors, handy when checking what the voter was told.
    pub fn rejections(&self) -> Vec<SelectionError> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::TokenRejected { error, .. } => Some(error.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}
