use rankballot::*;
use std::cell::RefCell;
use std::io::Write;

/// Tells the voter about rejected entries on stderr, whatever the verbosity,
/// and forwards every event to `tracing`.
pub struct VoterFeedback<W: Write> {
    out: RefCell<W>,
}

impl VoterFeedback<std::io::Stderr> {
    pub fn stderr() -> Self {
        VoterFeedback::new(std::io::stderr())
    }
}

impl<W: Write> VoterFeedback<W> {
    pub fn new(out: W) -> Self {
        VoterFeedback {
            out: RefCell::new(out),
        }
    }
}

impl<W: Write> Diagnostics for VoterFeedback<W> {
    fn report(&self, event: &Event) {
        if let Event::TokenRejected { error, .. } = event {
            // Nowhere left to complain to if stderr is gone
            let _ = writeln!(self.out.borrow_mut(), "{}", error);
        }
        TracingDiagnostics.report(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_written() {
        let feedback = VoterFeedback::new(Vec::new());
        feedback.report(&Event::CatalogLoaded { options: 3 });
        feedback.report(&Event::TokenRejected {
            token: "1".into(),
            error: SelectionError::DuplicateEntry(1),
        });
        feedback.report(&Event::PositionAccepted {
            position: 2,
            remaining: 1,
        });

        let written = String::from_utf8(feedback.out.into_inner()).unwrap();
        assert_eq!(written, "duplicate entry: option 1 is already ranked\n");
    }
}
