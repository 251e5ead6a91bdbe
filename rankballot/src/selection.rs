use crate::lines::Lines;
use crate::*;
use std::io::BufRead;

/// A voter's ranking: distinct catalog positions in the order they were chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    positions: Vec<usize>,

    // chosen[p - 1] is set once position p has been ranked
    chosen: Vec<bool>,
}

impl Selection {
    fn new(num_options: usize) -> Self {
        Selection {
            positions: Vec::with_capacity(num_options),
            chosen: vec![false; num_options],
        }
    }

    /// Ranked positions, highest rank first
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of options being ranked
    pub fn num_options(&self) -> usize {
        self.chosen.len()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// A selection is complete once every option has been ranked exactly once.
    pub fn is_complete(&self) -> bool {
        self.positions.len() == self.chosen.len()
    }

    pub fn contains(&self, position: usize) -> bool {
        position >= 1 && position <= self.chosen.len() && self.chosen[position - 1]
    }

    fn push(&mut self, position: usize) {
        self.chosen[position - 1] = true;
        self.positions.push(position);
    }
}

/// State of a selection session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Collecting(Selection),
    Complete(Selection),
}

/// Outcome of a successfully submitted token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Accepted { position: usize, remaining: usize },
    Complete,
}

/// Collects a full ranking of a catalog's options, one token at a time.
///
/// Bad tokens are rejected with a `SelectionError` and leave the session where it
/// was. The session becomes `Complete` when every option has been ranked, after
/// which further tokens are ignored.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    state: SessionState,
}

impl SelectionSession {
    /// Start an empty session over `num_options` options
    pub fn new(num_options: usize) -> Self {
        let selection = Selection::new(num_options);
        let state = if selection.is_complete() {
            SessionState::Complete(selection)
        } else {
            SessionState::Collecting(selection)
        };

        SelectionSession { state }
    }

    /// Start an empty session over the options of a catalog
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.len())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Complete(_))
    }

    /// The selection so far, complete or not
    pub fn selection(&self) -> &Selection {
        match &self.state {
            SessionState::Collecting(selection) | SessionState::Complete(selection) => selection,
        }
    }

    /// Submit one user-entered token.
    pub fn submit(&mut self, token: &str) -> Result<Progress, SelectionError> {
        let partial = match &mut self.state {
            SessionState::Complete(_) => return Ok(Progress::Complete),
            SessionState::Collecting(partial) => partial,
        };

        let value: i32 = token
            .parse()
            .map_err(|_| SelectionError::InvalidToken(token.to_owned()))?;

        let max = partial.num_options();
        if value < 1 || value as u64 > max as u64 {
            return Err(SelectionError::OutOfRange { value, max });
        }

        let position = value as usize;
        if partial.contains(position) {
            return Err(SelectionError::DuplicateEntry(position));
        }

        partial.push(position);

        if partial.is_complete() {
            let selection = std::mem::replace(partial, Selection::new(0));
            self.state = SessionState::Complete(selection);
            return Ok(Progress::Complete);
        }

        Ok(Progress::Accepted {
            position,
            remaining: max - partial.len(),
        })
    }

    /// Finish the session, yielding the completed selection.
    pub fn into_complete(self) -> Result<Selection, Error> {
        match self.state {
            SessionState::Complete(selection) => Ok(selection),
            SessionState::Collecting(partial) => Err(Error::IncompleteSelection {
                collected: partial.len(),
                expected: partial.num_options(),
            }),
        }
    }
}

/// Read selections from `input`, one token per line, until every option in the
/// catalog has been ranked.
///
/// Rejected tokens are reported to `diagnostics` and collection carries on with
/// the next line. Running out of input before the ranking is complete is fatal.
pub fn collect_selection<R, D>(catalog: &Catalog, input: R, diagnostics: &D) -> Result<Selection, Error>
where
    R: BufRead,
    D: Diagnostics + ?Sized,
{
    let mut session = SelectionSession::for_catalog(catalog);
    let mut lines = Lines::new(input);

    while !session.is_complete() {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                let partial = session.selection();
                return Err(Error::PrematureEnd {
                    collected: partial.len(),
                    expected: partial.num_options(),
                });
            }
        };

        match session.submit(&line) {
            Ok(Progress::Accepted {
                position,
                remaining,
            }) => diagnostics.report(&Event::PositionAccepted {
                position,
                remaining,
            }),
            Ok(Progress::Complete) => {}
            Err(error) => diagnostics.report(&Event::TokenRejected { token: line, error }),
        }
    }

    let selection = session.into_complete()?;
    diagnostics.report(&Event::SelectionComplete {
        positions: selection.positions().to_vec(),
    });

    Ok(selection)
}
