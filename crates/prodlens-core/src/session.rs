//! Per-view request bookkeeping.
//!
//! A [`RequestSlot`] holds the result currently shown by a view plus a loading
//! flag. Each request takes a [`Ticket`]; only the newest ticket may write the
//! slot, so a slow earlier response cannot overwrite a newer one.

/// Generation handle for one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Outcome of [`RequestSlot::settle`].
#[derive(Debug)]
pub enum Settled<E> {
    /// The result replaced the slot's contents.
    Applied,
    /// The newest request failed; the previous contents are untouched.
    Failed(E),
    /// A newer request was issued meanwhile; the outcome was discarded.
    Stale,
}

#[derive(Debug)]
pub struct RequestSlot<T> {
    current: Option<T>,
    generation: u64,
    loading: bool,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            current: None,
            generation: 0,
            loading: false,
        }
    }
}

impl<T> RequestSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the slot as loading and returns a ticket that supersedes every
    /// earlier one.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.loading = true;
        Ticket(self.generation)
    }

    /// Records the outcome of the request identified by `ticket`.
    ///
    /// The loading flag clears only when the newest request settles.
    pub fn settle<E>(&mut self, ticket: Ticket, outcome: Result<T, E>) -> Settled<E> {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                newest = self.generation,
                "discarding stale response"
            );
            return Settled::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(value) => {
                self.current = Some(value);
                Settled::Applied
            }
            Err(err) => Settled::Failed(err),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.current.take()
    }
}
