/// Delay before a search keystroke is considered settled.
pub(crate) const SEARCH_DEBOUNCE_MS: i32 = 500;

/// Receipt for one scheduled emission. Only the most recent ticket can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DebounceTicket {
    generation: u64,
    pub delay_ms: i32,
}

/// Trailing-edge debounce state.
///
/// The caller owns the single-shot timer: after each `push`, cancel the
/// previous timer and schedule a new one for `ticket.delay_ms`; when it
/// elapses, hand the ticket to `fire`. A ticket superseded by a later push
/// never emits, even if its timer could not be cancelled.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer<T> {
    delay_ms: i32,
    generation: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    /// Record a new raw value, discarding whatever was waiting.
    pub fn push(&mut self, value: T) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some((self.generation, value));
        DebounceTicket {
            generation: self.generation,
            delay_ms: self.delay_ms,
        }
    }

    /// The timer for `ticket` elapsed. Emits the settled value if no newer
    /// input arrived in the meantime.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        match &self.pending {
            Some((generation, _)) if *generation == ticket.generation => {
                self.pending.take().map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS)
    }
}
