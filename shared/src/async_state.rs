/// Lifecycle of one view's result slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AsyncState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> AsyncState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            AsyncState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            AsyncState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one request issued from a [`RequestSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Result slot with last-write-wins settlement.
///
/// Every `begin` supersedes the tickets handed out before it, so only the most
/// recently issued request can move the slot out of `Loading`. Once dismissed
/// (the view went away) nothing settles anymore.
#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    state: AsyncState<T>,
    issued: u64,
    dismissed: bool,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            state: AsyncState::Idle,
            issued: 0,
            dismissed: false,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AsyncState<T> {
        &self.state
    }

    pub fn begin(&mut self) -> Ticket {
        self.issued = self.issued.wrapping_add(1);
        self.state = AsyncState::Loading;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.dismissed && ticket.0 == self.issued
    }

    /// Applies `outcome` if `ticket` is still current. Returns whether it was applied.
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = match outcome {
            Ok(value) => AsyncState::Success(value),
            Err(message) => AsyncState::Failure(message),
        };
        true
    }

    /// Fails without a request, superseding anything still in flight.
    pub fn fail_now(&mut self, message: impl Into<String>) {
        if self.dismissed {
            return;
        }
        self.issued = self.issued.wrapping_add(1);
        self.state = AsyncState::Failure(message.into());
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Transient notification; a clear only removes the notice it was scheduled for.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn post(&mut self, message: impl Into<String>) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.current = Some(Notice {
            id: self.next_id,
            message: message.into(),
        });
        self.next_id
    }

    pub fn clear(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|notice| notice.id == id) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
