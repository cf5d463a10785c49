use std::fmt;

/// Identifier of a question within one survey.
///
/// Ids are unique inside a single survey and assigned in increasing order
/// while the survey is being authored. They carry no meaning across surveys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Create an id from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<QuestionId> for u64 {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

/// Hands out question ids for one authoring session.
///
/// Every draft owns its own generator, so two sessions never share
/// or leak a counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator whose first id is `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Create a generator that continues after the given id.
    ///
    /// After `u64::MAX` the counter starts over at `1`.
    pub fn after(last: QuestionId) -> Self {
        Self {
            next: Self::successor(last.get()),
        }
    }

    fn successor(raw: u64) -> u64 {
        raw.checked_add(1).unwrap_or(1)
    }

    /// Allocate the next id.
    ///
    /// Ids only repeat once the counter has wrapped; use
    /// [`next_unused`](Self::next_unused) when other ids may already exist.
    pub fn next_id(&mut self) -> QuestionId {
        let id = QuestionId(self.next);
        self.next = Self::successor(self.next);
        id
    }

    /// Allocate the next id for which `in_use` is false.
    pub fn next_unused(&mut self, in_use: impl Fn(QuestionId) -> bool) -> QuestionId {
        loop {
            let id = self.next_id();
            if !in_use(id) {
                return id;
            }
        }
    }

    /// Peek at the id the next call to [`next_id`](Self::next_id) returns.
    pub fn peek(&self) -> QuestionId {
        QuestionId(self.next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), QuestionId::new(1));
        assert_eq!(ids.next_id(), QuestionId::new(2));
    }

    #[test]
    fn generators_are_independent() {
        let mut first = IdGenerator::new();
        let mut second = IdGenerator::new();
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id(), QuestionId::new(1));
        assert_eq!(first.peek(), QuestionId::new(3));
    }

    #[test]
    fn after_continues_past_last() {
        let mut ids = IdGenerator::after(QuestionId::new(7));
        assert_eq!(ids.next_id(), QuestionId::new(8));
    }

    #[test]
    fn wraps_instead_of_repeating_max() {
        let mut ids = IdGenerator::after(QuestionId::new(u64::MAX - 1));
        assert_eq!(ids.next_id(), QuestionId::new(u64::MAX));
        assert_eq!(ids.next_id(), QuestionId::new(1));

        let mut ids = IdGenerator::after(QuestionId::new(u64::MAX));
        assert_eq!(ids.peek(), QuestionId::new(1));
    }

    #[test]
    fn next_unused_skips_taken_ids() {
        let taken = [QuestionId::new(1), QuestionId::new(2), QuestionId::new(4)];
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_unused(|id| taken.contains(&id)), QuestionId::new(3));
        assert_eq!(ids.next_unused(|id| taken.contains(&id)), QuestionId::new(5));
    }

    #[test]
    fn display() {
        assert_eq!(QuestionId::new(42).to_string(), "42");
    }
}
