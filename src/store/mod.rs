pub mod backend;
pub mod file;

pub use backend::{MemoryStorage, Storage};
pub use file::FileStorage;

use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::Poll;

/// Persisted key for the poll collection (JSON array, newest first).
pub const POLLS_KEY: &str = "ops_polls";
/// Persisted key for the voted-set (JSON array of poll id strings).
pub const USER_VOTES_KEY: &str = "ops_user_votes";

/// CRUD over the persisted poll collection and the voted-set.
///
/// Collections are read whole and written whole on every mutation. Absent
/// data decodes to empty collections; corrupt JSON is a typed error.
pub struct PollStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PollStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All polls, newest first.
    pub fn polls(&self) -> Result<Vec<Poll>> {
        self.load_collection(POLLS_KEY)
    }

    /// Poll ids the current user has already voted on.
    pub fn voted_polls(&self) -> Result<Vec<String>> {
        self.load_collection(USER_VOTES_KEY)
    }

    pub fn get_poll(&self, poll_id: &str) -> Result<Poll> {
        self.polls()?
            .into_iter()
            .find(|p| p.id == poll_id)
            .ok_or_else(|| Error::PollNotFound(poll_id.to_string()))
    }

    /// Build a poll with zero counts, insert it at the front of the
    /// collection, persist, and return the new id.
    ///
    /// No duplicate/empty validation happens here; that is the caller's job.
    pub fn create_poll(
        &mut self,
        question: &str,
        options: &[String],
        expiry_days: Option<i64>,
    ) -> Result<String> {
        let mut polls = self.polls()?;
        let mut poll = Poll::new(question, options, expiry_days);

        // Ids are millisecond-derived; bump on a same-millisecond collision.
        let mut millis: i64 = poll.created_at.timestamp_millis();
        while polls.iter().any(|p| p.id == poll.id) {
            millis += 1;
            poll.id = format!("poll_{millis}");
        }

        let poll_id = poll.id.clone();
        polls.insert(0, poll);
        self.save_collection(POLLS_KEY, &polls)?;

        info!("created poll {poll_id}: {question}");
        Ok(poll_id)
    }

    /// Remove a poll and its voted-set entry. No-op when the id is absent.
    pub fn delete_poll(&mut self, poll_id: &str) -> Result<()> {
        let mut polls = self.polls()?;
        polls.retain(|p| p.id != poll_id);
        self.save_collection(POLLS_KEY, &polls)?;

        let mut voted = self.voted_polls()?;
        voted.retain(|id| id != poll_id);
        self.save_collection(USER_VOTES_KEY, &voted)?;

        info!("deleted poll {poll_id}");
        Ok(())
    }

    /// Record one vote for `option` on `poll_id`.
    ///
    /// Fails with `AlreadyVoted` when the poll is in the voted-set,
    /// `PollNotFound` when the id is unknown, and `UnknownOption` when the
    /// label was never declared on the poll. A declared option whose count
    /// key is missing (legacy data) is created at zero, then incremented.
    pub fn submit_vote(&mut self, poll_id: &str, option: &str) -> Result<()> {
        if self.has_voted(poll_id)? {
            return Err(Error::AlreadyVoted(poll_id.to_string()));
        }

        let mut polls = self.polls()?;
        let poll = polls
            .iter_mut()
            .find(|p| p.id == poll_id)
            .ok_or_else(|| Error::PollNotFound(poll_id.to_string()))?;

        if !poll.options.iter().any(|opt| opt == option) {
            return Err(Error::UnknownOption {
                poll_id: poll_id.to_string(),
                option: option.to_string(),
            });
        }

        *poll.votes.entry(option.to_string()).or_insert(0) += 1;
        self.save_collection(POLLS_KEY, &polls)?;

        let mut voted = self.voted_polls()?;
        voted.push(poll_id.to_string());
        self.save_collection(USER_VOTES_KEY, &voted)?;

        info!("recorded vote for \"{option}\" on {poll_id}");
        Ok(())
    }

    /// Voted-set membership for `poll_id`.
    pub fn has_voted(&self, poll_id: &str) -> Result<bool> {
        Ok(self.voted_polls()?.iter().any(|id| id == poll_id))
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.storage.load(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| Error::CorruptData {
                key: key.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items).map_err(|source| Error::CorruptData {
            key: key.to_string(),
            source,
        })?;
        self.storage.save(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PollStore<MemoryStorage> {
        PollStore::new(MemoryStorage::new())
    }

    fn labels(opts: &[&str]) -> Vec<String> {
        opts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn create_returns_id_and_inserts_newest_first() {
        let mut store = store();
        let first = store.create_poll("First?", &labels(&["a", "b"]), None).unwrap();
        let second = store.create_poll("Second?", &labels(&["x"]), None).unwrap();
        assert_ne!(first, second);

        let polls = store.polls().unwrap();
        assert_eq!(polls.len(), 2);
        assert_eq!(polls[0].id, second);
        assert_eq!(polls[1].id, first);
    }

    #[test]
    fn vote_increments_and_marks_voted() {
        let mut store = store();
        let id = store.create_poll("Q", &labels(&["a", "b"]), None).unwrap();

        assert!(!store.has_voted(&id).unwrap());
        store.submit_vote(&id, "a").unwrap();

        let poll = store.get_poll(&id).unwrap();
        assert_eq!(poll.votes["a"], 1);
        assert_eq!(poll.votes["b"], 0);
        assert!(store.has_voted(&id).unwrap());
    }

    #[test]
    fn second_vote_is_rejected_and_counts_unchanged() {
        let mut store = store();
        let id = store.create_poll("Q", &labels(&["a", "b"]), None).unwrap();
        store.submit_vote(&id, "a").unwrap();

        let err = store.submit_vote(&id, "b").unwrap_err();
        assert!(matches!(err, Error::AlreadyVoted(_)));

        let poll = store.get_poll(&id).unwrap();
        assert_eq!(poll.votes["a"], 1);
        assert_eq!(poll.votes["b"], 0);
    }

    #[test]
    fn vote_on_unknown_poll_fails() {
        let mut store = store();
        let err = store.submit_vote("poll_0", "a").unwrap_err();
        assert!(matches!(err, Error::PollNotFound(_)));
    }

    #[test]
    fn vote_on_undeclared_option_fails() {
        let mut store = store();
        let id = store.create_poll("Q", &labels(&["a"]), None).unwrap();

        let err = store.submit_vote(&id, "write-in").unwrap_err();
        assert!(matches!(err, Error::UnknownOption { .. }));

        // The rejected label must not grow a tally bucket.
        let poll = store.get_poll(&id).unwrap();
        assert_eq!(poll.votes.len(), 1);
        assert!(!store.has_voted(&id).unwrap());
    }

    #[test]
    fn declared_option_missing_from_votes_map_counts_from_zero() {
        let mut store = store();
        let id = store.create_poll("Q", &labels(&["a", "b"]), None).unwrap();

        // Simulate legacy data where a declared option has no count key.
        let mut polls = store.polls().unwrap();
        polls[0].votes.remove("b");
        store.save_collection(POLLS_KEY, &polls).unwrap();

        store.submit_vote(&id, "b").unwrap();
        assert_eq!(store.get_poll(&id).unwrap().votes["b"], 1);
    }

    #[test]
    fn delete_removes_poll_and_voted_set_entry() {
        let mut store = store();
        let id = store.create_poll("Q", &labels(&["a"]), None).unwrap();
        store.submit_vote(&id, "a").unwrap();

        store.delete_poll(&id).unwrap();
        assert!(store.polls().unwrap().is_empty());
        assert!(!store.has_voted(&id).unwrap());

        // Voting after deletion fails as not-found, not already-voted.
        let err = store.submit_vote(&id, "a").unwrap_err();
        assert!(matches!(err, Error::PollNotFound(_)));
    }

    #[test]
    fn delete_of_absent_poll_is_a_no_op() {
        let mut store = store();
        store.delete_poll("poll_404").unwrap();
    }

    #[test]
    fn absent_data_defaults_to_empty_collections() {
        let store = store();
        assert!(store.polls().unwrap().is_empty());
        assert!(store.voted_polls().unwrap().is_empty());
    }

    #[test]
    fn corrupt_json_is_a_typed_error() {
        let mut storage = MemoryStorage::new();
        storage.save(POLLS_KEY, "{not json").unwrap();
        let store = PollStore::new(storage);

        let err = store.polls().unwrap_err();
        assert!(matches!(err, Error::CorruptData { ref key, .. } if key == POLLS_KEY));
    }
}
