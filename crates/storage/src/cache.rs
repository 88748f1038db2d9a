use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use thiserror::Error;

/// Upper bound on distinct eth1 data candidates tracked at once.
pub const MAX_ETH1_DATA_VOTE_SIZE: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Eth1VoteCacheError {
    #[error("No eth1 data vote for deposit root 0x{0}")]
    VoteNotFound(String),
}

/// Running tally of block proposer votes for one eth1 data candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eth1DataVote {
    pub deposit_root: Vec<u8>,
    pub vote_count: u64,
}

/// In-memory LRU cache of eth1 data vote counts, keyed by deposit root.
#[derive(Debug)]
pub struct Eth1DataVoteCache {
    votes: Mutex<LruCache<Vec<u8>, Eth1DataVote>>,
}

impl Eth1DataVoteCache {
    pub fn new() -> Self {
        Self::with_capacity(
            NonZeroUsize::new(MAX_ETH1_DATA_VOTE_SIZE).expect("Invalid cache size"),
        )
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            votes: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Insert `vote`, replacing any existing tally for the same deposit root.
    pub fn add_vote(&self, vote: Eth1DataVote) {
        self.votes.lock().put(vote.deposit_root.clone(), vote);
    }

    /// Add one vote for `deposit_root` and return the new count.
    pub fn increment_vote(&self, deposit_root: &[u8]) -> Result<u64, Eth1VoteCacheError> {
        let mut votes = self.votes.lock();
        let vote = votes
            .get_mut(deposit_root)
            .ok_or_else(|| Eth1VoteCacheError::VoteNotFound(hex_string(deposit_root)))?;
        vote.vote_count += 1;
        Ok(vote.vote_count)
    }

    /// Vote count for `deposit_root`, zero if it was never added or has been evicted.
    pub fn vote_count(&self, deposit_root: &[u8]) -> u64 {
        self.votes
            .lock()
            .get(deposit_root)
            .map(|vote| vote.vote_count)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.votes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.lock().is_empty()
    }
}

impl Default for Eth1DataVoteCache {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_string(bytes: &[u8]) -> String {
    alloy_primitives::hex::encode(bytes)
}
