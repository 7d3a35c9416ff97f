//! Generation counter for async requests.
//!
//! Every new request supersedes the previous one; a response is applied only
//! when it carries the latest token.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation != 0 && token.0 == self.generation
    }

    pub fn current(&self) -> Option<RequestToken> {
        (self.generation != 0).then_some(RequestToken(self.generation))
    }
}
