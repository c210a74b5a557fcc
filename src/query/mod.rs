pub(crate) mod cache;
mod key;

pub(crate) use cache::{FetchTicket, Listener, QueryCache, QueryRead, QueryState, SubscriptionId};
#[cfg(test)]
pub(crate) use cache::QueryStatus;
pub(crate) use key::QueryKey;
