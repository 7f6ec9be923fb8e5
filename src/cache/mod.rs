/// Home page caching and invalidation
///
/// An implicit framework-level page cache would let deleted posts linger
/// until expiry. This cache is explicit instead: a declared TTL plus an
/// invalidation hook that every post mutation calls.
mod home_cache;

pub use home_cache::HomeCache;
