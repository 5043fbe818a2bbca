//! Access resolution: which keys a host may see.
//!
//! Given a hostname and a presented token:
//!
//! 1. the host must exist (`HostNotFound`)
//! 2. the token must match (`Unauthorized`)
//! 3. candidates are the host's direct users plus the users of every known
//!    group it references, deduplicated by first occurrence
//! 4. candidates without keys are skipped; none left is `NoAuthorizedUsers`
//! 5. the remaining users' keys are concatenated in order
//!
//! Resolution is read-only and safe to run from any number of callers.

mod payload;
mod resolver;

pub use payload::AuthorizedKeys;
pub use resolver::{candidate_users, resolve_with, AccessResolver};
