pub mod guard;
pub mod password;
pub mod token;

pub use guard::{authorize, ensure_owner, Access};
pub use token::{Clock, SystemClock, TokenAuthority, TokenError, TokenManager};

/// Authenticated user id a call is attributed to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
