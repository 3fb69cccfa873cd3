//! In-memory profile source for hosts that already hold a parsed profile.

use std::future::Future;

use powerlog_domain::error::PowerLogError;
use powerlog_domain::profile::Profile;

use crate::ports::ProfileSource;

/// Serves a clone of the profile it was built with.
#[derive(Debug, Clone)]
pub struct InMemoryProfileSource {
    profile: Profile,
}

impl InMemoryProfileSource {
    #[must_use]
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }
}

impl ProfileSource for InMemoryProfileSource {
    fn load(&self) -> impl Future<Output = Result<Profile, PowerLogError>> + Send {
        let profile = self.profile.clone();
        async { Ok(profile) }
    }
}
