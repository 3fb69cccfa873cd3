//! Profile source port — where the profile of a request comes from.

use std::future::Future;

use powerlog_domain::error::PowerLogError;
use powerlog_domain::profile::Profile;

/// Produces the [`Profile`] a computation is run against.
///
/// Implementations validate what they read: a returned profile only holds
/// known states. Timestamp bounds depend on the computation and are checked
/// by the domain.
pub trait ProfileSource {
    /// Load the profile.
    fn load(&self) -> impl Future<Output = Result<Profile, PowerLogError>> + Send;
}
