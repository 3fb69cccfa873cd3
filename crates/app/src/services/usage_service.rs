//! Usage service — use-cases for measuring appliance usage and savings.

use powerlog_domain::epoch;
use powerlog_domain::error::PowerLogError;
use powerlog_domain::period::Period;
use powerlog_domain::report::{self, UsageReport};
use powerlog_domain::savings;
use powerlog_domain::usage;

use crate::ports::ProfileSource;

/// Application service running the usage computations against a profile
/// source and a configured [`Period`].
pub struct UsageService<S> {
    source: S,
    period: Period,
}

impl<S: ProfileSource> UsageService<S> {
    /// Create a new service backed by the given profile source.
    pub fn new(source: S, period: Period) -> Self {
        Self { source, period }
    }

    /// The period every computation is evaluated against.
    pub fn period(&self) -> &Period {
        &self.period
    }

    /// Powered minutes of a day-local profile.
    ///
    /// # Errors
    ///
    /// Returns [`PowerLogError::Validation`] when an event lies outside the
    /// day, or a source error propagated from the profile source.
    #[tracing::instrument(skip(self))]
    pub async fn usage(&self) -> Result<i64, PowerLogError> {
        let profile = self.source.load().await?;
        let minutes = usage::usage(&profile, &self.period)?;
        tracing::debug!(minutes, events = profile.events.len(), "computed usage");
        Ok(minutes)
    }

    /// Minutes saved by automatic shutoffs in a day-local profile.
    ///
    /// # Errors
    ///
    /// Returns [`PowerLogError::Validation`] when an event lies outside the
    /// day, or a source error propagated from the profile source.
    #[tracing::instrument(skip(self))]
    pub async fn savings(&self) -> Result<i64, PowerLogError> {
        let profile = self.source.load().await?;
        let minutes = savings::savings(&profile, &self.period)?;
        tracing::debug!(minutes, events = profile.events.len(), "computed savings");
        Ok(minutes)
    }

    /// Powered minutes of one day of a month-scale profile.
    ///
    /// The day number is checked before the profile is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`PowerLogError::Validation`] when `day` is outside the
    /// configured range or an event lies outside the epoch, or a source
    /// error propagated from the profile source.
    #[tracing::instrument(skip(self))]
    pub async fn usage_for_day(&self, day: i64) -> Result<i64, PowerLogError> {
        self.period.check_day(day)?;
        let profile = self.source.load().await?;
        let minutes = epoch::usage_for_day(&profile, day, &self.period)?;
        tracing::debug!(minutes, "computed usage for day");
        Ok(minutes)
    }

    /// Usage of every configured day of a month-scale profile.
    ///
    /// # Errors
    ///
    /// Returns [`PowerLogError::Validation`] when an event lies outside the
    /// epoch, or a source error propagated from the profile source.
    #[tracing::instrument(skip(self))]
    pub async fn daily_usage(&self) -> Result<UsageReport, PowerLogError> {
        let profile = self.source.load().await?;
        let report = report::daily_usage(&profile, &self.period)?;
        tracing::debug!(
            days = report.days.len(),
            total_minutes = report.total_minutes,
            "computed daily usage"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerlog_domain::error::ValidationError;
    use powerlog_domain::event::Event;
    use powerlog_domain::profile::Profile;
    use powerlog_domain::state::ApplianceState;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::in_memory::InMemoryProfileSource;

    struct FailingSource;

    impl ProfileSource for FailingSource {
        fn load(&self) -> impl Future<Output = Result<Profile, PowerLogError>> + Send {
            let err = std::io::Error::new(std::io::ErrorKind::NotFound, "profile.json");
            async move { Err(PowerLogError::Source(Box::new(err))) }
        }
    }

    #[derive(Default)]
    struct CountingSource {
        loads: AtomicUsize,
    }

    impl ProfileSource for CountingSource {
        fn load(&self) -> impl Future<Output = Result<Profile, PowerLogError>> + Send {
            self.loads.fetch_add(1, Ordering::SeqCst);
            async { Ok(Profile::constant(ApplianceState::On)) }
        }
    }

    fn make_service(profile: Profile) -> UsageService<InMemoryProfileSource> {
        UsageService::new(InMemoryProfileSource::new(profile), Period::default())
    }

    fn month_profile() -> Profile {
        Profile::builder()
            .initial(ApplianceState::On)
            .events([
                Event::off(500),
                Event::on(900),
                Event::off(1400),
                Event::on(1700),
                Event::off(1900),
                Event::on(2599),
            ])
            .build()
    }

    #[tokio::test]
    async fn should_compute_usage_of_loaded_profile() {
        let svc = make_service(
            Profile::builder()
                .initial(ApplianceState::On)
                .events([Event::off(126), Event::on(833)])
                .build(),
        );
        assert_eq!(svc.usage().await.unwrap(), 126 + (1440 - 833));
    }

    #[tokio::test]
    async fn should_compute_savings_of_loaded_profile() {
        let svc = make_service(
            Profile::builder()
                .initial(ApplianceState::On)
                .events([Event::auto_off(200), Event::off(300), Event::on(500)])
                .build(),
        );
        assert_eq!(svc.savings().await.unwrap(), 300);
    }

    #[tokio::test]
    async fn should_compute_usage_for_day() {
        let svc = make_service(month_profile());
        assert_eq!(
            svc.usage_for_day(2).await.unwrap(),
            (1900 - 1700) + (2880 - 2599)
        );
    }

    #[tokio::test]
    async fn should_reject_invalid_day_before_loading_profile() {
        let svc = UsageService::new(CountingSource::default(), Period::default());

        let result = svc.usage_for_day(366).await;

        assert!(matches!(
            result,
            Err(PowerLogError::Validation(ValidationError::InvalidDay { .. }))
        ));
        assert_eq!(svc.source.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_build_daily_report() {
        let svc = make_service(month_profile());
        let report = svc.daily_usage().await.unwrap();
        assert_eq!(report.days.len(), 365);
        assert_eq!(report.day(2), Some(481));
        assert_eq!(report.day(3), Some(1440));
    }

    #[tokio::test]
    async fn should_reject_day_local_timestamp_out_of_range() {
        let svc = make_service(month_profile());
        let err = svc.usage().await.unwrap_err();
        assert_eq!(err.kind(), "timestamp_out_of_range");
    }

    #[tokio::test]
    async fn should_propagate_source_errors() {
        let svc = UsageService::new(FailingSource, Period::default());
        let err = svc.usage().await.unwrap_err();
        assert!(matches!(err, PowerLogError::Source(_)));
        assert!(svc.daily_usage().await.is_err());
    }

    #[tokio::test]
    async fn should_evaluate_against_configured_period() {
        let period = Period {
            length: 60,
            first_day: 1,
            last_day: 7,
        };
        let svc = UsageService::new(
            InMemoryProfileSource::new(Profile::constant(ApplianceState::On)),
            period,
        );
        assert_eq!(svc.usage().await.unwrap(), 60);
        assert_eq!(svc.daily_usage().await.unwrap().total_minutes, 7 * 60);
        assert!(svc.usage_for_day(8).await.is_err());
    }
}
