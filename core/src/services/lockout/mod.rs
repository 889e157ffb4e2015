//! Login-attempt throttling and account lockout.
//!
//! The policy is a pure state machine over the Account's counter fields:
//!
//! ```text
//! Unlocked --(failures >= threshold)--> Locked(until = now + duration)
//! Locked   --(time elapses)----------> Unlocked
//! ```
//!
//! Persistence of a failure transition must be read-modify-write
//! consistent per account; repositories apply `record_failure` under
//! their own concurrency guard (see `AccountRepository`).

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::entities::account::Account;

/// Lockout thresholds
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failed attempts before the account is locked
    pub threshold: u32,

    /// How long a lock lasts, in seconds
    pub lock_duration_seconds: i64,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: 5,
            lock_duration_seconds: 600, // 10 minutes
        }
    }
}

impl LockoutPolicy {
    pub fn new(threshold: u32, lock_duration_seconds: i64) -> Self {
        Self {
            threshold,
            lock_duration_seconds,
        }
    }

    /// True iff a lock is set and still in the future
    pub fn is_locked(&self, account: &Account) -> bool {
        Self::is_locked_at(account.lock_until, Utc::now())
    }

    fn is_locked_at(lock_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        matches!(lock_until, Some(until) if until > now)
    }

    /// Record a failed login attempt.
    ///
    /// An expired lock resets the counter to 1 and clears the lock;
    /// otherwise the counter increments, and reaching the threshold while
    /// not already locked sets the lock.
    pub fn record_failure(&self, account: &mut Account) {
        let now = Utc::now();

        if matches!(account.lock_until, Some(until) if until < now) {
            account.login_attempts = 1;
            account.lock_until = None;
        } else {
            account.login_attempts += 1;
            if account.login_attempts >= self.threshold
                && !Self::is_locked_at(account.lock_until, now)
            {
                account.lock_until = Some(now + Duration::seconds(self.lock_duration_seconds));
                warn!(
                    account_id = %account.id,
                    attempts = account.login_attempts,
                    "account locked after repeated failed logins"
                );
            }
        }
        account.updated_at = now;
    }

    /// Record a successful login: counter cleared, lock cleared
    pub fn record_success(&self, account: &mut Account) {
        account.login_attempts = 0;
        account.lock_until = None;
        account.updated_at = Utc::now();
    }

    /// Attempts remaining before lockout, floored at 0
    pub fn attempts_remaining(&self, account: &Account) -> u32 {
        self.threshold.saturating_sub(account.login_attempts)
    }

    /// Minutes until the current lock expires (ceiling, at least 1);
    /// None when not locked
    pub fn remaining_lock_minutes(&self, account: &Account) -> Option<i64> {
        let until = account.lock_until?;
        let now = Utc::now();
        if until <= now {
            return None;
        }
        let seconds = (until - now).num_seconds();
        Some(((seconds + 59) / 60).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new("Test".to_string(), "test@example.com".to_string())
    }

    #[test]
    fn test_five_failures_lock_the_account() {
        let policy = LockoutPolicy::default();
        let mut account = account();

        for i in 1..=4 {
            policy.record_failure(&mut account);
            assert_eq!(account.login_attempts, i);
            assert!(!policy.is_locked(&account), "locked after {i} failures");
        }

        policy.record_failure(&mut account);
        assert_eq!(account.login_attempts, 5);
        assert!(policy.is_locked(&account));
        assert!(policy.remaining_lock_minutes(&account).is_some());
    }

    #[test]
    fn test_failure_while_locked_does_not_extend_lock() {
        let policy = LockoutPolicy::default();
        let mut account = account();
        for _ in 0..5 {
            policy.record_failure(&mut account);
        }
        let lock_until = account.lock_until;

        policy.record_failure(&mut account);
        assert_eq!(account.login_attempts, 6);
        assert_eq!(account.lock_until, lock_until);
    }

    #[test]
    fn test_expired_lock_resets_counter_to_one() {
        let policy = LockoutPolicy::default();
        let mut account = account();
        for _ in 0..5 {
            policy.record_failure(&mut account);
        }

        // Force the lock into the past
        account.lock_until = Some(Utc::now() - Duration::seconds(1));
        assert!(!policy.is_locked(&account));

        policy.record_failure(&mut account);
        assert_eq!(account.login_attempts, 1);
        assert!(account.lock_until.is_none());
        assert!(!policy.is_locked(&account));
    }

    #[test]
    fn test_success_clears_counter_and_lock() {
        let policy = LockoutPolicy::default();
        let mut account = account();
        for _ in 0..5 {
            policy.record_failure(&mut account);
        }

        policy.record_success(&mut account);
        assert_eq!(account.login_attempts, 0);
        assert!(account.lock_until.is_none());
        assert!(!policy.is_locked(&account));
    }

    #[test]
    fn test_attempts_remaining_floors_at_zero() {
        let policy = LockoutPolicy::default();
        let mut account = account();
        assert_eq!(policy.attempts_remaining(&account), 5);

        for _ in 0..7 {
            policy.record_failure(&mut account);
        }
        assert_eq!(policy.attempts_remaining(&account), 0);
    }

    #[test]
    fn test_remaining_minutes_rounds_up() {
        let policy = LockoutPolicy::default();
        let mut account = account();
        account.lock_until = Some(Utc::now() + Duration::seconds(61));
        assert_eq!(policy.remaining_lock_minutes(&account), Some(2));

        account.lock_until = Some(Utc::now() + Duration::seconds(5));
        assert_eq!(policy.remaining_lock_minutes(&account), Some(1));

        account.lock_until = None;
        assert_eq!(policy.remaining_lock_minutes(&account), None);
    }
}
