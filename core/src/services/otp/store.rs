//! In-process OTP table
//!
//! `OtpStore` owns the only copy of the outstanding codes. At most one
//! record exists per normalized identifier; issuing again replaces it.
//! Expiry is enforced twice: lazily whenever a record is read, and by a
//! removal task scheduled at the expiry instant. Each issuance carries a
//! fresh generation number and the removal task only deletes the record
//! if the generation it was scheduled for is still the stored one.
//!
//! The table lives in process memory. Running several server instances
//! requires moving it to a shared keyed store with per-key
//! compare-and-swap; this type does not attempt that.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::AbortHandle;

use flexify_shared::utils::identifier::{mask_email, normalize_identifier};

use crate::domain::entities::otp_record::{OtpRecord, DEFAULT_EXPIRATION_MINUTES};

use super::clock::{Clock, SystemClock};
use super::generator::{CodeGenerator, SecureCodeGenerator};

/// A freshly issued code, handed to the caller for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedOtp {
    /// Normalized identifier the code was issued for
    pub identifier: String,
    /// The passcode to deliver
    pub code: String,
    /// Issuance instant
    pub issued_at: DateTime<Utc>,
    /// Instant after which the code is rejected
    pub expires_at: DateTime<Utc>,
    /// Issuance number, used to clear exactly this issuance later
    pub generation: u64,
}

/// Detailed result of checking a candidate code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// A live record exists and the candidate matches it
    Valid {
        /// Issuance the candidate matched
        generation: u64,
    },
    /// No live record: never issued, cleared, replaced or expired
    NotFound,
    /// A live record exists but the candidate differs
    Mismatch,
}

struct Entry {
    record: OtpRecord,
    expiry_task: Option<AbortHandle>,
}

impl Entry {
    fn cancel_expiry(&self) {
        if let Some(task) = &self.expiry_task {
            task.abort();
        }
    }
}

struct StoreInner {
    table: Mutex<HashMap<String, Entry>>,
    next_generation: AtomicU64,
    ttl: Duration,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
}

impl StoreInner {
    fn table(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // Every critical section leaves the map consistent, so a poisoned
        // lock still guards valid data.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Scheduled removal: only deletes the issuance it was armed for
    fn expire(&self, key: &str, generation: u64) {
        let mut table = self.table();
        let is_same_issuance = table
            .get(key)
            .map_or(false, |entry| entry.record.generation == generation);

        if is_same_issuance {
            table.remove(key);
            tracing::info!(
                identifier = %mask_email(key),
                generation = generation,
                event = "otp_expired",
                "OTP expired and removed"
            );
        } else {
            tracing::debug!(
                identifier = %mask_email(key),
                generation = generation,
                "Stale expiry timer skipped"
            );
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let table = self.table.get_mut().unwrap_or_else(|e| e.into_inner());
        for entry in table.values() {
            entry.cancel_expiry();
        }
    }
}

/// Process-wide table of outstanding one-time passcodes
///
/// Cloning yields another handle to the same table.
#[derive(Clone)]
pub struct OtpStore {
    inner: Arc<StoreInner>,
}

impl OtpStore {
    /// Create a store with the given validity window, the OS-backed
    /// generator and the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_components(ttl, Arc::new(SecureCodeGenerator), Arc::new(SystemClock))
    }

    /// Create a store with explicit generator and clock
    pub fn with_components(
        ttl: Duration,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                table: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                ttl,
                generator,
                clock,
            }),
        }
    }

    /// Validity window applied to new codes
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Issue a new code for `identifier`, replacing any outstanding one
    ///
    /// The previous code stops verifying immediately and its pending
    /// removal is cancelled. A removal for the new code is scheduled on the
    /// current tokio runtime; outside a runtime only lazy expiry applies.
    pub fn issue(&self, identifier: &str) -> IssuedOtp {
        let key = normalize_identifier(identifier);
        let code = self.inner.generator.generate();

        let mut table = self.inner.table();
        let issued_at = self.inner.clock.now();
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let record = OtpRecord::new(key.clone(), code, issued_at, self.inner.ttl, generation);

        let issued = IssuedOtp {
            identifier: key.clone(),
            code: record.code.clone(),
            issued_at: record.issued_at,
            expires_at: record.expires_at,
            generation,
        };

        let expiry_task = self.schedule_expiry(key.clone(), generation);
        let replaced = table.insert(key, Entry { record, expiry_task });
        drop(table);

        if let Some(previous) = &replaced {
            previous.cancel_expiry();
        }

        tracing::info!(
            identifier = %mask_email(&issued.identifier),
            generation = generation,
            replaced = replaced.is_some(),
            expires_at = %issued.expires_at,
            event = "otp_issued",
            "Issued new OTP"
        );

        issued
    }

    /// Check a candidate code and report why it was rejected
    ///
    /// Expired records are removed on the spot. A successful match leaves
    /// the record in place; the caller clears it once the protected action
    /// has completed.
    pub fn check(&self, identifier: &str, candidate: &str) -> VerifyOutcome {
        let key = normalize_identifier(identifier);
        let now = self.inner.clock.now();
        let mut table = self.inner.table();

        let Some(entry) = table.get(&key) else {
            tracing::debug!(identifier = %mask_email(&key), "No OTP found");
            return VerifyOutcome::NotFound;
        };

        if entry.record.is_expired_at(now) {
            if let Some(expired) = table.remove(&key) {
                expired.cancel_expiry();
            }
            tracing::info!(
                identifier = %mask_email(&key),
                event = "otp_expired",
                "OTP expired at verification"
            );
            return VerifyOutcome::NotFound;
        }

        if codes_match(&entry.record.code, candidate) {
            tracing::info!(
                identifier = %mask_email(&key),
                event = "otp_verified",
                "OTP verified"
            );
            VerifyOutcome::Valid {
                generation: entry.record.generation,
            }
        } else {
            tracing::warn!(
                identifier = %mask_email(&key),
                event = "otp_mismatch",
                "OTP did not match"
            );
            VerifyOutcome::Mismatch
        }
    }

    /// Whether `candidate` is the live code for `identifier`
    pub fn verify(&self, identifier: &str, candidate: &str) -> bool {
        matches!(self.check(identifier, candidate), VerifyOutcome::Valid { .. })
    }

    /// Remove any record for `identifier`; a missing record is not an error
    pub fn clear(&self, identifier: &str) {
        let key = normalize_identifier(identifier);
        let removed = self.inner.table().remove(&key);

        if let Some(entry) = &removed {
            entry.cancel_expiry();
        }

        tracing::info!(
            identifier = %mask_email(&key),
            removed = removed.is_some(),
            event = "otp_cleared",
            "OTP cleared"
        );
    }

    /// Remove the record only if it is still the issuance `generation`
    ///
    /// Used to finalize a reset: a code re-issued between verification and
    /// finalization survives, even when it happens to repeat the same digits.
    /// Returns whether a record was removed.
    pub fn clear_if_current(&self, identifier: &str, generation: u64) -> bool {
        let key = normalize_identifier(identifier);
        let mut table = self.inner.table();

        let is_current = table
            .get(&key)
            .map_or(false, |entry| entry.record.generation == generation);
        if !is_current {
            tracing::debug!(
                identifier = %mask_email(&key),
                "Finalize skipped, OTP was replaced or removed"
            );
            return false;
        }

        if let Some(entry) = table.remove(&key) {
            entry.cancel_expiry();
        }
        tracing::info!(
            identifier = %mask_email(&key),
            event = "otp_consumed",
            "OTP consumed"
        );
        true
    }

    /// Whether a non-expired record exists for `identifier`
    pub fn has_active(&self, identifier: &str) -> bool {
        let key = normalize_identifier(identifier);
        let now = self.inner.clock.now();
        self.inner
            .table()
            .get(&key)
            .map_or(false, |entry| !entry.record.is_expired_at(now))
    }

    /// Drop every expired record, returning how many were removed
    ///
    /// Only needed when no tokio runtime drives the scheduled removals.
    pub fn purge_expired(&self) -> usize {
        let now = self.inner.clock.now();
        let mut table = self.inner.table();
        let before = table.len();
        table.retain(|_, entry| {
            let keep = !entry.record.is_expired_at(now);
            if !keep {
                entry.cancel_expiry();
            }
            keep
        });
        let purged = before - table.len();

        if purged > 0 {
            tracing::debug!(purged = purged, "Purged expired OTP records");
        }
        purged
    }

    /// Number of stored records, including expired ones not yet removed
    pub fn len(&self) -> usize {
        self.inner.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn schedule_expiry(&self, key: String, generation: u64) -> Option<AbortHandle> {
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let delay = self.inner.ttl.to_std().unwrap_or_default();
        let store: Weak<StoreInner> = Arc::downgrade(&self.inner);

        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = store.upgrade() {
                inner.expire(&key, generation);
            }
        });
        Some(task.abort_handle())
    }
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_EXPIRATION_MINUTES))
    }
}

impl std::fmt::Debug for OtpStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpStore")
            .field("ttl", &self.inner.ttl)
            .field("records", &self.len())
            .finish()
    }
}

/// Constant-time comparison of a stored code and a candidate
fn codes_match(stored: &str, candidate: &str) -> bool {
    stored.len() == candidate.len() && constant_time_eq(stored.as_bytes(), candidate.as_bytes())
}
