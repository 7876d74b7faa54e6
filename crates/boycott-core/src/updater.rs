//! [`StatsCounterUpdater`] — increment or decrement a stats counter,
//! creating the record on first write.

use std::sync::Arc;

use crate::{
  Error, Result,
  error::ValidationError,
  stats::{Direction, DisplayFields, StatsKey, StatsUpdate},
  store::StatsStore,
};

/// Applies counter updates against a shared [`StatsStore`].
///
/// Holds no state besides the store handle; every call is independent.
pub struct StatsCounterUpdater<S> {
  store: Arc<S>,
}

impl<S> Clone for StatsCounterUpdater<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: StatsStore> StatsCounterUpdater<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Move the counter for `key` by one in the direction given by
  /// `increment`.
  ///
  /// On an increment both display fields are required and are written only
  /// if the record does not already have them. On a decrement they are
  /// ignored. Returns `true` once the store has applied the update.
  pub async fn apply(
    &self,
    key: StatsKey,
    company_name: Option<String>,
    cause_desc: Option<String>,
    increment: bool,
  ) -> Result<bool> {
    let direction = Direction::from(increment);

    let defaults = if direction.is_increment() {
      Some(display_fields(company_name, cause_desc)?)
    } else {
      None
    };

    let delta  = direction.delta();
    let update = StatsUpdate { key: key.clone(), delta, defaults };

    if let Err(e) = self.store.apply_update(update).await {
      tracing::error!(
        cause_id = %key.cause_id,
        company_id = %key.company_id,
        delta,
        "stats update failed: {e}"
      );
      return Err(Error::Store(Box::new(e)));
    }

    tracing::debug!(
      cause_id = %key.cause_id,
      company_id = %key.company_id,
      delta,
      "stats updated"
    );
    Ok(true)
  }
}

fn display_fields(
  company_name: Option<String>,
  cause_desc: Option<String>,
) -> Result<DisplayFields, ValidationError> {
  match (company_name, cause_desc) {
    (Some(company_name), Some(cause_desc)) => {
      Ok(DisplayFields { company_name, cause_desc })
    }
    (None, Some(_)) => Err(ValidationError::MissingDisplayFields("company_name")),
    (Some(_), None) => Err(ValidationError::MissingDisplayFields("cause_desc")),
    (None, None) => {
      Err(ValidationError::MissingDisplayFields("company_name and cause_desc"))
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;

  #[derive(Debug, thiserror::Error)]
  #[error("provisioned throughput exceeded")]
  struct Throttled;

  /// Records every update it is asked to apply.
  #[derive(Default)]
  struct RecordingStore {
    updates: Mutex<Vec<StatsUpdate>>,
    fail:    bool,
  }

  impl RecordingStore {
    fn failing() -> Self { Self { fail: true, ..Default::default() } }

    fn updates(&self) -> Vec<StatsUpdate> { self.updates.lock().unwrap().clone() }
  }

  impl StatsStore for RecordingStore {
    type Error = Throttled;

    async fn apply_update(&self, update: StatsUpdate) -> Result<(), Throttled> {
      if self.fail {
        return Err(Throttled);
      }
      self.updates.lock().unwrap().push(update);
      Ok(())
    }
  }

  fn updater(store: &Arc<RecordingStore>) -> StatsCounterUpdater<RecordingStore> {
    StatsCounterUpdater::new(Arc::clone(store))
  }

  #[tokio::test]
  async fn increment_sends_delta_and_defaults() {
    let store = Arc::new(RecordingStore::default());
    let updated = updater(&store)
      .apply(
        StatsKey::new("c1", "k1"),
        Some("Acme".into()),
        Some("unfair wages".into()),
        true,
      )
      .await
      .unwrap();
    assert!(updated);

    assert_eq!(store.updates(), vec![StatsUpdate {
      key:      StatsKey::new("c1", "k1"),
      delta:    1,
      defaults: Some(DisplayFields {
        company_name: "Acme".into(),
        cause_desc:   "unfair wages".into(),
      }),
    }]);
  }

  #[tokio::test]
  async fn decrement_ignores_display_fields() {
    let store = Arc::new(RecordingStore::default());
    let u = updater(&store);

    u.apply(StatsKey::new("c1", "k1"), None, None, false).await.unwrap();
    // Supplied fields are dropped on the decrement path too.
    u.apply(StatsKey::new("c1", "k1"), Some("Acme".into()), Some("x".into()), false)
      .await
      .unwrap();

    let updates = store.updates();
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|u| u.delta == -1 && u.defaults.is_none()));
  }

  #[tokio::test]
  async fn increment_without_company_name_is_rejected_before_write() {
    let store = Arc::new(RecordingStore::default());
    let err = updater(&store)
      .apply(StatsKey::new("c1", "k1"), None, Some("unfair wages".into()), true)
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      Error::Validation(ValidationError::MissingDisplayFields("company_name"))
    ));
    assert!(store.updates().is_empty());
  }

  #[tokio::test]
  async fn increment_without_cause_desc_is_rejected_before_write() {
    let store = Arc::new(RecordingStore::default());
    let err = updater(&store)
      .apply(StatsKey::new("c1", "k1"), Some("Acme".into()), None, true)
      .await
      .unwrap_err();

    assert_eq!(err.to_string(), "cause_desc required when incrementing");
    assert!(store.updates().is_empty());
  }

  #[tokio::test]
  async fn increment_without_either_field_names_both() {
    let store = Arc::new(RecordingStore::default());
    let err = updater(&store)
      .apply(StatsKey::new("c1", "k1"), None, None, true)
      .await
      .unwrap_err();

    assert_eq!(
      err.to_string(),
      "company_name and cause_desc required when incrementing"
    );
  }

  #[tokio::test]
  async fn store_failure_is_propagated() {
    let store = Arc::new(RecordingStore::failing());
    let err = updater(&store)
      .apply(StatsKey::new("c1", "k1"), None, None, false)
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert!(err.to_string().contains("provisioned throughput exceeded"));
  }

  #[test]
  fn direction_from_flag() {
    assert_eq!(Direction::from(true).delta(), 1);
    assert_eq!(Direction::from(false).delta(), -1);
  }
}
