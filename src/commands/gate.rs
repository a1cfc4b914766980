use tracing::{info, warn};

use crate::db::AppState;
use crate::gate::verify_password;
use crate::store;

/// ---------------------------------------------------------------------------
/// Gate Commands
/// ---------------------------------------------------------------------------

pub async fn is_unlocked(state: &AppState) -> Result<bool, String> {
  store::is_unlocked(&state.db)
    .await
    .map_err(|e| format!("Failed to read lock state: {}", e))
}

/// Check the password and remember the unlock on success
pub async fn unlock(state: &AppState, password: String) -> Result<(), String> {
  if let Err(e) = verify_password(state.config.password_sha256.as_deref(), &password) {
    warn!(reason = %e, "Unlock attempt refused");
    return Err(e.to_string());
  }

  store::set_unlocked(&state.db, true)
    .await
    .map_err(|e| format!("Failed to save lock state: {}", e))?;

  info!("Unlocked");
  Ok(())
}

pub async fn lock(state: &AppState) -> Result<(), String> {
  store::set_unlocked(&state.db, false)
    .await
    .map_err(|e| format!("Failed to save lock state: {}", e))?;

  info!("Locked");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gate::sha256_hex;
  use crate::test_utils::setup_test_state;

  #[tokio::test]
  async fn test_unlock_and_lock() {
    let mut state = setup_test_state().await;
    state.config.password_sha256 = Some(sha256_hex("fore!"));

    assert_eq!(unlock(&state, "slice".to_string()).await, Err("Incorrect password".to_string()));
    assert!(!is_unlocked(&state).await.unwrap());

    unlock(&state, "fore!".to_string()).await.unwrap();
    assert!(is_unlocked(&state).await.unwrap());

    lock(&state).await.unwrap();
    assert!(!is_unlocked(&state).await.unwrap());
  }

  #[tokio::test]
  async fn test_unconfigured_gate_refuses() {
    let state = setup_test_state().await;
    let err = unlock(&state, "anything".to_string()).await.unwrap_err();
    assert!(err.contains("not configured"));
    assert!(!is_unlocked(&state).await.unwrap());
  }
}
