// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn version_mismatch_message_names_job_and_versions() {
    let err = StoreError::VersionMismatch { job_id: JobId::new(), expected: 3, current: 5 };
    let msg = err.to_string();
    assert!(msg.contains("expected 3"));
    assert!(msg.contains("current 5"));
}

#[test]
fn adapter_error_retryable_classification() {
    assert!(AdapterError::Retryable("rate limited".into()).is_retryable());
    assert!(!AdapterError::Fatal("bad schema".into()).is_retryable());
    assert!(!AdapterError::Canceled.is_retryable());
}
