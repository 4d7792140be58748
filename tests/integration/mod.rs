//! Integration Tests Module
//!
//! Drives the agent workflow end to end against a scripted in-memory
//! backend: normalization of realistic replies, invoker retry/timeout
//! behavior, and two-wave orchestration with status reporting.


// Reply normalization and typed decoding
mod normalizer_test;

// Retry, backoff, timeout and cancellation
mod invoker_test;

// Two-wave coordination, failure policy and status log
mod workflow_test;
