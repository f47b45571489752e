//! Hugging Face hosted inference provider.
//!
//! This module provides the [`HuggingFaceProvider`] which implements the
//! [`LlmProvider`](wayfarer_core::llm::provider::LlmProvider) trait for the
//! text-generation task of the serverless Inference API.

pub mod client;
pub mod types;

pub use client::HuggingFaceProvider;
