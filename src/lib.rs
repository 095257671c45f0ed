//! AI Email Reply API Library
//!
//! This library provides the core functionality for the email reply service:
//! reply generation through a hosted language model, sentiment scoring,
//! feedback analytics, and background email dispatch.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection, pool, and schema bootstrap.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `llm_client`: Hosted text-generation endpoint client.
//! - `mailer`: Outbound SMTP relay wrapper.
//! - `models`: Core data models and request/response payloads.
//! - `sentiment`: Lexicon-based polarity scoring.
//! - `services`: Response, feedback, and dispatch services.
//! - `storage`: Persistence operations.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod llm_client;
pub mod mailer;
pub mod models;
pub mod sentiment;
pub mod services;
pub mod storage;
