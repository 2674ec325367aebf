//! # skill-registry
//!
//! A Rust web service exposing an enterprise AI-skill catalog with
//! intent-based discovery search and generative content tooling (security
//! audits, blog posts, image and video synthesis) backed by a hosted LLM
//! provider.
//!
//! ## Discovery pipeline
//!
//! The core of the service is the intent matcher, which reconciles an
//! untrusted external ranking with a deterministic local fallback:
//!
//! ```text
//!                    ┌──────────────┐
//!                    │  User Query   │
//!                    └──────┬───────┘
//!                           │ trim
//!              empty? ──────┤
//!                │          ▼
//!        full catalog  ┌─────────────────────┐
//!        (original     │ Project catalog to   │
//!         order)       │ {name, outcomes}     │
//!                      └──────────┬──────────┘
//!                                 │ one call, no retry
//!                                 ▼
//!                      ┌─────────────────────┐
//!                      │  LLM ranking service │──▶ error / garbage
//!                      └──────────┬──────────┘       │
//!                                 │ JSON name array   │ treated as
//!                                 ▼                   │ empty ranking
//!                      ┌─────────────────────┐       │
//!                      │ Resolve exact names  │◀──────┘
//!                      │ (unknowns dropped)   │
//!                      └──────────┬──────────┘
//!                                 │
//!                                 ▼
//!                      ┌─────────────────────┐
//!                      │ Substring fallback   │
//!                      │ merge (catalog order)│
//!                      └──────────┬──────────┘
//!                                 │
//!                                 ▼
//!                      ┌─────────────────────┐
//!                      │   Ranked results     │
//!                      └─────────────────────┘
//! ```
//!
//! Every textually obvious match is guaranteed to appear exactly once, and
//! the endpoint never fails: total ranking-service failure degrades to the
//! pure substring search.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server and LLM settings
//! - [`models`] - Shared data types: `Skill`, `AgentLog`, request/response types
//! - [`catalog`] - Catalog loading and validation (file or embedded seed)
//! - [`search`] - Deterministic local search: substring scan and ranking merge
//! - [`matcher`] - The `Ranker` capability trait and `discover` orchestration
//! - [`llm`] - Provider calls: ranking, audit, blog, media synthesis
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod catalog;
pub mod config;
pub mod llm;
pub mod matcher;
pub mod models;
pub mod search;
pub mod state;
