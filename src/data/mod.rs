//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  WDRR_seq_CSV.csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  FilterSpec → FilteredSubset        (× 2 scenarios)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────────────┐
//!   │ outcome, distribution │  counts + percentages
//!   └───────────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ compare  │  scenario vs scenario vs whole dataset
//!   └──────────┘
//! ```
//!
//! `scenario` chains filter and aggregators for one scenario.

pub mod compare;
pub mod distribution;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod outcome;
pub mod percent;
pub mod scenario;
