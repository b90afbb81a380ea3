//! Data layer: core types, predicates, and loading.
//!
//! Architecture:
//! ```text
//!  .txt / .csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse rating table → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model   │  Dataset: Arc-shared schema + Vec<Arc<Datapoint>>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  row / label predicates → subset Dataset, label counts
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
