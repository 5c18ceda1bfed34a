//! # claimguard-model
//!
//! Implementations of the model-inference collaborator
//! ([`ModelInference`](claimguard_core::traits::ModelInference)).
//!
//! - [`LogisticModel`] — a trained model built from feature weights;
//!   [`ModelFile`] loads one from disk on first use.
//! - [`HeuristicModel`] — random draws inside severity/amount bands, used
//!   when no trained model is available. Seedable.
//! - [`FixedModel`] — an injected score for tests and operator overrides.
//! - [`FallbackModel`] — tries a primary model and falls back on
//!   `ModelUnavailable`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimguard_model::{FallbackModel, HeuristicModel, ModelFile};
//!
//! let model = FallbackModel::new(
//!     Box::new(ModelFile::new("models/fraud_model.json")),
//!     Box::new(HeuristicModel::new()),
//! );
//! ```

pub mod fallback;
pub mod features;
pub mod fixed;
pub mod heuristic;
pub mod logistic;
pub mod probability;

pub use fallback::FallbackModel;
pub use features::{extract_features, ClaimFeatures};
pub use fixed::FixedModel;
pub use heuristic::HeuristicModel;
pub use logistic::{LogisticModel, ModelFile, ModelWeights};
pub use probability::score_from_probability;
