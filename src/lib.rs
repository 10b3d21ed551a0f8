// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera-state synchronization and axis snapping for embedded 3D scene
//! viewports.
//!
//! A host application owns a model with a `camera` property; a renderer owns
//! the live camera. This crate keeps the two in step in both directions
//! without feedback loops, snaps the camera onto a coordinate axis when the
//! orientation marker is clicked, and manages scene import and
//! pointer-scoped keyboard handling around that.
//!
//! # Key entry points
//!
//! - [`view::PlotView`] - the viewport component; feed it host events
//! - [`sync::CameraSync`] - guarded camera ↔ model synchronization
//! - [`camera::align_to_axis`] - axis snapping with the view-up heuristic
//! - [`backend`] - capability traits over the external renderer, plus an
//!   in-memory implementation
//! - [`options::ViewOptions`] - runtime configuration (TOML presets)
//!
//! # Architecture
//!
//! Everything runs on the host's UI thread. Re-entrant notifications (the
//! camera reporting a change caused by our own write, the model echoing our
//! own export) are absorbed by a shared guard flag rather than by locks.

pub mod backend;
pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod sync;
pub mod view;
