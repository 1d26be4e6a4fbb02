//! Logging facilities.
//!
//! Keychord uses the `tracing` crate for instrumentation. Installing a
//! subscriber is the embedding application's job:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Application code...
//! }
//! ```
//!
//! Dispatch decisions are logged at `debug`, per-key bookkeeping at `trace`.
//! Use the target constants below with `tracing` directives to filter by
//! subsystem, e.g. `RUST_LOG=keychord::dispatch=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Registry mutation target.
    pub const REGISTRY: &str = "keychord::registry";
    /// Chord matching and handler invocation target.
    pub const DISPATCH: &str = "keychord::dispatch";
    /// Engine lifecycle (start/stop, listener attach/detach) target.
    pub const LIFECYCLE: &str = "keychord::lifecycle";
}
