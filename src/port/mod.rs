//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the reconciliation passes and the outside
//! world. Adapters implement them for real venues, the terminal and the
//! filesystem; the `testkit` feature implements them in memory.
//!
//! ```text
//!                 ┌─────────────────────────┐
//!                 │      Application        │
//!     ┌───────────┤  Domain + Port          ├───────────┐
//!     │           └─────────────────────────┘           │
//!     ▼                      ▼                          ▼
//! ┌─────────┐         ┌─────────────┐            ┌───────────┐
//! │ Source  │         │   Target    │            │ Approver/ │
//! │ Venue   │         │   Venue     │            │  Report   │
//! └─────────┘         └─────────────┘            └───────────┘
//! ```

pub mod outbound;

pub use outbound::approval::{AutoApprove, MarketApproval};
pub use outbound::report::UpdateReport;
pub use outbound::venue::{SourceVenue, TargetVenue};
