//! # comanda-receipt
//!
//! Fixed-width plain-text receipt building - low-level layout only.
//!
//! ## Scope
//!
//! This crate handles HOW a receipt is laid out:
//! - Fixed-width line composition (center, left/right columns, separators)
//! - Money formatting in minor units
//!
//! Business logic (WHAT to print) stays in application code:
//! - Line grouping and totals → comanda-server
//!
//! ## Example
//!
//! ```
//! use comanda_receipt::TicketBuilder;
//!
//! let mut b = TicketBuilder::new(32);
//! b.center("COMANDA");
//! b.sep_double();
//! b.columns("Tea x2", "16000");
//! b.sep();
//! b.columns("TOTAL", "16000");
//! let text = b.build();
//! assert!(text.contains("TOTAL"));
//! ```

mod builder;

pub use builder::{TicketBuilder, format_minor};
