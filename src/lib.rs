#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod consts;
pub mod description;
mod dispatch;
pub mod errors;
pub mod keyboard;
pub mod parser;
pub mod pool;
pub mod transition;
pub mod types;

#[cfg(test)]
mod testing;

pub use description::{Caps, CollectionDesc, DeviceDescription, ProjectionOptions, ReportIds};
pub use errors::{HidpStatus, ParserError};
pub use keyboard::{KeyboardDirection, KeyboardTranslator, Modifier, ModifierState};
pub use parser::ReportParser;
pub use pool::{PoolAllocator, SystemPool};
pub use transition::{usage_and_page_list_difference, usage_list_difference, Transition, UsageSnapshot};
pub use types::{LinkCollection, ReportType, Usage, UsageAndPage, UsagePage, ValueCaps};

/// Class-driver facing front of a report descriptor parser.
///
/// Every query goes to the wrapped parser and every failure comes back as a
/// [`HidpStatus`]. There is no internal locking: a `HidParser` is used from
/// one context at a time, which `&mut self` on
/// [`collection_description`](HidParser::collection_description) enforces for
/// the one operation that re-parses.
pub struct HidParser<P: ReportParser> {
    parser: P,
}

impl<P: ReportParser> HidParser<P> {
    pub fn new(parser: P) -> Self {
        HidParser { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn into_inner(self) -> P {
        self.parser
    }
}
