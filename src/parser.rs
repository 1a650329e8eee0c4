use alloc::vec::Vec;

use crate::{
    errors::ParserError,
    pool::PoolAllocator,
    types::{ReportType, Usage, UsageAndPage, UsagePage, ValueCaps},
};

/// The report descriptor parser this layer projects from.
///
/// An implementation owns the structural model of one descriptor: after a
/// successful [`parse`](ReportParser::parse) every query reflects that
/// descriptor until the next parse. Implementations are not expected to be
/// reentrant; callers serialize access to a single parser.
pub trait ReportParser {
    fn parse(&mut self, descriptor: &[u8]) -> Result<(), ParserError>;

    fn top_collection_count(&self) -> usize;

    /// Every collection node in the tree, top-level ones included.
    fn total_collection_count(&self) -> usize;

    /// Length in bytes of the given report type, without a report ID prefix.
    fn report_length(&self, report_type: ReportType) -> usize;

    /// `(usage, usage_page)` of the top-level collection at `index` (0-based).
    fn collection_usage_page(&self, index: usize) -> Result<(Usage, UsagePage), ParserError>;

    /// Serialized parser context, the source of preparsed data.
    fn context(&self) -> &[u8];

    /// Bytes of [`context`](ReportParser::context) a preparsed data blob
    /// holds. At most the context length.
    fn context_size(&self) -> usize {
        self.context().len()
    }

    /// Counts report items of a type. With `per_data_index` every data index
    /// counts separately, otherwise each item counts once.
    fn item_count(&self, report_type: ReportType, per_data_index: bool) -> usize;

    /// Number of main items of a type.
    fn report_item_count(&self, report_type: ReportType) -> usize;

    /// Returns a preparsed data block obtained from this parser's context.
    fn free_context<A: PoolAllocator>(&self, pool: &A, context: Vec<u8>) {
        pool.free(context)
    }

    fn specific_value_caps(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        usage: Usage,
        value_caps: &mut [ValueCaps],
    ) -> Result<usize, ParserError>;

    /// Writes the usages asserted in `report` into `usage_list`. An undefined
    /// usage page matches every page.
    fn usages(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        usage_list: &mut [Usage],
        report: &[u8],
    ) -> Result<usize, ParserError>;

    fn usages_and_pages(
        &self,
        report_type: ReportType,
        usage_list: &mut [UsageAndPage],
        report: &[u8],
    ) -> Result<usize, ParserError>;

    fn scaled_usage_value(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        usage: Usage,
        report: &[u8],
    ) -> Result<i32, ParserError>;

    fn max_usage_list_length(&self, report_type: ReportType, usage_page: UsagePage) -> usize;
}
