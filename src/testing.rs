//! Scripted parser and accounting pool shared by the unit tests.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::{
    errors::ParserError,
    keyboard::{KeyboardDirection, KeyboardTranslator, Modifier, ModifierState},
    parser::ReportParser,
    pool::PoolAllocator,
    types::{ReportType, Usage, UsageAndPage, UsagePage, ValueCaps},
};

fn slot(report_type: ReportType) -> usize {
    match report_type {
        ReportType::Input => 0,
        ReportType::Output => 1,
        ReportType::Feature => 2,
    }
}

pub(crate) struct FakeParser {
    pub parse_result: Result<(), ParserError>,
    pub parsed: Vec<u8>,
    pub top_collections: usize,
    pub total_collections: usize,
    pub report_lengths: [usize; 3],
    pub usage_lookup: Result<(Usage, UsagePage), ParserError>,
    pub context: Vec<u8>,
    /// Overrides the reported context size, which defaults to the context length.
    pub context_size: Option<usize>,
    pub data_indices: [usize; 3],
    pub value_caps: [usize; 3],
    pub button_caps: [usize; 3],
    /// Usages asserted in every report handed to the parser.
    pub active: Vec<UsageAndPage>,
    pub value_result: Result<i32, ParserError>,
    pub last_report_type: Cell<Option<ReportType>>,
}

impl FakeParser {
    /// A boot keyboard: 8 byte input report, 1 byte LED output report.
    pub fn keyboard() -> Self {
        Self {
            parse_result: Ok(()),
            parsed: Vec::new(),
            top_collections: 1,
            total_collections: 1,
            report_lengths: [8, 1, 0],
            usage_lookup: Ok((0x06, 0x01)),
            context: (0u8..24).collect(),
            context_size: None,
            data_indices: [109, 5, 0],
            value_caps: [2, 1, 0],
            button_caps: [3, 2, 0],
            active: Vec::new(),
            value_result: Ok(0),
            last_report_type: Cell::new(None),
        }
    }

    fn seen(&self, report_type: ReportType) {
        self.last_report_type.set(Some(report_type));
    }
}

impl ReportParser for FakeParser {
    fn parse(&mut self, descriptor: &[u8]) -> Result<(), ParserError> {
        self.parsed = descriptor.to_vec();
        self.parse_result
    }

    fn top_collection_count(&self) -> usize {
        self.top_collections
    }

    fn total_collection_count(&self) -> usize {
        self.total_collections
    }

    fn report_length(&self, report_type: ReportType) -> usize {
        self.report_lengths[slot(report_type)]
    }

    fn collection_usage_page(&self, index: usize) -> Result<(Usage, UsagePage), ParserError> {
        if index >= self.top_collections {
            return Err(ParserError::CollectionNotFound);
        }
        self.usage_lookup
    }

    fn context(&self) -> &[u8] {
        &self.context
    }

    fn context_size(&self) -> usize {
        self.context_size.unwrap_or(self.context.len())
    }

    fn item_count(&self, report_type: ReportType, per_data_index: bool) -> usize {
        if per_data_index {
            self.data_indices[slot(report_type)]
        } else {
            self.value_caps[slot(report_type)]
        }
    }

    fn report_item_count(&self, report_type: ReportType) -> usize {
        self.button_caps[slot(report_type)]
    }

    fn specific_value_caps(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        usage: Usage,
        value_caps: &mut [ValueCaps],
    ) -> Result<usize, ParserError> {
        self.seen(report_type);
        let Some(first) = value_caps.first_mut() else {
            return Err(ParserError::BufferTooSmall);
        };
        *first = ValueCaps {
            usage_page,
            usage_min: usage,
            usage_max: usage,
            ..ValueCaps::default()
        };
        Ok(1)
    }

    fn usages(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        usage_list: &mut [Usage],
        _report: &[u8],
    ) -> Result<usize, ParserError> {
        self.seen(report_type);
        let mut written = 0;
        for entry in self.active.iter().filter(|e| usage_page == 0 || e.usage_page == usage_page) {
            let slot = usage_list.get_mut(written).ok_or(ParserError::BufferTooSmall)?;
            *slot = entry.usage;
            written += 1;
        }
        Ok(written)
    }

    fn usages_and_pages(
        &self,
        report_type: ReportType,
        usage_list: &mut [UsageAndPage],
        _report: &[u8],
    ) -> Result<usize, ParserError> {
        self.seen(report_type);
        if usage_list.len() < self.active.len() {
            return Err(ParserError::BufferTooSmall);
        }
        usage_list[..self.active.len()].copy_from_slice(&self.active);
        Ok(self.active.len())
    }

    fn scaled_usage_value(
        &self,
        report_type: ReportType,
        _usage_page: UsagePage,
        _usage: Usage,
        _report: &[u8],
    ) -> Result<i32, ParserError> {
        self.seen(report_type);
        self.value_result
    }

    fn max_usage_list_length(&self, report_type: ReportType, _usage_page: UsagePage) -> usize {
        self.seen(report_type);
        6
    }
}

impl KeyboardTranslator for FakeParser {
    fn translate_usage(
        &self,
        usage: Usage,
        direction: KeyboardDirection,
        modifier_state: &mut ModifierState,
        insert: &mut dyn FnMut(&[u8]),
    ) -> Result<(), ParserError> {
        let pressed = direction == KeyboardDirection::Make;
        let modifier = match usage {
            0xE0 => Some(Modifier::LeftControl),
            0xE1 => Some(Modifier::LeftShift),
            0xE2 => Some(Modifier::LeftAlt),
            0xE3 => Some(Modifier::LeftGui),
            0xE4 => Some(Modifier::RightControl),
            0xE5 => Some(Modifier::RightShift),
            0xE6 => Some(Modifier::RightAlt),
            0xE7 => Some(Modifier::RightGui),
            0x04..=0x7F => None,
            _ => return Err(ParserError::I8042TransUnknown),
        };
        if let Some(modifier) = modifier {
            modifier_state.set(modifier, pressed);
        }

        // not a real scan code table, just distinguishable output
        let code = usage as u8 & 0x7F;
        insert(&[if pressed { code } else { code | 0x80 }]);
        Ok(())
    }
}

/// Pool that records every block it hands out and takes back.
pub(crate) struct CountingPool {
    fail_at: Option<usize>,
    step: Cell<usize>,
    alloc_sizes: RefCell<Vec<usize>>,
    free_sizes: RefCell<Vec<usize>>,
}

impl CountingPool {
    pub fn new() -> Self {
        Self {
            fail_at: None,
            step: Cell::new(0),
            alloc_sizes: RefCell::new(Vec::new()),
            free_sizes: RefCell::new(Vec::new()),
        }
    }

    /// Refuses the `step`-th allocation (0-based).
    pub fn failing_at(step: usize) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::new()
        }
    }

    pub fn alloc_count(&self) -> usize {
        self.alloc_sizes.borrow().len()
    }

    pub fn free_sizes(&self) -> Vec<usize> {
        self.free_sizes.borrow().clone()
    }

    /// Every block handed out came back, with the size it left with.
    pub fn assert_balanced(&self) {
        let mut allocated = self.alloc_sizes.borrow().clone();
        let mut freed = self.free_sizes.borrow().clone();
        allocated.sort_unstable();
        freed.sort_unstable();
        assert_eq!(allocated, freed);
    }
}

impl PoolAllocator for CountingPool {
    fn alloc<T: Default>(&self, len: usize) -> Option<Vec<T>> {
        let step = self.step.get();
        self.step.set(step + 1);
        if self.fail_at == Some(step) {
            return None;
        }

        self.alloc_sizes
            .borrow_mut()
            .push(len * core::mem::size_of::<T>());
        let mut block = Vec::with_capacity(len);
        block.resize_with(len, T::default);
        Some(block)
    }

    fn free<T>(&self, block: Vec<T>) {
        self.free_sizes
            .borrow_mut()
            .push(block.len() * core::mem::size_of::<T>());
    }
}
