//! Projection of a parsed report descriptor into the records class drivers
//! consume: per-collection capability descriptions, report identities and the
//! capability summary.

use alloc::vec::Vec;

use crate::{
    errors::HidpStatus,
    parser::ReportParser,
    pool::PoolAllocator,
    types::{ReportType, Usage, UsagePage},
    HidParser,
};

/// Knobs for [`HidParser::collection_description`].
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct ProjectionOptions {
    /// Project only the first top-level collection, however many the
    /// descriptor declares. On by default.
    pub legacy_single_collection: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            legacy_single_collection: true,
        }
    }
}

/// Capabilities of one top-level collection.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct CollectionDesc {
    pub usage_page: UsagePage,
    pub usage: Usage,
    /// 1-based.
    pub collection_number: usize,
    /// Report lengths including the leading report ID byte, 0 when the
    /// collection has no report of that type.
    pub input_length: usize,
    pub output_length: usize,
    pub feature_length: usize,
    preparsed_data: Vec<u8>,
}

impl CollectionDesc {
    /// Snapshot of the parser context taken when the description was built.
    pub fn preparsed_data(&self) -> &[u8] {
        &self.preparsed_data
    }

    pub fn preparsed_data_length(&self) -> usize {
        self.preparsed_data.len()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CollectionDesc {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "CollectionDesc {{ #{}, usage: {}:{}, lengths: {}/{}/{}, preparsed: {} bytes }}",
            self.collection_number,
            self.usage_page,
            self.usage,
            self.input_length,
            self.output_length,
            self.feature_length,
            self.preparsed_data.len(),
        )
    }
}

/// Report identity of one top-level collection. Lengths are the raw report
/// lengths, without a report ID byte.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct ReportIds {
    pub report_id: u8,
    pub collection_number: usize,
    pub input_length: usize,
    pub output_length: usize,
    pub feature_length: usize,
}

/// Everything projected out of one descriptor.
///
/// Owns the pool blocks it was built from; hand it back with
/// [`HidParser::free_collection_description`].
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct DeviceDescription {
    collection_desc: Vec<CollectionDesc>,
    report_ids: Vec<ReportIds>,
}

impl DeviceDescription {
    pub fn collection_desc(&self) -> &[CollectionDesc] {
        &self.collection_desc
    }

    pub fn report_ids(&self) -> &[ReportIds] {
        &self.report_ids
    }
}

/// Capability summary of the first top-level collection.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct Caps {
    pub usage: Usage,
    pub usage_page: UsagePage,
    pub input_report_byte_length: usize,
    pub output_report_byte_length: usize,
    pub feature_report_byte_length: usize,
    pub number_link_collection_nodes: usize,
    pub number_input_button_caps: usize,
    pub number_input_value_caps: usize,
    pub number_input_data_indices: usize,
    pub number_output_button_caps: usize,
    pub number_output_value_caps: usize,
    pub number_output_data_indices: usize,
    pub number_feature_button_caps: usize,
    pub number_feature_value_caps: usize,
    pub number_feature_data_indices: usize,
}

/// Room for a report ID byte in front of every non-empty report.
fn with_report_id(length: usize) -> usize {
    if length > 0 {
        length + 1
    } else {
        0
    }
}

/// Tables and blobs acquired so far while building a description.
struct PartialDescription {
    collection_desc: Vec<CollectionDesc>,
    report_ids: Vec<ReportIds>,
    // slots whose preparsed data came from the pool
    built: usize,
}

impl PartialDescription {
    fn acquire<A: PoolAllocator>(pool: &A, count: usize) -> Result<Self, HidpStatus> {
        let Some(collection_desc) = pool.alloc::<CollectionDesc>(count) else {
            error!("no memory for {} collection descriptions", count);
            return Err(HidpStatus::InsufficientResources);
        };
        let Some(report_ids) = pool.alloc::<ReportIds>(count) else {
            error!("no memory for {} report ids", count);
            pool.free(collection_desc);
            return Err(HidpStatus::InsufficientResources);
        };

        Ok(Self {
            collection_desc,
            report_ids,
            built: 0,
        })
    }

    /// Returns every acquired block to the pool.
    fn unwind<P: ReportParser, A: PoolAllocator>(mut self, parser: &P, pool: &A) {
        for desc in self.collection_desc.iter_mut().take(self.built) {
            parser.free_context(pool, core::mem::take(&mut desc.preparsed_data));
        }
        pool.free(self.collection_desc);
        pool.free(self.report_ids);
    }

    fn finish(self) -> DeviceDescription {
        debug_assert_eq!(self.built, self.collection_desc.len());
        DeviceDescription {
            collection_desc: self.collection_desc,
            report_ids: self.report_ids,
        }
    }
}

impl<P: ReportParser> HidParser<P> {
    /// Parses `descriptor` and projects its top-level collections.
    ///
    /// Either every record is fully populated or nothing stays allocated.
    pub fn collection_description<A: PoolAllocator>(
        &mut self,
        descriptor: &[u8],
        pool: &A,
        options: ProjectionOptions,
    ) -> Result<DeviceDescription, HidpStatus> {
        if let Err(status) = self.parser.parse(descriptor) {
            debug!("failed to parse report descriptor: {:?}", status);
            return Err(status.into());
        }

        let top_collections = self.parser.top_collection_count();
        if top_collections == 0 {
            return Err(HidpStatus::NoDataDetected);
        }

        let count = if options.legacy_single_collection {
            if top_collections > 1 {
                warn!(
                    "{} top-level collections, only the first is projected",
                    top_collections
                );
            }
            1
        } else {
            top_collections
        };

        let mut partial = PartialDescription::acquire(pool, count)?;
        for index in 0..count {
            if let Err(status) = self.project_collection(pool, index, &mut partial) {
                partial.unwind(&self.parser, pool);
                return Err(status);
            }
        }

        trace!("projected {} collections", count);
        Ok(partial.finish())
    }

    fn project_collection<A: PoolAllocator>(
        &self,
        pool: &A,
        index: usize,
        partial: &mut PartialDescription,
    ) -> Result<(), HidpStatus> {
        let ids = &mut partial.report_ids[index];
        ids.collection_number = index + 1;
        // Ordinal, not the report ID the descriptor declares.
        let Ok(report_id) = u8::try_from(index) else {
            error!("collection {} has no one byte report id", index);
            return Err(HidpStatus::InternalError);
        };
        ids.report_id = report_id;
        ids.input_length = self.parser.report_length(ReportType::Input);
        ids.output_length = self.parser.report_length(ReportType::Output);
        ids.feature_length = self.parser.report_length(ReportType::Feature);
        let ids = *ids;

        let (usage, usage_page) = self.parser.collection_usage_page(index)?;

        let size = self.parser.context_size();
        let Some(context) = self.parser.context().get(..size) else {
            error!("parser context shorter than its {} byte size", size);
            return Err(HidpStatus::InternalError);
        };
        let Some(mut preparsed_data) = pool.alloc::<u8>(size) else {
            error!("no memory for {} bytes of preparsed data", size);
            return Err(HidpStatus::InsufficientResources);
        };
        preparsed_data.copy_from_slice(context);

        partial.collection_desc[index] = CollectionDesc {
            usage_page,
            usage,
            collection_number: index + 1,
            input_length: with_report_id(ids.input_length),
            output_length: with_report_id(ids.output_length),
            feature_length: with_report_id(ids.feature_length),
            preparsed_data,
        };
        partial.built += 1;
        Ok(())
    }

    /// Returns every block of `description` to `pool`: each preparsed data
    /// blob first, then both tables.
    pub fn free_collection_description<A: PoolAllocator>(
        &self,
        description: DeviceDescription,
        pool: &A,
    ) {
        let DeviceDescription {
            mut collection_desc,
            report_ids,
        } = description;

        for desc in collection_desc.iter_mut() {
            self.parser
                .free_context(pool, core::mem::take(&mut desc.preparsed_data));
        }
        pool.free(collection_desc);
        pool.free(report_ids);
    }

    /// Capability summary of the first top-level collection.
    pub fn caps(&self) -> Caps {
        let mut caps = Caps::default();

        // TODO: summarize every top-level collection once callers can select one
        match self.parser.collection_usage_page(0) {
            Ok((usage, usage_page)) => {
                caps.usage = usage;
                caps.usage_page = usage_page;
            }
            Err(status) => debug!("no usage for the first collection: {:?}", status),
        }

        caps.input_report_byte_length = with_report_id(self.parser.report_length(ReportType::Input));
        caps.output_report_byte_length =
            with_report_id(self.parser.report_length(ReportType::Output));
        caps.feature_report_byte_length =
            with_report_id(self.parser.report_length(ReportType::Feature));

        caps.number_link_collection_nodes = self.parser.total_collection_count();

        caps.number_input_data_indices = self.parser.item_count(ReportType::Input, true);
        caps.number_output_data_indices = self.parser.item_count(ReportType::Output, true);
        caps.number_feature_data_indices = self.parser.item_count(ReportType::Feature, true);

        caps.number_input_value_caps = self.parser.item_count(ReportType::Input, false);
        caps.number_output_value_caps = self.parser.item_count(ReportType::Output, false);
        caps.number_feature_value_caps = self.parser.item_count(ReportType::Feature, false);

        caps.number_input_button_caps = self.parser.report_item_count(ReportType::Input);
        caps.number_output_button_caps = self.parser.report_item_count(ReportType::Output);
        caps.number_feature_button_caps = self.parser.report_item_count(ReportType::Feature);

        caps
    }
}
