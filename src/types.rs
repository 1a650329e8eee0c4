use crate::errors::HidpStatus;

/// Usage identifier within a usage page.
pub type Usage = u16;
/// Usage namespace.
pub type UsagePage = u16;

/// A usage qualified by its page.
///
/// `(0, 0)` is the end-of-list marker in usage+page snapshots.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct UsageAndPage {
    pub usage: Usage,
    pub usage_page: UsagePage,
}
static_assertions::const_assert_eq!(core::mem::size_of::<UsageAndPage>(), 4);

impl UsageAndPage {
    pub const fn new(usage_page: UsagePage, usage: Usage) -> Self {
        Self { usage, usage_page }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub enum ReportType {
    Input = 0,
    Output = 1,
    Feature = 2,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [ReportType::Input, ReportType::Output, ReportType::Feature];
}

impl TryFrom<u32> for ReportType {
    type Error = HidpStatus;

    fn try_from(value: u32) -> Result<Self, HidpStatus> {
        match value {
            0 => Ok(ReportType::Input),
            1 => Ok(ReportType::Output),
            2 => Ok(ReportType::Feature),
            _ => Err(HidpStatus::InvalidReportType),
        }
    }
}

/// Link collection a query is scoped to.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct LinkCollection(pub u16);

impl LinkCollection {
    /// Search every collection.
    pub const UNSPECIFIED: LinkCollection = LinkCollection(0);
    /// The top-level collection itself.
    pub const ROOT: LinkCollection = LinkCollection(1);

    pub fn is_unspecified(self) -> bool {
        self == Self::UNSPECIFIED
    }
}

/// Description of one value field of a report.
///
/// When `is_range` is false `usage_min == usage_max` and names the single
/// usage of the field.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct ValueCaps {
    pub usage_page: UsagePage,
    pub report_id: u8,
    pub is_alias: bool,
    pub bit_field: u16,
    pub link_collection: u16,
    pub link_usage: Usage,
    pub link_usage_page: UsagePage,
    pub is_range: bool,
    pub is_absolute: bool,
    pub has_null: bool,
    pub bit_size: u16,
    pub report_count: u16,
    pub units_exp: u32,
    pub units: u32,
    pub logical_min: i32,
    pub logical_max: i32,
    pub physical_min: i32,
    pub physical_max: i32,
    pub usage_min: Usage,
    pub usage_max: Usage,
    pub data_index_min: u16,
    pub data_index_max: u16,
}
