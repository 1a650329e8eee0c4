/// Raw success value of the public status vocabulary.
pub const HIDP_STATUS_SUCCESS: u32 = 0x0011_0000;

/// Status reported by the public surface of this crate.
///
/// Success is `Ok(..)`; every failure a caller can observe is one of these.
/// Internal parser results never cross the public boundary untranslated, see
/// [`From<ParserError>`](#impl-From<ParserError>-for-HidpStatus).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HidpStatus {
    /// The descriptor parsed, but declared no top-level collection.
    NoDataDetected,
    /// The allocation pool could not satisfy a request.
    InsufficientResources,
    InternalError,
    NotImplemented,
    ReportDoesNotExist,
    InvalidReportLength,
    InvalidReportType,
    BufferTooSmall,
    UsageNotFound,
    I8042TransUnknown,
}

impl HidpStatus {
    /// NT-style status value, for callers that forward statuses across an ABI.
    pub const fn code(self) -> u32 {
        match self {
            HidpStatus::NoDataDetected => 0x8000_0022,
            HidpStatus::InsufficientResources => 0xC000_009A,
            HidpStatus::InvalidReportType => 0xC011_0002,
            HidpStatus::InvalidReportLength => 0xC011_0003,
            HidpStatus::UsageNotFound => 0xC011_0004,
            HidpStatus::BufferTooSmall => 0xC011_0007,
            HidpStatus::InternalError => 0xC011_0008,
            HidpStatus::I8042TransUnknown => 0xC011_0009,
            HidpStatus::ReportDoesNotExist => 0xC011_0010,
            HidpStatus::NotImplemented => 0xC011_0020,
        }
    }
}

/// Result vocabulary of the underlying report descriptor parser.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    InsufficientResources,
    NotImplemented,
    ReportNotFound,
    CollectionNotFound,
    InvalidReportLength,
    InvalidReportType,
    BufferTooSmall,
    UsageNotFound,
    I8042TransUnknown,
    /// A raw code outside the known vocabulary.
    Unknown(i32),
}

impl ParserError {
    /// Decodes a raw parser result code. Zero is success.
    pub fn check(code: i32) -> Result<(), ParserError> {
        match code {
            0 => Ok(()),
            -1 => Err(ParserError::InsufficientResources),
            -2 => Err(ParserError::NotImplemented),
            -3 => Err(ParserError::ReportNotFound),
            -4 => Err(ParserError::CollectionNotFound),
            -5 => Err(ParserError::InvalidReportLength),
            -6 => Err(ParserError::InvalidReportType),
            -7 => Err(ParserError::BufferTooSmall),
            -8 => Err(ParserError::UsageNotFound),
            -9 => Err(ParserError::I8042TransUnknown),
            other => Err(ParserError::Unknown(other)),
        }
    }
}

impl From<ParserError> for HidpStatus {
    fn from(status: ParserError) -> Self {
        match status {
            ParserError::InsufficientResources => HidpStatus::InternalError,
            ParserError::NotImplemented => HidpStatus::NotImplemented,
            ParserError::ReportNotFound => HidpStatus::ReportDoesNotExist,
            ParserError::InvalidReportLength => HidpStatus::InvalidReportLength,
            ParserError::InvalidReportType => HidpStatus::InvalidReportType,
            ParserError::BufferTooSmall => HidpStatus::BufferTooSmall,
            ParserError::UsageNotFound => HidpStatus::UsageNotFound,
            ParserError::I8042TransUnknown => HidpStatus::I8042TransUnknown,
            // There is no public "collection not found"; callers have always
            // seen this one as not implemented.
            ParserError::CollectionNotFound => HidpStatus::NotImplemented,
            ParserError::Unknown(code) => {
                warn!("parser status {} has no public translation", code);
                HidpStatus::NotImplemented
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_parser_status_translates() {
        let table = [
            (ParserError::InsufficientResources, HidpStatus::InternalError),
            (ParserError::NotImplemented, HidpStatus::NotImplemented),
            (ParserError::ReportNotFound, HidpStatus::ReportDoesNotExist),
            (ParserError::InvalidReportLength, HidpStatus::InvalidReportLength),
            (ParserError::InvalidReportType, HidpStatus::InvalidReportType),
            (ParserError::BufferTooSmall, HidpStatus::BufferTooSmall),
            (ParserError::UsageNotFound, HidpStatus::UsageNotFound),
            (ParserError::I8042TransUnknown, HidpStatus::I8042TransUnknown),
            (ParserError::CollectionNotFound, HidpStatus::NotImplemented),
        ];
        for (internal, public) in table {
            assert_eq!(HidpStatus::from(internal), public);
        }
    }

    #[test]
    fn unrecognized_code_degrades_to_not_implemented() {
        let status = ParserError::check(-1234).unwrap_err();
        assert_eq!(status, ParserError::Unknown(-1234));
        assert_eq!(HidpStatus::from(status), HidpStatus::NotImplemented);
        assert_eq!(
            HidpStatus::from(ParserError::Unknown(i32::MAX)),
            HidpStatus::NotImplemented
        );
    }

    #[test]
    fn raw_codes_round_through_check() {
        assert_eq!(ParserError::check(0), Ok(()));
        assert_eq!(ParserError::check(-3), Err(ParserError::ReportNotFound));
        assert_eq!(ParserError::check(-9), Err(ParserError::I8042TransUnknown));
    }

    #[test]
    fn no_data_is_distinct_from_missing_collection() {
        let missing: HidpStatus = ParserError::CollectionNotFound.into();
        assert_ne!(HidpStatus::NoDataDetected, missing);
        assert_ne!(HidpStatus::NoDataDetected.code(), missing.code());
        assert_ne!(HidpStatus::NoDataDetected.code(), HIDP_STATUS_SUCCESS);
    }
}
