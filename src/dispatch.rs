use crate::{
    consts::HidUsagePage,
    errors::HidpStatus,
    parser::ReportParser,
    types::{LinkCollection, ReportType, Usage, UsageAndPage, UsagePage, ValueCaps},
    HidParser,
};

impl<P: ReportParser> HidParser<P> {
    pub fn get_specific_value_caps(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        link_collection: LinkCollection,
        usage: Usage,
        value_caps: &mut [ValueCaps],
    ) -> Result<usize, HidpStatus> {
        // TODO: scope the search once the parser exposes its collection tree
        debug_assert!(link_collection.is_unspecified());
        Ok(self
            .parser
            .specific_value_caps(report_type, usage_page, usage, value_caps)?)
    }

    /// Usages of `usage_page` asserted in `report`, written from the start of
    /// `usage_list`. Returns how many were written.
    pub fn get_usages(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        link_collection: LinkCollection,
        usage_list: &mut [Usage],
        report: &[u8],
    ) -> Result<usize, HidpStatus> {
        debug_assert!(link_collection.is_unspecified());
        Ok(self
            .parser
            .usages(report_type, usage_page, usage_list, report)?)
    }

    /// Like [`get_usages`](Self::get_usages) across every page, each usage
    /// paired with its page.
    pub fn get_usages_ex(
        &self,
        report_type: ReportType,
        link_collection: LinkCollection,
        usage_list: &mut [UsageAndPage],
        report: &[u8],
    ) -> Result<usize, HidpStatus> {
        debug_assert!(link_collection.is_unspecified());
        Ok(self
            .parser
            .usages_and_pages(report_type, usage_list, report)?)
    }

    pub fn get_scaled_usage_value(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        link_collection: LinkCollection,
        usage: Usage,
        report: &[u8],
    ) -> Result<i32, HidpStatus> {
        debug_assert!(link_collection.is_unspecified());
        Ok(self
            .parser
            .scaled_usage_value(report_type, usage_page, usage, report)?)
    }

    /// Longest usage list `get_usages` can produce for `usage_page`.
    ///
    /// The undefined page is not treated as "every page" here; it yields 0.
    pub fn max_usage_list_length(&self, report_type: ReportType, usage_page: UsagePage) -> usize {
        if usage_page == UsagePage::from(HidUsagePage::Undefined) {
            warn!("max usage list length of the undefined page is not implemented");
            return 0;
        }
        self.parser.max_usage_list_length(report_type, usage_page)
    }

    pub fn get_button_caps(&self, report_type: ReportType) -> Result<usize, HidpStatus> {
        self.get_specific_button_caps(
            report_type,
            HidUsagePage::Undefined.into(),
            LinkCollection::UNSPECIFIED,
            0,
        )
    }

    /// Not implemented; always fails with [`HidpStatus::NotImplemented`].
    pub fn get_specific_button_caps(
        &self,
        report_type: ReportType,
        usage_page: UsagePage,
        _link_collection: LinkCollection,
        usage: Usage,
    ) -> Result<usize, HidpStatus> {
        warn!(
            "button caps ({:?}, page {}, usage {}) not implemented",
            report_type, usage_page, usage
        );
        Err(HidpStatus::NotImplemented)
    }
}
