use crate::types::UsagePage;

/// Usage pages this layer names explicitly. Any other page value is carried
/// as a plain [`UsagePage`].
#[repr(u16)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HidUsagePage {
    /// No page; also the "any page" wildcard for usage queries
    Undefined      = 0x00,
    /// Pointers, mice, joysticks, system controls
    GenericDesktop = 0x01,
    /// Simulation controls (throttles, rudders)
    Simulation     = 0x02,
    /// Keyboard/keypad usages, the only page with an i8042 translation
    Keyboard       = 0x07,
    /// LED indicators
    Led            = 0x08,
    /// Buttons
    Button         = 0x09,
    /// Consumer controls (media keys, volume)
    Consumer       = 0x0C,
    /// Digitizers, pens, touch surfaces
    Digitizer      = 0x0D,
}

impl TryFrom<UsagePage> for HidUsagePage {
    type Error = ();

    fn try_from(page: UsagePage) -> Result<Self, Self::Error> {
        match page {
            0x00 => Ok(HidUsagePage::Undefined),
            0x01 => Ok(HidUsagePage::GenericDesktop),
            0x02 => Ok(HidUsagePage::Simulation),
            0x07 => Ok(HidUsagePage::Keyboard),
            0x08 => Ok(HidUsagePage::Led),
            0x09 => Ok(HidUsagePage::Button),
            0x0C => Ok(HidUsagePage::Consumer),
            0x0D => Ok(HidUsagePage::Digitizer),
            _    => Err(()),
        }
    }
}

impl From<HidUsagePage> for UsagePage {
    fn from(page: HidUsagePage) -> Self {
        page as UsagePage
    }
}
