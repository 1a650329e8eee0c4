use bitvec::{array::BitArray, order::Lsb0, BitArr};

use crate::{
    consts::HidUsagePage,
    errors::{HidpStatus, ParserError},
    parser::ReportParser,
    types::{Usage, UsageAndPage},
    HidParser,
};

/// Whether a batch of usages was pressed or released.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub enum KeyboardDirection {
    Break = 0,
    Make = 1,
}

/// Bit positions of [`ModifierState`].
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub enum Modifier {
    LeftControl = 0,
    LeftShift = 1,
    LeftAlt = 2,
    LeftGui = 3,
    RightControl = 4,
    RightShift = 5,
    RightAlt = 6,
    RightGui = 7,
    CapsLock = 8,
    ScrollLock = 9,
    NumLock = 10,
}

/// Modifier and lock state carried from one translation to the next.
///
/// Owned by the caller; bits 11.. are reserved and kept as given.
#[derive(Clone, Copy)]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
#[repr(transparent)]
pub struct ModifierState(BitArr!(for 32, in u32, Lsb0));
static_assertions::const_assert_eq!(core::mem::size_of::<ModifierState>(), 4);

impl ModifierState {
    pub const fn new() -> Self {
        Self(BitArray::ZERO)
    }

    pub fn from_bits(bits: u32) -> Self {
        Self(BitArray::new([bits]))
    }

    pub fn bits(self) -> u32 {
        self.0.into_inner()[0]
    }

    pub fn is_set(&self, modifier: Modifier) -> bool {
        self.0[modifier as usize]
    }

    pub fn set(&mut self, modifier: Modifier, value: bool) {
        self.0.set(modifier as usize, value);
    }

    pub fn toggle(&mut self, modifier: Modifier) {
        let value = self.is_set(modifier);
        self.set(modifier, !value);
    }
}

impl PartialEq for ModifierState {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for ModifierState {}

impl Default for ModifierState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModifierState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ModifierState({=u32:#x})", self.bits())
    }
}

/// Translation of keyboard-page usages into i8042 scan codes.
pub trait KeyboardTranslator {
    /// Emits the scan codes for one keyboard usage through `insert`, updating
    /// `modifier_state` as modifier and lock keys go by.
    fn translate_usage(
        &self,
        usage: Usage,
        direction: KeyboardDirection,
        modifier_state: &mut ModifierState,
        insert: &mut dyn FnMut(&[u8]),
    ) -> Result<(), ParserError>;
}

impl<P: ReportParser + KeyboardTranslator> HidParser<P> {
    /// Translates a batch of changed usages into scan codes, in order.
    ///
    /// Stops at the first usage that fails. Codes already handed to `insert`
    /// for earlier usages stay emitted.
    pub fn translate_usage_and_pages_to_i8042_scan_codes<F: FnMut(&[u8])>(
        &self,
        changed_usages: &[UsageAndPage],
        direction: KeyboardDirection,
        modifier_state: &mut ModifierState,
        mut insert: F,
    ) -> Result<(), HidpStatus> {
        for changed in changed_usages {
            match HidUsagePage::try_from(changed.usage_page) {
                Ok(HidUsagePage::Keyboard) => {
                    self.parser
                        .translate_usage(changed.usage, direction, modifier_state, &mut insert)?;
                }
                Ok(HidUsagePage::Consumer) => {
                    warn!("consumer usage {} has no scan code translation yet", changed.usage);
                    return Err(ParserError::NotImplemented.into());
                }
                _ => {
                    error!("unexpected usage page {}", changed.usage_page);
                    return Err(HidpStatus::I8042TransUnknown);
                }
            }
        }

        Ok(())
    }
}
