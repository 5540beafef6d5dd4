//! Protocol vocabulary shared by the encoders and the frame generator:
//! capacity constants, data-link header layout, function codes, object groups,
//! qualifiers and the flag sets carried by DNP3 headers and points.
//!
//! Every value type is a transparent newtype over the wire representation so
//! callers can use either the named constants or a raw code taken from a
//! device profile.
use core::ops::{BitOr, BitOrAssign};

//==================================================================================CAPACITY
/// Highest "data length" a fragment may record: control byte, both addresses,
/// transport/application headers and user data, CRCs excluded.
pub const MAX_DATA_BYTES: usize = 255;

/// Bytes counted by the length field before any user data: control + 2 × address.
pub const HEADER_COUNTED_BYTES: usize = 5;

/// Framed size of a fragment payload: 255 data bytes plus a CRC pair for each
/// of the sixteen 16-byte blocks.
pub const FRAGMENT_DATA_SIZE: usize = 287;

/// Worst-case size of one fragment on the wire, data-link header included.
pub const FRAGMENT_TOTAL_SIZE: usize = FRAGMENT_DATA_SIZE + LINK_HEADER_LEN;

/// Number of worst-case fragments the output buffer is sized for. Short
/// fragments leave room for a trailing partial one.
pub const MAX_FRAGMENTS: usize = 4;

/// Capacity of the framed output buffer.
pub const MESSAGE_SIZE_MAX: usize = FRAGMENT_TOTAL_SIZE * MAX_FRAGMENTS;

/// Capacity of the user-data accumulator.
pub const USER_DATA_MAX: usize = 250 + (MAX_FRAGMENTS - 1) * 254;

/// Every block of this many payload bytes is followed by a CRC.
pub const CRC_CHUNK_SIZE: usize = 16;

/// Size of a CRC on the wire.
pub const CRC_LEN: usize = 2;

//==================================================================================LINK_HEADER
/// Two start bytes opening every data-link frame (`0x05 0x64`).
pub const START_BYTES: u16 = 0x0564;

/// Data-link header length, CRC included.
pub const LINK_HEADER_LEN: usize = 10;

/// Byte offsets inside the data-link header.
pub mod header_index {
    pub const START_BYTES: usize = 0;
    pub const LENGTH: usize = 2;
    pub const CONTROL: usize = 3;
    pub const DESTINATION: usize = 4;
    pub const SOURCE: usize = 6;
    pub const CRC: usize = 8;
}

/// Reserved data-link addresses.
pub mod address {
    /// Broadcast to every station.
    pub const ALL_STATIONS: u16 = 0xFFFF;
    /// "Self" address, accepted by any outstation that supports it.
    pub const SELF_ADDRESS: u16 = 0xFFFC;
}

//==================================================================================TRANSPORT
/// Transport segment header bits.
pub mod transport_header {
    pub const FIN: u8 = 0x80;
    pub const FIR: u8 = 0x40;
    pub const SEQUENCE_MASK: u8 = 0x3F;
}

/// Application control byte bits.
pub mod application_header {
    pub const FIR: u8 = 0x80;
    pub const FIN: u8 = 0x40;
    pub const CON: u8 = 0x20;
    pub const SEQUENCE_MASK: u8 = 0x1F;
}

//==================================================================================FUNCTION_CODE
/// Application-layer function code carried right after the application header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlCode(pub u8);

impl ControlCode {
    pub const CONFIRM: Self = Self(0);
    pub const READ: Self = Self(1);
    pub const WRITE: Self = Self(2);
    pub const SELECT: Self = Self(3);
    pub const OPERATE: Self = Self(4);
    pub const DIRECT_OPERATE: Self = Self(5);
    pub const DIRECT_OPERATE_NO_ACK: Self = Self(6);
    pub const FREEZE_AND_CLEAR: Self = Self(9);
    pub const COLD_RESTART: Self = Self(13);
    pub const WARM_RESTART: Self = Self(14);
    pub const FILE_OPEN: Self = Self(25);
    pub const FILE_CLOSE: Self = Self(26);
    pub const RESPONSE: Self = Self(129);
    pub const UNSOLICITED: Self = Self(130);

    /// Raw function code.
    #[inline]
    pub const fn code(&self) -> u8 {
        self.0
    }

    /// Solicited responses carry internal indications and never request a confirm.
    #[inline]
    pub const fn is_response(&self) -> bool {
        self.0 == Self::RESPONSE.0
    }
}

impl Default for ControlCode {
    fn default() -> Self {
        Self::READ
    }
}

//==================================================================================DATA_CONTROL
/// Data-link control byte, written verbatim in each fragment header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataControl(pub u8);

impl DataControl {
    pub const DIRECTION: Self = Self(0x80);
    pub const PRIMARY: Self = Self(0x40);
    pub const FRAME_COUNT_BIT: Self = Self(0x20);
    pub const FRAME_COUNT_VALID: Self = Self(0x10);
    pub const CONFIRMED_USER_DATA: Self = Self(0x03);
    pub const UNCONFIRMED_USER_DATA: Self = Self(0x04);

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DataControl {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DataControl {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//==================================================================================IIN
/// Internal indications (IIN1 in the low byte, IIN2 in the high byte).
/// Only emitted in `Response` messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InternalIndicators(pub u16);

impl InternalIndicators {
    pub const NONE: Self = Self(0x0000);
    pub const ALL_STATIONS: Self = Self(0x0001);
    pub const CLASS_1_EVENTS: Self = Self(0x0002);
    pub const CLASS_2_EVENTS: Self = Self(0x0004);
    pub const CLASS_3_EVENTS: Self = Self(0x0008);
    pub const NEED_TIME: Self = Self(0x0010);
    pub const LOCAL_CONTROL: Self = Self(0x0020);
    pub const DEVICE_TROUBLE: Self = Self(0x0040);
    pub const DEVICE_RESTART: Self = Self(0x0080);
    pub const NO_FUNC_CODE_SUPPORT: Self = Self(0x0100);
    pub const OBJECT_UNKNOWN: Self = Self(0x0200);
    pub const PARAMETER_ERROR: Self = Self(0x0400);
    pub const EVENT_BUFFER_OVERFLOW: Self = Self(0x0800);
    pub const ALREADY_EXECUTING: Self = Self(0x1000);
    pub const CONFIG_CORRUPT: Self = Self(0x2000);

    #[inline]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for InternalIndicators {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for InternalIndicators {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//==================================================================================GROUP
/// Object group number (first byte of every object header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Group(pub u8);

impl Group {
    pub const DEVICE_ATTRIBUTES: Self = Self(0);
    pub const BINARY_INPUT: Self = Self(1);
    pub const BINARY_INPUT_EVENT: Self = Self(2);
    pub const BINARY_OUTPUT: Self = Self(10);
    pub const BINARY_OUTPUT_COMMAND: Self = Self(12);
    pub const COUNTER: Self = Self(20);
    pub const ANALOG_INPUT: Self = Self(30);
    pub const FROZEN_ANALOG_INPUT: Self = Self(31);
    pub const ANALOG_INPUT_DEADBAND: Self = Self(34);
    pub const ANALOG_OUTPUT_STATUS: Self = Self(40);
    pub const ANALOG_OUTPUT_BLOCK: Self = Self(41);
    pub const TIME_DELAY: Self = Self(52);
    pub const CLASS_OBJECTS: Self = Self(60);
    pub const FILE_CONTROL: Self = Self(70);
    pub const INTERNAL_INDICATIONS: Self = Self(80);
    pub const VIRTUAL_TERMINAL_OUTPUT: Self = Self(112);
    pub const VIRTUAL_TERMINAL_EVENT: Self = Self(113);
}

impl From<Group> for u8 {
    fn from(group: Group) -> u8 {
        group.0
    }
}

/// Size in bits of one point for the object variations this crate encodes.
/// Returns `None` for unknown objects.
pub const fn data_object_bit_size(group: Group, variation: u8) -> Option<u16> {
    match (group.0, variation) {
        // Packed status bits
        (1, 1) | (10, 1) => Some(1),
        // Status byte with flags
        (1, 2) | (10, 2) => Some(8),
        // Binary input event without / with absolute time
        (2, 1) => Some(8),
        (2, 2) => Some(56),
        // CROB and pattern control block: 11 bytes
        (12, 1) | (12, 2) => Some(88),
        // Pattern mask
        (12, 3) => Some(1),
        _ => None,
    }
}

//==================================================================================QUALIFIER
/// Object qualifier: high nibble selects the index prefix, low nibble the range code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Qualifier(pub u8);

impl Qualifier {
    pub const PREFIX_MASK: u8 = 0xF0;
    pub const CODE_MASK: u8 = 0x0F;

    // Index prefix (high nibble)
    pub const PREFIX_NONE: u8 = 0x00;
    pub const PREFIX_1_BYTE: u8 = 0x10;
    pub const PREFIX_2_BYTES: u8 = 0x20;
    pub const PREFIX_4_BYTES: u8 = 0x30;
    pub const SIZE_1_BYTE: u8 = 0x40;
    pub const SIZE_2_BYTES: u8 = 0x50;
    pub const SIZE_4_BYTES: u8 = 0x60;

    // Range code (low nibble)
    pub const START_STOP_1_BYTE: u8 = 0x00;
    pub const START_STOP_2_BYTES: u8 = 0x01;
    pub const START_STOP_4_BYTES: u8 = 0x02;
    pub const ADDRESS_START_STOP_1_BYTE: u8 = 0x03;
    pub const ADDRESS_START_STOP_2_BYTES: u8 = 0x04;
    pub const ADDRESS_START_STOP_4_BYTES: u8 = 0x05;
    pub const NO_RANGE: u8 = 0x06;
    pub const COUNT_1_BYTE: u8 = 0x07;
    pub const COUNT_2_BYTES: u8 = 0x08;
    pub const COUNT_4_BYTES: u8 = 0x09;
    pub const FREE_FORMAT: u8 = 0x0B;

    /// Combine a prefix nibble and a range code.
    #[inline]
    pub const fn new(prefix: u8, code: u8) -> Self {
        Self((prefix & Self::PREFIX_MASK) | (code & Self::CODE_MASK))
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn prefix(&self) -> u8 {
        self.0 & Self::PREFIX_MASK
    }

    #[inline]
    pub const fn code(&self) -> u8 {
        self.0 & Self::CODE_MASK
    }
}

//==================================================================================CROB
/// Operation type of a Control Relay Output Block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayControlCode(pub u8);

impl RelayControlCode {
    pub const NUL: Self = Self(0x00);
    pub const PULSE_ON: Self = Self(0x01);
    pub const PULSE_OFF: Self = Self(0x02);
    pub const LATCH_ON: Self = Self(0x03);
    pub const LATCH_OFF: Self = Self(0x04);
    pub const CLOSE: Self = Self(0x40);
    pub const TRIP: Self = Self(0x80);

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for RelayControlCode {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

//==================================================================================POINT_FLAGS
/// Flag byte attached to a binary input or binary output point.
/// Bit 7 holds the point state; variation 1 only transmits that bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointFlags(pub u8);

impl PointFlags {
    pub const ONLINE: Self = Self(0x01);
    pub const RESTART: Self = Self(0x02);
    pub const COMM_LOST: Self = Self(0x04);
    pub const REMOTE_FORCED: Self = Self(0x08);
    pub const LOCAL_FORCED: Self = Self(0x10);
    /// Binary inputs only.
    pub const CHATTER_FILTER: Self = Self(0x20);
    pub const STATE: Self = Self(0x80);

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Current point state (bit 7).
    #[inline]
    pub const fn state(&self) -> bool {
        self.contains(Self::STATE)
    }
}

impl BitOr for PointFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

//==================================================================================DEVICE_ATTRIBUTES
/// Group 0 variations: each one names a device attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAttribute(pub u8);

impl DeviceAttribute {
    pub const CONFIG_ID: Self = Self(196);
    pub const CONFIG_VERSION: Self = Self(197);
    pub const USER_SPECIFIC_ATTRIBUTES: Self = Self(211);
    pub const SOFTWARE_VERSION: Self = Self(242);
    pub const HARDWARE_VERSION: Self = Self(243);
    pub const LOCATION: Self = Self(245);
    pub const DEVICE_ID: Self = Self(246);
    pub const DEVICE_NAME: Self = Self(247);
    pub const SERIAL_NUMBER: Self = Self(248);
    pub const SUBSET_AND_CONFORMANCE: Self = Self(249);
    pub const PRODUCT_NAME: Self = Self(250);
    pub const MANUFACTURER_NAME: Self = Self(252);
    pub const ALL_ATTRIBUTES: Self = Self(254);
    pub const LIST_OF_ATTRIBUTES: Self = Self(255);
}

impl From<DeviceAttribute> for u8 {
    fn from(attribute: DeviceAttribute) -> u8 {
        attribute.0
    }
}

/// Data type code for a visible (ASCII) string attribute value.
pub const ATTRIBUTE_TYPE_VISIBLE_STRING: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_constants() {
        assert_eq!(FRAGMENT_TOTAL_SIZE, 297);
        assert_eq!(MESSAGE_SIZE_MAX, 1188);
        assert_eq!(USER_DATA_MAX, 1012);
    }

    #[test]
    fn test_qualifier_nibbles() {
        let qualifier = Qualifier::new(Qualifier::PREFIX_2_BYTES, Qualifier::COUNT_2_BYTES);
        assert_eq!(qualifier.bits(), 0x28);
        assert_eq!(qualifier.prefix(), 0x20);
        assert_eq!(qualifier.code(), 0x08);
    }

    #[test]
    fn test_flag_composition() {
        let flags = PointFlags::ONLINE | PointFlags::STATE;
        assert!(flags.state());
        assert!(flags.contains(PointFlags::ONLINE));
        assert!(!flags.contains(PointFlags::RESTART));

        let mut iin = InternalIndicators::DEVICE_RESTART;
        iin |= InternalIndicators::NEED_TIME;
        assert_eq!(iin.bits(), 0x0090);
    }

    #[test]
    fn test_response_detection() {
        assert!(ControlCode::RESPONSE.is_response());
        assert!(!ControlCode::UNSOLICITED.is_response());
        assert!(!ControlCode::default().is_response());
    }

    #[test]
    fn test_bit_sizes() {
        assert_eq!(data_object_bit_size(Group::BINARY_INPUT, 1), Some(1));
        assert_eq!(data_object_bit_size(Group::BINARY_OUTPUT_COMMAND, 1), Some(88));
        assert_eq!(data_object_bit_size(Group::ANALOG_INPUT, 1), None);
    }
}
