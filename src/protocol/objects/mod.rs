//! Data-object encoders: each one appends a complete object header (group,
//! variation, qualifier, range) and its point data to the message user data.
//!
//! Multi-byte object fields are written LSB first. Every encoder is atomic:
//! when it fails, the accumulator is left exactly as it was.
use crate::core::{Group, PointFlags, Qualifier, RelayControlCode, ATTRIBUTE_TYPE_VISIBLE_STRING};
use crate::error::BuildError;
use crate::infra::codec::bits::PackedBitWriter;
use crate::infra::codec::bytes::{write_u16, write_u32, ByteOrder};
use crate::protocol::message::MessageBuffer;

/// Size of a CROB / pattern control block payload.
pub const CROB_LEN: usize = 11;

/// Largest point array a single binary object may carry (1-byte count field).
pub const MAX_POINTS_PER_OBJECT: usize = 255;

/// Binary object flavours sharing the same array layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryKind {
    Input,
    Output,
}

impl BinaryKind {
    const fn group(self) -> Group {
        match self {
            BinaryKind::Input => Group::BINARY_INPUT,
            BinaryKind::Output => Group::BINARY_OUTPUT,
        }
    }
}

impl MessageBuffer {
    /// Append a 16-bit value, LSB first.
    fn add_u16_le(&mut self, value: u16) -> Result<(), BuildError> {
        write_u16(value, ByteOrder::LsbFirst, self.reserve(2)?, 0)?;
        Ok(())
    }

    /// Append a 32-bit value, LSB first.
    fn add_u32_le(&mut self, value: u32) -> Result<(), BuildError> {
        write_u32(value, ByteOrder::LsbFirst, self.reserve(4)?, 0)?;
        Ok(())
    }

    fn add_object_header(
        &mut self,
        group: Group,
        variation: u8,
        qualifier: Qualifier,
    ) -> Result<(), BuildError> {
        self.add_data(&[group.0, variation, qualifier.bits()])
    }

    //==================================================================================REQUESTS
    /// Request an object type from the remote station.
    ///
    /// With `start == 0 && stop == 0` every point is requested (no-range
    /// qualifier, three bytes). Otherwise a 2-byte start/stop range follows.
    pub fn add_data_object_request(
        &mut self,
        group: Group,
        variation: u8,
        start: u16,
        stop: u16,
    ) -> Result<(), BuildError> {
        self.transaction(|msg| {
            if start == 0 && stop == 0 {
                msg.add_object_header(
                    group,
                    variation,
                    Qualifier::new(Qualifier::PREFIX_NONE, Qualifier::NO_RANGE),
                )
            } else {
                msg.add_object_header(
                    group,
                    variation,
                    Qualifier::new(Qualifier::PREFIX_NONE, Qualifier::START_STOP_2_BYTES),
                )?;
                msg.add_u16_le(start)?;
                msg.add_u16_le(stop)
            }
        })
    }

    /// Request a device attribute (group 0). Start/format and stop/length are
    /// both zero: full value, any data type.
    pub fn add_device_attribute_request(
        &mut self,
        attribute: impl Into<u8>,
    ) -> Result<(), BuildError> {
        let attribute = attribute.into();
        self.transaction(|msg| {
            msg.add_object_header(
                Group::DEVICE_ATTRIBUTES,
                attribute,
                Qualifier::new(Qualifier::PREFIX_NONE, Qualifier::START_STOP_1_BYTE),
            )?;
            msg.add_data(&[0, 0])
        })
    }

    /// Append a device attribute carrying an ASCII string value.
    pub fn add_device_attribute_value(
        &mut self,
        attribute: impl Into<u8>,
        value: &str,
    ) -> Result<(), BuildError> {
        let attribute = attribute.into();
        let text = value.as_bytes();
        let text_len =
            u8::try_from(text.len()).map_err(|_| BuildError::TextTooLong { len: text.len() })?;

        self.transaction(|msg| {
            msg.add_object_header(
                Group::DEVICE_ATTRIBUTES,
                attribute,
                Qualifier::new(Qualifier::PREFIX_1_BYTE, Qualifier::COUNT_1_BYTE),
            )?;
            // count, index, data type, length
            msg.add_data(&[1, attribute, ATTRIBUTE_TYPE_VISIBLE_STRING, text_len])?;
            msg.add_data(text)
        })
    }

    //==================================================================================COMMANDS
    /// Append a Control Relay Output Block (variation 1) or pattern control
    /// block (variation 2) addressing a single point.
    #[allow(clippy::too_many_arguments)]
    pub fn add_binary_output_command(
        &mut self,
        variation: u8,
        index: u16,
        control: RelayControlCode,
        op_count: u8,
        on_time_ms: u32,
        off_time_ms: u32,
        status: u8,
    ) -> Result<(), BuildError> {
        if !matches!(variation, 1 | 2) {
            return Err(BuildError::InvalidVariation {
                group: Group::BINARY_OUTPUT_COMMAND.0,
                variation,
            });
        }

        self.transaction(|msg| {
            msg.add_object_header(
                Group::BINARY_OUTPUT_COMMAND,
                variation,
                Qualifier::new(Qualifier::PREFIX_2_BYTES, Qualifier::COUNT_2_BYTES),
            )?;
            // One point, addressed through its prefix.
            msg.add_u16_le(1)?;
            msg.add_u16_le(index)?;

            msg.add_data(&[control.bits(), op_count])?;
            msg.add_u32_le(on_time_ms)?;
            msg.add_u32_le(off_time_ms)?;
            msg.add_byte(status)
        })
    }

    //==================================================================================POINT_ARRAYS
    /// Append binary output statuses (group 10).
    ///
    /// * variation 1 – packed state bits; `include_prefix` is ignored.
    /// * variation 2 – one flag byte per point, optionally prefixed by its index.
    pub fn add_binary_output_object(
        &mut self,
        variation: u8,
        statuses: &[PointFlags],
        include_prefix: bool,
        start_address: u16,
    ) -> Result<(), BuildError> {
        self.add_binary_object(
            BinaryKind::Output,
            variation,
            statuses,
            include_prefix,
            start_address,
        )
    }

    /// Append binary input statuses (group 1). Same layout rules as
    /// [`MessageBuffer::add_binary_output_object`].
    pub fn add_binary_input_object(
        &mut self,
        variation: u8,
        statuses: &[PointFlags],
        include_prefix: bool,
        start_address: u16,
    ) -> Result<(), BuildError> {
        self.add_binary_object(
            BinaryKind::Input,
            variation,
            statuses,
            include_prefix,
            start_address,
        )
    }

    fn add_binary_object(
        &mut self,
        kind: BinaryKind,
        variation: u8,
        statuses: &[PointFlags],
        include_prefix: bool,
        start_address: u16,
    ) -> Result<(), BuildError> {
        let group = kind.group();
        if !matches!(variation, 1 | 2) {
            return Err(BuildError::InvalidVariation {
                group: group.0,
                variation,
            });
        }

        let count = statuses.len();
        if count == 0 || count > MAX_POINTS_PER_OBJECT {
            return Err(BuildError::InvalidPointCount { count });
        }
        // Last index must stay addressable on 16 bits.
        let stop_address = start_address
            .checked_add((count - 1) as u16)
            .ok_or(BuildError::InvalidPointCount { count })?;

        // Packed bits cannot carry per-point prefixes.
        let include_prefix = include_prefix && variation == 2;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Binary object g{}v{}: {} points from {}",
            group.0,
            variation,
            count,
            start_address
        );

        self.transaction(|msg| {
            if include_prefix {
                msg.add_object_header(
                    group,
                    variation,
                    Qualifier::new(Qualifier::PREFIX_2_BYTES, Qualifier::COUNT_1_BYTE),
                )?;
                msg.add_byte(count as u8)?;
            } else {
                msg.add_object_header(
                    group,
                    variation,
                    Qualifier::new(Qualifier::PREFIX_NONE, Qualifier::ADDRESS_START_STOP_2_BYTES),
                )?;
                msg.add_u16_le(start_address)?;
                msg.add_u16_le(stop_address)?;
            }

            if variation == 1 {
                let packed = msg.reserve(PackedBitWriter::packed_len(count))?;
                let mut writer = PackedBitWriter::new(packed);
                // Last point first: it ends up in the high bits of the first byte.
                for flags in statuses.iter().rev() {
                    writer.push_bit(flags.state())?;
                }
                writer.finish()?;
            } else {
                for (offset, flags) in statuses.iter().enumerate() {
                    if include_prefix {
                        msg.add_u16_le(start_address + offset as u16)?;
                    }
                    msg.add_byte(flags.bits())?;
                }
            }
            Ok(())
        })
    }
}
