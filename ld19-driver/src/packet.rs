use crate::config::AngleMode;
use crate::constants::{
    CHECKSUM_OFFSET, CRC_POLYNOMIAL, END_ANGLE_OFFSET, FIRST_SLOT_OFFSET, FRAME_MARKER,
    FRAME_SIZE, N_SLOTS, SLOT_SIZE, SPEED_OFFSET, START_ANGLE_OFFSET, TIMESTAMP_OFFSET,
    VERSION_LENGTH_OFFSET,
};
use crate::error::{Ld19Error, Result};
use crate::numeric::{slot_angles, to_angle, to_u16};
use ld19_data::{Frame, FrameHeader, FrameTrailer, Measurement};

/// One candidate frame exactly as it came off the wire.
pub type RawFrame = [u8; FRAME_SIZE];

const CRC_TABLE: [u8; 256] = crc_table();

const fn crc_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC-8 used by the sensor, computed over `data`.
pub fn calc_checksum(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |crc, byte| CRC_TABLE[(crc ^ byte) as usize])
}

pub(crate) fn err_if_checksum_mismatched(raw: &[u8]) -> Result<()> {
    let calculated = calc_checksum(&raw[..CHECKSUM_OFFSET]);
    let expected = raw[CHECKSUM_OFFSET];
    match calculated != expected {
        true => Err(Ld19Error::ChecksumMismatch {
            expected,
            calculated,
        }),
        false => Ok(()),
    }
}

pub(crate) fn validate_frame(raw: &[u8], marker: u8) -> Result<()> {
    if raw.len() != FRAME_SIZE {
        return Err(Ld19Error::InvalidLength(raw.len()));
    }
    if raw[0] != marker {
        return Err(Ld19Error::InvalidMarker {
            expected: marker,
            found: raw[0],
        });
    }
    err_if_checksum_mismatched(raw)
}

fn read_u16(raw: &[u8], offset: usize) -> u16 {
    to_u16(raw[offset], raw[offset + 1])
}

pub(crate) fn slot_index(idx: usize) -> usize {
    FIRST_SLOT_OFFSET + idx * SLOT_SIZE
}

/// Validates a candidate frame and decodes its valid measurements.
///
/// The whole frame is rejected when the marker, length or checksum is wrong.
/// Slots reporting a distance of zero carry no return and are skipped.
pub fn decode_frame(raw: &[u8], marker: u8, angle_mode: AngleMode) -> Result<Frame> {
    validate_frame(raw, marker)?;

    let header = FrameHeader {
        version_length: raw[VERSION_LENGTH_OFFSET],
        rotation_speed: read_u16(raw, SPEED_OFFSET),
        start_angle: read_u16(raw, START_ANGLE_OFFSET),
    };
    let trailer = FrameTrailer {
        end_angle: read_u16(raw, END_ANGLE_OFFSET),
        timestamp: read_u16(raw, TIMESTAMP_OFFSET),
        checksum: raw[CHECKSUM_OFFSET],
    };

    let end_angle = match angle_mode {
        AngleMode::Interpolated => Some(to_angle(trailer.end_angle)),
        AngleMode::NominalStep => None,
    };
    let angles = slot_angles(to_angle(header.start_angle), end_angle);

    let measurements = (0..N_SLOTS)
        .map(|idx| (angles[idx], slot_index(idx)))
        .filter_map(|(angle_degree, offset)| {
            let distance_mm = read_u16(raw, offset);
            if distance_mm == 0 {
                return None;
            }
            Some(Measurement {
                angle_degree,
                distance_mm,
                intensity: raw[offset + 2],
            })
        })
        .collect();

    Ok(Frame {
        header,
        trailer,
        measurements,
    })
}

/// Builds a wire frame with a valid checksum.
///
/// `slots` holds `(distance_mm, intensity)` for each of the twelve slots.
pub fn encode_frame(
    header: &FrameHeader,
    slots: &[(u16, u8); N_SLOTS],
    end_angle: u16,
    timestamp: u16,
) -> RawFrame {
    let mut raw = [0u8; FRAME_SIZE];
    raw[0] = FRAME_MARKER;
    raw[VERSION_LENGTH_OFFSET] = header.version_length;
    raw[SPEED_OFFSET..SPEED_OFFSET + 2].copy_from_slice(&header.rotation_speed.to_le_bytes());
    raw[START_ANGLE_OFFSET..START_ANGLE_OFFSET + 2]
        .copy_from_slice(&header.start_angle.to_le_bytes());
    for (idx, (distance_mm, intensity)) in slots.iter().enumerate() {
        let offset = slot_index(idx);
        raw[offset..offset + 2].copy_from_slice(&distance_mm.to_le_bytes());
        raw[offset + 2] = *intensity;
    }
    raw[END_ANGLE_OFFSET..END_ANGLE_OFFSET + 2].copy_from_slice(&end_angle.to_le_bytes());
    raw[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 2].copy_from_slice(&timestamp.to_le_bytes());
    raw[CHECKSUM_OFFSET] = calc_checksum(&raw[..CHECKSUM_OFFSET]);
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(start_angle: u16) -> FrameHeader {
        FrameHeader {
            version_length: 0x2C,
            rotation_speed: 1000,
            start_angle,
        }
    }

    #[test]
    fn test_crc_table() {
        assert_eq!(&CRC_TABLE[..4], &[0x00, 0x4D, 0x9A, 0xD7]);
        // the table is linear over xor
        assert_eq!(CRC_TABLE[0xFF], CRC_TABLE[0x80] ^ CRC_TABLE[0x7F]);
        assert_eq!(calc_checksum(&[]), 0x00);
        assert_eq!(calc_checksum(&[0x01]), 0x4D);
    }

    #[test]
    fn test_example_frame() {
        let mut raw = vec![0x54, 0x00, 0xE8, 0x03, 0x00, 0x00];
        for _ in 0..N_SLOTS {
            raw.extend([0xE8, 0x03, 100]);
        }
        // end angle 9.96 degrees, timestamp 0
        raw.extend([0xE4, 0x03, 0x00, 0x00]);
        raw.push(calc_checksum(&raw));
        assert_eq!(raw.len(), FRAME_SIZE);

        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated).unwrap();
        assert_eq!(frame.header.rotation_speed, 1000);
        assert_eq!(frame.header.start_angle, 0);
        assert_eq!(frame.trailer.end_angle, 996);
        assert_eq!(frame.trailer.timestamp, 0);
        assert_eq!(frame.measurements.len(), N_SLOTS);
        for (i, m) in frame.measurements.iter().enumerate() {
            assert_eq!(m.distance_mm, 1000);
            assert_eq!(m.intensity, 100);
            let expected = (i as f64) * 9.96 / 11.;
            assert!(f64::abs(m.angle_degree - expected) < 1e-3);
        }
        assert!(f64::abs(frame.measurements[11].angle_degree - 9.96) < 1e-3);
    }

    #[test]
    fn test_example_frame_literal_end_angle() {
        let mut raw = vec![0x54, 0x00, 0xE8, 0x03, 0x00, 0x00];
        for _ in 0..N_SLOTS {
            raw.extend([0xE8, 0x03, 100]);
        }
        // end angle 0x033E = 8.30 degrees
        raw.extend([0x3E, 0x03, 0x00, 0x00]);
        raw.push(calc_checksum(&raw));

        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated).unwrap();
        assert_eq!(frame.trailer.end_angle, 830);
        assert_eq!(frame.measurements.len(), N_SLOTS);
        for (i, m) in frame.measurements.iter().enumerate() {
            assert_eq!(m.distance_mm, 1000);
            let expected = (i as f64) * 8.30 / 11.;
            assert!(f64::abs(m.angle_degree - expected) < 1e-3);
        }
        assert!(f64::abs(frame.measurements[0].angle_degree) < 1e-9);
        assert!(f64::abs(frame.measurements[11].angle_degree - 8.30) < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let mut slots = [(0u16, 0u8); N_SLOTS];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = (250 + 100 * i as u16, 10 + i as u8);
        }
        let raw = encode_frame(&header(0), &slots, 996, 31_000);
        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated).unwrap();

        assert_eq!(frame.header, header(0));
        assert_eq!(frame.trailer.timestamp, 31_000);
        assert_eq!(frame.trailer.checksum, raw[CHECKSUM_OFFSET]);
        let distances: Vec<u16> = frame.measurements.iter().map(|m| m.distance_mm).collect();
        let expected: Vec<u16> = slots.iter().map(|(d, _)| *d).collect();
        assert_eq!(distances, expected);
        for (i, m) in frame.measurements.iter().enumerate() {
            assert!(f64::abs(m.angle_degree - 0.9054545 * (i as f64)) < 1e-3);
            assert_eq!(m.intensity, 10 + i as u8);
        }
    }

    #[test]
    fn test_zero_distance_is_skipped() {
        let mut slots = [(1200u16, 50u8); N_SLOTS];
        slots[0] = (0, 200);
        slots[5] = (0, 200);
        slots[11] = (0, 0);
        let raw = encode_frame(&header(100), &slots, 1200, 0);
        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated).unwrap();

        assert_eq!(frame.measurements.len(), 9);
        assert!(frame.measurements.iter().all(|m| m.distance_mm > 0));
        // slot 1 keeps its own angle even though slot 0 was dropped
        assert!(f64::abs(frame.measurements[0].angle_degree - 2.) < 1e-9);
    }

    #[test]
    fn test_all_slots_empty() {
        let raw = encode_frame(&header(100), &[(0, 0); N_SLOTS], 1200, 0);
        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated).unwrap();
        assert!(frame.measurements.is_empty());
    }

    #[test]
    fn test_wraparound_angles() {
        let raw = encode_frame(&header(35_500), &[(800, 1); N_SLOTS], 600, 0);
        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated).unwrap();
        for m in frame.measurements.iter() {
            assert!((0. ..360.).contains(&m.angle_degree));
        }
        assert!(f64::abs(frame.measurements[4].angle_degree - 359.) < 1e-9);
        assert!(f64::abs(frame.measurements[5].angle_degree) < 1e-9);
        assert!(f64::abs(frame.measurements[11].angle_degree - 6.) < 1e-9);
    }

    #[test]
    fn test_nominal_step_fallback() {
        let raw = encode_frame(&header(1000), &[(800, 1); N_SLOTS], 3000, 0);
        let frame = decode_frame(&raw, FRAME_MARKER, AngleMode::NominalStep).unwrap();
        assert!(f64::abs(frame.measurements[11].angle_degree - (10. + 11. * 0.83)) < 1e-9);
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut raw = encode_frame(&header(0), &[(1000, 100); N_SLOTS], 996, 0);
        raw[20] ^= 0x40;
        assert!(matches!(
            decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated),
            Err(Ld19Error::ChecksumMismatch { .. })
        ));

        let mut raw = encode_frame(&header(0), &[(1000, 100); N_SLOTS], 996, 0);
        raw[CHECKSUM_OFFSET] = raw[CHECKSUM_OFFSET].wrapping_add(1);
        assert!(matches!(
            decode_frame(&raw, FRAME_MARKER, AngleMode::Interpolated),
            Err(Ld19Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_frame() {
        let raw = encode_frame(&header(0), &[(1000, 100); N_SLOTS], 996, 0);
        assert!(matches!(validate_frame(&raw, FRAME_MARKER), Ok(())));
        assert!(matches!(
            validate_frame(&raw[..46], FRAME_MARKER),
            Err(Ld19Error::InvalidLength(46))
        ));
        let mut longer = raw.to_vec();
        longer.push(0);
        assert!(matches!(
            validate_frame(&longer, FRAME_MARKER),
            Err(Ld19Error::InvalidLength(48))
        ));

        let mut wrong_marker = raw;
        wrong_marker[0] = 0x55;
        assert!(matches!(
            validate_frame(&wrong_marker, FRAME_MARKER),
            Err(Ld19Error::InvalidMarker {
                expected: FRAME_MARKER,
                found: 0x55
            })
        ));
    }
}
