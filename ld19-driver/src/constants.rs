pub(crate) const FRAME_MARKER: u8 = 0x54;
pub(crate) const FRAME_SIZE: usize = 47;
pub(crate) const N_SLOTS: usize = 12;
pub(crate) const SLOT_SIZE: usize = 3;
// Byte offsets within a frame
pub(crate) const VERSION_LENGTH_OFFSET: usize = 1;
pub(crate) const SPEED_OFFSET: usize = 2;
pub(crate) const START_ANGLE_OFFSET: usize = 4;
pub(crate) const FIRST_SLOT_OFFSET: usize = 6;
pub(crate) const END_ANGLE_OFFSET: usize = 42;
pub(crate) const TIMESTAMP_OFFSET: usize = 44;
pub(crate) const CHECKSUM_OFFSET: usize = 46;
pub(crate) const CRC_POLYNOMIAL: u8 = 0x4D;
/// Nominal angular step per slot, used only when the end angle is not trusted.
pub(crate) const NOMINAL_STEP_DEGREE: f64 = 0.83;
pub(crate) const DEFAULT_BAUD_RATE: u32 = 230_400;
pub(crate) const DEFAULT_CAPACITY: usize = 5000;
pub(crate) const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;
