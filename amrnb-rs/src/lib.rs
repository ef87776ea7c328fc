use {
    ::amrnb_sys::{
        Decoder_Interface_Decode,
        Decoder_Interface_exit,
        Decoder_Interface_init,
    },
    ::std::{
        error::Error,
        ffi::{
            c_int,
            c_void,
        },
        fmt::{
            Display,
            Formatter,
            Result as FmtResult,
        },
    },
};

#[derive(Debug)]
pub struct Decoder {
    raw: *mut c_void,
    input: Vec<u8>,
    output: Vec<i16>,
}

impl Decoder {
    pub const FRAME_SAMPLES: usize = 160;
    pub const MAX_FRAME_BYTES: usize = 32;

    pub fn new() -> Result<Self, AmrError> {
        let raw = unsafe { Decoder_Interface_init() };
        AmrError::new(raw)?;

        Result::Ok(Self {
            raw,
            input: Vec::new(),
            output: Vec::new(),
        })
    }

    pub fn input(&mut self) -> &mut Vec<u8> {
        &mut self.input
    }

    pub fn output(&self) -> &[i16] {
        &self.output
    }

    pub fn decode(&mut self, samples: usize, bad_frame: c_int) {
        let len = self.input.len();

        // the codec reads the frame length from the mode byte and always
        // writes one full frame, so the scratch buffers must span a frame
        // even when the caller-declared lengths are shorter
        self.input.resize(len.max(Self::MAX_FRAME_BYTES), 0);
        self.output.resize(samples.max(Self::FRAME_SAMPLES), 0);

        unsafe {
            Decoder_Interface_Decode(
                self.raw,
                self.input.as_ptr(),
                self.output.as_mut_ptr(),
                bad_frame,
            )
        };

        self.input.truncate(len);
        self.output.truncate(samples);
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        unsafe { Decoder_Interface_exit(self.raw) };
    }
}

unsafe impl Send for Decoder {}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AmrError;

impl AmrError {
    fn new(raw: *mut c_void) -> Result<(), Self> {
        match raw.is_null() {
            true => Result::Err(Self),
            false => Result::Ok(()),
        }
    }
}

impl Display for AmrError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "amrnb: decoder state allocation failed")
    }
}

impl Error for AmrError {}

#[cfg(test)]
mod tests {
    use super::*;

    // 4.75 kbit/s frame header with the quality bit set, zero payload
    fn silence_frame() -> [u8; Decoder::MAX_FRAME_BYTES] {
        let mut frame = [0; Decoder::MAX_FRAME_BYTES];
        frame[0] = 0x04;
        frame
    }

    #[test]
    fn open_and_close() {
        let decoder = Decoder::new().unwrap();
        drop(decoder);
    }

    #[test]
    fn decode_fills_requested_samples() {
        let mut decoder = Decoder::new().unwrap();
        decoder.input().extend_from_slice(&silence_frame());
        decoder.decode(Decoder::FRAME_SAMPLES, 0);
        assert_eq!(decoder.output().len(), Decoder::FRAME_SAMPLES);
    }

    #[test]
    fn decode_truncates_to_short_output() {
        let mut decoder = Decoder::new().unwrap();
        decoder.input().extend_from_slice(&silence_frame());
        decoder.decode(10, 0);
        assert_eq!(decoder.output().len(), 10);
    }

    #[test]
    fn decode_zero_fills_past_one_frame() {
        let mut decoder = Decoder::new().unwrap();
        decoder.input().extend_from_slice(&silence_frame());
        decoder.decode(200, 0);
        assert_eq!(decoder.output().len(), 200);

        assert!(
            decoder.output()[Decoder::FRAME_SAMPLES..]
                .iter()
                .all(|&sample| sample == 0)
        );
    }

    #[test]
    fn decode_runs_across_frames() {
        let mut decoder = Decoder::new().unwrap();

        for _ in 0..4 {
            decoder.input().clear();
            decoder.input().extend_from_slice(&silence_frame());
            decoder.decode(Decoder::FRAME_SAMPLES, 0);
            assert_eq!(decoder.output().len(), Decoder::FRAME_SAMPLES);
        }
    }

    #[test]
    fn decode_with_bad_frame_flag() {
        let mut decoder = Decoder::new().unwrap();
        decoder.input().extend_from_slice(&silence_frame());
        decoder.decode(Decoder::FRAME_SAMPLES, 1);
        assert_eq!(decoder.output().len(), Decoder::FRAME_SAMPLES);
    }

    #[test]
    fn decode_preserves_input_length() {
        let mut decoder = Decoder::new().unwrap();
        decoder.input().extend_from_slice(&silence_frame()[..5]);
        decoder.decode(Decoder::FRAME_SAMPLES, 0);
        assert_eq!(decoder.input().len(), 5);
    }
}
