#![allow(non_snake_case)]

use {
    ::amrnb_rs::Decoder,
    ::std::{
        error::Error,
        ffi::c_int,
        io::{
            BufWriter,
            stderr,
        },
        ptr::null_mut,
        slice::{
            from_raw_parts,
            from_raw_parts_mut,
        },
        sync::OnceLock,
    },
    ::tracing::{
        debug,
        error,
        level_filters::LevelFilter,
        trace,
    },
    ::tracing_appender::non_blocking::{
        NonBlocking,
        WorkerGuard,
    },
    ::tracing_subscriber::{
        filter::EnvFilter,
        fmt::Layer,
        layer::SubscriberExt as _,
        registry::Registry,
        util::SubscriberInitExt as _,
    },
};

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn init_tracing() {
    GUARD.get_or_init(|| {
        let (writer, guard) = NonBlocking::new(BufWriter::new(stderr()));

        // a subscriber installed by the host process wins
        let _ = Registry::default()
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::ERROR.into())
                    .from_env_lossy(),
            )
            .with(Layer::new().with_writer(writer))
            .try_init();

        guard
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn DecoderInit() -> *mut Decoder {
    init_tracing();

    match Decoder::new() {
        Result::Ok(decoder) => {
            debug!("open decoder");
            Box::into_raw(Box::new(decoder))
        },
        Result::Err(error) => {
            error!(error = &error as &dyn Error);
            null_mut()
        },
    }
}

/// # Safety
///
/// `decoder` must be a live handle returned by [`DecoderInit`], `frame` must
/// point to `frame_len` readable bytes and `pcm` to `pcm_len` writable
/// samples.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DecoderDecode(
    decoder: *mut Decoder,
    frame: *const u8,
    frame_len: usize,
    pcm: *mut i16,
    pcm_len: usize,
    bad_frame: c_int,
) {
    let decoder = unsafe { &mut *decoder };
    let frame = unsafe { from_raw_parts(frame, frame_len) };
    let pcm = unsafe { from_raw_parts_mut(pcm, pcm_len) };

    trace!(frame_len, pcm_len, bad_frame, "decode frame");

    decoder.input().clear();
    decoder.input().extend_from_slice(frame);
    decoder.decode(pcm.len(), bad_frame);
    pcm.copy_from_slice(decoder.output());
}

/// # Safety
///
/// `decoder` must be a live handle returned by [`DecoderInit`]; it must not
/// be used again after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DecoderExit(decoder: *mut Decoder) {
    debug!("close decoder");
    drop(unsafe { Box::from_raw(decoder) });
}
