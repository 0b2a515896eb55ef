//! Selfie Capture CLI
//!
//! Demonstrates the capture pipeline end to end against a mock camera
//! backend: the binary plays the platform's role, answering the
//! coordinator's commands with the callbacks real hardware would
//! deliver, and persists the resulting frames to disk.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use selfie::config::FileConfig;
use selfie::device::{
    choose_still_format, find_front_camera, CameraIdentity, Facing, FixedDeviceList, FrameFormat,
};
use selfie::persist::{NullMediaIndex, PhotoWriter};
use selfie::session::{
    Coordinator, DeviceHandle, MockBackend, SessionController, SessionHandle, StatusSink,
};
use selfie::surface::SurfaceSet;
use selfie::trigger::{EventTriggers, HeadphoneEvent, SurfaceListenerRegistration};

/// Capture stills from a mock front camera.
#[derive(Debug, Parser)]
#[command(name = "selfie", version = selfie::VERSION)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory photographs are written to (overrides the config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of captures to perform (overrides the config).
    #[arg(long)]
    captures: Option<u32>,
}

/// Status surface backed by the terminal via tracing.
#[derive(Debug, Clone, Copy)]
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn show_error(&self, message: &str) {
        tracing::error!("{message} — preview hidden");
    }

    fn notify(&self, message: &str) {
        info!("{message}");
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Selfie Capture v{}", selfie::VERSION);
    info!("This is a demonstration using a mock camera backend");

    let file_config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    let mut config = file_config.capture;
    if let Some(dir) = args.output_dir {
        config.pictures_dir = dir;
    }
    let captures = args.captures.unwrap_or(file_config.demo.captures);

    // The platform would enumerate real hardware here.
    let lister = FixedDeviceList::new(vec![
        CameraIdentity::new("0", Facing::Back),
        CameraIdentity::new("1", Facing::Front),
    ]);
    let camera = match find_front_camera(&lister) {
        Ok(camera) => camera,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let camera_id = camera.id().to_owned();

    let fallback = FrameFormat::jpeg(config.fallback_width, config.fallback_height);
    let advertised = [FrameFormat::jpeg(1280, 960), FrameFormat::jpeg(640, 480)];
    let still_format = choose_still_format(Some(&advertised), fallback);

    let surfaces = SurfaceSet::new(
        FrameFormat::yuv(1920, 1080),
        still_format,
        config.still_queue_depth,
    );
    let still = surfaces.still().clone();

    let backend = MockBackend::new();
    let coordinator = Coordinator::new(camera, surfaces, backend, ConsoleSink);
    let controller = SessionController::new(coordinator);

    let mut surface_registration = SurfaceListenerRegistration::new(controller.clone());
    let mut triggers = EventTriggers::new(controller.clone());
    surface_registration.register();
    triggers.register();

    // Screen is active and the display surface appears: the pipeline
    // opens the camera, and we answer as the platform would.
    surface_registration.surface_created();
    controller.on_device_opened(DeviceHandle::new(&camera_id));
    controller.on_session_configured(SessionHandle::new(1));

    if !controller.is_session_ready() {
        // The error was already surfaced through the sink.
        std::process::exit(1);
    }
    info!("Preview running; capturing {} stills", captures);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst)) {
            warn!("Failed to install interrupt handler: {}", e);
        }
    }

    let writer = PhotoWriter::new(&config.pictures_dir, NullMediaIndex);
    let mut saved = 0u32;

    // The plug-state broadcast is observed for logging only.
    triggers.on_broadcast(HeadphoneEvent::PlugChanged { state: 0 });

    for i in 0..captures {
        if !running.load(Ordering::SeqCst) {
            info!("Interrupted; closing early");
            break;
        }

        // Alternate the two trigger sources.
        if i % 2 == 0 {
            triggers.take_picture();
        } else {
            triggers.on_broadcast(HeadphoneEvent::BecomingNoisy);
        }

        // Platform side: the one-shot request produces a frame on the
        // still surface, then the capture-result callback fires.
        if let Err(e) = still.produce(synthetic_jpeg(i)) {
            warn!("Frame dropped: {}", e);
            continue;
        }
        controller.on_capture_completed();

        if let Some(frame) = still.acquire_latest() {
            if writer.on_frame_ready(frame, &ConsoleSink).is_ok() {
                saved += 1;
            }
        }

        // Keep successive filenames on distinct milliseconds.
        std::thread::sleep(Duration::from_millis(5));
    }

    triggers.unregister();
    surface_registration.unregister();
    controller.close();

    info!(
        "Done. Saved {} of {} captures to {}",
        saved,
        captures,
        config.pictures_dir.display()
    );
}

/// A minimal JPEG-shaped payload: SOI marker, a few bytes, EOI marker.
fn synthetic_jpeg(sequence: u32) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(&sequence.to_be_bytes());
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}
