//! The polling loop: resolve the newest frame, replay history, sleep.

use crate::error::CliError;
use crate::Args;
use satframe::cache::CacheStore;
use satframe::clock::SystemClock;
use satframe::config::Config;
use satframe::display::{DisplaySink, FrameSink};
use satframe::fetch::{Fetcher, ReqwestClient};
use satframe::logging::{default_log_dir, default_log_file, init_logging};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Run the display loop until the process is terminated.
///
/// Failures inside the loop are logged and absorbed; a stale or blank
/// frame is the only visible symptom of persistent failure.
pub fn run(args: Args) -> Result<(), CliError> {
    let _logging_guard = init_logging(default_log_dir(), default_log_file(), args.debug)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    info!("satframe v{}", satframe::VERSION);

    let config = Config::new(args.satellite.into())
        .with_endpoint(args.endpoint.clone())
        .with_display_size(args.width, args.height)
        .with_flash_capacity(args.flash_capacity)
        .with_update_interval(Duration::from_secs(args.update_interval))
        .with_clean_on_start(args.clean);
    config.validate().map_err(CliError::Config)?;

    info!(
        satellite = config.satellite.name(),
        endpoint = %config.endpoint,
        display_count = config.display_count,
        "starting display loop"
    );

    let mut store =
        CacheStore::new(args.storage_root.clone(), &config).map_err(CliError::Config)?;
    store.initialize().map_err(CliError::CacheInit)?;

    let http = ReqwestClient::new().map_err(CliError::HttpClient)?;
    let update_interval = config.update_interval;
    let mut fetcher = Fetcher::new(store, http, SystemClock, config);

    if args.clean {
        let removed = fetcher.cache_mut().evict_all();
        info!(removed, "startup cache cleanup complete");
    }

    let mut sink = FrameSink::new(args.frame.clone());

    loop {
        match fetcher.resolve_latest() {
            Ok((key, jpeg)) => {
                info!(key = %key, bytes = jpeg.len(), "latest frame resolved");
                if let Err(e) = sink.present(&key, &jpeg) {
                    warn!(key = %key, error = %e, "failed to present latest frame");
                }
            }
            Err(e) => {
                // Nothing to draw this cycle; the previous frame stays up.
                warn!(error = %e, "failed to resolve latest frame");
            }
        }

        fetcher.replay_window(&mut sink);

        info!(
            frames = sink.frames_presented(),
            "cycle complete, waiting for next update"
        );
        thread::sleep(update_interval);
    }
}
