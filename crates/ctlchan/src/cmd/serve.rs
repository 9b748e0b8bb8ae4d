use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ctlchan_node::NodeStream;
use ctlchan_service::ChannelService;

use crate::cmd::ServeArgs;
use crate::exit::{channel_error, CliError, CliResult, SUCCESS};

pub fn run(args: ServeArgs) -> CliResult<i32> {
    let mut service =
        ChannelService::bind(&args.path).map_err(|err| channel_error("bind failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_shutdown_handler(running.clone(), args.path.clone())?;

    service
        .serve(&running)
        .map_err(|err| channel_error("serve failed", err))?;

    Ok(SUCCESS)
}

fn install_shutdown_handler(running: Arc<AtomicBool>, path: PathBuf) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
        // The serve loop sits in a blocking accept; one throwaway session
        // lets it observe the cleared flag and tear down the node.
        let _ = NodeStream::connect(&path);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
