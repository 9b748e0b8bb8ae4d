use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("ctlchan {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: ctlchan");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "frame_size: {} bytes (payload capacity {})",
        ctlchan_frame::FRAME_SIZE,
        ctlchan_frame::PAYLOAD_CAPACITY
    );
    println!("default_node_path: {}", ctlchan_node::DEFAULT_NODE_PATH);

    Ok(SUCCESS)
}
