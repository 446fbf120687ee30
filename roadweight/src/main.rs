use clap::Parser;
use roadweight::app::{AppError, RoadweightApp};

fn main() -> Result<(), AppError> {
    env_logger::init();
    let args = RoadweightApp::parse();
    args.op.run().map_err(|e| {
        log::error!("{e}");
        e
    })
}
