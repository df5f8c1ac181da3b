use antoine::{
    session::{ self, Intent, Session, Status },
    Direction, ExportFormat, LayoutState,
};

use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Images to stack, in order, as if dropped onto the window
    inputs: Vec<PathBuf>,
    /// Lay the images out left to right instead of top to bottom
    #[clap(long)]
    horizontal: bool,
    /// Output type: png or jpeg (anything else means png)
    #[clap(long, default_value = "png")]
    format: String,
    /// Initial preview zoom
    #[clap(long, default_value_t = 1.0)]
    scale: f32,
    /// Merge the inputs right away and exit, without a window
    #[clap(long)]
    headless: bool,
}

pub fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let direction = if args.horizontal { Direction::Horizontal } else { Direction::Vertical };
    let mut session = Session::new(
        LayoutState::new(direction, args.scale),
        ExportFormat::from_name(&args.format),
    );
    for input in args.inputs {
        session::report(&session.handle(Intent::AddImage(input)));
    }

    if args.headless {
        merge_now(session)
    } else {
        open_window(session)
    }
}

fn merge_now(mut session: Session) -> Result<(), String> {
    let result = session.handle(Intent::Confirm);
    session::report(&result);
    match result {
        Ok(Status::NothingToMerge) => Err("Antoine: need at least two images".to_string()),
        Ok(_) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(feature = "gui")]
fn open_window(session: Session) -> Result<(), String> {
    antoine::window::run(session)
}

#[cfg(not(feature = "gui"))]
fn open_window(session: Session) -> Result<(), String> {
    log::warn!("Built without the gui feature, merging the inputs directly");
    merge_now(session)
}
