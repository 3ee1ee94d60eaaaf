//! Download job execution, split into focused submodules:
//! - [`orchestration`] - Job-level loop over the URL list and final summary
//! - [`item`] - One yt-dlp process: spawn, stream output, stop, exit status

mod item;
mod orchestration;

pub(super) use orchestration::run_download_job;
