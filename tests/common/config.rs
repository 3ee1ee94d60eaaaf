//! Test downloader construction around the fake yt-dlp

use super::fixtures::install_fake_ytdlp;
use tempfile::TempDir;
use yt_batch_dl::{BatchDownloader, Config};

/// Scratch layout for one test: the tool directory and the download destination
pub struct TestEnv {
    /// Holds the fake yt-dlp and its call log
    pub tools: TempDir,
    /// Destination for downloads and batch files
    pub dest: TempDir,
}

/// Config pointing at a freshly installed fake yt-dlp
pub fn fake_config() -> (Config, TestEnv) {
    let tools = tempfile::tempdir().expect("failed to create tool dir");
    let dest = tempfile::tempdir().expect("failed to create destination dir");

    let mut config = Config::default();
    config.tools.ytdlp_path = Some(install_fake_ytdlp(tools.path()));
    config.tools.search_path = false;

    (config, TestEnv { tools, dest })
}

/// Downloader backed by the fake yt-dlp
pub fn create_fake_downloader() -> (BatchDownloader, TestEnv) {
    let (config, env) = fake_config();
    let downloader = BatchDownloader::new(config).expect("failed to create downloader");
    (downloader, env)
}
