//! Fake yt-dlp executable for process-level tests
//!
//! The fake understands the two invocations the library makes:
//! - `--flat-playlist --get-id -- <url>` prints `vid001` .. `vidNNN`, where NNN
//!   comes from a `count=NNN` query parameter (default 3); a URL containing
//!   `missing` fails like an unknown playlist
//! - a download prints progress lines and creates `<id>.mp4` next to the `-o`
//!   template; a URL containing `broken` fails with exit code 1
//!
//! Every invocation appends its arguments to `calls.log` beside the script.

use std::path::{Path, PathBuf};

/// Shell source of the fake executable
pub const FAKE_YTDLP: &str = r#"#!/bin/sh
here=$(dirname "$0")
echo "$*" >> "$here/calls.log"

if [ "$1" = "--flat-playlist" ]; then
    url="$4"
    case "$url" in
        *missing*)
            echo "ERROR: [youtube:tab] $url: The playlist does not exist" >&2
            exit 1
            ;;
    esac
    count=3
    case "$url" in
        *count=*) count="${url##*count=}" ;;
    esac
    i=1
    while [ "$i" -le "$count" ]; do
        printf 'vid%03d\n' "$i"
        i=$((i + 1))
    done
    exit 0
fi

out=""
prev=""
for arg in "$@"; do
    if [ "$prev" = "-o" ]; then
        out="$arg"
    fi
    prev="$arg"
done
url="$arg"

case "$url" in
    *broken*)
        echo "ERROR: [youtube] broken: Video unavailable" >&2
        exit 1
        ;;
esac

id="${url##*v=}"
echo "[youtube] $id: Downloading webpage"
echo "[download]  12.5% of 1.00MiB at 1.00MiB/s ETA 00:01"
echo "[download]  57.0% of 1.00MiB at 1.00MiB/s ETA 00:01"
echo "[download] 100% of 1.00MiB in 00:00:01"
touch "$(dirname "$out")/$id.mp4"
"#;

/// Write the fake yt-dlp into `dir` and return its path
pub fn install_fake_ytdlp(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("yt-dlp");
    std::fs::write(&path, FAKE_YTDLP).expect("failed to write fake yt-dlp");
    let mut perms = std::fs::metadata(&path)
        .expect("failed to stat fake yt-dlp")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("failed to chmod fake yt-dlp");
    path
}

/// Argument lines recorded by the fake, one per invocation
pub fn recorded_calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .map(|raw| raw.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Watch URL for a fake id
pub fn watch(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}
