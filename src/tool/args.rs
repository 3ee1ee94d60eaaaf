//! yt-dlp argument construction
//!
//! Pure functions: nothing here touches the filesystem or spawns processes.

use super::traits::Invocation;
use crate::config::DownloadConfig;
use crate::types::{DownloadOptions, Quality};
use std::path::Path;

/// Output template without numbering: `Title.ext`
pub const PLAIN_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Output template with numbering: `007 - Title.ext`
pub const NUMBERED_TEMPLATE: &str = "%(playlist_index)03d - %(title)s.%(ext)s";

/// yt-dlp format expression for a quality selector
///
/// Video selectors prefer H.264 (`avc1`) video with m4a audio so the merged
/// file plays everywhere, and fall back to whatever is best.
#[must_use]
pub fn format_selector(quality: Quality) -> &'static str {
    match quality {
        Quality::Best => "bestvideo[vcodec^=avc1]+bestaudio[ext=m4a]/bestvideo+bestaudio",
        Quality::P720 => {
            "bestvideo[height<=720][vcodec^=avc1]+bestaudio[ext=m4a]/bestvideo[height<=720]+bestaudio"
        }
        Quality::P480 => {
            "bestvideo[height<=480][vcodec^=avc1]+bestaudio[ext=m4a]/bestvideo[height<=480]+bestaudio"
        }
        Quality::Audio => "bestaudio[ext=m4a]/bestaudio",
    }
}

/// Output file name template
#[must_use]
pub fn output_template(numbering: bool) -> &'static str {
    if numbering {
        NUMBERED_TEMPLATE
    } else {
        PLAIN_TEMPLATE
    }
}

/// Build the invocation that downloads one URL
pub fn download_invocation(
    url: &str,
    quality: Quality,
    options: &DownloadOptions,
    dest_dir: &Path,
    formats: &DownloadConfig,
) -> Invocation {
    let fragments = options.concurrent_fragments.map(|n| n.to_string());

    let mut inv = Invocation::builder(url)
        .arg("-f")
        .arg(format_selector(quality))
        .arg("--merge-output-format")
        .arg(&formats.merge_output_format)
        .arg("-o")
        .arg(dest_dir.join(output_template(options.numbering)))
        .arg_if(
            options.subtitle,
            &["--write-auto-subs", "--convert-subs", formats.subtitle_format.as_str()],
        )
        .arg_if(
            options.thumbnail,
            &[
                "--write-thumbnail",
                "--convert-thumbnails",
                formats.thumbnail_format.as_str(),
            ],
        )
        .arg_if(options.metadata, &["--write-info-json"]);

    if let Some(n) = &fragments {
        inv = inv.arg("--concurrent-fragments").arg(n);
    }

    inv.finish()
}

/// Build the invocation that lists the video identifiers of a playlist or channel
pub fn list_ids_invocation(url: &str) -> Invocation {
    Invocation::builder(url)
        .arg("--flat-playlist")
        .arg("--get-id")
        .finish()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn build(options: &DownloadOptions) -> Invocation {
        download_invocation(
            URL,
            Quality::Best,
            options,
            Path::new("/videos"),
            &DownloadConfig::default(),
        )
    }

    #[test]
    fn test_format_selector_table() {
        assert_eq!(
            format_selector(Quality::Best),
            "bestvideo[vcodec^=avc1]+bestaudio[ext=m4a]/bestvideo+bestaudio"
        );
        assert_eq!(
            format_selector(Quality::P720),
            "bestvideo[height<=720][vcodec^=avc1]+bestaudio[ext=m4a]/bestvideo[height<=720]+bestaudio"
        );
        assert_eq!(
            format_selector(Quality::P480),
            "bestvideo[height<=480][vcodec^=avc1]+bestaudio[ext=m4a]/bestvideo[height<=480]+bestaudio"
        );
        assert_eq!(
            format_selector(Quality::Audio),
            "bestaudio[ext=m4a]/bestaudio"
        );
    }

    #[test]
    fn test_unknown_label_selects_audio_format() {
        let quality: Quality = "4k".parse().unwrap();
        assert_eq!(format_selector(quality), "bestaudio[ext=m4a]/bestaudio");
    }

    #[test]
    fn test_default_invocation_layout() {
        let inv = build(&DownloadOptions::default());
        let expected_output = PathBuf::from("/videos")
            .join(PLAIN_TEMPLATE)
            .to_string_lossy()
            .into_owned();
        assert_eq!(
            inv.args_lossy(),
            vec![
                "-f".to_string(),
                format_selector(Quality::Best).to_string(),
                "--merge-output-format".to_string(),
                "mp4".to_string(),
                "-o".to_string(),
                expected_output,
                "--concurrent-fragments".to_string(),
                "5".to_string(),
                "--".to_string(),
                URL.to_string(),
            ]
        );
        assert_eq!(inv.target(), URL);
    }

    #[test]
    fn test_url_is_always_last() {
        let inv = build(&DownloadOptions {
            numbering: true,
            subtitle: true,
            thumbnail: true,
            metadata: true,
            concurrent_fragments: Some(8),
        });
        let args = inv.args_lossy();
        assert_eq!(args.last().map(String::as_str), Some(URL));
        assert_eq!(args[args.len() - 2], "--");
    }

    #[test]
    fn test_option_like_target_follows_separator() {
        let inv = download_invocation(
            "--exec=rm -rf ~",
            Quality::Best,
            &DownloadOptions::default(),
            Path::new("/videos"),
            &DownloadConfig::default(),
        );
        let args = inv.args_lossy();
        let separator = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(&args[separator + 1..], ["--exec=rm -rf ~"]);

        let list = list_ids_invocation("-U");
        assert_eq!(list.args_lossy(), vec!["--flat-playlist", "--get-id", "--", "-U"]);
    }

    #[test]
    fn test_numbering_switches_template() {
        let inv = build(&DownloadOptions {
            numbering: true,
            ..Default::default()
        });
        let output = inv.value_of("-o").unwrap();
        assert!(output.ends_with(NUMBERED_TEMPLATE), "got {}", output);
    }

    #[test]
    fn test_each_option_controls_only_its_flags() {
        // Every combination of the four boolean groups plus fragments on/off
        for mask in 0u8..32 {
            let options = DownloadOptions {
                numbering: mask & 1 != 0,
                subtitle: mask & 2 != 0,
                thumbnail: mask & 4 != 0,
                metadata: mask & 8 != 0,
                concurrent_fragments: (mask & 16 != 0).then_some(5),
            };
            let inv = build(&options);

            assert_eq!(inv.has_arg("--write-auto-subs"), options.subtitle);
            assert_eq!(inv.has_arg("--convert-subs"), options.subtitle);
            assert_eq!(inv.has_arg("--write-thumbnail"), options.thumbnail);
            assert_eq!(inv.has_arg("--convert-thumbnails"), options.thumbnail);
            assert_eq!(inv.has_arg("--write-info-json"), options.metadata);
            assert_eq!(
                inv.has_arg("--concurrent-fragments"),
                options.concurrent_fragments.is_some()
            );
            assert_eq!(
                inv.value_of("-o").unwrap().ends_with(NUMBERED_TEMPLATE),
                options.numbering
            );

            // Mandatory flags never change
            assert_eq!(inv.value_of("-f").as_deref(), Some(format_selector(Quality::Best)));
            assert_eq!(inv.value_of("--merge-output-format").as_deref(), Some("mp4"));
        }
    }

    #[test]
    fn test_configured_formats_are_used() {
        let formats = DownloadConfig {
            merge_output_format: "mkv".into(),
            subtitle_format: "vtt".into(),
            thumbnail_format: "png".into(),
        };
        let options = DownloadOptions {
            subtitle: true,
            thumbnail: true,
            concurrent_fragments: Some(3),
            ..Default::default()
        };
        let inv = download_invocation(URL, Quality::P720, &options, Path::new("out"), &formats);
        assert_eq!(inv.value_of("--merge-output-format").as_deref(), Some("mkv"));
        assert_eq!(inv.value_of("--convert-subs").as_deref(), Some("vtt"));
        assert_eq!(inv.value_of("--convert-thumbnails").as_deref(), Some("png"));
        assert_eq!(inv.value_of("--concurrent-fragments").as_deref(), Some("3"));
    }

    #[test]
    fn test_list_ids_invocation() {
        let url = "https://www.youtube.com/playlist?list=PL123";
        let inv = list_ids_invocation(url);
        assert_eq!(inv.args_lossy(), vec!["--flat-playlist", "--get-id", "--", url]);
        assert_eq!(inv.target(), url);
    }
}
