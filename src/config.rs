//! Command-line configuration.
//!
//! Every option has a default; the endpoint, page size and log file can also
//! come from the environment.

use std::path::PathBuf;

use clap::Parser;

use crate::feed::FeedConfig;
use crate::window::WindowConfig;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Parser)]
#[command(
    name = "postscroll",
    version,
    about = "Browse a paginated JSON posts API as an infinite-scrolling list"
)]
pub struct Args {
    /// Posts endpoint; `_page` and `_limit` query parameters are appended
    #[arg(long, env = "POSTSCROLL_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Items requested per page
    #[arg(
        long,
        env = "POSTSCROLL_PAGE_SIZE",
        default_value_t = 20,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page_size: u32,

    /// Lines per post row
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub row_height: u32,

    /// Blank lines between rows
    #[arg(long, default_value_t = 1)]
    pub row_gap: u32,

    /// Rows built beyond each edge of the viewport
    #[arg(long, default_value_t = 5)]
    pub overscan: usize,

    /// Lines from the end of the list at which the next page is requested
    #[arg(long, default_value_t = 2)]
    pub load_threshold: u32,

    /// Write logs to this file (filtered by RUST_LOG, default `info`)
    #[arg(long, env = "POSTSCROLL_LOG", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            page_size: self.page_size as usize,
        }
    }

    /// Row geometry. The viewport height is measured on the first frame.
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            viewport_height: 0,
            row_height: self.row_height,
            row_gap: self.row_gap,
            overscan: self.overscan,
            load_threshold: self.load_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_feed() {
        let args = Args::try_parse_from(["postscroll"]).unwrap();

        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.feed_config(), FeedConfig { page_size: 20 });
        assert_eq!(
            args.window_config(),
            WindowConfig {
                viewport_height: 0,
                row_height: 3,
                row_gap: 1,
                overscan: 5,
                load_threshold: 2,
            }
        );
        assert!(args.log_file.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "postscroll",
            "--endpoint",
            "http://localhost:3000/posts",
            "--page-size",
            "50",
            "--row-height",
            "4",
            "--row-gap",
            "0",
            "--overscan",
            "2",
            "--load-threshold",
            "12",
            "--log-file",
            "/tmp/postscroll.log",
        ])
        .unwrap();

        assert_eq!(args.endpoint, "http://localhost:3000/posts");
        assert_eq!(args.feed_config().page_size, 50);
        let window = args.window_config();
        assert_eq!(window.stride(), 4);
        assert_eq!(window.overscan, 2);
        assert_eq!(window.load_threshold, 12);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/postscroll.log")));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Args::try_parse_from(["postscroll", "--page-size", "0"]).is_err());
    }

    #[test]
    fn zero_row_height_is_rejected() {
        assert!(Args::try_parse_from(["postscroll", "--row-height", "0"]).is_err());
    }

    #[test]
    fn huge_row_geometry_does_not_overflow() {
        let args = Args::try_parse_from([
            "postscroll",
            "--row-height",
            "4294967295",
            "--row-gap",
            "1",
        ])
        .unwrap();

        assert_eq!(args.window_config().stride(), u32::MAX);
    }
}
