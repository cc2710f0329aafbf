use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gif-resizer",
    about = "A browser-based GIF resizing tool with CLI and chat-stamp support",
    long_about = "gif-resizer resizes animated GIF files while preserving frame timing and loop \
                  behavior. It serves a browser upload form (the serve subcommand) and exposes \
                  the same engine on the command line, including Slack-stamp output that fits \
                  chat emoji limits.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    gif-resizer serve --port 8501\n  \
    gif-resizer resize input.gif output.gif -W 480 -H 480 --keep-aspect\n  \
    gif-resizer resize input.gif output.gif --scale 50\n  \
    gif-resizer stamp input.gif stamp.gif --level lightweight\n  \
    gif-resizer info animation.gif"
)]
pub struct Args {
    #[arg(long, global = true, help = "Suppress informational output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Serve the browser upload form",
        long_about = "Start the web front end: an upload form for GIF files with custom-size, \
                      percentage-scale, preset, and Slack-stamp options, plus before/after \
                      statistics and a download link for the result."
    )]
    Serve {
        #[arg(
            long,
            default_value = "localhost",
            help = "Server host (default: localhost)"
        )]
        host: String,

        #[arg(long, default_value_t = 8501, help = "Server port (default: 8501)")]
        port: u16,

        #[arg(
            long,
            help = "Disable XSRF form protection (avoids 403 errors behind some proxies)"
        )]
        disable_xsrf: bool,
    },

    #[command(
        about = "Resize a GIF file",
        long_about = "Resize a GIF file with one of three strategies: an explicit width/height \
                      pair, a percentage of the original size, or a fixed preset. Frame delays \
                      and the loop count are preserved."
    )]
    Resize {
        #[arg(help = "Input GIF file path")]
        input: PathBuf,

        #[arg(help = "Output GIF file path")]
        output: PathBuf,

        #[arg(
            short = 'W',
            long,
            help = "Target width in pixels (10-2000, needs --height)"
        )]
        width: Option<u32>,

        #[arg(
            short = 'H',
            long,
            help = "Target height in pixels (10-2000, needs --width)"
        )]
        height: Option<u32>,

        #[arg(
            short = 's',
            long,
            help = "Scale percentage (10-200)",
            long_help = "Scale both dimensions by a percentage of the original size. \
                         100 keeps the original dimensions."
        )]
        scale: Option<u32>,

        #[arg(
            short = 'p',
            long,
            help = "Preset size (64x64, 128x128, 256x256, 480x480, 512x512)"
        )]
        preset: Option<String>,

        #[arg(
            short = 'k',
            long,
            help = "Keep the original aspect ratio",
            long_help = "Fit the original aspect ratio into the target box: the non-driving \
                         dimension is derived from the original proportions and clamped to \
                         the 10-2000 pixel bounds."
        )]
        keep_aspect: bool,
    },

    #[command(
        about = "Create a 128x128 chat stamp",
        long_about = "Resize a GIF to the 128x128 Slack stamp size. The optimized level keeps \
                      at most 50 frames; the lightweight level also decimates frames until the \
                      output fits in 128 KB."
    )]
    Stamp {
        #[arg(help = "Input GIF file path")]
        input: PathBuf,

        #[arg(help = "Output GIF file path")]
        output: PathBuf,

        #[arg(
            short = 'l',
            long,
            default_value = "standard",
            help = "Optimization level (standard, optimized, lightweight)"
        )]
        level: String,
    },

    #[command(
        about = "Display GIF information",
        long_about = "Analyze a GIF file and display dimensions, frame count, frame delays, \
                      loop behavior, file size, and resize suggestions."
    )]
    Info {
        #[arg(help = "GIF file path to analyze")]
        input: PathBuf,
    },
}
