use clap::Parser;
use gif_resizer::cli::{Args, Commands};
use gif_resizer::options::{ResizeRequest, ResizeStrategy};
use gif_resizer::server::{self, ServerConfig};
use gif_resizer::{info, logger, processing, stamp};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::set_output_mode(args.quiet, args.verbose);

    match args.command {
        Commands::Serve {
            host,
            port,
            disable_xsrf,
        } => {
            let config = ServerConfig {
                host,
                port,
                xsrf_protection: !disable_xsrf,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
        Commands::Resize {
            input,
            output,
            width,
            height,
            scale,
            preset,
            keep_aspect,
        } => {
            let strategy =
                ResizeStrategy::from_cli_args(width, height, scale, preset.as_deref())?;
            let request = ResizeRequest::new(strategy, keep_aspect);
            processing::resize_gif_file(&input, &output, &request)?;
        }
        Commands::Stamp {
            input,
            output,
            level,
        } => {
            let level = level.parse()?;
            stamp::create_stamp_file(&input, &output, level)?;
        }
        Commands::Info { input } => {
            info::print_gif_info(&input)?;
            info::print_detailed_info(&input)?;
        }
    }

    Ok(())
}
