use clap::Parser;
use content_mapping::cli::commands::{cmd_flatten, cmd_render_links, cmd_test_connection};
use content_mapping::cli::config::{Cli, Commands, load_config};
use content_mapping::trace::logger::AuditLogger;
use content_mapping::trace::setup::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let audit = AuditLogger::from_path(config.audit_log.as_deref());

    match cli.command {
        Commands::Flatten {
            mapping,
            deep,
            format,
        } => {
            cmd_flatten(&mapping, deep, &format, &config, &audit)?;
        }
        Commands::TestConnection {
            endpoint,
            api_key,
            timeout_secs,
            format,
        } => {
            let success = cmd_test_connection(
                endpoint.as_deref(),
                api_key.as_deref(),
                timeout_secs,
                &format,
                &config,
                &audit,
            )?;
            if !success {
                std::process::exit(1);
            }
        }
        Commands::RenderLinks {
            rows,
            absolute,
            base_url,
            format,
        } => {
            cmd_render_links(&rows, absolute, base_url.as_deref(), &format, &config, &audit)?;
        }
    }

    Ok(())
}
