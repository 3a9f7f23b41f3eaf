use jetton_minter_cli::cli::Cli;
use jetton_minter_cli::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose)?;
    cli.execute(&mut std::io::stdout().lock())?;
    Ok(())
}
