mod commands;
mod terminal;

use commands::{CommandLine, generate};
use tinydash_core::scanner::NmapScanner;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging()?;
    print::banner();

    let cfg = commands.to_config(is_root::is_root());

    print::header("getting ready for discovery");
    let scanner = NmapScanner::new(cfg.elevate);
    generate::generate(&commands.cidr, &cfg, Box::new(scanner))
}
