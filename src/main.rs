use std::path::PathBuf;
use zerowaste::cli::USAGE;
use zerowaste::pipeline::{format_measurements, init_config};
use zerowaste::{init_logging, Cli, Command, Config, Pipeline, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse(std::env::args().skip(1))?;
    init_logging()?;

    let load = |cli: &Cli| {
        Pipeline::load(cli.config.as_deref(), cli.variant, cli.params.as_deref())
    };

    match cli.command {
        Command::Help => print!("{}", USAGE),
        Command::Version => println!("zerowaste {} (built {})", VERSION, BUILD_DATE),
        Command::Generate => {
            let pipeline = load(&cli)?;
            match &cli.out {
                Some(out) => pipeline.write_mesh(out)?,
                None => println!("{}", pipeline.mesh_json()?),
            }
        }
        Command::Measure => {
            let pipeline = load(&cli)?;
            print!("{}", format_measurements(&pipeline.measurements()?));
        }
        Command::ExportSvg => {
            let pipeline = load(&cli)?;
            let (path, stats) = pipeline.export_svg(cli.out.as_deref())?;
            println!(
                "wrote {} ({} dimensions, {} ids, {} labels left out)",
                path.display(),
                stats.placed_dimensions,
                stats.placed_ids,
                stats.dropped()
            );
        }
        Command::SaveParams => {
            let pipeline = load(&cli)?;
            let path = pipeline.save_params(cli.out.as_deref())?;
            println!("wrote {}", path.display());
        }
        Command::InitConfig => {
            let path: PathBuf = match cli.out.clone().or_else(Config::default_path) {
                Some(path) => path,
                None => anyhow::bail!("no config directory on this platform; pass --out"),
            };
            init_config(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
