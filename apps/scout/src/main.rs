use clap::Parser;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = scout::Args::parse();
	scout::run(args)
}
