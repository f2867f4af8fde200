fn main() -> anyhow::Result<()> {
    brrtrouter_radix::cli::run_cli()
}
