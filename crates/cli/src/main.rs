//! `umigen` command-line entry point.

fn main() {
    umigen_cli::init_tracing();
    std::process::exit(umigen_cli::run_cli(std::env::args().collect()));
}
